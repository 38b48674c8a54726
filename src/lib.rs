//! libris - a small book/author catalog HTTP API over SQLite

pub mod cli;
pub mod config;
pub mod http_server;
pub mod service;
pub mod store;
