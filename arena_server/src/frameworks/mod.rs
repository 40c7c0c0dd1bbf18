// Frameworks layer: configuration, logging and HTTP server bootstrap.

pub mod config;
pub mod server;
