pub mod error;
pub mod api;
pub mod hdb;
pub mod filter;
pub mod client;
pub mod issuance;
pub mod server;
pub mod bootstrap;
pub mod middleware;
pub mod config;
