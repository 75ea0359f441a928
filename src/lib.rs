//! Static file server with browsable HTML directory listings.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod listing;
pub mod server;
