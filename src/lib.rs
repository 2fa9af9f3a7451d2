// Library crate shared by the binary (main.rs) and the integration tests.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod environments;
pub mod error;
pub mod preferences;
pub mod results;
pub mod routes;
pub mod runner;
pub mod server;
pub mod state;
pub mod store;
