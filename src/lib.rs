pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod frame;
pub mod loader;
pub mod response;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;
pub mod ui;
