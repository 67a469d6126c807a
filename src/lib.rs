pub use self::errors::{Error, Result};

pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod media;
pub mod models;
pub mod normalize;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod session;
pub mod views;
