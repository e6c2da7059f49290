pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod service;

pub use config::MySqlConfig;
pub use error::SmokeError;
