pub mod config;
pub mod error;
pub mod types;

pub use config::ScenarioConfig;
pub use error::{Result, ScenarioError};
