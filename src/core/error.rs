use thiserror::Error;

use crate::core::types::CountryId;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid focus template `{chain}`: {reason}")]
    InvalidTemplate { chain: String, reason: String },

    #[error("Invalid unit template `{name}`: {reason}")]
    InvalidUnit { name: String, reason: String },

    #[error("Country not found: {0:?}")]
    UnknownCountry(CountryId),

    #[error("Region not found: {0}")]
    UnknownRegion(u32),

    #[error("Region {0} is already owned")]
    RegionTaken(u32),

    #[error("Region {0} is sea and cannot be claimed")]
    SeaRegion(u32),

    #[error("No free land region left to place country {tag}")]
    NoStartRegion { tag: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
