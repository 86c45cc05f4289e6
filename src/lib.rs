//! Scenario Gen - procedural political-economic scenario synthesis

pub mod core;
pub mod focus;
pub mod scenario;
