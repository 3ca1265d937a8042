//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod asset;
mod social;
mod video;

// Re-export all models for convenient imports
pub use asset::*;
pub use social::*;
pub use video::*;
