//! Core domain types and logic.

pub mod trade;
pub mod journal;
pub mod stats;
pub mod export;
pub mod reference;
pub mod settings;
pub mod config_validation;
pub mod error;
