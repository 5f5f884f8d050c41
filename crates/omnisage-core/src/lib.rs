//! Shared types, configuration, and errors for OmniSage.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Credentials, OmniSageConfig};
pub use error::{OmniSageError, Result};
pub use types::*;
