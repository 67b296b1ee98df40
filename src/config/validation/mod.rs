//! Configuration validation
//!
//! Each configuration section implements [`Validate`]; [`Config::validate`]
//! runs them all and wraps the first failure in a config error.
//!
//! [`Config::validate`]: crate::config::Config::validate

mod config_validators;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
