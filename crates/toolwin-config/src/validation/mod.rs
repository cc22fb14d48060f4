//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod docking;
mod helpers;
mod logging;
mod stripes;


use crate::schema::ToolwinConfig;
use helpers::Violations;
use toolwin_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ToolwinConfig) -> Result<(), ConfigError> {
    let mut violations = Violations::default();

    docking::validate_docking(&mut violations, &config.docking);
    stripes::validate_stripes(&mut violations, &config.stripes);
    logging::validate_logging(&mut violations, &config.logging);

    match violations.into_message() {
        None => Ok(()),
        Some(message) => Err(ConfigError::ValidationError(message)),
    }
}
