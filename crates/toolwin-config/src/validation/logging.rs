use crate::schema::LoggingConfig;

use super::helpers::Violations;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub(crate) fn validate_logging(v: &mut Violations, logging: &LoggingConfig) {
    if !LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        v.push(format!(
            "logging.level = \"{}\" must be one of {}",
            logging.level,
            LEVELS.join(", ")
        ));
    }
}
