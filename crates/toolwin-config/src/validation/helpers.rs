//! Error collection shared by the section validators.

use std::fmt::Display;

/// Collects every violation so one `ConfigError` can report them all.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub(crate) fn push(&mut self, message: String) {
        self.0.push(message);
    }

    /// `value` must lie in `[min, max]`.
    pub(crate) fn within<T>(&mut self, name: &str, value: T, min: T, max: T)
    where
        T: PartialOrd + Display,
    {
        if !(min <= value && value <= max) {
            self.push(format!("{name} = {value} is out of range [{min}, {max}]"));
        }
    }

    /// `value` must lie in `(0, max]`. NaN never does.
    pub(crate) fn fraction(&mut self, name: &str, value: f64, max: f64) {
        if !(value > 0.0 && value <= max) {
            self.push(format!("{name} = {value} is out of range (0, {max}]"));
        }
    }

    pub(crate) fn into_message(self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.join("; "))
    }
}
