use log::{debug, info, warn};
use std::fmt;

/// Component-scoped front end over the `log` facade.
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    /// Debug-level message; `args` is only rendered when debug logging is on.
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        debug!("[{}] {}", self.scope, args);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.scope, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("geotarget")
    }
}
