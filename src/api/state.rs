//! Shared state for the payroll API.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::{ConfigLoader, RateTable};
use crate::error::PayrollResult;

/// State shared by every request handler.
///
/// The loaded rate configuration is read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Wraps a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rate table effective on `date`.
    pub fn rates_for(&self, date: NaiveDate) -> PayrollResult<&RateTable> {
        self.config.rates_for(date)
    }
}
