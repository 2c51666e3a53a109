//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory rate
//! tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

use super::types::{Jurisdiction, PayrollConfig, RateTable};

/// Loads and provides access to payroll rate configuration.
///
/// # Directory Structure
///
/// ```text
/// config/morocco/
/// ├── jurisdiction.yaml   # Code, name, currency, source
/// └── rates/
///     └── 2025-01-01.yaml # Rate table effective from this date
/// ```
///
/// Historical tables stay in `rates/` so that past periods keep resolving to
/// the rates that applied at the time.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/morocco").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
/// let rates = loader.rates_for(date).unwrap();
/// println!("CNSS employee rate: {}", rates.contributions.social_security.employee_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `jurisdiction.yaml` or the `rates/` directory is
    /// missing, if any file contains invalid YAML, or if any rate table fails
    /// [`RateTable::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let jurisdiction_path = path.join("jurisdiction.yaml");
        let jurisdiction = Self::load_yaml::<Jurisdiction>(&jurisdiction_path)?;

        let rates_dir = path.join("rates");
        let rates = Self::load_rates(&rates_dir)?;

        Ok(Self {
            config: PayrollConfig::new(jurisdiction, rates),
        })
    }

    /// Returns a loader backed by the compiled-in 2025 Moroccan rates.
    pub fn builtin() -> Self {
        Self {
            config: PayrollConfig::new(Jurisdiction::morocco(), vec![RateTable::morocco_2025()]),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all rate tables from the rates directory.
    fn load_rates(rates_dir: &Path) -> PayrollResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(PayrollError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| PayrollError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| PayrollError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<RateTable>(&path)?;
                table.validate()?;
                rates.push(table);
            }
        }

        if rates.is_empty() {
            return Err(PayrollError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &Jurisdiction {
        self.config.jurisdiction()
    }

    /// Returns the rate table effective on `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::builtin();
    /// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// assert!(loader.rates_for(date).is_ok());
    ///
    /// let before = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    /// assert!(loader.rates_for(before).is_err());
    /// ```
    pub fn rates_for(&self, date: NaiveDate) -> PayrollResult<&RateTable> {
        self.config.rates_for(date)
    }
}
