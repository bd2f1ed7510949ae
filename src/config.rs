//! TOML-based market scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`MarketScenario::from_toml_file`] or use
/// [`MarketScenario::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketScenario {
    /// Session-wide parameters (random seed).
    #[serde(default)]
    pub session: SessionConfig,
    /// Marketplace refresh volumes.
    #[serde(default)]
    pub market: MarketConfig,
    /// Starting wallet balance.
    #[serde(default)]
    pub wallet: WalletConfig,
    /// Starting user trading counters.
    #[serde(default)]
    pub stats: StatsConfig,
    /// Smart-meter fleet and billing parameters.
    #[serde(default)]
    pub meters: MeterConfig,
}

/// Session-wide parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Master random seed.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Marketplace refresh volumes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Active listings fabricated per refresh (must be > 0).
    pub listing_count: usize,
    /// Recent transactions fabricated per refresh (must be > 0).
    pub transaction_count: usize,
    /// Price prediction horizon in hours (must be > 0).
    pub prediction_hours: usize,
    /// Historical price chart window in days (must be > 0).
    pub history_days: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            listing_count: 20,
            transaction_count: 10,
            prediction_hours: 24,
            history_days: 30,
        }
    }
}

/// Starting wallet balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    /// Available funds (must be >= 0).
    pub available: f64,
    /// Funds locked in pending operations (must be >= 0).
    pub pending: f64,
    /// ISO currency code.
    pub currency: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            available: 5000.0,
            pending: 0.0,
            currency: "USD".to_string(),
        }
    }
}

/// Starting user trading counters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    /// Lifetime energy bought (kWh).
    pub energy_bought_kwh: f64,
    /// Lifetime energy sold (kWh).
    pub energy_sold_kwh: f64,
    /// Lifetime CO2 offset (kg).
    pub co2_offset_kg: f64,
    /// Lifetime savings in wallet currency.
    pub savings_to_date: f64,
    /// Lifetime transaction count.
    pub transactions: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            energy_bought_kwh: 2450.0,
            energy_sold_kwh: 1200.0,
            co2_offset_kg: 1850.0,
            savings_to_date: 320.50,
            transactions: 15,
        }
    }
}

/// Smart-meter fleet and billing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeterConfig {
    /// Meters registered to the session user (must be > 0).
    pub meter_count: usize,
    /// Reading window fetched on meter selection, in days (1..=31).
    pub reading_days: usize,
    /// Monthly settlements generated per connection (must be > 0).
    pub settlement_months: usize,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            meter_count: 3,
            reading_days: 7,
            settlement_months: 6,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"market.listing_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl MarketScenario {
    /// Returns the baseline scenario matching the stock demo volumes.
    pub fn baseline() -> Self {
        Self {
            session: SessionConfig::default(),
            market: MarketConfig::default(),
            wallet: WalletConfig::default(),
            stats: StatsConfig::default(),
            meters: MeterConfig::default(),
        }
    }

    /// Returns the busy-market preset: deep listing book, long horizons.
    pub fn busy_market() -> Self {
        Self {
            market: MarketConfig {
                listing_count: 50,
                transaction_count: 25,
                prediction_hours: 48,
                history_days: 90,
            },
            wallet: WalletConfig {
                available: 20_000.0,
                ..WalletConfig::default()
            },
            meters: MeterConfig {
                meter_count: 5,
                reading_days: 14,
                settlement_months: 12,
            },
            ..Self::baseline()
        }
    }

    /// Returns the quiet-market preset: thin book, short horizons, fresh user.
    pub fn quiet_market() -> Self {
        Self {
            market: MarketConfig {
                listing_count: 5,
                transaction_count: 3,
                prediction_hours: 12,
                history_days: 7,
            },
            wallet: WalletConfig {
                available: 500.0,
                ..WalletConfig::default()
            },
            stats: StatsConfig {
                energy_bought_kwh: 0.0,
                energy_sold_kwh: 0.0,
                co2_offset_kg: 0.0,
                savings_to_date: 0.0,
                transactions: 0,
            },
            meters: MeterConfig {
                meter_count: 1,
                reading_days: 3,
                settlement_months: 3,
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "busy_market", "quiet_market"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "busy_market" => Ok(Self::busy_market()),
            "quiet_market" => Ok(Self::quiet_market()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let m = &self.market;

        if m.listing_count == 0 {
            errors.push(ConfigError {
                field: "market.listing_count".into(),
                message: "must be > 0".into(),
            });
        }
        if m.transaction_count == 0 {
            errors.push(ConfigError {
                field: "market.transaction_count".into(),
                message: "must be > 0".into(),
            });
        }
        if m.prediction_hours == 0 {
            errors.push(ConfigError {
                field: "market.prediction_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if m.history_days == 0 {
            errors.push(ConfigError {
                field: "market.history_days".into(),
                message: "must be > 0".into(),
            });
        }

        let w = &self.wallet;
        if w.available < 0.0 {
            errors.push(ConfigError {
                field: "wallet.available".into(),
                message: "must be >= 0".into(),
            });
        }
        if w.pending < 0.0 {
            errors.push(ConfigError {
                field: "wallet.pending".into(),
                message: "must be >= 0".into(),
            });
        }
        if w.currency.is_empty() {
            errors.push(ConfigError {
                field: "wallet.currency".into(),
                message: "must not be empty".into(),
            });
        }

        let mt = &self.meters;
        if mt.meter_count == 0 {
            errors.push(ConfigError {
                field: "meters.meter_count".into(),
                message: "must be > 0".into(),
            });
        }
        if !(1..=31).contains(&mt.reading_days) {
            errors.push(ConfigError {
                field: "meters.reading_days".into(),
                message: "must be in [1, 31]".into(),
            });
        }
        if mt.settlement_months == 0 {
            errors.push(ConfigError {
                field: "meters.settlement_months".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
