//! SA configuration.

use crate::error::{Result, TspError};

/// Configuration for simulated annealing over tours.
///
/// Temperature starts at `initial_temperature` and is divided by
/// `cooling_factor` after every move. The run stops once the temperature
/// drops to `min_temperature`, the current cycle length drops to
/// `energy_threshold`, or `max_iterations` moves were tried.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_factor(1.01)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more uphill moves early.
    pub initial_temperature: f64,

    /// The run stops when the temperature is no longer above this.
    pub min_temperature: f64,

    /// The run stops when the current cycle length is no longer above this.
    pub energy_threshold: f64,

    /// Divisor applied to the temperature after each move. Must exceed 1.
    pub cooling_factor: f64,

    /// Hard cap on moves. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 500.0,
            min_temperature: 0.1,
            energy_threshold: 5.0,
            cooling_factor: 1.001,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_energy_threshold(mut self, e: f64) -> Self {
        self.energy_threshold = e;
        self
    }

    pub fn with_cooling_factor(mut self, a: f64) -> Self {
        self.cooling_factor = a;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err(TspError::invalid(
                "initial_temperature",
                "must be a positive finite number",
            ));
        }
        if !(self.min_temperature > 0.0) {
            return Err(TspError::invalid("min_temperature", "must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(TspError::invalid(
                "min_temperature",
                "must be less than initial_temperature",
            ));
        }
        if !(self.cooling_factor > 1.0) || !self.cooling_factor.is_finite() {
            return Err(TspError::invalid(
                "cooling_factor",
                format!("must be a finite number above 1, got {}", self.cooling_factor),
            ));
        }
        if !(self.energy_threshold >= 0.0) {
            return Err(TspError::invalid("energy_threshold", "must be non-negative"));
        }
        Ok(())
    }
}
