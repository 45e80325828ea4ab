//! Tabu Search configuration.

use std::time::Duration;

use crate::error::{Result, TspError};

/// When a Tabu Search run stops.
///
/// Exactly one budget applies to a run; the enum makes it impossible to
/// configure both.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Run exactly this many iterations.
    Iterations(usize),
    /// Run while the summed per-iteration wall-clock time stays within
    /// this budget. The last iteration may overshoot by its own duration.
    TimeBudget(Duration),
}

impl Termination {
    /// Builds a budget from the two optional knobs callers usually expose.
    ///
    /// # Errors
    ///
    /// [`TspError::ConflictingTermination`] if both are set,
    /// [`TspError::MissingTermination`] if neither is, and
    /// [`TspError::InvalidParameter`] for a zero or non-finite value.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::tabu::Termination;
    ///
    /// assert_eq!(
    ///     Termination::from_options(Some(50), None).unwrap(),
    ///     Termination::Iterations(50)
    /// );
    /// assert!(Termination::from_options(Some(10), Some(5.0)).is_err());
    /// ```
    pub fn from_options(iterations: Option<usize>, max_seconds: Option<f64>) -> Result<Self> {
        let termination = match (iterations, max_seconds) {
            (Some(_), Some(_)) => return Err(TspError::ConflictingTermination),
            (None, None) => return Err(TspError::MissingTermination),
            (Some(n), None) => Self::Iterations(n),
            (None, Some(secs)) => {
                if !secs.is_finite() || secs <= 0.0 {
                    return Err(TspError::invalid(
                        "max_seconds",
                        format!("must be a positive finite number, got {secs}"),
                    ));
                }
                let budget = Duration::try_from_secs_f64(secs)
                    .map_err(|e| TspError::invalid("max_seconds", e.to_string()))?;
                Self::TimeBudget(budget)
            }
        };
        termination.validate()?;
        Ok(termination)
    }

    /// Validates the budget.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Iterations(0) => Err(TspError::invalid("iterations", "must be positive")),
            Self::TimeBudget(d) if d.is_zero() => {
                Err(TspError::invalid("max_seconds", "must be positive"))
            }
            _ => Ok(()),
        }
    }

    /// Whether another iteration may start.
    pub(crate) fn should_continue(&self, completed: usize, elapsed: Duration) -> bool {
        match *self {
            Self::Iterations(n) => completed < n,
            Self::TimeBudget(budget) => elapsed <= budget,
        }
    }
}

/// Configuration parameters for Tabu Search over tours.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::{TabuConfig, Termination};
///
/// let config = TabuConfig::default()
///     .with_tabu_size(20)
///     .with_search_space_percent(30.0)
///     .with_aspiration_criteria(0.1)
///     .with_max_stuck_iterations(10)
///     .with_max_seconds(2.0)
///     .unwrap();
/// assert_eq!(config.tabu_size, 20);
/// assert!(matches!(config.termination, Termination::TimeBudget(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Capacity of the tabu list. The oldest tour is evicted on overflow.
    pub tabu_size: usize,
    /// Candidates per iteration as a percentage (0..=100) of the tour length.
    pub search_space_percent: f64,
    /// Minimum improvement, as a percentage of the current candidate's
    /// cost, that lets a tabu tour be accepted anyway.
    pub aspiration_criteria: f64,
    /// Iterations without a new best solution before candidate segments
    /// are shuffled instead of reversed.
    pub max_stuck_iterations: usize,
    /// Stopping rule.
    pub termination: Termination,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tabu_size: 5,
            search_space_percent: 20.0,
            aspiration_criteria: 10.0,
            max_stuck_iterations: 100,
            termination: Termination::Iterations(100),
        }
    }
}

impl TabuConfig {
    /// Sets the tabu list capacity.
    pub fn with_tabu_size(mut self, size: usize) -> Self {
        self.tabu_size = size;
        self
    }

    /// Sets the candidate batch size as a percentage of the tour length.
    pub fn with_search_space_percent(mut self, percent: f64) -> Self {
        self.search_space_percent = percent;
        self
    }

    /// Sets the aspiration threshold (percent of current cost).
    pub fn with_aspiration_criteria(mut self, percent: f64) -> Self {
        self.aspiration_criteria = percent;
        self
    }

    /// Sets the stagnation limit that triggers diversification.
    pub fn with_max_stuck_iterations(mut self, n: usize) -> Self {
        self.max_stuck_iterations = n;
        self
    }

    /// Stops after exactly `n` iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.termination = Termination::Iterations(n);
        self
    }

    /// Stops once the accumulated search time exceeds `seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidParameter`] for non-positive or
    /// non-finite values.
    pub fn with_max_seconds(self, seconds: f64) -> Result<Self> {
        self.with_termination_options(None, Some(seconds))
    }

    /// Sets the stopping rule directly.
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Sets the stopping rule from two optional knobs, exactly one of which
    /// must be present. See [`Termination::from_options`].
    pub fn with_termination_options(
        mut self,
        iterations: Option<usize>,
        max_seconds: Option<f64>,
    ) -> Result<Self> {
        self.termination = Termination::from_options(iterations, max_seconds)?;
        Ok(self)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tabu_size == 0 {
            return Err(TspError::invalid("tabu_size", "must be positive"));
        }
        if !(0.0..=100.0).contains(&self.search_space_percent) {
            return Err(TspError::invalid(
                "search_space_percent",
                format!("must be in 0..=100, got {}", self.search_space_percent),
            ));
        }
        if !self.aspiration_criteria.is_finite() || self.aspiration_criteria < 0.0 {
            return Err(TspError::invalid(
                "aspiration_criteria",
                format!(
                    "must be a non-negative finite number, got {}",
                    self.aspiration_criteria
                ),
            ));
        }
        self.termination.validate()
    }
}
