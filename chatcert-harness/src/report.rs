//! Per-scenario verdicts and the aggregate suite report

use chatcert_core::Error;
use std::fmt;
use tracing::{debug, warn};

/// The verdict of one conformance scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The provider honored the contract
    Passed,
    /// The provider violated the contract (wrong reply shape or state)
    Failed {
        /// What the provider did instead, for diagnosis
        reason: String,
    },
    /// The provider itself failed during a call or an element pull
    Errored {
        /// The provider error text
        error: String,
    },
}

impl Outcome {
    /// Whether this is a passing verdict
    pub const fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "passed"),
            Outcome::Failed { reason } => write!(f, "failed: {reason}"),
            Outcome::Errored { error } => write!(f, "errored: {error}"),
        }
    }
}

/// The report for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// The scenario name, stable across both execution models
    pub name: &'static str,
    /// The verdict
    pub outcome: Outcome,
    /// Elements observed while draining a streaming reply, when applicable
    ///
    /// A zero-element stream still passes; the count is recorded so callers
    /// can impose a minimum themselves.
    pub elements: Option<usize>,
}

impl ScenarioReport {
    /// A passing verdict
    pub const fn passed(name: &'static str) -> Self {
        Self {
            name,
            outcome: Outcome::Passed,
            elements: None,
        }
    }

    /// A passing verdict for a drained streaming reply
    pub const fn passed_with_elements(name: &'static str, elements: usize) -> Self {
        Self {
            name,
            outcome: Outcome::Passed,
            elements: Some(elements),
        }
    }

    /// A contract-violation verdict
    pub fn failed(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            outcome: Outcome::Failed {
                reason: reason.into(),
            },
            elements: None,
        }
    }

    /// A provider-error verdict
    pub fn errored(name: &'static str, error: &Error) -> Self {
        Self {
            name,
            outcome: Outcome::Errored {
                error: error.to_string(),
            },
            elements: None,
        }
    }
}

/// The aggregate report for one suite run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub(crate) fn new(scenarios: Vec<ScenarioReport>) -> Self {
        let report = Self { scenarios };
        report.log();
        report
    }

    /// All scenario reports, in suite order
    pub fn scenarios(&self) -> &[ScenarioReport] {
        &self.scenarios
    }

    /// Whether every scenario passed
    pub fn passed(&self) -> bool {
        self.scenarios
            .iter()
            .all(|scenario| scenario.outcome.is_passed())
    }

    /// The scenarios that did not pass
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.scenarios
            .iter()
            .filter(|scenario| !scenario.outcome.is_passed())
            .collect()
    }

    /// Look up one scenario's report by name
    pub fn scenario(&self, name: &str) -> Option<&ScenarioReport> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    fn log(&self) {
        for scenario in &self.scenarios {
            match &scenario.outcome {
                Outcome::Passed => debug!(scenario = scenario.name, "scenario passed"),
                Outcome::Failed { reason } => {
                    warn!(scenario = scenario.name, %reason, "contract violation");
                }
                Outcome::Errored { error } => {
                    warn!(scenario = scenario.name, %error, "provider error");
                }
            }
        }
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self
            .scenarios
            .iter()
            .filter(|scenario| scenario.outcome.is_passed())
            .count();
        writeln!(
            f,
            "conformance: {} scenarios, {} passed, {} not passed",
            self.scenarios.len(),
            passed,
            self.scenarios.len() - passed
        )?;
        for scenario in self.failures() {
            writeln!(f, "  {}: {}", scenario.name, scenario.outcome)?;
        }
        Ok(())
    }
}
