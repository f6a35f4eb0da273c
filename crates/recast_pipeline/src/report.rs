//! Per-platform outcomes of a pipeline run.

use crate::FailurePolicy;
use recast_core::{Platform, RunResult};
use recast_error::PipelineError;
use std::collections::BTreeMap;

/// Outcome of every platform sequence in one run.
///
/// Every configured platform has exactly one entry, success or failure,
/// unless the input was empty, in which case nothing ran.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: BTreeMap<Platform, Result<String, PipelineError>>,
}

impl RunReport {
    pub(crate) fn from_outcomes(outcomes: BTreeMap<Platform, Result<String, PipelineError>>) -> Self {
        Self { outcomes }
    }

    /// Outcome for a single platform.
    pub fn outcome(&self, platform: Platform) -> Option<&Result<String, PipelineError>> {
        self.outcomes.get(&platform)
    }

    /// All outcomes in platform order.
    pub fn outcomes(&self) -> impl Iterator<Item = (Platform, &Result<String, PipelineError>)> {
        self.outcomes.iter().map(|(p, r)| (*p, r))
    }

    /// Failed platforms and their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Platform, &PipelineError)> {
        self.outcomes
            .iter()
            .filter_map(|(p, r)| r.as_ref().err().map(|e| (*p, e)))
    }

    /// True when no platform failed.
    pub fn is_complete(&self) -> bool {
        self.outcomes.values().all(Result::is_ok)
    }

    /// Number of platforms that ran.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when nothing ran.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Successful outputs only.
    pub fn successes(&self) -> RunResult {
        self.outcomes
            .iter()
            .filter_map(|(p, r)| r.as_ref().ok().map(|text| (*p, text.clone())))
            .collect()
    }

    /// Collapses the report according to a failure policy.
    ///
    /// `Atomic` fails on the first failed platform in platform order.
    /// `Isolated` keeps successful platforms and fails only when every
    /// platform failed.
    ///
    /// # Errors
    ///
    /// Returns the selected platform error as described above.
    pub fn into_result(self, policy: FailurePolicy) -> Result<RunResult, PipelineError> {
        let successes = self.successes();
        let Some(first_error) = self.outcomes.into_values().find_map(Result::err) else {
            return Ok(successes);
        };

        match policy {
            FailurePolicy::Isolated if !successes.is_empty() => Ok(successes),
            _ => Err(first_error),
        }
    }
}
