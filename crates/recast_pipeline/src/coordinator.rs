//! Fan-out of one submission into concurrent platform sequences.

use crate::{PlatformProfile, RunReport, SequenceRunner, catalog};
use derive_getters::Getters;
use derive_setters::Setters;
use recast_core::{Platform, Role, RunResult, Sequence};
use recast_error::{ModelError, ModelErrorKind, PipelineError, PipelineErrorKind};
use recast_interface::TextGenerator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, instrument, warn};

/// How a failed platform affects the rest of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Any failed platform fails the whole run
    #[default]
    Atomic,
    /// Failed platforms are dropped from the result
    Isolated,
}

fn default_max_concurrent_sequences() -> usize {
    3
}

/// Coordinator tuning.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct PipelineConfig {
    /// Upper bound on platform sequences in flight at once (minimum 1)
    #[serde(default = "default_max_concurrent_sequences")]
    max_concurrent_sequences: usize,
    /// What a failed platform does to the run
    #[serde(default)]
    failure_policy: FailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sequences: default_max_concurrent_sequences(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Runs one sequence per configured platform and joins the results.
///
/// Sequences for different platforms share nothing except the generator.
/// Every sequence runs to completion (or its own failure) before the run is
/// reported, so one platform's failure never stops another from being
/// attempted. Dropping the future returned by [`process`](Self::process)
/// aborts the sequence tasks still in flight.
pub struct PipelineCoordinator<G> {
    generator: Arc<G>,
    sequences: Vec<(Platform, Arc<Sequence>)>,
    config: PipelineConfig,
}

impl<G> std::fmt::Debug for PipelineCoordinator<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineCoordinator")
            .field(
                "platforms",
                &self.sequences.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl<G: TextGenerator + 'static> PipelineCoordinator<G> {
    /// Creates a coordinator for the built-in platform catalogue.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in catalogue is invalid.
    pub fn new(generator: G) -> Result<Self, ModelError> {
        let critic = Arc::new(catalog::critic_role()?);
        Self::with_profiles(generator, critic, catalog::default_profiles()?)
    }

    /// Creates a coordinator for custom platform profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::DuplicatePlatform`] when two profiles target
    /// the same platform, or any error from building a profile's sequence.
    pub fn with_profiles(
        generator: G,
        critic: Arc<Role>,
        profiles: Vec<PlatformProfile>,
    ) -> Result<Self, ModelError> {
        let mut seen = HashSet::new();
        let mut sequences = Vec::with_capacity(profiles.len());

        for profile in &profiles {
            let platform = *profile.platform();
            if !seen.insert(platform) {
                return Err(ModelError::new(ModelErrorKind::DuplicatePlatform(
                    platform.to_string(),
                )));
            }
            sequences.push((platform, Arc::new(profile.build_sequence(&critic)?)));
        }

        debug!(platforms = sequences.len(), "Built pipeline coordinator");

        Ok(Self {
            generator: Arc::new(generator),
            sequences,
            config: PipelineConfig::default(),
        })
    }

    /// Replaces the coordinator tuning.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tuning.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The shared generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Configured platforms in registration order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.sequences.iter().map(|(p, _)| *p)
    }

    /// The sequence built for a platform.
    pub fn sequence(&self, platform: Platform) -> Option<&Sequence> {
        self.sequences
            .iter()
            .find(|(p, _)| *p == platform)
            .map(|(_, s)| s.as_ref())
    }

    /// Rewrites `content` for every configured platform.
    ///
    /// Empty content short-circuits to an empty result without calling the
    /// generator.
    ///
    /// # Errors
    ///
    /// Failed platforms are handled according to the configured
    /// [`FailurePolicy`]; see [`RunReport::into_result`].
    pub async fn process(&self, content: &str) -> Result<RunResult, PipelineError> {
        self.process_report(content)
            .await
            .into_result(self.config.failure_policy)
    }

    /// Like [`process`](Self::process) but rejects empty content.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::EmptyContent`] for empty input, otherwise
    /// behaves like `process`.
    pub async fn process_strict(&self, content: &str) -> Result<RunResult, PipelineError> {
        if content.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyContent));
        }
        self.process(content).await
    }

    /// Runs every platform sequence and reports each outcome separately.
    #[instrument(
        name = "pipeline_run",
        skip_all,
        fields(
            content_len = content.len(),
            platforms = self.sequences.len(),
            model = self.generator.model_name(),
        )
    )]
    pub async fn process_report(&self, content: &str) -> RunReport {
        if content.is_empty() {
            debug!("Empty content, skipping all sequences");
            return RunReport::default();
        }

        let content: Arc<str> = Arc::from(content);
        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_sequences.max(1)));
        let mut join_set = JoinSet::new();

        for (platform, sequence) in &self.sequences {
            let platform = *platform;
            let runner = SequenceRunner::new(Arc::clone(&self.generator));
            let sequence = Arc::clone(sequence);
            let content = Arc::clone(&content);
            let permits = Arc::clone(&permits);

            join_set.spawn(
                async move {
                    // The semaphore is never closed, so acquire only fails if it were.
                    let _permit = permits.acquire_owned().await.ok();
                    let outcome = runner.run_text(&sequence, &content).await;
                    (platform, outcome)
                }
                .instrument(info_span!("platform_sequence", platform = %platform)),
            );
        }

        let mut outcomes = BTreeMap::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((platform, outcome)) => {
                    match &outcome {
                        Ok(text) => info!(%platform, output_len = text.len(), "Platform completed"),
                        Err(e) => warn!(%platform, error = %e, "Platform failed"),
                    }
                    outcomes.insert(platform, outcome);
                }
                Err(e) => error!(error = %e, "Sequence task did not complete"),
            }
        }

        // A task that panicked leaves no outcome; record it against its platform.
        for platform in self.platforms() {
            outcomes.entry(platform).or_insert_with(|| {
                Err(PipelineError::new(PipelineErrorKind::TaskJoin {
                    platform: platform.to_string(),
                    message: "sequence task panicked or was cancelled".to_string(),
                }))
            });
        }

        RunReport::from_outcomes(outcomes)
    }
}
