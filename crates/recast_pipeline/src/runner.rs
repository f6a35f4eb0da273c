//! Sequential execution of a single step chain.

use derive_getters::Getters;
use recast_core::{Sequence, StepKind};
use recast_error::{PipelineError, PipelineErrorKind};
use recast_interface::TextGenerator;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Heading placed before the original content when a step carries it forward.
pub const ORIGINAL_CONTENT_HEADING: &str = "Given Content:";

/// Record of a single executed step.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct StepExecution {
    /// Zero-based position in the sequence
    index: usize,
    /// Chain position
    #[serde(serialize_with = "serialize_kind")]
    kind: StepKind,
    /// Name of the role that answered
    role_name: String,
    /// Full instruction sent to the generator
    instruction: String,
    /// Text the generator returned
    output: String,
}

fn serialize_kind<S: serde::Serializer>(kind: &StepKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_ref())
}

/// Every step of a completed sequence, in order.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct SequenceExecution {
    sequence_name: String,
    steps: Vec<StepExecution>,
}

impl SequenceExecution {
    /// Output of the last step.
    pub fn final_text(&self) -> &str {
        self.steps
            .last()
            .map(|step| step.output.as_str())
            .unwrap_or_default()
    }

    /// Consumes the record, returning the output of the last step.
    pub fn into_final_text(self) -> String {
        self.steps
            .into_iter()
            .last()
            .map(|step| step.output)
            .unwrap_or_default()
    }
}

/// Runs sequences against a text generator.
///
/// Steps run strictly in order. After each step the context becomes that
/// step's output (plus the original content when the step carries it), so a
/// step never sees text that was not produced before it.
#[derive(Debug, Clone)]
pub struct SequenceRunner<G> {
    generator: G,
}

impl<G: TextGenerator> SequenceRunner<G> {
    /// Creates a runner over a generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Executes every step of `sequence`, starting from `content`.
    ///
    /// # Errors
    ///
    /// The first failing step aborts the sequence. The error names the
    /// sequence, the step index and kind, and wraps the generator error.
    #[instrument(
        name = "sequence_run",
        skip_all,
        fields(
            sequence = %sequence.name(),
            steps = sequence.len(),
            provider = self.generator.provider_name(),
        )
    )]
    pub async fn run(
        &self,
        sequence: &Sequence,
        content: &str,
    ) -> Result<SequenceExecution, PipelineError> {
        let mut context = content.to_string();
        let mut executions = Vec::with_capacity(sequence.len());

        for (index, step) in sequence.steps().iter().enumerate() {
            let instruction = step.render(&context);
            debug!(
                step = index,
                kind = %step.kind(),
                role = %step.role().name(),
                instruction_len = instruction.len(),
                "Executing step"
            );

            let output = self
                .generator
                .generate(step.role(), &instruction)
                .await
                .map_err(|source| {
                    PipelineError::new(PipelineErrorKind::Sequence {
                        platform: sequence.name().to_string(),
                        step: index,
                        step_kind: step.kind().to_string(),
                        source,
                    })
                })?;

            debug!(step = index, output_len = output.len(), "Step completed");

            context = if *step.carry_original() {
                format!("{}\n\n{}\n{}", output, ORIGINAL_CONTENT_HEADING, content)
            } else {
                output.clone()
            };

            executions.push(StepExecution {
                index,
                kind: *step.kind(),
                role_name: step.role().name().to_string(),
                instruction,
                output,
            });
        }

        info!(steps = executions.len(), "Sequence completed");

        Ok(SequenceExecution {
            sequence_name: sequence.name().to_string(),
            steps: executions,
        })
    }

    /// Executes `sequence` and returns only the final text.
    pub async fn run_text(&self, sequence: &Sequence, content: &str) -> Result<String, PipelineError> {
        Ok(self.run(sequence, content).await?.into_final_text())
    }
}
