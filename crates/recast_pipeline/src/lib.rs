//! Sequence runner and platform coordinator for recast.
//!
//! A submission fans out into one generate → critique → rewrite sequence per
//! target platform. Sequences share nothing but the generator and run as
//! independent tasks; the coordinator joins them into a [`recast_core::RunResult`].

pub mod catalog;
mod coordinator;
mod profile;
mod report;
mod runner;

pub use coordinator::{FailurePolicy, PipelineConfig, PipelineCoordinator};
pub use profile::PlatformProfile;
pub use report::RunReport;
pub use runner::{ORIGINAL_CONTENT_HEADING, SequenceExecution, SequenceRunner, StepExecution};
