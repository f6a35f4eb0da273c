//! Core data types for the recast content pipeline.
//!
//! This crate provides the typed records every other recast crate shares:
//! roles, steps, sequences, target platforms, run results and the
//! provider-neutral request/response pair handed to generator adapters.

mod message;
mod platform;
mod request;
mod role;
mod run_result;
mod sequence;
mod step;
mod token_usage;

pub use message::{Message, Speaker};
pub use platform::Platform;
pub use request::{GenerateRequest, GenerateResponse};
pub use role::Role;
pub use run_result::RunResult;
pub use sequence::Sequence;
pub use step::{Step, StepKind};
pub use token_usage::TokenUsageData;
