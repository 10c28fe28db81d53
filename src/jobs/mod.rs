//! Background pipelines and the per-user job status protocol.

mod job;
mod orchestrator;
mod pipeline;
mod status;

pub use job::{JobError, JobKind};
pub use orchestrator::JobOrchestrator;
pub use pipeline::{CachedResults, GenrifyPipeline, PipelineError};
pub use status::{JobStatus, StatusReport};
