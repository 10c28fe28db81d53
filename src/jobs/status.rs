use serde::{Deserialize, Serialize};
use std::fmt;

const PENDING: &str = "pending";
const COMPLETED: &str = "completed";
const ERROR_PREFIX: &str = "error";

/// Per-user job status cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed,
    Error(String),
}

impl JobStatus {
    /// Value stored in the cache: `pending`, `completed` or `error: <msg>`.
    pub fn to_cache_value(&self) -> String {
        match self {
            JobStatus::Pending => PENDING.to_string(),
            JobStatus::Completed => COMPLETED.to_string(),
            JobStatus::Error(message) => format!("{}: {}", ERROR_PREFIX, message),
        }
    }

    /// `error` alone or followed by `:` is an error; anything else that is
    /// not `completed` reads as pending.
    pub fn from_cache_value(value: &str) -> Self {
        if value == COMPLETED {
            return JobStatus::Completed;
        }
        match value.strip_prefix(ERROR_PREFIX) {
            Some("") => JobStatus::Error(String::new()),
            Some(rest) => match rest.strip_prefix(':') {
                Some(message) => JobStatus::Error(message.trim_start().to_string()),
                None => JobStatus::Pending,
            },
            None => JobStatus::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }

    /// Poller-facing report. `job_type` is echoed back on completion.
    pub fn report(&self, job_type: Option<&str>) -> StatusReport {
        match self {
            JobStatus::Pending => StatusReport::Pending,
            JobStatus::Completed => StatusReport::Completed {
                job_type: job_type.map(String::from),
            },
            JobStatus::Error(message) => StatusReport::Error {
                details: message.clone(),
            },
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cache_value())
    }
}

/// JSON body returned to status pollers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusReport {
    Pending,
    Completed { job_type: Option<String> },
    Error { details: String },
}
