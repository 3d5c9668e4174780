pub mod condition;
pub mod config;
pub mod inspect;
pub mod job;
pub mod pod;

pub use condition::{ConditionStatus, JobConditionType};
pub use job::{finished_condition, is_job_complete, is_job_failed, is_job_finished, JobFinishedType};
pub use pod::{failed_before, first_true_condition, latest_failed, sort_by_failed_time, PodsByFailedTime};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid condition status: {0}")]
    InvalidConditionStatus(String),
    #[error("Manifest error: {0}")]
    Manifest(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
