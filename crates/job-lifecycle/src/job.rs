//! Terminal-state classification for batch Jobs.

use std::fmt;

use k8s_openapi::api::batch::v1::{Job, JobCondition};
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::condition::{ConditionStatus, JobConditionType};

/// Which terminal condition ended a Job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobFinishedType {
    Complete,
    Failed,
}

impl fmt::Display for JobFinishedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFinishedType::Complete => write!(f, "Complete"),
            JobFinishedType::Failed => write!(f, "Failed"),
        }
    }
}

fn conditions(job: &Job) -> &[JobCondition] {
    job.status
        .as_ref()
        .and_then(|status| status.conditions.as_deref())
        .unwrap_or_default()
}

/// Returns the first `Complete` or `Failed` condition with status `True`, in
/// list order. Duplicates later in the list are never consulted.
pub fn finished_condition(job: &Job) -> Option<JobFinishedType> {
    for condition in conditions(job) {
        if ConditionStatus::from(condition.status.as_str()) != ConditionStatus::True {
            continue;
        }
        let finished = match JobConditionType::from(condition.type_.as_str()) {
            JobConditionType::Complete => JobFinishedType::Complete,
            JobConditionType::Failed => JobFinishedType::Failed,
            _ => continue,
        };
        trace!("Job {} finished with condition {}", job.name_any(), finished);
        return Some(finished);
    }
    None
}

/// A Job is finished once any terminal condition is `True`. Missing status
/// or conditions mean not finished.
pub fn is_job_finished(job: &Job) -> bool {
    finished_condition(job).is_some()
}

pub fn is_job_complete(job: &Job) -> bool {
    finished_condition(job) == Some(JobFinishedType::Complete)
}

pub fn is_job_failed(job: &Job) -> bool {
    finished_condition(job) == Some(JobFinishedType::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::batch::v1::JobStatus;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use rstest::rstest;

    fn condition(type_: &str, status: &str) -> JobCondition {
        JobCondition {
            type_: type_.to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn job_with(conditions: Vec<JobCondition>) -> Job {
        Job {
            metadata: ObjectMeta {
                name: Some("test-job".to_string()),
                ..Default::default()
            },
            status: Some(JobStatus {
                conditions: Some(conditions),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_job_finished_status_transitions() {
        let mut job = job_with(vec![condition("Complete", "True")]);
        assert!(is_job_finished(&job), "Job was expected to be finished");

        job.status.as_mut().unwrap().conditions.as_mut().unwrap()[0].status = "False".to_string();
        assert!(!is_job_finished(&job), "Job was not expected to be finished");

        job.status.as_mut().unwrap().conditions.as_mut().unwrap()[0].status = "Unknown".to_string();
        assert!(!is_job_finished(&job), "Job was not expected to be finished");
    }

    #[rstest]
    #[case::empty(vec![], false)]
    #[case::complete_true(vec![condition("Complete", "True")], true)]
    #[case::complete_false(vec![condition("Complete", "False")], false)]
    #[case::complete_unknown(vec![condition("Complete", "Unknown")], false)]
    #[case::complete_false_and_unknown(
        vec![condition("Complete", "False"), condition("Complete", "Unknown")],
        false
    )]
    #[case::failed_true(vec![condition("Failed", "True")], true)]
    #[case::failed_false(vec![condition("Failed", "False")], false)]
    #[case::failed_unknown(vec![condition("Failed", "Unknown")], false)]
    #[case::non_terminal_true(
        vec![condition("Suspended", "True"), condition("FailureTarget", "True")],
        false
    )]
    #[case::complete_after_other_conditions(
        vec![condition("Suspended", "False"), condition("SuccessCriteriaMet", "True"), condition("Complete", "True")],
        true
    )]
    #[case::lowercase_status_is_not_true(vec![condition("Failed", "true")], false)]
    fn test_is_job_finished(#[case] conditions: Vec<JobCondition>, #[case] expected: bool) {
        assert_eq!(is_job_finished(&job_with(conditions)), expected);
    }

    #[test]
    fn test_missing_status_is_not_finished() {
        assert!(!is_job_finished(&Job::default()));

        let job = Job {
            status: Some(JobStatus::default()),
            ..Default::default()
        };
        assert!(!is_job_finished(&job));
    }

    #[test]
    fn test_first_true_terminal_condition_wins() {
        let job = job_with(vec![
            condition("Failed", "False"),
            condition("Complete", "True"),
            condition("Failed", "True"),
        ]);
        assert_eq!(finished_condition(&job), Some(JobFinishedType::Complete));
        assert!(is_job_complete(&job));
        assert!(!is_job_failed(&job));

        let job = job_with(vec![condition("Failed", "True"), condition("Complete", "True")]);
        assert_eq!(finished_condition(&job), Some(JobFinishedType::Failed));
        assert!(is_job_failed(&job));
        assert!(!is_job_complete(&job));
    }

    #[test]
    fn test_finished_type_display() {
        assert_eq!(JobFinishedType::Complete.to_string(), "Complete");
        assert_eq!(JobFinishedType::Failed.to_string(), "Failed");
    }
}
