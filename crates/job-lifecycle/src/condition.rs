//! Typed views over the string fields of Kubernetes status conditions.
//!
//! The API carries both the condition type and its status as plain strings.
//! These enums give the classifier and the pod ordering something to match on
//! without scattering string literals around.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Tri-state status carried by every condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, ConditionStatus::True)
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient conversion: anything the API server did not spell as `True` or
/// `False` is `Unknown`.
impl From<&str> for ConditionStatus {
    fn from(s: &str) -> Self {
        match s {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

impl FromStr for ConditionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" => Ok(ConditionStatus::True),
            "False" => Ok(ConditionStatus::False),
            "Unknown" => Ok(ConditionStatus::Unknown),
            other => Err(Error::InvalidConditionStatus(other.to_string())),
        }
    }
}

/// Condition types a batch Job reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobConditionType {
    Complete,
    Failed,
    Suspended,
    FailureTarget,
    SuccessCriteriaMet,
    Other(String),
}

impl JobConditionType {
    pub fn as_str(&self) -> &str {
        match self {
            JobConditionType::Complete => "Complete",
            JobConditionType::Failed => "Failed",
            JobConditionType::Suspended => "Suspended",
            JobConditionType::FailureTarget => "FailureTarget",
            JobConditionType::SuccessCriteriaMet => "SuccessCriteriaMet",
            JobConditionType::Other(s) => s.as_str(),
        }
    }

    /// Only `Complete` and `Failed` end a Job's lifecycle. `FailureTarget`
    /// and `SuccessCriteriaMet` precede them while pods are still terminating.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobConditionType::Complete | JobConditionType::Failed)
    }
}

impl fmt::Display for JobConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JobConditionType {
    fn from(s: &str) -> Self {
        match s {
            "Complete" => JobConditionType::Complete,
            "Failed" => JobConditionType::Failed,
            "Suspended" => JobConditionType::Suspended,
            "FailureTarget" => JobConditionType::FailureTarget,
            "SuccessCriteriaMet" => JobConditionType::SuccessCriteriaMet,
            other => JobConditionType::Other(other.to_string()),
        }
    }
}
