//! Offline inspection of Job and Pod manifests.
//!
//! Accepts what `kubectl get -o yaml|json` prints: a single object, a `List`
//! (or `JobList`/`PodList`) with `items`, or several YAML documents separated
//! by `---`.

use std::fmt;
use std::path::Path;

use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::Resource;
use kube::ResourceExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::job::{finished_condition, JobFinishedType};
use crate::pod::{latest_failed, sort_by_failed_time};
use crate::{Error, Result};

pub fn read_manifest(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn load_jobs(text: &str) -> Result<Vec<Job>> {
    load_resources(text)
}

pub fn load_pods(text: &str) -> Result<Vec<Pod>> {
    load_resources(text)
}

fn load_resources<K>(text: &str) -> Result<Vec<K>>
where
    K: Resource + DeserializeOwned,
{
    let mut resources = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document)?;
        collect(value, &mut resources)?;
    }
    debug!("Loaded {} {} object(s)", resources.len(), K::KIND);
    Ok(resources)
}

fn collect<K>(value: Value, out: &mut Vec<K>) -> Result<()>
where
    K: Resource + DeserializeOwned,
{
    let mut object = match value {
        Value::Null => return Ok(()),
        Value::Object(object) => object,
        other => {
            return Err(Error::Manifest(format!(
                "expected a {} object, found {}",
                K::KIND,
                type_name(&other)
            )))
        }
    };

    let kind = object.get("kind").and_then(Value::as_str).map(str::to_string);
    match kind.as_deref() {
        Some(kind) if kind == "List" || kind == format!("{}List", K::KIND) => {
            let items = match object.remove("items") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(Error::Manifest(format!(
                        "{} items must be an array, found {}",
                        kind,
                        type_name(&other)
                    )))
                }
            };
            for item in items {
                collect(item, out)?;
            }
        }
        Some(kind) if kind != K::KIND => {
            return Err(Error::Manifest(format!(
                "expected kind {}, found {}",
                K::KIND,
                kind
            )));
        }
        _ => {
            object
                .entry("apiVersion")
                .or_insert_with(|| Value::String(K::API_VERSION.to_string()));
            object
                .entry("kind")
                .or_insert_with(|| Value::String(K::KIND.to_string()));
            out.push(serde_json::from_value(Value::Object(object))?);
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<JobFinishedType>,
}

impl JobReport {
    pub fn from_job(job: &Job) -> Self {
        let condition = finished_condition(job);
        Self {
            name: job.name_any(),
            namespace: job.namespace(),
            finished: condition.is_some(),
            condition,
        }
    }
}

impl fmt::Display for JobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name)?,
            None => write!(f, "{}", self.name)?,
        }
        match self.condition {
            Some(condition) => write!(f, ": finished ({})", condition),
            None => write!(f, ": running"),
        }
    }
}

/// Pod names after sorting by failed time, plus the most recently failed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodOrderReport {
    pub order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_failed: Option<String>,
}

impl PodOrderReport {
    /// Sorts `pods` in place and reports the resulting order.
    pub fn from_pods(pods: &mut [Pod]) -> Self {
        sort_by_failed_time(pods);
        Self {
            order: pods.iter().map(|p| p.name_any()).collect(),
            latest_failed: latest_failed(&*pods).map(|p| p.name_any()),
        }
    }
}

impl fmt::Display for PodOrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.order {
            writeln!(f, "{}", name)?;
        }
        match &self.latest_failed {
            Some(name) => write!(f, "latest failed: {}", name),
            None => write!(f, "latest failed: <none>"),
        }
    }
}
