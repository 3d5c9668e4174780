//! Ordering pods by when they last failed.
//!
//! The ordering is driven by the first condition in a pod's status whose
//! status is `True`, compared on `lastProbeTime`. Pod `a` precedes pod `b`
//! only when both carry such a condition and `b`'s probe time is strictly
//! later. Every other pair reports "does not precede", in both directions.
//!
//! That relation is not a strict weak ordering: a pod without a `True`
//! condition is incomparable with everything, yet the pods around it may be
//! comparable with each other. The standard library's sorts require a total
//! order, so [`PodsByFailedTime::sort`] runs its own stable insertion sort
//! that consults the predicate exactly as written. Its output is a pure
//! function of the input order:
//!
//! - pods that all carry a `True` condition end up ascending by probe time,
//!   the most recent failure last, ties kept in input order;
//! - a pod without a `True` condition never moves left and nothing moves left
//!   past it, so it splits the slice into runs that are sorted independently.

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Pod, PodCondition};
use kube::ResourceExt;
use tracing::debug;

use crate::condition::ConditionStatus;

/// First condition with status `True`, in list order.
pub fn first_true_condition(pod: &Pod) -> Option<&PodCondition> {
    pod.status
        .as_ref()?
        .conditions
        .as_ref()?
        .iter()
        .find(|c| ConditionStatus::from(c.status.as_str()).is_true())
}

// An absent probe time sorts before every present one.
fn probe_time(condition: &PodCondition) -> Option<DateTime<Utc>> {
    condition.last_probe_time.as_ref().map(|t| t.0)
}

/// Reports whether `a` sorts before `b`: both have a `True` condition and
/// `b`'s is strictly more recent.
pub fn failed_before(a: &Pod, b: &Pod) -> bool {
    match (first_true_condition(a), first_true_condition(b)) {
        (Some(ca), Some(cb)) => probe_time(cb) > probe_time(ca),
        _ => false,
    }
}

/// Sorts pods in place by failure recency. See the module docs for the
/// exact order produced.
pub fn sort_by_failed_time<P: Borrow<Pod>>(pods: &mut [P]) {
    PodsByFailedTime::new(pods).sort();
}

/// The pod whose first `True` condition was probed last. Pods without one are
/// skipped; on a tie the earlier pod in the slice wins.
pub fn latest_failed<P: Borrow<Pod>>(pods: &[P]) -> Option<&Pod> {
    let mut latest: Option<&Pod> = None;
    for pod in pods {
        let pod: &Pod = pod.borrow();
        if first_true_condition(pod).is_none() {
            continue;
        }
        match latest {
            Some(current) if !failed_before(current, pod) => {}
            _ => latest = Some(pod),
        }
    }
    latest
}

/// A mutable view over pods that sorts by failure recency.
///
/// Works over anything that borrows as a [`Pod`], so owned pods, references
/// and `Arc<Pod>` handed out by a reflector store all sort the same way.
pub struct PodsByFailedTime<'a, P> {
    pods: &'a mut [P],
}

impl<'a, P: Borrow<Pod>> PodsByFailedTime<'a, P> {
    pub fn new(pods: &'a mut [P]) -> Self {
        Self { pods }
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    pub fn less(&self, i: usize, j: usize) -> bool {
        failed_before(self.pods[i].borrow(), self.pods[j].borrow())
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.pods.swap(i, j);
    }

    /// Stable insertion sort: each pod moves left while it sorts before its
    /// left neighbour.
    pub fn sort(&mut self) {
        let n = self.len();
        for i in 1..n {
            let mut j = i;
            while j > 0 && self.less(j, j - 1) {
                self.swap(j, j - 1);
                j -= 1;
            }
        }
        debug!(
            "Sorted {} pod(s) by failed time: {:?}",
            n,
            self.pods.iter().map(|p| p.borrow().name_any()).collect::<Vec<_>>()
        );
    }

    pub fn into_inner(self) -> &'a mut [P] {
        self.pods
    }
}
