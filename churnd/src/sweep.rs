use std::sync::Arc;

use tracing::{error, info, warn};

use crate::cluster::ClusterOps;
use crate::filter::{SkipReason, SweepSettings, static_skip_reason};
use crate::model::WorkloadObject;
use crate::owner::is_deployment_managed;

/// Which object kind a sweep targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepTarget {
    Deployments,
    Pods,
}

impl SweepTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepTarget::Deployments => "deployments",
            SweepTarget::Pods => "pods",
        }
    }
}

/// Per-object result of one sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Deleted,
    Skipped(SkipReason),
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct SweepEntry {
    pub name: String,
    pub namespace: String,
    pub outcome: Outcome,
}

/// Structured result of one tick. Logging consumes this; nothing in the
/// sweep itself depends on log output.
#[derive(Clone, Debug)]
pub struct SweepReport {
    pub target: SweepTarget,
    pub entries: Vec<SweepEntry>,
    pub list_error: Option<String>,
}

impl SweepReport {
    fn list_failure(target: SweepTarget, detail: String) -> Self {
        SweepReport {
            target,
            entries: Vec::new(),
            list_error: Some(detail),
        }
    }

    pub fn deleted(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::Deleted)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Skipped(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed(_)))
            .count()
    }

    pub fn log(&self) {
        if let Some(detail) = &self.list_error {
            error!(
                target_kind = self.target.as_str(),
                error = %detail,
                "listing failed, nothing swept this tick"
            );
            return;
        }
        for entry in &self.entries {
            match &entry.outcome {
                Outcome::Deleted => info!(
                    name = %entry.name,
                    namespace = %entry.namespace,
                    "deleted"
                ),
                Outcome::Skipped(reason) => info!(
                    name = %entry.name,
                    namespace = %entry.namespace,
                    reason = reason.as_str(),
                    "skipped"
                ),
                Outcome::Failed(detail) => warn!(
                    name = %entry.name,
                    namespace = %entry.namespace,
                    error = %detail,
                    "delete failed"
                ),
            }
        }
        info!(
            target_kind = self.target.as_str(),
            deleted = self.deleted(),
            skipped = self.skipped(),
            failed = self.failed(),
            "sweep complete"
        );
    }
}

/// One-shot list → classify → delete pass. Stateless between ticks.
pub struct Sweeper {
    cluster: Arc<dyn ClusterOps>,
    settings: SweepSettings,
}

impl Sweeper {
    pub fn new(cluster: Arc<dyn ClusterOps>, settings: SweepSettings) -> Self {
        Sweeper { cluster, settings }
    }

    /// Run one sweep. Never fails: a list error empties the tick, a
    /// per-object error is recorded and the pass moves on.
    pub async fn sweep(&self) -> SweepReport {
        let target = self.settings.target;
        let listed = match target {
            SweepTarget::Deployments => {
                self.cluster.list_deployments(&self.settings.namespace).await
            }
            SweepTarget::Pods => {
                self.cluster.list_pods(&self.settings.namespace).await
            }
        };
        let objects = match listed {
            Ok(objects) => objects,
            Err(e) => return SweepReport::list_failure(target, e.to_string()),
        };

        let mut entries = Vec::with_capacity(objects.len());
        for object in &objects {
            let outcome = self.sweep_one(object).await;
            entries.push(SweepEntry {
                name: object.name.clone(),
                namespace: object.namespace.clone(),
                outcome,
            });
        }
        SweepReport {
            target,
            entries,
            list_error: None,
        }
    }

    async fn sweep_one(&self, object: &WorkloadObject) -> Outcome {
        if let Some(reason) = static_skip_reason(&self.settings, object) {
            return Outcome::Skipped(reason);
        }
        if self.settings.target == SweepTarget::Pods
            && !is_deployment_managed(self.cluster.as_ref(), object).await
        {
            return Outcome::Skipped(SkipReason::NotDeploymentManaged);
        }

        let deleted = match self.settings.target {
            SweepTarget::Deployments => {
                self.cluster
                    .delete_deployment(&object.namespace, &object.name)
                    .await
            }
            SweepTarget::Pods => {
                self.cluster
                    .delete_pod(&object.namespace, &object.name)
                    .await
            }
        };
        match deleted {
            Ok(()) => Outcome::Deleted,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}
