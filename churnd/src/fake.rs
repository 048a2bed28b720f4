//! In-memory `ClusterOps` used by resolver and sweep tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cluster::{ClusterError, ClusterOps};
use crate::model::{OwnerRef, WorkloadKind, WorkloadObject};

#[derive(Default)]
pub(crate) struct FakeCluster {
    deployments: Mutex<Vec<WorkloadObject>>,
    pods: Mutex<Vec<WorkloadObject>>,
    replica_sets: HashMap<(String, String), WorkloadObject>,
    fail_lists: bool,
    fail_lookups: bool,
    fail_delete_of: Option<String>,
    pub(crate) deleted: Mutex<Vec<(String, String)>>,
}

fn transport_error() -> ClusterError {
    ClusterError::Api(kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: "simulated transport error".to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    }))
}

impl FakeCluster {
    pub(crate) fn with_deployment(self, name: &str, ns: &str) -> Self {
        self.deployments.lock().unwrap().push(WorkloadObject {
            name: name.into(),
            namespace: ns.into(),
            kind: WorkloadKind::Deployment,
            owner_refs: vec![],
        });
        self
    }

    pub(crate) fn with_pod(
        self,
        name: &str,
        ns: &str,
        owners: Vec<OwnerRef>,
    ) -> Self {
        self.pods.lock().unwrap().push(WorkloadObject {
            name: name.into(),
            namespace: ns.into(),
            kind: WorkloadKind::Pod,
            owner_refs: owners,
        });
        self
    }

    pub(crate) fn with_replica_set(
        mut self,
        ns: &str,
        name: &str,
        owner: Option<OwnerRef>,
    ) -> Self {
        self.replica_sets.insert(
            (ns.to_string(), name.to_string()),
            WorkloadObject {
                name: name.into(),
                namespace: ns.into(),
                kind: WorkloadKind::ReplicaSet,
                owner_refs: owner.into_iter().collect(),
            },
        );
        self
    }

    pub(crate) fn with_list_errors(mut self) -> Self {
        self.fail_lists = true;
        self
    }

    pub(crate) fn with_lookup_errors(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub(crate) fn with_delete_error(mut self, name: &str) -> Self {
        self.fail_delete_of = Some(name.to_string());
        self
    }

    pub(crate) fn deleted_names(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn filtered(
        store: &Mutex<Vec<WorkloadObject>>,
        namespace: &str,
    ) -> Vec<WorkloadObject> {
        store
            .lock()
            .unwrap()
            .iter()
            .filter(|o| namespace.is_empty() || o.namespace == namespace)
            .cloned()
            .collect()
    }

    fn remove(
        &self,
        store: &Mutex<Vec<WorkloadObject>>,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        if self.fail_delete_of.as_deref() == Some(name) {
            return Err(transport_error());
        }
        store
            .lock()
            .unwrap()
            .retain(|o| !(o.name == name && o.namespace == namespace));
        self.deleted
            .lock()
            .unwrap()
            .push((namespace.to_string(), name.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ClusterOps for FakeCluster {
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError> {
        if self.fail_lists {
            return Err(transport_error());
        }
        Ok(Self::filtered(&self.deployments, namespace))
    }

    async fn list_pods(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError> {
        if self.fail_lists {
            return Err(transport_error());
        }
        Ok(Self::filtered(&self.pods, namespace))
    }

    async fn get_replica_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<WorkloadObject>, ClusterError> {
        if self.fail_lookups {
            return Err(transport_error());
        }
        Ok(self
            .replica_sets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        self.remove(&self.deployments, namespace, name)
    }

    async fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        self.remove(&self.pods, namespace, name)
    }
}
