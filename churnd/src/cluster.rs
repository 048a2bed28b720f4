use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Pod;
use kube::{
    Client,
    api::{Api, DeleteParams, ListParams},
};

use crate::model::WorkloadObject;

#[derive(thiserror::Error, Debug)]
pub enum ClusterError {
    #[error("kubernetes api error: {0}")]
    Api(#[from] kube::Error),
}

/// The cluster API surface the sweeper needs. An empty namespace means
/// cluster-wide.
#[async_trait]
pub trait ClusterOps: Send + Sync {
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError>;

    async fn list_pods(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError>;

    async fn get_replica_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<WorkloadObject>, ClusterError>;

    /// Foreground cascade: children are removed before the deployment is
    /// considered gone, so the next tick never sees orphaned children.
    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>;

    async fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError>;
}

/// `ClusterOps` over a live `kube::Client`.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        KubeCluster { client }
    }

    fn scoped<K>(&self, namespace: &str) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        }
    }
}

#[async_trait]
impl ClusterOps for KubeCluster {
    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError> {
        let api: Api<Deployment> = self.scoped(namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(WorkloadObject::from).collect())
    }

    async fn list_pods(
        &self,
        namespace: &str,
    ) -> Result<Vec<WorkloadObject>, ClusterError> {
        let api: Api<Pod> = self.scoped(namespace);
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(WorkloadObject::from).collect())
    }

    async fn get_replica_set(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<WorkloadObject>, ClusterError> {
        let api: Api<ReplicaSet> =
            Api::namespaced(self.client.clone(), namespace);
        let rs = api.get_opt(name).await?;
        Ok(rs.as_ref().map(WorkloadObject::from))
    }

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        let api: Api<Deployment> =
            Api::namespaced(self.client.clone(), namespace);
        api.delete(name, &DeleteParams::foreground()).await?;
        Ok(())
    }

    async fn delete_pod(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }
}
