use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    ObjectMeta, OwnerReference,
};

/// Kinds of workload objects the sweeper handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    ReplicaSet,
    Pod,
}

/// Owner-reference kind, parsed with exact (case-sensitive) matching.
///
/// Unrecognized kinds are preserved as `Other` so callers match
/// exhaustively instead of falling through on a string compare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnerKind {
    ReplicaSet,
    Deployment,
    Other(String),
}

impl From<&str> for OwnerKind {
    fn from(kind: &str) -> Self {
        match kind {
            "ReplicaSet" => OwnerKind::ReplicaSet,
            "Deployment" => OwnerKind::Deployment,
            other => OwnerKind::Other(other.to_string()),
        }
    }
}

/// A declared parent-object pointer. Only the first reference on an
/// object is ever consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub name: String,
}

impl From<&OwnerReference> for OwnerRef {
    fn from(or: &OwnerReference) -> Self {
        OwnerRef {
            kind: OwnerKind::from(or.kind.as_str()),
            name: or.name.clone(),
        }
    }
}

/// A transient snapshot of a cluster object, fetched fresh each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadObject {
    pub name: String,
    pub namespace: String,
    pub kind: WorkloadKind,
    pub owner_refs: Vec<OwnerRef>,
}

impl WorkloadObject {
    pub fn first_owner(&self) -> Option<&OwnerRef> {
        self.owner_refs.first()
    }

    fn from_meta(meta: &ObjectMeta, kind: WorkloadKind) -> Self {
        WorkloadObject {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone().unwrap_or_default(),
            kind,
            owner_refs: meta
                .owner_references
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(OwnerRef::from)
                .collect(),
        }
    }
}

impl From<&Deployment> for WorkloadObject {
    fn from(d: &Deployment) -> Self {
        WorkloadObject::from_meta(&d.metadata, WorkloadKind::Deployment)
    }
}

impl From<&ReplicaSet> for WorkloadObject {
    fn from(rs: &ReplicaSet) -> Self {
        WorkloadObject::from_meta(&rs.metadata, WorkloadKind::ReplicaSet)
    }
}

impl From<&Pod> for WorkloadObject {
    fn from(p: &Pod) -> Self {
        WorkloadObject::from_meta(&p.metadata, WorkloadKind::Pod)
    }
}
