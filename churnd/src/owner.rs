use tracing::{debug, warn};

use crate::cluster::ClusterOps;
use crate::model::{OwnerKind, WorkloadObject};

/// Decide whether a pod sits at the bottom of a Pod → ReplicaSet →
/// Deployment ownership chain.
///
/// Only the first owner reference is consulted at each level. A failed
/// ReplicaSet lookup (missing or transport error) classifies the pod as
/// not managed: ambiguous ownership never triggers deletion. One lookup
/// attempt per pod per tick, no retries.
pub async fn is_deployment_managed(
    cluster: &dyn ClusterOps,
    pod: &WorkloadObject,
) -> bool {
    let Some(owner) = pod.first_owner() else {
        return false;
    };
    match &owner.kind {
        OwnerKind::ReplicaSet => {}
        OwnerKind::Deployment | OwnerKind::Other(_) => return false,
    }

    let rs = match cluster.get_replica_set(&pod.namespace, &owner.name).await
    {
        Ok(Some(rs)) => rs,
        Ok(None) => {
            debug!(
                pod = %pod.name,
                namespace = %pod.namespace,
                replicaset = %owner.name,
                "owning replicaset not found, treating pod as unmanaged"
            );
            return false;
        }
        Err(e) => {
            warn!(
                pod = %pod.name,
                namespace = %pod.namespace,
                replicaset = %owner.name,
                error = %e,
                "replicaset lookup failed, treating pod as unmanaged"
            );
            return false;
        }
    };

    matches!(
        rs.first_owner().map(|o| &o.kind),
        Some(OwnerKind::Deployment)
    )
}
