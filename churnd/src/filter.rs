use crate::config::{SelfIdentity, SkipSet};
use crate::model::WorkloadObject;
use crate::sweep::SweepTarget;

/// Namespace that is never swept, regardless of configuration.
pub const PROTECTED_NAMESPACE: &str = "kube-system";

/// Why an object was left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    ProtectedNamespace,
    SkipListed,
    SelfPod,
    NotDeploymentManaged,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::ProtectedNamespace => "protected-namespace",
            SkipReason::SkipListed => "skip-listed",
            SkipReason::SelfPod => "self",
            SkipReason::NotDeploymentManaged => "not-deployment-managed",
        }
    }
}

/// Immutable per-run settings, built once at startup and passed by
/// reference into every sweep.
#[derive(Clone, Debug)]
pub struct SweepSettings {
    pub target: SweepTarget,
    pub namespace: String,
    pub skip: SkipSet,
    pub self_identity: Option<SelfIdentity>,
}

/// Rules 1–3 of the eligibility check, in fixed order: protected
/// namespace, skip-list, self-identity. First match wins. The ownership
/// rule (pod mode only) needs a cluster lookup and is applied by the
/// sweeper after this returns `None`.
///
/// The skip-list matches deployment *names* in deployment mode but pod
/// *namespaces* in pod mode.
pub fn static_skip_reason(
    settings: &SweepSettings,
    object: &WorkloadObject,
) -> Option<SkipReason> {
    if object.namespace == PROTECTED_NAMESPACE {
        return Some(SkipReason::ProtectedNamespace);
    }

    let skip_token = match settings.target {
        SweepTarget::Deployments => &object.name,
        SweepTarget::Pods => &object.namespace,
    };
    if settings.skip.contains(skip_token) {
        return Some(SkipReason::SkipListed);
    }

    if settings.target == SweepTarget::Pods {
        if let Some(id) = &settings.self_identity {
            if id.matches(&object.name, &object.namespace) {
                return Some(SkipReason::SelfPod);
            }
        }
    }

    None
}
