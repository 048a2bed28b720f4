use envconfig::Envconfig;

/// Environment configuration, read once at startup.
///
/// `POD_NAME` and `POD_NAMESPACE` are expected to be injected through the
/// downward API when running in-cluster; they are only required in pod
/// mode.
#[derive(Envconfig, Clone, Debug, Default)]
pub struct ChurnConfig {
    /// Comma-separated deployment names to never delete.
    /// Env: CHURND_SKIP_DEPLOYMENTS
    #[envconfig(from = "CHURND_SKIP_DEPLOYMENTS")]
    pub skip_deployments: Option<String>,

    /// Comma-separated namespaces whose pods are never deleted.
    /// Env: CHURND_SKIP_NAMESPACES
    #[envconfig(from = "CHURND_SKIP_NAMESPACES")]
    pub skip_namespaces: Option<String>,

    #[envconfig(from = "POD_NAME")]
    pub pod_name: Option<String>,

    #[envconfig(from = "POD_NAMESPACE")]
    pub pod_namespace: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("pod mode requires POD_NAME and POD_NAMESPACE to be set")]
    MissingSelfIdentity,
}

/// Whole-token, case-insensitive membership set for skip-list tokens.
#[derive(Clone, Debug, Default)]
pub struct SkipSet {
    tokens: Vec<String>,
}

impl SkipSet {
    /// Parse a comma-separated token list. Blank tokens are dropped.
    pub fn parse(raw: Option<&str>) -> Self {
        let tokens = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        SkipSet { tokens }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Name and namespace of the running controller pod, used only to keep
/// the sweeper from deleting itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfIdentity {
    pub name: String,
    pub namespace: String,
}

impl SelfIdentity {
    pub fn matches(&self, name: &str, namespace: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            && self.namespace.eq_ignore_ascii_case(namespace)
    }
}

impl ChurnConfig {
    pub fn deployment_skip_set(&self) -> SkipSet {
        SkipSet::parse(self.skip_deployments.as_deref())
    }

    pub fn namespace_skip_set(&self) -> SkipSet {
        SkipSet::parse(self.skip_namespaces.as_deref())
    }

    /// Resolve the controller's own identity. Required in pod mode;
    /// absence is a startup failure, not a runtime one.
    pub fn self_identity(&self) -> Result<SelfIdentity, ConfigError> {
        match (&self.pod_name, &self.pod_namespace) {
            (Some(name), Some(namespace))
                if !name.is_empty() && !namespace.is_empty() =>
            {
                Ok(SelfIdentity {
                    name: name.clone(),
                    namespace: namespace.clone(),
                })
            }
            _ => Err(ConfigError::MissingSelfIdentity),
        }
    }
}
