use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use envconfig::Envconfig;
use kube::Client;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::info;

use churnd::cluster::KubeCluster;
use churnd::config::ChurnConfig;
use churnd::filter::SweepSettings;
use churnd::sweep::{SweepTarget, Sweeper};
use churnd::{init_tracing, runtime};

/// Periodic cluster-hygiene controller: deletes deployments, or pods
/// managed by a deployment, on a fixed interval.
#[derive(Parser, Debug)]
#[command(name = "churnd", version, about, long_about = None)]
struct Args {
    /// Path to a kubeconfig file; defaults to in-cluster credentials.
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Poll interval in seconds.
    #[arg(long, default_value_t = 10)]
    poll: u64,

    /// Namespace to sweep; empty means cluster-wide.
    #[arg(long, default_value = "")]
    namespace: String,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(clap::Subcommand, Clone, Copy, Debug)]
enum Mode {
    /// Sweep deployments. CHURND_SKIP_DEPLOYMENTS lists names to spare.
    Deployments,
    /// Sweep deployment-managed pods. CHURND_SKIP_NAMESPACES lists
    /// namespaces to spare; requires POD_NAME and POD_NAMESPACE.
    Pods,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let args = Args::parse();
    let cfg = ChurnConfig::init_from_env()?;
    let settings = build_settings(&args, &cfg)?;
    info!(
        kubeconfig = ?args.kubeconfig,
        poll_secs = args.poll,
        namespace = %args.namespace,
        target_kind = settings.target.as_str(),
        skip = ?settings.skip.tokens(),
        "starting churnd"
    );

    let client = make_client(args.kubeconfig.as_deref()).await?;
    let sweeper =
        Sweeper::new(Arc::new(KubeCluster::new(client)), settings);
    runtime::run(sweeper, Duration::from_secs(args.poll)).await;
    Ok(())
}

fn build_settings(
    args: &Args,
    cfg: &ChurnConfig,
) -> anyhow::Result<SweepSettings> {
    let settings = match args.mode {
        Mode::Deployments => SweepSettings {
            target: SweepTarget::Deployments,
            namespace: args.namespace.clone(),
            skip: cfg.deployment_skip_set(),
            self_identity: None,
        },
        Mode::Pods => SweepSettings {
            target: SweepTarget::Pods,
            namespace: args.namespace.clone(),
            skip: cfg.namespace_skip_set(),
            self_identity: Some(cfg.self_identity()?),
        },
    };
    Ok(settings)
}

async fn make_client(kubeconfig: Option<&Path>) -> anyhow::Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let kc = Kubeconfig::read_from(path)?;
            kube::Config::from_custom_kubeconfig(
                kc,
                &KubeConfigOptions::default(),
            )
            .await?
        }
        None => kube::Config::infer().await?,
    };
    Ok(Client::try_from(config)?)
}
