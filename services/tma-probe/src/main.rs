//! Command-line probe for the mini app backend.
//!
//! With no arguments it runs the full bootstrap sequence the mini app runs
//! on load. With an endpoint slug (`tma-probe hello`) it calls that single
//! test-panel endpoint and prints the JSON.

mod host;

use anyhow::{Context, bail};
use host::{LogSurface, StaticBridge};
use std::rc::Rc;
use tma_client::{ApiClient, ClientConfig, DemoEndpoint, ReqwestTransport};
use tma_session::{BootstrapSequencer, HostBridge, Outcome, RunOutcome, SessionContext};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let endpoint = match std::env::args().nth(1) {
        Some(slug) => Some(DemoEndpoint::from_slug(&slug).with_context(|| {
            let known: Vec<_> = DemoEndpoint::ALL.iter().map(|e| e.slug()).collect();
            format!("unknown endpoint {slug:?}; expected one of {}", known.join(", "))
        })?),
        None => None,
    };

    let bridge: Rc<dyn HostBridge> = Rc::new(StaticBridge::from_env()?);
    let session = SessionContext::initialize(Some(bridge), &LogSurface);
    if let Some(err) = session.init_data_error() {
        warn!("{err}");
    }

    let config = ClientConfig::from_env();
    info!(base_url = %config.base_url, "tma-probe starting");
    let client = ApiClient::new(
        config,
        session.init_data().clone(),
        ReqwestTransport::new(),
    )
    .with_host_user_id(session.user().map(|user| user.id));

    if let Some(endpoint) = endpoint {
        let body = client.call(endpoint).await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let sequencer = BootstrapSequencer::new(session, Rc::new(client));
    sequencer.subscribe(|snapshot| info!(phase = ?snapshot.phase, "bootstrap transition"));

    let outcome = sequencer.run().await;
    let snapshot = sequencer.snapshot();
    match outcome {
        RunOutcome::Waiting => bail!("no host user; set {}", host::USER_JSON_ENV),
        RunOutcome::Superseded => bail!("bootstrap run was superseded"),
        RunOutcome::Settled(Outcome::Skipped) => {
            bail!("authentication skipped; set {}", host::INIT_DATA_ENV)
        }
        RunOutcome::Settled(Outcome::Failed) => match sequencer.take_error() {
            Some(err) => Err(anyhow::Error::new(err).context("bootstrap sequence failed")),
            None => bail!(snapshot.error.unwrap_or_else(|| "bootstrap failed".to_owned())),
        },
        RunOutcome::Settled(Outcome::Success) => {
            if let Some(profile) = &snapshot.profile {
                println!("{}", profile.to_pretty_json());
            }
            for role in &snapshot.roles {
                println!("role {}: {}", role.id, role.name);
            }
            Ok(())
        }
    }
}
