// Proton Pack desktop host: the pack core behind two TCP ports, or a simulated wand.

mod config;
mod host;
mod link;
mod sim;

use pack_core::Peer;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    let mut wand_addr = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("pack-linux {}", VERSION);
                return Ok(());
            }
            "--wand" => wand_addr = args.next(),
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        if let Some(addr) = wand_addr {
            tokio::select! {
                r = sim::run_wand(&addr) => r?,
                r = shutdown_signal() => r?,
            }
            return Ok(());
        }

        let cfg = config::load();
        tracing::info!(?cfg, "starting pack host");
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
        let (wand_tx, wand_rx) = tokio::sync::mpsc::unbounded_channel();
        let (serial1_tx, serial1_rx) = tokio::sync::mpsc::unbounded_channel();

        let wand_events = event_tx.clone();
        let wand_port = cfg.wand_port;
        tokio::spawn(async move {
            if let Err(e) = link::run_link(Peer::Wand, wand_port, wand_events, wand_rx).await {
                tracing::error!(error = %e, "wand link failed");
            }
        });
        let serial1_port = cfg.serial1_port;
        tokio::spawn(async move {
            if let Err(e) = link::run_link(Peer::Serial1, serial1_port, event_tx, serial1_rx).await {
                tracing::error!(error = %e, "serial1 link failed");
            }
        });
        let outbound = host::Outbound {
            wand: wand_tx,
            serial1: serial1_tx,
        };
        tokio::spawn(host::run_host(cfg, event_rx, outbound));

        shutdown_signal().await?;
        tracing::info!("shutting down");
        Ok::<(), anyhow::Error>(())
    })
}

/// Wait for Ctrl+C or SIGTERM (Unix).
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }
    Ok(())
}
