//! Simulated wand: connects to a running host's wand port, syncs, then keeps the link alive.

use std::time::{Duration, Instant};

use anyhow::Context;
use pack_core::{Packet, WandMirror};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const HEARTBEAT_MS: u64 = 1_000;

pub async fn run_wand(addr: &str) -> anyhow::Result<()> {
    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("connecting to pack at {addr}"))?;
    tracing::info!(addr, "simulated wand attached");

    let started = Instant::now();
    let now = || started.elapsed().as_millis() as u64;
    let mut wand = WandMirror::new(HEARTBEAT_MS);
    let mut buf = [0u8; 512];
    let mut tick = tokio::time::interval(Duration::from_millis(50));

    let request = wand.request_sync();
    write(&mut stream, &wand, &request).await?;

    loop {
        let replies = tokio::select! {
            n = stream.read(&mut buf) => {
                let n = n.context("reading from pack")?;
                if n == 0 {
                    tracing::info!("pack closed the link");
                    return Ok(());
                }
                let was = wand.state();
                let replies = wand.on_bytes(&buf[..n], now());
                if wand.state() != was {
                    tracing::info!(state = ?wand.state(), "wand link");
                }
                for cmd in wand.drain_commands() {
                    tracing::info!(?cmd, "pack says");
                }
                replies
            }
            _ = tick.tick() => wand.tick(now()).into_iter().collect(),
        };
        for packet in &replies {
            write(&mut stream, &wand, packet).await?;
        }
    }
}

async fn write(stream: &mut TcpStream, wand: &WandMirror, packet: &Packet) -> anyhow::Result<()> {
    let frame = wand.encode(packet)?;
    stream.write_all(&frame).await.context("writing to pack")?;
    Ok(())
}
