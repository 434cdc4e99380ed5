//! Dispatch task: owns the pack core, feeds it link bytes and the clock, carries out its actions.

use std::time::{Duration, Instant};

use pack_core::{Action, PackCore, Peer};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::link::LinkEvent;

/// Outbound byte queues, one per link.
pub struct Outbound {
    pub wand: UnboundedSender<Vec<u8>>,
    pub serial1: UnboundedSender<Vec<u8>>,
}

impl Outbound {
    fn queue(&self, peer: Peer) -> &UnboundedSender<Vec<u8>> {
        match peer {
            Peer::Wand => &self.wand,
            Peer::Serial1 => &self.serial1,
        }
    }
}

pub async fn run_host(cfg: Config, mut events: UnboundedReceiver<LinkEvent>, outbound: Outbound) {
    let started = Instant::now();
    let now = || started.elapsed().as_millis() as u64;

    let mut core = PackCore::new(cfg.core);
    let actions = core.set_music_track_count(cfg.music_tracks, now());
    perform(&core, &outbound, actions);

    let mut tick = tokio::time::interval(Duration::from_millis(cfg.tick_ms.max(1)));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        let actions = tokio::select! {
            _ = tick.tick() => core.tick(now()),
            event = events.recv() => match event {
                Some(LinkEvent::Bytes(peer, bytes)) => core.on_bytes_received(peer, &bytes, now()),
                Some(LinkEvent::Closed(peer)) => {
                    tracing::debug!(?peer, "link closed; liveness timer will notice");
                    continue;
                }
                None => return,
            },
        };
        perform(&core, &outbound, actions);
    }
}

/// Frames go out on their link; everything else is hardware this host only logs.
fn perform(core: &PackCore, outbound: &Outbound, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::Send(peer, packet) => match core.encode(&packet) {
                Ok(frame) => {
                    if outbound.queue(peer).send(frame).is_err() {
                        tracing::warn!(?peer, "link task gone");
                    }
                }
                Err(e) => tracing::error!(?peer, error = %e, "cannot encode packet"),
            },
            Action::Audio(audio) => tracing::info!(target: "pack::audio", ?audio),
            Action::Lights(lights) => tracing::info!(target: "pack::lights", ?lights),
            Action::Smoke(smoke) => tracing::info!(target: "pack::smoke", ?smoke),
            Action::Store(store) => tracing::info!(target: "pack::store", ?store),
            Action::Vibrate { ms } => tracing::info!(target: "pack::vibration", ms),
            Action::Power(power) => tracing::info!(target: "pack::power", ?power),
        }
    }
}
