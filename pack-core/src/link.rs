//! Per-peer connection state: Disconnected, Syncing, Connected.

use crate::timer::{Deadline, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Syncing,
    Connected,
}

/// Reported by [`PeerLink::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// Liveness expired; the link is now Disconnected.
    Lost,
    /// Time to send a keep-alive probe to a Connected peer.
    ProbeDue,
}

/// Liveness tracking for one peer. A Syncing peer that never confirms falls back
/// to Disconnected after the same timeout as a silent Connected one.
#[derive(Debug, Clone)]
pub struct PeerLink {
    state: LinkState,
    timeout: Millis,
    liveness: Deadline,
    probe_every: Option<Millis>,
    probe: Deadline,
}

impl PeerLink {
    pub fn new(timeout: Millis) -> Self {
        Self {
            state: LinkState::Disconnected,
            timeout,
            liveness: Deadline::idle(),
            probe_every: None,
            probe: Deadline::idle(),
        }
    }

    /// Link that also asks for periodic probes while Connected.
    pub fn with_probe(timeout: Millis, every: Millis) -> Self {
        Self {
            probe_every: Some(every),
            ..Self::new(timeout)
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    pub fn is_syncing(&self) -> bool {
        self.state == LinkState::Syncing
    }

    /// Enter Syncing. Returns false (and changes nothing) if a sync is already outstanding.
    pub fn begin_sync(&mut self, now: Millis) -> bool {
        if self.state == LinkState::Syncing {
            return false;
        }
        self.state = LinkState::Syncing;
        self.liveness.arm(now, self.timeout);
        self.probe.cancel();
        true
    }

    /// Mark Connected and arm liveness (and the probe, if any).
    pub fn complete_sync(&mut self, now: Millis) {
        self.state = LinkState::Connected;
        self.refresh(now);
    }

    /// Plain heartbeat. Ignored while Syncing; otherwise connects and refreshes.
    /// Returns true if this heartbeat made the link Connected.
    pub fn on_heartbeat(&mut self, now: Millis) -> bool {
        match self.state {
            LinkState::Syncing => false,
            LinkState::Connected => {
                self.refresh(now);
                false
            }
            LinkState::Disconnected => {
                self.complete_sync(now);
                true
            }
        }
    }

    /// Peer confirms it applied the snapshot. Returns true on the Syncing -> Connected edge.
    pub fn on_synchronized(&mut self, now: Millis) -> bool {
        match self.state {
            LinkState::Syncing => {
                self.complete_sync(now);
                true
            }
            LinkState::Connected => {
                self.refresh(now);
                false
            }
            LinkState::Disconnected => false,
        }
    }

    /// Any other valid frame from a Connected peer keeps it alive.
    pub fn touch(&mut self, now: Millis) {
        if self.state == LinkState::Connected {
            self.liveness.arm(now, self.timeout);
        }
    }

    pub fn disconnect(&mut self) {
        self.state = LinkState::Disconnected;
        self.liveness.cancel();
        self.probe.cancel();
    }

    pub fn poll(&mut self, now: Millis) -> Option<LinkEvent> {
        if self.state != LinkState::Disconnected && self.liveness.fire(now) {
            self.disconnect();
            return Some(LinkEvent::Lost);
        }
        if self.state == LinkState::Connected && self.probe.fire(now) {
            self.probe.restart(now);
            return Some(LinkEvent::ProbeDue);
        }
        None
    }

    fn refresh(&mut self, now: Millis) {
        self.liveness.arm(now, self.timeout);
        if let Some(every) = self.probe_every {
            self.probe.arm(now, every);
        }
    }
}
