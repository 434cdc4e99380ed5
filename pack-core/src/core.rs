//! Host-driven API: PackCore receives bytes, packets and time from the host, returns actions.

use crate::action::{Action, Audio, Cue, Lights, Smoke, Sound, Voice};
use crate::config::Config;
use crate::link::{LinkEvent, LinkState, PeerLink};
use crate::mash::MashGuard;
use crate::packet::Packet;
use crate::protocol::{PackCommand, Peer, Role, SerialCommand};
use crate::state::{DeviceState, Inputs, SystemMode};
use crate::timer::{Deadline, Millis};
use crate::wire::{FrameEncodeError, FrameReceiver, FrameSender};

/// The pack: source of truth for [`DeviceState`], wand and serial1 link owner.
///
/// Every entry point takes the host's current time in milliseconds and returns the
/// side effects to perform, in order. The core never blocks and never reads a clock.
pub struct PackCore {
    pub(crate) cfg: Config,
    pub(crate) state: DeviceState,
    pub(crate) wand: PeerLink,
    pub(crate) serial1: PeerLink,
    /// The wand has been Connected since it was last lost. A re-sync does not clear it.
    pub(crate) wand_attached: bool,
    pub(crate) mash: MashGuard,
    /// Overheat sequence running before the vent opens.
    pub(crate) overheat: Deadline,
    /// Continuous smoke while firing.
    pub(crate) smoke_timer: Deadline,
    wand_rx: FrameReceiver,
    serial1_rx: FrameReceiver,
    tx: FrameSender,
    pub(crate) now: Millis,
    out: Vec<Action>,
}

impl PackCore {
    pub fn new(cfg: Config) -> Self {
        let serial1_delay = cfg.serial1_handshake_delay_ms;
        Self {
            state: DeviceState::new(&cfg),
            wand: PeerLink::new(cfg.wand_disconnect_delay_ms),
            serial1: PeerLink::with_probe(serial1_delay, serial1_delay / 2),
            wand_attached: false,
            mash: MashGuard::new(cfg.mash_window_ms, cfg.mash_max, cfg.mash_cooldown_ms),
            overheat: Deadline::idle(),
            smoke_timer: Deadline::idle(),
            wand_rx: FrameReceiver::new(Role::Wand),
            serial1_rx: FrameReceiver::new(Role::Serial1),
            tx: FrameSender::new(Role::Pack),
            now: 0,
            out: Vec::new(),
            cfg,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn link_state(&self, peer: Peer) -> LinkState {
        match peer {
            Peer::Wand => self.wand.state(),
            Peer::Serial1 => self.serial1.state(),
        }
    }

    pub fn is_locked_out(&self) -> bool {
        self.mash.is_locked()
    }

    /// Frame a packet with the pack's sentinels, ready to write to either link.
    pub fn encode(&self, packet: &Packet) -> Result<Vec<u8>, FrameEncodeError> {
        self.tx.encode(packet)
    }

    /// Raw bytes read from a peer's link. Complete frames are dispatched in arrival order.
    pub fn on_bytes_received(&mut self, peer: Peer, bytes: &[u8], now: Millis) -> Vec<Action> {
        self.now = now;
        self.receiver(peer).push(bytes);
        while let Some(packet) = self.receiver(peer).try_receive() {
            self.dispatch(peer, packet);
        }
        self.take()
    }

    fn receiver(&mut self, peer: Peer) -> &mut FrameReceiver {
        match peer {
            Peer::Wand => &mut self.wand_rx,
            Peer::Serial1 => &mut self.serial1_rx,
        }
    }

    /// An already decoded packet from a peer.
    pub fn on_packet(&mut self, peer: Peer, packet: Packet, now: Millis) -> Vec<Action> {
        self.now = now;
        self.dispatch(peer, packet);
        self.take()
    }

    /// Service timers: link liveness, serial1 probes, mash cooldown, overheat and smoke.
    pub fn tick(&mut self, now: Millis) -> Vec<Action> {
        self.now = now;

        if let Some(LinkEvent::Lost) = self.wand.poll(now) {
            if self.wand_attached {
                tracing::info!("wand lost");
                self.on_wand_lost();
            } else {
                tracing::info!("wand sync timed out");
            }
        }

        match self.serial1.poll(now) {
            Some(LinkEvent::Lost) => tracing::info!("serial1 device lost"),
            Some(LinkEvent::ProbeDue) => self.to_serial1(SerialCommand::Handshake),
            None => {}
        }

        if self.mash.poll(now) {
            tracing::info!("firing lockout cleared");
            self.stop(Sound::SmashErrorLoop);
            self.play(Sound::SmashErrorRestart);
            self.to_wand(PackCommand::FiringLockoutCleared);
        }

        if self.overheat.fire(now) {
            self.start_venting();
        }

        if self.smoke_timer.fire(now) {
            self.continuous_smoke_due();
        }

        self.take()
    }

    /// Host-sampled switches. Changes that peers track are announced.
    pub fn set_inputs(&mut self, inputs: Inputs, now: Millis) -> Vec<Action> {
        self.now = now;
        let before = self.state.inputs;
        self.state.inputs = inputs;

        if before.cyclotron_lid_on != inputs.cyclotron_lid_on {
            if inputs.cyclotron_lid_on {
                self.to_serial1(SerialCommand::CyclotronLidOn);
            } else {
                self.to_serial1(SerialCommand::CyclotronLidOff);
            }
        }
        if before.ion_arm_switch != inputs.ion_arm_switch
            && self.state.system_mode == SystemMode::Original
        {
            if inputs.ion_arm_switch {
                self.to_wand(PackCommand::ModeOriginalRedSwitchOn);
                self.to_serial1(SerialCommand::ModeOriginalRedSwitchOn);
            } else {
                self.to_wand(PackCommand::ModeOriginalRedSwitchOff);
                self.to_serial1(SerialCommand::ModeOriginalRedSwitchOff);
            }
        }
        if before.ribbon_cable_attached != inputs.ribbon_cable_attached && self.state.alarm_active() {
            self.to_wand(PackCommand::AlarmOn);
            self.to_serial1(SerialCommand::AlarmOn);
        }
        self.take()
    }

    /// Pack powered on or off by the host (physical switch, boot sequence finished).
    pub fn set_pack_power(&mut self, on: bool, now: Millis) -> Vec<Action> {
        self.now = now;
        if self.state.pack_on != on {
            self.state.pack_on = on;
            self.to_serial1(if on {
                SerialCommand::PackOn
            } else {
                SerialCommand::PackOff
            });
        }
        self.take()
    }

    /// Number of music tracks found on the pack's storage.
    pub fn set_music_track_count(&mut self, count: u16, now: Millis) -> Vec<Action> {
        self.now = now;
        self.state.music.set_count(count);
        self.to_serial1_value(SerialCommand::MusicTrackCountSync, count);
        self.take()
    }

    fn dispatch(&mut self, peer: Peer, packet: Packet) {
        match peer {
            Peer::Wand => self.on_wand_packet(packet),
            Peer::Serial1 => self.on_serial1_packet(packet),
        }
    }

    fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.out)
    }

    pub(crate) fn emit(&mut self, action: Action) {
        self.out.push(action);
    }

    // Outbound traffic. Peer-directed sends are dropped unless the peer is Connected.

    pub(crate) fn to_wand(&mut self, op: PackCommand) {
        self.to_wand_packet(Packet::command(op));
    }

    pub(crate) fn to_wand_value(&mut self, op: PackCommand, value: u16) {
        self.to_wand_packet(Packet::command_with(op, value));
    }

    pub(crate) fn to_wand_packet(&mut self, packet: Packet) {
        if self.wand.is_connected() {
            self.emit(Action::Send(Peer::Wand, packet));
        }
    }

    pub(crate) fn to_serial1(&mut self, op: SerialCommand) {
        self.to_serial1_packet(Packet::command(op));
    }

    pub(crate) fn to_serial1_value(&mut self, op: SerialCommand, value: u16) {
        self.to_serial1_packet(Packet::command_with(op, value));
    }

    pub(crate) fn to_serial1_packet(&mut self, packet: Packet) {
        if self.serial1.is_connected() {
            self.emit(Action::Send(Peer::Serial1, packet));
        }
    }

    /// Synchronization traffic also flows while the peer is Syncing.
    pub(crate) fn sync_send(&mut self, peer: Peer, packet: Packet) {
        let state = self.link_state(peer);
        if state != LinkState::Disconnected {
            self.emit(Action::Send(peer, packet));
        }
    }

    /// Current volume levels to the serial1 device.
    pub(crate) fn volume_sync(&mut self) {
        let levels = self.state.volume.snapshot();
        self.to_serial1_packet(Packet::message(SerialCommand::VolumeSync, levels));
    }

    // Side effects.

    pub(crate) fn play(&mut self, sound: impl Into<Sound>) {
        self.play_cue(Cue::new(sound.into()));
    }

    pub(crate) fn play_cue(&mut self, cue: Cue) {
        self.emit(Action::Audio(Audio::Play(cue)));
    }

    pub(crate) fn stop(&mut self, sound: impl Into<Sound>) {
        self.emit(Action::Audio(Audio::Stop(sound.into())));
    }

    /// Stop then play, so a repeated cue starts from the beginning.
    pub(crate) fn restart(&mut self, sound: impl Into<Sound>) {
        let sound = sound.into();
        self.stop(sound);
        self.play(sound);
    }

    /// Silence every prompt in `group`, then announce `voice`.
    pub(crate) fn voice(&mut self, group: &[Voice], voice: Voice) {
        for &v in group {
            self.stop(v);
        }
        self.play(voice);
    }

    pub(crate) fn audio(&mut self, audio: Audio) {
        self.emit(Action::Audio(audio));
    }

    pub(crate) fn lights(&mut self, lights: Lights) {
        self.emit(Action::Lights(lights));
    }

    pub(crate) fn smoke(&mut self, smoke: Smoke) {
        self.emit(Action::Smoke(smoke));
    }

    /// Gain in dB for a sound played `under` dB below the effects channel.
    pub(crate) fn effects_gain_minus(&self, under: i16) -> i16 {
        self.state.volume.effects_gain().saturating_sub(under)
    }
}

impl Default for PackCore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
