//! End-to-end link behaviour: encoded frames between the pack core and a wand mirror.

use pack_core::{
    Action, LinkState, MirrorState, PackCommand, PackCore, Packet, Peer, SerialCommand, WandCommand,
    WandMirror,
};

const HEARTBEAT_MS: u64 = 1_000;

/// Deliver the pack's wand-bound sends to the mirror as bytes; returns the mirror's replies.
fn to_mirror(core: &PackCore, mirror: &mut WandMirror, actions: &[Action], now: u64) -> Vec<Packet> {
    let mut replies = Vec::new();
    for action in actions {
        if let Action::Send(Peer::Wand, packet) = action {
            let bytes = core.encode(packet).unwrap();
            replies.extend(mirror.on_bytes(&bytes, now));
        }
    }
    replies
}

fn to_pack(core: &mut PackCore, mirror: &WandMirror, packet: &Packet, now: u64) -> Vec<Action> {
    let bytes = mirror.encode(packet).unwrap();
    core.on_bytes_received(Peer::Wand, &bytes, now)
}

fn synced_pair() -> (PackCore, WandMirror) {
    let mut core = PackCore::default();
    let mut mirror = WandMirror::new(HEARTBEAT_MS);

    let request = mirror.request_sync();
    let actions = to_pack(&mut core, &mirror, &request, 0);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Syncing);

    let replies = to_mirror(&core, &mut mirror, &actions, 0);
    assert_eq!(replies, vec![Packet::command(WandCommand::Synchronized)]);
    for reply in &replies {
        to_pack(&mut core, &mirror, reply, 0);
    }
    (core, mirror)
}

fn sends_to(actions: &[Action], peer: Peer) -> Vec<Packet> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Send(p, packet) if *p == peer => Some(packet.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn wand_sync_over_the_wire() {
    let (core, mirror) = synced_pair();
    assert_eq!(core.link_state(Peer::Wand), LinkState::Connected);
    assert_eq!(mirror.state(), MirrorState::Synced);

    let snap = mirror.snapshot().unwrap();
    assert_eq!(snap.pack_on, 1);
    assert_eq!(snap.master_volume, core.state().volume.master());
    assert_eq!(snap.current_music_track, core.state().music.current());
}

#[test]
fn heartbeats_keep_the_wand_connected() {
    let (mut core, mut mirror) = synced_pair();
    for now in (HEARTBEAT_MS..=20_000).step_by(HEARTBEAT_MS as usize) {
        if let Some(beat) = mirror.tick(now) {
            to_pack(&mut core, &mirror, &beat, now);
        }
        core.tick(now);
        assert_eq!(core.link_state(Peer::Wand), LinkState::Connected, "at {now}");
    }
}

#[test]
fn silent_wand_is_dropped_after_timeout() {
    let (mut core, mirror) = synced_pair();
    to_pack(&mut core, &mirror, &Packet::command(WandCommand::Handshake), 1_000);

    core.tick(8_999);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Connected);
    core.tick(9_000);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Disconnected);

    let out = to_pack(&mut core, &mirror, &Packet::command(WandCommand::VolumeIncrease), 9_100);
    assert!(out.is_empty());
}

#[test]
fn unconfirmed_wand_sync_times_out() {
    let mut core = PackCore::default();
    core.on_packet(Peer::Wand, Packet::command(WandCommand::SyncNow), 0);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Syncing);

    // Heartbeats do not finish a sync.
    core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 4_000);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Syncing);

    core.tick(8_000);
    assert_eq!(core.link_state(Peer::Wand), LinkState::Disconnected);
}

#[test]
fn repeated_sync_request_sends_nothing_new() {
    let mut core = PackCore::default();
    let first = core.on_packet(Peer::Wand, Packet::command(WandCommand::SyncNow), 0);
    assert!(!sends_to(&first, Peer::Wand).is_empty());

    let second = core.on_packet(Peer::Wand, Packet::command(WandCommand::SyncNow), 10);
    assert!(sends_to(&second, Peer::Wand).is_empty());
    assert_eq!(core.link_state(Peer::Wand), LinkState::Syncing);
}

#[test]
fn wand_commands_reach_the_mirror() {
    let (mut core, mut mirror) = synced_pair();
    core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 5);

    let out = core.on_packet(Peer::Serial1, Packet::command(SerialCommand::VolumeIncrease), 10);
    to_mirror(&core, &mut mirror, &out, 10);
    assert_eq!(mirror.drain_commands(), vec![PackCommand::VolumeIncrease]);
}

#[test]
fn unknown_opcodes_change_nothing() {
    let (mut core, mirror) = synced_pair();
    let before = format!("{:?}", core.state());
    let out = to_pack(&mut core, &mirror, &Packet::command(250u8), 10);
    assert!(out.is_empty());
    assert_eq!(format!("{:?}", core.state()), before);
}

#[test]
fn serial1_sync_sequence_order() {
    let mut core = PackCore::default();
    let out = core.on_packet(Peer::Serial1, Packet::command(SerialCommand::SyncStart), 0);

    let s = core.state();
    let colour = [s.spectral_cyclotron.hue, s.spectral_cyclotron.sat, 0];
    let expected = vec![
        Packet::command(SerialCommand::SyncStart),
        Packet::command(SerialCommand::PackConnected),
        Packet::command(SerialCommand::WandDisconnected),
        Packet::command(SerialCommand::ModeSuperHero),
        Packet::command(s.era.serial_year()),
        Packet::command(SerialCommand::ModeOriginalRedSwitchOff),
        Packet::command(SerialCommand::PackOff),
        Packet::command(s.power_level.serial_command()),
        Packet::command(s.stream_mode.serial_command()),
        Packet::message(SerialCommand::SpectralColourData, colour),
        Packet::command(if s.barrel_extended {
            SerialCommand::BarrelExtended
        } else {
            SerialCommand::BarrelRetracted
        }),
        Packet::command(SerialCommand::CyclotronLidOn),
        Packet::command_with(SerialCommand::MusicIsNotPlaying, s.music.current()),
        Packet::command(SerialCommand::MusicIsNotPaused),
        Packet::command(SerialCommand::MusicNoRepeat),
        Packet::command_with(SerialCommand::MusicTrackCountSync, s.music.count()),
        Packet::message(SerialCommand::VolumeSync, s.volume.snapshot()),
        Packet::command(SerialCommand::SyncEnd),
    ];
    assert_eq!(sends_to(&out, Peer::Serial1), expected);
    assert_eq!(core.link_state(Peer::Serial1), LinkState::Connected);
}

#[test]
fn serial1_learns_of_wand_connection() {
    let mut core = PackCore::default();
    core.on_packet(Peer::Serial1, Packet::command(SerialCommand::Handshake), 0);
    let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 10);
    assert_eq!(
        sends_to(&out, Peer::Serial1),
        vec![Packet::command(SerialCommand::WandConnected)]
    );

    // Only the edge is reported.
    let out = core.on_packet(Peer::Wand, Packet::command(WandCommand::Handshake), 20);
    assert!(sends_to(&out, Peer::Serial1).is_empty());
}
