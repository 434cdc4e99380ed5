//! Proton Pack serial link core.
//! Host-driven: no I/O; host passes bytes, packets and time, and receives actions.

pub mod action;
pub mod config;
pub mod link;
pub mod mash;
pub mod music;
pub mod packet;
pub mod peer;
pub mod prefs;
pub mod protocol;
pub mod state;
pub mod sync;
pub mod timer;
pub mod volume;
pub mod wire;

mod core;
mod dispatch;

pub use action::{Action, Audio, Channel, Cue, DimZone, Lights, Power, Smoke, Sound, Store, Voice};
pub use config::Config;
pub use self::core::PackCore;
pub use link::LinkState;
pub use packet::{PackPrefs, Packet, SmokePrefs, SyncSnapshot, WandPrefs};
pub use peer::{MirrorState, WandMirror};
pub use protocol::{PackCommand, Peer, Role, SerialCommand, UnknownOpcode, WandCommand};
pub use state::{DeviceState, Era, Inputs, PowerLevel, StreamMode, SystemMode};
pub use timer::Millis;
pub use wire::{decode_frame, encode_frame, FrameDecodeError, FrameEncodeError, FrameReceiver, FrameSender};
