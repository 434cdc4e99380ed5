//! Framing: `0x7E | kind | len | body | crc8 | 0x81`, body is bincode.
//!
//! Command and Message records carry their own sentinels; blob kinds are wrapped
//! as `start | blob | end` so every frame is checked against the sender's role.

use crate::packet::{
    CommandRecord, MessageRecord, Packet, PackPrefs, SmokePrefs, SyncSnapshot, WandPrefs,
};
use crate::protocol::{PacketKind, Role, Sentinels};

pub const FRAME_START: u8 = 0x7E;
pub const FRAME_END: u8 = 0x81;

const HEADER_LEN: usize = 3;
const TRAILER_LEN: usize = 2;
/// Receiver buffer bound; oldest bytes are discarded past this.
const MAX_BUFFERED: usize = 1024;

/// Exact body length for each kind (record plus sentinels).
const fn body_len(kind: PacketKind) -> usize {
    match kind {
        PacketKind::Command => 5,
        PacketKind::Message => 6,
        PacketKind::PackPrefs => 28 + 2,
        PacketKind::WandPrefs => 19 + 2,
        PacketKind::SmokePrefs => 21 + 2,
        PacketKind::Sync => 15 + 2,
    }
}

/// CRC-8, polynomial 0x07, initial value 0.
pub fn crc8(bytes: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in bytes {
        crc ^= b;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x07
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn encode_body(sentinels: Sentinels, packet: &Packet) -> Result<Vec<u8>, bincode::Error> {
    let Sentinels { start, end } = sentinels;
    let wrap = |blob: Vec<u8>| {
        let mut body = Vec::with_capacity(blob.len() + 2);
        body.push(start);
        body.extend_from_slice(&blob);
        body.push(end);
        body
    };
    Ok(match packet {
        Packet::Command { opcode, value } => bincode::serialize(&CommandRecord {
            start,
            opcode: *opcode,
            value: *value,
            end,
        })?,
        Packet::Message { opcode, data } => bincode::serialize(&MessageRecord {
            start,
            opcode: *opcode,
            data: *data,
            end,
        })?,
        Packet::PackPrefs(p) => wrap(bincode::serialize(p)?),
        Packet::WandPrefs(p) => wrap(bincode::serialize(p)?),
        Packet::SmokePrefs(p) => wrap(bincode::serialize(p)?),
        Packet::Sync(s) => wrap(bincode::serialize(s)?),
    })
}

/// Encode a packet into a single frame stamped with `role`'s sentinels.
pub fn encode_frame(role: Role, packet: &Packet) -> Result<Vec<u8>, FrameEncodeError> {
    let kind = packet.kind();
    let body = encode_body(role.sentinels(), packet)?;
    if body.len() > u8::MAX as usize {
        return Err(FrameEncodeError::TooLarge);
    }
    let mut out = Vec::with_capacity(HEADER_LEN + body.len() + TRAILER_LEN);
    out.push(FRAME_START);
    out.push(kind.tag());
    out.push(body.len() as u8);
    out.extend_from_slice(&body);
    out.push(crc8(&out[1..]));
    out.push(FRAME_END);
    Ok(out)
}

/// Error encoding a packet into a frame (bincode or size limit).
#[derive(Debug, thiserror::Error)]
pub enum FrameEncodeError {
    #[error("encode error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("frame too large")]
    TooLarge,
}

/// Decode one frame from the front of `bytes`, which must start at `FRAME_START`.
/// Returns the packet and the number of bytes consumed.
pub fn decode_frame(expected: Role, bytes: &[u8]) -> Result<(Packet, usize), FrameDecodeError> {
    match bytes.first() {
        None => return Err(FrameDecodeError::NeedMore),
        Some(&FRAME_START) => {}
        Some(_) => return Err(FrameDecodeError::NoStart),
    }
    if bytes.len() < HEADER_LEN {
        return Err(FrameDecodeError::NeedMore);
    }
    let kind = PacketKind::from_tag(bytes[1]).ok_or(FrameDecodeError::UnknownKind(bytes[1]))?;
    let len = bytes[2] as usize;
    if len != body_len(kind) {
        return Err(FrameDecodeError::Length(len));
    }
    let total = HEADER_LEN + len + TRAILER_LEN;
    if bytes.len() < total {
        return Err(FrameDecodeError::NeedMore);
    }
    if bytes[total - 1] != FRAME_END {
        return Err(FrameDecodeError::NoEnd);
    }
    if crc8(&bytes[1..HEADER_LEN + len]) != bytes[total - 2] {
        return Err(FrameDecodeError::Checksum);
    }
    let body = &bytes[HEADER_LEN..HEADER_LEN + len];
    let Sentinels { start, end } = expected.sentinels();
    if body[0] != start || body[len - 1] != end {
        return Err(FrameDecodeError::Sentinel);
    }
    let blob = &body[1..len - 1];
    let packet = match kind {
        PacketKind::Command => {
            let rec: CommandRecord = bincode::deserialize(body)?;
            Packet::Command {
                opcode: rec.opcode,
                value: rec.value,
            }
        }
        PacketKind::Message => {
            let rec: MessageRecord = bincode::deserialize(body)?;
            Packet::Message {
                opcode: rec.opcode,
                data: rec.data,
            }
        }
        PacketKind::PackPrefs => Packet::PackPrefs(bincode::deserialize::<PackPrefs>(blob)?),
        PacketKind::WandPrefs => Packet::WandPrefs(bincode::deserialize::<WandPrefs>(blob)?),
        PacketKind::SmokePrefs => Packet::SmokePrefs(bincode::deserialize::<SmokePrefs>(blob)?),
        PacketKind::Sync => Packet::Sync(bincode::deserialize::<SyncSnapshot>(blob)?),
    };
    if packet.opcode() == Some(0) {
        return Err(FrameDecodeError::ZeroOpcode);
    }
    Ok((packet, total))
}

/// Error decoding a frame. Everything except `NeedMore` means the frame is dropped.
#[derive(Debug, thiserror::Error)]
pub enum FrameDecodeError {
    #[error("need more bytes")]
    NeedMore,
    #[error("no frame start")]
    NoStart,
    #[error("unknown packet kind {0}")]
    UnknownKind(u8),
    #[error("unexpected body length {0}")]
    Length(usize),
    #[error("missing frame end")]
    NoEnd,
    #[error("checksum mismatch")]
    Checksum,
    #[error("sentinel mismatch")]
    Sentinel,
    #[error("opcode 0 is reserved")]
    ZeroOpcode,
    #[error("decode error: {0}")]
    Decode(#[from] bincode::Error),
}

/// Outbound half of a link: stamps frames with the local role.
#[derive(Debug, Clone, Copy)]
pub struct FrameSender {
    role: Role,
}

impl FrameSender {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn encode(&self, packet: &Packet) -> Result<Vec<u8>, FrameEncodeError> {
        encode_frame(self.role, packet)
    }
}

/// Inbound half of a link: buffers bytes and yields frames sent by `expected`.
#[derive(Debug)]
pub struct FrameReceiver {
    expected: Role,
    buf: Vec<u8>,
}

impl FrameReceiver {
    pub fn new(expected: Role) -> Self {
        Self {
            expected,
            buf: Vec::new(),
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        if self.buf.len() > MAX_BUFFERED {
            let excess = self.buf.len() - MAX_BUFFERED;
            tracing::trace!(excess, "receiver buffer full, discarding oldest bytes");
            self.buf.drain(..excess);
        }
    }

    /// Next valid packet, or `None` when no complete frame is buffered. Never blocks.
    pub fn try_receive(&mut self) -> Option<Packet> {
        loop {
            match self.buf.iter().position(|&b| b == FRAME_START) {
                Some(0) => {}
                Some(skip) => {
                    tracing::trace!(skip, "skipping bytes before frame start");
                    self.buf.drain(..skip);
                }
                None => {
                    self.buf.clear();
                    return None;
                }
            }
            match decode_frame(self.expected, &self.buf) {
                Ok((packet, used)) => {
                    self.buf.drain(..used);
                    return Some(packet);
                }
                Err(FrameDecodeError::NeedMore) => return None,
                Err(e) => {
                    tracing::trace!(expected = ?self.expected, error = %e, "dropping frame");
                    self.buf.drain(..1);
                }
            }
        }
    }

    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{PackCommand, WandCommand};

    fn received(expected: Role, bytes: &[u8]) -> Vec<Packet> {
        let mut rx = FrameReceiver::new(expected);
        rx.push(bytes);
        std::iter::from_fn(|| rx.try_receive()).collect()
    }

    #[test]
    fn crc8_check_value() {
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn command_frame_layout() {
        let frame = encode_frame(Role::Wand, &Packet::command_with(WandCommand::On, 0x0102)).unwrap();
        assert_eq!(frame.len(), 10);
        assert_eq!(&frame[..3], &[FRAME_START, 1, 5]);
        assert_eq!(&frame[3..8], &[0xB1, 4, 0x02, 0x01, 0xB2]);
        assert_eq!(frame[9], FRAME_END);
    }

    #[test]
    fn sync_blob_passes_through_receiver() {
        let snap = SyncSnapshot {
            system_mode: 2,
            power_level: 5,
            current_music_track: 503,
            ..Default::default()
        };
        let frame = FrameSender::new(Role::Pack).encode(&Packet::Sync(snap)).unwrap();
        assert_eq!(received(Role::Pack, &frame), vec![Packet::Sync(snap)]);
    }

    #[test]
    fn wrong_role_is_dropped() {
        let frame = encode_frame(Role::Serial1, &Packet::command(1u8)).unwrap();
        assert!(received(Role::Wand, &frame).is_empty());
    }

    #[test]
    fn partial_frames_need_more() {
        let frame = encode_frame(Role::Wand, &Packet::command(WandCommand::Handshake)).unwrap();
        let mut rx = FrameReceiver::new(Role::Wand);
        rx.push(&frame[..4]);
        assert_eq!(rx.try_receive(), None);
        assert_eq!(rx.buffered(), 4);
        rx.push(&frame[4..]);
        assert_eq!(rx.try_receive(), Some(Packet::command(WandCommand::Handshake)));
        assert_eq!(rx.buffered(), 0);
    }

    #[test]
    fn garbage_and_corruption_are_skipped() {
        let good = encode_frame(Role::Pack, &Packet::command(PackCommand::SyncEnd)).unwrap();
        let mut corrupt = encode_frame(Role::Pack, &Packet::command(PackCommand::SyncStart)).unwrap();
        corrupt[5] ^= 0xFF;
        let mut stream = vec![0x00, 0x7E, 0x09, 0x42];
        stream.extend_from_slice(&corrupt);
        stream.extend_from_slice(&good);
        assert_eq!(received(Role::Pack, &stream), vec![Packet::command(PackCommand::SyncEnd)]);
    }

    #[test]
    fn zero_opcode_dropped_unknown_opcode_kept() {
        let zero = encode_frame(Role::Wand, &Packet::command(0u8)).unwrap();
        assert!(matches!(decode_frame(Role::Wand, &zero), Err(FrameDecodeError::ZeroOpcode)));
        let unknown = encode_frame(Role::Wand, &Packet::command_with(250u8, 7)).unwrap();
        assert_eq!(
            received(Role::Wand, &unknown),
            vec![Packet::Command { opcode: 250, value: 7 }]
        );
    }

    #[test]
    fn multiple_frames_in_one_push() {
        let a = Packet::message(PackCommand::VolumeSync, [10, 20, 30]);
        let b = Packet::WandPrefs(WandPrefs {
            led_count: 48,
            ..Default::default()
        });
        let mut buf = encode_frame(Role::Pack, &a).unwrap();
        buf.extend(encode_frame(Role::Pack, &b).unwrap());
        assert_eq!(received(Role::Pack, &buf), vec![a, b]);
    }

    #[test]
    fn buffer_is_bounded() {
        let mut rx = FrameReceiver::new(Role::Wand);
        rx.push(&[FRAME_START, 1, 5]);
        rx.push(&[0u8; 2000]);
        assert!(rx.buffered() <= MAX_BUFFERED);
        assert_eq!(rx.try_receive(), None);
    }
}
