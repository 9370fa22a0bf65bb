// Wire protocol: fixed-layout binary commands, one per UDP datagram.
//
// Every frame is exactly FRAME_LEN bytes, zero-padded to the largest
// command. Multi-byte fields are big-endian so differing-endianness hosts
// decode identical values; f32 coordinates round-trip bit-exact.
//
// Layouts (byte offsets):
//   CONNECT          [0]=tag
//   UPDATE_INPUT     [0]=tag  [1..5]=i32 key code
//   UPDATE_POSITION  [0]=tag  [1]=entity id  [2..6]=f32 x  [6..10]=f32 y
//
// There is no length field, sequence number or checksum. Each position
// frame fully replaces prior knowledge of that entity, so duplicated or
// reordered datagrams cost staleness, never corruption.

use thiserror::Error;

use crate::game::state::HeldDir;

/// Fixed frame size: the UPDATE_POSITION layout, the largest command.
pub const FRAME_LEN: usize = 10;

const TAG_CONNECT: u8 = 0;
const TAG_UPDATE_INPUT: u8 = 2;
const TAG_UPDATE_POSITION: u8 = 3;

// Key codes carried by UPDATE_INPUT.
pub const KEY_NONE: i32 = 0;
pub const KEY_UP: i32 = 1;
pub const KEY_DOWN: i32 = 2;

/// Entities addressed by UPDATE_POSITION frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEntity {
    PaddleOne,
    PaddleTwo,
    Ball,
}

impl GameEntity {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            GameEntity::PaddleOne => 0,
            GameEntity::PaddleTwo => 1,
            GameEntity::Ball => 2,
        }
    }

    fn to_byte(self) -> u8 {
        self.index() as u8
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(GameEntity::PaddleOne),
            1 => Some(GameEntity::PaddleTwo),
            2 => Some(GameEntity::Ball),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Join request, client to host.
    Connect,
    /// Latest held direction key, client to host.
    UpdateInput { key: i32 },
    /// Authoritative position of one entity, host to client.
    UpdatePosition { entity: GameEntity, x: f32, y: f32 },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame too short: {0} bytes")]
    ShortFrame(usize),
    #[error("unknown command tag {0:#04x}")]
    UnknownTag(u8),
    #[error("unknown entity id {0}")]
    UnknownEntity(u8),
}

impl Command {
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        match *self {
            Command::Connect => {
                frame[0] = TAG_CONNECT;
            }
            Command::UpdateInput { key } => {
                frame[0] = TAG_UPDATE_INPUT;
                frame[1..5].copy_from_slice(&key.to_be_bytes());
            }
            Command::UpdatePosition { entity, x, y } => {
                frame[0] = TAG_UPDATE_POSITION;
                frame[1] = entity.to_byte();
                frame[2..6].copy_from_slice(&x.to_be_bytes());
                frame[6..10].copy_from_slice(&y.to_be_bytes());
            }
        }
        frame
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < FRAME_LEN {
            return Err(DecodeError::ShortFrame(buf.len()));
        }
        match buf[0] {
            TAG_CONNECT => Ok(Command::Connect),
            TAG_UPDATE_INPUT => {
                let key = i32::from_be_bytes(buf[1..5].try_into().unwrap());
                Ok(Command::UpdateInput { key })
            }
            TAG_UPDATE_POSITION => {
                let entity = GameEntity::from_byte(buf[1])
                    .ok_or(DecodeError::UnknownEntity(buf[1]))?;
                let x = f32::from_be_bytes(buf[2..6].try_into().unwrap());
                let y = f32::from_be_bytes(buf[6..10].try_into().unwrap());
                Ok(Command::UpdatePosition { entity, x, y })
            }
            tag => Err(DecodeError::UnknownTag(tag)),
        }
    }
}

/// Key code for a held direction, for UPDATE_INPUT frames.
pub fn key_code(dir: HeldDir) -> i32 {
    match dir {
        HeldDir::None => KEY_NONE,
        HeldDir::Up => KEY_UP,
        HeldDir::Down => KEY_DOWN,
    }
}

/// Held direction for a received key code. Unknown codes mean "none":
/// a desynchronized sender releases the paddle rather than moving it.
pub fn held_dir(key: i32) -> HeldDir {
    match key {
        KEY_UP => HeldDir::Up,
        KEY_DOWN => HeldDir::Down,
        _ => HeldDir::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_frame_round_trips_bit_exact() {
        let cmd = Command::UpdatePosition {
            entity: GameEntity::Ball,
            x: 12.5,
            y: 7.25,
        };
        let frame = cmd.encode();
        let decoded = Command::decode(&frame).unwrap();

        match decoded {
            Command::UpdatePosition { entity, x, y } => {
                assert_eq!(entity, GameEntity::Ball);
                assert_eq!(x.to_bits(), 12.5f32.to_bits());
                assert_eq!(y.to_bits(), 7.25f32.to_bits());
            }
            other => panic!("decoded wrong command: {:?}", other),
        }
    }

    #[test]
    fn position_frame_layout_matches_documented_offsets() {
        let x = 12.5f32;
        let y = 7.25f32;
        let frame = Command::UpdatePosition {
            entity: GameEntity::Ball,
            x,
            y,
        }
        .encode();

        assert_eq!(frame[0], 3);
        assert_eq!(frame[1], 2);
        assert_eq!(&frame[2..6], &x.to_be_bytes());
        assert_eq!(&frame[6..10], &y.to_be_bytes());
    }

    #[test]
    fn input_frame_is_zero_padded_to_frame_len() {
        let frame = Command::UpdateInput { key: KEY_UP }.encode();
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame[0], 2);
        assert_eq!(&frame[1..5], &1i32.to_be_bytes());
        assert!(frame[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn connect_round_trips() {
        let frame = Command::Connect.encode();
        assert_eq!(Command::decode(&frame).unwrap(), Command::Connect);
    }

    #[test]
    fn negative_key_codes_survive_the_trip() {
        let frame = Command::UpdateInput { key: -7 }.encode();
        assert_eq!(
            Command::decode(&frame).unwrap(),
            Command::UpdateInput { key: -7 }
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = 9;
        assert!(matches!(
            Command::decode(&frame),
            Err(DecodeError::UnknownTag(9))
        ));
    }

    #[test]
    fn unknown_entity_is_rejected() {
        let mut frame = Command::UpdatePosition {
            entity: GameEntity::Ball,
            x: 0.0,
            y: 0.0,
        }
        .encode();
        frame[1] = 7;
        assert!(matches!(
            Command::decode(&frame),
            Err(DecodeError::UnknownEntity(7))
        ));
    }

    #[test]
    fn short_frame_is_rejected() {
        assert!(matches!(
            Command::decode(&[TAG_CONNECT]),
            Err(DecodeError::ShortFrame(1))
        ));
    }

    #[test]
    fn key_codes_map_to_held_directions() {
        assert_eq!(held_dir(key_code(HeldDir::Up)), HeldDir::Up);
        assert_eq!(held_dir(key_code(HeldDir::Down)), HeldDir::Down);
        assert_eq!(held_dir(key_code(HeldDir::None)), HeldDir::None);
        assert_eq!(held_dir(1234), HeldDir::None);
    }
}
