// UDP networking: datagram endpoint and the fixed-layout wire protocol.

pub mod protocol;
pub mod transport;

pub use protocol::{Command, DecodeError, GameEntity, FRAME_LEN};
pub use transport::UdpEndpoint;
