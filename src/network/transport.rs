// Thin non-blocking UDP endpoint. One socket, at most one peer: the peer
// address is fixed at construction for a client, or learned from the
// first CONNECT datagram for a host.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use super::protocol::FRAME_LEN;

#[derive(Debug)]
pub struct UdpEndpoint {
    socket: UdpSocket,
    peer: Option<SocketAddr>,
}

impl UdpEndpoint {
    /// Bind the wildcard address on `port` and wait for a peer.
    pub fn server(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        socket.set_nonblocking(true)?;
        Ok(Self { socket, peer: None })
    }

    /// Resolve `host:port` and fix it as the destination for every send.
    pub fn client(host: &str, port: u16) -> io::Result<Self> {
        let addr = (host, port).to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("could not resolve host {host}"),
            )
        })?;
        let socket = UdpSocket::bind(("0.0.0.0", 0))?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket,
            peer: Some(addr),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn set_peer(&mut self, addr: SocketAddr) {
        self.peer = Some(addr);
    }

    /// Send one frame to the bound peer as a single datagram.
    pub fn send_frame(&self, frame: &[u8; FRAME_LEN]) -> io::Result<()> {
        let peer = self
            .peer
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no peer bound"))?;
        self.socket.send_to(frame, peer)?;
        Ok(())
    }

    /// Receive one datagram without blocking. Returns the payload length
    /// and the sender, or `None` when nothing is queued.
    pub fn try_recv_frame(
        &self,
        buf: &mut [u8; FRAME_LEN],
    ) -> io::Result<Option<(usize, SocketAddr)>> {
        match self.socket.recv_from(buf) {
            Ok((len, addr)) => Ok(Some((len, addr))),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::network::protocol::Command;
    use std::time::Duration;

    /// Poll an endpoint until a datagram lands; loopback delivery is fast
    /// but not instantaneous.
    pub(crate) fn recv_with_retry(
        endpoint: &UdpEndpoint,
        buf: &mut [u8; FRAME_LEN],
    ) -> (usize, SocketAddr) {
        for _ in 0..200 {
            if let Some(received) = endpoint.try_recv_frame(buf).unwrap() {
                return received;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("no datagram arrived on the loopback");
    }

    #[test]
    fn empty_socket_returns_none_immediately() {
        let endpoint = UdpEndpoint::server(0).unwrap();
        let mut buf = [0u8; FRAME_LEN];
        assert!(endpoint.try_recv_frame(&mut buf).unwrap().is_none());
    }

    #[test]
    fn send_without_peer_is_an_error() {
        let endpoint = UdpEndpoint::server(0).unwrap();
        let err = endpoint.send_frame(&[0u8; FRAME_LEN]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn frames_cross_the_loopback() {
        let mut host = UdpEndpoint::server(0).unwrap();
        let host_port = host.local_addr().unwrap().port();
        let client = UdpEndpoint::client("127.0.0.1", host_port).unwrap();

        client.send_frame(&Command::Connect.encode()).unwrap();

        let mut buf = [0u8; FRAME_LEN];
        let (len, sender) = recv_with_retry(&host, &mut buf);
        assert_eq!(len, FRAME_LEN);
        assert_eq!(Command::decode(&buf[..len]).unwrap(), Command::Connect);

        // Reply along the learned address
        host.set_peer(sender);
        let position = Command::UpdatePosition {
            entity: crate::network::protocol::GameEntity::Ball,
            x: 100.0,
            y: 200.0,
        };
        host.send_frame(&position.encode()).unwrap();

        let (len, _) = recv_with_retry(&client, &mut buf);
        assert_eq!(Command::decode(&buf[..len]).unwrap(), position);
    }
}
