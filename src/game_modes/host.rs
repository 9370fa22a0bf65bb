// Host side of a network match: the simulation authority.
//
// While pending, the host polls its bound socket for a CONNECT from any
// sender and adopts that sender as the peer. Once running, each frame
// drains at most one input frame, simulates, and pushes all three entity
// positions. Nothing is acknowledged; the next frame supersedes.

use tracing::{info, warn};

use crate::game::physics;
use crate::game::state::{Phase, Session};
use crate::network::protocol::{self, Command, GameEntity, FRAME_LEN};

/// Poll for a join request; on the first valid CONNECT the server socket
/// becomes the peer socket and the match starts.
pub fn pending_update(session: &mut Session) {
    let Some(server) = session.server_sock.as_ref() else {
        return;
    };

    let mut buf = [0u8; FRAME_LEN];
    let received = match server.try_recv_frame(&mut buf) {
        Ok(Some(received)) => received,
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "receive failed while waiting for a client");
            return;
        }
    };

    let (len, sender) = received;
    match Command::decode(&buf[..len]) {
        Ok(Command::Connect) => {
            info!(%sender, "client connected");
            if let Some(mut sock) = session.server_sock.take() {
                sock.set_peer(sender);
                session.peer_sock = Some(sock);
                session.phase = Phase::HostRunning;
            }
        }
        Ok(other) => warn!(?other, %sender, "ignoring non-join datagram"),
        Err(e) => warn!(error = %e, %sender, "ignoring undecodable datagram"),
    }
}

pub fn update(session: &mut Session, dt: f32) {
    drain_one_input(session);

    for (paddle, held) in session.paddles.iter_mut().zip(session.held) {
        paddle.dir_y = held.dir_y();
    }
    physics::step(session, dt);

    broadcast_positions(session);
}

/// Apply at most one queued input frame to the remote paddle's intent.
/// An empty queue keeps the previous intent; the client only reports
/// changes it considers current.
fn drain_one_input(session: &mut Session) {
    let Some(sock) = session.peer_sock.as_ref() else {
        return;
    };

    let mut buf = [0u8; FRAME_LEN];
    match sock.try_recv_frame(&mut buf) {
        Ok(Some((len, _))) => match Command::decode(&buf[..len]) {
            Ok(Command::UpdateInput { key }) => {
                session.held[1] = protocol::held_dir(key);
            }
            // A re-sent CONNECT from an impatient client is harmless
            Ok(other) => warn!(?other, "unexpected command from client"),
            Err(e) => warn!(error = %e, "undecodable frame from client"),
        },
        Ok(None) => {}
        Err(e) => warn!(error = %e, "input receive failed"),
    }
}

/// Push the authoritative position of every entity. Send failures are
/// logged and dropped; the protocol is last-write-wins.
fn broadcast_positions(session: &Session) {
    let Some(sock) = session.peer_sock.as_ref() else {
        return;
    };

    let frames = [
        (GameEntity::PaddleOne, session.paddles[0].rect),
        (GameEntity::PaddleTwo, session.paddles[1].rect),
        (GameEntity::Ball, session.ball.rect),
    ];

    for (entity, rect) in frames {
        let cmd = Command::UpdatePosition {
            entity,
            x: rect.x,
            y: rect.y,
        };
        if let Err(e) = sock.send_frame(&cmd.encode()) {
            warn!(?entity, error = %e, "position send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::state::{HeldDir, Role};
    use crate::network::protocol::KEY_UP;
    use crate::network::transport::tests::recv_with_retry;
    use crate::network::transport::UdpEndpoint;
    use std::time::Duration;

    fn host_session_with_peer() -> (Session, UdpEndpoint) {
        let config = Config::default();
        let mut host_sock = UdpEndpoint::server(0).unwrap();
        let host_port = host_sock.local_addr().unwrap().port();
        let client_sock = UdpEndpoint::client("127.0.0.1", host_port).unwrap();
        let client_port = client_sock.local_addr().unwrap().port();
        host_sock.set_peer(format!("127.0.0.1:{client_port}").parse().unwrap());

        let session = Session::new(Role::Host, None, Some(host_sock), &config);
        (session, client_sock)
    }

    #[test]
    fn empty_queue_retains_previous_intent() {
        let (mut session, _client_sock) = host_session_with_peer();
        session.held[1] = HeldDir::Down;

        drain_one_input(&mut session);

        assert_eq!(session.held[1], HeldDir::Down);
    }

    #[test]
    fn input_frame_overwrites_remote_intent() {
        let (mut session, client_sock) = host_session_with_peer();
        session.held[1] = HeldDir::Down;

        client_sock
            .send_frame(&Command::UpdateInput { key: KEY_UP }.encode())
            .unwrap();

        for _ in 0..200 {
            drain_one_input(&mut session);
            if session.held[1] == HeldDir::Up {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("input frame never applied");
    }

    #[test]
    fn connect_promotes_pending_host_to_running() {
        let config = Config::default();
        let server_sock = UdpEndpoint::server(0).unwrap();
        let host_port = server_sock.local_addr().unwrap().port();
        let mut session = Session::new(Role::Host, Some(server_sock), None, &config);

        let client_sock = UdpEndpoint::client("127.0.0.1", host_port).unwrap();
        client_sock.send_frame(&Command::Connect.encode()).unwrap();
        let client_port = client_sock.local_addr().unwrap().port();

        for _ in 0..200 {
            pending_update(&mut session);
            if session.phase == Phase::HostRunning {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(session.phase, Phase::HostRunning);
        assert!(session.server_sock.is_none());
        let peer = session.peer_sock.as_ref().unwrap().peer().unwrap();
        assert_eq!(peer.port(), client_port);
    }

    #[test]
    fn running_host_broadcasts_all_three_entities() {
        let (mut session, client_sock) = host_session_with_peer();
        session.phase = Phase::HostRunning;

        update(&mut session, 1.0 / 60.0);

        let mut seen = [false; GameEntity::COUNT];
        let mut buf = [0u8; FRAME_LEN];
        for _ in 0..GameEntity::COUNT {
            let (len, _) = recv_with_retry(&client_sock, &mut buf);
            match Command::decode(&buf[..len]).unwrap() {
                Command::UpdatePosition { entity, .. } => seen[entity.index()] = true,
                other => panic!("unexpected command {:?}", other),
            }
        }
        assert_eq!(seen, [true; GameEntity::COUNT]);
    }
}
