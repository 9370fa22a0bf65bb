// Client side of a network match: a thin mirror of the host.
//
// Each frame pushes the local held intent, then drains queued position
// frames and overwrites entity rectangles wholesale. No interpolation,
// no prediction; if the host goes silent the view simply freezes.

use tracing::warn;

use crate::game::state::{Session, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::network::protocol::{self, Command, GameEntity, FRAME_LEN};

pub fn update(session: &mut Session) {
    send_input(session);
    drain_positions(session);
    update_trails(session);
}

fn send_input(session: &Session) {
    let Some(sock) = session.peer_sock.as_ref() else {
        return;
    };
    let cmd = Command::UpdateInput {
        key: protocol::key_code(session.held[1]),
    };
    if let Err(e) = sock.send_frame(&cmd.encode()) {
        warn!(error = %e, "input send failed");
    }
}

/// Bounded drain: consume queued datagrams until the queue is empty, every
/// entity has been refreshed once, or a frame does not decode to a position
/// update (a desynchronized or non-protocol sender; abandon the rest).
/// Anything beyond the freshest sample per entity is deliberately thrown
/// away, so a backlog never turns into display lag.
fn drain_positions(session: &mut Session) -> [bool; GameEntity::COUNT] {
    let mut seen = [false; GameEntity::COUNT];
    let Session {
        paddles,
        ball,
        peer_sock,
        ..
    } = session;
    let Some(sock) = peer_sock.as_ref() else {
        return seen;
    };

    let mut buf = [0u8; FRAME_LEN];
    loop {
        let received = match sock.try_recv_frame(&mut buf) {
            Ok(Some(received)) => received,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "position receive failed, abandoning drain");
                break;
            }
        };

        let (len, _) = received;
        match Command::decode(&buf[..len]) {
            Ok(Command::UpdatePosition { entity, x, y }) => {
                let rect = match entity {
                    GameEntity::PaddleOne => &mut paddles[0].rect,
                    GameEntity::PaddleTwo => &mut paddles[1].rect,
                    GameEntity::Ball => &mut ball.rect,
                };
                rect.x = x;
                rect.y = y;
                // The host clamps before sending; a stray datagram is cheap to bound
                rect.clamp_within(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);

                seen[entity.index()] = true;
                if seen.iter().all(|&s| s) {
                    break;
                }
            }
            Ok(other) => {
                warn!(?other, "unexpected command from host, abandoning drain");
                break;
            }
            Err(e) => {
                warn!(error = %e, "undecodable frame from host, abandoning drain");
                break;
            }
        }
    }

    seen
}

/// The mirrored entities still leave motion streaks, fed from the
/// synchronized rectangles instead of a local simulation.
fn update_trails(session: &mut Session) {
    if session.paused {
        return;
    }
    session.ball.trail.push(session.ball.rect.center());
    for paddle in &mut session.paddles {
        paddle.trail.push(paddle.rect.center());
    }
}
