use glam::Vec2;

use super::state::{
    Ball, Paddle, Phase, Session, Side, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use crate::config::PhysicsConfig;

// Collision response tuning. Offsets are measured from the paddle center
// as a fraction of paddle height: inside SWEET_ZONE the ball gains speed,
// beyond EDGE_ZONE it loses speed.
const SWEET_ZONE: f32 = 0.35;
const EDGE_ZONE: f32 = 0.45;
const SPIN_COEFFICIENT: f32 = 0.020;
const PADDLE_SPEED_NUDGE: f32 = 50.0;
const HIT_FLASH_SECS: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundOutcome {
    Continue,
    MatchOver,
}

/// Advance ball and paddle state by exactly one logical step. Deterministic:
/// no randomness anywhere, so host and replay runs agree bit for bit.
pub fn step(session: &mut Session, dt: f32) {
    if handle_scoring(session) == RoundOutcome::MatchOver {
        return;
    }
    wall_bounce(session);
    paddle_collisions(session);
    integrate_paddles(session, dt);
    integrate_ball(session, dt);
    clamp_entities(session);
    update_trails(session, dt);
}

/// Point award and round reset when the ball reaches a vertical boundary.
/// Reaching the win threshold ends the match: scores zero out and the
/// session drops back to the menu before any physics runs this frame.
fn handle_scoring(session: &mut Session) -> RoundOutcome {
    if session.ball.rect.x >= PLAYFIELD_WIDTH - session.ball.rect.w {
        return award_point(session, Side::Left);
    }
    if session.ball.rect.x <= 0.0 {
        return award_point(session, Side::Right);
    }
    RoundOutcome::Continue
}

fn award_point(session: &mut Session, scorer: Side) -> RoundOutcome {
    session.scores[scorer.index()] += 1;
    tracing::debug!(?scorer, scores = ?session.scores, "point scored");

    if session.scores[scorer.index()] >= session.win_score {
        session.scores = [0, 0];
        session.phase = Phase::Menu;
        return RoundOutcome::MatchOver;
    }

    session.reset_round(scorer);
    RoundOutcome::Continue
}

fn wall_bounce(session: &mut Session) {
    let ball = &mut session.ball;
    if ball.rect.y <= 0.0 || ball.rect.y >= PLAYFIELD_HEIGHT - ball.rect.h {
        ball.dir.y = -ball.dir.y;
        ball.speed = (ball.speed * session.physics.wall_damping).clamp(
            session.physics.ball_base_speed,
            session.physics.ball_max_speed,
        );
    }
}

fn paddle_collisions(session: &mut Session) {
    let Session {
        ball,
        paddles,
        physics,
        ..
    } = session;

    if ball.rect.overlaps(&paddles[0].rect) {
        bounce_off_paddle(ball, &mut paddles[0], physics);
        // Displace past the leading edge so the overlap cannot re-trigger
        ball.rect.x = paddles[0].rect.x + paddles[0].rect.w;
    }

    if ball.rect.overlaps(&paddles[1].rect) {
        bounce_off_paddle(ball, &mut paddles[1], physics);
        ball.rect.x = paddles[1].rect.x - ball.rect.w;
    }
}

/// Speed/spin/angle response for one ball-paddle contact.
///
/// The base reflection inverts both direction components. On top of that,
/// two rotations apply: a spin proportional to the square root of the
/// ball/paddle speed difference when their vertical motions oppose each
/// other, and a reflection angle proportional to how far off-center the
/// contact was (zero for a stationary paddle). Off-center geometry also
/// scales ball speed: sweet-zone hits accelerate, edge hits decelerate.
fn bounce_off_paddle(ball: &mut Ball, paddle: &mut Paddle, tuning: &PhysicsConfig) {
    ball.color = paddle.color;
    ball.dir = -ball.dir;

    let collision_point =
        (ball.rect.y + ball.rect.h / 2.0) - (paddle.rect.y + paddle.rect.h / 2.0);

    let opposite_y = ball.dir.y * paddle.dir_y < 0.0
        || (ball.dir.y == 0.0) != (paddle.dir_y == 0.0);
    let speed_diff = (ball.speed - paddle.speed).abs();
    ball.spin_factor = if opposite_y {
        SPIN_COEFFICIENT * (speed_diff.sqrt() + 0.5)
    } else {
        0.0
    };
    ball.dir = Vec2::from_angle(-ball.spin_factor).rotate(ball.dir);

    let height = paddle.rect.h;
    let offset = collision_point.abs();

    let mut speed_factor = 1.0;
    if offset <= height * SWEET_ZONE {
        speed_factor += (collision_point / (height * 0.25)).abs() * 0.5;
    } else if offset > height * EDGE_ZONE {
        speed_factor -= (collision_point / (height * 0.75)).abs() * 0.5;
    }

    let reflection_angle = if paddle.dir_y == 0.0 {
        0.0
    } else if offset <= height * SWEET_ZONE {
        collision_point / (height * 0.25) * 0.2
    } else {
        collision_point / (height * 0.75) * 0.2
    };

    // Accurate center hits reward the paddle with speed, sloppy edge hits
    // cost it, clamped to the paddle speed band.
    if offset <= height * 0.15 {
        paddle.speed = (paddle.speed + PADDLE_SPEED_NUDGE)
            .clamp(tuning.paddle_min_speed, tuning.paddle_max_speed);
    } else if offset > height * 0.25 {
        paddle.speed = (paddle.speed - PADDLE_SPEED_NUDGE)
            .clamp(tuning.paddle_min_speed, tuning.paddle_max_speed);
    }

    ball.speed =
        (ball.speed * speed_factor).clamp(tuning.ball_base_speed, tuning.ball_max_speed);
    ball.dir = Vec2::from_angle(reflection_angle).rotate(ball.dir);
    paddle.hit_timer = HIT_FLASH_SECS;
}

fn integrate_paddles(session: &mut Session, dt: f32) {
    for paddle in &mut session.paddles {
        paddle.rect.y += paddle.speed * paddle.dir_y * dt;
    }
}

fn integrate_ball(session: &mut Session, dt: f32) {
    let ball = &mut session.ball;
    // Renormalize: repeated rotations drift the direction off unit length
    ball.dir = ball.dir.normalize_or_zero();
    ball.rect.x += ball.speed * ball.dir.x * dt;
    ball.rect.y += ball.speed * ball.dir.y * dt;
}

fn clamp_entities(session: &mut Session) {
    for paddle in &mut session.paddles {
        paddle.rect.clamp_within(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
    }
    session
        .ball
        .rect
        .clamp_within(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
}

fn update_trails(session: &mut Session, dt: f32) {
    session.ball.trail.push(session.ball.rect.center());
    for paddle in &mut session.paddles {
        paddle.trail.push(paddle.rect.center());
        paddle.hit_timer = (paddle.hit_timer - dt).max(0.0);
    }
}
