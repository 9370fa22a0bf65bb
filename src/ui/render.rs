use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use super::overlay::{render_overlay, OverlayMessage};
use crate::game::state::{
    Phase, Session, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use crate::menu::{self, MenuState};

// Layout: score row, hint row, then the bordered playfield.
const UI_HEADER_ROWS: u16 = 3;
const UI_FOOTER_ROWS: u16 = 1;

/// Draw one frame of whatever the session is currently doing.
pub fn render(frame: &mut Frame, session: &Session, menu_state: &MenuState) {
    if session.phase == Phase::Menu {
        menu::render_menu(frame, menu_state, session.win_score);
        return;
    }
    render_game(frame, session);
}

fn render_game(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    if area.height <= UI_HEADER_ROWS + UI_FOOTER_ROWS || area.width < 10 {
        return;
    }

    // True black background, not the terminal default
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);

    let playable_rows = area.height - UI_HEADER_ROWS - UI_FOOTER_ROWS;
    let playable_pixels = playable_rows as usize * 4;
    let offset_y = UI_HEADER_ROWS as usize * 4;

    canvas.draw_horizontal_line(offset_y - 1);
    canvas.draw_horizontal_line(offset_y + playable_pixels);

    let scale_x = canvas.pixel_width() as f32 / PLAYFIELD_WIDTH;
    let scale_y = playable_pixels as f32 / PLAYFIELD_HEIGHT;

    draw_center_line(&mut canvas, scale_x, offset_y, playable_pixels);

    // Trails first so the entities draw over their own streaks
    for point in session.ball.trail.iter() {
        let px = (point.x * scale_x) as usize;
        let py = (point.y * scale_y) as usize + offset_y;
        canvas.fill_rect(px.saturating_sub(1), py.saturating_sub(1), 2, 2);
    }
    for paddle in &session.paddles {
        for point in paddle.trail.iter() {
            let px = (point.x * scale_x) as usize;
            let py = (point.y * scale_y) as usize + offset_y;
            canvas.set_pixel(px, py);
        }
    }

    for paddle in &session.paddles {
        let mut rect = paddle.rect;
        if paddle.hit_timer > 0.0 {
            // Brief flash: the paddle fattens by a pixel on contact
            rect.x -= 1.0 / scale_x;
            rect.w += 2.0 / scale_x;
        }
        draw_virtual_rect(&mut canvas, rect, scale_x, scale_y, offset_y);
    }
    draw_virtual_rect(&mut canvas, session.ball.rect, scale_x, scale_y, offset_y);

    render_canvas(frame, &canvas, area, session.ball.color);

    draw_scores(frame, session, area);
    draw_controls(frame, area);

    if session.phase == Phase::HostPending {
        let port = session
            .server_sock
            .as_ref()
            .and_then(|s| s.local_addr().ok())
            .map(|a| a.port());
        let line = match port {
            Some(port) => format!("Waiting for a client on port {}...", port),
            None => "Waiting for a client...".to_string(),
        };
        let message = OverlayMessage::warning(vec![line, String::new(), "Q to quit".into()])
            .with_title("netpong".to_string());
        render_overlay(frame, &message, area);
    }

    if session.paused {
        let message = OverlayMessage::info(vec![
            "PAUSED".to_string(),
            String::new(),
            "Space to resume".to_string(),
        ]);
        render_overlay(frame, &message, area);
    }
}

fn draw_virtual_rect(
    canvas: &mut BrailleCanvas,
    rect: crate::game::state::Rect,
    scale_x: f32,
    scale_y: f32,
    offset_y: usize,
) {
    let px = (rect.x * scale_x) as usize;
    let py = (rect.y * scale_y) as usize + offset_y;
    let pw = ((rect.w * scale_x) as usize).max(1);
    let ph = ((rect.h * scale_y) as usize).max(1);
    canvas.fill_rect(px, py, pw, ph);
}

fn draw_center_line(canvas: &mut BrailleCanvas, scale_x: f32, offset_y: usize, height: usize) {
    let center_x = (PLAYFIELD_WIDTH / 2.0 * scale_x) as usize;
    for y in (0..height).step_by(4) {
        canvas.set_pixel(center_x, offset_y + y);
        canvas.set_pixel(center_x, offset_y + y + 1);
    }
}

fn render_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect, color: [u8; 3]) {
    // The canvas is monochrome; the whole field wears the ball's current
    // color, which tracks the paddle it last touched.
    let fg = Color::Rgb(color[0], color[1], color[2]);
    for row in 0..canvas.rows() {
        let mut line = String::with_capacity(canvas.cols());
        for col in 0..canvas.cols() {
            line.push(canvas.to_char(col, row));
        }
        let paragraph = Paragraph::new(line).style(Style::default().fg(fg));
        let row_area = Rect {
            x: area.x,
            y: area.y + row as u16,
            width: area.width,
            height: 1,
        };
        frame.render_widget(paragraph, row_area);
    }
}

fn draw_scores(frame: &mut Frame, session: &Session, area: Rect) {
    let left = Paragraph::new(format!("{}", session.scores[0]))
        .style(Style::default().fg(rgb(session.paddles[0].color)))
        .alignment(Alignment::Center);
    let right = Paragraph::new(format!("{}", session.scores[1]))
        .style(Style::default().fg(rgb(session.paddles[1].color)))
        .alignment(Alignment::Center);

    let half = area.width / 2;
    frame.render_widget(
        left,
        Rect {
            x: area.x,
            y: area.y,
            width: half,
            height: 1,
        },
    );
    frame.render_widget(
        right,
        Rect {
            x: area.x + half,
            y: area.y,
            width: area.width - half,
            height: 1,
        },
    );
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("W/S: Left  ↑/↓: Right  Space: Pause  Q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    let controls_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: 1,
    };

    frame.render_widget(controls, controls_area);
}

fn rgb(color: [u8; 3]) -> Color {
    Color::Rgb(color[0], color[1], color[2])
}
