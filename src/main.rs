mod config;
mod debug;
mod game;
mod game_modes;
mod menu;
mod network;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use config::Config;
use game::{GameAction, Phase, Role, Session};
use menu::{MenuAction, MenuState};
use network::{Command, UdpEndpoint};

// Fixed timestep for deterministic physics
const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Resolved command-line role, including the peer address for network play.
#[derive(Debug, Clone)]
enum CliRole {
    Local,
    Host { port: u16 },
    Client { host: String, port: u16 },
}

#[derive(Debug, Clone)]
struct Cli {
    role: CliRole,
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    debug::init(cli.debug).context("could not initialize debug logging")?;

    let config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: could not load configuration: {}", e);
        Config::default()
    });

    // Sockets come up before the TUI so a startup failure prints plainly
    let session = build_session(&cli, &config).inspect_err(|e| {
        error!(error = %e, "startup failed");
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, session, &config);

    // Restore terminal
    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn parse_args(args: &[String]) -> Cli {
    let mut role = CliRole::Local;
    let mut debug = false;

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--host" => {
                let Some(port) = iter.next().and_then(|p| p.parse().ok()) else {
                    eprintln!("Error: -h requires a port number");
                    print_usage(&args[0]);
                    std::process::exit(1);
                };
                role = CliRole::Host { port };
            }
            "-c" | "--connect" => {
                let host = iter.next().cloned();
                let port = iter.next().and_then(|p| p.parse().ok());
                let (Some(host), Some(port)) = (host, port) else {
                    eprintln!("Error: -c requires a host and a port");
                    print_usage(&args[0]);
                    std::process::exit(1);
                };
                role = CliRole::Client { host, port };
            }
            "--debug" => debug = true,
            "--help" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    Cli { role, debug }
}

fn print_usage(program: &str) {
    println!("netpong - terminal pong, locally or over UDP");
    println!();
    println!("Usage:");
    println!("  {}                      # Local mode (both players on this keyboard)", program);
    println!("  {} -h <port>            # Host a game on the given UDP port", program);
    println!("  {} -c <host> <port>     # Connect to a hosted game", program);
    println!();
    println!("Options:");
    println!("  --debug                 Write diagnostics to /tmp/netpong-debug.log");
    println!("  --help                  Show this help");
}

/// Build the session for the parsed role. Socket failures here are fatal:
/// no match can start without the endpoint.
fn build_session(cli: &Cli, config: &Config) -> anyhow::Result<Session> {
    match &cli.role {
        CliRole::Local => Ok(Session::new(Role::Local, None, None, config)),
        CliRole::Host { port } => {
            let sock = UdpEndpoint::server(*port)
                .with_context(|| format!("could not create a UDP server on port {port}"))?;
            info!(port, "hosting");
            Ok(Session::new(Role::Host, Some(sock), None, config))
        }
        CliRole::Client { host, port } => {
            let sock = UdpEndpoint::client(host, *port)
                .with_context(|| format!("could not connect to {host}:{port}"))?;
            sock.send_frame(&Command::Connect.encode())
                .with_context(|| format!("could not reach the host at {host}:{port}"))?;
            info!(host = %host, port, "join request sent");
            Ok(Session::new(Role::Client, None, Some(sock), config))
        }
    }
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut session: Session,
    config: &Config,
) -> anyhow::Result<()> {
    let frame_duration = Duration::from_millis(1000 / config.display.target_fps.max(1));
    let mut menu_state = MenuState::new();

    info!(role = ?session.role, "game loop started");

    loop {
        let frame_start = Instant::now();

        if session.should_exit {
            return Ok(());
        }

        if session.phase == Phase::Menu {
            match menu::handle_menu_input(&mut menu_state, &mut session.win_score)? {
                MenuAction::Start => session.start_match(),
                MenuAction::Exit => session.should_exit = true,
                MenuAction::None => {}
            }
        } else {
            for action in game::poll_game_input(&mut session)? {
                match action {
                    GameAction::TogglePause => session.paused = !session.paused,
                    GameAction::Quit => session.should_exit = true,
                }
            }
        }

        if !session.paused {
            game_modes::update(&mut session, FIXED_TIMESTEP);
        }

        terminal.draw(|f| ui::render(f, &session, &menu_state))?;

        limit_frame_rate(frame_start, frame_duration);
    }
}

/// Sleep out the rest of the frame budget so the simulation ticks at a
/// steady rate.
fn limit_frame_rate(frame_start: Instant, frame_duration: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_duration {
        std::thread::sleep(frame_duration - elapsed);
    }
}
