// Native binary for blockfall - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::OpenOptions,
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;

use blockfall::{
    app::App,
    config::load,
    constants::messages,
    source_sim,
    types::{AppEvent, ItemKey},
    ui,
    util::dblclick::DblClick,
};

/// Logs go to `BLOCKFALL_LOG_FILE` when set; otherwise they stay off unless
/// `RUST_LOG` asks for them, since stderr shares the screen with the TUI.
fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));
    if let Ok(path) = std::env::var("BLOCKFALL_LOG_FILE") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {path}"))?;
        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .parse_default_env();
    }
    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    init_logging()?;
    let cfg = load().context("Failed to load configuration")?;
    if std::env::var("BLOCKFALL_PRINT_CONFIG").is_ok() {
        cfg.print_summary();
    }

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // app + channels
    let (tx, rx) = unbounded_channel::<AppEvent>();
    let mut app = App::new(&cfg);

    // source task
    let cfg_clone = cfg.clone();
    let source_task: JoinHandle<Result<()>> =
        tokio::spawn(async move { source_sim::run_sim(&cfg_clone, tx).await });

    // main loop
    let outcome = run_loop(&mut app, &mut terminal, rx);

    // cleanup (always restore the terminal, even if the loop failed)
    source_task.abort();
    let mouse_enabled = *outcome.as_ref().unwrap_or(&true);
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome.map(|_| ())
}

fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<bool> {
    let mut last_frame = Instant::now();
    let mut last_tick = Instant::now();
    let mut mouse_enabled = false;
    let mut dbl = DblClick::<ItemKey>::default();

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input or source events
        if event::poll(wait)? {
            match event::read()? {
                Event::Key(k) => {
                    if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                        // Check for mouse toggle before other handling
                        if let (KeyCode::Char('m'), KeyModifiers::CONTROL) = (k.code, k.modifiers) {
                            mouse_enabled = !mouse_enabled;
                            if mouse_enabled {
                                execute!(terminal.backend_mut(), EnableMouseCapture)?;
                                app.show_toast(messages::MOUSE_ON.to_string());
                            } else {
                                execute!(terminal.backend_mut(), DisableMouseCapture)?;
                                app.show_toast(messages::MOUSE_OFF.to_string());
                            }
                        } else {
                            handle_key(app, k);
                        }
                    }
                }
                Event::Mouse(m) => {
                    if mouse_enabled && app.ui_flags().mouse_map {
                        handle_mouse(app, m, &mut dbl);
                    }
                }
                _ => {}
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        if last_frame.elapsed() >= budget {
            // Advance the animation by the real time since the last frame
            app.tick_elapsed(last_tick.elapsed());
            last_tick = Instant::now();

            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(mouse_enabled)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, dbl: &mut DblClick<ItemKey>) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        let scale = app.pixel_scale();
        let Some(point) = scale.to_pixels(app.grid_area(), mouse.column, mouse.row) else {
            return;
        };

        if app.ui_flags().dblclick_activate {
            // Single click highlights, double click opens
            if let Some(key) = app.select_at(point) {
                if dbl.register(key.clone()) {
                    app.on_item_activated(key);
                }
            } else {
                dbl.reset();
            }
        } else if app.activate_at(point).is_none() {
            app.close_details();
        }
    }
}

fn handle_key(app: &mut App, k: KeyEvent) {
    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.on_event(AppEvent::Quit);
        }
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            app.next_pane();
            app.close_details();
        }
        (KeyCode::Enter, _) => {
            if app.activate_newest().is_none() {
                app.show_toast("Nothing to show yet".to_string());
            }
        }
        (KeyCode::Esc, _) => {
            app.close_details();
        }
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => app.cycle_fps(),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            // Toggle debug panel visibility
            app.toggle_debug_panel();
        }
        (KeyCode::Char('t'), _) => app.toggle_theme(),
        (KeyCode::Char('r'), _) => app.replay(),
        _ => {}
    }
}
