use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use log::info;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use survival_map::app::{App, Focus, View};
use survival_map::config::Cli;
use survival_map::data::{spawn_loads, LoadEvent};
use survival_map::i18n::{FilePreferenceStore, Localizer};
use survival_map::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let config = cli.load_config();
    info!("regions from {}, boundaries from {}", config.regions, config.boundaries);
    let loads = spawn_loads(&config);
    let localizer = Localizer::new(Box::new(FilePreferenceStore::new(cli.language_path())));

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, localizer, loads);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for picking, panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track mouse position for the hover card
    app.set_mouse_pos(mouse.column, mouse.row);

    if app.view != View::Overview {
        return;
    }

    match mouse.kind {
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_at(mouse.column, mouse.row, 1.25),
        MouseEventKind::ScrollDown => app.zoom_at(mouse.column, mouse.row, 0.8),
        MouseEventKind::Down(MouseButton::Left) => app.press(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.release(mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_key(app: &mut App, code: KeyCode) {
    let on_map = app.focus == Focus::Map;
    let in_detail = matches!(app.view, View::Detail(_));
    match (in_detail, code) {
        (true, KeyCode::Esc | KeyCode::Backspace) => app.back(),
        (_, KeyCode::Char('q')) | (false, KeyCode::Esc) => app.quit(),
        (_, KeyCode::Char('L')) => app.toggle_language(),
        (true, _) => {}

        (_, KeyCode::Tab) => app.switch_focus(),
        (_, KeyCode::Enter) => app.open_selected(),

        // Pan with hjkl or arrow keys on the map, move the cursor in lists
        (_, KeyCode::Left | KeyCode::Char('h')) if on_map => app.pan(-10, 0),
        (_, KeyCode::Right | KeyCode::Char('l')) if on_map => app.pan(10, 0),
        (_, KeyCode::Up | KeyCode::Char('k')) if on_map => app.pan(0, -6),
        (_, KeyCode::Down | KeyCode::Char('j')) if on_map => app.pan(0, 6),
        (_, KeyCode::Up | KeyCode::Char('k')) => app.move_cursor(-1),
        (_, KeyCode::Down | KeyCode::Char('j')) => app.move_cursor(1),

        // Zoom
        (_, KeyCode::Char('+') | KeyCode::Char('=')) => app.zoom_in(),
        (_, KeyCode::Char('-') | KeyCode::Char('_')) => app.zoom_out(),

        // Layer toggles
        (_, KeyCode::Char('b')) => app.map_renderer.toggle_outlines(),
        (_, KeyCode::Char('n')) => app.map_renderer.toggle_labels(),

        // Reset view
        (_, KeyCode::Char('r') | KeyCode::Char('0')) => app.reset_view(),

        _ => {}
    }
}

/// Apply every load that has completed since the last frame
fn drain_loads(app: &mut App, loads: &Receiver<LoadEvent>, open: &mut bool) {
    while *open {
        match loads.try_recv() {
            Ok(event) => app.apply(event),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => *open = false,
        }
    }
}

fn run(terminal: &mut DefaultTerminal, localizer: Localizer, loads: Receiver<LoadEvent>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(localizer, size.width, size.height);
    let mut loads_open = true;

    // Main loop
    loop {
        drain_loads(&mut app, &loads, &mut loads_open);

        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key.code),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
