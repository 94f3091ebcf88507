use agenda_tui::app::App;
use agenda_tui::Config;
use directories::ProjectDirs;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "agenda-gen", "agenda-gen")
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(config: &Config) -> io::Result<PathBuf> {
    let dir = project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("agenda.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(path)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let config_path = get_config_path();
    let config = Config::load_or_default(&config_path).apply_env();
    let log_path = init_logging(&config)?;
    tracing::info!(
        config = %config_path.display(),
        log = %log_path.display(),
        server = %config.server.base_url,
        "Starting agenda-gen"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();
    let mut app = App::new(config).map_err(|e| color_eyre::eyre::eyre!("{e:#}"))?;

    let mut terminal = ratatui::init();
    ratatui::crossterm::execute!(io::stdout(), EnableMouseCapture, EnableBracketedPaste)?;

    let result = run(&mut terminal, &mut app);

    let _ = ratatui::crossterm::execute!(io::stdout(), DisableBracketedPaste, DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> color_eyre::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => tracing::warn!("Event handling failed: {e:#}"),
            }
        }

        app.process_events();

        if app.should_quit {
            break;
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}
