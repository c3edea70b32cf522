mod page;

use std::fs::{self, File};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use directories::ProjectDirs;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size as TermSize},
    style::{Color, Stylize},
    text::Line,
};
use shoal_backdrop::Backdrop;
use shoal_config::Config;
use shoal_core::{Aquarium, FrameToken, SeededRandom, Size};
use shoal_sprites::StageWidget;
use tracing::info;

use crate::page::{Page, PageNavigator};

/// Rows reserved below the water for the footer.
const FOOTER_HEIGHT: u16 = 1;

/// A school of fish drifting across your terminal.
#[derive(Debug, Parser)]
#[command(name = "shoal", version, about, long_about = None)]
struct Cli {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of fish
    #[arg(long, value_name = "N")]
    fish: Option<usize>,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the glow-and-grain backdrop
    #[arg(long)]
    no_backdrop: bool,

    /// Write the effective config to the config path and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn config_path(&self) -> color_eyre::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    /// Layer command-line overrides on top of the file config.
    fn apply(&self, config: &mut Config) {
        if let Some(fish) = self.fish {
            config.fish_count = fish;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_backdrop {
            config.backdrop = false;
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config_path()?;
    let mut config = Config::load_from(&path)?;
    cli.apply(&mut config);

    if cli.write_config {
        config.save_to(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = run(terminal, &config);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, config: &Config) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    App::new(config).run(terminal)
}

/// Log to a file in the cache directory when `SHOAL_LOG` is set; the
/// terminal itself belongs to the aquarium.
fn init_tracing() {
    if std::env::var_os("SHOAL_LOG").is_none() {
        return;
    }
    let Some(dirs) = ProjectDirs::from("", "", "shoal") else {
        return;
    };
    let dir = dirs.cache_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("shoal.log")) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("SHOAL_LOG"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Water area for a terminal of the given size.
fn container(area: TermSize) -> Size {
    Size::from((area.width, area.height.saturating_sub(FOOTER_HEIGHT)))
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The fish, their stage and the backdrop.
    aquarium: Aquarium<Backdrop, SeededRandom>,
    /// Token for the next frame; `None` while a page is open.
    token: Option<FrameToken>,
    /// Page opened by clicking a fish.
    page: Option<Page>,
    /// Directory fish links resolve against.
    site_root: PathBuf,
    /// Last known water size.
    water: Size,
    frame_interval: Duration,
    /// Clock the frame timestamps are measured from.
    started: Instant,
    /// Year shown in the footer, fixed at startup.
    year: i32,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let backdrop = if config.backdrop {
            Backdrop::new()
        } else {
            Backdrop::disabled()
        };
        let rng = match config.seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        Self {
            running: false,
            aquarium: Aquarium::new(config.settings(), backdrop, rng),
            token: None,
            page: None,
            site_root: config.site_root(),
            water: Size::ZERO,
            frame_interval: Duration::from_millis(config.frame_interval_ms.max(1)),
            started: Instant::now(),
            year: Local::now().year(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.restart(container(terminal.size()?));
        while self.running {
            self.advance(container(terminal.size()?));
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Tear down the school and start a fresh one.
    fn restart(&mut self, water: Size) {
        self.water = water;
        let now = self.now_ms();
        self.token = Some(self.aquarium.start(water, now));
    }

    /// Run one frame of the aquarium, if it is on screen.
    fn advance(&mut self, water: Size) {
        if let Some(token) = self.token {
            let now = self.now_ms();
            self.token = self.aquarium.tick(token, now, water);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        if let Some(page) = &self.page {
            page.render(frame);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),               // Water
            Constraint::Length(FOOTER_HEIGHT), // Footer
        ])
        .split(frame.area());

        frame.render_widget(self.aquarium.surface(), chunks[0]);
        frame.render_widget(StageWidget::new(self.aquarium.stage()), chunks[0]);

        let accent = Color::Cyan;
        let footer = Line::from(vec![
            format!("© {} ", self.year).dark_gray(),
            " click".bold().fg(accent),
            " a fish to read on  ".dark_gray(),
            "q".bold().fg(accent),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(footer, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => {
                    info!(width, height, "terminal resized");
                    self.on_resize(container(TermSize::new(width, height)));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) =
            (key.modifiers, key.code)
        {
            self.quit();
            return;
        }

        match &mut self.page {
            Some(page) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.go_back(),
                KeyCode::Down | KeyCode::Char('j') => page.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => page.scroll_up(),
                KeyCode::Char('q') => self.quit(),
                _ => {}
            },
            None => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                _ => {}
            },
        }
    }

    /// Route left clicks on the water to the aquarium.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if self.page.is_some() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        self.on_click(mouse.column, mouse.row);
    }

    fn on_click(&mut self, col: u16, row: u16) {
        let mut navigator = PageNavigator::new(&self.site_root);
        if self
            .aquarium
            .handle_click(col as i32, row as i32, &mut navigator)
        {
            self.page = navigator.into_page();
            self.token = None;
        }
    }

    /// Rebuild the school for the new size, or remember the size until the
    /// open page is closed.
    fn on_resize(&mut self, water: Size) {
        if self.page.is_some() {
            self.water = water;
        } else {
            self.restart(water);
        }
    }

    /// Leave the page and reload the aquarium at the current size.
    fn go_back(&mut self) {
        self.page = None;
        self.restart(self.water);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn config(site_root: PathBuf) -> Config {
        Config {
            seed: Some(0x5EA),
            site_root: Some(site_root),
            ..Config::default()
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// A cell covered by the first fish's sprite that lies inside the water.
    fn first_fish_cell(app: &App) -> Option<(u16, u16)> {
        let water = app.aquarium.container();
        app.aquarium.stage().elements().iter().find_map(|e| {
            let fp = e.transform.footprint();
            let (col, row) = (fp.left + fp.width as i32 / 2, fp.top);
            let inside = col >= 0
                && row >= 0
                && (col as f64) < water.width
                && (row as f64) < water.height;
            inside.then_some((col as u16, row as u16))
        })
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["shoal", "--fish", "3", "--seed", "9", "--no-backdrop"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.fish_count, 3);
        assert_eq!(config.seed, Some(9));
        assert!(!config.backdrop);
    }

    #[test]
    fn test_container_excludes_footer() {
        assert_eq!(container(TermSize::new(80, 24)), Size::new(80.0, 23.0));
        assert_eq!(container(TermSize::new(80, 0)), Size::new(80.0, 0.0));
    }

    #[test]
    fn test_footer_shows_current_year() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.restart(Size::new(80.0, 23.0));

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains(&format!("© {}", Local::now().year())));
    }

    #[test]
    fn test_resize_rebuilds_single_school() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.restart(Size::new(80.0, 23.0));
        app.restart(Size::new(120.0, 39.0));
        app.advance(Size::new(120.0, 39.0));

        assert_eq!(app.aquarium.stage().len(), 8);
        assert_eq!(app.aquarium.agents().len(), 8);
        assert!(app.token.is_some());
    }

    #[test]
    fn test_click_opens_page_and_back_restarts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("blog/post1.html"), "welcome to the reef").unwrap();

        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.restart(Size::new(200.0, 59.0));
        let (col, row) = first_fish_cell(&app).expect("a fish inside the water");
        let generation = app.aquarium.generation();

        app.on_click(col, row);
        assert!(app.token.is_none());
        let page = app.page.as_ref().expect("page opened");
        assert_eq!(page.link, "blog/post1.html");

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert!(screen_text(&terminal).contains("welcome to the reef"));

        app.on_key_event(press(KeyCode::Char('b')));
        assert!(app.page.is_none());
        assert!(app.token.is_some());
        assert_eq!(app.aquarium.generation(), generation + 1);
    }

    #[test]
    fn test_clicks_ignored_while_page_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.restart(Size::new(200.0, 59.0));
        let (col, row) = first_fish_cell(&app).expect("a fish inside the water");
        app.on_click(col, row);
        let opened = app.page.clone();

        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.page, opened);
    }

    #[test]
    fn test_resize_waits_for_page_to_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.restart(Size::new(200.0, 59.0));
        let (col, row) = first_fish_cell(&app).expect("a fish inside the water");
        app.on_click(col, row);
        let generation = app.aquarium.generation();

        app.on_resize(Size::new(90.0, 30.0));
        assert!(app.page.is_some());
        assert_eq!(app.aquarium.generation(), generation);

        app.on_key_event(press(KeyCode::Esc));
        assert!(app.page.is_none());
        assert_eq!(app.aquarium.container(), Size::new(90.0, 30.0));
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(dir.path().to_path_buf()));
        app.running = true;
        app.on_key_event(press(KeyCode::Char('x')));
        assert!(app.running);
        app.on_key_event(press(KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
