mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use webbrowser::Browser;

use termfolio::{
    command::CommandSpec,
    profile::{FileProfileStore, Profile, ProfileError, ProfileStore},
    runtime::{AppEvent, CrosstermEventSource, Runner},
    scroll::AutoScroll,
    session::{IntroSession, StageId, Tuning},
    TICK_RATE_MS,
};

const CURSOR_BLINK_MS: u64 = 500;

/// personal profile page played back as an animated terminal session
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Plays a personal profile as a simulated shell session: typed commands \
                  (typos included), a scrambled name reveal, a live clock, and the \
                  content each command uncovers."
)]
pub struct Cli {
    /// profile JSON to play instead of the one in the config dir
    #[clap(short = 'p', long)]
    profile: Option<PathBuf>,

    /// seed the typo lottery for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// override the probability that a command fumbles (0.0..=1.0)
    #[clap(long, conflicts_with = "no_typos")]
    typo_probability: Option<f64>,

    /// never simulate typos
    #[clap(long)]
    no_typos: bool,

    /// playback speed preset
    #[clap(short = 's', long, value_enum, default_value_t = SpeedPreset::Normal)]
    speed: SpeedPreset,

    /// print the active profile JSON to stdout and exit
    #[clap(long)]
    dump_profile: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum SpeedPreset {
    Relaxed,
    Normal,
    Swift,
}

impl SpeedPreset {
    fn factor(self) -> f64 {
        match self {
            SpeedPreset::Relaxed => 1.5,
            SpeedPreset::Normal => 1.0,
            SpeedPreset::Swift => 0.5,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub profile: Profile,
    pub session: IntroSession,
    pub scroll: AutoScroll,
    specs: Vec<CommandSpec>,
    tuning: Tuning,
    rng: StdRng,
    started: Instant,
    elapsed_ms: u64,
    content_height: usize,
    viewport: usize,
}

impl App {
    pub fn new(
        profile: Profile,
        speed_factor: f64,
        typo_probability: Option<f64>,
        seed: Option<u64>,
    ) -> Result<Self, ProfileError> {
        let specs: Vec<CommandSpec> = profile
            .resolved_commands()?
            .iter()
            .map(|spec| spec.scale_speed(speed_factor))
            .collect();
        let mut tuning = profile.resolved_tuning()?;
        if let Some(p) = typo_probability {
            tuning.typo_probability = p;
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = IntroSession::new(&specs, &profile.name, &tuning, &mut rng);

        Ok(Self {
            profile,
            session,
            scroll: AutoScroll::new(),
            specs,
            tuning,
            rng,
            started: Instant::now(),
            elapsed_ms: 0,
            content_height: 0,
            viewport: 0,
        })
    }

    pub fn tick(&mut self) {
        self.elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.session.poll(self.elapsed_ms);
    }

    /// Tear the session down and mount a fresh one: new typo lottery, new
    /// schedule, blank screen.
    pub fn remount(&mut self) {
        self.session.shutdown();
        self.session = IntroSession::new(&self.specs, &self.profile.name, &self.tuning, &mut self.rng);
        self.scroll = AutoScroll::new();
        self.started = Instant::now();
        self.elapsed_ms = 0;
    }

    pub fn skip(&mut self) {
        self.session.skip_to_end();
    }

    pub fn blink_on(&self) -> bool {
        (self.elapsed_ms / CURSOR_BLINK_MS) % 2 == 0
    }

    pub fn link_digit(&self, index: usize) -> char {
        char::from_digit(index as u32 + 1, 10).unwrap_or('·')
    }

    /// Links open only once the contact stage has revealed them.
    pub fn open_link(&self, index: usize) {
        if !self.session.stage(StageId::Contact).complete {
            return;
        }
        if let Some(url) = self.profile.urls().get(index) {
            if Browser::is_available() {
                webbrowser::open(url).unwrap_or_default();
            }
        }
    }

    pub fn remember_layout(&mut self, content_height: usize, viewport: usize) {
        self.content_height = content_height;
        self.viewport = viewport;
    }

    fn scroll_down(&mut self, lines: usize) {
        self.scroll
            .scroll_down(lines, self.content_height, self.viewport);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(p) = cli.typo_probability {
        if !(0.0..=1.0).contains(&p) {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                "--typo-probability must be within 0.0..=1.0",
            )
            .exit();
        }
    }

    let store = match &cli.profile {
        Some(path) => FileProfileStore::with_path(path),
        None => FileProfileStore::new(),
    };
    let profile = store.load()?;

    if cli.dump_profile {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let typo_probability = if cli.no_typos {
        Some(0.0)
    } else {
        cli.typo_probability
    };
    let mut app = App::new(profile, cli.speed.factor(), typo_probability, cli.seed)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match runner.step() {
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char('r') => app.remount(),
                KeyCode::Char(' ') | KeyCode::Enter => app.skip(),
                KeyCode::Up => app.scroll.scroll_up(1),
                KeyCode::PageUp => app.scroll.scroll_up(10),
                KeyCode::Down => app.scroll_down(1),
                KeyCode::PageDown => app.scroll_down(10),
                KeyCode::Char(c @ '1'..='9') => {
                    app.open_link(c as usize - '1' as usize);
                }
                _ => {}
            },
        }
    }

    Ok(())
}
