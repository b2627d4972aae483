mod ui;

use std::{
    fs::{self, OpenOptions},
    io::{self, stdin},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use typepace::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    game::{Game, GameKind},
    runtime::{AppEvent, CrosstermEventSource, Runner, SchedulerTicker},
    scheduler::{IntervalScheduler, TimerId},
    texts::{self, Difficulty, Level},
    Keystroke, Outcome, Status, TypingSession,
};

/// Longest the loop sleeps between redraws when no timer is due sooner
const IDLE_REDRAW_MS: u64 = 100;

/// strict-mode typing practice: mistakes are rejected, not recorded
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// timed or text-completion practice test (default)
    Practice {
        /// difficulty of the practice paragraph
        #[clap(short = 'l', long, value_enum)]
        level: Option<Level>,

        /// number of seconds to run the test
        #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
        secs: Option<u64>,

        /// run until the text is fully typed instead of against a countdown
        #[clap(long, conflicts_with = "secs")]
        no_timer: bool,

        /// custom text to type
        #[clap(short = 'p', long, value_parser = non_empty_text)]
        prompt: Option<String>,
    },
    /// play one of the typing games
    Game {
        #[clap(value_enum)]
        kind: GameKind,

        #[clap(short = 'd', long, value_enum)]
        difficulty: Option<Difficulty>,
    },
    /// print the built-in practice paragraphs and exit
    Texts {
        #[clap(short = 'l', long, value_enum)]
        level: Option<Level>,
    },
}

fn non_empty_text(s: &str) -> Result<String, String> {
    if s.is_empty() {
        Err("text to type must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Debug)]
pub enum Mode {
    Practice {
        session: TypingSession,
        prompt: String,
        duration_secs: Option<u64>,
    },
    Game(Box<Game>),
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    scheduler: IntervalScheduler,
    difficulty: Difficulty,
    /// Outcome of the latest keystroke, used to flag rejected keys
    last_outcome: Option<Outcome>,
}

impl App {
    fn practice(prompt: String, duration_secs: Option<u64>) -> Self {
        let (session, scheduler) = TypingSession::with_system_clock();
        Self {
            mode: Mode::Practice {
                session,
                prompt,
                duration_secs,
            },
            scheduler,
            difficulty: Difficulty::default(),
            last_outcome: None,
        }
    }

    fn game(kind: GameKind, difficulty: Difficulty) -> Result<Self> {
        let scheduler = IntervalScheduler::new(SystemClock);
        let session = TypingSession::new(SystemClock, scheduler.clone());
        let game = Game::start(kind, difficulty, session)?;
        Ok(Self {
            mode: Mode::Game(Box::new(game)),
            scheduler,
            difficulty,
            last_outcome: None,
        })
    }

    fn on_key(&mut self, keystroke: Keystroke) -> Result<()> {
        let report = match &mut self.mode {
            Mode::Practice {
                session,
                prompt,
                duration_secs,
            } => {
                // the countdown starts with the first keystroke
                if session.status() == Status::Idle {
                    session.start(prompt, *duration_secs)?;
                }
                session.submit_keystroke(keystroke)
            }
            Mode::Game(game) => game.submit_keystroke(keystroke),
        };
        self.last_outcome = Some(report.outcome);
        Ok(())
    }

    fn on_timer(&mut self, id: TimerId) {
        match &mut self.mode {
            Mode::Practice { session, .. } => {
                session.on_timer(id);
            }
            Mode::Game(game) => {
                game.on_timer(id);
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        match &mut self.mode {
            Mode::Practice { session, .. } => session.reset(),
            Mode::Game(game) => {
                game.abandon();
                let kind = game.kind();
                let session = TypingSession::new(SystemClock, self.scheduler.clone());
                self.mode = Mode::Game(Box::new(Game::start(kind, self.difficulty, session)?));
            }
        }
        self.last_outcome = None;
        info!("restarted");
        Ok(())
    }
}

fn init_logging() -> Result<()> {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Texts { level }) = &cli.command {
        let levels = match level {
            Some(level) => vec![*level],
            None => vec![Level::Beginner, Level::Intermediate, Level::Advanced],
        };
        for level in levels {
            println!("{}: {}", level, texts::practice_text(level));
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err:#}");
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    let app = build_app(cli.command, &mut config)?;
    if let Err(err) = store.save(&config) {
        warn!("could not save config: {err}");
    }

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, app);

    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leaving alternate screen")?;
    terminal.show_cursor()?;

    outcome
}

/// Applies CLI overrides to the stored config and builds the app they describe
fn build_app(command: Option<Command>, config: &mut Config) -> Result<App> {
    match command {
        Some(Command::Game { kind, difficulty }) => {
            if let Some(difficulty) = difficulty {
                config.difficulty = difficulty;
            }
            App::game(kind, config.difficulty)
        }
        Some(Command::Practice {
            level,
            secs,
            no_timer,
            prompt,
        }) => {
            if let Some(level) = level {
                config.level = level;
            }
            if no_timer {
                config.duration_secs = None;
            } else if secs.is_some() {
                config.duration_secs = secs;
            }
            let prompt =
                prompt.unwrap_or_else(|| texts::practice_text(config.level).to_string());
            Ok(App::practice(prompt, config.duration_secs))
        }
        Some(Command::Texts { .. }) | None => Ok(App::practice(
            texts::practice_text(config.level).to_string(),
            config.duration_secs,
        )),
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        SchedulerTicker::new(
            app.scheduler.clone(),
            Duration::from_millis(IDLE_REDRAW_MS),
        ),
    );

    loop {
        terminal.draw(|f| f.render_widget(&app, f.area()))?;

        let step = runner.step();
        for id in step.due {
            app.on_timer(id);
        }

        let Some(AppEvent::Key(key)) = step.event else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if key.code == KeyCode::Esc || is_ctrl(&key, 'c') {
            break;
        }
        if is_ctrl(&key, 'r') {
            app.restart()?;
            continue;
        }
        app.on_key(key.into())?;
    }

    Ok(())
}
