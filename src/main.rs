use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time;
use std::time::Duration;

use anyhow::Context;
use automaton::automaton::Automaton;
use automaton::automaton::Config;
use automaton::camera::Camera;
use automaton::color::Palette;
use automaton::events::AppEvent;
use automaton::events::EngineEvent;
use automaton::events::Event;
use automaton::io::convert_event;
use automaton::seed::Seed;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Stylize;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Run a two-dimensional cellular automaton in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Transition rule: lanes, worms, plane or branches
    #[arg(long, default_value = "worms")]
    rule: String,

    /// Color function: white, gray, sine or ratio
    #[arg(long, default_value = "sine")]
    palette: Palette,

    /// Initial state: top-center, center, noise or noise:<intensity>
    #[arg(long, default_value = "noise:10")]
    seed: Seed,

    /// Seed for the random number generators, for reproducible runs
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Run this many generations without a display and print the final grid
    #[arg(long)]
    headless: Option<u64>,

    /// Append logs to this file. Without it, logs go to stderr in headless mode and are
    /// discarded while the viewer owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            ruleset: self.rule.clone(),
            palette: self.palette,
            seed: self.seed,
            rng_seed: self.rng_seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(LogTarget::from_cli(&cli).writer()?)
        .with_ansi(cli.log_file.is_none())
        .init();

    let mut automaton = Automaton::new(&cli.config()).context("Invalid configuration")?;

    match cli.headless {
        Some(n) => run_headless(&mut automaton, n),
        None => run_viewer(&mut automaton, cli.fps),
    }
}

/// Where logs go. The viewer draws over the whole alternate screen, so writing to stderr while
/// it runs would tear the frame.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    File(PathBuf),
    Stderr,
    Discard,
}

impl LogTarget {
    fn from_cli(cli: &Cli) -> Self {
        match (&cli.log_file, cli.headless) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Some(_)) => LogTarget::Stderr,
            (None, None) => LogTarget::Discard,
        }
    }

    fn writer(&self) -> anyhow::Result<BoxMakeWriter> {
        match self {
            LogTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?;

                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
            LogTarget::Stderr => Ok(BoxMakeWriter::new(io::stderr)),
            LogTarget::Discard => Ok(BoxMakeWriter::new(io::sink)),
        }
    }
}

fn run_headless(automaton: &mut Automaton, n: u64) -> anyhow::Result<()> {
    for _ in 0..n {
        automaton.step();
    }

    info!(
        steps = automaton.steps(),
        live = automaton.grid().live_count(),
        "Finished"
    );

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", automaton.grid())?;
    writeln!(stdout, "Steps: {}", automaton.steps())?;

    Ok(())
}

fn run_viewer(automaton: &mut Automaton, fps: u32) -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = frame_loop(automaton, fps, &mut stdout);

    // Restore the terminal even if the loop failed
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn frame_loop(automaton: &mut Automaton, fps: u32, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    let frametime = Duration::from_secs(1) / fps.max(1);

    let (cols, rows) = terminal::size()?;
    let mut cam = Camera::new(cols, rows);
    let mut paused = false;
    let mut warning: Option<String> = None;

    loop {
        let t = time::Instant::now();

        let mut step_once = !paused;

        // Drain pending input without blocking the frame
        while event::poll(Duration::ZERO)? {
            match convert_event(event::read()?) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => return Ok(()),
                Some(Event::AppEvent(AppEvent::Resize { cols, rows })) => cam.resize(cols, rows),
                Some(Event::EngineEvent(EngineEvent::TogglePause)) => paused = !paused,
                Some(Event::EngineEvent(EngineEvent::Step)) => step_once = true,
            }
        }

        let steps = if step_once {
            let generation = automaton.step();
            if let Some(e) = generation.warning {
                warning = Some(e.to_string());
            }
            generation.steps
        } else {
            automaton.steps()
        };

        cam.reset();
        cam.draw(automaton.grid());
        let s = cam.render();

        queue!(stdout, cursor::MoveTo(0, 0))?;
        for line in s.lines() {
            queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        let overlay = format!("Steps: {steps}");
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(overlay.yellow().on_black())
        )?;
        if let Some(w) = &warning {
            queue!(
                stdout,
                cursor::MoveTo(0, 1),
                style::PrintStyledContent(w.as_str().red().on_black())
            )?;
        }
        stdout.flush()?;

        thread::sleep(frametime.saturating_sub(t.elapsed()));
    }
}
