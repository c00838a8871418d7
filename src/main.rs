//! Runs the board in the terminal until `q`, `Esc` or `Ctrl-C`. Space pauses.
//!
//! Logs are written to stderr, which shares the terminal with the frame. Filter them with
//! `RUST_LOG` and redirect them with `2>life.log` to keep the board clean.

use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use torus_life::camera::Camera;
use torus_life::config::Config;
use torus_life::events::Event;
use torus_life::grid::Grid;
use torus_life::io::convert_event;
use torus_life::presenter::Presenter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never land in the middle of a frame. Redirect with `2>life.log`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().context("Failed to read configuration")?;
    let seed = config.seed.unwrap_or_else(clock_seed);

    info!(?config, seed, "starting");

    let mut grid = Grid::initialize(config.rows, config.columns, config.alive_probability, seed)
        .context("Failed to create grid")?;
    let presenter = Presenter::new(config.fps)?;
    let mut cam = Camera::for_grid(&grid);

    let (cols, rows) = terminal::size()?;
    let (need_cols, need_rows) = (cam.width().div_ceil(2), cam.height().div_ceil(4) + 1);
    if (cols as usize) < need_cols || (rows as usize) < need_rows {
        warn!(cols, rows, need_cols, need_rows, "terminal is smaller than the board");
    }

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = run(&mut grid, presenter, &mut cam, &mut stdout);

    // Restore the terminal whether or not the loop failed
    let restored = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)
        .and_then(|_| terminal::disable_raw_mode());

    res?;
    restored?;

    info!(generation = grid.generation(), "exiting");

    Ok(())
}

/// Draw, poll, tick, then sleep off whatever is left of the frame.
fn run(
    grid: &mut Grid,
    presenter: Presenter,
    cam: &mut Camera,
    stdout: &mut io::Stdout,
) -> anyhow::Result<()> {
    let mut paused = false;

    loop {
        let t = Instant::now();

        presenter.draw(grid, cam);
        present(stdout, cam.render(), grid, paused)?;

        // Drain every pending event without blocking
        while event::poll(Duration::ZERO)? {
            let Some(event) = convert_event(event::read()?) else {
                continue;
            };

            match event {
                Event::Exit => return Ok(()),
                Event::TogglePause => {
                    paused = !paused;
                    debug!(paused, "toggled pause");
                }
                Event::Resize { cols, rows } => {
                    debug!(cols, rows, "terminal resized");
                }
            }

            if event.forces_redraw() {
                execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
            }
        }

        if !paused {
            grid.tick();
        }

        thread::sleep(presenter.time_left(t.elapsed()));
    }
}

fn present(stdout: &mut io::Stdout, frame: &str, grid: &Grid, paused: bool) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    let status = format!(
        "generation {} | population {}{}",
        grid.generation(),
        grid.population(),
        if paused { " | paused" } else { "" }
    );

    queue!(
        stdout,
        style::Print(status),
        terminal::Clear(terminal::ClearType::UntilNewLine)
    )?;

    stdout.flush()
}

/// A seed for runs that did not ask for one. It is logged at startup so the run can be replayed.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
