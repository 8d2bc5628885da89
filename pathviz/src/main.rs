//! pathviz: draw walls, place two endpoints, and watch A* find the way.

use std::error::Error;
use std::thread;
use std::time::Duration;

use pathviz_core::{CancelToken, Grid};
use pathviz_crossterm::{CELL_COLUMNS, Msg, TerminalDriver};
use pathviz_lib::colors::cell_color;
use pathviz_lib::{Command, Config, LogStyle, Model};
use pathviz_paths::SearchEvent;
use rand::RngExt;

const STATUS_LINES: usize = 3;
const POLL_INTERVAL: Duration = Duration::from_millis(16);
const HELP: &str =
    "left click: start, end, walls | right click: erase | space: search | r: maze | c: clear | q: quit";

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut model = Model::new(config.grid()?, seed);
    model.log_mut().log(HELP);
    log::debug!("pathviz: {config:?}, maze seed {seed}");

    let mut driver = TerminalDriver::new(config.rows);
    driver.init()?;
    let result = run(&mut model, &mut driver, &config);
    driver.close();
    result
}

fn redraw(model: &Model, driver: &mut TerminalDriver) -> Result<(), Box<dyn Error>> {
    let width = (model.grid().rows() * CELL_COLUMNS) as usize;
    driver.draw_grid(model.grid(), cell_color)?;
    driver.draw_status(&model.log().recent_lines(width, STATUS_LINES))
}

fn run(model: &mut Model, driver: &mut TerminalDriver, config: &Config) -> Result<(), Box<dyn Error>> {
    let token = CancelToken::new();
    let mut msgs: Vec<Msg> = Vec::new();
    redraw(model, driver)?;

    loop {
        driver.poll_msgs(POLL_INTERVAL, &mut msgs)?;
        if msgs.is_empty() {
            continue;
        }
        for msg in msgs.drain(..) {
            match model.update(msg) {
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(Command::Search)) => animate(model, driver, &token, config.frame_delay())?,
                Ok(None) => {}
                Err(e) => model.log_mut().log_styled(&e.to_string(), LogStyle::Error),
            }
        }
        redraw(model, driver)?;
    }
}

/// Run a search, drawing every frame and cancelling on `q`/`Esc`.
fn animate(
    model: &mut Model,
    driver: &mut TerminalDriver,
    token: &CancelToken,
    delay: Duration,
) -> Result<(), Box<dyn Error>> {
    token.reset();
    let mut failure: Option<Box<dyn Error>> = None;
    let mut pending: Vec<Msg> = Vec::new();

    let mut sink = |grid: &Grid, _: SearchEvent| {
        if failure.is_some() {
            return;
        }
        let step = driver
            .draw_grid(grid, cell_color)
            .and_then(|()| driver.poll_msgs(Duration::ZERO, &mut pending));
        match step {
            Ok(()) => {
                if pending.drain(..).any(|m| m.is_quit()) {
                    token.cancel();
                }
            }
            Err(e) => {
                failure = Some(e);
                token.cancel();
            }
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    };
    model.search(&mut sink, token)?;

    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
