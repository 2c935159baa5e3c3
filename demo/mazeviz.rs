//! Terminal maze generation and pathfinding visualiser.
//!
//! Run: cargo run --bin mazeviz -- --maze prim --algorithm bi-astar

use std::cell::RefCell;
use std::error::Error;
use std::time::Duration;

use clap::Parser;
use gridmaze_core::{CancelToken, Throttle, drive};
use gridmaze_demo::screen::Screen;
use gridmaze_demo::{MIN_SIDE, fit_dimensions, maze_run, pather, place_endpoints};
use gridmaze_mazes::{MazeAlgorithm, carve};
use gridmaze_paths::{Algorithm, PathFinder, ReplayPlan, apply_frame};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

#[derive(Parser, Debug)]
#[command(version, about = "Animate maze generation and pathfinding in the terminal")]
struct Args {
    /// Grid width, clamped to the terminal
    #[arg(short = 'W', long, default_value_t = 61)]
    width: i32,

    /// Grid height, clamped to the terminal
    #[arg(short = 'H', long, default_value_t = 31)]
    height: i32,

    /// Maze generator: backtracker, prim, bsp or cave
    #[arg(short, long, default_value_t = MazeAlgorithm::Backtracker)]
    maze: MazeAlgorithm,

    /// Search strategy: dfs, greedy-dfs, bfs, greedy, dijkstra, astar,
    /// bi-bfs, bi-astar or jps
    #[arg(short, long, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Allow diagonal moves
    #[arg(short, long)]
    diagonal: bool,

    /// Random seed; drawn at random when absent
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause between animation frames
    #[arg(long, default_value_t = 15)]
    delay_ms: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let delay = Duration::from_millis(args.delay_ms);

    let area = Screen::grid_area()?;
    let Some((width, height)) = fit_dimensions(args.width, args.height, area) else {
        return Err(format!(
            "terminal too small: {}x{} cells free, need {MIN_SIDE}x{MIN_SIDE}",
            area.0, area.1
        )
        .into());
    };
    log::info!(
        "{}x{} {} maze, {} search, seed {seed}",
        width,
        height,
        args.maze,
        args.algorithm
    );

    let (mut grid, run) = maze_run(width, height, args.maze, seed);
    let screen = RefCell::new(Screen::open()?);
    let token = CancelToken::new();
    let throttle = Throttle::for_grid(width, height);
    screen.borrow_mut().draw_grid(&grid);

    let carved = drive(
        run,
        throttle,
        &token,
        || screen.borrow_mut().frame(delay, &token),
        |step| {
            carve(&mut grid, &step);
            let mut s = screen.borrow_mut();
            for c in step.cells_to_carve {
                if let Some(state) = grid.state(c) {
                    s.paint(c, state);
                }
            }
        },
    );
    let mut screen = screen.into_inner();
    screen.check()?;
    if carved.is_cancelled() {
        return Ok(());
    }

    let Some((start, end)) = place_endpoints(&mut grid) else {
        screen.status(height, 0, "maze has fewer than two passage cells; press a key");
        screen.wait_key()?;
        return Ok(());
    };
    screen.draw_grid(&grid);

    let pather = pather(args.diagonal);
    let mut finder = PathFinder::new(StdRng::seed_from_u64(seed.wrapping_add(1)));
    let result = finder.solve(args.algorithm, grid.snapshot(), start, end, &pather);
    let summary = if result.found {
        format!(
            "{}: {} visited, path of {} cells, cost {:.2}",
            args.algorithm,
            result.visited.len(),
            result.path.len(),
            result.path_cost(pather.distance)
        )
    } else {
        format!("{}: no path, {} visited", args.algorithm, result.visited.len())
    };

    let plan = ReplayPlan::from_result(&result);
    let screen = RefCell::new(screen);
    let replayed = drive(
        plan,
        throttle,
        &token,
        || screen.borrow_mut().frame(delay, &token),
        |frame| {
            if apply_frame(&mut grid, frame) {
                screen.borrow_mut().paint(frame.cell, frame.state);
            }
        },
    );
    let mut screen = screen.into_inner();
    screen.check()?;
    if replayed.is_cancelled() {
        return Ok(());
    }

    screen.status(height, 0, &summary);
    screen.status(height, 1, "press any key to quit");
    screen.wait_key()?;
    Ok(())
}
