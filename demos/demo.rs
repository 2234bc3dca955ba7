//! Visual driver for the planner: runs one `plan()` call against a
//! chosen obstacle map and renders the workspace, obstacles, and the
//! resulting path.
//!
//! ## Usage
//! ```bash
//! cargo run --example demo -- --map slalom --seed 1
//! ```

use clap::{Parser, ValueEnum};
use macroquad::prelude::*;

use maritime_rrt_pso::{plan, Obstacle, PlannerConfig, Position, Workspace};

const WORKSPACE: Workspace = Workspace {
    x_min: 0.0,
    x_max: 400.0,
    y_min: 0.0,
    y_max: 350.0,
};
const START: Position = Position { x: 20.0, y: 20.0 };
const GOAL: Position = Position { x: 380.0, y: 330.0 };

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Map {
    Slalom,
    CircleAndPentagon,
    HorizontalBars,
    IShape,
    Empty,
}

#[derive(Parser, Debug)]
struct Args {
    /// Which canonical obstacle map to plan across.
    #[arg(long, value_enum, default_value_t = Map::Slalom)]
    map: Map,

    /// RNG seed passed to `PlannerConfig`.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum RRT* iterations.
    #[arg(long, default_value_t = 3000)]
    max_iterations: u32,
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Obstacle {
    vec![
        Position::new(x0, y0),
        Position::new(x1, y0),
        Position::new(x1, y1),
        Position::new(x0, y1),
    ]
}

fn diagonal_y_at(x: f64) -> f64 {
    START.y + (x - START.x) / (GOAL.x - START.x) * (GOAL.y - START.y)
}

fn diagonal_x_at(y: f64) -> f64 {
    START.x + (y - START.y) / (GOAL.y - START.y) * (GOAL.x - START.x)
}

fn map_slalom() -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for &center_x in &[100.0, 180.0, 260.0, 340.0] {
        let (x0, x1) = (center_x - 10.0, center_x + 10.0);
        let gap_y = diagonal_y_at(center_x);
        obstacles.push(rect(x0, WORKSPACE.y_min, x1, gap_y - 40.0));
        obstacles.push(rect(x0, gap_y + 40.0, x1, WORKSPACE.y_max));
    }
    obstacles
}

fn map_circle_and_pentagon() -> Vec<Obstacle> {
    let circle_center = Position::new(150.0, 175.0);
    let circle: Obstacle = (0..40)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 40.0;
            circle_center + Position::new(60.0 * angle.cos(), 60.0 * angle.sin())
        })
        .collect();

    let pentagon_center = Position::new(300.0, 175.0);
    let pentagon: Obstacle = (0..5)
        .map(|i| {
            let angle = std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::TAU / 5.0;
            pentagon_center + Position::new(50.0 * angle.cos(), 50.0 * angle.sin())
        })
        .collect();

    vec![circle, pentagon]
}

fn map_horizontal_bars() -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for &center_y in &[80.0, 160.0, 240.0, 310.0] {
        let (y0, y1) = (center_y - 10.0, center_y + 10.0);
        let gap_x = diagonal_x_at(center_y);
        obstacles.push(rect(WORKSPACE.x_min, y0, gap_x - 40.0, y1));
        obstacles.push(rect(gap_x + 40.0, y0, WORKSPACE.x_max, y1));
    }
    obstacles
}

fn map_i_shape() -> Vec<Obstacle> {
    vec![
        rect(120.0, 60.0, 280.0, 100.0),
        rect(180.0, 100.0, 220.0, 250.0),
        rect(120.0, 250.0, 280.0, 290.0),
    ]
}

fn obstacles_for(map: Map) -> Vec<Obstacle> {
    match map {
        Map::Slalom => map_slalom(),
        Map::CircleAndPentagon => map_circle_and_pentagon(),
        Map::HorizontalBars => map_horizontal_bars(),
        Map::IShape => map_i_shape(),
        Map::Empty => Vec::new(),
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "RRT* + PSO path planner".to_string(),
        window_width: 800,
        window_height: 700,
        window_resizable: false,
        fullscreen: false,
        ..Default::default()
    }
}

/// Workspace units map to screen pixels at this scale, with a fixed margin.
const SCALE: f32 = 2.0;
const MARGIN: f32 = 20.0;

fn to_screen(p: Position) -> (f32, f32) {
    (MARGIN + p.x as f32 * SCALE, MARGIN + p.y as f32 * SCALE)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    let obstacles = obstacles_for(args.map);

    let mut config = PlannerConfig::default();
    config.seed = Some(args.seed);
    config.max_iterations = args.max_iterations;

    log::info!("planning across {:?} with seed {}", args.map, args.seed);
    let outcome = match plan(START, GOAL, obstacles.clone(), WORKSPACE, config) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("planning failed: {err}");
            return;
        }
    };

    loop {
        clear_background(WHITE);

        for obstacle in &obstacles {
            for i in 0..obstacle.len() {
                let a = to_screen(obstacle[i]);
                let b = to_screen(obstacle[(i + 1) % obstacle.len()]);
                draw_line(a.0, a.1, b.0, b.1, 2.0, BLACK);
            }
        }

        let start_screen = to_screen(START);
        let goal_screen = to_screen(GOAL);
        draw_circle(start_screen.0, start_screen.1, 5.0, BLUE);
        draw_circle(goal_screen.0, goal_screen.1, 5.0, GREEN);

        for pair in outcome.path.windows(2) {
            let a = to_screen(pair[0]);
            let b = to_screen(pair[1]);
            draw_line(a.0, a.1, b.0, b.1, 2.0, RED);
        }

        let status = if outcome.path.is_empty() {
            "no path found".to_string()
        } else {
            format!(
                "cost {:.1}  iterations {}  nodes {}",
                outcome.cost, outcome.stats.iterations_executed, outcome.stats.nodes_explored
            )
        };
        draw_text(&status, MARGIN, 690.0, 20.0, BLACK);

        next_frame().await;
    }
}
