//! Four canonical test maps standing in for an external test-map factory
//! collaborator (obstacle-set construction for test maps is out of scope
//! for the core planner). The exact vertex geometry is this repo's own
//! approximation — gaps are aligned
//! along the start-goal diagonal so every map is solvable with a modest,
//! bounded detour, which is what the integration tests below check for.

use maritime_rrt_pso::{Obstacle, Position, Workspace};

pub const WORKSPACE: Workspace = Workspace {
    x_min: 0.0,
    x_max: 400.0,
    y_min: 0.0,
    y_max: 350.0,
};
pub const START: Position = Position { x: 20.0, y: 20.0 };
pub const GOAL: Position = Position { x: 380.0, y: 330.0 };

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Obstacle {
    vec![
        Position::new(x0, y0),
        Position::new(x1, y0),
        Position::new(x1, y1),
        Position::new(x0, y1),
    ]
}

/// Where the straight line from [`START`] to [`GOAL`] crosses a given x.
fn diagonal_y_at(x: f64) -> f64 {
    START.y + (x - START.x) / (GOAL.x - START.x) * (GOAL.y - START.y)
}

/// Where the straight line from [`START`] to [`GOAL`] crosses a given y.
fn diagonal_x_at(y: f64) -> f64 {
    START.x + (y - START.y) / (GOAL.y - START.y) * (GOAL.x - START.x)
}

/// Map 1: a slalom of four vertical walls, each split around a gap
/// straddling the start-goal diagonal.
pub fn map_slalom() -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for &center_x in &[100.0, 180.0, 260.0, 340.0] {
        let (x0, x1) = (center_x - 10.0, center_x + 10.0);
        let gap_y = diagonal_y_at(center_x);
        let (gap_lo, gap_hi) = (gap_y - 40.0, gap_y + 40.0);
        obstacles.push(rect(x0, WORKSPACE.y_min, x1, gap_lo));
        obstacles.push(rect(x0, gap_hi, x1, WORKSPACE.y_max));
    }
    obstacles
}

/// Map 2: a sampled circle (about 40 vertices) and a regular pentagon.
pub fn map_circle_and_pentagon() -> Vec<Obstacle> {
    let circle_center = Position::new(150.0, 175.0);
    let circle_radius = 60.0;
    let circle: Obstacle = (0..40)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 40.0;
            circle_center + Position::new(circle_radius * angle.cos(), circle_radius * angle.sin())
        })
        .collect();

    let pentagon_center = Position::new(300.0, 175.0);
    let pentagon_radius = 50.0;
    let pentagon: Obstacle = (0..5)
        .map(|i| {
            let angle = std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::TAU / 5.0;
            pentagon_center
                + Position::new(pentagon_radius * angle.cos(), pentagon_radius * angle.sin())
        })
        .collect();

    vec![circle, pentagon]
}

/// Map 3: four parallel horizontal bars, each split around a gap
/// straddling the start-goal diagonal.
pub fn map_horizontal_bars() -> Vec<Obstacle> {
    let mut obstacles = Vec::new();
    for &center_y in &[80.0, 160.0, 240.0, 310.0] {
        let (y0, y1) = (center_y - 10.0, center_y + 10.0);
        let gap_x = diagonal_x_at(center_y);
        let (gap_lo, gap_hi) = (gap_x - 40.0, gap_x + 40.0);
        obstacles.push(rect(WORKSPACE.x_min, y0, gap_lo, y1));
        obstacles.push(rect(gap_hi, y0, WORKSPACE.x_max, y1));
    }
    obstacles
}

/// Map 4: an I-shaped composite of three rectangles, set off to one side
/// of the direct line so the planner must route around it.
pub fn map_i_shape() -> Vec<Obstacle> {
    vec![
        rect(120.0, 60.0, 280.0, 100.0),
        rect(180.0, 100.0, 220.0, 250.0),
        rect(120.0, 250.0, 280.0, 290.0),
    ]
}
