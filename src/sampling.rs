//! The adaptive sampler: five weighted strategies, and the schedule that
//! shifts their weights as planning progresses.
//!
//! Generalizes a single goal-biased uniform draw into a five-way
//! weighted mixture whose weights evolve with iteration count and
//! path-set occupancy.

use rand::Rng;

use crate::geometry::{point_to_polygon_distance, Obstacle, Position, Workspace};
use crate::path::PathSet;
use crate::tree::Tree;

const DENSITY_GRID_SIZE: usize = 20;
const NARROW_MAX_ATTEMPTS: u32 = 50;
const WEIGHT_TOLERANCE: f64 = 1e-9;

/// The five non-negative sampling weights, always summing to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingWeights {
    pub goal: f64,
    pub density: f64,
    pub narrow: f64,
    pub path: f64,
    pub uniform: f64,
}

impl SamplingWeights {
    /// Initial weights before any path has been found.
    pub fn initial() -> Self {
        Self {
            goal: 0.10,
            density: 0.20,
            narrow: 0.15,
            path: 0.00,
            uniform: 0.55,
        }
    }

    /// Weights at iteration `k` of `max_iterations`, once the path set is
    /// non-empty.
    pub fn scheduled(k: u32, max_iterations: u32) -> Self {
        let frac = k as f64 / max_iterations.max(1) as f64;
        let goal = 0.05;
        let density = (0.15 - 0.10 * frac).max(0.0);
        let narrow = (0.10 - 0.05 * frac).max(0.0);
        let path = 0.30 + 0.20 * frac;
        let uniform = (1.0 - (goal + density + narrow + path)).max(0.0);
        Self {
            goal,
            density,
            narrow,
            path,
            uniform,
        }
    }

    /// Weights for iteration `k`, dispatching between the initial and
    /// scheduled regimes depending on whether the path set is empty.
    /// `w_path` is forced to zero while the path set is empty, per the
    /// sampling-weights invariant.
    pub fn for_iteration(k: u32, max_iterations: u32, paths_empty: bool) -> Self {
        if paths_empty {
            Self::initial()
        } else {
            Self::scheduled(k, max_iterations)
        }
    }

    pub fn sum(&self) -> f64 {
        self.goal + self.density + self.narrow + self.path + self.uniform
    }

    pub fn is_valid(&self) -> bool {
        self.goal >= 0.0
            && self.density >= 0.0
            && self.narrow >= 0.0
            && self.path >= 0.0
            && self.uniform >= 0.0
            && (self.sum() - 1.0).abs() < WEIGHT_TOLERANCE
    }
}

/// Everything the sampler needs to read from the planner's current state.
pub struct SampleContext<'a> {
    pub workspace: &'a Workspace,
    pub obstacles: &'a [Obstacle],
    pub start_tree: &'a Tree,
    pub goal_tree: &'a Tree,
    pub start: Position,
    pub goal: Position,
    pub paths: &'a PathSet,
}

pub struct AdaptiveSampler;

impl AdaptiveSampler {
    /// Draws one candidate, clamped to the workspace rectangle.
    pub fn sample(
        &self,
        rng: &mut impl Rng,
        ctx: &SampleContext,
        weights: &SamplingWeights,
    ) -> Position {
        let u: f64 = rng.gen_range(0.0..1.0);
        let goal_edge = weights.goal;
        let density_edge = goal_edge + weights.density;
        let narrow_edge = density_edge + weights.narrow;
        let path_edge = narrow_edge + weights.path;

        let raw = if u < goal_edge {
            Self::goal_bias(rng, ctx)
        } else if u < density_edge {
            Self::density_aware(rng, ctx)
        } else if u < narrow_edge {
            Self::narrow_passage(rng, ctx)
        } else if u < path_edge {
            if ctx.paths.is_empty() {
                Self::uniform(rng, ctx.workspace)
            } else {
                Self::path_guided(rng, ctx)
            }
        } else {
            Self::uniform(rng, ctx.workspace)
        };
        raw.clamp_to(ctx.workspace)
    }

    fn goal_bias(rng: &mut impl Rng, ctx: &SampleContext) -> Position {
        let root = if rng.gen_bool(0.5) { ctx.start } else { ctx.goal };
        let ux: f64 = rng.gen_range(-0.5..0.5);
        let uy: f64 = rng.gen_range(-0.5..0.5);
        root + Position::new(0.1 * ux * ux, 0.1 * uy * uy)
    }

    fn density_aware(rng: &mut impl Rng, ctx: &SampleContext) -> Position {
        let ws = ctx.workspace;
        let cell_w = ws.width() / DENSITY_GRID_SIZE as f64;
        let cell_h = ws.height() / DENSITY_GRID_SIZE as f64;

        let mut counts = [[0u32; DENSITY_GRID_SIZE]; DENSITY_GRID_SIZE];
        let mut record = |p: Position| {
            let ix = (((p.x - ws.x_min) / cell_w) as usize).min(DENSITY_GRID_SIZE - 1);
            let iy = (((p.y - ws.y_min) / cell_h) as usize).min(DENSITY_GRID_SIZE - 1);
            counts[iy][ix] += 1;
        };
        for r in 0..ctx.start_tree.len() {
            record(ctx.start_tree.position(r));
        }
        for r in 0..ctx.goal_tree.len() {
            record(ctx.goal_tree.position(r));
        }

        let max_count = counts.iter().flatten().copied().max().unwrap_or(0);
        let mut mass = Vec::with_capacity(DENSITY_GRID_SIZE * DENSITY_GRID_SIZE);
        let mut total = 0.0;
        for iy in 0..DENSITY_GRID_SIZE {
            for ix in 0..DENSITY_GRID_SIZE {
                let inverse = (max_count + 1 - counts[iy][ix]) as f64;
                total += inverse;
                mass.push((ix, iy, inverse));
            }
        }

        let mut u: f64 = rng.gen_range(0.0..1.0) * total;
        let mut chosen = (0, 0);
        for (ix, iy, w) in &mass {
            if u < *w {
                chosen = (*ix, *iy);
                break;
            }
            u -= w;
        }

        let (ix, iy) = chosen;
        let cell_x0 = ws.x_min + ix as f64 * cell_w;
        let cell_y0 = ws.y_min + iy as f64 * cell_h;
        Position::new(
            rng.gen_range(cell_x0..cell_x0 + cell_w),
            rng.gen_range(cell_y0..cell_y0 + cell_h),
        )
    }

    fn narrow_passage(rng: &mut impl Rng, ctx: &SampleContext) -> Position {
        for _ in 0..NARROW_MAX_ATTEMPTS {
            let candidate = Self::uniform(rng, ctx.workspace);
            if ctx.obstacles.is_empty() {
                break;
            }
            let dist = ctx
                .obstacles
                .iter()
                .map(|o| point_to_polygon_distance(&candidate, o))
                .fold(f64::INFINITY, f64::min);
            if dist > 0.0 && dist <= 30.0 {
                return candidate;
            }
        }
        Self::uniform(rng, ctx.workspace)
    }

    fn path_guided(rng: &mut impl Rng, ctx: &SampleContext) -> Position {
        let path = ctx
            .paths
            .random_path(rng)
            .expect("path-guided strategy only called with a non-empty path set");
        let segments = path.points.len() - 1;
        let seg = rng.gen_range(0..segments);
        let t: f64 = rng.gen_range(0.0..1.0);
        let a = path.points[seg];
        let b = path.points[seg + 1];
        let base = a + (b - a) * t;

        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let magnitude: f64 = 20.0 * rng.gen_range(-0.5..0.5);
        base + Position::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    fn uniform(rng: &mut impl Rng, ws: &Workspace) -> Position {
        Position::new(
            rng.gen_range(ws.x_min..=ws.x_max),
            rng.gen_range(ws.y_min..=ws.y_max),
        )
    }
}
