//! Particle-swarm refinement of a single path's interior waypoints.
//!
//! The particle/velocity vector math reuses `Position`'s operator
//! overloads; the update equations are the standard PSO inertia /
//! cognitive / social form.

use rand::Rng;

use crate::geometry::{point_in_polygon, segment_collision_free, Obstacle, Position, Workspace};
use crate::path::Path;

const PROJECTION_RADII: [f64; 10] = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0];
const PROJECTION_ANGLE_STEPS: usize = 16;

pub struct PsoRefiner {
    pub particles: usize,
    pub iterations: u32,
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

struct Particle {
    position: Vec<Position>,
    velocity: Vec<Position>,
    pbest: Vec<Position>,
    pbest_cost: f64,
}

impl PsoRefiner {
    /// Refines `path` in place. Leaves the path untouched if no feasible
    /// interior configuration is ever found, or if the path has no
    /// interior waypoints to optimize.
    pub fn refine(
        &self,
        path: &mut Path,
        workspace: &Workspace,
        obstacles: &[Obstacle],
        rng: &mut impl Rng,
    ) {
        let m = path.interior_len();
        if m == 0 {
            return;
        }
        let start = path.start();
        let goal = path.goal();
        let initial_interior = path.points[1..path.points.len() - 1].to_vec();
        // The path entering refinement is itself a candidate: seeding
        // gbest with it (rather than +infinity) guarantees refinement
        // can only improve or tie the incumbent, never regress it.
        let incumbent_cost = path_cost(start, goal, &initial_interior, obstacles);

        let mut particles: Vec<Particle> = Vec::with_capacity(self.particles);
        let mut gbest: Vec<Position> = initial_interior.clone();
        let mut gbest_cost = incumbent_cost;

        for _ in 0..self.particles {
            let position: Vec<Position> = initial_interior
                .iter()
                .map(|p| {
                    let offset = Position::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
                    project_to_free_space(*p + offset, workspace, obstacles)
                })
                .collect();
            let velocity: Vec<Position> = (0..m)
                .map(|_| Position::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect();
            let cost = path_cost(start, goal, &position, obstacles);

            // Floor this particle's personal best at the incumbent so a
            // particle that starts out worse than the untouched path
            // still pulls itself (and gbest) back toward it.
            let (pbest, pbest_cost) = if cost < incumbent_cost {
                (position.clone(), cost)
            } else {
                (initial_interior.clone(), incumbent_cost)
            };
            if pbest_cost < gbest_cost {
                gbest_cost = pbest_cost;
                gbest = pbest.clone();
            }
            particles.push(Particle {
                pbest,
                pbest_cost,
                position,
                velocity,
            });
        }

        for _ in 0..self.iterations {
            for particle in particles.iter_mut() {
                for j in 0..m {
                    let r1 = Position::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
                    let r2 = Position::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));

                    let cognitive_pull = component_mul(particle.pbest[j] - particle.position[j], r1);
                    let social_pull = component_mul(gbest[j] - particle.position[j], r2);

                    particle.velocity[j] = particle.velocity[j] * self.inertia
                        + cognitive_pull * self.cognitive
                        + social_pull * self.social;
                    particle.position[j] = particle.position[j] + particle.velocity[j];
                    particle.position[j] =
                        project_to_free_space(particle.position[j], workspace, obstacles);

                    let cost = path_cost(start, goal, &particle.position, obstacles);
                    if cost < particle.pbest_cost {
                        particle.pbest_cost = cost;
                        particle.pbest = particle.position.clone();
                    }
                    if cost < gbest_cost {
                        gbest_cost = cost;
                        gbest = particle.position.clone();
                    }
                }
            }
        }

        if gbest_cost.is_finite() {
            let mut points = Vec::with_capacity(m + 2);
            points.push(start);
            points.extend(gbest);
            points.push(goal);
            path.points = points;
        }
    }
}

fn component_mul(p: Position, r: Position) -> Position {
    Position::new(p.x * r.x, p.y * r.y)
}

fn path_cost(start: Position, goal: Position, interior: &[Position], obstacles: &[Obstacle]) -> f64 {
    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(start);
    points.extend_from_slice(interior);
    points.push(goal);

    let mut total = 0.0;
    for pair in points.windows(2) {
        if !segment_collision_free(&pair[0], &pair[1], obstacles) {
            return f64::INFINITY;
        }
        total += pair[0].distance_to(&pair[1]);
    }
    total
}

/// Clamps `p` to the workspace; if it is not inside any obstacle, returns
/// it unchanged. Otherwise scans a grid of radii and angles for the first
/// nearby free point, falling back to the clamped input if none is found.
fn project_to_free_space(p: Position, workspace: &Workspace, obstacles: &[Obstacle]) -> Position {
    let clamped = p.clamp_to(workspace);
    if !obstacles.iter().any(|o| point_in_polygon(&clamped, o)) {
        return clamped;
    }
    for radius in PROJECTION_RADII {
        for step in 0..PROJECTION_ANGLE_STEPS {
            let angle = step as f64 * std::f64::consts::TAU / PROJECTION_ANGLE_STEPS as f64;
            let candidate = clamped + Position::new(radius * angle.cos(), radius * angle.sin());
            if workspace.contains(&candidate) && !obstacles.iter().any(|o| point_in_polygon(&candidate, o)) {
                return candidate;
            }
        }
    }
    clamped
}
