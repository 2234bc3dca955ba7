//! The planner orchestrator: alternates the two trees, drives sampling,
//! RRT* expansion, cross-tree connection and periodic PSO refinement.
//!
//! Follows the same solve/run_iterations loop shape as a plain single-tree
//! RRT, extended with tree alternation, a shared path set, and a
//! scheduled refinement pass.

use rand::{rngs::StdRng, SeedableRng};

use crate::config::{PlannerConfig, PlannerStats, TreeLabel};
use crate::connector;
use crate::error::PlanError;
use crate::geometry::{point_in_polygon, Obstacle, Position, Workspace};
use crate::path::{Path, PathSet};
use crate::pso::PsoRefiner;
use crate::rrt_star::RrtStarEngine;
use crate::sampling::{AdaptiveSampler, SampleContext, SamplingWeights};
use crate::tree::Tree;

const ENDPOINT_EQUALITY_TOLERANCE: f64 = 1e-9;

/// The result of a `plan()` call: the best path found (empty if none),
/// its cost (`+infinity` if none), and run statistics.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub path: Vec<Position>,
    pub cost: f64,
    pub stats: PlannerStats,
}

pub fn plan(
    start: Position,
    goal: Position,
    obstacles: Vec<Obstacle>,
    workspace: Workspace,
    config: PlannerConfig,
) -> Result<PlanOutcome, PlanError> {
    validate(&start, &goal, &obstacles, &workspace, &config)?;

    let mut stats = PlannerStats::default();

    if start.distance_to(&goal) < ENDPOINT_EQUALITY_TOLERANCE {
        stats.iterations_executed = 1;
        stats.paths_found = 1;
        stats.nodes_explored = 2;
        log::info!("start equals goal; returning trivial zero-cost path");
        return Ok(PlanOutcome {
            path: vec![start, goal],
            cost: 0.0,
            stats,
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut start_tree = Tree::new(TreeLabel::Start, start);
    let mut goal_tree = Tree::new(TreeLabel::Goal, goal);
    let mut paths = PathSet::new();
    let mut best: Option<Path> = None;

    let rrt_engine = RrtStarEngine::new(config.step_size, config.gamma);
    let sampler = AdaptiveSampler;
    let pso = PsoRefiner {
        particles: config.pso_particles,
        iterations: config.pso_iterations,
        inertia: config.pso_inertia,
        cognitive: config.pso_cognitive,
        social: config.pso_social,
    };

    log::info!(
        "planning started: max_iterations={} step_size={}",
        config.max_iterations,
        config.step_size
    );

    for k in 1..=config.max_iterations {
        let active_label = if k % 2 == 0 {
            TreeLabel::Start
        } else {
            TreeLabel::Goal
        };

        let weights = SamplingWeights::for_iteration(k, config.max_iterations, paths.is_empty());

        let x_rand = {
            let ctx = SampleContext {
                workspace: &workspace,
                obstacles: &obstacles,
                start_tree: &start_tree,
                goal_tree: &goal_tree,
                start,
                goal,
                paths: &paths,
            };
            sampler.sample(&mut rng, &ctx, &weights)
        };

        let (active, opposite): (&mut Tree, &mut Tree) = match active_label {
            TreeLabel::Start => (&mut start_tree, &mut goal_tree),
            TreeLabel::Goal => (&mut goal_tree, &mut start_tree),
        };

        if let Some(new_node) = rrt_engine.expand(active, x_rand, &obstacles) {
            if let Some(found) =
                connector::try_connect(active, new_node, opposite, config.connection_k, &obstacles)
            {
                stats.paths_found += 1;
                let cost = found.cost();
                log::debug!("iteration {k}: path found with cost {cost:.3}");
                if best.as_ref().map_or(true, |b| cost < b.cost()) {
                    best = Some(found.clone());
                }
                paths.push(found);
            }
        }

        if k % config.optimization_interval == 0 && !paths.is_empty() {
            log::debug!("iteration {k}: running PSO refinement over {} paths", paths.len());
            for p in paths.iter_mut() {
                pso.refine(p, &workspace, &obstacles, &mut rng);
            }
            best = paths.best().cloned();
        }

        stats.iterations_executed = k;
        stats.nodes_explored = start_tree.len() + goal_tree.len();
    }

    if !paths.is_empty() {
        log::debug!("final PSO refinement pass over {} paths", paths.len());
        for p in paths.iter_mut() {
            pso.refine(p, &workspace, &obstacles, &mut rng);
        }
        best = paths.best().cloned();
    }

    match best {
        Some(p) => {
            let cost = p.cost();
            log::info!("planning finished: best_cost={cost:.3}");
            Ok(PlanOutcome {
                path: p.points,
                cost,
                stats,
            })
        }
        None => {
            log::info!("planning finished: no path found");
            Ok(PlanOutcome {
                path: Vec::new(),
                cost: f64::INFINITY,
                stats,
            })
        }
    }
}

fn validate(
    start: &Position,
    goal: &Position,
    obstacles: &[Obstacle],
    workspace: &Workspace,
    config: &PlannerConfig,
) -> Result<(), PlanError> {
    if workspace.is_degenerate() {
        return Err(PlanError::InvalidWorkspace);
    }
    config.validate()?;

    for (name, p) in [("start", start), ("goal", goal)] {
        if !workspace.contains(p) {
            return Err(PlanError::InvalidEndpoint(format!(
                "{name} lies outside the workspace"
            )));
        }
        if obstacles.iter().any(|o| point_in_polygon(p, o)) {
            return Err(PlanError::InvalidEndpoint(format!(
                "{name} lies inside an obstacle"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slalom_obstacles() -> Vec<Obstacle> {
        // A simple four-rectangle slalom, independent of the richer map
        // used by the integration tests in tests/common/mod.rs.
        vec![
            rect(50.0, 0.0, 80.0, 250.0),
            rect(150.0, 100.0, 180.0, 350.0),
            rect(250.0, 0.0, 280.0, 250.0),
            rect(350.0, 100.0, 380.0, 350.0),
        ]
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Obstacle {
        vec![
            Position::new(x0, y0),
            Position::new(x1, y0),
            Position::new(x1, y1),
            Position::new(x0, y1),
        ]
    }

    #[test]
    fn rejects_degenerate_workspace() {
        let ws = Workspace::new(10.0, 10.0, 0.0, 10.0);
        let err = plan(
            Position::new(1.0, 1.0),
            Position::new(2.0, 2.0),
            vec![],
            ws,
            PlannerConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, PlanError::InvalidWorkspace);
    }

    #[test]
    fn rejects_endpoint_outside_workspace() {
        let ws = Workspace::new(0.0, 10.0, 0.0, 10.0);
        let err = plan(
            Position::new(-1.0, -1.0),
            Position::new(5.0, 5.0),
            vec![],
            ws,
            PlannerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidEndpoint(_)));
    }

    #[test]
    fn rejects_endpoint_inside_obstacle() {
        let ws = Workspace::new(0.0, 10.0, 0.0, 10.0);
        let obstacle = rect(4.0, 4.0, 6.0, 6.0);
        let err = plan(
            Position::new(5.0, 5.0),
            Position::new(9.0, 9.0),
            vec![obstacle],
            ws,
            PlannerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidEndpoint(_)));
    }

    #[test]
    fn start_equals_goal_returns_trivial_path_on_first_iteration() {
        let ws = Workspace::new(0.0, 10.0, 0.0, 10.0);
        let outcome = plan(
            Position::new(5.0, 5.0),
            Position::new(5.0, 5.0),
            vec![],
            ws,
            PlannerConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.path, vec![Position::new(5.0, 5.0), Position::new(5.0, 5.0)]);
        assert_eq!(outcome.cost, 0.0);
        assert_eq!(outcome.stats.iterations_executed, 1);
    }

    #[test]
    fn finds_a_path_across_an_empty_workspace() {
        let ws = Workspace::new(0.0, 400.0, 0.0, 350.0);
        let mut config = PlannerConfig::default();
        config.seed = Some(1);
        config.max_iterations = 1500;
        let outcome = plan(
            Position::new(20.0, 20.0),
            Position::new(380.0, 330.0),
            vec![],
            ws,
            config,
        )
        .unwrap();
        assert!(outcome.cost.is_finite());
        let straight_line = ((380.0_f64 - 20.0).powi(2) + (330.0_f64 - 20.0).powi(2)).sqrt();
        assert!(outcome.cost <= straight_line * 1.3);
    }

    #[test]
    fn single_iteration_run_completes_without_error() {
        let ws = Workspace::new(0.0, 400.0, 0.0, 350.0);
        let mut config = PlannerConfig::default();
        config.seed = Some(1);
        config.max_iterations = 1;
        let outcome = plan(
            Position::new(20.0, 20.0),
            Position::new(380.0, 330.0),
            slalom_obstacles(),
            ws,
            config,
        )
        .unwrap();
        assert!(outcome.stats.paths_found <= 1);
    }

    #[test]
    fn best_cost_is_monotone_non_increasing_across_checkpoints() {
        let ws = Workspace::new(0.0, 400.0, 0.0, 350.0);
        let mut last_cost = f64::INFINITY;
        for max_iter in [500u32, 1000, 2000] {
            let mut config = PlannerConfig::default();
            config.seed = Some(42);
            config.max_iterations = max_iter;
            let outcome = plan(
                Position::new(20.0, 20.0),
                Position::new(380.0, 330.0),
                slalom_obstacles(),
                ws,
                config,
            )
            .unwrap();
            assert!(outcome.cost <= last_cost + 1e-6);
            last_cost = outcome.cost;
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let ws = Workspace::new(0.0, 400.0, 0.0, 350.0);
        let make_config = || {
            let mut c = PlannerConfig::default();
            c.seed = Some(99);
            c.max_iterations = 400;
            c
        };
        let first = plan(
            Position::new(20.0, 20.0),
            Position::new(380.0, 330.0),
            slalom_obstacles(),
            ws,
            make_config(),
        )
        .unwrap();
        let second = plan(
            Position::new(20.0, 20.0),
            Position::new(380.0, 330.0),
            slalom_obstacles(),
            ws,
            make_config(),
        )
        .unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(first.cost, second.cost);
    }
}
