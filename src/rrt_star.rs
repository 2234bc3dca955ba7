//! The RRT* expansion engine: steer, collision-check, choose-parent,
//! rewire, with a dynamic connection radius.
//!
//! Follows a standard choose-parent/rewire RRT* loop, with one deliberate
//! choice: rewiring here cascades the cost delta to the whole subtree of
//! the reparented node, which `tree::Tree::reparent` implements directly.

use crate::geometry::{segment_collision_free, Obstacle, Position};
use crate::steering::{EuclideanSteering, Steering};
use crate::tree::{NodeRef, Tree};

const COST_TOLERANCE: f64 = 1e-9;
const RADIUS_FLOOR: f64 = 15.0;

pub struct RrtStarEngine {
    pub step_size: f64,
    pub gamma: f64,
    steering: EuclideanSteering,
}

impl RrtStarEngine {
    pub fn new(step_size: f64, gamma: f64) -> Self {
        Self {
            step_size,
            gamma,
            steering: EuclideanSteering,
        }
    }

    /// The dynamic connection radius for a tree of size `n`. Depends
    /// only on tree size and `gamma` (no workspace-area term), floored
    /// at 15.
    pub fn radius(&self, n: usize) -> f64 {
        let n = n.max(1) as f64;
        (self.gamma * (n.ln() / n).sqrt()).max(RADIUS_FLOOR)
    }

    /// Attempts one RRT* expansion step against `tree`. Returns the
    /// reference of the newly inserted node, or `None` if the steered
    /// edge collides with an obstacle.
    pub fn expand(
        &self,
        tree: &mut Tree,
        x_rand: Position,
        obstacles: &[Obstacle],
    ) -> Option<NodeRef> {
        let nearest_ref = tree.nearest(&x_rand);
        let x_nearest = tree.position(nearest_ref);
        let x_new = self.steering.steer(&x_nearest, &x_rand, self.step_size);

        if !segment_collision_free(&x_nearest, &x_new, obstacles) {
            return None;
        }

        let radius = self.radius(tree.len());
        let neighbours = tree.near(&x_new, radius);

        let (parent, parent_cost) =
            self.choose_parent(tree, &neighbours, nearest_ref, x_new, obstacles);

        let new_node = tree.add_node(x_new, parent, parent_cost);
        self.rewire(tree, new_node, &neighbours, parent, obstacles);

        Some(new_node)
    }

    /// Among `neighbours` plus `fallback` (the nearest node used for
    /// steering), picks the node minimizing `cost(N) + |N - x_new|`
    /// subject to a collision-free connecting segment. Ties (within
    /// `COST_TOLERANCE`) keep whichever candidate was found first, which
    /// is `fallback` since it is always considered first.
    fn choose_parent(
        &self,
        tree: &Tree,
        neighbours: &[NodeRef],
        fallback: NodeRef,
        x_new: Position,
        obstacles: &[Obstacle],
    ) -> (NodeRef, f64) {
        let mut best = fallback;
        let mut best_cost = tree.cost(fallback) + tree.position(fallback).distance_to(&x_new);

        for &candidate in neighbours {
            if candidate == fallback {
                continue;
            }
            let candidate_pos = tree.position(candidate);
            if !segment_collision_free(&candidate_pos, &x_new, obstacles) {
                continue;
            }
            let candidate_cost = tree.cost(candidate) + candidate_pos.distance_to(&x_new);
            if candidate_cost + COST_TOLERANCE < best_cost {
                best = candidate;
                best_cost = candidate_cost;
            }
        }
        (best, best_cost)
    }

    /// For each neighbour other than the chosen parent, reparents it onto
    /// `new_node` if doing so strictly lowers its cost and the connecting
    /// segment is collision-free.
    fn rewire(
        &self,
        tree: &mut Tree,
        new_node: NodeRef,
        neighbours: &[NodeRef],
        parent: NodeRef,
        obstacles: &[Obstacle],
    ) {
        let new_pos = tree.position(new_node);
        let new_cost = tree.cost(new_node);

        for &m in neighbours {
            if m == parent || m == new_node {
                continue;
            }
            let m_pos = tree.position(m);
            let candidate_cost = new_cost + new_pos.distance_to(&m_pos);
            if candidate_cost + COST_TOLERANCE < tree.cost(m)
                && segment_collision_free(&new_pos, &m_pos, obstacles)
            {
                tree.reparent(m, new_node, candidate_cost);
            }
        }
    }
}
