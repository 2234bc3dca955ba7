//! The bidirectional connector: after inserting a node into the active
//! tree, probes the opposite tree for a collision-free link and, on
//! success, assembles a complete start-to-goal path.

use crate::config::TreeLabel;
use crate::geometry::{segment_collision_free, Obstacle};
use crate::path::Path;
use crate::tree::{NodeRef, Tree};

/// Attempts to connect the newly inserted node `x_new` in `active` to
/// `opposite`. On success, returns the assembled start-to-goal path.
pub fn try_connect(
    active: &Tree,
    x_new: NodeRef,
    opposite: &Tree,
    k: usize,
    obstacles: &[Obstacle],
) -> Option<Path> {
    let x_new_pos = active.position(x_new);

    let mut candidates: Vec<(f64, NodeRef)> = (0..opposite.len())
        .map(|r| (x_new_pos.distance_to(&opposite.position(r)), r))
        .collect();
    candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let k = k.min(candidates.len());

    for &(_, candidate) in candidates.iter().take(k) {
        let candidate_pos = opposite.position(candidate);
        if segment_collision_free(&x_new_pos, &candidate_pos, obstacles) {
            // `a` is root-first within `active`; `b` is root-first within
            // `opposite`. Whichever of the two trees is start-rooted
            // contributes its root-first order as-is; the goal-rooted one
            // contributes reversed, so every assembled path reads start
            // first, goal last.
            let a = active.path_to_root(x_new);
            let b = opposite.path_to_root(candidate);

            let points = match active.label {
                TreeLabel::Start => {
                    let mut full = a;
                    full.extend(b.into_iter().rev());
                    full
                }
                TreeLabel::Goal => {
                    let mut full = b;
                    full.extend(a.into_iter().rev());
                    full
                }
            };
            return Some(Path::new(points));
        }
    }
    None
}
