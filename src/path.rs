//! Paths and the append-only path set accumulated during planning.

use crate::geometry::Position;

/// An ordered sequence of positions, start first, goal last. The
/// invariant that every consecutive segment is collision-free is
/// maintained by callers (`connector` on insertion, `pso` on refinement)
/// rather than enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<Position>,
}

impl Path {
    pub fn new(points: Vec<Position>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    pub fn cost(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }

    pub fn interior_len(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    pub fn start(&self) -> Position {
        self.points[0]
    }

    pub fn goal(&self) -> Position {
        *self.points.last().unwrap()
    }
}

/// An unordered, append-only collection of candidate paths. Entries may
/// be rewritten in place by PSO refinement but the set itself never
/// shrinks during one planning call.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Path> {
        self.paths.iter_mut()
    }

    /// Samples a uniformly random path, if any exist.
    pub fn random_path(&self, rng: &mut impl rand::Rng) -> Option<&Path> {
        if self.paths.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.paths.len());
        Some(&self.paths[idx])
    }

    /// The minimum-cost path currently in the set, if any.
    pub fn best(&self) -> Option<&Path> {
        self.paths
            .iter()
            .min_by(|a, b| a.cost().partial_cmp(&b.cost()).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_cost_sums_segment_lengths() {
        let path = Path::new(vec![
            Position::new(0.0, 0.0),
            Position::new(3.0, 4.0),
            Position::new(3.0, 0.0),
        ]);
        assert!((path.cost() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn path_set_best_tracks_minimum_cost() {
        let mut set = PathSet::new();
        set.push(Path::new(vec![Position::new(0.0, 0.0), Position::new(10.0, 0.0)]));
        set.push(Path::new(vec![Position::new(0.0, 0.0), Position::new(5.0, 0.0)]));
        assert!((set.best().unwrap().cost() - 5.0).abs() < 1e-9);
    }
}
