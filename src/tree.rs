//! Tree store: an arena of nodes, grown by one tree (start-rooted or
//! goal-rooted) during planning.
//!
//! An arena-by-index `Node`/tree shape, generalized with a `children`
//! list so rewiring can cascade cost updates to a node's whole subtree.

use crate::config::TreeLabel;
use crate::geometry::Position;

pub type NodeRef = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    pub parent: Option<NodeRef>,
    pub children: Vec<NodeRef>,
    pub cost: f64,
}

/// A single RRT* tree, rooted at either the start or the goal position.
/// The root is always node 0 and is never replaced; nodes are only ever
/// appended, though their parent/cost may be overwritten by rewiring.
#[derive(Debug, Clone)]
pub struct Tree {
    pub label: TreeLabel,
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(label: TreeLabel, root: Position) -> Self {
        Self {
            label,
            nodes: vec![Node {
                position: root,
                parent: None,
                children: Vec::new(),
                cost: 0.0,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, r: NodeRef) -> &Node {
        &self.nodes[r]
    }

    pub fn position(&self, r: NodeRef) -> Position {
        self.nodes[r].position
    }

    pub fn cost(&self, r: NodeRef) -> f64 {
        self.nodes[r].cost
    }

    pub fn root(&self) -> NodeRef {
        0
    }

    /// Appends a new node as a child of `parent`, returning its reference.
    pub fn add_node(&mut self, pos: Position, parent: NodeRef, cost: f64) -> NodeRef {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            position: pos,
            parent: Some(parent),
            children: Vec::new(),
            cost,
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    /// Linear-scan nearest node to `pos`.
    pub fn nearest(&self, pos: &Position) -> NodeRef {
        let mut best = 0;
        let mut best_dist = self.nodes[0].position.distance_to(pos);
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let d = node.position.distance_to(pos);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }

    /// Linear-scan of all nodes within `radius` (inclusive) of `pos`.
    pub fn near(&self, pos: &Position, radius: f64) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.position.distance_to(pos) <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// True if `candidate` is a descendant of `ancestor` (or is
    /// `ancestor` itself).
    fn is_descendant(&self, ancestor: NodeRef, candidate: NodeRef) -> bool {
        if ancestor == candidate {
            return true;
        }
        let mut stack = self.nodes[ancestor].children.clone();
        while let Some(n) = stack.pop() {
            if n == candidate {
                return true;
            }
            stack.extend(self.nodes[n].children.iter().copied());
        }
        false
    }

    /// Detaches `child` from its old parent's child list, attaches it to
    /// `new_parent`, and overwrites `child`'s cost, cascading the cost
    /// delta to every node in `child`'s subtree. Refuses to create a
    /// cycle: `new_parent` must not already be a descendant of `child`.
    pub fn reparent(&mut self, child: NodeRef, new_parent: NodeRef, new_cost: f64) {
        debug_assert!(
            !self.is_descendant(child, new_parent),
            "reparenting would create a cycle"
        );
        let delta = new_cost - self.nodes[child].cost;

        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&c| c != child);
        }
        self.nodes[new_parent].children.push(child);
        self.nodes[child].parent = Some(new_parent);
        self.nodes[child].cost = new_cost;

        if delta != 0.0 {
            self.cascade_cost(child, delta);
        }
    }

    fn cascade_cost(&mut self, from: NodeRef, delta: f64) {
        let mut stack = self.nodes[from].children.clone();
        while let Some(n) = stack.pop() {
            self.nodes[n].cost += delta;
            stack.extend(self.nodes[n].children.iter().copied());
        }
    }

    /// Root-first ordered path from the tree root down to `node`.
    pub fn path_to_root(&self, node: NodeRef) -> Vec<Position> {
        let mut positions = Vec::new();
        let mut current = Some(node);
        while let Some(idx) = current {
            positions.push(self.nodes[idx].position);
            current = self.nodes[idx].parent;
        }
        positions.reverse();
        positions
    }
}
