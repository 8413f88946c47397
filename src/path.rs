use std::collections::BTreeSet;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::point::Point;

/// An ordered sequence of points together with the total cost of following it. Search results
/// hold only decision points; [expand] produces the cell-by-cell version.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path<C> {
    pub points: Vec<Point>,
    pub cost: C,
}

impl<C> Path<C> {
    pub fn new(points: Vec<Point>, cost: C) -> Path<C> {
        Path { points, cost }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maps every cell of an expanded path to the number of steps needed to first reach it from
    /// the start of the path.
    pub fn step_index(&self) -> IndexMap<Point, usize, FxBuildHasher> {
        let mut steps = IndexMap::default();
        for (step, point) in self.points.iter().enumerate() {
            steps.entry(*point).or_insert(step);
        }
        steps
    }
}

/// Turns a node-level path into a path on the grid which can be followed step by step, by
/// replaying the direction and distance of the edge between every pair of consecutive nodes.
pub fn expand<C: Copy>(path: &Path<C>, graph: &Graph) -> Result<Path<C>> {
    let Some(&first) = path.points.first() else {
        return Ok(Path::new(Vec::new(), path.cost));
    };
    if !graph.contains(first) {
        return Err(Error::NotANode { point: first });
    }
    let mut cells = vec![first];
    for (from, to) in path.points.iter().copied().tuple_windows() {
        let edge = graph
            .edge_between(from, to)
            .ok_or(Error::NotAdjacent { from, to })?;
        let mut current = from;
        for _ in 0..edge.distance {
            current = current + edge.direction;
            cells.push(current);
        }
    }
    Ok(Path::new(cells, path.cost))
}

/// Drops every cell that is not a decision point of `graph`. Inverse of [expand].
pub fn collapse<C: Copy>(path: &Path<C>, graph: &Graph) -> Path<C> {
    let points = path
        .points
        .iter()
        .copied()
        .filter(|p| graph.contains(*p))
        .collect();
    Path::new(points, path.cost)
}

/// The distinct cells touched by any of `paths`.
pub fn distinct_cells<'a, C: 'a>(paths: impl IntoIterator<Item = &'a Path<C>>) -> BTreeSet<Point> {
    paths
        .into_iter()
        .flat_map(|p| p.points.iter().copied())
        .collect()
}
