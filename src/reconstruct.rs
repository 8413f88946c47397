use std::collections::BTreeSet;

use fxhash::FxHashSet;
use log::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::Path;
use crate::point::Point;
use crate::search::PredecessorTable;

/// Table index of the state the search started from.
const ORIGIN: usize = 0;

/// Expands every minimal-cost predecessor chain ending in an end state of `table` into a
/// node-level path.
///
/// A state may have several predecessors, so this is a depth-first enumeration over the
/// predecessor relation rather than a single parent walk. It keeps an explicit stack of
/// `(state, next predecessor)` frames and refuses to revisit a state already on the current
/// chain. Paths come out with end directions in index order and predecessors in the order the
/// search recorded them.
pub(crate) fn reconstruct<C>(table: &PredecessorTable<C>, graph: &Graph) -> Vec<Path<C>>
where
    C: Copy + PartialEq,
{
    let point_of = |ix: usize| {
        table
            .records
            .get_index(ix)
            .and_then(|((node, _), _)| graph.nodes().get(node.0))
            .map(|node| node.point)
    };
    let predecessors = |ix: usize| {
        table
            .records
            .get_index(ix)
            .map(|(_, record)| record.predecessors.as_slice())
            .unwrap_or_default()
    };

    let mut paths = Vec::new();
    for end in table.end_states() {
        let mut stack: Vec<(usize, usize)> = vec![(end, 0)];
        let mut on_chain: FxHashSet<usize> = FxHashSet::default();
        on_chain.insert(end);

        while let Some(&(ix, next)) = stack.last() {
            let preds = predecessors(ix);
            if ix == ORIGIN || preds.is_empty() {
                // The stack runs from the end state down to the origin.
                let points = stack
                    .iter()
                    .rev()
                    .filter_map(|&(i, _)| point_of(i))
                    .collect();
                paths.push(Path::new(points, table.cost));
                stack.pop();
                on_chain.remove(&ix);
                continue;
            }
            match preds.get(next) {
                Some(&pred) => {
                    let top = stack.len() - 1;
                    stack[top].1 += 1;
                    if on_chain.insert(pred) {
                        stack.push((pred, 0));
                    }
                }
                None => {
                    stack.pop();
                    on_chain.remove(&ix);
                }
            }
        }
    }
    debug!("Reconstructed {} minimal paths", paths.len());
    paths
}

/// Collects every grid cell on some minimal-cost path without enumerating the paths. Each state
/// is visited once walking backwards from the end states, and every predecessor link is replayed
/// as a corridor of cells.
pub(crate) fn tied_cells<C>(table: &PredecessorTable<C>, graph: &Graph) -> Result<BTreeSet<Point>>
where
    C: Copy + PartialEq,
{
    let point_of = |ix: usize| {
        table
            .records
            .get_index(ix)
            .and_then(|((node, _), _)| graph.nodes().get(node.0))
            .map(|node| node.point)
    };

    let mut cells = BTreeSet::new();
    let mut visited: FxHashSet<usize> = FxHashSet::default();
    let mut stack = table.end_states();
    visited.extend(stack.iter().copied());
    while let Some(ix) = stack.pop() {
        let Some((_, record)) = table.records.get_index(ix) else {
            continue;
        };
        let Some(to) = point_of(ix) else {
            continue;
        };
        cells.insert(to);
        for &pred in &record.predecessors {
            let Some(from) = point_of(pred) else {
                continue;
            };
            let edge = graph
                .edge_between(from, to)
                .ok_or(Error::NotAdjacent { from, to })?;
            let mut current = from;
            for _ in 0..edge.distance {
                cells.insert(current);
                current = current + edge.direction;
            }
            if visited.insert(pred) {
                stack.push(pred);
            }
        }
    }
    debug!("{} cells lie on minimal paths", cells.len());
    Ok(cells)
}
