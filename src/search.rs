//! Dijkstra over (node, facing) states of a compressed [Graph].
//!
//! A state is expanded when it is popped at exactly its recorded best cost; entries popped at a
//! higher cost are stale and skipped. Only strictly better relaxations are pushed, so every state
//! is expanded at most once in both search modes. [solve] returns at the first popped end state.
//! [search_all] records that cost and keeps draining until the popped cost exceeds it, appending
//! equal-cost predecessors as it goes.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use smallvec::{smallvec, SmallVec};

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::cost::CostFn;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::path::Path;
use crate::point::{Direction, Point};
use crate::reconstruct::{reconstruct, tied_cells};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// A (node, facing) pair: the true vertex of the search space.
pub type StateKey = (NodeId, Direction);

/// Unit of work in the priority queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State<C> {
    pub node: NodeId,
    pub direction: Direction,
    pub cost: C,
}

pub(crate) struct Record<C> {
    pub(crate) cost: C,
    /// Table indices of the states this one was reached from at `cost`.
    pub(crate) predecessors: SmallVec<[usize; 2]>,
}

struct SmallestCostHolder<K> {
    cost: K,
    direction: Direction,
    node: NodeId,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.direction == other.direction && self.node == other.node
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: reverse everything so the cheapest state pops first, with
        // equal costs resolved by direction index and then node index
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.direction.cmp(&self.direction))
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Best costs and minimal-cost predecessors of every state reached by [search_all].
pub struct PredecessorTable<C> {
    pub(crate) records: FxIndexMap<StateKey, Record<C>>,
    pub(crate) end: NodeId,
    pub(crate) cost: C,
}

impl<C: Copy + PartialEq> PredecessorTable<C> {
    /// The minimal cost at which the end was reached.
    pub fn cost(&self) -> C {
        self.cost
    }

    /// Lowest known cost for a (node, facing) state.
    pub fn best_cost(&self, node: NodeId, direction: Direction) -> Option<C> {
        self.records.get(&(node, direction)).map(|r| r.cost)
    }

    /// States from which `(node, direction)` is reached at its best cost.
    pub fn predecessors(&self, node: NodeId, direction: Direction) -> Vec<StateKey> {
        self.records
            .get(&(node, direction))
            .map(|r| {
                r.predecessors
                    .iter()
                    .filter_map(|&ix| self.records.get_index(ix).map(|(key, _)| *key))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Table indices of the end states reached at the minimal cost, in direction order.
    pub(crate) fn end_states(&self) -> Vec<usize> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.records.get_full(&(self.end, d)))
            .filter(|(_, _, r)| r.cost == self.cost)
            .map(|(ix, _, _)| ix)
            .collect()
    }

    /// Every distinct node-level path that achieves [cost](Self::cost). The number of paths can
    /// grow exponentially with the size of open areas; use [cells](Self::cells) when only the
    /// covered cells matter.
    ///
    /// `graph` must be the graph the search ran on.
    pub fn paths(&self, graph: &Graph) -> Vec<Path<C>> {
        reconstruct(self, graph)
    }

    /// Every grid cell lying on at least one path that achieves [cost](Self::cost), in time
    /// linear in the number of recorded states and predecessor links. `graph` must be the graph
    /// the search ran on.
    pub fn cells(&self, graph: &Graph) -> Result<BTreeSet<Point>> {
        tied_cells(self, graph)
    }
}

fn endpoints(graph: &Graph, start: Point, end: Point) -> Option<(NodeId, NodeId)> {
    match (graph.node_id(start), graph.node_id(end)) {
        (Some(s), Some(e)) => Some((s, e)),
        _ => {
            debug!("{} or {} is not a node of the graph", start, end);
            None
        }
    }
}

fn run<C, F>(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    facing: Direction,
    cost_fn: &F,
    all: bool,
) -> Option<(C, FxIndexMap<StateKey, Record<C>>)>
where
    C: Zero + Ord + Copy,
    F: CostFn<C>,
{
    let mut to_see = BinaryHeap::new();
    let mut records: FxIndexMap<StateKey, Record<C>> = FxIndexMap::default();
    records.insert(
        (start, facing),
        Record {
            cost: Zero::zero(),
            predecessors: SmallVec::new(),
        },
    );
    to_see.push(SmallestCostHolder {
        cost: Zero::zero(),
        direction: facing,
        node: start,
        index: 0,
    });
    let mut end_cost: Option<C> = None;

    while let Some(SmallestCostHolder {
        cost,
        direction,
        node,
        index,
    }) = to_see.pop()
    {
        if end_cost.is_some_and(|m| cost > m) {
            break;
        }
        let Some((_, record)) = records.get_index(index) else {
            continue;
        };
        // A cheaper entry for this state was already expanded.
        if cost > record.cost {
            continue;
        }
        if node == end {
            if !all {
                return Some((cost, records));
            }
            end_cost.get_or_insert(cost);
            continue;
        }

        let state = State {
            node,
            direction,
            cost,
        };
        for edge in &graph.node(node).edges {
            let new_cost = cost_fn.cost(&state, edge);
            if end_cost.is_some_and(|m| new_cost > m) {
                continue;
            }
            let n; // index for successor
            match records.entry((edge.to, edge.direction)) {
                Vacant(e) => {
                    n = e.index();
                    e.insert(Record {
                        cost: new_cost,
                        predecessors: if all { smallvec![index] } else { SmallVec::new() },
                    });
                }
                Occupied(mut e) => {
                    let record = e.get_mut();
                    if new_cost < record.cost {
                        record.cost = new_cost;
                        record.predecessors.clear();
                        if all {
                            record.predecessors.push(index);
                        }
                        n = e.index();
                    } else {
                        // Already queued or expanded at this cost.
                        if all && new_cost == record.cost {
                            record.predecessors.push(index);
                        }
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                cost: new_cost,
                direction: edge.direction,
                node: edge.to,
                index: n,
            });
        }
    }
    end_cost.map(|cost| (cost, records))
}

/// Minimal cost from `start` to `end` when leaving `start` facing `facing`, or [None] if the end
/// cannot be reached. Both points must be nodes of `graph`.
pub fn solve<C, F>(graph: &Graph, start: Point, end: Point, facing: Direction, cost_fn: F) -> Option<C>
where
    C: Zero + Ord + Copy,
    F: CostFn<C>,
{
    let (start_id, end_id) = endpoints(graph, start, end)?;
    match run(graph, start_id, end_id, facing, &cost_fn, false) {
        Some((cost, records)) => {
            debug!("Reached {} from {} after recording {} states", end, start, records.len());
            Some(cost)
        }
        None => {
            debug!("{} is not reachable from {}", end, start);
            None
        }
    }
}

/// Like [solve], but keeps every predecessor that ties the best cost of a state so that all
/// minimal paths can be reconstructed with [PredecessorTable::paths].
pub fn search_all<C, F>(
    graph: &Graph,
    start: Point,
    end: Point,
    facing: Direction,
    cost_fn: F,
) -> Option<PredecessorTable<C>>
where
    C: Zero + Ord + Copy,
    F: CostFn<C>,
{
    let (start_id, end_id) = endpoints(graph, start, end)?;
    match run(graph, start_id, end_id, facing, &cost_fn, true) {
        Some((cost, records)) => {
            debug!("Reached {} from {} after recording {} states", end, start, records.len());
            Some(PredecessorTable {
                records,
                end: end_id,
                cost,
            })
        }
        None => {
            debug!("{} is not reachable from {}", end, start);
            None
        }
    }
}

/// Minimal cost together with every node-level path that achieves it.
pub fn solve_all<C, F>(
    graph: &Graph,
    start: Point,
    end: Point,
    facing: Direction,
    cost_fn: F,
) -> Option<(C, Vec<Path<C>>)>
where
    C: Zero + Ord + Copy,
    F: CostFn<C>,
{
    search_all(graph, start, end, facing, cost_fn).map(|table| (table.cost(), table.paths(graph)))
}
