//! Compression of a [Grid] into a sparse graph of decision points.
//!
//! Only dead ends, corners, intersections and the start/end cells become nodes. Every node gets
//! one edge per direction in which an uninterrupted corridor leads to another node, labelled with
//! the direction of travel and the number of steps taken.
use std::collections::BTreeSet;

use fxhash::FxHashMap;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::grid::{Grid, Terrain};
use crate::point::{Direction, Point};

/// Stable index of a node in the [Graph] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A straight corridor from one node to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub to: NodeId,
    pub direction: Direction,
    /// Number of steps, not counting the origin cell. Always at least 1.
    pub distance: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub point: Point,
    /// Outgoing edges in [Direction::ALL] order.
    pub edges: SmallVec<[Edge; 4]>,
}

/// Arena of decision-point nodes together with the connected components they form.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    lookup: FxHashMap<Point, NodeId>,
    components: UnionFind<usize>,
}

/// Decides whether an open cell is a graph node: the start and end cells always are, as is any
/// cell that does not have exactly two open neighbours. A cell with two open neighbours is a node
/// only if they form a corner.
pub fn is_decision_point(grid: &Grid, point: Point) -> bool {
    match grid.get(point) {
        Some(Terrain::Start | Terrain::End) => return true,
        Some(Terrain::Wall) | None => return false,
        Some(Terrain::Open) => {}
    }
    let open = Direction::ALL
        .into_iter()
        .filter(|d| grid.is_open(point + *d))
        .collect::<SmallVec<[Direction; 4]>>();
    match open.as_slice() {
        [a, b] => !a.collinear(*b),
        _ => true,
    }
}

/// Walks from `origin` in `direction` until the next decision point. Returns that point and the
/// number of steps, or [None] if a wall or the border comes first.
fn trace(grid: &Grid, origin: Point, direction: Direction) -> Option<(Point, u32)> {
    let mut current = origin;
    let mut distance = 0;
    loop {
        current = current + direction;
        distance += 1;
        if !grid.is_open(current) {
            return None;
        }
        if is_decision_point(grid, current) {
            return Some((current, distance));
        }
    }
}

impl Graph {
    /// Builds the graph for `grid`. Must be called again whenever the walls of the grid change.
    pub fn compress(grid: &Grid) -> Graph {
        let mut graph = Graph {
            nodes: Vec::new(),
            lookup: FxHashMap::default(),
            components: UnionFind::new(0),
        };
        for point in grid.open_cells() {
            if !is_decision_point(grid, point) {
                continue;
            }
            let from = graph.ensure_node(point);
            for direction in Direction::ALL {
                if let Some((destination, distance)) = trace(grid, point, direction) {
                    let to = graph.ensure_node(destination);
                    graph.nodes[from.0].edges.push(Edge {
                        to,
                        direction,
                        distance,
                    });
                }
            }
        }
        graph.generate_components();
        info!(
            "Compressed {}x{} grid into {} nodes and {} edges",
            grid.rows(),
            grid.cols(),
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    fn ensure_node(&mut self, point: Point) -> NodeId {
        if let Some(&id) = self.lookup.get(&point) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            point,
            edges: SmallVec::new(),
        });
        self.lookup.insert(point, id);
        id
    }

    /// Generates a new [UnionFind] structure and joins the endpoints of every edge. Corridors are
    /// traced from both ends, so the edge relation is symmetric and these are true components.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.nodes.len());
        for (ix, node) in self.nodes.iter().enumerate() {
            for edge in &node.edges {
                self.components.union(ix, edge.to.0);
            }
        }
        debug!("Generated connected components for {} nodes", self.nodes.len());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Panics if `id` was not handed out by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_id(&self, point: Point) -> Option<NodeId> {
        self.lookup.get(&point).copied()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.lookup.contains_key(&point)
    }

    /// The edge leading from the node at `from` to the node at `to`, if they are adjacent.
    pub fn edge_between(&self, from: Point, to: Point) -> Option<&Edge> {
        let from = self.node_id(from)?;
        let to = self.node_id(to)?;
        self.node(from).edges.iter().find(|e| e.to == to)
    }

    /// Checks if both points are nodes on the same connected component.
    pub fn connected(&self, a: Point, b: Point) -> bool {
        match (self.node_id(a), self.node_id(b)) {
            (Some(a), Some(b)) => self.components.equiv(a.0, b.0),
            _ => false,
        }
    }

    /// Every edge as `(from, direction, to, distance)`, independent of node numbering.
    pub fn edge_set(&self) -> BTreeSet<(Point, Direction, Point, u32)> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.edges
                    .iter()
                    .map(move |e| (node.point, e.direction, self.node(e.to).point, e.distance))
            })
            .collect()
    }
}

/// Graphs are equal when they have the same nodes and edges in the same arena order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for Graph {}
