//! # grid_navigation
//!
//! Shortest paths on character grids of walls and open cells. A [Grid] is first compressed into a
//! sparse [Graph] whose nodes are only the decision points of the grid (dead ends, corners,
//! intersections and the start/end cells) and whose edges are the straight corridors between
//! them. The graph is then searched with
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) over
//! (node, facing) states, so cost functions can charge for turning as well as for distance.
//!
//! Two query modes are offered: [solve] returns the cheapest cost, and [solve_all] (or
//! [search_all] followed by [PredecessorTable::paths]) returns every path that ties it. Node
//! paths are turned back into cell-by-cell paths with [expand]. [Maze] bundles a grid with its
//! graph, pre-computes connected components to skip searches whose end is unreachable, and
//! rebuilds the graph when walls are added.
//!
//! ```
//! use grid_navigation::{Direction, Maze, TurnPenalty};
//!
//! let maze = Maze::parse(["#######", "#S...E#", "#######"]).unwrap();
//! assert_eq!(maze.cheapest::<i64, _>(Direction::East, TurnPenalty::default()), Some(4));
//! ```
pub mod cost;
pub mod error;
pub mod graph;
pub mod grid;
pub mod maze;
pub mod path;
pub mod point;
mod reconstruct;
pub mod search;

pub use cost::{CostFn, StepCost, TurnPenalty};
pub use error::{Error, Result};
pub use graph::{is_decision_point, Edge, Graph, Node, NodeId};
pub use grid::{Grid, Symbols, Terrain};
pub use maze::Maze;
pub use path::{collapse, distinct_cells, expand, Path};
pub use point::{Direction, Point};
pub use search::{search_all, solve, solve_all, PredecessorTable, State, StateKey};
