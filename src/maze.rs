use core::fmt;
use std::collections::BTreeSet;

use log::info;
use num_traits::Zero;

use crate::cost::CostFn;
use crate::error::Result;
use crate::graph::{is_decision_point, Graph};
use crate::grid::{Grid, Terrain};
use crate::path::Path;
use crate::point::{Direction, Point};
use crate::search::{search_all, solve};

/// [Maze] keeps a validated [Grid] together with the [Graph] compressed from it, and rebuilds the
/// graph whenever walls are added or removed so that queries always see the current grid.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    graph: Graph,
}

impl Maze {
    pub fn new(grid: Grid) -> Maze {
        let graph = Graph::compress(&grid);
        Maze { grid, graph }
    }

    /// Parses `lines` with the default symbols and compresses the result.
    pub fn parse<I, S>(lines: I) -> Result<Maze>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Grid::parse(lines).map(Maze::new)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Checks if start and end are on the same connected component.
    pub fn reachable(&self) -> bool {
        self.graph.connected(self.grid.start(), self.grid.end())
    }

    /// Cost of the cheapest route from start to end, or [None] if the end cannot be reached.
    pub fn cheapest<C, F>(&self, facing: Direction, cost_fn: F) -> Option<C>
    where
        C: Zero + Ord + Copy,
        F: CostFn<C>,
    {
        if !self.reachable() {
            info!("{} is not reachable from {}", self.grid.end(), self.grid.start());
            return None;
        }
        solve(&self.graph, self.grid.start(), self.grid.end(), facing, cost_fn)
    }

    /// The minimal cost and every node-level path achieving it.
    pub fn optimal_paths<C, F>(&self, facing: Direction, cost_fn: F) -> Option<(C, Vec<Path<C>>)>
    where
        C: Zero + Ord + Copy,
        F: CostFn<C>,
    {
        if !self.reachable() {
            info!("{} is not reachable from {}", self.grid.end(), self.grid.start());
            return None;
        }
        let table = search_all(&self.graph, self.grid.start(), self.grid.end(), facing, cost_fn)?;
        Some((table.cost(), table.paths(&self.graph)))
    }

    /// The minimal cost and every grid cell that lies on at least one path achieving it.
    pub fn optimal_cells<C, F>(
        &self,
        facing: Direction,
        cost_fn: F,
    ) -> Result<Option<(C, BTreeSet<Point>)>>
    where
        C: Zero + Ord + Copy,
        F: CostFn<C>,
    {
        if !self.reachable() {
            info!("{} is not reachable from {}", self.grid.end(), self.grid.start());
            return Ok(None);
        }
        let Some(table) =
            search_all(&self.graph, self.grid.start(), self.grid.end(), facing, cost_fn)
        else {
            return Ok(None);
        };
        Ok(Some((table.cost(), table.cells(&self.graph)?)))
    }

    /// Places a wall and rebuilds the graph.
    pub fn add_wall(&mut self, point: Point) -> Result<()> {
        self.grid.set_wall(point)?;
        self.rebuild();
        Ok(())
    }

    /// Places several walls and rebuilds the graph once. Stops at the first invalid point, leaving
    /// the walls placed before it in the grid.
    pub fn add_walls<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point>,
    {
        let placed = points
            .into_iter()
            .try_for_each(|point| self.grid.set_wall(point));
        self.rebuild();
        placed
    }

    /// Opens up a wall and rebuilds the graph.
    pub fn remove_wall(&mut self, point: Point) -> Result<()> {
        self.grid.clear_wall(point)?;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        info!("Grid changed: rebuilding graph");
        self.graph = Graph::compress(&self.grid);
    }
}

/// Renders the grid with its own [Symbols](crate::grid::Symbols), drawing decision points that
/// are not markers as `+`.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbols = self.grid.symbols();
        for row in 0..self.grid.rows() as i32 {
            let line = (0..self.grid.cols() as i32)
                .filter_map(|col| {
                    let p = Point::new(row, col);
                    self.grid.get(p).map(|terrain| match terrain {
                        Terrain::Open if is_decision_point(&self.grid, p) => '+',
                        _ => symbols.symbol(terrain),
                    })
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        writeln!(
            f,
            "{} nodes, {} edges",
            self.graph.len(),
            self.graph.edge_count()
        )
    }
}
