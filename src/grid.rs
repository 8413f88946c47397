use core::fmt;

use grid_util::grid::{Grid as CellGrid, SimpleGrid};
use log::debug;

use crate::error::{Error, Result};
use crate::point::Point;

/// What occupies a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Open,
    Wall,
    Start,
    End,
}

impl Terrain {
    pub fn is_wall(self) -> bool {
        self == Terrain::Wall
    }
}

/// Characters used to read and render a [Grid].
///
/// Puzzle variants sometimes decorate open cells with their own markers; list those in
/// `extra_open` and they are read as [Terrain::Open]. Rendering always uses `open`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub wall: char,
    pub open: char,
    pub start: char,
    pub end: char,
    pub extra_open: Vec<char>,
}

impl Default for Symbols {
    fn default() -> Symbols {
        Symbols {
            wall: '#',
            open: '.',
            start: 'S',
            end: 'E',
            extra_open: Vec::new(),
        }
    }
}

impl Symbols {
    pub fn terrain(&self, symbol: char) -> Option<Terrain> {
        if symbol == self.wall {
            Some(Terrain::Wall)
        } else if symbol == self.start {
            Some(Terrain::Start)
        } else if symbol == self.end {
            Some(Terrain::End)
        } else if symbol == self.open || self.extra_open.contains(&symbol) {
            Some(Terrain::Open)
        } else {
            None
        }
    }

    pub fn symbol(&self, terrain: Terrain) -> char {
        match terrain {
            Terrain::Open => self.open,
            Terrain::Wall => self.wall,
            Terrain::Start => self.start,
            Terrain::End => self.end,
        }
    }
}

/// A validated rectangular grid with exactly one start and one end cell. Cells are stored in a
/// [SimpleGrid] addressed with `x` as the column and `y` as the row.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleGrid<Terrain>,
    start: Point,
    end: Point,
    symbols: Symbols,
}

impl Grid {
    /// Reads a grid from lines of `#`, `.`, `S` and `E`.
    pub fn parse<I, S>(lines: I) -> Result<Grid>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Grid::parse_with(lines, &Symbols::default())
    }

    /// Reads a grid using custom [Symbols]. Rejects ragged rows, unknown symbols and missing or
    /// repeated start/end markers.
    pub fn parse_with<I, S>(lines: I, symbols: &Symbols) -> Result<Grid>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut cols = 0;
        let mut rows = 0;
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if row == 0 {
                cols = width;
            } else if width != cols {
                return Err(Error::RaggedRow {
                    row,
                    expected: cols,
                    found: width,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let point = Point::new(row as i32, col as i32);
                let terrain = symbols
                    .terrain(symbol)
                    .ok_or(Error::UnknownSymbol { point, symbol })?;
                match terrain {
                    Terrain::Start => record_marker(&mut start, point, symbols.start)?,
                    Terrain::End => record_marker(&mut end, point, symbols.end)?,
                    _ => {}
                }
                cells.push(terrain);
            }
            rows += 1;
        }
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid);
        }
        let start = start.ok_or(Error::MissingMarker {
            marker: symbols.start,
        })?;
        let end = end.ok_or(Error::MissingMarker {
            marker: symbols.end,
        })?;
        debug!("Parsed {}x{} grid, start {} end {}", rows, cols, start, end);
        Ok(Grid {
            cells: SimpleGrid {
                width: cols,
                height: rows,
                values: cells,
            },
            start,
            end,
            symbols: symbols.clone(),
        })
    }

    /// An obstacle-free grid with the given start and end cells.
    pub fn open(rows: usize, cols: usize, start: Point, end: Point) -> Result<Grid> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid);
        }
        let mut grid = Grid {
            cells: SimpleGrid::new(cols, rows, Terrain::Open),
            start,
            end,
            symbols: Symbols::default(),
        };
        for point in [start, end] {
            if !grid.in_bounds(point) {
                return Err(Error::OutOfBounds { point });
            }
        }
        if start == end {
            return Err(Error::DuplicateMarker {
                marker: grid.symbols.start,
                first: start,
                second: end,
            });
        }
        grid.cells.set_point(start.into(), Terrain::Start);
        grid.cells.set_point(end.into(), Terrain::End);
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }

    pub fn cols(&self) -> usize {
        self.cells.width()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point.into())
    }

    /// The terrain at `point`, or [None] outside the grid.
    pub fn get(&self, point: Point) -> Option<Terrain> {
        if self.in_bounds(point) {
            Some(self.cells.get_point(point.into()))
        } else {
            None
        }
    }

    /// Whether `point` is inside the grid and not a wall.
    pub fn is_open(&self, point: Point) -> bool {
        self.get(point).is_some_and(|t| !t.is_wall())
    }

    /// Every non-wall cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows() as i32)
            .flat_map(move |row| (0..self.cols() as i32).map(move |col| Point::new(row, col)))
            .filter(move |p| self.is_open(*p))
    }

    /// Turns an open cell into a wall. Blocking an existing wall is a no-op.
    pub fn set_wall(&mut self, point: Point) -> Result<()> {
        self.set_terrain(point, Terrain::Wall)
    }

    /// Turns a wall back into an open cell.
    pub fn clear_wall(&mut self, point: Point) -> Result<()> {
        self.set_terrain(point, Terrain::Open)
    }

    fn set_terrain(&mut self, point: Point, terrain: Terrain) -> Result<()> {
        match self.get(point) {
            None => Err(Error::OutOfBounds { point }),
            Some(Terrain::Start | Terrain::End) => Err(Error::MarkerBlocked { point }),
            Some(_) => {
                self.cells.set_point(point.into(), terrain);
                Ok(())
            }
        }
    }
}

fn record_marker(slot: &mut Option<Point>, point: Point, marker: char) -> Result<()> {
    match slot {
        Some(first) => Err(Error::DuplicateMarker {
            marker,
            first: *first,
            second: point,
        }),
        None => {
            *slot = Some(point);
            Ok(())
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.cells.height() {
            let line: String = (0..self.cells.width())
                .map(|x| self.symbols.symbol(self.cells.get(x, y)))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_locates_markers() {
        let grid = Grid::parse(["#####", "#S.E#", "#####"]).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.start(), Point::new(1, 1));
        assert_eq!(grid.end(), Point::new(1, 3));
        assert_eq!(grid.get(Point::new(1, 2)), Some(Terrain::Open));
        assert_eq!(grid.get(Point::new(0, 0)), Some(Terrain::Wall));
        assert_eq!(grid.get(Point::new(3, 0)), None);
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Grid::parse(["#####", "#S.E", "#####"]).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRow {
                row: 1,
                expected: 5,
                found: 4
            }
        );
    }

    #[test]
    fn parse_rejects_bad_markers() {
        assert_eq!(
            Grid::parse(["S..", "..."]).unwrap_err(),
            Error::MissingMarker { marker: 'E' }
        );
        assert_eq!(
            Grid::parse(["S.E", "..S"]).unwrap_err(),
            Error::DuplicateMarker {
                marker: 'S',
                first: Point::new(0, 0),
                second: Point::new(1, 2),
            }
        );
        assert_eq!(
            Grid::parse(["S?E"]).unwrap_err(),
            Error::UnknownSymbol {
                point: Point::new(0, 1),
                symbol: '?'
            }
        );
        assert_eq!(Grid::parse(Vec::<&str>::new()).unwrap_err(), Error::EmptyGrid);
    }

    #[test]
    fn extra_open_markers_are_open() {
        let symbols = Symbols {
            extra_open: vec!['O'],
            ..Symbols::default()
        };
        let grid = Grid::parse_with(["SOE"], &symbols).unwrap();
        assert!(grid.is_open(Point::new(0, 1)));
        assert_eq!(grid.to_string(), "S.E\n");
    }

    #[test]
    fn walls_cannot_cover_markers() {
        let mut grid = Grid::open(3, 3, Point::new(0, 0), Point::new(2, 2)).unwrap();
        grid.set_wall(Point::new(1, 1)).unwrap();
        assert!(!grid.is_open(Point::new(1, 1)));
        assert_eq!(
            grid.set_wall(Point::new(0, 0)),
            Err(Error::MarkerBlocked {
                point: Point::new(0, 0)
            })
        );
        assert_eq!(
            grid.set_wall(Point::new(3, 0)),
            Err(Error::OutOfBounds {
                point: Point::new(3, 0)
            })
        );
        grid.clear_wall(Point::new(1, 1)).unwrap();
        assert_eq!(grid.to_string(), "S..\n...\n..E\n");
    }
}
