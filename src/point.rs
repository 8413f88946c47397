use core::fmt;
use std::ops::Add;

/// A grid coordinate. Rows grow southwards, columns grow eastwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Point {
        Point { row, col }
    }

    /// The point one step away in the given direction.
    pub fn step(self, direction: Direction) -> Point {
        self + direction
    }

    /// The four orthogonal neighbours.
    pub fn neumann_neighborhood(self) -> Vec<Point> {
        grid_util::Point::from(self)
            .neumann_neighborhood()
            .into_iter()
            .map(Point::from)
            .collect()
    }

    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        grid_util::Point::from(*self).manhattan_distance(&grid_util::Point::from(*other))
    }
}

/// Columns map to `x` and rows to `y`.
impl From<Point> for grid_util::Point {
    fn from(point: Point) -> grid_util::Point {
        grid_util::Point::new(point.col, point.row)
    }
}

impl From<grid_util::Point> for Point {
    fn from(point: grid_util::Point) -> Point {
        Point::new(point.y, point.x)
    }
}

impl Add<Direction> for Point {
    type Output = Point;

    fn add(self, direction: Direction) -> Point {
        let (d_row, d_col) = direction.delta();
        Point::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal facing. The discriminants fix the order in which edges are traced and in which
/// equal-cost queue entries are popped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn num(self) -> usize {
        self as usize
    }

    /// Unit step as `(d_row, d_col)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        Direction::ALL[(self.num() + 2) % 4]
    }

    /// Whether two directions lie on the same axis.
    pub fn collinear(self, other: Direction) -> bool {
        self.num() % 2 == other.num() % 2
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}
