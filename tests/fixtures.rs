use grid_navigation::*;

const CLASSIC_MAZE: [&str; 15] = [
    "###############",
    "#.......#....E#",
    "#.#.###.#.###.#",
    "#.....#.#...#.#",
    "#.###.#####.#.#",
    "#.#.#.......#.#",
    "#.#.#####.###.#",
    "#...........#.#",
    "###.#.#####.#.#",
    "#...#.....#.#.#",
    "#.#.#.###.#.#.#",
    "#.....#...#.#.#",
    "#.###.#.#.#.#.#",
    "#S..#.....#...#",
    "###############",
];

const SECOND_MAZE: [&str; 17] = [
    "#################",
    "#...#...#...#..E#",
    "#.#.#.#.#.#.#.#.#",
    "#.#.#.#...#...#.#",
    "#.#.#.#.###.#.#.#",
    "#...#.#.#.....#.#",
    "#.#.#.#.#.#####.#",
    "#.#...#.#.#.....#",
    "#.#.#####.#.###.#",
    "#.#.#.......#...#",
    "#.#.###.#####.###",
    "#.#.#...#.....#.#",
    "#.#.#.#####.###.#",
    "#.#.#.........#.#",
    "#.#.#.#########.#",
    "#S#.............#",
    "#################",
];

/// Obstacles as `row,col`, in the order they are placed.
const FALLING: [&str; 25] = [
    "5,4", "4,2", "4,5", "3,0", "2,1", "6,3", "2,4", "1,5", "0,6", "3,3", "2,6", "5,1", "1,2",
    "5,5", "2,5", "6,5", "1,4", "0,4", "6,4", "1,1", "6,1", "1,0", "0,5", "1,6", "2,0",
];

fn obstacles() -> Vec<Point> {
    FALLING
        .iter()
        .map(|s| {
            let (row, col) = s.split_once(',').unwrap();
            Point::new(row.parse().unwrap(), col.parse().unwrap())
        })
        .collect()
}

fn obstacle_maze(placed: usize) -> Maze {
    let grid = Grid::open(7, 7, Point::new(0, 0), Point::new(6, 6)).unwrap();
    let mut maze = Maze::new(grid);
    maze.add_walls(obstacles().into_iter().take(placed)).unwrap();
    maze
}

#[test]
fn straight_corridor_costs_its_length() {
    let maze = Maze::parse(["###########", "#S.......E#", "###########"]).unwrap();
    assert_eq!(maze.cheapest::<i64, _>(Direction::East, StepCost), Some(8));
    assert_eq!(maze.graph().len(), 2);
}

#[test]
fn classic_maze_with_turn_penalty() {
    let maze = Maze::parse(CLASSIC_MAZE).unwrap();
    let cost = maze.cheapest::<i64, _>(Direction::East, TurnPenalty::default());
    assert_eq!(cost, Some(7036));
}

#[test]
fn classic_maze_tied_paths_touch_45_cells() {
    let maze = Maze::parse(CLASSIC_MAZE).unwrap();
    let (cost, cells) = maze
        .optimal_cells::<i64, _>(Direction::East, TurnPenalty::default())
        .unwrap()
        .unwrap();
    assert_eq!(cost, 7036);
    assert_eq!(cells.len(), 45);
}

#[test]
fn second_maze() {
    let maze = Maze::parse(SECOND_MAZE).unwrap();
    let (cost, cells) = maze
        .optimal_cells::<i64, _>(Direction::East, TurnPenalty::default())
        .unwrap()
        .unwrap();
    assert_eq!(cost, 11048);
    assert_eq!(cells.len(), 64);
}

#[test]
fn solve_and_solve_all_agree() {
    for lines in [&CLASSIC_MAZE[..], &SECOND_MAZE[..]] {
        let grid = Grid::parse(lines).unwrap();
        let graph = Graph::compress(&grid);
        for facing in Direction::ALL {
            let penalty = TurnPenalty::default();
            let single = solve::<i64, _>(&graph, grid.start(), grid.end(), facing, penalty);
            let all = solve_all::<i64, _>(&graph, grid.start(), grid.end(), facing, penalty);
            let (cost, paths) = all.unwrap();
            assert_eq!(single, Some(cost));
            assert!(!paths.is_empty());
        }
    }
}

#[test]
fn expanded_paths_collapse_back() {
    let grid = Grid::parse(CLASSIC_MAZE).unwrap();
    let graph = Graph::compress(&grid);
    let (_, paths) = solve_all::<i64, _>(
        &graph,
        grid.start(),
        grid.end(),
        Direction::East,
        TurnPenalty::default(),
    )
    .unwrap();
    for path in &paths {
        let cells = expand(path, &graph).unwrap();
        assert_eq!(&collapse(&cells, &graph), path);
        // Every step moves to an orthogonal neighbour through open cells.
        for pair in cells.points.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
            assert!(grid.is_open(pair[1]));
        }
        assert_eq!(cells.points.len() as i64 - 1, cells.cost % 1000);
    }
}

#[test]
fn larger_cost_functions_never_cost_less() {
    let grid = Grid::parse(SECOND_MAZE).unwrap();
    let graph = Graph::compress(&grid);
    let mut previous = 0;
    for turn in [0, 1, 10, 1000, 5000] {
        let penalty = TurnPenalty { turn, step: 1 };
        let cost = solve::<i64, _>(&graph, grid.start(), grid.end(), Direction::East, penalty);
        let cost = cost.unwrap();
        assert!(cost >= previous);
        previous = cost;
    }
    let plain = solve::<i64, _>(&graph, grid.start(), grid.end(), Direction::East, StepCost);
    let free_turns = TurnPenalty { turn: 0, step: 1 };
    assert_eq!(
        plain,
        solve::<i64, _>(&graph, grid.start(), grid.end(), Direction::East, free_turns)
    );
}

#[test]
fn obstacle_scenario_shortest_path() {
    let maze = obstacle_maze(12);
    assert_eq!(maze.cheapest::<i64, _>(Direction::South, StepCost), Some(22));
}

#[test]
fn first_disconnecting_obstacle() {
    let mut maze = obstacle_maze(12);
    let mut blocking = None;
    for point in obstacles().into_iter().skip(12) {
        maze.add_wall(point).unwrap();
        let graph = maze.graph();
        let cost = solve::<i64, _>(
            graph,
            maze.grid().start(),
            maze.grid().end(),
            Direction::South,
            StepCost,
        );
        assert_eq!(cost.is_some(), maze.reachable());
        if cost.is_none() {
            blocking = Some(point);
            break;
        }
    }
    assert_eq!(blocking, Some(Point::new(6, 1)));
}
