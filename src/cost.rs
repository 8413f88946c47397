use crate::graph::Edge;
use crate::search::State;

/// Computes the accumulated cost of following `edge` out of `state`.
///
/// Implementations must never return less than `state.cost`; the search relies on costs being
/// non-decreasing along a path. Any `Fn(&State<C>, &Edge) -> C` closure is a cost function.
pub trait CostFn<C> {
    fn cost(&self, state: &State<C>, edge: &Edge) -> C;
}

impl<C, F> CostFn<C> for F
where
    F: Fn(&State<C>, &Edge) -> C,
{
    fn cost(&self, state: &State<C>, edge: &Edge) -> C {
        self(state, edge)
    }
}

/// Plain distance accumulation: every grid step costs 1 and facing is irrelevant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepCost;

impl CostFn<i64> for StepCost {
    fn cost(&self, state: &State<i64>, edge: &Edge) -> i64 {
        state.cost + i64::from(edge.distance)
    }
}

/// Charges `turn` whenever an edge leaves in a different direction than the state faces, plus
/// `step` per grid step. Reversing direction counts as a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnPenalty {
    pub turn: i64,
    pub step: i64,
}

impl Default for TurnPenalty {
    fn default() -> TurnPenalty {
        TurnPenalty {
            turn: 1000,
            step: 1,
        }
    }
}

impl CostFn<i64> for TurnPenalty {
    fn cost(&self, state: &State<i64>, edge: &Edge) -> i64 {
        let turn = if edge.direction != state.direction {
            self.turn
        } else {
            0
        };
        state.cost + turn + self.step * i64::from(edge.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use crate::point::Direction;

    fn state(direction: Direction, cost: i64) -> State<i64> {
        State {
            node: NodeId(0),
            direction,
            cost,
        }
    }

    fn edge(direction: Direction, distance: u32) -> Edge {
        Edge {
            to: NodeId(1),
            direction,
            distance,
        }
    }

    #[test]
    fn step_cost_ignores_facing() {
        let s = state(Direction::North, 5);
        assert_eq!(StepCost.cost(&s, &edge(Direction::North, 3)), 8);
        assert_eq!(StepCost.cost(&s, &edge(Direction::West, 3)), 8);
    }

    #[test]
    fn turn_penalty_charges_direction_changes() {
        let penalty = TurnPenalty::default();
        let s = state(Direction::East, 10);
        assert_eq!(penalty.cost(&s, &edge(Direction::East, 4)), 14);
        assert_eq!(penalty.cost(&s, &edge(Direction::South, 4)), 1014);
        assert_eq!(penalty.cost(&s, &edge(Direction::West, 1)), 1011);
    }

    #[test]
    fn closures_are_cost_functions() {
        let double = |s: &State<u64>, e: &Edge| s.cost + 2 * u64::from(e.distance);
        let s = State {
            node: NodeId(0),
            direction: Direction::South,
            cost: 1u64,
        };
        assert_eq!(double.cost(&s, &edge(Direction::South, 3)), 7);
    }
}
