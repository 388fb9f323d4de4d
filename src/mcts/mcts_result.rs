use crate::game::direction::Direction;

/// Accumulated cost per candidate direction at one decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationOutcome {
    costs: [u64; 4],
}

impl SimulationOutcome {
    pub fn from_costs(costs: [(Direction, u64); 4]) -> Self {
        let mut outcome = Self::default();
        for (direction, cost) in costs {
            outcome.costs[direction.index()] = cost;
        }
        outcome
    }

    pub fn cost(&self, direction: Direction) -> u64 {
        self.costs[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, cost: u64) {
        self.costs[direction.index()] = cost;
    }

    /// `(direction, cost)` pairs in [`Direction::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, u64)> + '_ {
        Direction::ALL.iter().map(move |&d| (d, self.cost(d)))
    }

    pub fn all_zero(&self) -> bool {
        self.costs.iter().all(|&c| c == 0)
    }
}

impl std::fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(d, c)| format!("{}={}", d, c)).collect();
        write!(f, "{}", parts.join(" "))
    }
}
