pub mod heuristic;
pub mod ingest;
pub mod report;
pub mod types;

use serde::{Deserialize, Serialize};

pub use heuristic::{Outcome, PhaseValues, RATIO_EPSILON, SolveOptions, solve};
pub use types::{Item, ItemBuilder, Knapsack, Knapsackable, Pack, Packable};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Problem {
    pub items: Vec<Item>,
    pub knapsacks: Vec<Knapsack>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub total_value: u64,
    pub knapsacks: Vec<PackedKnapsack>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PackedKnapsack {
    pub name: String,
    pub capacity: u64,
    pub used: u64,
    pub items: Vec<String>,
}

impl Problem {
    pub fn pack(&self, options: &SolveOptions) -> anyhow::Result<Outcome<Item>> {
        solve(&self.items, &self.knapsacks, options)
    }

    pub fn solve(&self, options: &SolveOptions) -> anyhow::Result<Solution> {
        Ok(Solution::from(&self.pack(options)?))
    }
}

impl<I: Packable> From<&Outcome<I>> for Solution {
    fn from(outcome: &Outcome<I>) -> Self {
        let knapsacks = outcome
            .packs
            .iter()
            .map(|pack| PackedKnapsack {
                name: pack.name().to_owned(),
                capacity: pack.capacity(),
                used: pack.used(),
                items: pack
                    .items()
                    .iter()
                    .map(|item| item.name().to_owned())
                    .collect(),
            })
            .collect();

        Solution {
            total_value: outcome.total_value,
            knapsacks,
        }
    }
}
