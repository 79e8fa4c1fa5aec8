//! Greedy construction followed by local search for the multiple knapsack
//! problem.
//!
//! Items are ranked once by value/weight ratio and knapsacks by capacity. The
//! solve then runs a fixed sequence of single passes over three pieces of
//! state: which knapsack each item sits in, how much room each knapsack has
//! left, and the total value packed so far.
//!
//! 1. construction: first-fit every knapsack, smallest first;
//! 2. rearrangement: redistribute the packed items worst ratio first over a
//!    rotating cursor, then first-fit again;
//! 3. pairwise exchange: swap a heavier and a lighter item between two
//!    knapsacks when the freed room admits an unpacked item;
//! 4. replacement: swap a packed item for a bundle of unpacked ones worth
//!    more.

use std::cmp::Reverse;

use anyhow::{Result, bail};
use log::debug;

use crate::types::{Knapsackable, Pack, Packable};

/// Maximum acceptable drift when comparing value/weight ratios.
pub const RATIO_EPSILON: f64 = 1e-8;

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    /// Log the packing state after every phase.
    pub trace: bool,
}

/// Total packed value as it stood after each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseValues {
    pub construction: u64,
    pub rearrangement: u64,
    pub exchange: u64,
    pub replacement: u64,
}

#[derive(Debug, Clone)]
pub struct Outcome<I> {
    /// One pack per input knapsack, in the order the knapsacks were given.
    pub packs: Vec<Pack<I>>,
    pub total_value: u64,
    pub phases: PhaseValues,
}

/// Pack `items` into `knapsacks`.
///
/// Fails when either list is empty or when the item values together overflow a
/// `u64`. Every item ends up in at most one
/// pack and no pack exceeds its capacity, but the result is not guaranteed to
/// be optimal.
pub fn solve<I, K>(items: &[I], knapsacks: &[K], options: &SolveOptions) -> Result<Outcome<I>>
where
    I: Packable + Clone,
    K: Knapsackable,
{
    if items.is_empty() {
        bail!("no items to pack");
    }
    if knapsacks.is_empty() {
        bail!("no knapsacks to pack into");
    }
    if items
        .iter()
        .try_fold(0u64, |sum, item| sum.checked_add(item.value()))
        .is_none()
    {
        bail!("total item value exceeds {}", u64::MAX);
    }

    let knapsack_order = sort_knapsacks(knapsacks);
    let item_order = sort_items(items);
    debug!(
        "packing {} items into {} knapsacks",
        items.len(),
        knapsacks.len()
    );

    let mut state = State::new(
        item_order.iter().map(|&j| &items[j]).collect(),
        knapsack_order
            .iter()
            .map(|&i| knapsacks[i].capacity())
            .collect(),
    );

    state.construct();
    state.checkpoint("construction", options);
    let construction = state.z;

    state.rearrange();
    state.checkpoint("rearrangement", options);
    let rearrangement = state.z;

    state.exchange_pairs();
    state.checkpoint("exchange", options);
    let exchange = state.z;

    state.replace_items();
    state.checkpoint("replacement", options);

    let mut packs: Vec<Pack<I>> = knapsacks.iter().map(|k| k.empty_pack()).collect();
    for (j, slot) in state.y.iter().enumerate() {
        if let Some(i) = *slot {
            packs[knapsack_order[i]].push(state.items[j].clone());
        }
    }

    Ok(Outcome {
        packs,
        total_value: state.z,
        phases: PhaseValues {
            construction,
            rearrangement,
            exchange,
            replacement: state.z,
        },
    })
}

/// Knapsack indices, smallest capacity first.
fn sort_knapsacks<K: Knapsackable>(knapsacks: &[K]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..knapsacks.len()).collect();
    order.sort_by_key(|&i| knapsacks[i].capacity());
    order
}

/// Item indices, best ratio first.
fn sort_items<I: Packable>(items: &[I]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&j| (Reverse(ratio_bucket(&items[j])), Reverse(items[j].value())));
    order
}

/// Ratio rounded to a multiple of `RATIO_EPSILON`, so that ratios closer than
/// that compare equal and the order stays total.
fn ratio_bucket<I: Packable>(item: &I) -> i128 {
    let ratio = item.ratio();
    if ratio.is_infinite() {
        i128::MAX
    } else {
        (ratio / RATIO_EPSILON).round() as i128
    }
}

/// Packing state shared by all phases. Items and knapsacks are addressed by
/// their position in the sorted orders.
struct State<'a, I> {
    items: Vec<&'a I>,
    capacities: Vec<u64>,
    /// Knapsack holding each item.
    y: Vec<Option<usize>>,
    /// Room left in each knapsack.
    c: Vec<u64>,
    /// Value of everything packed.
    z: u64,
}

impl<'a, I: Packable> State<'a, I> {
    fn new(items: Vec<&'a I>, capacities: Vec<u64>) -> Self {
        Self {
            y: vec![None; items.len()],
            c: capacities.clone(),
            z: 0,
            items,
            capacities,
        }
    }

    fn weight(&self, j: usize) -> u64 {
        self.items[j].weight()
    }

    fn value(&self, j: usize) -> u64 {
        self.items[j].value()
    }

    /// Single first-fit pass of the unpacked items into knapsack `i`.
    fn greedy_fill(&mut self, i: usize) {
        for j in 0..self.items.len() {
            let weight = self.weight(j);
            if self.y[j].is_none() && weight <= self.c[i] {
                self.y[j] = Some(i);
                self.c[i] -= weight;
                self.z += self.value(j);
            }
        }
    }

    fn construct(&mut self) {
        for i in 0..self.c.len() {
            self.greedy_fill(i);
        }
    }

    fn rearrange(&mut self) {
        let m = self.c.len();
        self.c.copy_from_slice(&self.capacities);
        self.z = 0;

        let mut cursor = 0;
        for j in (0..self.items.len()).rev() {
            if self.y[j].is_none() {
                continue;
            }
            let weight = self.weight(j);
            let target = (cursor..m)
                .chain(0..cursor.saturating_sub(1))
                .find(|&k| self.c[k] >= weight);
            match target {
                None => self.y[j] = None,
                Some(k) => {
                    self.y[j] = Some(k);
                    self.c[k] -= weight;
                    self.z += self.value(j);
                    cursor = if k + 1 < m { k + 1 } else { 0 };
                }
            }
        }

        for i in 0..m {
            self.greedy_fill(i);
        }
    }

    fn exchange_pairs(&mut self) {
        let n = self.items.len();
        for j in 0..n {
            for k in (j + 1)..n {
                let (Some(in_j), Some(in_k)) = (self.y[j], self.y[k]) else {
                    continue;
                };
                if in_j == in_k {
                    continue;
                }

                let (h, l, from_h, from_l) = if self.weight(j) >= self.weight(k) {
                    (j, k, in_j, in_k)
                } else {
                    (k, j, in_k, in_j)
                };
                let d = self.weight(h) - self.weight(l);

                let Some(u) = self.lightest_unpacked() else {
                    continue;
                };
                let room = self.c[from_h] + d;
                if d > self.c[from_l] || room < self.weight(u) {
                    continue;
                }
                let Some(t) = self.most_valuable_unpacked(room) else {
                    continue;
                };

                self.c[from_h] = room - self.weight(t);
                self.c[from_l] -= d;
                self.y[t] = Some(from_h);
                self.y[h] = Some(from_l);
                self.y[l] = Some(from_h);
                self.z += self.value(t);
            }
        }
    }

    fn replace_items(&mut self) {
        for j in (0..self.items.len()).rev() {
            let Some(i) = self.y[j] else {
                continue;
            };

            let mut room = self.c[i] + self.weight(j);
            let mut bundle = Vec::new();
            for k in 0..self.items.len() {
                let weight = self.weight(k);
                if self.y[k].is_none() && weight <= room {
                    bundle.push(k);
                    room -= weight;
                }
            }

            let gain: u64 = bundle.iter().map(|&k| self.value(k)).sum();
            if gain > self.value(j) {
                for &k in &bundle {
                    self.y[k] = Some(i);
                }
                self.c[i] = room;
                self.y[j] = None;
                self.z = self.z + gain - self.value(j);
            }
        }
    }

    /// First unpacked item of least weight.
    fn lightest_unpacked(&self) -> Option<usize> {
        (0..self.items.len())
            .filter(|&x| self.y[x].is_none())
            .min_by_key(|&x| self.weight(x))
    }

    /// First unpacked item of greatest value among those weighing at most
    /// `limit`.
    fn most_valuable_unpacked(&self, limit: u64) -> Option<usize> {
        (0..self.items.len())
            .filter(|&x| self.y[x].is_none() && self.weight(x) <= limit)
            .fold(None, |best, x| match best {
                Some(b) if self.value(b) >= self.value(x) => Some(b),
                _ => Some(x),
            })
    }

    /// Whether `c` and `z` agree with `y`.
    fn is_consistent(&self) -> bool {
        let mut used = vec![0u64; self.c.len()];
        let mut value = 0;
        for (j, slot) in self.y.iter().enumerate() {
            if let Some(i) = *slot {
                used[i] += self.weight(j);
                value += self.value(j);
            }
        }
        value == self.z
            && self
                .capacities
                .iter()
                .zip(&self.c)
                .zip(&used)
                .all(|((&cap, &left), &used)| left <= cap && cap - left == used)
    }

    fn checkpoint(&self, phase: &str, options: &SolveOptions) {
        debug_assert!(self.is_consistent(), "inconsistent state after {phase}");
        if options.trace {
            debug!("{phase}: z={}, c={:?}, y={:?}", self.z, self.c, self.y);
        }
    }
}
