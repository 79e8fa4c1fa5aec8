use serde::{Deserialize, Serialize};

/// Something that can be placed in a knapsack.
pub trait Packable {
    fn name(&self) -> &str;
    fn weight(&self) -> u64;
    fn value(&self) -> u64;

    /// Value per unit of weight. Weightless items rank above everything else.
    fn ratio(&self) -> f64 {
        match self.weight() {
            0 => f64::INFINITY,
            w => self.value() as f64 / w as f64,
        }
    }
}

/// A knapsack description. The solver only reads it and asks it for an empty
/// container to put the chosen items in.
pub trait Knapsackable {
    fn name(&self) -> &str;
    fn capacity(&self) -> u64;

    fn empty_pack<I: Packable>(&self) -> Pack<I> {
        Pack::new(self.name(), self.capacity())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,
    weight: u64,
    value: u64,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
        }
    }

    pub fn builder(name: impl Into<String>) -> ItemBuilder {
        ItemBuilder {
            name: name.into(),
            weight: 0,
            value: 0,
        }
    }
}

impl Packable for Item {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u64 {
        self.weight
    }

    fn value(&self) -> u64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct ItemBuilder {
    name: String,
    weight: u64,
    value: u64,
}

impl ItemBuilder {
    pub fn weight(mut self, weight: u64) -> Self {
        self.weight = weight;
        self
    }

    pub fn value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }

    pub fn build(self) -> Item {
        Item {
            name: self.name,
            weight: self.weight,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knapsack {
    name: String,
    capacity: u64,
}

impl Knapsack {
    pub fn new(name: impl Into<String>, capacity: u64) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

impl Knapsackable for Knapsack {
    fn name(&self) -> &str {
        &self.name
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }
}

/// A filled knapsack as produced by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Pack<I> {
    name: String,
    capacity: u64,
    items: Vec<I>,
}

impl<I: Packable> Pack<I> {
    pub fn new(name: impl Into<String>, capacity: u64) -> Self {
        Self {
            name: name.into(),
            capacity,
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn push(&mut self, item: I) {
        self.items.push(item);
    }

    /// Total weight of the packed items.
    pub fn used(&self) -> u64 {
        self.items.iter().map(Packable::weight).sum()
    }

    pub fn total_value(&self) -> u64 {
        self.items.iter().map(Packable::value).sum()
    }
}
