use std::time::Duration;

use colored::Colorize;

use crate::heuristic::Outcome;
use crate::types::Packable;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Print quantities divided by `10^power`.
    pub scale: bool,
    pub power: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            scale: true,
            power: 3,
        }
    }
}

impl ReportOptions {
    fn quantity(&self, amount: u64) -> String {
        if self.scale {
            format!("{:.3}", amount as f64 / 10f64.powi(self.power as i32))
        } else {
            amount.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Summary,
    Knapsack,
    Item,
}

/// A rendered solve: a summary, then every knapsack followed by its items.
#[derive(Debug, Clone)]
pub struct Report {
    lines: Vec<(LineKind, String)>,
}

impl Report {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(_, line)| line.as_str())
    }

    pub fn plain(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    /// Summary in red, knapsacks in magenta, items in green.
    pub fn colored(&self) -> String {
        self.lines
            .iter()
            .map(|(kind, line)| {
                let line = match kind {
                    LineKind::Summary => line.red(),
                    LineKind::Knapsack => line.magenta(),
                    LineKind::Item => line.green(),
                };
                line.to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn render<I: Packable>(
    outcome: &Outcome<I>,
    options: &ReportOptions,
    elapsed: Duration,
) -> Report {
    let capacity: u64 = outcome
        .packs
        .iter()
        .fold(0u64, |sum, pack| sum.saturating_add(pack.capacity()));
    let packed: usize = outcome.packs.iter().map(|pack| pack.items().len()).sum();

    let mut lines = vec![(
        LineKind::Summary,
        format!(
            "capacity: {}, max: {}, num: {}, time: {} seconds",
            options.quantity(capacity),
            options.quantity(outcome.total_value),
            packed,
            elapsed.as_secs()
        ),
    )];

    for pack in &outcome.packs {
        lines.push((
            LineKind::Knapsack,
            format!(
                "knap: name({}), capacity({}), used({}), num({})",
                pack.name(),
                options.quantity(pack.capacity()),
                options.quantity(pack.used()),
                pack.items().len()
            ),
        ));
        lines.extend(pack.items().iter().map(|item| {
            (
                LineKind::Item,
                format!(
                    "    item: name({}), weight({}), value({})",
                    item.name(),
                    options.quantity(item.weight()),
                    options.quantity(item.value())
                ),
            )
        }));
    }
    Report { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::PhaseValues;
    use crate::types::{Item, Pack};

    fn outcome() -> Outcome<Item> {
        let mut full = Pack::new("k1", 5000);
        full.push(Item::new("i1", 3000, 5000));
        full.push(Item::new("i3", 1000, 4000));
        Outcome {
            packs: vec![full, Pack::new("k2", 2500)],
            total_value: 9000,
            phases: PhaseValues::default(),
        }
    }

    #[test]
    fn renders_raw_quantities() {
        let options = ReportOptions {
            scale: false,
            power: 3,
        };
        let report = render(&outcome(), &options, Duration::from_secs(2));
        assert_eq!(
            report.plain(),
            "capacity: 7500, max: 9000, num: 2, time: 2 seconds\n\
             knap: name(k1), capacity(5000), used(4000), num(2)\n    \
             item: name(i1), weight(3000), value(5000)\n    \
             item: name(i3), weight(1000), value(4000)\n\
             knap: name(k2), capacity(2500), used(0), num(0)"
        );
    }

    #[test]
    fn renders_scaled_quantities() {
        let report = render(&outcome(), &ReportOptions::default(), Duration::ZERO);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines[0],
            "capacity: 7.500, max: 9.000, num: 2, time: 0 seconds"
        );
        assert_eq!(
            lines[2],
            "    item: name(i1), weight(3.000), value(5.000)"
        );
    }

    #[test]
    fn colors_each_kind_of_line() {
        colored::control::set_override(true);
        let report = render(&outcome(), &ReportOptions::default(), Duration::ZERO);
        let colored = report.colored();
        let lines: Vec<&str> = colored.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("\u{1b}[31m"));
        assert!(lines[1].starts_with("\u{1b}[35m"));
        assert!(lines[2].starts_with("\u{1b}[32m"));
        assert!(lines[4].starts_with("\u{1b}[35m"));
        assert!(!report.plain().contains('\u{1b}'));
    }
}
