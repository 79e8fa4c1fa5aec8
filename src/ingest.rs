//! Line oriented problem files.
//!
//! ```text
//! # count capacity
//! 2 100
//! # name value weight
//! i1 80 40
//! ```
//!
//! Lines starting with `#` or `;` are comments. A malformed line is reported
//! and skipped, the rest of the file is still read.

use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::warn;

use crate::Problem;
use crate::types::{Item, Knapsack};

/// Largest number of knapsacks a single line may declare.
pub const MAX_KNAPSACKS_PER_LINE: u64 = 1 << 20;

pub fn read(path: &Path) -> Result<Problem> {
    let text =
        read_to_string(path).with_context(|| format!("unable to open {}", path.display()))?;
    parse(&text)
}

pub fn parse(text: &str) -> Result<Problem> {
    let mut problem = Problem::default();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Err(err) = parse_line(line, &mut problem) {
            warn!("{err}, skipping:\n>>>   {line}");
        }
    }

    if problem.knapsacks.is_empty() {
        bail!("no knapsacks declared, probably a malformed input file");
    }
    if problem.items.is_empty() {
        bail!("no items declared, probably a malformed input file");
    }
    Ok(problem)
}

fn parse_line(line: &str, problem: &mut Problem) -> Result<()> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields[..] {
        [count, capacity] => {
            let count: u64 = count.parse().context("unable to parse knapsack count")?;
            if count > MAX_KNAPSACKS_PER_LINE {
                bail!("knapsack count {count} exceeds {MAX_KNAPSACKS_PER_LINE}");
            }
            let capacity: u64 = capacity
                .parse()
                .context("unable to parse knapsack capacity")?;
            problem.knapsacks.extend(
                (1..=count).map(|n| Knapsack::new(format!("knap-{n}-{capacity}"), capacity)),
            );
        }
        [name, value, weight] => {
            let value = value.parse().context("unable to parse item value")?;
            let weight = weight.parse().context("unable to parse item weight")?;
            problem.items.push(Item::new(name, weight, value));
        }
        _ => bail!("expected 2 or 3 fields, found {}", fields.len()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Knapsackable, Packable};

    #[test]
    fn reads_knapsacks_and_items() {
        let problem = parse(
            "# knapsacks\n\
             2 100\n\
             1 150\n\
             ; items\n\
             i1 80 40\n\
             \n\
             i2 20 10\n",
        )
        .unwrap();

        let names: Vec<&str> = problem.knapsacks.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["knap-1-100", "knap-2-100", "knap-1-150"]);
        assert_eq!(problem.knapsacks[2].capacity(), 150);

        assert_eq!(problem.items.len(), 2);
        assert_eq!(problem.items[0].name(), "i1");
        assert_eq!(problem.items[0].value(), 80);
        assert_eq!(problem.items[0].weight(), 40);
    }

    #[test]
    fn skips_malformed_lines() {
        let problem = parse(
            "1 10\n\
             x 10\n\
             i1 5 3\n\
             i2 five 3\n\
             i3 5 -3\n\
             i4 1 2 3 4\n\
             i5 4 2\n",
        )
        .unwrap();

        let names: Vec<&str> = problem.items.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["i1", "i5"]);
        assert_eq!(problem.knapsacks.len(), 1);
    }

    #[test]
    fn skips_absurd_knapsack_counts() {
        let problem = parse(
            "18446744073709551615 100\n\
             2 50\n\
             i1 1 1\n",
        )
        .unwrap();
        assert_eq!(problem.knapsacks.len(), 2);
        assert!(problem.knapsacks.iter().all(|k| k.capacity() == 50));
    }

    #[test]
    fn zero_count_declares_nothing() {
        let err = parse("0 100\ni1 1 1\n").unwrap_err();
        assert!(err.to_string().contains("no knapsacks"));
    }

    #[test]
    fn rejects_files_without_items() {
        let err = parse("# only knapsacks\n3 50\n").unwrap_err();
        assert!(err.to_string().contains("no items"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read(Path::new("does/not/exist.txt")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
