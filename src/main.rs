use std::fs::{read_to_string, write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use multiknap::report::{ReportOptions, render};
use multiknap::{Problem, Solution, SolveOptions, ingest};

/// Approximate a multiple knapsack problem.
///
/// Plain text input declares knapsacks as `count capacity` lines and items as
/// `name value weight` lines. Files ending in `.yaml` or `.yml` hold a
/// problem with `items` and `knapsacks` lists instead, and get a YAML solution
/// back.
#[derive(Debug, Parser)]
struct Opts {
    /// Problem file.
    #[clap(default_value = "input")]
    file: PathBuf,

    /// Where to write the report.
    #[clap(short = 'o', long, default_value = "output")]
    output: PathBuf,

    /// Report quantities divided by 10^power (the default).
    #[clap(long, overrides_with = "no_scale")]
    scale: bool,

    /// Report quantities as given.
    #[clap(long, overrides_with = "scale")]
    no_scale: bool,

    /// Power of ten used when scaling.
    #[clap(short = 'p', long, default_value = "3")]
    power: u32,

    /// Enable verbose output, including the packing state after every
    /// phase. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let solve_options = SolveOptions {
        trace: opts.verbose > 0,
    };

    info!("Reading data from file: {}", opts.file.display());
    let problem: Problem = if is_yaml(&opts.file) {
        let buf = read_to_string(&opts.file)
            .with_context(|| format!("unable to open {}", opts.file.display()))?;
        serde_yaml::from_str(&buf)?
    } else {
        ingest::read(&opts.file)?
    };

    info!(
        "start packing {} items into {} knapsacks",
        problem.items.len(),
        problem.knapsacks.len()
    );
    let started = Instant::now();
    let outcome = problem.pack(&solve_options)?;
    let elapsed = started.elapsed();
    info!(
        "end packing, total value {} in {:?}",
        outcome.total_value, elapsed
    );

    let text = if is_yaml(&opts.file) {
        let text = serde_yaml::to_string(&Solution::from(&outcome))?;
        println!("{}", text);
        text
    } else {
        let report_options = ReportOptions {
            scale: opts.scale || !opts.no_scale,
            power: opts.power,
        };
        let report = render(&outcome, &report_options, elapsed);
        println!("{}", report.colored());
        report.plain()
    };

    write(&opts.output, text)
        .with_context(|| format!("unable to write {}", opts.output.display()))?;
    Ok(())
}
