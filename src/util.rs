use std::path::{Path, PathBuf};

use clap::{ArgMatches, ErrorKind, value_t};
use serde_json::json;

use crate::error::Result;
use crate::palette::Palette;
use crate::report::{format_counts, write_file, ReportOptions};
use crate::search::restart::{OrderingStrategy, RestartConfig, SearchOutcome};

/** parameters of the executable */
#[derive(Debug, Clone)]
pub struct Params {
    /// adjacency list file
    pub adjacency: PathBuf,
    /// palette file
    pub colors: PathBuf,
    /// result file
    pub output: PathBuf,
    /// time limit (seconds)
    pub time: f32,
    /// random seed
    pub seed: Option<u64>,
    /// restart loop parameters
    pub restart: RestartConfig,
    /// console rendering
    pub report: ReportOptions,
    /// statistics file
    pub perf_file: Option<String>,
}

/** reads command line input. Fails if a value cannot be parsed, or if the time limit
is not a finite non-negative number of seconds */
pub fn read_params(main_args: &ArgMatches) -> std::result::Result<Params, clap::Error> {
    let adjacency = PathBuf::from(main_args.value_of("adjacency").unwrap_or("adjacent.txt"));
    let colors = PathBuf::from(main_args.value_of("colors").unwrap_or("colors.txt"));
    let output = PathBuf::from(main_args.value_of("output").unwrap_or("Output.txt"));
    let time = value_t!(main_args, "time", f32)?;
    if !time.is_finite() || time < 0. {
        return Err(clap::Error::with_description(
            &format!("invalid time limit '{}': expected a non-negative number of seconds", time),
            ErrorKind::InvalidValue,
        ));
    }
    let seed = if main_args.is_present("seed") {
        Some(value_t!(main_args, "seed", u64)?)
    } else {
        None
    };
    let ordering = match main_args.value_of("ordering") {
        Some("degree") => OrderingStrategy::DegreeRandomTies,
        _ => OrderingStrategy::Shuffle,
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}", e);
            Some(e.to_string())
        }
    };
    Ok(Params {
        adjacency, colors, output, time, seed,
        restart: RestartConfig {
            ordering,
            sort_initial_by_degree: main_args.is_present("sort-degree"),
        },
        report: ReportOptions {
            ansi: !main_args.is_present("no-ansi"),
            full_names: main_args.is_present("full-names"),
        },
        perf_file,
    })
}

/// exports search statistics to a json file
pub fn export_stats<P: AsRef<Path>>(
    inst_name: &Path,
    palette: &Palette,
    outcome: &SearchOutcome,
    perf_file: P,
) -> Result<()> {
    let colors: Vec<serde_json::Value> = palette.colors().iter()
        .map(|c| json!({ "name": c.to_string(), "hex": c.hex() }))
        .collect();
    let best_counts = outcome.best.as_ref().map(|b| format_counts(palette, &b.counts));
    let stats = json!({
        "inst_name": inst_name.display().to_string(),
        "palette": colors,
        "termination": outcome.termination,
        "best_counts": best_counts,
        "stats": outcome.stats,
    });
    let content = serde_json::to_string(&stats)?;
    write_file(perf_file, &content)
}
