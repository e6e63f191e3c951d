use std::fs;
use std::path::{Path, PathBuf};

use crate::color::{checker, CheckerResult, Graph};
use crate::error::{Error, Result};
use crate::palette::{ColorId, Palette, ANSI_RESET};
use crate::regions::full_name;
use crate::search::greedy::color_counts;
use crate::search::restart::{AttemptResult, ResultSink};

/** rendering options */
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// wrap each line in the ANSI escape of its color
    pub ansi: bool,
    /// print full region names instead of abbreviations (when known)
    pub full_names: bool,
}

/// usage of each color, in palette order: {BLUE=12, GREEN=10, RED=8, YELLOW=3}
pub fn format_counts(palette: &Palette, counts: &[usize]) -> String {
    let entries: Vec<String> = counts.iter().enumerate()
        .map(|(c, nb)| format!("{}={}", palette.label(c), nb))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// one "<name>:<color>" line per row, a blank line, then the color usage
fn render_rows<'a, I>(rows: I, counts: &[usize], palette: &Palette, options: ReportOptions) -> String
where I: Iterator<Item=(&'a str, Option<ColorId>)> {
    let mut res = String::default();
    for (node, color) in rows {
        let name: &str = match full_name(node) {
            Some(full) if options.full_names => full,
            _ => node,
        };
        let label = color.map(|c| palette.label(c)).unwrap_or_default();
        let escape = match color {
            Some(c) if options.ansi => palette.color(c).ansi(),
            _ => None,
        };
        match escape {
            None => res += format!("{}:{}\n", name, label).as_str(),
            Some(e) => res += format!("{}{}:{}{}\n", e, name, label, ANSI_RESET).as_str(),
        }
    }
    res += "\n";
    res += format_counts(palette, counts).as_str();
    res += "\n";
    res
}

/**
renders the graph: one "<name>:<color>" line per node in the visitation order,
a blank line, then the number of uses of each color.
*/
pub fn render(graph: &Graph, palette: &Palette, options: ReportOptions) -> String {
    let rows = graph.nodes().map(|n| (n.name(), n.color()));
    render_rows(rows, &color_counts(graph, palette), palette, options)
}

/// renders a recorded attempt in the same format as [`render`]
pub fn render_result(result: &AttemptResult, palette: &Palette, options: ReportOptions) -> String {
    let rows = result.assignment.iter().map(|(name, c)| (name.as_str(), Some(*c)));
    render_rows(rows, &result.counts, palette, options)
}

/// overwrites filename with content
pub fn write_file<P: AsRef<Path>>(filename: P, content: &str) -> Result<()> {
    let path = filename.as_ref();
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/** prints each recorded attempt on the console (with terminal colors if enabled)
and writes it, without escapes, to the output file */
#[derive(Debug, Clone)]
pub struct ReportSink {
    /// output file, overwritten at each record
    output: PathBuf,
    /// console rendering options
    options: ReportOptions,
}

impl ReportSink {
    /// creates a sink writing in output
    pub fn new<P: Into<PathBuf>>(output: P, options: ReportOptions) -> Self {
        Self { output: output.into(), options }
    }
}

impl ResultSink for ReportSink {
    fn record(&mut self, graph: &Graph, palette: &Palette, result: &AttemptResult) -> Result<()> {
        match checker(graph, palette) {
            CheckerResult::Ok(_) => {},
            checker_result => { println!("invalid solution (reason: {:?})", checker_result) }
        };
        println!("{}", render_result(result, palette, self.options));
        let file_options = ReportOptions { ansi: false, ..self.options };
        match write_file(&self.output, &render_result(result, palette, file_options)) {
            Ok(()) => {
                println!("Map output to --> \"{}\"", self.output.display());
                Ok(())
            },
            Err(e) => {
                println!("Failed to output map");
                Err(e)
            }
        }
    }
}
