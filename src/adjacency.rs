use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};
use nom::IResult;
use nom::bytes::complete::is_not;
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::sequence::delimited;

use crate::color::Graph;
use crate::error::{Error, Result};

/// reads a line "<node> <neighbor1> <neighbor2> ..." (spaces or tabs as separators)
pub fn read_line(s: &str) -> IResult<&str, Vec<&str>> {
    delimited(space0, separated_list1(space1, is_not(" \t")), space0)(s)
}

/**
builds a graph from the content of an adjacency list.

Every node that starts a line is created first (in file order). Adjacencies are then
added in both directions. A neighbor that never starts a line is ignored (a warning is
logged), as are self references. Blank lines are skipped.
*/
pub fn parse_adjacency(content: &str) -> Result<Graph> {
    let mut lines: Vec<(usize, Vec<&str>)> = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() { continue; }
        let (_, names) = all_consuming(read_line)(line)
            .map_err(|e| Error::Parse { line: i+1, message: e.to_string() })?;
        lines.push((i+1, names));
    }
    let mut graph = Graph::new();
    for (_, names) in &lines {
        graph.add_node(names[0]);
    }
    let mut nb_ignored: usize = 0;
    for (line, names) in &lines {
        let node = names[0];
        for neighbor in &names[1..] {
            if *neighbor == node { continue; }
            if !graph.contains(neighbor) {
                warn!("line {}: unknown neighbor '{}' of '{}' ignored", line, neighbor, node);
                nb_ignored += 1;
                continue;
            }
            graph.add_adjacency(node, neighbor);
            graph.add_adjacency(neighbor, node);
        }
    }
    debug!(
        "adjacency list: {} nodes, {} adjacencies, {} ignored references",
        graph.nb_nodes(), graph.nb_adjacencies(), nb_ignored
    );
    Ok(graph)
}

/// reads an adjacency list file. A missing file is reported as [`Error::MissingInput`]
pub fn read_from_file<P: AsRef<Path>>(filename: P) -> Result<Graph> {
    let path = filename.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingInput(path.to_path_buf()))
        },
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_adjacency(&content)
}
