use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::palette::{ColorId, Palette};

/** position of a node in the graph storage (stable for the whole run) */
pub type NodeId = usize;

/** a region of the map */
#[derive(Debug, Clone)]
pub struct Node {
    /// unique name (usually a state/province abbreviation)
    name: String,
    /// color assigned during the current attempt
    color: Option<ColorId>,
    /// names of the adjacent nodes (ordered, no duplicates)
    adjacent: Vec<String>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), color: None, adjacent: Vec::new() }
    }

    /// name of the node
    pub fn name(&self) -> &str { &self.name }

    /// color of the node (None if not colored yet)
    pub fn color(&self) -> Option<ColorId> { self.color }

    /// names of the adjacent nodes
    pub fn adjacent(&self) -> &[String] { &self.adjacent }

    /// number of adjacent nodes
    pub fn degree(&self) -> usize { self.adjacent.len() }
}

/**
models the map to color.

Adjacency is a relation between names: neighbors are looked up by name in the
graph each time they are needed. Node identities and adjacency do not change
once the graph is loaded, only the visitation order and the colors do.
*/
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// nodes in creation order
    nodes: Vec<Node>,
    /// name -> position in nodes
    index: HashMap<String, NodeId>,
    /// visitation order (a permutation of 0..nodes.len())
    order: Vec<NodeId>,
}

impl Graph {
    /// empty graph
    pub fn new() -> Self { Self::default() }

    /// number of nodes
    pub fn nb_nodes(&self) -> usize { self.nodes.len() }

    /// number of adjacency entries (each symmetric pair counts twice)
    pub fn nb_adjacencies(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum()
    }

    /// adds a node if it does not exist yet. returns its id
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node::new(name));
        self.index.insert(name.to_string(), id);
        self.order.push(id);
        id
    }

    /** adds neighbor to the adjacency of name (one direction only).
    returns false if name is not in the graph */
    pub fn add_adjacency(&mut self, name: &str, neighbor: &str) -> bool {
        match self.index.get(name) {
            None => false,
            Some(id) => {
                let adjacent = &mut self.nodes[*id].adjacent;
                if !adjacent.iter().any(|a| a == neighbor) {
                    adjacent.push(neighbor.to_string());
                }
                true
            }
        }
    }

    /// true if a node with this name exists
    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    /// node with the given name
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|id| &self.nodes[*id])
    }

    /// node at a given id
    pub fn node_by_id(&self, id: NodeId) -> &Node { &self.nodes[id] }

    /// names adjacent to name (empty if name is unknown)
    pub fn neighbors(&self, name: &str) -> &[String] {
        match self.node(name) {
            None => &[],
            Some(n) => n.adjacent(),
        }
    }

    /// color of the node name (None if unknown or uncolored)
    pub fn color_of(&self, name: &str) -> Option<ColorId> {
        self.node(name).and_then(Node::color)
    }

    /// sets the color of the node id
    pub fn set_color(&mut self, id: NodeId, color: Option<ColorId>) {
        self.nodes[id].color = color;
    }

    /// current visitation order
    pub fn order(&self) -> &[NodeId] { &self.order }

    /// nodes in the visitation order
    pub fn nodes(&self) -> impl Iterator<Item=&Node> + '_ {
        self.order.iter().map(move |id| &self.nodes[*id])
    }

    /// randomly permutes the visitation order
    pub fn shuffle_order<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /** sorts the visitation order by decreasing degree. The sort is stable: nodes with the
    same degree keep their relative order (shuffle first to break ties randomly) */
    pub fn sort_by_degree(&mut self) {
        let nodes = &self.nodes;
        self.order.sort_by(|a, b| nodes[*b].degree().cmp(&nodes[*a].degree()));
    }

    /// removes every color
    pub fn decolorize(&mut self) {
        for n in self.nodes.iter_mut() {
            n.color = None;
        }
    }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t nodes", self.nb_nodes());
        println!("\t{} \t adjacencies", self.nb_adjacencies());
        let degrees: Vec<usize> = self.nodes.iter().map(Node::degree).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
    }
}

/** result of the coloring checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// every node is colored and no neighbors share a color. contains the number of colors used
    Ok(usize),
    /// a node has no color
    Uncolored(String),
    /// two adjacent nodes share a color
    Conflict(String, String),
    /// a node has a color outside of the palette
    UnknownColor(String),
}

/**
checks that the graph is totally and properly colored with colors of the palette.
Neighbors that are not part of the graph are ignored.
*/
pub fn checker(graph: &Graph, palette: &Palette) -> CheckerResult {
    let mut used = vec![false; palette.len()];
    for n in graph.nodes() {
        let c = match n.color() {
            None => return CheckerResult::Uncolored(n.name().to_string()),
            Some(c) if c >= palette.len() => return CheckerResult::UnknownColor(n.name().to_string()),
            Some(c) => c,
        };
        used[c] = true;
        for a in n.adjacent() {
            if graph.color_of(a) == Some(c) {
                return CheckerResult::Conflict(n.name().to_string(), a.clone());
            }
        }
    }
    CheckerResult::Ok(used.iter().filter(|u| **u).count())
}
