use bit_set::BitSet;
use log::trace;

use crate::color::Graph;
use crate::palette::{ColorId, Palette};

/** outcome of a greedy attempt */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreedyOutcome {
    /// every node received a color
    Complete,
    /// every palette color is already used by some neighbor of this node
    Stuck {
        /// node that could not be colored
        node: String,
    },
}

/** implements the greedy colorization of a map.
    1. take the next uncolored node in the visitation order
    2. collect the colors of its (already colored) neighbors
    3. assign it the first palette color not used by its neighbors
    4. stop early if no color is available

A node is never recolored within an attempt, so checking against already colored
neighbors is enough to obtain a proper coloring. The result depends on the visitation
order: the same graph may get stuck under one order and succeed under another.
On failure, the graph is left partially colored (call `decolorize` before retrying).
*/
pub fn greedy_colorize(graph: &mut Graph, palette: &Palette) -> GreedyOutcome {
    for i in 0..graph.order().len() {
        let id = graph.order()[i];
        let node = graph.node_by_id(id);
        if node.color().is_some() { continue; }
        // colors seen by the current node
        let mut used: BitSet = BitSet::with_capacity(palette.len());
        for neighbor in node.adjacent() {
            if let Some(c) = graph.color_of(neighbor) {
                used.insert(c);
            }
        }
        let color: Option<ColorId> = (0..palette.len()).find(|c| !used.contains(*c));
        match color {
            None => {
                trace!("greedy: no color left for {}", node.name());
                return GreedyOutcome::Stuck { node: node.name().to_string() };
            },
            Some(c) => graph.set_color(id, Some(c)),
        }
    }
    GreedyOutcome::Complete
}

/** number of nodes using each palette color (indexed by color id).
Unused colors count as 0, uncolored nodes are not counted */
pub fn color_counts(graph: &Graph, palette: &Palette) -> Vec<usize> {
    let mut res = vec![0; palette.len()];
    for c in graph.nodes().filter_map(|n| n.color()) {
        if c < res.len() { res[c] += 1; }
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::adjacency::parse_adjacency;
    use crate::color::{checker, CheckerResult};

    const TRIANGLE: &str = "X Y Z\nY X Z\nZ X Y\n";

    #[test]
    fn test_triangle_two_colors_always_stuck() {
        let mut g = parse_adjacency(TRIANGLE).unwrap();
        let p = Palette::new(&["RED", "BLUE"]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            assert!(matches!(greedy_colorize(&mut g, &p), GreedyOutcome::Stuck { .. }));
            g.decolorize();
            g.shuffle_order(&mut rng);
        }
    }

    #[test]
    fn test_triangle_three_colors() {
        let mut g = parse_adjacency(TRIANGLE).unwrap();
        let p = Palette::new(&["RED", "BLUE", "GREEN"]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(greedy_colorize(&mut g, &p), GreedyOutcome::Complete);
            assert_eq!(checker(&g, &p), CheckerResult::Ok(3));
            assert_eq!(color_counts(&g, &p), vec![1, 1, 1]);
            g.decolorize();
            assert_eq!(color_counts(&g, &p), vec![0, 0, 0]);
            g.shuffle_order(&mut rng);
        }
    }

    #[test]
    fn test_first_available_color() {
        // disconnected nodes all take the first color
        let mut g = parse_adjacency("A\nB\n").unwrap();
        let p = Palette::new(&["RED", "BLUE"]).unwrap();
        assert_eq!(greedy_colorize(&mut g, &p), GreedyOutcome::Complete);
        assert_eq!(color_counts(&g, &p), vec![2, 0]);
    }

    #[test]
    fn test_proper_coloring_on_shuffled_map() {
        let map = "WA OR ID\nOR WA ID NV CA\nCA OR NV AZ\nNV OR ID UT AZ CA\n\
                   ID WA OR NV UT WY MT\nMT ID WY ND SD\nWY MT ID UT CO NE SD\n\
                   UT ID NV AZ CO WY\nAZ CA NV UT NM\nCO WY UT NM NE KS OK\n";
        let mut g = parse_adjacency(map).unwrap();
        let p = Palette::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut nb_complete = 0;
        for _ in 0..200 {
            if greedy_colorize(&mut g, &p) == GreedyOutcome::Complete {
                nb_complete += 1;
                assert!(matches!(checker(&g, &p), CheckerResult::Ok(_)));
                assert_eq!(color_counts(&g, &p).iter().sum::<usize>(), g.nb_nodes());
            }
            g.decolorize();
            g.shuffle_order(&mut rng);
        }
        assert!(nb_complete > 0);
    }

    #[test]
    fn test_already_colored_nodes_are_kept() {
        let mut g = parse_adjacency("A B\nB A\n").unwrap();
        let p = Palette::new(&["RED", "BLUE"]).unwrap();
        g.set_color(1, Some(0));
        assert_eq!(greedy_colorize(&mut g, &p), GreedyOutcome::Complete);
        assert_eq!(g.color_of("A"), Some(1));
        assert_eq!(g.color_of("B"), Some(0));
    }
}
