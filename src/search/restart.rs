use std::time::Instant;

use log::{debug, error, info};
use rand::Rng;
use serde::Serialize;

use crate::color::Graph;
use crate::error::Result;
use crate::palette::{ColorId, Palette};
use crate::search::greedy::{color_counts, greedy_colorize, GreedyOutcome};
use dogs::search_algorithm::StoppingCriterion;

/** how the visitation order is changed between two attempts */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingStrategy {
    /// uniform random permutation
    Shuffle,
    /// largest degree first, ties broken randomly
    DegreeRandomTies,
}

/** parameters of the restart loop */
#[derive(Debug, Clone)]
pub struct RestartConfig {
    /// reordering applied after each attempt
    pub ordering: OrderingStrategy,
    /// if true, the first attempt visits nodes by decreasing degree instead of load order
    pub sort_initial_by_degree: bool,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self { ordering: OrderingStrategy::Shuffle, sort_initial_by_degree: false }
    }
}

/** snapshot of a successful attempt */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    /// attempt number (starting at 1)
    pub attempt: u64,
    /// (node name, color) in the visitation order of the attempt
    pub assignment: Vec<(String, ColorId)>,
    /// counts[c]: number of nodes colored with c
    pub counts: Vec<usize>,
    /// number of nodes colored with the scarce color
    pub scarce_count: usize,
}

impl AttemptResult {
    /// snapshot of the colors currently assigned in the graph (uncolored nodes are skipped)
    pub fn from_graph(attempt: u64, graph: &Graph, palette: &Palette) -> Self {
        let assignment = graph.nodes()
            .filter_map(|n| n.color().map(|c| (n.name().to_string(), c)))
            .collect();
        let counts = color_counts(graph, palette);
        let scarce_count = counts[palette.scarce()];
        Self { attempt, assignment, counts, scarce_count }
    }
}

/** why the restart loop stopped */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// the stopping criterion finished
    TimeExpired,
    /// the scarce color is not used anymore
    TargetReached,
}

/** search statistics (exported as json) */
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// number of greedy attempts
    pub nb_attempts: u64,
    /// attempts that got stuck
    pub nb_failures: u64,
    /// attempts that colored the whole map
    pub nb_successes: u64,
    /// scarce color counts of the recorded attempts (strictly decreasing)
    pub primal_list: Vec<usize>,
    /// time (seconds) at which each recorded attempt was found
    pub primal_times: Vec<f32>,
    /// total search time (seconds)
    pub time_searched: f32,
}

/** result of the restart loop */
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// last recorded attempt (fewest uses of the scarce color), if any attempt succeeded
    pub best: Option<AttemptResult>,
    /// reason of the termination
    pub termination: Termination,
    /// statistics
    pub stats: SearchStats,
}

/** receives every improving attempt of the restart loop */
pub trait ResultSink {
    /** called with the graph still colored as in the attempt.
    An error is logged by the loop, which keeps running */
    fn record(&mut self, graph: &Graph, palette: &Palette, result: &AttemptResult) -> Result<()>;
}

/** Restart loop around the greedy colorization.

Each iteration runs the greedy on the current visitation order.
 - if it gets stuck, the attempt is discarded.
 - if it succeeds, the number of nodes using the scarce color (last one of the palette) is
   compared with the threshold. The first success sets the threshold to its count + 1, so it
   is always recorded. An attempt with a count strictly lower than the threshold is recorded
   (sent to the sink) and becomes the new threshold.
In both cases, colors are reset and the visitation order changed. The loop stops when the
threshold reaches 0 or when the stopping criterion is finished (checked after each attempt).
*/
#[derive(Debug)]
pub struct RestartController {
    /// map being colored
    graph: Graph,
    /// available colors
    palette: Palette,
    /// parameters
    config: RestartConfig,
    /// lowest scarce color count recorded so far (None before the first success)
    threshold: Option<usize>,
}

impl RestartController {
    /// creates a controller owning the graph
    pub fn new(graph: Graph, palette: Palette, config: RestartConfig) -> Self {
        Self { graph, palette, config, threshold: None }
    }

    /// map being colored
    pub fn graph(&self) -> &Graph { &self.graph }

    /// palette used
    pub fn palette(&self) -> &Palette { &self.palette }

    /// current threshold
    pub fn threshold(&self) -> Option<usize> { self.threshold }

    /// removes colors and changes the visitation order
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.graph.decolorize();
        self.graph.shuffle_order(rng);
        if self.config.ordering == OrderingStrategy::DegreeRandomTies {
            self.graph.sort_by_degree();
        }
    }

    /// runs the restart loop until the target is reached or the stopping criterion finishes
    pub fn run<S, R, K>(&mut self, stopping: &S, rng: &mut R, sink: &mut K) -> SearchOutcome
    where S: StoppingCriterion, R: Rng + ?Sized, K: ResultSink + ?Sized {
        let t_start = Instant::now();
        let mut stats = SearchStats::default();
        let mut best: Option<AttemptResult> = None;
        self.graph.decolorize();
        if self.config.sort_initial_by_degree {
            self.graph.sort_by_degree();
        }
        let termination = loop {
            stats.nb_attempts += 1;
            match greedy_colorize(&mut self.graph, &self.palette) {
                GreedyOutcome::Stuck { node } => {
                    stats.nb_failures += 1;
                    debug!("attempt {}: stuck on {}", stats.nb_attempts, node);
                },
                GreedyOutcome::Complete => {
                    stats.nb_successes += 1;
                    let scarce_count = color_counts(&self.graph, &self.palette)[self.palette.scarce()];
                    let threshold = *self.threshold.get_or_insert(scarce_count + 1);
                    if scarce_count < threshold {
                        self.threshold = Some(scarce_count);
                        let result = AttemptResult::from_graph(stats.nb_attempts, &self.graph, &self.palette);
                        let t = t_start.elapsed().as_secs_f32();
                        info!(
                            "attempt {}: {} uses {} time(s) ({:.3}s)",
                            stats.nb_attempts, self.palette.label(self.palette.scarce()),
                            scarce_count, t
                        );
                        if let Err(e) = sink.record(&self.graph, &self.palette, &result) {
                            error!("unable to record attempt {}: {}", stats.nb_attempts, e);
                        }
                        stats.primal_list.push(scarce_count);
                        stats.primal_times.push(t);
                        best = Some(result);
                    } else {
                        debug!(
                            "attempt {}: {} uses of the scarce color (threshold {})",
                            stats.nb_attempts, scarce_count, threshold
                        );
                    }
                },
            }
            self.reset(rng);
            if self.threshold == Some(0) {
                break Termination::TargetReached;
            }
            if stopping.is_finished() {
                break Termination::TimeExpired;
            }
        };
        stats.time_searched = t_start.elapsed().as_secs_f32();
        debug!(
            "restart loop: {:?} after {} attempts ({} failures)",
            termination, stats.nb_attempts, stats.nb_failures
        );
        SearchOutcome { best, termination, stats }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::adjacency::parse_adjacency;
    use crate::color::{checker, CheckerResult};
    use crate::error::Error;
    use dogs::search_algorithm::TimeStoppingCriterion;

    const TRIANGLE: &str = "X Y Z\nY X Z\nZ X Y\n";

    /// keeps every recorded result, checking the coloring at record time
    #[derive(Default)]
    struct CollectSink {
        results: Vec<AttemptResult>,
    }

    impl ResultSink for CollectSink {
        fn record(&mut self, graph: &Graph, palette: &Palette, result: &AttemptResult) -> Result<()> {
            assert!(matches!(checker(graph, palette), CheckerResult::Ok(_)));
            self.results.push(result.clone());
            Ok(())
        }
    }

    /// always fails to record
    struct FailingSink {
        nb_calls: usize,
    }

    impl ResultSink for FailingSink {
        fn record(&mut self, _: &Graph, _: &Palette, _: &AttemptResult) -> Result<()> {
            self.nb_calls += 1;
            Err(Error::MissingInput("Output.txt".into()))
        }
    }

    fn controller(adj: &str, colors: &[&str]) -> RestartController {
        RestartController::new(
            parse_adjacency(adj).unwrap(),
            Palette::new(colors).unwrap(),
            RestartConfig::default(),
        )
    }

    #[test]
    fn test_triangle_two_colors_never_records() {
        let mut ctrl = controller(TRIANGLE, &["RED", "BLUE"]);
        let mut sink = CollectSink::default();
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(0.1), &mut rng, &mut sink);
        assert_eq!(outcome.termination, Termination::TimeExpired);
        assert!(outcome.best.is_none());
        assert!(sink.results.is_empty());
        assert_eq!(outcome.stats.nb_successes, 0);
        assert_eq!(outcome.stats.nb_failures, outcome.stats.nb_attempts);
        assert!(outcome.stats.time_searched > 0.05);
        assert_eq!(ctrl.threshold(), None);
    }

    #[test]
    fn test_triangle_three_colors_records_first_success_only() {
        let mut ctrl = controller(TRIANGLE, &["RED", "BLUE", "GREEN"]);
        let mut sink = CollectSink::default();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(0.1), &mut rng, &mut sink);
        assert_eq!(outcome.termination, Termination::TimeExpired);
        assert_eq!(sink.results.len(), 1);
        let best = outcome.best.unwrap();
        assert_eq!(best.attempt, 1);
        assert_eq!(best.counts, vec![1, 1, 1]);
        assert_eq!(best.scarce_count, 1);
        assert_eq!(outcome.stats.primal_list, vec![1]);
        assert_eq!(ctrl.threshold(), Some(1));
        assert!(outcome.stats.nb_attempts > 1);
    }

    #[test]
    fn test_disconnected_nodes_reach_target() {
        let mut ctrl = controller("A\nB\n", &["RED", "BLUE"]);
        let mut sink = CollectSink::default();
        let mut rng = StdRng::seed_from_u64(2);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(60.), &mut rng, &mut sink);
        assert_eq!(outcome.termination, Termination::TargetReached);
        assert_eq!(outcome.stats.nb_attempts, 1);
        let best = outcome.best.unwrap();
        assert_eq!(best.counts, vec![2, 0]);
        assert_eq!(best.scarce_count, 0);
        assert_eq!(sink.results.len(), 1);
    }

    #[test]
    fn test_recorded_counts_strictly_decrease() {
        // a 5-cycle with a hub: odd wheel, needs 4 colors
        let wheel = "H A B C D E\nA H B E\nB H A C\nC H B D\nD H C E\nE H D A\n\
                     F A G\nG F B\nI G C\nJ I D\n";
        let mut ctrl = controller(wheel, &["RED", "BLUE", "GREEN", "YELLOW", "CYAN"]);
        let mut sink = CollectSink::default();
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(0.3), &mut rng, &mut sink);
        assert!(!sink.results.is_empty());
        for w in sink.results.windows(2) {
            assert!(w[1].scarce_count < w[0].scarce_count);
            assert!(w[1].attempt > w[0].attempt);
        }
        let recorded: Vec<usize> = sink.results.iter().map(|r| r.scarce_count).collect();
        assert_eq!(recorded, outcome.stats.primal_list);
        assert_eq!(outcome.best.unwrap(), sink.results.last().unwrap().clone());
        if outcome.termination == Termination::TargetReached {
            assert_eq!(ctrl.threshold(), Some(0));
        }
    }

    #[test]
    fn test_sink_failure_does_not_stop_the_loop() {
        let mut ctrl = controller("A B\nB A\nC\n", &["RED", "BLUE", "GREEN"]);
        let mut sink = FailingSink { nb_calls: 0 };
        let mut rng = StdRng::seed_from_u64(4);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(5.), &mut rng, &mut sink);
        // first-fit never uses the third color on a single edge
        assert_eq!(outcome.termination, Termination::TargetReached);
        assert_eq!(sink.nb_calls, 1);
        assert_eq!(outcome.best.unwrap().counts[2], 0);
    }

    #[test]
    fn test_graph_is_reset_after_the_run() {
        let mut ctrl = controller(TRIANGLE, &["RED", "BLUE", "GREEN"]);
        let mut rng = StdRng::seed_from_u64(5);
        ctrl.run(&TimeStoppingCriterion::new(0.02), &mut rng, &mut CollectSink::default());
        let g = ctrl.graph();
        assert!(g.nodes().all(|n| n.color().is_none()));
        assert_eq!(g.nb_nodes(), 3);
    }

    #[test]
    fn test_degree_ordering() {
        let mut ctrl = RestartController::new(
            parse_adjacency("A B C D\nB A\nC A\nD A\nE\n").unwrap(),
            Palette::new(&["RED", "BLUE"]).unwrap(),
            RestartConfig { ordering: OrderingStrategy::DegreeRandomTies, sort_initial_by_degree: true },
        );
        let mut sink = CollectSink::default();
        let mut rng = StdRng::seed_from_u64(6);
        let outcome = ctrl.run(&TimeStoppingCriterion::new(0.05), &mut rng, &mut sink);
        // hub first: RED on A, BLUE on its 3 leaves, RED on E. never improves
        let best = outcome.best.unwrap();
        assert_eq!(best.assignment[0], ("A".to_string(), 0));
        assert_eq!(best.counts, vec![2, 3]);
        assert_eq!(sink.results.len(), 1);
        assert_eq!(ctrl.graph().nodes().next().unwrap().name(), "A");
    }
}
