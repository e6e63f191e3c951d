//! Search procedures for the map coloring problem.

/// greedy first-fit colorization
pub mod greedy;

/// randomized restarts minimizing the use of the scarce color
pub mod restart;
