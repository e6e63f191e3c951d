use std::process;

use clap::{App, load_yaml};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use maps_color::Result;
use maps_color::adjacency::read_from_file;
use maps_color::palette::Palette;
use maps_color::report::ReportSink;
use maps_color::search::restart::RestartController;
use dogs::search_algorithm::TimeStoppingCriterion;
use maps_color::util::{export_stats, read_params, Params};


/** loads the map and the palette, then colors the map until the time limit is reached
or the last color of the palette is not needed anymore */
fn run(params: &Params) -> Result<()> {
    println!("Loading {}", params.adjacency.display());
    let graph = read_from_file(&params.adjacency)?;
    println!("Loading Complete\n");
    let palette = match Palette::from_file(&params.colors)? {
        Some(p) => p,
        None => {
            info!("{} not found, using the default palette", params.colors.display());
            Palette::default()
        }
    };
    let mut controller = RestartController::new(graph, palette, params.restart.clone());
    controller.graph().display_statistics();
    let palette = controller.palette();
    let labels: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
    info!("palette: {} (scarce color: {})", labels.join(" "), palette.label(palette.scarce()));
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    println!("time limit: {}", params.time);
    println!("=======================");
    let stopping = TimeStoppingCriterion::new(params.time);
    let mut sink = ReportSink::new(&params.output, params.report);
    let outcome = controller.run(&stopping, &mut rng, &mut sink);
    if outcome.best.is_none() {
        warn!(
            "no complete coloring found with {} colors in {:.1} seconds",
            controller.palette().len(), outcome.stats.time_searched
        );
    }
    info!(
        "{} attempts ({} failed) in {:.3} seconds, scarce color threshold: {:?}",
        outcome.stats.nb_attempts, outcome.stats.nb_failures, outcome.stats.time_searched,
        controller.threshold()
    );
    println!("End reached, ending program");
    if let Some(perf_file) = &params.perf_file {
        if let Err(e) = export_stats(&params.adjacency, controller.palette(), &outcome, perf_file) {
            error!("unable to export statistics: {}", e);
        }
    }
    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_params(&main_args).unwrap_or_else(|e| e.exit());
    if let Err(e) = run(&params) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
