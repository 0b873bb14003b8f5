use std::process::ExitCode;

use bnp2d::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let Some(catalog_path) = args.next() else {
        eprintln!("usage: bnp2d <catalog.toml> [settings.toml]");
        return ExitCode::from(2);
    };

    match run(&catalog_path, args.next().as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(event = "run_failed", %err);
            ExitCode::FAILURE
        }
    }
}

fn run(catalog_path: &str, settings_path: Option<&str>) -> BnpResult<()> {
    let catalog = Catalog::load(catalog_path)?;
    let settings = match settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut solver = ScipSolver::new(settings.solver.clone());
    let result = BranchAndPrice::new(&catalog, &settings, &mut solver, MostFractional)
        .solve(ColumnPool::initial(&catalog))?;

    match &result.incumbent {
        Some(incumbent) => {
            info!(
                event = "solution",
                sheets = incumbent.objective,
                node = incumbent.node,
            );
            for used in &incumbent.columns {
                info!(
                    event = "pattern",
                    column = %used.column,
                    count = used.value,
                    coefs = ?used.coefs,
                );
            }
        }
        None => info!(event = "no_solution"),
    }
    info!(
        event = "summary",
        root_bound = result.root_bound,
        nodes = result.stats.nodes,
        pruned_infeasible = result.stats.pruned_infeasible,
        pruned_bound = result.stats.pruned_bound,
        columns = result.stats.columns_generated,
        node_limit_reached = result.stats.node_limit_reached,
        solves = solver.n_solves(),
    );
    Ok(())
}
