//! Command-line driver: load an instance, run one strategy, print the result.

use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{arg, value_parser, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use u_facility::{
    ga::{GaConfig, GeneticSolver, Replacement},
    grasp::{Grasp, GraspConfig},
    io::{format_solution, load_solution, save_solution, InstanceLoader, WarehouseRecord},
    local_search::{ImprovementPolicy, LocalSearch, LocalSearchConfig},
    models::{CapacityMode, Instance, Solution},
    strategy::{solve, SearchResult},
    tabu::{TabuConfig, TabuSearch},
};

fn cli() -> Command {
    Command::new("ufl")
        .about("Solves facility location instances with GRASP, local search, tabu search, or a GA")
        .arg(arg!(<INSTANCE> "Path to the instance file").value_parser(value_parser!(PathBuf)))
        .arg(
            arg!(-a --algorithm <ALGORITHM> "Search strategy to run")
                .required(true)
                .value_parser(["grasp", "local", "tabu", "ga"]),
        )
        .arg(arg!(--capacitated "Enforce warehouse capacities and customer demands"))
        .arg(
            arg!(--"field-order" <ORDER> "Warehouse line layout: '<capacity> <fixedCost>' or '<fixedCost> <capacity>'")
                .required(false)
                .value_parser(["capacity-first", "cost-first"]),
        )
        .arg(arg!(--alpha <ALPHA> "GRASP greediness in [0, 1]").required(false).value_parser(value_parser!(f64)))
        .arg(
            arg!(--"grasp-iterations" <N> "Number of GRASP restarts")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(--"no-local-search" "Run GRASP construction only, without the descent phase"))
        .arg(
            arg!(--policy <POLICY> "Local search improvement policy")
                .required(false)
                .value_parser(["best", "first"]),
        )
        .arg(arg!(--tenure <T> "Tabu tenure").required(false).value_parser(value_parser!(usize)))
        .arg(
            arg!(--"max-iterations" <N> "Tabu iteration budget, or local search step ceiling")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"max-no-improve" <N> "Tabu stagnation limit")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(--population <P> "GA population size").required(false).value_parser(value_parser!(usize)))
        .arg(arg!(--generations <G> "GA generation count").required(false).value_parser(value_parser!(usize)))
        .arg(
            arg!(--"mutation-rate" <R> "GA per-gene mutation probability")
                .required(false)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            arg!(--replacement <POLICY> "GA replacement policy")
                .required(false)
                .value_parser(["elitist", "generational"]),
        )
        .arg(arg!(--seed <SEED> "Random seed").required(false).value_parser(value_parser!(u64)))
        .arg(
            arg!(--initial <FILE> "Start local or tabu search from a saved solution")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--save <FILE> "Write the best solution to this file")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = matches
        .get_one::<PathBuf>("INSTANCE")
        .ok_or("missing instance path")?;
    let instance = loader(matches).from_path(path)?;
    tracing::info!(
        "{}: {} warehouses, {} customers",
        path.display(),
        instance.num_warehouses(),
        instance.num_customers()
    );

    let initial = matches
        .get_one::<PathBuf>("initial")
        .map(|p| load_solution(p, instance.num_customers()))
        .transpose()?;

    let algorithm = matches
        .get_one::<String>("algorithm")
        .ok_or("missing --algorithm")?;
    let result = run_algorithm(algorithm, matches, &instance, initial)?;

    println!("{}", format_solution(&result.best, result.best_cost));
    println!("elapsed: {:.3}s", result.elapsed.as_secs_f64());

    if let Some(out) = matches.get_one::<PathBuf>("save") {
        save_solution(out, &result.best, result.best_cost)?;
        tracing::info!("saved best solution to {}", out.display());
    }
    Ok(())
}

fn loader(matches: &ArgMatches) -> InstanceLoader {
    let mode = if matches.get_flag("capacitated") {
        CapacityMode::Capacitated
    } else {
        CapacityMode::Uncapacitated
    };
    let record = match matches.get_one::<String>("field-order").map(String::as_str) {
        Some("cost-first") => WarehouseRecord::CostThenCapacity,
        Some(_) => WarehouseRecord::CapacityThenCost,
        None if mode == CapacityMode::Capacitated => WarehouseRecord::CapacityThenCost,
        None => WarehouseRecord::FixedCostOnly,
    };
    InstanceLoader::new().with_mode(mode).with_record(record)
}

fn run_algorithm(
    algorithm: &str,
    matches: &ArgMatches,
    instance: &Instance,
    initial: Option<Solution>,
) -> Result<SearchResult, Box<dyn Error>> {
    let seed = matches.get_one::<u64>("seed").copied();
    let policy = match matches.get_one::<String>("policy").map(String::as_str) {
        Some("first") => ImprovementPolicy::First,
        _ => ImprovementPolicy::Best,
    };

    if initial.is_some() && matches!(algorithm, "grasp" | "ga") {
        tracing::warn!("--initial is ignored by {algorithm}");
    }
    if matches.get_flag("no-local-search") && algorithm != "grasp" {
        tracing::warn!("--no-local-search only applies to grasp");
    }

    let result = match algorithm {
        "grasp" => {
            let mut config = if matches.get_flag("no-local-search") {
                GraspConfig::default().without_local_search()
            } else {
                GraspConfig::default().with_local_search(policy)
            };
            if let Some(&alpha) = matches.get_one::<f64>("alpha") {
                config = config.with_alpha(alpha);
            }
            if let Some(&n) = matches.get_one::<usize>("grasp-iterations") {
                config = config.with_max_iterations(n);
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            solve(&Grasp::new(instance, config))?
        }
        "local" => {
            let mut config = LocalSearchConfig::default().with_policy(policy);
            if let Some(&n) = matches.get_one::<usize>("max-iterations") {
                config = config.with_max_steps(n);
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            let mut search = LocalSearch::new(instance, config);
            if let Some(start) = initial {
                search = search.with_initial(start);
            }
            solve(&search)?
        }
        "tabu" => {
            let mut config = TabuConfig::default();
            if let Some(&t) = matches.get_one::<usize>("tenure") {
                config = config.with_tabu_tenure(t);
            }
            if let Some(&n) = matches.get_one::<usize>("max-iterations") {
                config = config.with_max_iterations(n);
            }
            if let Some(&n) = matches.get_one::<usize>("max-no-improve") {
                config = config.with_max_no_improve(n);
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            let mut search = TabuSearch::new(instance, config);
            if let Some(start) = initial {
                search = search.with_initial(start);
            }
            solve(&search)?
        }
        "ga" => {
            let mut config = GaConfig::default();
            if let Some(&p) = matches.get_one::<usize>("population") {
                config = config.with_population_size(p);
            }
            if let Some(&g) = matches.get_one::<usize>("generations") {
                config = config.with_max_generations(g);
            }
            if let Some(&r) = matches.get_one::<f64>("mutation-rate") {
                config = config.with_mutation_rate(r);
            }
            if let Some("generational") = matches.get_one::<String>("replacement").map(String::as_str) {
                config = config.with_replacement(Replacement::Generational);
            }
            if let Some(s) = seed {
                config = config.with_seed(s);
            }
            solve(&GeneticSolver::new(instance, config))?
        }
        other => return Err(format!("unknown algorithm '{other}'").into()),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_loader_defaults() {
        let m = cli().get_matches_from(["ufl", "inst.txt", "--algorithm", "tabu"]);
        assert_eq!(
            loader(&m),
            InstanceLoader::new().with_record(WarehouseRecord::FixedCostOnly)
        );

        let m = cli().get_matches_from(["ufl", "inst.txt", "-a", "ga", "--capacitated"]);
        assert_eq!(
            loader(&m),
            InstanceLoader::new()
                .with_mode(CapacityMode::Capacitated)
                .with_record(WarehouseRecord::CapacityThenCost)
        );
    }

    #[test]
    fn test_field_order_flag() {
        let m = cli().get_matches_from([
            "ufl",
            "inst.txt",
            "-a",
            "local",
            "--capacitated",
            "--field-order",
            "cost-first",
        ]);
        assert_eq!(
            loader(&m),
            InstanceLoader::new()
                .with_mode(CapacityMode::Capacitated)
                .with_record(WarehouseRecord::CostThenCapacity)
        );
    }

    #[test]
    fn test_missing_algorithm_rejected() {
        assert!(cli().try_get_matches_from(["ufl", "inst.txt"]).is_err());
    }

    // Greedy picks warehouse 0 for customer 0; closing it afterwards saves 10.
    const MYOPIC: &str = "2 3\n10\n12\n0\n1 1\n0\n20 1\n0\n20 1\n";

    #[test]
    fn test_grasp_construction_only() {
        let instance = InstanceLoader::new().from_str(MYOPIC).unwrap();

        let m = cli().get_matches_from([
            "ufl",
            "inst.txt",
            "-a",
            "grasp",
            "--alpha",
            "0",
            "--no-local-search",
        ]);
        let result = run_algorithm("grasp", &m, &instance, None).unwrap();
        assert_eq!(format_solution(&result.best, result.best_cost), "0 1 1 25.00000");

        let m = cli().get_matches_from(["ufl", "inst.txt", "-a", "grasp", "--alpha", "0"]);
        let result = run_algorithm("grasp", &m, &instance, None).unwrap();
        assert_eq!(format_solution(&result.best, result.best_cost), "1 1 1 15.00000");
    }

    #[test]
    fn test_run_algorithm_on_small_instance() {
        let instance = InstanceLoader::new()
            .from_str("2 2\n10\n15\n0\n1 5\n0\n8 2\n")
            .unwrap();
        let m = cli().get_matches_from(["ufl", "inst.txt", "-a", "tabu", "--seed", "3"]);
        let result = run_algorithm("tabu", &m, &instance, None).unwrap();
        assert_eq!(result.best_cost, 19.0);
    }
}
