use std::process;

use clap::{App, Arg};
use prettytable::{row, Table};
use separator::Separatable;

use sokoban_engine::config::{Method, Options};
use sokoban_engine::solver::{Outcome, Stats};
use sokoban_engine::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-engine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves Sokoban levels in the XSB format")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&["bfs", "dfs", "astar"])
                .default_value("bfs")
                .help("Search method"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .help("Don't expand states deeper than this many moves"),
        )
        .arg(
            Arg::with_name("node-budget")
                .long("node-budget")
                .takes_value(true)
                .help("Give up after creating this many states"),
        )
        .arg(
            Arg::with_name("stats")
                .short("s")
                .long("stats")
                .help("Print per-depth statistics, elapsed time and memory use"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    // can't fail thanks to possible_values
    let method: Method = matches.value_of("method").unwrap().parse().unwrap();

    let mut options = Options::default();
    if let Some(depth) = matches.value_of("max-depth") {
        options.max_depth = Some(depth.parse().unwrap_or_else(|_| {
            println!("Invalid max depth: {}", depth);
            process::exit(1);
        }));
    }
    if let Some(budget) = matches.value_of("node-budget") {
        options.node_budget = Some(budget.parse().unwrap_or_else(|_| {
            println!("Invalid node budget: {}", budget);
            process::exit(1);
        }));
    }

    let path = matches.value_of("file").unwrap();
    let level = path.load_level().unwrap_or_else(|err| {
        println!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Solving {} using {}...", path, method);
    let result = level.solve(method, options).unwrap_or_else(|err| {
        println!("Invalid level: {}", err);
        process::exit(1);
    });

    match result.moves {
        Some(ref moves) => {
            println!("Solution found: {}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
        None => match result.outcome {
            Outcome::BudgetExceeded => println!("No solution found within the node budget"),
            _ => println!("No solution exists"),
        },
    }
    print!("{}", result.stats);

    if matches.is_present("stats") {
        print_details(&result.stats);
    }
}

fn print_details(stats: &Stats) {
    let mut table = Table::new();
    table.add_row(row!["depth", "created", "unique visited", "duplicates"]);
    for (depth, &created) in stats.created_states.iter().enumerate() {
        let visited = stats.visited_states.get(depth).copied().unwrap_or(0);
        let duplicates = stats.duplicate_states.get(depth).copied().unwrap_or(0);
        table.add_row(row![
            depth,
            created.separated_string(),
            visited.separated_string(),
            duplicates.separated_string()
        ]);
    }
    table.printstd();

    println!(
        "Elapsed: {} ms",
        (stats.elapsed.as_millis() as u64).separated_string()
    );
    println!(
        "Approximate memory used: {} B",
        stats.approx_mem_bytes.separated_string()
    );
}
