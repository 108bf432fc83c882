//! Command-line front end for the built-in adapters.
//!
//! ```sh
//! trellis sudoku --path puzzle.txt --stats
//! trellis queens -n 8 --all
//! trellis colour --australia
//! trellis colour --vertices 3 --edge 0,1 --edge 1,2 --edge 2,0 --colours 2
//! ```

use std::{fs, io::Read, path::PathBuf};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use trellis::{
    adapters::{graph_colouring, n_queens, sudoku},
    solver::{
        problem::Problem,
        search::{Outcome, Solver},
        stats::{render_stats_table, SearchStats},
        value::{StandardValue, ValueOrdering},
        VariableId,
    },
};

#[derive(Parser, Debug)]
#[command(name = "trellis", version, about = "A constraint satisfaction solver")]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Print per-constraint propagation statistics after solving.
    #[arg(long, global = true)]
    stats: bool,

    /// Emit the result as JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    /// Abort after visiting this many search nodes.
    #[arg(long, global = true)]
    budget: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a 9x9 sudoku grid.
    Sudoku {
        /// Path to the grid file; reads stdin when omitted.
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Place n queens on an n x n board.
    Queens {
        /// Board size.
        #[arg(short)]
        n: usize,

        /// Enumerate every placement instead of stopping at the first.
        #[arg(long)]
        all: bool,
    },

    /// Colour a graph so no edge joins two like-coloured vertices.
    Colour {
        /// Solve the seven-region Australia map with three colours.
        #[arg(long, conflicts_with_all = ["vertices", "edge", "colours"])]
        australia: bool,

        /// Number of vertices, numbered from 0.
        #[arg(long, default_value_t = 0)]
        vertices: u32,

        /// An edge as "u,v"; repeat for each edge.
        #[arg(long = "edge", value_parser = parse_edge)]
        edge: Vec<(VariableId, VariableId)>,

        /// Palette size.
        #[arg(long, default_value_t = 3)]
        colours: usize,
    },
}

fn parse_edge(raw: &str) -> Result<(VariableId, VariableId), String> {
    let (u, v) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"u,v\", got {raw:?}"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<VariableId>()
            .map_err(|e| format!("bad vertex {s:?}: {e}"))
    };
    Ok((parse(u)?, parse(v)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Sudoku { path } => run_sudoku(&cli, path.as_deref()),
        Command::Queens { n, all } => run_queens(&cli, *n, *all),
        Command::Colour {
            australia,
            vertices,
            edge,
            colours,
        } => {
            if *australia {
                let (problem, names) = graph_colouring::australia()?;
                run_colour(&cli, &problem, Some(&names))
            } else {
                let problem = graph_colouring::build_problem(*vertices, edge, *colours)?;
                run_colour(&cli, &problem, None)
            }
        }
    }
}

fn solver(cli: &Cli) -> Solver<StandardValue> {
    match cli.budget {
        Some(nodes) => Solver::new().with_budget(nodes),
        None => Solver::new(),
    }
}

fn run_sudoku(cli: &Cli, path: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let problem = sudoku::build_problem(&sudoku::parse_grid(&text)?)?;
    let (outcome, stats) = solver(cli).solve(&problem)?;

    let solution = outcome.into_solution().map(|a| sudoku::render_grid(&a));
    if cli.json {
        println!(
            "{}",
            json!({ "solution": solution, "stats": stats })
        );
    } else {
        match solution {
            Some(grid) => print!("{grid}"),
            None => println!("unsatisfiable"),
        }
    }
    report_stats(cli, &stats, &problem);
    Ok(())
}

fn run_queens(cli: &Cli, n: usize, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let problem = n_queens::build_problem(n)?;
    let solver = solver(cli);

    if all {
        let (solutions, stats) = solver.solve_all(&problem)?;
        let boards: Result<Vec<Vec<usize>>, _> = solutions
            .iter()
            .map(|a| n_queens::to_columns(a, n))
            .collect();
        let boards = boards?;

        if cli.json {
            println!(
                "{}",
                json!({ "count": boards.len(), "solutions": boards, "stats": stats })
            );
        } else {
            for columns in &boards {
                for row in n_queens::render_board(columns) {
                    println!("{row}");
                }
                println!();
            }
            println!("{} solutions", boards.len());
        }
        report_stats(cli, &stats, &problem);
    } else {
        let (outcome, stats) = solver.solve(&problem)?;
        let columns = outcome
            .into_solution()
            .map(|a| n_queens::to_columns(&a, n))
            .transpose()?;

        if cli.json {
            println!("{}", json!({ "solution": columns, "stats": stats }));
        } else {
            match columns {
                Some(columns) => {
                    for row in n_queens::render_board(&columns) {
                        println!("{row}");
                    }
                }
                None => println!("unsatisfiable"),
            }
        }
        report_stats(cli, &stats, &problem);
    }
    Ok(())
}

fn run_colour(
    cli: &Cli,
    problem: &Problem<StandardValue>,
    names: Option<&[&str]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (outcome, stats) = solver(cli).solve(problem)?;

    match outcome {
        Outcome::Solved(assignment) => {
            let colouring = graph_colouring::colours(&assignment);
            if cli.json {
                let by_vertex: std::collections::BTreeMap<VariableId, usize> =
                    colouring.into_iter().collect();
                println!("{}", json!({ "colouring": by_vertex, "stats": stats }));
            } else {
                let mut by_vertex: Vec<_> = colouring.into_iter().collect();
                by_vertex.sort_unstable();
                for (vertex, colour) in by_vertex {
                    match names.and_then(|n| n.get(vertex as usize)) {
                        Some(name) => println!("{name}: colour {colour}"),
                        None => println!("vertex {vertex}: colour {colour}"),
                    }
                }
            }
        }
        Outcome::Unsatisfiable => {
            if cli.json {
                println!("{}", json!({ "colouring": null, "stats": stats }));
            } else {
                println!("unsatisfiable");
            }
        }
    }
    report_stats(cli, &stats, problem);
    Ok(())
}

fn report_stats<V: ValueOrdering>(cli: &Cli, stats: &SearchStats, problem: &Problem<V>) {
    if cli.stats && !cli.json {
        println!(
            "nodes: {}, backtracks: {}, revisions: {}, prunings: {}",
            stats.nodes_visited,
            stats.backtracks,
            stats.total_revisions(),
            stats.total_prunings(),
        );
        print!("{}", render_stats_table(stats, problem.graph()));
    }
}
