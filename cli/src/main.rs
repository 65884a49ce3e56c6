//! Flownet CLI: solve max flow, min cut and molecule instances
//!
//! Reads an instance from a file or standard input and prints the answer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use flownet::{
    CutReport, EdgeFlow, FlowAlgorithm, FlowProblem, FlowReport, Molecule, MoleculeReport, Solver,
    SolverConfig,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "flownet", version, about = "Maximum flow toolkit")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Solver configuration file (YAML)
    #[arg(long, global = true, env = "FLOWNET_CONFIG")]
    config: Option<PathBuf>,

    /// Log algorithm phases to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Maximum flow of an `n m` + `from to capacity` instance
    MaxFlow {
        /// Instance file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// dinic, edmonds-karp or ford-fulkerson
        #[arg(long)]
        algorithm: Option<FlowAlgorithm>,

        /// Source vertex, 1-based (default: 1)
        #[arg(long)]
        source: Option<usize>,

        /// Sink vertex, 1-based (default: n)
        #[arg(long)]
        sink: Option<usize>,
    },
    /// Minimum cut of an `n m` + `from to capacity` instance
    MinCut {
        /// Instance file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Algorithm used to drain the network first
        #[arg(long)]
        algorithm: Option<FlowAlgorithm>,

        #[arg(long)]
        source: Option<usize>,

        #[arg(long)]
        sink: Option<usize>,
    },
    /// Check whether a grid molecule can satisfy every valence
    Molecule {
        /// Instance file (reads stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SolverConfig::default(),
    };

    match cli.command {
        Commands::MaxFlow { input, algorithm, source, sink } => {
            let solver = build_solver(apply_overrides(config, algorithm, source, sink));
            let problem = FlowProblem::parse(&read_input(input.as_deref())?)?;
            let report = solver.solve(&problem)?;
            print_flow(&report, &cli.format)
        }
        Commands::MinCut { input, algorithm, source, sink } => {
            let solver = build_solver(apply_overrides(config, algorithm, source, sink));
            let problem = FlowProblem::parse(&read_input(input.as_deref())?)?;
            let cut = solver.min_cut(&problem)?;
            print_cut(&cut, &cli.format)
        }
        Commands::Molecule { input } => {
            let molecule = Molecule::parse(&read_input(input.as_deref())?)?;
            let report = build_solver(config).check_molecule(&molecule);
            print_molecule(&report, &cli.format)
        }
    }
}

fn build_solver(config: SolverConfig) -> Solver {
    let solver = Solver::new(config);
    debug!(config = ?solver.config(), "effective solver config");
    solver
}

fn apply_overrides(
    config: SolverConfig,
    algorithm: Option<FlowAlgorithm>,
    source: Option<usize>,
    sink: Option<usize>,
) -> SolverConfig {
    let config = config.with_terminals(source, sink);
    match algorithm {
        Some(algorithm) => config.with_algorithm(algorithm),
        None => config,
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn print_flow(report: &FlowReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", report.max_flow),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            println!("{}", edge_table(&report.edges));
            println!(
                "max flow {} from {} to {} ({}, {} phase(s))",
                report.max_flow, report.source, report.sink, report.algorithm, report.phases
            );
        }
    }
    Ok(())
}

fn print_cut(cut: &CutReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", cut.capacity);
            for edge in &cut.edges {
                println!("{} {} {}", edge.from, edge.to, edge.capacity);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(cut)?),
        OutputFormat::Table => {
            println!("{}", edge_table(&cut.edges));
            let side: Vec<String> = cut.source_side.iter().map(|v| v.to_string()).collect();
            println!("cut capacity {}, source side {{{}}}", cut.capacity, side.join(", "));
        }
    }
    Ok(())
}

fn print_molecule(report: &MoleculeReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Bonds", "Even valence", "Odd valence", "Verdict"]);
            table.add_row(vec![
                report.bonds.to_string(),
                report.left_valence.to_string(),
                report.right_valence.to_string(),
                report.to_string(),
            ]);
            println!("{}", table);
        }
    }
    Ok(())
}

fn edge_table(edges: &[EdgeFlow]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["From", "To", "Capacity", "Flow"]);
    for edge in edges {
        table.add_row(vec![
            edge.from.to_string(),
            edge.to.to_string(),
            edge.capacity.to_string(),
            edge.flow.to_string(),
        ]);
    }
    table
}
