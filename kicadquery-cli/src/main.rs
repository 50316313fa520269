//! KicadQuery CLI - ask structured questions about a KiCad schematic.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kicadquery::{load_schematic, Lookup, Schematic, SchematicQuery};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kicadquery")]
#[command(about = "Query components, nets and wires of a KiCAD schematic", long_about = None)]
#[command(version)]
struct Cli {
    /// Log parser decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// Path to .kicad_sch file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show file name, version and entity counts
    Summary {
        #[command(flatten)]
        target: Target,
    },

    /// List components, optionally filtered by reference prefix
    Components {
        #[command(flatten)]
        target: Target,

        /// Reference prefix such as R, C or U
        #[arg(short = 't', long = "type", value_name = "PREFIX")]
        type_prefix: Option<String>,
    },

    /// Show one component by reference designator
    Component {
        #[command(flatten)]
        target: Target,

        /// Reference designator such as R1
        reference: String,
    },

    /// Find components whose value contains a pattern (case-insensitive)
    FindValue {
        #[command(flatten)]
        target: Target,

        /// Value or fragment such as 10k or LM358
        pattern: String,
    },

    /// List all named nets
    Nets {
        #[command(flatten)]
        target: Target,
    },

    /// Show the connections recorded on a net
    Trace {
        #[command(flatten)]
        target: Target,

        /// Net name
        net: String,
    },

    /// List wires with their endpoints
    Wires {
        #[command(flatten)]
        target: Target,
    },

    /// List nets that look like power rails (VCC, GND, ...)
    PowerNets {
        #[command(flatten)]
        target: Target,
    },

    /// Dump components, nets, wires and junctions as JSON
    Export {
        /// Path to .kicad_sch file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts and tools
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Summary { target } => run(&target, |query, format| {
            let summary = query.summary();
            match format {
                OutputFormat::Json => print_json(&summary),
                OutputFormat::Human => {
                    println!("File:       {}", summary.filename);
                    println!("Version:    {}", summary.version);
                    println!("Components: {}", summary.components);
                    println!("Nets:       {}", summary.nets);
                    println!("Wires:      {}", summary.wires);
                    println!("Junctions:  {}", summary.junctions);
                    0
                }
            }
        }),
        Commands::Components {
            target,
            type_prefix,
        } => run(&target, |query, format| {
            let components = query.list_components(type_prefix.as_deref());
            match format {
                OutputFormat::Json => print_json(&components),
                OutputFormat::Human => {
                    if components.is_empty() {
                        println!("No components found");
                    }
                    for c in &components {
                        println!(
                            "{:<8} {:<16} {:<28} ({}, {})",
                            c.reference, c.value, c.lib_id, c.position.x, c.position.y
                        );
                    }
                    0
                }
            }
        }),
        Commands::Component { target, reference } => run(&target, |query, format| {
            let lookup = query.get_component(&reference);
            match (format, &lookup) {
                (OutputFormat::Json, _) => print_json(&lookup),
                (OutputFormat::Human, Lookup::NotFound { error }) => {
                    println!("{}", error);
                    0
                }
                (OutputFormat::Human, Lookup::Found(c)) => {
                    println!("Reference: {}", c.reference);
                    println!("Value:     {}", c.value);
                    println!("Library:   {}", c.lib_id);
                    println!("Unit:      {}", c.unit);
                    println!("Position:  ({}, {})", c.position.x, c.position.y);
                    println!("UUID:      {}", c.uuid);
                    println!("Properties:");
                    for (key, value) in &c.properties {
                        println!("  {}: {}", key, value);
                    }
                    0
                }
            }
        }),
        Commands::FindValue { target, pattern } => run(&target, |query, format| {
            let matches = query.find_components_by_value(&pattern);
            match format {
                OutputFormat::Json => print_json(&matches),
                OutputFormat::Human => {
                    if matches.is_empty() {
                        println!("No components with value matching '{}'", pattern);
                    }
                    for m in &matches {
                        println!("{:<8} {:<16} {}", m.reference, m.value, m.lib_id);
                    }
                    0
                }
            }
        }),
        Commands::Nets { target } => run(&target, |query, format| {
            let nets = query.list_nets();
            match format {
                OutputFormat::Json => print_json(&nets),
                OutputFormat::Human => print_names(&nets, "No named nets"),
            }
        }),
        Commands::Trace { target, net } => run(&target, |query, format| {
            let lookup = query.trace_net(&net);
            match (format, &lookup) {
                (OutputFormat::Json, _) => print_json(&lookup),
                (OutputFormat::Human, Lookup::NotFound { error }) => {
                    println!("{}", error);
                    0
                }
                (OutputFormat::Human, Lookup::Found(trace)) => {
                    println!("Net: {}", trace.name);
                    if trace.connections.is_empty() {
                        println!("  (no pin connections recorded)");
                    }
                    for conn in &trace.connections {
                        println!("  {} pin {}", conn.reference, conn.pin);
                    }
                    0
                }
            }
        }),
        Commands::Wires { target } => run(&target, |query, format| {
            let wires = query.get_wire_connections();
            match format {
                OutputFormat::Json => print_json(&wires),
                OutputFormat::Human => {
                    if wires.is_empty() {
                        println!("No wires");
                    }
                    for w in &wires {
                        println!(
                            "({}, {}) -> ({}, {})  {}",
                            w.start.x, w.start.y, w.end.x, w.end.y, w.uuid
                        );
                    }
                    0
                }
            }
        }),
        Commands::PowerNets { target } => run(&target, |query, format| {
            let nets = query.find_power_nets();
            match format {
                OutputFormat::Json => print_json(&nets),
                OutputFormat::Human => print_names(&nets, "No power nets"),
            }
        }),
        Commands::Export { file } => match load(&file) {
            Some(schematic) => print_json(&schematic.to_payload()),
            None => 1,
        },
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "kicadquery=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &Path) -> Option<Schematic> {
    match load_schematic(file) {
        Ok(schematic) => Some(schematic),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

/// Load `target.file` and hand a query over it to `f`; returns the exit code.
fn run<F>(target: &Target, f: F) -> i32
where
    F: FnOnce(SchematicQuery<'_>, &OutputFormat) -> i32,
{
    match load(&target.file) {
        Some(schematic) => f(SchematicQuery::new(&schematic), &target.format),
        None => 1,
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_names(names: &[String], empty: &str) -> i32 {
    if names.is_empty() {
        println!("{}", empty);
    }
    for name in names {
        println!("{}", name);
    }
    0
}
