//! Load a schematic and print what the query layer sees.

use kicadquery::prelude::*;
use std::path::Path;

fn main() -> Result<(), KicadQueryError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/simple.kicad_sch".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example query_schematic [path/to/file.kicad_sch]");
        std::process::exit(1);
    }

    let schematic = load_schematic(path)?;
    let query = SchematicQuery::new(&schematic);

    let summary = query.summary();
    println!("Schematic: {} (version {})", summary.filename, summary.version);
    println!(
        "{} components, {} nets, {} wires, {} junctions",
        summary.components, summary.nets, summary.wires, summary.junctions
    );
    println!();

    for comp in query.list_components(None) {
        println!(
            "  {:<6} {:<12} {} @ ({}, {})",
            comp.reference, comp.value, comp.lib_id, comp.position.x, comp.position.y
        );
    }

    let power = query.find_power_nets();
    if !power.is_empty() {
        println!("\nPower nets: {}", power.join(", "));
    }

    Ok(())
}
