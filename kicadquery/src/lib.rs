//! KicadQuery - typed, queryable model of KiCad schematics
//!
//! This library reads a `.kicad_sch` document into a [`Schematic`] holding
//! its components, label-derived nets, wires and junctions, and answers
//! bounded lookups over it through [`SchematicQuery`].
//!
//! # Quick Start
//!
//! ```no_run
//! use kicadquery::{parse_schematic, SchematicQuery};
//! use std::path::Path;
//!
//! let schematic = parse_schematic(Path::new("design.kicad_sch")).unwrap();
//! let query = SchematicQuery::new(&schematic);
//!
//! for resistor in query.list_components(Some("R")) {
//!     println!("{}: {}", resistor.reference, resistor.value);
//! }
//! println!("power nets: {:?}", query.find_power_nets());
//! ```
//!
//! Every query result implements `serde::Serialize`, and lookups of unknown
//! names return [`Lookup::NotFound`] instead of failing.

pub mod core;
pub mod parser;
pub mod query;

// Re-export main types
pub use crate::core::{load_schematic, KicadQueryError};
pub use parser::kicad::{KicadParseError, KicadParser};
pub use parser::schema::{Component, Net, NetNode, Position, Schematic, Wire};
pub use parser::sexp::{SExp, SExpParser};
pub use query::{
    ComponentDetail, ComponentSummary, Lookup, NetConnection, NetTrace, SchematicQuery,
    SchematicSummary, ValueMatch, WireConnection,
};

/// Parse a schematic file (convenience wrapper).
pub fn parse_schematic(path: &std::path::Path) -> Result<Schematic, KicadQueryError> {
    Ok(KicadParser::parse_schematic(path)?)
}

/// Parse schematic text; `filename` is recorded as provenance only.
pub fn parse_schematic_str(content: &str, filename: &str) -> Result<Schematic, KicadQueryError> {
    Ok(KicadParser::parse_schematic_str(content, filename)?)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        load_schematic, parse_schematic, parse_schematic_str, KicadQueryError, Lookup, Schematic,
        SchematicQuery,
    };
}
