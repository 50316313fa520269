//! KiCad Schematic Builder
//!
//! Turns the token tree of a `.kicad_sch` document into a [`Schematic`].
//! Four independent passes run over the children of the root form:
//!
//! - `(symbol ...)` instances become components, keyed by reference
//! - `(label ...)` and `(hierarchical_label ...)` become named nets
//! - `(wire (pts (xy X Y) (xy X Y)) ...)` become wires
//! - `(junction (at X Y) ...)` become junction points
//!
//! Optional fields that are absent fall back to defaults and incomplete
//! blocks are dropped. A coordinate or unit that is present but not a
//! number aborts the whole build.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::parser::schema::*;
use crate::parser::sexp::{ParseError, SExp, SExpParser};

#[derive(Debug, Error)]
pub enum KicadParseError {
    #[error("S-expression parse error: {0}")]
    SExpParse(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid number in {field}: {found}")]
    InvalidNumber { field: String, found: String },
    #[error("Missing coordinate in {field}")]
    MissingCoordinate { field: String },
}

const DEFAULT_UNIT: u32 = 1;

/// Parser for KiCad 6+ schematic files (`.kicad_sch`).
pub struct KicadParser;

impl KicadParser {
    /// Read and build a schematic from disk.
    pub fn parse_schematic(path: &Path) -> Result<Schematic, KicadParseError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_schematic_str(&content, path)
    }

    /// Build a schematic from document text. `filepath` is provenance only.
    pub fn parse_schematic_str(
        content: &str,
        filepath: impl Into<PathBuf>,
    ) -> Result<Schematic, KicadParseError> {
        let root = SExpParser::new(content).parse()?;
        Self::build_schematic(&root, filepath)
    }

    /// Build a schematic from an already-read token tree.
    pub fn build_schematic(
        root: &SExp,
        filepath: impl Into<PathBuf>,
    ) -> Result<Schematic, KicadParseError> {
        let filepath = filepath.into();
        if root.tag() != Some("kicad_sch") {
            tracing::warn!(
                "Root form of {} is {:?}, expected kicad_sch",
                filepath.display(),
                root.tag()
            );
        }

        let version = root.find_text("version").unwrap_or_default().to_string();
        let components = Self::parse_symbols(root)?;
        let nets = Self::parse_nets(root);
        let wires = Self::parse_wires(root)?;
        let junctions = Self::parse_junctions(root)?;

        tracing::debug!(
            "Built schematic {}: {} components, {} nets, {} wires, {} junctions",
            filepath.display(),
            components.len(),
            nets.len(),
            wires.len(),
            junctions.len()
        );

        Ok(Schematic {
            version,
            components,
            nets,
            wires,
            junctions,
            filepath,
        })
    }

    fn parse_symbols(root: &SExp) -> Result<IndexMap<String, Component>, KicadParseError> {
        let mut components = IndexMap::new();

        for sym in root.find_all("symbol") {
            let Some(component) = Self::parse_symbol(sym)? else {
                continue;
            };
            if components.contains_key(&component.reference) {
                tracing::debug!(
                    "Ignoring duplicate symbol {} (uuid {:?})",
                    component.reference,
                    component.uuid
                );
                continue;
            }
            components.insert(component.reference.clone(), component);
        }

        Ok(components)
    }

    /// `Ok(None)` for a symbol without a usable Reference property.
    fn parse_symbol(sexp: &SExp) -> Result<Option<Component>, KicadParseError> {
        let lib_id = sexp.find_text("lib_id").unwrap_or_default().to_string();
        let uuid = sexp.find_text("uuid").unwrap_or_default().to_string();
        let unit = match sexp.find_value("unit") {
            Some(unit) => Self::parse_unit(unit)?,
            None => DEFAULT_UNIT,
        };

        let position = match sexp.find_first("at") {
            Some(at) => Self::parse_position(at, "symbol at")?,
            None => Position::default(),
        };

        // (property "KEY" "VALUE" ...); a repeated key keeps its last value
        let mut properties = IndexMap::new();
        for prop in sexp.find_all("property") {
            let Some(list) = prop.as_list() else {
                continue;
            };
            if list.len() < 3 {
                continue;
            }
            if let (Some(key), Some(val)) = (list[1].as_atom(), list[2].as_atom()) {
                properties.insert(strip_quotes(key).to_string(), strip_quotes(val).to_string());
            }
        }

        let reference = properties.get("Reference").cloned().unwrap_or_default();
        if reference.is_empty() {
            tracing::debug!("Skipping symbol without reference (uuid {:?})", uuid);
            return Ok(None);
        }
        let value = properties.get("Value").cloned().unwrap_or_default();

        Ok(Some(Component {
            lib_id,
            reference,
            value,
            unit,
            position,
            uuid,
            properties,
            pins: IndexMap::new(),
        }))
    }

    fn parse_unit(unit: &SExp) -> Result<u32, KicadParseError> {
        unit.as_atom()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|u| *u > 0)
            .ok_or_else(|| KicadParseError::InvalidNumber {
                field: "symbol unit".to_string(),
                found: unit.to_string(),
            })
    }

    /// Net names come from labels only; node lists stay empty because no
    /// pin-to-wire connectivity is derived.
    fn parse_nets(root: &SExp) -> IndexMap<String, Net> {
        let mut nets = IndexMap::new();

        let labels = root.find_all("label");
        let hier_labels = root.find_all("hierarchical_label");
        for label in labels.into_iter().chain(hier_labels) {
            let name = label
                .as_list()
                .and_then(|l| l.get(1))
                .and_then(|t| t.as_atom())
                .map(strip_quotes)
                .unwrap_or_default();
            if name.is_empty() || nets.contains_key(name) {
                continue;
            }
            nets.insert(name.to_string(), Net::new(name));
        }

        nets
    }

    /// Only the first two points of `pts` are kept; a wire with fewer is dropped.
    fn parse_wires(root: &SExp) -> Result<Vec<Wire>, KicadParseError> {
        let mut wires = Vec::new();

        for wire in root.find_all("wire") {
            let points = wire
                .find_first("pts")
                .map(|pts| pts.find_all("xy"))
                .unwrap_or_default();

            if points.len() < 2 {
                tracing::debug!("Dropping wire with {} point(s)", points.len());
                continue;
            }

            wires.push(Wire {
                start: Self::parse_position(points[0], "wire xy")?,
                end: Self::parse_position(points[1], "wire xy")?,
                uuid: wire.find_text("uuid").unwrap_or_default().to_string(),
            });
        }

        Ok(wires)
    }

    fn parse_junctions(root: &SExp) -> Result<Vec<Position>, KicadParseError> {
        let mut junctions = Vec::new();

        for junction in root.find_all("junction") {
            match junction.find_first("at") {
                Some(at) if at.as_list().map_or(0, |l| l.len()) >= 3 => {
                    junctions.push(Self::parse_position(at, "junction at")?);
                }
                _ => tracing::debug!("Skipping junction without position"),
            }
        }

        Ok(junctions)
    }

    /// Reads `(tag X Y ...)` as a position.
    fn parse_position(sexp: &SExp, field: &str) -> Result<Position, KicadParseError> {
        let x = Self::parse_coordinate(sexp, 1, field)?;
        let y = Self::parse_coordinate(sexp, 2, field)?;
        Ok(Position { x, y })
    }

    fn parse_coordinate(sexp: &SExp, index: usize, field: &str) -> Result<f64, KicadParseError> {
        let item = sexp
            .as_list()
            .and_then(|l| l.get(index))
            .ok_or_else(|| KicadParseError::MissingCoordinate {
                field: field.to_string(),
            })?;

        item.as_atom()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or_else(|| KicadParseError::InvalidNumber {
                field: field.to_string(),
                found: item.to_string(),
            })
    }
}

// Strings arrive unquoted; only a value written with escaped quotes
// (`"\"R1\""`) still carries them, and those are trimmed from both ends.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}
