use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub version: String,
    /// Keyed by reference designator, in first-seen order.
    pub components: IndexMap<String, Component>,
    /// Keyed by net name, in first-seen order.
    pub nets: IndexMap<String, Net>,
    pub wires: Vec<Wire>,
    pub junctions: Vec<Position>,
    pub filepath: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub lib_id: String,      // Device:R
    pub reference: String,   // R1, C1, U1
    pub value: String,       // 10k, 100nF, STM32F4
    pub unit: u32,
    pub position: Position,
    pub uuid: String,
    pub properties: IndexMap<String, String>,
    /// Pin number to pin name.
    pub pins: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    pub start: Position,
    pub end: Position,
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub nodes: Vec<NetNode>,
}

impl Net {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }
}

/// One component pin attached to a net.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NetNode {
    pub reference: String,
    pub pin: String,
}

impl Schematic {
    /// File name of the source document, or an empty string for in-memory input.
    pub fn filename(&self) -> String {
        self.filepath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Components, nets, wires and junctions as one JSON mapping, verbatim.
    ///
    /// This is the payload handed to downstream redaction or encryption
    /// layers; nothing is filtered here.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "version": self.version,
            "components": self.components,
            "nets": self.nets,
            "wires": self.wires,
            "junctions": self.junctions,
        })
    }
}
