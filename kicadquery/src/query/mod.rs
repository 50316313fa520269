//! Read-only lookups over a built [`Schematic`].
//!
//! Every call returns owned records that serialize straight to JSON, so a
//! caller can hand them to another process without touching the model.
//! Unknown references and net names come back as [`Lookup::NotFound`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::schema::{Component, Position, Schematic};

/// Substrings that mark a net as a power rail (matched case-insensitively).
pub const POWER_NET_KEYWORDS: [&str; 7] = ["vcc", "vdd", "gnd", "vss", "+", "-", "power"];

/// Result of a lookup by name.
///
/// Serializes as the record itself when found and as `{"error": "..."}`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    NotFound { error: String },
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound { .. } => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub reference: String,
    pub value: String,
    pub lib_id: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDetail {
    pub reference: String,
    pub value: String,
    pub lib_id: String,
    pub position: Position,
    pub unit: u32,
    pub uuid: String,
    pub properties: IndexMap<String, String>,
    pub pins: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueMatch {
    pub reference: String,
    pub value: String,
    pub lib_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetTrace {
    pub name: String,
    pub connections: Vec<NetConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetConnection {
    #[serde(rename = "ref")]
    pub reference: String,
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireConnection {
    pub start: Position,
    pub end: Position,
    pub uuid: String,
}

/// Counts describing a schematic at a glance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchematicSummary {
    pub filename: String,
    pub version: String,
    pub components: usize,
    pub nets: usize,
    pub wires: usize,
    pub junctions: usize,
}

impl From<&Component> for ComponentSummary {
    fn from(comp: &Component) -> Self {
        Self {
            reference: comp.reference.clone(),
            value: comp.value.clone(),
            lib_id: comp.lib_id.clone(),
            position: comp.position,
        }
    }
}

impl From<&Component> for ComponentDetail {
    fn from(comp: &Component) -> Self {
        Self {
            reference: comp.reference.clone(),
            value: comp.value.clone(),
            lib_id: comp.lib_id.clone(),
            position: comp.position,
            unit: comp.unit,
            uuid: comp.uuid.clone(),
            properties: comp.properties.clone(),
            pins: comp.pins.clone(),
        }
    }
}

impl From<&Component> for ValueMatch {
    fn from(comp: &Component) -> Self {
        Self {
            reference: comp.reference.clone(),
            value: comp.value.clone(),
            lib_id: comp.lib_id.clone(),
        }
    }
}

/// Query handle borrowing a schematic. Cheap to copy and safe to share
/// between threads.
#[derive(Debug, Clone, Copy)]
pub struct SchematicQuery<'a> {
    schematic: &'a Schematic,
}

impl<'a> SchematicQuery<'a> {
    pub fn new(schematic: &'a Schematic) -> Self {
        Self { schematic }
    }

    pub fn schematic(&self) -> &'a Schematic {
        self.schematic
    }

    pub fn summary(&self) -> SchematicSummary {
        SchematicSummary {
            filename: self.schematic.filename(),
            version: self.schematic.version.clone(),
            components: self.schematic.components.len(),
            nets: self.schematic.nets.len(),
            wires: self.schematic.wires.len(),
            junctions: self.schematic.junctions.len(),
        }
    }

    /// All components, or only those whose reference starts with `type_prefix`
    /// (`"R"` for resistors, `"U"` for ICs).
    pub fn list_components(&self, type_prefix: Option<&str>) -> Vec<ComponentSummary> {
        self.schematic
            .components
            .iter()
            .filter(|(reference, _)| type_prefix.map_or(true, |p| reference.starts_with(p)))
            .map(|(_, comp)| ComponentSummary::from(comp))
            .collect()
    }

    pub fn get_component(&self, reference: &str) -> Lookup<ComponentDetail> {
        match self.schematic.components.get(reference) {
            Some(comp) => Lookup::Found(ComponentDetail::from(comp)),
            None => Lookup::NotFound {
                error: format!("Component '{}' not found", reference),
            },
        }
    }

    /// Components whose value contains `pattern`, ignoring case.
    pub fn find_components_by_value(&self, pattern: &str) -> Vec<ValueMatch> {
        let pattern = pattern.to_lowercase();
        self.schematic
            .components
            .values()
            .filter(|comp| comp.value.to_lowercase().contains(&pattern))
            .map(ValueMatch::from)
            .collect()
    }

    pub fn list_nets(&self) -> Vec<String> {
        self.schematic.nets.keys().cloned().collect()
    }

    pub fn trace_net(&self, name: &str) -> Lookup<NetTrace> {
        match self.schematic.nets.get(name) {
            Some(net) => Lookup::Found(NetTrace {
                name: net.name.clone(),
                connections: net
                    .nodes
                    .iter()
                    .map(|node| NetConnection {
                        reference: node.reference.clone(),
                        pin: node.pin.clone(),
                    })
                    .collect(),
            }),
            None => Lookup::NotFound {
                error: format!("Net '{}' not found", name),
            },
        }
    }

    pub fn get_wire_connections(&self) -> Vec<WireConnection> {
        self.schematic
            .wires
            .iter()
            .map(|w| WireConnection {
                start: w.start,
                end: w.end,
                uuid: w.uuid.clone(),
            })
            .collect()
    }

    pub fn find_power_nets(&self) -> Vec<String> {
        self.schematic
            .nets
            .keys()
            .filter(|name| is_power_net(name))
            .cloned()
            .collect()
    }
}

pub fn is_power_net(name: &str) -> bool {
    let lower = name.to_lowercase();
    POWER_NET_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
