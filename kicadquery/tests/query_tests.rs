//! Tests for the query layer against a fixture schematic

use kicadquery::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn simple() -> Schematic {
    parse_schematic(&fixture_path("simple.kicad_sch")).expect("Should parse")
}

#[test]
fn test_component_listing() {
    let schematic = simple();
    let query = SchematicQuery::new(&schematic);

    assert_eq!(query.list_components(None).len(), schematic.components.len());
    assert_eq!(query.list_components(Some("R")).len(), 2);
    assert_eq!(query.list_components(Some("C")).len(), 1);
}

#[test]
fn test_get_component() {
    let schematic = simple();
    let query = SchematicQuery::new(&schematic);

    let r1 = query.get_component("R1");
    let detail = r1.found().expect("R1 should exist");
    assert_eq!(detail.value, "10k");
    assert_eq!(detail.lib_id, "Device:R");

    let missing = query.get_component("Z9");
    assert!(!missing.is_found());
    let json = serde_json::to_value(&missing).unwrap();
    assert!(json["error"].as_str().unwrap().contains("Z9"));
}

#[test]
fn test_find_by_value() {
    let schematic = simple();
    let query = SchematicQuery::new(&schematic);

    let matches = query.find_components_by_value("10k");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].reference, "R1");
}

#[test]
fn test_nets_and_power_nets() {
    let schematic = simple();
    let query = SchematicQuery::new(&schematic);

    let nets = query.list_nets();
    assert!(nets.contains(&"VCC".to_string()));
    assert!(nets.contains(&"GND".to_string()));

    let power = query.find_power_nets();
    assert_eq!(power, vec!["VCC", "GND"]);

    let trace = query.trace_net("GND").into_found().expect("GND should exist");
    assert!(trace.connections.is_empty());
    assert!(!query.trace_net("CLK").is_found());
}

#[test]
fn test_json_contract() {
    let schematic = simple();
    let query = SchematicQuery::new(&schematic);

    let components = serde_json::to_value(query.list_components(Some("C"))).unwrap();
    assert_eq!(
        components,
        serde_json::json!([{
            "reference": "C1",
            "value": "100nF",
            "lib_id": "Device:C",
            "position": {"x": 152.4, "y": 80.01}
        }])
    );

    let wires = serde_json::to_value(query.get_wire_connections()).unwrap();
    assert_eq!(wires.as_array().unwrap().len(), 3);
    assert_eq!(wires[0]["uuid"], "2b7c1d9e-0000-4000-8000-000000000010");
    assert_eq!(wires[0]["start"], serde_json::json!({"x": 127.0, "y": 63.5}));

    let summary = serde_json::to_value(query.summary()).unwrap();
    assert_eq!(summary["components"], 3);
    assert_eq!(summary["filename"], "simple.kicad_sch");
}

#[test]
fn test_shared_across_threads() {
    let schematic = Arc::new(simple());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schematic = Arc::clone(&schematic);
            std::thread::spawn(move || {
                let query = SchematicQuery::new(&schematic);
                (query.list_nets(), query.get_component("R2"))
            })
        })
        .collect();

    for handle in handles {
        let (nets, r2) = handle.join().unwrap();
        assert_eq!(nets, vec!["VCC", "GND"]);
        assert_eq!(r2.into_found().unwrap().value, "4.7k");
    }
}
