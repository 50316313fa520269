//! Crate-level error type and file loading shared by the library and CLI.

use std::path::Path;

use crate::parser::kicad::{KicadParseError, KicadParser};
use crate::parser::schema::Schematic;

#[derive(Debug, thiserror::Error)]
pub enum KicadQueryError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl From<KicadParseError> for KicadQueryError {
    fn from(e: KicadParseError) -> Self {
        match e {
            KicadParseError::Io(io) => KicadQueryError::Io(io),
            other => KicadQueryError::Parse(other.to_string()),
        }
    }
}

/// Load a `.kicad_sch` file into a [`Schematic`].
///
/// Only modern S-expression schematics are accepted; legacy `.sch` files
/// and PCB files are rejected before reading.
pub fn load_schematic(path: &Path) -> Result<Schematic, KicadQueryError> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("kicad_sch") => {}
        Some("sch") => {
            return Err(KicadQueryError::Other(format!(
                "{}: legacy KiCad 4/5 schematics are not supported",
                path.display()
            )))
        }
        _ => {
            return Err(KicadQueryError::Other(format!(
                "{}: expected a .kicad_sch file",
                path.display()
            )))
        }
    }

    tracing::debug!("Loading schematic {}", path.display());
    Ok(KicadParser::parse_schematic(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_schematic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.kicad_sch");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"(kicad_sch (symbol (property "Reference" "R1")))"#).unwrap();

        let sch = load_schematic(&path).unwrap();
        assert_eq!(sch.components.len(), 1);
        assert_eq!(sch.filepath, path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_schematic(Path::new("does_not_exist.kicad_sch")).unwrap_err();
        assert!(matches!(err, KicadQueryError::Io(_)));
    }

    #[test]
    fn test_wrong_extension() {
        let err = load_schematic(Path::new("board.kicad_pcb")).unwrap_err();
        assert!(matches!(err, KicadQueryError::Other(_)));

        let err = load_schematic(Path::new("old.sch")).unwrap_err();
        assert!(err.to_string().contains("legacy"));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.kicad_sch");
        std::fs::write(&path, [0x28, 0xff, 0xfe, 0x29]).unwrap();

        let err = load_schematic(&path).unwrap_err();
        assert!(matches!(err, KicadQueryError::Io(_)));
    }

    #[test]
    fn test_malformed_coordinate_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.kicad_sch");
        std::fs::write(&path, r#"(kicad_sch (junction (at x y)))"#).unwrap();

        let err = load_schematic(&path).unwrap_err();
        assert!(matches!(err, KicadQueryError::Parse(_)));
    }
}
