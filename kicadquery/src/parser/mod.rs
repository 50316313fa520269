pub mod kicad;
pub mod navigate;
pub mod schema;
pub mod sexp;

// Re-export for convenience
pub use kicad::{KicadParseError, KicadParser};
pub use schema::*;
pub use sexp::{Atom, ParseError, SExp, SExpParser};
