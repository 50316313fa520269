use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("Trailing input at position {0}")]
    TrailingInput(usize),
    #[error("Nesting too deep at position {0}")]
    TooDeep(usize),
}

/// Deepest list nesting accepted; KiCad documents stay far below this.
pub const MAX_DEPTH: usize = 512;

/// A leaf of the token tree.
///
/// Numbers keep their source lexeme so identifiers made only of digits
/// round-trip unchanged when read back as text.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Symbol(String),
    Str(String),
    Number(String),
}

impl Atom {
    pub fn text(&self) -> &str {
        match self {
            Atom::Symbol(s) | Atom::Str(s) | Atom::Number(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SExp {
    Atom(Atom),
    List(Vec<SExp>),
}

impl SExp {
    pub fn symbol(s: impl Into<String>) -> Self {
        SExp::Atom(Atom::Symbol(s.into()))
    }

    pub fn string(s: impl Into<String>) -> Self {
        SExp::Atom(Atom::Str(s.into()))
    }

    /// Textual value of any atom, `None` for lists.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExp::Atom(atom) => Some(atom.text()),
            _ => None,
        }
    }

    /// Only bare symbols can act as a list tag.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            SExp::Atom(Atom::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    /// Head symbol of a list, e.g. `wire` for `(wire (pts ...))`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.first())
            .and_then(|head| head.as_symbol())
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExp::Atom(Atom::Str(s)) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            SExp::Atom(atom) => write!(f, "{}", atom.text()),
            SExp::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub struct SExpParser {
    input: Vec<char>,
    pos: usize,
    depth: usize,
}

impl SExpParser {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    /// Read exactly one form; anything but whitespace after it is an error.
    pub fn parse(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }
        let root = self.parse_sexp()?;
        self.skip_whitespace();
        if !self.is_eof() {
            return Err(ParseError::TrailingInput(self.pos));
        }
        Ok(root)
    }

    fn parse_sexp(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();

        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        match self.peek() {
            '(' => self.parse_list(),
            ')' => Err(ParseError::UnexpectedToken(format!(
                "unbalanced ')' at position {}",
                self.pos
            ))),
            '"' => self.parse_string(),
            _ => self.parse_bare(),
        }
    }

    fn parse_list(&mut self) -> Result<SExp, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep(self.pos));
        }
        self.expect_char('(')?;
        self.depth += 1;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_eof() {
                return Err(ParseError::UnexpectedEof);
            }

            if self.peek() == ')' {
                self.advance();
                break;
            }

            items.push(self.parse_sexp()?);
        }

        self.depth -= 1;
        Ok(SExp::List(items))
    }

    fn parse_string(&mut self) -> Result<SExp, ParseError> {
        self.expect_char('"')?;
        let mut s = String::new();
        let mut escaped = false;

        loop {
            if self.is_eof() {
                return Err(ParseError::UnexpectedEof);
            }
            let ch = self.peek();
            self.advance();

            if escaped {
                match ch {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    _ => s.push(ch),
                }
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                break;
            } else {
                s.push(ch);
            }
        }

        Ok(SExp::string(s))
    }

    fn parse_bare(&mut self) -> Result<SExp, ParseError> {
        let mut s = String::new();

        while !self.is_eof() {
            let ch = self.peek();
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            s.push(ch);
            self.advance();
        }

        if s.is_empty() {
            return Err(ParseError::UnexpectedToken("empty symbol".to_string()));
        }

        if is_number(&s) {
            Ok(SExp::Atom(Atom::Number(s)))
        } else {
            Ok(SExp::Atom(Atom::Symbol(s)))
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        let ch = self.peek();
        if ch == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(format!(
                "Expected '{}', found '{}'",
                expected, ch
            )))
        }
    }
}

// `f64::from_str` also accepts "inf" and "nan", which are symbols here.
fn is_number(s: &str) -> bool {
    let first = s.chars().next().unwrap_or(' ');
    (first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) && s.parse::<f64>().is_ok()
}
