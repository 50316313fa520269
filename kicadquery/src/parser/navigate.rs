//! Tag lookups over the token tree.
//!
//! Every lookup scans only the immediate children of a node. A child
//! matches when it is a list whose head is a bare symbol equal to the tag.
//! Atoms among the children are skipped, and nothing here ever fails:
//! absence comes back as `None` or an empty `Vec`.

use crate::parser::sexp::SExp;

impl SExp {
    fn children(&self) -> &[SExp] {
        self.as_list().unwrap_or(&[])
    }

    /// First child list tagged `tag`, e.g. the `(at 10 20 0)` of a symbol.
    pub fn find_first(&self, tag: &str) -> Option<&SExp> {
        self.children().iter().find(|child| child.tag() == Some(tag))
    }

    /// Second element of the first child list tagged `tag` that has one.
    ///
    /// Lists that carry only the tag, like a bare `(uuid)`, are passed over.
    pub fn find_value(&self, tag: &str) -> Option<&SExp> {
        self.children()
            .iter()
            .filter(|child| child.tag() == Some(tag))
            .find_map(|child| child.as_list().and_then(|items| items.get(1)))
    }

    /// Text of [`SExp::find_value`] when that value is an atom.
    pub fn find_text(&self, tag: &str) -> Option<&str> {
        self.find_value(tag).and_then(|value| value.as_atom())
    }

    /// Every child list tagged `tag`, in source order.
    pub fn find_all(&self, tag: &str) -> Vec<&SExp> {
        self.children()
            .iter()
            .filter(|child| child.tag() == Some(tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::sexp::SExpParser;

    fn parse(input: &str) -> crate::parser::sexp::SExp {
        SExpParser::new(input).parse().unwrap()
    }

    #[test]
    fn test_find_first() {
        let root = parse("(sym (at 1 2) (at 3 4))");
        let at = root.find_first("at").unwrap();
        assert_eq!(at.to_string(), "(at 1 2)");
        assert!(root.find_first("pts").is_none());
    }

    #[test]
    fn test_find_first_is_not_recursive() {
        let root = parse("(sch (lib_symbols (symbol \"Device:R\")))");
        assert!(root.find_first("symbol").is_none());
        assert!(root.find_all("symbol").is_empty());
    }

    #[test]
    fn test_find_value() {
        let root = parse("(sch (version 20231120) (uuid \"abc\"))");
        assert_eq!(root.find_text("version"), Some("20231120"));
        assert_eq!(root.find_text("uuid"), Some("abc"));
        assert_eq!(root.find_text("generator"), None);
    }

    #[test]
    fn test_find_value_skips_bare_tags() {
        let root = parse("(sym (uuid) (uuid \"second\"))");
        assert_eq!(root.find_text("uuid"), Some("second"));

        let root = parse("(sym (uuid))");
        assert_eq!(root.find_value("uuid"), None);
    }

    #[test]
    fn test_find_value_of_list() {
        let root = parse("(wire (pts (xy 0 0)))");
        let value = root.find_value("pts").unwrap();
        assert_eq!(value.tag(), Some("xy"));
        assert_eq!(root.find_text("pts"), None);
    }

    #[test]
    fn test_find_all_in_order() {
        let root = parse("(sch (label \"A\") junk (wire) (label \"B\") \"label\" (label \"C\"))");
        let names: Vec<_> = root
            .find_all("label")
            .iter()
            .filter_map(|l| l.as_list().and_then(|items| items[1].as_atom()))
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let root = parse("(sch (Label \"A\") (\"label\" \"B\"))");
        assert!(root.find_all("label").is_empty());
    }

    #[test]
    fn test_atom_root_has_no_children() {
        let root = parse("kicad_sch");
        assert!(root.find_first("symbol").is_none());
        assert!(root.find_all("symbol").is_empty());
        assert!(root.find_value("version").is_none());
    }
}
