use crate::css::errors::CssError;
use crate::css::node::CssNode;
use crate::span::Position;
use ast_grep_language::{LanguageExt, SupportLang};
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser, Point, Tree};

/// Longest slice of offending source quoted in a parse error message.
const ERROR_SNIPPET_LEN: usize = 24;

/// Tree-sitter parser wrapper for CSS source.
pub struct CssParser {
    parser: Parser,
}

impl CssParser {
    pub fn new() -> Result<Self, CssError> {
        let mut parser = Parser::new();
        let ts_lang = SupportLang::Css.get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| CssError::LanguageSet)?;

        Ok(Self { parser })
    }

    /// Parse source into a raw tree-sitter tree.
    pub fn parse(&mut self, source: &str) -> Result<Tree, CssError> {
        self.parser
            .parse(source, None)
            .ok_or(CssError::ParseFailed)
    }

    /// Parse source and collect its syntax errors.
    ///
    /// A stylesheet with syntax errors still yields a tree; the errors are
    /// reported alongside it rather than failing the parse.
    pub fn parse_stylesheet<'a>(&mut self, source: &'a str) -> Result<Stylesheet<'a>, CssError> {
        let tree = self.parse(source)?;
        let mut errors = Vec::new();
        collect_parse_errors(tree.root_node(), source, &mut errors);
        Ok(Stylesheet {
            source,
            tree,
            errors,
        })
    }
}

/// A grammar violation found while parsing. Never aborts analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    pub location: Position,
}

/// A parsed stylesheet with its tree-sitter tree.
pub struct Stylesheet<'a> {
    source: &'a str,
    tree: Tree,
    errors: Vec<ParseError>,
}

impl<'a> Stylesheet<'a> {
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> CssNode<'_> {
        CssNode::new(self.tree.root_node(), self.source)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Call `f` for every node of `kind`, in document order.
    ///
    /// ERROR subtrees are not entered, so rules only ever see well-formed
    /// structure from a partially broken document.
    pub fn visit<'s, F>(&'s self, kind: &str, mut f: F)
    where
        F: FnMut(CssNode<'s>),
    {
        walk(self.tree.root_node(), self.source, kind, &mut f);
    }

    /// All nodes of `kind`, in document order.
    pub fn nodes_of_kind(&self, kind: &str) -> Vec<CssNode<'_>> {
        let mut nodes = Vec::new();
        self.visit(kind, |node| nodes.push(node));
        nodes
    }

    /// Position of a byte offset into the source.
    pub fn position_at(&self, byte: usize) -> Position {
        let byte = byte.min(self.source.len());
        let before = &self.source.as_bytes()[..byte];
        let row = before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        position_of(Point::new(row, byte - line_start))
    }
}

fn walk<'t>(node: Node<'t>, source: &'t str, kind: &str, f: &mut dyn FnMut(CssNode<'t>)) {
    if node.is_error() {
        return;
    }
    if node.kind() == kind {
        f(CssNode::new(node, source));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, kind, f);
    }
}

/// Convert a tree-sitter point to an engine position.
///
/// This is the only place 0-based coordinates become 1-based.
pub(crate) fn position_of(point: Point) -> Position {
    Position::new(point.row + 1, point.column + 1)
}

fn collect_parse_errors(node: Node<'_>, source: &str, errors: &mut Vec<ParseError>) {
    if node.is_missing() {
        errors.push(ParseError {
            message: format!("missing `{}`", node.kind()),
            location: position_of(node.start_position()),
        });
        return;
    }

    if node.is_error() {
        let text = source.get(node.byte_range()).unwrap_or_default();
        errors.push(ParseError {
            message: format!("unexpected `{}`", snippet(text)),
            location: position_of(node.start_position()),
        });
        return;
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_parse_errors(child, source, errors);
    }
}

fn snippet(text: &str) -> String {
    let first_line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let mut out: String = first_line.chars().take(ERROR_SNIPPET_LEN).collect();
    if first_line.chars().count() > ERROR_SNIPPET_LEN {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::kinds;

    #[test]
    fn parse_valid_css() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser
            .parse_stylesheet(".card {\n  padding: 8px;\n}")
            .unwrap();

        assert!(!sheet.has_errors());
        assert_eq!(sheet.root().kind(), "stylesheet");
    }

    #[test]
    fn parse_invalid_css_reports_errors() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser.parse_stylesheet(".a { color: red;\n").unwrap();

        assert!(sheet.has_errors());
        let err = &sheet.errors()[0];
        assert!(err.location.line >= 1);
        assert!(err.location.column >= 1);
    }

    #[test]
    fn positions_are_one_based() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser
            .parse_stylesheet(".card {\n  padding: 8px;\n}")
            .unwrap();
        let decls = sheet.nodes_of_kind(kinds::DECLARATION);

        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].start(), Position::new(2, 3));
        assert_eq!(decls[0].end(), Position::new(2, 16));
    }

    #[test]
    fn visit_is_document_ordered() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser
            .parse_stylesheet(".a { color: red; }\n.b { margin: 0; }")
            .unwrap();
        let mut props = Vec::new();
        sheet.visit(kinds::PROPERTY_NAME, |node| props.push(node.text().to_string()));

        assert_eq!(props, vec!["color", "margin"]);
    }

    #[test]
    fn byte_offsets_map_to_positions() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser.parse_stylesheet(".a {\n  color: red;\n}").unwrap();

        assert_eq!(sheet.position_at(0), Position::new(1, 1));
        assert_eq!(sheet.position_at(7), Position::new(2, 3));
        assert_eq!(sheet.position_at(999), Position::new(3, 2));
    }

    #[test]
    fn snippet_is_truncated() {
        assert_eq!(snippet("  abc  "), "abc");
        let long = "x".repeat(40);
        assert_eq!(snippet(&long).len(), ERROR_SNIPPET_LEN + 3);
    }
}
