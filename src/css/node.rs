use crate::css::parser::position_of;
use crate::span::{Position, Range};
use tree_sitter::Node;

/// Node kinds produced by the tree-sitter CSS grammar.
pub mod kinds {
    pub const STYLESHEET: &str = "stylesheet";
    pub const RULE_SET: &str = "rule_set";
    pub const SELECTORS: &str = "selectors";
    pub const BLOCK: &str = "block";
    pub const DECLARATION: &str = "declaration";
    pub const PROPERTY_NAME: &str = "property_name";
    pub const INTEGER_VALUE: &str = "integer_value";
    pub const FLOAT_VALUE: &str = "float_value";
    pub const UNIT: &str = "unit";
    pub const COLOR_VALUE: &str = "color_value";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const FUNCTION_NAME: &str = "function_name";
    pub const ARGUMENTS: &str = "arguments";
    pub const IMPORTANT: &str = "important";
    pub const COMMENT: &str = "comment";
}

/// A syntax node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssNode<'t> {
    node: Node<'t>,
    source: &'t str,
}

impl<'t> CssNode<'t> {
    pub(crate) fn new(node: Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    pub fn kind(&self) -> &'static str {
        self.node.kind()
    }

    pub fn raw(&self) -> Node<'t> {
        self.node
    }

    pub fn start(&self) -> Position {
        position_of(self.node.start_position())
    }

    pub fn end(&self) -> Position {
        position_of(self.node.end_position())
    }

    pub fn range(&self) -> Range {
        Range::new(self.start(), self.end())
    }

    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.node.byte_range()
    }

    /// Exact source text covered by this node.
    pub fn text(&self) -> &'t str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    /// Canonical serialization of this subtree, see [`canonicalize`].
    pub fn generate(&self) -> String {
        canonicalize(self.text())
    }

    pub fn has_error(&self) -> bool {
        self.node.has_error()
    }

    pub fn children(&self) -> Vec<CssNode<'t>> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|n| CssNode::new(n, self.source))
            .collect()
    }

    pub fn named_children(&self) -> Vec<CssNode<'t>> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .map(|n| CssNode::new(n, self.source))
            .collect()
    }

    pub fn child_of_kind(&self, kind: &str) -> Option<CssNode<'t>> {
        self.children().into_iter().find(|c| c.kind() == kind)
    }

    pub fn parent(&self) -> Option<CssNode<'t>> {
        self.node.parent().map(|n| CssNode::new(n, self.source))
    }

    /// Nearest ancestor of `kind`, not including this node.
    pub fn ancestor_of_kind(&self, kind: &str) -> Option<CssNode<'t>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind() == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// Full text of the source line this node starts on.
    pub fn start_line_text(&self) -> &'t str {
        let start = self.node.start_byte();
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i);
        &self.source[line_start..line_end]
    }

    /// Source text after this node, up to the end of the line it ends on.
    pub fn end_line_rest(&self) -> &'t str {
        let rest = &self.source[self.node.end_byte()..];
        &rest[..rest.find('\n').unwrap_or(rest.len())]
    }
}

/// Serialize CSS text in canonical form.
///
/// Whitespace runs collapse to a single space, no whitespace is kept next to
/// `,`, `(` or `)`, and the result is trimmed. Quoted strings and comments
/// are copied verbatim.
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space {
            let prev_glues = out.ends_with([',', '(', ')']) || out.is_empty();
            let next_glues = matches!(c, ',' | '(' | ')');
            if !prev_glues && !next_glues {
                out.push(' ');
            }
            pending_space = false;
        }

        match c {
            '"' | '\'' => {
                out.push(c);
                let mut escaped = false;
                for inner in chars.by_ref() {
                    out.push(inner);
                    if escaped {
                        escaped = false;
                    } else if inner == '\\' {
                        escaped = true;
                    } else if inner == c {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                out.push(c);
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    out.push(inner);
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Structured view of a `declaration` node.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'t> {
    pub node: CssNode<'t>,
    pub property: &'t str,
    value: &'t str,
    pub important: bool,
    pub has_semicolon: bool,
}

impl<'t> Declaration<'t> {
    pub fn from_node(node: CssNode<'t>) -> Option<Self> {
        if node.kind() != kinds::DECLARATION || node.has_error() {
            return None;
        }

        let children = node.children();
        let property = children
            .iter()
            .find(|c| c.kind() == kinds::PROPERTY_NAME)?
            .text();
        let colon = children.iter().position(|c| c.kind() == ":")?;

        let mut important = false;
        let mut has_semicolon = false;
        let mut value_start = None;
        let mut value_end = None;
        for child in &children[colon + 1..] {
            match child.kind() {
                kinds::IMPORTANT => important = true,
                ";" => has_semicolon = true,
                kinds::COMMENT => {}
                _ => {
                    let bytes = child.byte_range();
                    value_start.get_or_insert(bytes.start);
                    value_end = Some(bytes.end);
                }
            }
        }

        let value = match (value_start, value_end) {
            (Some(start), Some(end)) => node.source.get(start..end).unwrap_or_default(),
            _ => "",
        };

        Some(Self {
            node,
            property,
            value,
            important,
            has_semicolon,
        })
    }

    /// Property name lowercased, the form CSS matches on.
    pub fn property_key(&self) -> String {
        self.property.to_ascii_lowercase()
    }

    /// Value exactly as written, without `!important` or `;`.
    pub fn raw_value(&self) -> &'t str {
        self.value
    }

    /// Value in canonical form.
    pub fn value(&self) -> String {
        canonicalize(self.value)
    }

    pub fn range(&self) -> Range {
        self.node.range()
    }

    pub fn start(&self) -> Position {
        self.node.start()
    }

    pub fn end(&self) -> Position {
        self.node.end()
    }

    /// `prop: value;` (with ` !important` when present).
    pub fn to_canonical(&self) -> String {
        if self.important {
            format!("{}: {} !important;", self.property, self.value())
        } else {
            format!("{}: {};", self.property, self.value())
        }
    }

    /// True when nothing but whitespace shares the lines the declaration
    /// starts and ends on.
    pub fn occupies_own_lines(&self) -> bool {
        let before = self
            .node
            .start_line_text()
            .get(..self.start().column - 1)
            .unwrap_or_default();
        before.trim().is_empty() && self.node.end_line_rest().trim().is_empty()
    }
}

/// Well-formed declarations that are direct children of `block`.
pub fn block_declarations(block: CssNode<'_>) -> Vec<Declaration<'_>> {
    block
        .named_children()
        .into_iter()
        .filter_map(Declaration::from_node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::CssParser;

    #[test]
    fn canonical_form_drops_space_around_parens_and_commas() {
        assert_eq!(canonicalize("rgb(255, 0, 0)"), "rgb(255,0,0)");
        assert_eq!(canonicalize("  4px   8px\n"), "4px 8px");
        assert_eq!(canonicalize(".a ,\n .b"), ".a,.b");
    }

    #[test]
    fn canonical_form_keeps_strings() {
        assert_eq!(canonicalize("\"a ,  b\"  x"), "\"a ,  b\" x");
        assert_eq!(canonicalize("url( 'x y' )"), "url('x y')");
    }

    #[test]
    fn declaration_view_splits_value_and_flags() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser
            .parse_stylesheet(".a {\n  color: red !important;\n  margin: 0  4px;\n}")
            .unwrap();
        let block = sheet.nodes_of_kind(kinds::BLOCK)[0];
        let decls = block_declarations(block);

        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "color");
        assert_eq!(decls[0].raw_value(), "red");
        assert!(decls[0].important);
        assert!(decls[0].has_semicolon);
        assert_eq!(decls[1].value(), "0 4px");
        assert_eq!(decls[1].to_canonical(), "margin: 0 4px;");
        assert!(decls[1].occupies_own_lines());
    }

    #[test]
    fn multi_line_declaration_line_ownership() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser
            .parse_stylesheet(".a {\n  margin: 1px\n    2px;\n  b: 1; c: 2;\n}")
            .unwrap();
        let block = sheet.nodes_of_kind(kinds::BLOCK)[0];
        let decls = block_declarations(block);

        assert_eq!(decls[0].node.end_line_rest(), "");
        assert!(decls[0].occupies_own_lines());
        assert_eq!(decls[1].node.end_line_rest(), " c: 2;");
        assert!(!decls[1].occupies_own_lines());
        assert!(!decls[2].occupies_own_lines());
    }

    #[test]
    fn last_declaration_without_semicolon() {
        let mut parser = CssParser::new().unwrap();
        let sheet = parser.parse_stylesheet(".a { color: red }").unwrap();
        let block = sheet.nodes_of_kind(kinds::BLOCK)[0];
        let decls = block_declarations(block);

        assert_eq!(decls.len(), 1);
        assert!(!decls[0].has_semicolon);
        assert!(!decls[0].occupies_own_lines());
    }
}
