//! Whitespace and layout rules. All fixes only move whitespace and line
//! breaks.

pub mod indent_two_spaces;
pub mod multiple_declarations_per_line;
pub mod no_tabs;
pub mod normalize_spaces;
pub mod one_selector_per_line;
pub mod single_prop_single_line;
pub mod sort_properties;

pub use indent_two_spaces::IndentTwoSpacesRule;
pub use multiple_declarations_per_line::MultipleDeclarationsPerLineRule;
pub use no_tabs::NoTabsRule;
pub use normalize_spaces::NormalizeSpacesRule;
pub use one_selector_per_line::OneSelectorPerLineRule;
pub use single_prop_single_line::SinglePropSingleLineRule;
pub use sort_properties::SortPropertiesRule;

use crate::css::{kinds, CssNode};

/// Text of each selector in a `selectors` node, as written.
pub(crate) fn selector_list(selectors: CssNode<'_>) -> Vec<String> {
    selectors
        .named_children()
        .into_iter()
        .filter(|node| node.kind() != kinds::COMMENT)
        .map(|node| node.text().trim().to_string())
        .collect()
}

/// Leading spaces and tabs of `line`.
pub(crate) fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

#[cfg(test)]
mod tests {
    use super::indentation;

    #[test]
    fn indentation_stops_at_content() {
        assert_eq!(indentation("    color: red;"), "    ");
        assert_eq!(indentation("\t .a"), "\t ");
        assert_eq!(indentation("}"), "");
    }
}
