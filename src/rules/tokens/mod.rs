//! Token-economy rules: shorter spellings of the same value.

pub mod remove_trailing_zeros;
pub mod shorten_hex_colors;
pub mod zero_units;

pub use remove_trailing_zeros::RemoveTrailingZerosRule;
pub use shorten_hex_colors::ShortenHexColorsRule;
pub use zero_units::ZeroUnitsRule;

use crate::css::{kinds, CssNode, Stylesheet};

/// A numeric literal split into its number and unit parts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumericValue<'t> {
    pub node: CssNode<'t>,
    pub number: &'t str,
    pub unit: &'t str,
}

impl<'t> NumericValue<'t> {
    fn from_node(node: CssNode<'t>) -> Self {
        let text = node.text();
        let unit = node.child_of_kind(kinds::UNIT).map_or("", |u| u.text());
        let number = &text[..text.len().saturating_sub(unit.len())];
        Self { node, number, unit }
    }

    pub fn is_zero(&self) -> bool {
        self.number.parse::<f64>().is_ok_and(|n| n == 0.0)
    }

    /// Property of the declaration this value belongs to, lowercased.
    pub fn property(&self) -> Option<String> {
        self.node
            .ancestor_of_kind(kinds::DECLARATION)
            .and_then(|decl| decl.child_of_kind(kinds::PROPERTY_NAME))
            .map(|name| name.text().to_ascii_lowercase())
    }
}

/// Integer and float literals inside declarations, in document order.
pub(crate) fn declaration_numbers<'s>(sheet: &'s Stylesheet<'_>) -> Vec<NumericValue<'s>> {
    let mut nodes = sheet.nodes_of_kind(kinds::INTEGER_VALUE);
    nodes.extend(sheet.nodes_of_kind(kinds::FLOAT_VALUE));
    nodes.sort_by_key(|n| n.byte_range().start);
    nodes
        .into_iter()
        .filter(|n| n.ancestor_of_kind(kinds::DECLARATION).is_some())
        .map(NumericValue::from_node)
        .collect()
}
