//! Modernization rules.

pub mod prefer_hex_colors;

pub use prefer_hex_colors::PreferHexColorsRule;
