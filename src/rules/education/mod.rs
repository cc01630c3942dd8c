//! Education rules: informational notes with no fix.

pub mod flex_properties_require_flex;
pub mod grid_properties_require_grid;
pub mod important_used;

pub use flex_properties_require_flex::FlexPropertiesRequireFlexRule;
pub use grid_properties_require_grid::GridPropertiesRequireGridRule;
pub use important_used::ImportantUsedRule;
