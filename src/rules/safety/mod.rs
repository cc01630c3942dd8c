//! Safety rules: CSS that browsers will silently drop.

pub mod invalid_syntax;
pub mod misspelled_property;
pub mod suspicious_units;
pub mod unrecognized_property;

pub use invalid_syntax::{parse_error_issues, InvalidSyntaxRule};
pub use misspelled_property::MisspelledPropertyRule;
pub use suspicious_units::SuspiciousUnitsRule;
pub use unrecognized_property::UnrecognizedPropertyRule;
