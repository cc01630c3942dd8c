//! Thread-local parser pooling.
//!
//! Parser construction loads the CSS grammar; analyses on the same thread
//! share one parser instead of rebuilding it per call.

use crate::css::{CssError, CssParser};
use std::cell::RefCell;

thread_local! {
    static CSS_PARSER: RefCell<Option<CssParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// On first call per thread, creates new parser. Subsequent calls reuse
/// the same parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use css_promptify::pool::with_parser;
///
/// let errors = with_parser(|parser| {
///     parser
///         .parse_stylesheet(".a { color: red; }")
///         .map(|sheet| sheet.errors().len())
/// })??;
/// assert_eq!(errors, 0);
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, CssError>
where
    F: FnOnce(&mut CssParser) -> R,
{
    CSS_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let parser = match slot.take() {
            Some(parser) => parser,
            None => CssParser::new()?,
        };
        Ok(f(slot.insert(parser)))
    })
}
