//! safety/misspelled-property: property names that are almost right.

use crate::css::{kinds, Declaration};
use crate::issue::{Fixability, Issue, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

const META: RuleMeta = RuleMeta {
    rule_id: "safety/misspelled-property",
    group: RuleGroup::Safety,
    severity: Severity::Warning,
    fixability: Fixability::Prompt,
    enabled_by_default: true,
    applies_to: "all CSS declarations",
};

/// Shortest property checked by edit distance; shorter names are too
/// close to each other to guess between.
const MIN_FUZZY_LEN: usize = 5;

static COMMON_TYPOS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("widht", "width"),
        ("wdith", "width"),
        ("widh", "width"),
        ("heigth", "height"),
        ("hieght", "height"),
        ("heght", "height"),
        ("hight", "height"),
        ("marign", "margin"),
        ("margni", "margin"),
        ("maring", "margin"),
        ("margn", "margin"),
        ("paddin", "padding"),
        ("paddding", "padding"),
        ("pading", "padding"),
        ("padidng", "padding"),
        ("positon", "position"),
        ("postion", "position"),
        ("positoin", "position"),
        ("dipslay", "display"),
        ("dispaly", "display"),
        ("diplay", "display"),
        ("disply", "display"),
        ("colro", "color"),
        ("colur", "color"),
        ("clor", "color"),
        ("colour", "color"),
        ("backgorund", "background"),
        ("backgroud", "background"),
        ("backgrund", "background"),
        ("backgroundcolor", "background-color"),
        ("fontsize", "font-size"),
        ("font-szie", "font-size"),
        ("font-wieght", "font-weight"),
        ("fontweight", "font-weight"),
        ("fontfamily", "font-family"),
        ("boarder", "border"),
        ("bordr", "border"),
        ("boder", "border"),
        ("border-raduis", "border-radius"),
        ("border-radious", "border-radius"),
        ("text-algn", "text-align"),
        ("text-algin", "text-align"),
        ("textalign", "text-align"),
        ("text-deocration", "text-decoration"),
        ("flexdirection", "flex-direction"),
        ("justifycontent", "justify-content"),
        ("alignitems", "align-items"),
        ("gird-template", "grid-template"),
        ("transiton", "transition"),
        ("transtion", "transition"),
        ("animaton", "animation"),
        ("overlfow", "overflow"),
        ("oveflow", "overflow"),
        ("opactiy", "opacity"),
        ("zindex", "z-index"),
        ("z-idnex", "z-index"),
        ("boxshadow", "box-shadow"),
        ("transfrom", "transform"),
        ("visiblity", "visibility"),
        ("visibilty", "visibility"),
        ("cusor", "cursor"),
        ("curser", "cursor"),
        ("lineheight", "line-height"),
        ("line-heigth", "line-height"),
        ("letterspacing", "letter-spacing"),
        ("whitespace", "white-space"),
        ("white-sapce", "white-space"),
        ("verticle-align", "vertical-align"),
        ("liststyle", "list-style"),
        ("min-widht", "min-width"),
        ("max-widht", "max-width"),
        ("min-heigth", "min-height"),
        ("max-heigth", "max-height"),
    ])
});

/// Properties the edit-distance fallback suggests.
static KNOWN_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "align-content", "align-items", "align-self", "animation", "animation-delay",
        "animation-duration", "animation-name", "appearance", "aspect-ratio", "background",
        "background-color", "background-image", "background-position", "background-repeat",
        "background-size", "border", "border-bottom", "border-collapse", "border-color",
        "border-left", "border-radius", "border-right", "border-spacing", "border-style",
        "border-top", "border-width", "bottom", "box-shadow", "box-sizing", "clear", "clip-path",
        "color", "column-gap", "columns", "content", "cursor", "direction", "display", "filter",
        "flex", "flex-basis", "flex-direction", "flex-flow", "flex-grow", "flex-shrink",
        "flex-wrap", "float", "font", "font-family", "font-size", "font-style", "font-variant",
        "font-weight", "gap", "grid", "grid-area", "grid-column", "grid-row", "grid-template",
        "grid-template-areas", "grid-template-columns", "grid-template-rows", "height", "inset",
        "justify-content", "justify-items", "justify-self", "left", "letter-spacing",
        "line-height", "list-style", "margin", "margin-bottom", "margin-left", "margin-right",
        "margin-top", "max-height", "max-width", "min-height", "min-width", "object-fit",
        "opacity", "order", "outline", "outline-offset", "overflow", "overflow-x", "overflow-y",
        "padding", "padding-bottom", "padding-left", "padding-right", "padding-top",
        "place-items", "pointer-events", "position", "resize", "right", "row-gap", "text-align",
        "text-decoration", "text-indent", "text-overflow", "text-shadow", "text-transform",
        "top", "transform", "transform-origin", "transition", "transition-delay",
        "transition-duration", "transition-property", "user-select", "vertical-align",
        "visibility", "white-space", "width", "will-change", "word-break", "word-spacing",
        "z-index",
    ])
});

#[derive(Debug, Default)]
pub struct MisspelledPropertyRule;

impl MisspelledPropertyRule {
    pub fn new() -> Self {
        Self
    }
}

/// Likely intended spelling of `property`, which must be lowercase.
pub(crate) fn suggest(property: &str) -> Option<&'static str> {
    if property.starts_with('-') {
        return None;
    }
    if let Some(known) = COMMON_TYPOS.get(property).copied() {
        return Some(known);
    }
    if property.len() < MIN_FUZZY_LEN || KNOWN_PROPERTIES.contains(property) {
        return None;
    }

    let mut close = KNOWN_PROPERTIES
        .iter()
        .copied()
        .filter(|known| strsim::damerau_levenshtein(property, known) == 1);
    let first = close.next()?;
    // ambiguous when two properties are one edit away
    close.next().is_none().then_some(first)
}

fn prompt_text(property: &str, suggestion: &str) -> String {
    format!(
        "The CSS property \"{property}\" appears to be misspelled. Did you mean \"{suggestion}\"?

Please review and correct this property name if intended:
- Current: {property}
- Suggested: {suggestion}

Note: This is flagged as a prompt-only fix because automatically changing property names could have unintended consequences if the typo was intentional (e.g., for a preprocessor or custom tooling)."
    )
}

impl Rule for MisspelledPropertyRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::DECLARATION, |node| {
            let Some(decl) = Declaration::from_node(node) else {
                return;
            };
            let property = decl.property_key();
            let Some(suggestion) = suggest(&property) else {
                return;
            };
            issues.push(
                ctx.report(
                    &META,
                    format!("Possible typo: '{property}' should be '{suggestion}'"),
                    decl.range(),
                    RuleLogic::new(
                        format!("Property '{property}' matches a common typo pattern"),
                        "Misspelled properties are ignored by browsers, causing styles not to apply",
                        "Review manually - auto-fix not available to prevent unintended changes",
                    ),
                )
                .prompt(
                    format!("Fix typo: {property} → {suggestion}"),
                    prompt_text(&property, suggestion),
                ),
            );
        });

        issues
    }
}
