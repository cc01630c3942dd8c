//! format/sort-properties: deterministic property order within a block.
//!
//! Properties follow a grouped order: cascade, position, layout, box,
//! overflow, font, text, UI, content, media, background and border,
//! effects, SVG, motion, then fragmentation. Unknown properties come after
//! every known one and custom properties come last.

use crate::css::{block_declarations, kinds, Declaration};
use crate::issue::{Fixability, Issue, Patch, RuleGroup, RuleLogic, Severity};
use crate::rules::base::{Rule, RuleContext, RuleMeta};
use crate::rules::format::indentation;
use crate::span::Range;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const META: RuleMeta = RuleMeta {
    rule_id: "format/sort-properties",
    group: RuleGroup::Format,
    severity: Severity::Info,
    fixability: Fixability::Safe,
    enabled_by_default: true,
    applies_to: "all CSS rule blocks",
};

#[rustfmt::skip]
const GROUPED_ORDER: &[&str] = &[
    // cascade
    "all", "composes",
    // position
    "position", "inset", "inset-block", "inset-block-start", "inset-block-end", "inset-inline",
    "inset-inline-start", "inset-inline-end", "top", "right", "bottom", "left", "z-index",
    "float", "clear", "anchor-name", "anchor-scope", "anchor-center", "position-area",
    "position-anchor", "position-try", "position-try-order", "position-try-fallbacks",
    "position-visibility",
    // layout
    "box-sizing", "display", "visibility", "flex", "flex-grow", "flex-shrink", "flex-basis",
    "flex-flow", "flex-direction", "flex-wrap", "-webkit-box-orient", "grid", "grid-area",
    "grid-template", "grid-template-areas", "grid-template-rows", "grid-template-columns",
    "grid-row", "grid-row-start", "grid-row-end", "grid-column", "grid-column-start",
    "grid-column-end", "grid-auto-rows", "grid-auto-columns", "grid-auto-flow", "gap",
    "row-gap", "column-gap", "grid-gap", "grid-row-gap", "grid-column-gap", "place-content",
    "place-items", "place-self", "align-content", "align-items", "align-self",
    "justify-content", "justify-items", "justify-self", "order",
    // size and space
    "contain", "container", "container-name", "container-type", "content-visibility",
    "inline-size", "min-inline-size", "max-inline-size", "width", "min-width", "max-width",
    "block-size", "min-block-size", "max-block-size", "height", "min-height", "max-height",
    "aspect-ratio", "contain-intrinsic-size", "contain-intrinsic-width",
    "contain-intrinsic-height", "contain-intrinsic-inline-size", "contain-intrinsic-block-size",
    "padding", "padding-block", "padding-block-start", "padding-block-end", "padding-inline",
    "padding-inline-start", "padding-inline-end", "padding-top", "padding-right",
    "padding-bottom", "padding-left", "margin", "margin-block", "margin-block-start",
    "margin-block-end", "margin-inline", "margin-inline-start", "margin-inline-end",
    "margin-top", "margin-right", "margin-bottom", "margin-left",
    // overflow and scroll
    "overflow", "overflow-block", "overflow-inline", "overflow-x", "overflow-y",
    "scrollbar-gutter", "-webkit-overflow-scrolling", "-ms-overflow-x", "-ms-overflow-y",
    "-ms-overflow-style", "text-overflow", "line-clamp", "-webkit-line-clamp",
    "overscroll-behavior", "overscroll-behavior-block", "overscroll-behavior-inline",
    "overscroll-behavior-x", "overscroll-behavior-y", "scroll-snap-type", "scroll-snap-align",
    "scroll-snap-stop", "scroll-padding", "scroll-padding-block", "scroll-padding-block-start",
    "scroll-padding-block-end", "scroll-padding-inline", "scroll-padding-inline-start",
    "scroll-padding-inline-end", "scroll-padding-top", "scroll-padding-right",
    "scroll-padding-bottom", "scroll-padding-left", "scroll-margin", "scroll-margin-block",
    "scroll-margin-block-start", "scroll-margin-block-end", "scroll-margin-inline",
    "scroll-margin-inline-start", "scroll-margin-inline-end", "scroll-margin-top",
    "scroll-margin-right", "scroll-margin-bottom", "scroll-margin-left", "scrollbar-color",
    "scrollbar-width",
    // font
    "font", "font-family", "font-size", "font-style", "font-weight", "font-stretch",
    "font-variation-settings", "font-optical-sizing", "font-size-adjust",
    "font-feature-settings", "font-kerning", "font-variant", "font-variant-ligatures",
    "font-variant-caps", "font-variant-alternates", "font-variant-numeric",
    "font-variant-east-asian", "font-variant-position", "-webkit-font-smoothing",
    "-moz-osx-font-smoothing", "font-smooth", "font-synthesis", "font-synthesis-weight",
    "font-synthesis-style", "font-synthesis-small-caps", "line-height", "vertical-align",
    "alignment-baseline", "baseline-shift", "dominant-baseline", "src", "font-display",
    "unicode-range", "size-adjust", "ascent-override", "descent-override",
    "line-gap-override",
    // text
    "base-palette", "override-colors", "font-palette", "color", "-webkit-text-fill-color",
    "-webkit-text-stroke", "-webkit-text-stroke-width", "-webkit-text-stroke-color",
    "text-align", "text-align-last", "text-justify", "text-indent", "text-transform",
    "word-spacing", "letter-spacing", "hyphens", "hyphenate-character", "line-break",
    "word-break", "text-wrap", "text-wrap-mode", "text-wrap-style", "word-wrap",
    "overflow-wrap", "tab-size", "white-space", "white-space-collapse", "text-decoration",
    "text-decoration-line", "text-decoration-thickness", "text-decoration-style",
    "text-decoration-color", "text-decoration-skip-ink", "text-underline-position",
    "text-underline-offset", "text-emphasis", "text-emphasis-color", "text-emphasis-style",
    "text-emphasis-position", "text-shadow", "ruby-position", "ruby-align", "direction",
    "unicode-bidi", "writing-mode", "text-orientation", "text-combine-upright",
    // ui
    "appearance", "accent-color", "pointer-events", "-ms-touch-action", "touch-action",
    "cursor", "caret-color", "zoom", "resize", "user-select", "-webkit-user-select",
    "nav-index", "nav-up", "nav-right", "nav-down", "nav-left", "outline", "outline-width",
    "outline-style", "outline-color", "outline-offset", "color-scheme",
    "forced-color-adjust", "print-color-adjust",
    // content and lists
    "content", "quotes", "list-style", "list-style-position", "list-style-type",
    "list-style-image", "counter-reset", "counter-set", "counter-increment", "table-layout",
    "empty-cells", "caption-side", "border-spacing", "border-collapse",
    // media
    "object-fit", "object-position", "-ms-interpolation-mode", "image-orientation",
    "image-rendering", "image-resolution",
    // background and border
    "background", "background-color", "background-image", "background-repeat",
    "background-attachment", "background-position", "background-position-x",
    "background-position-y", "background-clip", "background-origin", "background-size",
    "border", "border-color", "border-style", "border-width", "border-block",
    "border-block-start", "border-block-start-color", "border-block-start-style",
    "border-block-start-width", "border-block-end", "border-block-end-color",
    "border-block-end-style", "border-block-end-width", "border-inline",
    "border-inline-start", "border-inline-start-color", "border-inline-start-style",
    "border-inline-start-width", "border-inline-end", "border-inline-end-color",
    "border-inline-end-style", "border-inline-end-width", "border-top", "border-top-color",
    "border-top-style", "border-top-width", "border-right", "border-right-color",
    "border-right-style", "border-right-width", "border-bottom", "border-bottom-color",
    "border-bottom-style", "border-bottom-width", "border-left", "border-left-color",
    "border-left-style", "border-left-width", "border-radius", "border-start-start-radius",
    "border-start-end-radius", "border-end-start-radius", "border-end-end-radius",
    "border-top-left-radius", "border-top-right-radius", "border-bottom-right-radius",
    "border-bottom-left-radius", "border-image", "border-image-source", "border-image-slice",
    "border-image-width", "border-image-outset", "border-image-repeat", "box-shadow",
    // effects
    "background-blend-mode", "isolation", "mix-blend-mode", "opacity", "filter",
    "backdrop-filter", "clip", "clip-path", "clip-rule", "mask", "mask-image", "mask-mode",
    "mask-repeat", "mask-position", "mask-clip", "mask-origin", "mask-size",
    "mask-composite", "mask-type", "mask-border", "mask-border-source", "mask-border-slice",
    "mask-border-width", "mask-border-outset", "mask-border-repeat", "mask-border-mode",
    "shape-outside", "shape-image-threshold", "shape-margin",
    // svg
    "text-anchor", "fill", "fill-rule", "fill-opacity", "stroke", "stroke-opacity",
    "stroke-width", "stroke-linecap", "stroke-linejoin", "stroke-miterlimit",
    "stroke-dasharray", "stroke-dashoffset", "color-interpolation",
    "color-interpolation-filters", "flood-color", "flood-opacity", "lighting-color", "marker",
    "marker-start", "marker-mid", "marker-end", "stop-color", "stop-opacity", "paint-order",
    "shape-rendering", "text-rendering",
    // motion
    "transform", "transform-origin", "transform-box", "transform-style", "rotate", "scale",
    "translate", "perspective", "perspective-origin", "backface-visibility", "transition",
    "transition-delay", "transition-timing-function", "transition-duration",
    "transition-property", "view-transition-name", "view-transition-class", "animation",
    "animation-name", "animation-duration", "animation-timing-function", "animation-delay",
    "animation-iteration-count", "animation-direction", "animation-fill-mode",
    "animation-play-state", "animation-composition", "offset", "offset-position",
    "offset-path", "offset-distance", "offset-rotate", "offset-anchor", "will-change",
    // fragmentation
    "break-before", "break-after", "break-inside", "widows", "orphans",
];

static ORDER_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    GROUPED_ORDER
        .iter()
        .enumerate()
        .map(|(index, property)| (*property, index))
        .collect()
});

/// Unknown properties sort after every known one, bucketed by first byte.
const UNKNOWN_BASE: usize = 9_000;
const CUSTOM_PROPERTY: usize = 99_999;

/// Longhands a shorthand resets beyond the `shorthand-*` naming pattern.
const EXTRA_LONGHANDS: &[(&str, &[&str])] = &[
    ("font", &["line-height"]),
    ("inset", &["top", "right", "bottom", "left"]),
    ("gap", &["row-gap", "column-gap"]),
    ("grid-gap", &["grid-row-gap", "grid-column-gap"]),
    ("flex-flow", &["flex-direction", "flex-wrap"]),
    ("place-content", &["align-content", "justify-content"]),
    ("place-items", &["align-items", "justify-items"]),
    ("place-self", &["align-self", "justify-self"]),
    (
        "grid-area",
        &["grid-row", "grid-row-start", "grid-row-end", "grid-column", "grid-column-start", "grid-column-end"],
    ),
];

fn sort_key(property: &str) -> usize {
    if property.starts_with("--") {
        return CUSTOM_PROPERTY;
    }
    ORDER_INDEX
        .get(property)
        .copied()
        .unwrap_or_else(|| UNKNOWN_BASE + property.bytes().next().map_or(0, usize::from))
}

/// True when setting `shorthand` also sets `longhand`.
fn resets(shorthand: &str, longhand: &str) -> bool {
    if shorthand == "all" {
        return true;
    }
    longhand
        .strip_prefix(shorthand)
        .is_some_and(|rest| rest.starts_with('-'))
        || EXTRA_LONGHANDS
            .iter()
            .any(|(short, longs)| *short == shorthand && longs.contains(&longhand))
}

/// Sorted order of `decls` as indices, or `None` when it is already sorted
/// or when moving a shorthand past one of its longhands would change which
/// value wins.
fn sorted_order(decls: &[Declaration<'_>]) -> Option<Vec<usize>> {
    let keys: Vec<String> = decls.iter().map(|d| d.property_key()).collect();
    let mut order: Vec<usize> = (0..decls.len()).collect();
    order.sort_by_key(|&i| sort_key(&keys[i]));
    if order.iter().enumerate().all(|(pos, &i)| pos == i) {
        return None;
    }

    for (a, b) in (0..keys.len()).flat_map(|a| (a + 1..keys.len()).map(move |b| (a, b))) {
        let flipped = order.iter().position(|&i| i == a) > order.iter().position(|&i| i == b);
        if flipped && (resets(&keys[a], &keys[b]) || resets(&keys[b], &keys[a])) {
            return None;
        }
    }
    Some(order)
}

fn declaration_text(decl: &Declaration<'_>) -> String {
    let important = if decl.important { " !important" } else { "" };
    format!("{}: {}{};", decl.property, decl.raw_value().trim(), important)
}

#[derive(Debug, Default)]
pub struct SortPropertiesRule;

impl SortPropertiesRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SortPropertiesRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn run(&self, ctx: &RuleContext<'_>) -> Vec<Issue> {
        let mut issues = Vec::new();

        ctx.stylesheet.visit(kinds::BLOCK, |block| {
            if block.has_error() {
                return;
            }
            let decls = block_declarations(block);
            // comments and nested rules have no place in the sorted run
            if decls.len() < 2 || block.named_children().len() != decls.len() {
                return;
            }
            let Some(order) = sorted_order(&decls) else {
                return;
            };
            let (Some(first), Some(last)) = (decls.first(), decls.last()) else {
                return;
            };

            let separator = if block.range().is_multiline() {
                format!("\n{}", indentation(first.node.start_line_text()))
            } else {
                " ".to_string()
            };
            let sorted = order
                .iter()
                .map(|&i| declaration_text(&decls[i]))
                .collect::<Vec<_>>()
                .join(&separator);
            let location = Range::new(first.start(), last.end());

            issues.push(
                ctx.report(
                    &META,
                    format!("Properties not in grouped order ({} properties)", decls.len()),
                    location,
                    RuleLogic::new(
                        format!(
                            "Found {} properties that are not in grouped sort order",
                            decls.len()
                        ),
                        "Consistent property ordering improves readability and makes CSS easier for LLMs to parse",
                        "Always safe - property order within a block does not affect computed styles",
                    ),
                )
                .safe(
                    sorted.clone(),
                    vec![Patch::replace(location, sorted)],
                    "reordered to grouped order",
                ),
            );
        });

        issues
    }
}
