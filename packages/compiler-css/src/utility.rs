//! Utility-class strategy: maps declarations to utility tokens through a
//! fixed lookup table. Never produces a stylesheet.

use crate::options::CssOptions;
use crate::strategy::{
    apply_class, element_declarations, styled_elements, CssConversionResult, CssStats, CssStrategy,
    DocumentConversion,
};
use crate::stylesheet::Declarations;
use indexmap::IndexMap;
use mockup_parser::{serialize, ParsedDocument};
use regex::Regex;
use std::sync::LazyLock;

static LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)(px|rem)?$").expect("length pattern is valid")
});

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

/// Pixel values of the spacing scale and their tokens
const SPACING_SCALE: &[(f64, &str)] = &[
    (0.0, "0"),
    (1.0, "px"),
    (2.0, "0.5"),
    (4.0, "1"),
    (6.0, "1.5"),
    (8.0, "2"),
    (10.0, "2.5"),
    (12.0, "3"),
    (16.0, "4"),
    (20.0, "5"),
    (24.0, "6"),
    (32.0, "8"),
    (40.0, "10"),
    (48.0, "12"),
    (64.0, "16"),
    (80.0, "20"),
    (96.0, "24"),
];

const FONT_SIZES: &[(f64, &str)] = &[
    (12.0, "text-xs"),
    (14.0, "text-sm"),
    (16.0, "text-base"),
    (18.0, "text-lg"),
    (20.0, "text-xl"),
    (24.0, "text-2xl"),
    (30.0, "text-3xl"),
    (36.0, "text-4xl"),
    (48.0, "text-5xl"),
    (60.0, "text-6xl"),
];

const RADII: &[(f64, &str)] = &[
    (0.0, "rounded-none"),
    (2.0, "rounded-sm"),
    (4.0, "rounded"),
    (6.0, "rounded-md"),
    (8.0, "rounded-lg"),
    (12.0, "rounded-xl"),
    (16.0, "rounded-2xl"),
    (24.0, "rounded-3xl"),
];

/// Keyword-valued properties: (property, value, token)
const KEYWORDS: &[(&str, &str, &str)] = &[
    ("display", "block", "block"),
    ("display", "inline-block", "inline-block"),
    ("display", "inline", "inline"),
    ("display", "flex", "flex"),
    ("display", "inline-flex", "inline-flex"),
    ("display", "grid", "grid"),
    ("display", "none", "hidden"),
    ("flex-direction", "row", "flex-row"),
    ("flex-direction", "row-reverse", "flex-row-reverse"),
    ("flex-direction", "column", "flex-col"),
    ("flex-direction", "column-reverse", "flex-col-reverse"),
    ("flex-wrap", "wrap", "flex-wrap"),
    ("flex-wrap", "nowrap", "flex-nowrap"),
    ("flex", "1", "flex-1"),
    ("flex", "1 1 0%", "flex-1"),
    ("flex", "auto", "flex-auto"),
    ("flex", "none", "flex-none"),
    ("flex-grow", "1", "grow"),
    ("flex-grow", "0", "grow-0"),
    ("flex-shrink", "0", "shrink-0"),
    ("justify-content", "flex-start", "justify-start"),
    ("justify-content", "start", "justify-start"),
    ("justify-content", "center", "justify-center"),
    ("justify-content", "flex-end", "justify-end"),
    ("justify-content", "end", "justify-end"),
    ("justify-content", "space-between", "justify-between"),
    ("justify-content", "space-around", "justify-around"),
    ("justify-content", "space-evenly", "justify-evenly"),
    ("align-items", "flex-start", "items-start"),
    ("align-items", "start", "items-start"),
    ("align-items", "center", "items-center"),
    ("align-items", "flex-end", "items-end"),
    ("align-items", "end", "items-end"),
    ("align-items", "stretch", "items-stretch"),
    ("align-items", "baseline", "items-baseline"),
    ("align-self", "center", "self-center"),
    ("align-self", "flex-start", "self-start"),
    ("align-self", "flex-end", "self-end"),
    ("text-align", "left", "text-left"),
    ("text-align", "center", "text-center"),
    ("text-align", "right", "text-right"),
    ("text-align", "justify", "text-justify"),
    ("font-weight", "100", "font-thin"),
    ("font-weight", "200", "font-extralight"),
    ("font-weight", "300", "font-light"),
    ("font-weight", "400", "font-normal"),
    ("font-weight", "normal", "font-normal"),
    ("font-weight", "500", "font-medium"),
    ("font-weight", "600", "font-semibold"),
    ("font-weight", "700", "font-bold"),
    ("font-weight", "bold", "font-bold"),
    ("font-weight", "800", "font-extrabold"),
    ("font-weight", "900", "font-black"),
    ("font-style", "italic", "italic"),
    ("font-style", "normal", "not-italic"),
    ("text-decoration", "underline", "underline"),
    ("text-decoration", "line-through", "line-through"),
    ("text-decoration", "none", "no-underline"),
    ("text-transform", "uppercase", "uppercase"),
    ("text-transform", "lowercase", "lowercase"),
    ("text-transform", "capitalize", "capitalize"),
    ("white-space", "nowrap", "whitespace-nowrap"),
    ("line-height", "1", "leading-none"),
    ("line-height", "1.25", "leading-tight"),
    ("line-height", "1.375", "leading-snug"),
    ("line-height", "1.5", "leading-normal"),
    ("line-height", "1.625", "leading-relaxed"),
    ("line-height", "2", "leading-loose"),
    ("position", "static", "static"),
    ("position", "relative", "relative"),
    ("position", "absolute", "absolute"),
    ("position", "fixed", "fixed"),
    ("position", "sticky", "sticky"),
    ("overflow", "hidden", "overflow-hidden"),
    ("overflow", "auto", "overflow-auto"),
    ("overflow", "scroll", "overflow-scroll"),
    ("overflow", "visible", "overflow-visible"),
    ("overflow-x", "auto", "overflow-x-auto"),
    ("overflow-y", "auto", "overflow-y-auto"),
    ("cursor", "pointer", "cursor-pointer"),
    ("cursor", "default", "cursor-default"),
    ("cursor", "not-allowed", "cursor-not-allowed"),
    ("box-shadow", "none", "shadow-none"),
    ("border", "none", "border-0"),
    ("border", "0", "border-0"),
    ("border-style", "solid", "border-solid"),
    ("border-style", "dashed", "border-dashed"),
    ("list-style", "none", "list-none"),
    ("list-style-type", "none", "list-none"),
    ("object-fit", "cover", "object-cover"),
    ("object-fit", "contain", "object-contain"),
    ("box-sizing", "border-box", "box-border"),
    ("visibility", "hidden", "invisible"),
    ("z-index", "0", "z-0"),
    ("z-index", "10", "z-10"),
    ("z-index", "20", "z-20"),
    ("z-index", "30", "z-30"),
    ("z-index", "40", "z-40"),
    ("z-index", "50", "z-50"),
    ("width", "100%", "w-full"),
    ("width", "auto", "w-auto"),
    ("width", "100vw", "w-screen"),
    ("width", "50%", "w-1/2"),
    ("height", "100%", "h-full"),
    ("height", "auto", "h-auto"),
    ("height", "100vh", "h-screen"),
    ("min-height", "100vh", "min-h-screen"),
    ("max-width", "100%", "max-w-full"),
    ("margin", "0 auto", "mx-auto"),
];

const NAMED_COLORS: &[(&str, &str)] = &[
    ("white", "white"),
    ("#fff", "white"),
    ("#ffffff", "white"),
    ("black", "black"),
    ("#000", "black"),
    ("#000000", "black"),
    ("transparent", "transparent"),
    ("currentcolor", "current"),
    ("inherit", "inherit"),
];

/// Spacing properties and the token prefix of each side
const SPACING_PROPERTIES: &[(&str, &str)] = &[
    ("padding", "p"),
    ("padding-top", "pt"),
    ("padding-right", "pr"),
    ("padding-bottom", "pb"),
    ("padding-left", "pl"),
    ("margin", "m"),
    ("margin-top", "mt"),
    ("margin-right", "mr"),
    ("margin-bottom", "mb"),
    ("margin-left", "ml"),
    ("gap", "gap"),
    ("row-gap", "gap-y"),
    ("column-gap", "gap-x"),
    ("width", "w"),
    ("height", "h"),
    ("top", "top"),
    ("right", "right"),
    ("bottom", "bottom"),
    ("left", "left"),
];

/// Pixel value of a length (`16px`, `1rem`, `0`)
fn pixels(value: &str) -> Option<f64> {
    let caps = LENGTH.captures(value.trim())?;
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("rem") => Some(number * 16.0),
        Some(_) => Some(number),
        None if number == 0.0 => Some(0.0),
        None => None,
    }
}

fn lookup(table: &[(f64, &'static str)], px: f64) -> Option<&'static str> {
    table
        .iter()
        .find(|(size, _)| (size - px).abs() < f64::EPSILON)
        .map(|(_, token)| *token)
}

fn spacing_token(prefix: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value == "auto" && (prefix.starts_with('m') || prefix == "w" || prefix == "h") {
        return Some(format!("{}-auto", prefix));
    }
    let negative = value.starts_with('-');
    let px = pixels(value.trim_start_matches('-'))?;
    let step = lookup(SPACING_SCALE, px)?;
    if negative && prefix.starts_with('m') && px > 0.0 {
        Some(format!("-{}-{}", prefix, step))
    } else if negative {
        None
    } else {
        Some(format!("{}-{}", prefix, step))
    }
}

/// Box shorthand (`8px 16px`) expanded into per-axis tokens
fn box_tokens(prefix: &str, value: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let sides: Vec<(&str, &str)> = match parts.as_slice() {
        [all] => vec![("", *all)],
        [vertical, horizontal] if vertical == horizontal => vec![("", *vertical)],
        [vertical, horizontal] => vec![("y", *vertical), ("x", *horizontal)],
        [top, horizontal, bottom] => vec![("t", *top), ("x", *horizontal), ("b", *bottom)],
        [top, right, bottom, left] => {
            vec![("t", *top), ("r", *right), ("b", *bottom), ("l", *left)]
        }
        _ => return None,
    };
    sides
        .into_iter()
        .map(|(side, value)| spacing_token(&format!("{}{}", prefix, side), value))
        .collect()
}

fn color_token(prefix: &str, value: &str) -> Option<String> {
    let lower = value.trim().to_ascii_lowercase();
    if let Some((_, name)) = NAMED_COLORS.iter().find(|(v, _)| *v == lower) {
        return Some(format!("{}-{}", prefix, name));
    }
    if HEX_COLOR.is_match(&lower) {
        return Some(format!("{}-[{}]", prefix, lower));
    }
    None
}

fn opacity_token(value: &str) -> Option<String> {
    let opacity: f64 = value.trim().parse().ok()?;
    if !(0.0..=1.0).contains(&opacity) {
        return None;
    }
    let percent = (opacity * 100.0).round() as u32;
    (percent % 5 == 0).then(|| format!("opacity-{}", percent))
}

/// Utility tokens for one declaration, `None` when the table has no entry
pub fn utility_classes(property: &str, value: &str) -> Option<Vec<String>> {
    let (value, important) = match value.trim().strip_suffix("!important") {
        Some(rest) => (rest.trim(), true),
        None => (value.trim(), false),
    };
    let normalized = value.to_ascii_lowercase();

    let tokens = if let Some((_, _, token)) = KEYWORDS
        .iter()
        .find(|(p, v, _)| *p == property && *v == normalized)
    {
        vec![token.to_string()]
    } else {
        match property {
            "padding" => box_tokens("p", value)?,
            "margin" => box_tokens("m", value)?,
            "font-size" => vec![lookup(FONT_SIZES, pixels(value)?)?.to_string()],
            "border-radius" if normalized == "50%" || normalized == "9999px" => {
                vec!["rounded-full".to_string()]
            }
            "border-radius" => vec![lookup(RADII, pixels(value)?)?.to_string()],
            "color" => vec![color_token("text", value)?],
            "background-color" | "background" => vec![color_token("bg", value)?],
            "border-color" => vec![color_token("border", value)?],
            "opacity" => vec![opacity_token(value)?],
            _ => {
                let (_, prefix) = SPACING_PROPERTIES.iter().find(|(p, _)| *p == property)?;
                vec![spacing_token(prefix, value)?]
            }
        }
    };

    Some(if important {
        tokens.into_iter().map(|token| format!("!{}", token)).collect()
    } else {
        tokens
    })
}

/// Utility-class strategy (Tailwind style tokens)
#[derive(Debug, Default)]
pub struct UtilityStrategy {
    options: CssOptions,
    stats: CssStats,
}

impl UtilityStrategy {
    pub fn new(options: CssOptions) -> Self {
        Self {
            options,
            stats: CssStats::default(),
        }
    }
}

impl CssStrategy for UtilityStrategy {
    fn strategy_name(&self) -> &'static str {
        "utility"
    }

    fn options(&self) -> &CssOptions {
        &self.options
    }

    fn convert_document(&mut self, doc: &ParsedDocument) -> DocumentConversion {
        self.stats = CssStats::default();
        let mut document = doc.clone();
        let mut class_name_map: IndexMap<String, String> = IndexMap::new();
        let mut warnings = Vec::new();

        for id in styled_elements(doc) {
            let node = doc.node(id);
            let declarations = element_declarations(&node.attributes);
            self.stats.elements_processed += 1;

            let mut tokens: Vec<String> = Vec::new();
            let mut unmapped = Declarations::new();
            for (property, value) in &declarations {
                self.stats.declarations_processed += 1;
                match utility_classes(property, value) {
                    Some(classes) => {
                        for class in classes {
                            class_name_map
                                .entry(class.clone())
                                .or_insert_with(|| format!("{}: {}", property, value));
                            if !tokens.contains(&class) {
                                tokens.push(class);
                            }
                        }
                    }
                    None => {
                        self.stats.unmapped_declarations += 1;
                        warnings.push(format!(
                            "No utility class for '{}: {}' on <{}> ({})",
                            property,
                            value,
                            node.tag(),
                            id
                        ));
                        unmapped.insert(property.clone(), value.clone());
                    }
                }
            }

            apply_class(&mut document, id, &tokens.join(" "), self.options.preserve_inline);
            // declarations without a utility stay inline so nothing is lost
            if !self.options.preserve_inline && !unmapped.is_empty() {
                if let Some(attributes) = document.attributes_mut(id) {
                    attributes.style = Some(
                        unmapped
                            .iter()
                            .map(|(property, value)| {
                                (mockup_parser::attributes::camel_case_property(property), value.clone())
                            })
                            .collect(),
                    );
                }
            }
        }

        self.stats.classes_generated = class_name_map.len();
        tracing::debug!(
            elements = self.stats.elements_processed,
            unmapped = self.stats.unmapped_declarations,
            "utility conversion finished"
        );

        let result = CssConversionResult {
            html: serialize(&document),
            css: String::new(),
            class_name_map,
            generated_files: Vec::new(),
            warnings,
        };
        DocumentConversion { document, result }
    }

    fn generate_css(&self) -> String {
        String::new()
    }

    fn stats(&self) -> CssStats {
        self.stats
    }
}
