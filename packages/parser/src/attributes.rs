//! Attribute extraction: turns the raw attribute list of an element into a
//! typed bag (events, style, class, data/aria, generic).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of an HTML attribute. Boolean attributes carry `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            AttrValue::Bool(_) => None,
        }
    }
}

/// Inline event handler (`onclick="..."`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHandler {
    /// Event type without the `on` prefix (`click`, `submit`, ...)
    #[serde(rename = "type")]
    pub event_type: String,
    pub handler: String,
}

/// Normalized attribute bag of an element.
///
/// `class` lives exclusively in `class_name` and `style` exclusively in
/// `style`; neither is ever present in `html`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAttributes {
    pub html: IndexMap<String, AttrValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub events: Vec<EventHandler>,
    #[serde(default)]
    pub has_danger_html: bool,
}

/// HTML attribute names stored under a different key
const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[
    ("for", "htmlFor"),
    ("tabindex", "tabIndex"),
    ("maxlength", "maxLength"),
    ("minlength", "minLength"),
    ("colspan", "colSpan"),
    ("rowspan", "rowSpan"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("contenteditable", "contentEditable"),
    ("crossorigin", "crossOrigin"),
    ("accesskey", "accessKey"),
    ("autocomplete", "autoComplete"),
    ("enctype", "encType"),
    ("srcset", "srcSet"),
    ("usemap", "useMap"),
    ("datetime", "dateTime"),
    ("inputmode", "inputMode"),
    ("frameborder", "frameBorder"),
    ("http-equiv", "httpEquiv"),
    ("accept-charset", "acceptCharset"),
    ("referrerpolicy", "referrerPolicy"),
];

const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Key under which an HTML attribute is stored, if it is aliased
pub fn alias_for(name: &str) -> Option<&'static str> {
    ATTRIBUTE_ALIASES
        .iter()
        .find(|(html, _)| *html == name)
        .map(|(_, alias)| *alias)
}

/// Original HTML name of an aliased key
pub fn html_name_for(key: &str) -> Option<&'static str> {
    ATTRIBUTE_ALIASES
        .iter()
        .find(|(_, alias)| *alias == key)
        .map(|(html, _)| *html)
}

pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(&name)
}

/// `onclick`, `onmouseenter`, ...
pub fn is_event_attribute(name: &str) -> bool {
    name.len() > 2
        && name.starts_with("on")
        && name[2..].chars().all(|c| c.is_ascii_lowercase())
}

/// Convert a CSS property name to its camelCase object key.
///
/// `background-color` → `backgroundColor`, `-webkit-transition` →
/// `WebkitTransition`, `-ms-transform` → `msTransform`. Custom properties
/// (`--brand`) are kept verbatim.
pub fn camel_case_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        return property.to_string();
    }

    let lower = property.to_ascii_lowercase();
    let (vendor, rest) = if let Some(rest) = lower.strip_prefix("-ms-") {
        (Some("ms"), rest)
    } else if let Some(rest) = lower.strip_prefix('-') {
        match rest.split_once('-') {
            Some((prefix, tail)) => (Some(prefix), tail),
            None => (None, rest),
        }
    } else {
        (None, lower.as_str())
    };

    let mut out = String::with_capacity(property.len());
    match vendor {
        Some("ms") => out.push_str("ms"),
        Some(prefix) => out.push_str(&capitalize(prefix)),
        None => {}
    }

    for (i, part) in rest.split('-').filter(|p| !p.is_empty()).enumerate() {
        if i == 0 && vendor.is_none() {
            out.push_str(part);
        } else {
            out.push_str(&capitalize(part));
        }
    }
    out
}

/// Inverse of [`camel_case_property`]
pub fn kebab_case_property(key: &str) -> String {
    if key.starts_with("--") {
        return key.to_string();
    }

    let mut out = String::with_capacity(key.len() + 4);
    let mut chars = key.chars().peekable();

    if key.starts_with("ms") && key[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push_str("-ms");
        chars.next();
        chars.next();
    }

    // A leading capital (vendor prefix) becomes a leading dash as well
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Split a `style` attribute into `(property, value)` pairs.
///
/// Semicolons inside parentheses or quotes (`url(data:...;base64,...)`)
/// do not terminate a declaration. Declarations without a colon are skipped.
pub fn split_style_declarations(style: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    let mut push = |chunk: &str| {
        if let Some((prop, value)) = chunk.split_once(':') {
            let prop = prop.trim();
            let value = value.trim();
            if !prop.is_empty() && !value.is_empty() {
                declarations.push((prop.to_string(), value.to_string()));
            }
        }
    };

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push(&style[start..]);

    declarations
}

/// Parse a style attribute into a camelCase keyed map
pub fn parse_style(style: &str) -> IndexMap<String, String> {
    split_style_declarations(style)
        .into_iter()
        .map(|(prop, value)| (camel_case_property(&prop), value))
        .collect()
}

/// Render a camelCase style map back into a `style` attribute value
pub fn style_to_string(style: &IndexMap<String, String>) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}: {}", kebab_case_property(key), value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Normalizes raw element attributes into [`ParsedAttributes`]
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeExtractor;

impl AttributeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Categorize every attribute of an element. The first matching
    /// category wins: event handler, style, class, alias, boolean,
    /// data/aria, generic.
    pub fn extract<'a, I>(&self, tag_name: &str, attrs: I) -> ParsedAttributes
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut parsed = ParsedAttributes {
            has_danger_html: matches!(tag_name, "script" | "style"),
            ..Default::default()
        };

        for (raw_name, value) in attrs {
            let name = raw_name.to_ascii_lowercase();

            if is_event_attribute(&name) {
                parsed.events.push(EventHandler {
                    event_type: name[2..].to_string(),
                    handler: value.to_string(),
                });
            } else if name == "style" {
                let style = parse_style(value);
                if !style.is_empty() {
                    parsed.style = Some(style);
                }
            } else if name == "class" {
                let classes = value.split_whitespace().collect::<Vec<_>>().join(" ");
                if !classes.is_empty() {
                    parsed.class_name = Some(classes);
                }
            } else if let Some(alias) = alias_for(&name) {
                parsed
                    .html
                    .insert(alias.to_string(), AttrValue::Text(value.to_string()));
            } else if is_boolean_attribute(&name) {
                parsed.html.insert(name, AttrValue::Bool(true));
            } else {
                // data-*, aria-* and everything else pass through unchanged
                parsed.html.insert(name, AttrValue::Text(value.to_string()));
            }
        }

        parsed
    }
}

impl ParsedAttributes {
    pub fn classes(&self) -> Vec<&str> {
        self.class_name
            .as_deref()
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn id(&self) -> Option<&str> {
        self.html.get("id").and_then(AttrValue::as_str)
    }

    /// Look an attribute up by its HTML name, resolving aliases.
    /// Boolean attributes yield an empty string.
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            return self.class_name.as_deref();
        }
        let key = alias_for(&name).unwrap_or(&name);
        self.html.get(key).map(|value| value.as_str().unwrap_or(""))
    }

    pub fn has(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.class_name.is_some(),
            "style" => self.style.is_some(),
            _ => {
                let key = alias_for(&name).unwrap_or(&name);
                self.html.contains_key(key)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
            && self.style.is_none()
            && self.class_name.is_none()
            && self.events.is_empty()
    }

    /// Append a class token if it is not already present
    pub fn add_class(&mut self, class: &str) {
        let mut classes: Vec<String> = self.classes().into_iter().map(str::to_string).collect();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.class_name = Some(classes.join(" "));
    }

    /// Render the bag back into HTML attribute syntax (without a leading
    /// space). Aliased keys are written under their HTML names.
    pub fn to_html_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(class_name) = &self.class_name {
            parts.push(format!("class=\"{}\"", escape_attribute(class_name)));
        }

        for (key, value) in &self.html {
            let name = html_name_for(key).unwrap_or(key);
            match value {
                AttrValue::Bool(true) => parts.push(name.to_string()),
                AttrValue::Bool(false) => {}
                AttrValue::Text(text) => {
                    parts.push(format!("{}=\"{}\"", name, escape_attribute(text)))
                }
            }
        }

        if let Some(style) = &self.style {
            parts.push(format!("style=\"{}\"", escape_attribute(&style_to_string(style))));
        }

        for event in &self.events {
            parts.push(format!(
                "on{}=\"{}\"",
                event.event_type,
                escape_attribute(&event.handler)
            ));
        }

        parts.join(" ")
    }

    /// Merge two bags; values from `other` win, classes are unioned and
    /// events appended.
    pub fn merge(&self, other: &ParsedAttributes) -> ParsedAttributes {
        let mut merged = self.clone();

        for (key, value) in &other.html {
            merged.html.insert(key.clone(), value.clone());
        }

        if let Some(style) = &other.style {
            let target = merged.style.get_or_insert_with(IndexMap::new);
            for (key, value) in style {
                target.insert(key.clone(), value.clone());
            }
        }

        for class in other.classes() {
            merged.add_class(class);
        }

        merged.events.extend(other.events.iter().cloned());
        merged.has_danger_html |= other.has_danger_html;
        merged
    }

    /// Semantic equality: map order and class token order are ignored
    pub fn equals(&self, other: &ParsedAttributes) -> bool {
        let mut left_classes = self.classes();
        let mut right_classes = other.classes();
        left_classes.sort_unstable();
        right_classes.sort_unstable();

        left_classes == right_classes
            && self.html == other.html
            && self.style.clone().unwrap_or_default() == other.style.clone().unwrap_or_default()
            && self.events == other.events
    }
}

pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(attrs: &[(&str, &str)]) -> ParsedAttributes {
        AttributeExtractor::new().extract("div", attrs.iter().copied())
    }

    #[test]
    fn test_categorization_order() {
        let attrs = extract(&[
            ("onclick", "go()"),
            ("style", "color: red; background-color: blue"),
            ("class", "card  featured"),
            ("for", "email"),
            ("disabled", ""),
            ("data-id", "42"),
            ("aria-label", "Card"),
            ("title", "hello"),
        ]);

        assert_eq!(attrs.events.len(), 1);
        assert_eq!(attrs.events[0].event_type, "click");
        assert_eq!(attrs.events[0].handler, "go()");

        let style = attrs.style.as_ref().unwrap();
        assert_eq!(style.get("color").unwrap(), "red");
        assert_eq!(style.get("backgroundColor").unwrap(), "blue");

        assert_eq!(attrs.class_name.as_deref(), Some("card featured"));
        assert!(!attrs.html.contains_key("class"));
        assert!(!attrs.html.contains_key("className"));

        assert_eq!(attrs.html.get("htmlFor"), Some(&AttrValue::Text("email".into())));
        assert_eq!(attrs.html.get("disabled"), Some(&AttrValue::Bool(true)));
        assert_eq!(attrs.html.get("data-id"), Some(&AttrValue::Text("42".into())));
        assert_eq!(attrs.html.get("aria-label"), Some(&AttrValue::Text("Card".into())));
        assert_eq!(attrs.html.get("title"), Some(&AttrValue::Text("hello".into())));
    }

    #[test]
    fn test_alias_lookup_by_html_name() {
        let attrs = extract(&[("tabindex", "0"), ("for", "x")]);
        assert_eq!(attrs.get("tabindex"), Some("0"));
        assert_eq!(attrs.get("for"), Some("x"));
        assert!(attrs.has("tabIndex"));
    }

    #[test]
    fn test_camel_case_properties() {
        assert_eq!(camel_case_property("background-color"), "backgroundColor");
        assert_eq!(camel_case_property("-webkit-transition"), "WebkitTransition");
        assert_eq!(camel_case_property("-ms-transform"), "msTransform");
        assert_eq!(camel_case_property("--brand-color"), "--brand-color");
        assert_eq!(camel_case_property("COLOR"), "color");
    }

    #[test]
    fn test_kebab_case_properties() {
        assert_eq!(kebab_case_property("backgroundColor"), "background-color");
        assert_eq!(kebab_case_property("WebkitTransition"), "-webkit-transition");
        assert_eq!(kebab_case_property("msTransform"), "-ms-transform");
        assert_eq!(kebab_case_property("color"), "color");
        assert_eq!(kebab_case_property("--brand-color"), "--brand-color");
    }

    #[test]
    fn test_style_split_respects_parentheses() {
        let decls = split_style_declarations(
            "background: url(data:image/png;base64,AAA); color: red;; bogus",
        );
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].0, "background");
        assert_eq!(decls[0].1, "url(data:image/png;base64,AAA)");
        assert_eq!(decls[1], ("color".to_string(), "red".to_string()));
    }

    #[test]
    fn test_important_is_kept() {
        let style = parse_style("color: red !important");
        assert_eq!(style.get("color").unwrap(), "red !important");
    }

    #[test]
    fn test_to_html_string_de_aliases() {
        let attrs = extract(&[("class", "a"), ("for", "f"), ("hidden", ""), ("style", "margin-top: 4px")]);
        let html = attrs.to_html_string();
        assert_eq!(html, "class=\"a\" for=\"f\" hidden style=\"margin-top: 4px\"");
    }

    #[test]
    fn test_merge() {
        let left = extract(&[("class", "a b"), ("id", "x"), ("style", "color: red")]);
        let right = extract(&[("class", "b c"), ("id", "y"), ("style", "padding: 4px"), ("onclick", "f()")]);

        let merged = left.merge(&right);
        assert_eq!(merged.class_name.as_deref(), Some("a b c"));
        assert_eq!(merged.id(), Some("y"));
        let style = merged.style.unwrap();
        assert_eq!(style.len(), 2);
        assert_eq!(merged.events.len(), 1);
    }

    #[test]
    fn test_equals_ignores_order() {
        let a = extract(&[("class", "a b"), ("id", "x"), ("title", "t")]);
        let b = extract(&[("title", "t"), ("id", "x"), ("class", "b a")]);
        assert!(a.equals(&b));

        let c = extract(&[("class", "a"), ("id", "x"), ("title", "t")]);
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_danger_html_for_raw_text_elements() {
        let attrs = AttributeExtractor::new().extract("script", std::iter::empty());
        assert!(attrs.has_danger_html);
        let attrs = AttributeExtractor::new().extract("div", std::iter::empty());
        assert!(!attrs.has_danger_html);
    }
}
