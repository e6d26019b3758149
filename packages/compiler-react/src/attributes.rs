//! HTML attribute → JSX prop mapping.

use indexmap::IndexMap;
use mockup_parser::attributes::split_style_declarations;
use mockup_parser::attributes::camel_case_property;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformType {
    /// Renamed (or kept) with the value untouched
    Direct,
    /// `onclick` → `onClick`
    Event,
    /// Style string → style object
    Style,
    /// Presence means `true`
    Boolean,
    /// Renamed with a value conversion (numbers, uncontrolled defaults)
    Custom,
    /// Dropped from the output
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformedValue {
    Bool(bool),
    Number(i64),
    Text(String),
    Object(IndexMap<String, String>),
}

impl TransformedValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TransformedValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TransformedValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq<bool> for TransformedValue {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformedAttribute {
    pub name: String,
    pub value: TransformedValue,
    #[serde(rename = "type")]
    pub transform_type: TransformType,
}

/// Target name and kind of one mapped attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRule {
    pub name: String,
    #[serde(rename = "type")]
    pub transform_type: TransformType,
}

impl AttributeRule {
    pub fn new(name: impl Into<String>, transform_type: TransformType) -> Self {
        Self {
            name: name.into(),
            transform_type,
        }
    }
}

use TransformType::*;

const ATTRIBUTE_TABLE: &[(&str, &str, TransformType)] = &[
    // renamed
    ("class", "className", Direct),
    ("for", "htmlFor", Direct),
    ("accept-charset", "acceptCharset", Direct),
    ("accesskey", "accessKey", Direct),
    ("autocapitalize", "autoCapitalize", Direct),
    ("autocomplete", "autoComplete", Direct),
    ("cellpadding", "cellPadding", Direct),
    ("cellspacing", "cellSpacing", Direct),
    ("charset", "charSet", Direct),
    ("classid", "classID", Direct),
    ("contenteditable", "contentEditable", Direct),
    ("contextmenu", "contextMenu", Direct),
    ("crossorigin", "crossOrigin", Direct),
    ("datetime", "dateTime", Direct),
    ("enctype", "encType", Direct),
    ("enterkeyhint", "enterKeyHint", Direct),
    ("fetchpriority", "fetchPriority", Direct),
    ("formaction", "formAction", Direct),
    ("formenctype", "formEncType", Direct),
    ("formmethod", "formMethod", Direct),
    ("formtarget", "formTarget", Direct),
    ("frameborder", "frameBorder", Direct),
    ("hreflang", "hrefLang", Direct),
    ("http-equiv", "httpEquiv", Direct),
    ("inputmode", "inputMode", Direct),
    ("itemid", "itemID", Direct),
    ("itemprop", "itemProp", Direct),
    ("itemref", "itemRef", Direct),
    ("itemtype", "itemType", Direct),
    ("marginheight", "marginHeight", Direct),
    ("marginwidth", "marginWidth", Direct),
    ("mediagroup", "mediaGroup", Direct),
    ("radiogroup", "radioGroup", Direct),
    ("referrerpolicy", "referrerPolicy", Direct),
    ("spellcheck", "spellCheck", Direct),
    ("srcdoc", "srcDoc", Direct),
    ("srclang", "srcLang", Direct),
    ("srcset", "srcSet", Direct),
    ("usemap", "useMap", Direct),
    // svg
    ("viewbox", "viewBox", Direct),
    ("preserveaspectratio", "preserveAspectRatio", Direct),
    ("gradientunits", "gradientUnits", Direct),
    ("gradienttransform", "gradientTransform", Direct),
    ("patternunits", "patternUnits", Direct),
    ("patterncontentunits", "patternContentUnits", Direct),
    ("patterntransform", "patternTransform", Direct),
    ("spreadmethod", "spreadMethod", Direct),
    ("clippathunits", "clipPathUnits", Direct),
    ("markerwidth", "markerWidth", Direct),
    ("markerheight", "markerHeight", Direct),
    ("stddeviation", "stdDeviation", Direct),
    ("clip-path", "clipPath", Direct),
    ("clip-rule", "clipRule", Direct),
    ("color-interpolation-filters", "colorInterpolationFilters", Direct),
    ("dominant-baseline", "dominantBaseline", Direct),
    ("fill-opacity", "fillOpacity", Direct),
    ("fill-rule", "fillRule", Direct),
    ("flood-color", "floodColor", Direct),
    ("flood-opacity", "floodOpacity", Direct),
    ("font-family", "fontFamily", Direct),
    ("font-size", "fontSize", Direct),
    ("font-weight", "fontWeight", Direct),
    ("lighting-color", "lightingColor", Direct),
    ("marker-end", "markerEnd", Direct),
    ("marker-mid", "markerMid", Direct),
    ("marker-start", "markerStart", Direct),
    ("pointer-events", "pointerEvents", Direct),
    ("shape-rendering", "shapeRendering", Direct),
    ("stop-color", "stopColor", Direct),
    ("stop-opacity", "stopOpacity", Direct),
    ("stroke-dasharray", "strokeDasharray", Direct),
    ("stroke-dashoffset", "strokeDashoffset", Direct),
    ("stroke-linecap", "strokeLinecap", Direct),
    ("stroke-linejoin", "strokeLinejoin", Direct),
    ("stroke-miterlimit", "strokeMiterlimit", Direct),
    ("stroke-opacity", "strokeOpacity", Direct),
    ("stroke-width", "strokeWidth", Direct),
    ("text-anchor", "textAnchor", Direct),
    ("text-rendering", "textRendering", Direct),
    ("vector-effect", "vectorEffect", Direct),
    ("xlink:href", "xlinkHref", Direct),
    ("xml:lang", "xmlLang", Direct),
    ("xml:space", "xmlSpace", Direct),
    ("xmlns:xlink", "xmlnsXlink", Direct),
    // style
    ("style", "style", Style),
    // boolean
    ("allowfullscreen", "allowFullScreen", Boolean),
    ("async", "async", Boolean),
    ("autofocus", "autoFocus", Boolean),
    ("autoplay", "autoPlay", Boolean),
    ("checked", "checked", Boolean),
    ("controls", "controls", Boolean),
    ("default", "default", Boolean),
    ("defer", "defer", Boolean),
    ("disabled", "disabled", Boolean),
    ("formnovalidate", "formNoValidate", Boolean),
    ("hidden", "hidden", Boolean),
    ("inert", "inert", Boolean),
    ("ismap", "isMap", Boolean),
    ("itemscope", "itemScope", Boolean),
    ("loop", "loop", Boolean),
    ("multiple", "multiple", Boolean),
    ("muted", "muted", Boolean),
    ("nomodule", "noModule", Boolean),
    ("novalidate", "noValidate", Boolean),
    ("open", "open", Boolean),
    ("playsinline", "playsInline", Boolean),
    ("readonly", "readOnly", Boolean),
    ("required", "required", Boolean),
    ("reversed", "reversed", Boolean),
    ("scoped", "scoped", Boolean),
    ("seamless", "seamless", Boolean),
    ("selected", "selected", Boolean),
    // numeric or uncontrolled values
    ("tabindex", "tabIndex", Custom),
    ("maxlength", "maxLength", Custom),
    ("minlength", "minLength", Custom),
    ("colspan", "colSpan", Custom),
    ("rowspan", "rowSpan", Custom),
    ("rows", "rows", Custom),
    ("cols", "cols", Custom),
    ("size", "size", Custom),
    ("span", "span", Custom),
    ("start", "start", Custom),
    ("value", "value", Direct),
    // events
    ("onclick", "onClick", Event),
    ("ondblclick", "onDoubleClick", Event),
    ("oncontextmenu", "onContextMenu", Event),
    ("onmousedown", "onMouseDown", Event),
    ("onmouseup", "onMouseUp", Event),
    ("onmouseenter", "onMouseEnter", Event),
    ("onmouseleave", "onMouseLeave", Event),
    ("onmousemove", "onMouseMove", Event),
    ("onmouseover", "onMouseOver", Event),
    ("onmouseout", "onMouseOut", Event),
    ("onpointerdown", "onPointerDown", Event),
    ("onpointerup", "onPointerUp", Event),
    ("onpointermove", "onPointerMove", Event),
    ("onpointerenter", "onPointerEnter", Event),
    ("onpointerleave", "onPointerLeave", Event),
    ("onpointercancel", "onPointerCancel", Event),
    ("ontouchstart", "onTouchStart", Event),
    ("ontouchend", "onTouchEnd", Event),
    ("ontouchmove", "onTouchMove", Event),
    ("ontouchcancel", "onTouchCancel", Event),
    ("onkeydown", "onKeyDown", Event),
    ("onkeyup", "onKeyUp", Event),
    ("onkeypress", "onKeyPress", Event),
    ("onfocus", "onFocus", Event),
    ("onblur", "onBlur", Event),
    ("onchange", "onChange", Event),
    ("oninput", "onInput", Event),
    ("oninvalid", "onInvalid", Event),
    ("onreset", "onReset", Event),
    ("onsubmit", "onSubmit", Event),
    ("onselect", "onSelect", Event),
    ("onscroll", "onScroll", Event),
    ("onwheel", "onWheel", Event),
    ("oncopy", "onCopy", Event),
    ("oncut", "onCut", Event),
    ("onpaste", "onPaste", Event),
    ("ondrag", "onDrag", Event),
    ("ondragstart", "onDragStart", Event),
    ("ondragend", "onDragEnd", Event),
    ("ondragenter", "onDragEnter", Event),
    ("ondragleave", "onDragLeave", Event),
    ("ondragover", "onDragOver", Event),
    ("ondrop", "onDrop", Event),
    ("onload", "onLoad", Event),
    ("onerror", "onError", Event),
    ("onplay", "onPlay", Event),
    ("onpause", "onPause", Event),
    ("onended", "onEnded", Event),
    ("ontimeupdate", "onTimeUpdate", Event),
    ("onvolumechange", "onVolumeChange", Event),
    ("onanimationstart", "onAnimationStart", Event),
    ("onanimationend", "onAnimationEnd", Event),
    ("onanimationiteration", "onAnimationIteration", Event),
    ("ontransitionend", "onTransitionEnd", Event),
    ("ontoggle", "onToggle", Event),
    // framework internals that must not leak into generated code
    ("data-reactid", "data-reactid", Remove),
    ("data-reactroot", "data-reactroot", Remove),
    ("data-react-checksum", "data-react-checksum", Remove),
    ("xmlns", "xmlns", Remove),
];

static ATTRIBUTES: LazyLock<HashMap<&'static str, AttributeRule>> = LazyLock::new(|| {
    ATTRIBUTE_TABLE
        .iter()
        .map(|(html, jsx, kind)| (*html, AttributeRule::new(*jsx, *kind)))
        .collect()
});

/// Initial form state React only accepts as an uncontrolled default, keyed
/// by element and HTML attribute
const UNCONTROLLED_DEFAULTS: &[(&str, &str, &str)] = &[
    ("input", "value", "defaultValue"),
    ("input", "checked", "defaultChecked"),
    ("textarea", "value", "defaultValue"),
    ("select", "value", "defaultValue"),
];

/// Number of entries in the static mapping table
pub fn table_size() -> usize {
    ATTRIBUTES.len()
}

/// Converts a `style` attribute string into a style object: camelCase keys,
/// raw values (including `!important`)
pub fn style_to_object(style: &str) -> IndexMap<String, String> {
    split_style_declarations(style)
        .into_iter()
        .map(|(property, value)| (camel_case_property(&property), value))
        .collect()
}

/// Maps HTML attributes to JSX props. Custom rules take precedence over the
/// static table.
#[derive(Debug, Clone, Default)]
pub struct AttributeTransformer {
    custom_rules: HashMap<String, AttributeRule>,
}

impl AttributeTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_custom_rule(&mut self, html_name: &str, rule: AttributeRule) {
        self.custom_rules.insert(html_name.to_ascii_lowercase(), rule);
    }

    pub fn remove_custom_rule(&mut self, html_name: &str) -> bool {
        self.custom_rules
            .remove(&html_name.to_ascii_lowercase())
            .is_some()
    }

    pub fn rule_for(&self, html_name: &str) -> Option<&AttributeRule> {
        let key = html_name.to_ascii_lowercase();
        self.custom_rules
            .get(&key)
            .or_else(|| ATTRIBUTES.get(key.as_str()))
    }

    pub fn transform(&self, name: &str, value: &str) -> TransformedAttribute {
        let Some(rule) = self.rule_for(name) else {
            // unmapped names, data-* and aria-* included, pass through
            return TransformedAttribute {
                name: name.to_string(),
                value: TransformedValue::Text(value.to_string()),
                transform_type: Direct,
            };
        };

        let value = match rule.transform_type {
            Boolean => TransformedValue::Bool(!value.trim().eq_ignore_ascii_case("false")),
            Style => TransformedValue::Object(style_to_object(value)),
            Custom => match value.trim().parse::<i64>() {
                Ok(number) => TransformedValue::Number(number),
                Err(_) => TransformedValue::Text(value.to_string()),
            },
            Direct | Event | Remove => TransformedValue::Text(value.to_string()),
        };

        TransformedAttribute {
            name: rule.name.clone(),
            value,
            transform_type: rule.transform_type,
        }
    }

    /// Like [`AttributeTransformer::transform`], for an attribute on `tag`.
    /// Form controls get their uncontrolled `default*` prop unless a custom
    /// rule covers the attribute.
    pub fn transform_for(&self, tag: &str, name: &str, value: &str) -> TransformedAttribute {
        let mut attribute = self.transform(name, value);
        if self.custom_rules.contains_key(&name.to_ascii_lowercase()) {
            return attribute;
        }
        let uncontrolled = UNCONTROLLED_DEFAULTS
            .iter()
            .find(|(element, html, _)| tag.eq_ignore_ascii_case(element) && name.eq_ignore_ascii_case(html));
        if let Some((_, _, jsx)) = uncontrolled {
            attribute.name = jsx.to_string();
        }
        attribute
    }

    /// Transform every pair, dropping removed attributes
    pub fn transform_batch<'a, I>(&self, attributes: I) -> Vec<TransformedAttribute>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        attributes
            .into_iter()
            .map(|(name, value)| self.transform(name, value))
            .filter(|attribute| attribute.transform_type != Remove)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert!(table_size() >= 140);
        assert_eq!(table_size(), ATTRIBUTE_TABLE.len());
    }

    #[test]
    fn test_transform_basics() {
        let transformer = AttributeTransformer::new();
        assert_eq!(transformer.transform("class", "x").name, "className");
        assert_eq!(transformer.transform("disabled", "").value, true);
        assert_eq!(transformer.transform("disabled", "false").value, false);
        assert_eq!(transformer.transform("data-reactid", "1").transform_type, Remove);
        assert_eq!(transformer.transform("onclick", "go()").name, "onClick");
        assert_eq!(transformer.transform("tabindex", "2").value, TransformedValue::Number(2));
    }

    #[test]
    fn test_form_defaults_depend_on_tag() {
        let transformer = AttributeTransformer::new();
        assert_eq!(transformer.transform_for("input", "value", "a").name, "defaultValue");
        assert_eq!(transformer.transform_for("textarea", "value", "a").name, "defaultValue");
        assert_eq!(transformer.transform_for("input", "checked", "").name, "defaultChecked");
        assert_eq!(transformer.transform_for("option", "value", "007").name, "value");
        assert_eq!(
            transformer.transform_for("option", "value", "007").value,
            TransformedValue::Text("007".into())
        );
        assert_eq!(transformer.transform_for("option", "selected", "").name, "selected");
        assert_eq!(transformer.transform_for("button", "value", "go").name, "value");

        let mut custom = AttributeTransformer::new();
        custom.add_custom_rule("value", AttributeRule::new("value", Direct));
        assert_eq!(custom.transform_for("input", "value", "a").name, "value");
    }

    #[test]
    fn test_passthrough() {
        let transformer = AttributeTransformer::new();
        let data = transformer.transform("data-id", "7");
        assert_eq!(data.name, "data-id");
        assert_eq!(data.transform_type, Direct);
        let aria = transformer.transform("aria-label", "Close");
        assert_eq!(aria.name, "aria-label");
        assert_eq!(aria.value.as_str(), Some("Close"));
        assert_eq!(transformer.transform("loading", "lazy").name, "loading");
    }

    #[test]
    fn test_custom_rules_take_precedence() {
        let mut transformer = AttributeTransformer::new();
        transformer.add_custom_rule("class", AttributeRule::new("class", Direct));
        assert_eq!(transformer.transform("class", "x").name, "class");
        assert!(transformer.remove_custom_rule("class"));
        assert!(!transformer.remove_custom_rule("class"));
        assert_eq!(transformer.transform("class", "x").name, "className");
    }

    #[test]
    fn test_batch_drops_removed() {
        let transformer = AttributeTransformer::new();
        let batch = transformer.transform_batch([("data-reactroot", ""), ("id", "main"), ("for", "email")]);
        let names: Vec<&str> = batch.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["id", "htmlFor"]);
    }

    #[test]
    fn test_style_to_object() {
        let style = style_to_object("background-color: red; margin-top: 4px !important; -webkit-transition: none");
        assert_eq!(style["backgroundColor"], "red");
        assert_eq!(style["marginTop"], "4px !important");
        assert_eq!(style["WebkitTransition"], "none");

        let transformed = AttributeTransformer::new().transform("style", "color: blue");
        assert_eq!(transformed.transform_type, Style);
        assert!(matches!(transformed.value, TransformedValue::Object(ref map) if map["color"] == "blue"));
    }
}
