use mockup_parser::{ParseError, ParseOptions, Parser};
use mockup_patterns::{PatternDetector, PatternOptions};
use mockup_pipeline::{ConvertOptions, Pipeline};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert an HTML mockup; returns the conversion output as JSON
#[wasm_bindgen(js_name = convertHtml)]
pub fn convert_html_js(html: Option<String>, options_json: Option<String>) -> Result<String, JsValue> {
    convert_html(html.as_deref(), options_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Parse an HTML mockup and return the document as JSON
#[wasm_bindgen(js_name = parseHtml)]
pub fn parse_html_js(html: Option<String>, options_json: Option<String>) -> Result<String, JsValue> {
    parse_html(html.as_deref(), options_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Detect repeated structures; returns the detected patterns as JSON
#[wasm_bindgen(js_name = detectPatterns)]
pub fn detect_patterns_js(html: Option<String>, options_json: Option<String>) -> Result<String, JsValue> {
    detect_patterns(html.as_deref(), options_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

pub fn convert_html(html: Option<&str>, options_json: Option<&str>) -> Result<String, String> {
    let options: ConvertOptions = options_from_json(options_json)?;
    let output = Pipeline::new()
        .convert_input(html, &options)
        .map_err(|e| e.to_string())?;
    to_json(&output)
}

pub fn parse_html(html: Option<&str>, options_json: Option<&str>) -> Result<String, String> {
    let options: ParseOptions = options_from_json(options_json)?;
    let doc = Parser::new()
        .parse_input(html, &options)
        .map_err(|e| e.to_string())?;
    to_json(&doc)
}

pub fn detect_patterns(html: Option<&str>, options_json: Option<&str>) -> Result<String, String> {
    let html = html.ok_or_else(|| ParseError::missing_input().to_string())?;
    let options: PatternOptions = options_from_json(options_json)?;
    let patterns = PatternDetector::new(options).detect_patterns(html);
    to_json(&patterns)
}

fn options_from_json<T: DeserializeOwned + Default>(json: Option<&str>) -> Result<T, String> {
    match json.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => serde_json::from_str(json).map_err(|e| format!("Invalid options: {}", e)),
        None => Ok(T::default()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_convert_html() {
        let json = convert_html(Some("<header><h1>Acme</h1></header>"), None).unwrap();
        let output: Value = serde_json::from_str(&json).unwrap();

        let paths: Vec<&str> = output["files"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["path"].as_str().unwrap())
            .collect();
        assert!(paths.contains(&"Header.jsx"));
        assert_eq!(output["split"]["components"][0]["name"], "Header");
    }

    #[test]
    fn test_convert_with_options() {
        let json = convert_html(
            Some("<header><h1>Acme</h1></header>"),
            Some(r#"{"typescript": true, "generateApp": false}"#),
        )
        .unwrap();
        assert!(json.contains("Header.tsx"));
        assert!(!json.contains("App.tsx"));
    }

    #[test]
    fn test_missing_html() {
        assert_eq!(
            convert_html(None, None).unwrap_err(),
            "No HTML input was provided"
        );
        assert!(parse_html(None, None).is_err());
        assert!(detect_patterns(None, None).is_err());
    }

    #[test]
    fn test_invalid_options() {
        let err = convert_html(Some("<p>x</p>"), Some("{not json")).unwrap_err();
        assert!(err.starts_with("Invalid options"));
    }

    #[test]
    fn test_parse_html() {
        let json = parse_html(Some("<div><p>Hi</p></div>"), Some("{}")).unwrap();
        let doc: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["metadata"]["elementCount"], 2);
    }

    #[test]
    fn test_detect_patterns() {
        let html = r#"<ul><li class="item">a</li><li class="item">b</li><li class="item">c</li></ul>"#;
        let json = detect_patterns(Some(html), None).unwrap();
        let patterns: Vec<Value> = serde_json::from_str(&json).unwrap();
        let item = patterns.iter().find(|p| p["pattern"] == "item").unwrap();
        assert_eq!(item["count"], 3);
        assert_eq!(item["selector"], ".item");
    }
}
