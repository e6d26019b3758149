#![cfg(target_arch = "wasm32")]

use mockup_wasm::{convert_html_js, detect_patterns_js};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn converts_in_the_browser() {
    let json = convert_html_js(Some("<footer><p>Bye</p></footer>".into()), None).unwrap();
    assert!(json.contains("Footer.jsx"));
}

#[wasm_bindgen_test]
fn null_html_is_an_error() {
    assert!(detect_patterns_js(None, None).is_err());
}
