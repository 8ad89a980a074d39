use cvkit_lib::*;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format_args!($($t)*).to_string())))
}

/// Renders `json_input` with the named variant. An empty variant name
/// falls back to `meta.layout`. Errors come back as an `Error: ...` string.
#[wasm_bindgen]
pub fn render_resume(json_input: &str, variant: &str) -> String {
    match render_resume_internal(json_input, variant) {
        Ok(html) => html,
        Err(e) => format!("Error: {}", e),
    }
}

fn render_resume_internal(json_input: &str, variant: &str) -> Result<String, CvError> {
    let profile = parse_profile(json_input)?;
    let variant = if variant.trim().is_empty() {
        Variant::infer(&profile)
    } else {
        variant.parse()?
    };
    Ok(render(&profile, variant, &RenderOptions::default()))
}

#[wasm_bindgen]
pub fn validate_json(json_input: &str) -> bool {
    parse_profile(json_input).is_ok()
}

#[wasm_bindgen]
pub fn get_error_message(json_input: &str, variant: &str) -> String {
    match render_resume_internal(json_input, variant) {
        Ok(_) => String::new(),
        Err(e) => e.to_string(),
    }
}

#[wasm_bindgen]
pub fn sample_json(variant: &str) -> String {
    variant
        .parse::<Variant>()
        .map(|v| v.sample_json().to_string())
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn variants() -> js_sys::Array {
    Variant::ALL
        .iter()
        .map(|v| JsValue::from_str(v.as_str()))
        .collect()
}

#[wasm_bindgen(start)]
pub fn main() {
    console_log!("cvkit WASM module loaded");
}
