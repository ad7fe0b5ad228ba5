use wasm_bindgen::JsValue;
use web_sys::Document;

pub const YEAR_SELECTOR: &str = "[data-year]";

// Writes the current year into every footer placeholder
pub fn stamp(document: &Document) -> Result<u32, JsValue> {
    let year = js_sys::Date::new_0().get_full_year().to_string();
    let placeholders = document.query_selector_all(YEAR_SELECTOR)?;
    for i in 0..placeholders.length() {
        if let Some(node) = placeholders.item(i) {
            node.set_text_content(Some(&year));
        }
    }
    Ok(placeholders.length())
}
