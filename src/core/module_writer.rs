use crate::utils::error::Result;
use serde::Serialize;

/// Renders `export const <name> = <json>;` with two-space indented JSON.
pub fn render_module<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(format!("export const {} = {};", name, json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_module_pretty_prints() {
        let rendered = render_module("data", &json!([{"audioNumber": "a/b.mp3"}])).unwrap();
        assert_eq!(
            rendered,
            "export const data = [\n  {\n    \"audioNumber\": \"a/b.mp3\"\n  }\n];"
        );
    }

    #[test]
    fn test_render_module_keeps_key_order_and_unicode() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": "الحجر الأسود", "m": []}"#).unwrap();
        let rendered = render_module("addresses", &value).unwrap();
        assert_eq!(
            rendered,
            "export const addresses = {\n  \"z\": 1,\n  \"a\": \"الحجر الأسود\",\n  \"m\": []\n};"
        );
    }
}
