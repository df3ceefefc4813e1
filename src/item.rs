//! Catalog item records and the permissive JSON decode step.
//!
//! Item lists come from hand-edited JSON files, so the decoder accepts
//! whatever shape it is given and never rejects a record:
//!
//! ```text
//! [ {...}, {...} ]              → the array itself
//! { "items": [ {...} ] }        → the `items` array
//! { "data":  [ {...} ] }        → the `data` array
//! anything else                 → empty list
//! ```
//!
//! Every field is optional and defaults to an empty string. Numbers and
//! booleans are kept as their text form (`"year": 1987` becomes `"1987"`),
//! `null` and nested values become empty. Everything downstream of
//! [`decode_items`] can assume fully populated records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text shown in place of a missing name.
pub const NAME_PLACEHOLDER: &str = "—";

/// One catalog entry.
///
/// Field order matches the export schema: `name, year, code, image, link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Free text model name.
    pub name: String,
    /// A 4-digit year, a `YYYY-YYYY` range, or arbitrary text.
    pub year: String,
    /// Catalog code, ordered numeric-aware (`M9` before `M10`).
    pub code: String,
    /// Image filename relative to the image directory. Also the favorites key.
    pub image: String,
    /// External URL.
    pub link: String,
}

/// Addressable item fields, used by the editor's change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Year,
    Code,
    Image,
    Link,
}

impl Field {
    /// All fields in export/editor column order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Year,
        Field::Code,
        Field::Image,
        Field::Link,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Year => "year",
            Field::Code => "code",
            Field::Image => "image",
            Field::Link => "link",
        }
    }

    pub fn parse(s: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl Item {
    /// A blank record for a newly added photo: only `image` is set.
    pub fn blank_photo(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Year => &self.year,
            Field::Code => &self.code,
            Field::Image => &self.image,
            Field::Link => &self.link,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Year => self.year = value,
            Field::Code => self.code = value,
            Field::Image => self.image = value,
            Field::Link => self.link = value,
        }
    }

    /// Name for display, falling back to [`NAME_PLACEHOLDER`].
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            NAME_PLACEHOLDER
        } else {
            &self.name
        }
    }
}

/// Normalize any supported JSON shape into a flat item list.
pub fn decode_items(value: &Value) -> Vec<Item> {
    item_array(value)
        .map(|entries| entries.iter().map(decode_item).collect())
        .unwrap_or_default()
}

/// Parse raw JSON text (BOM and surrounding whitespace tolerated) into items.
///
/// Malformed JSON is an error; well-formed JSON of an unexpected shape is an
/// empty list.
pub fn parse_items(text: &str) -> Result<Vec<Item>, serde_json::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text).trim();
    let value: Value = serde_json::from_str(text)?;
    Ok(decode_items(&value))
}

/// Serialize items as pretty-printed JSON with 2-space indentation.
pub fn to_json(items: &[Item]) -> String {
    serde_json::to_string_pretty(items).expect("item list must serialize")
}

/// `items` wins over `data` whenever it is present and non-null, even when it
/// is not an array.
fn item_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => {
            let inner = map
                .get("items")
                .filter(|v| !v.is_null())
                .or_else(|| map.get("data").filter(|v| !v.is_null()))?;
            inner.as_array()
        }
        _ => None,
    }
}

fn decode_item(value: &Value) -> Item {
    let Value::Object(map) = value else {
        return Item::default();
    };
    let text = |key: &str| match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    Item {
        name: text("name"),
        year: text("year"),
        code: text("code"),
        image: text("image"),
        link: text("link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_bare_array() {
        let items = decode_items(&json!([{ "name": "A", "code": "X1" }]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "A");
        assert_eq!(items[0].code, "X1");
        assert_eq!(items[0].year, "");
    }

    #[test]
    fn decodes_items_wrapper() {
        let items = decode_items(&json!({ "items": [{ "name": "A" }, { "name": "B" }] }));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn decodes_data_wrapper() {
        let items = decode_items(&json!({ "data": [{ "name": "A" }] }));
        assert_eq!(items[0].name, "A");
    }

    #[test]
    fn items_key_takes_priority_over_data() {
        let items = decode_items(&json!({ "items": [], "data": [{ "name": "A" }] }));
        assert!(items.is_empty());
    }

    #[test]
    fn null_items_falls_through_to_data() {
        let items = decode_items(&json!({ "items": null, "data": [{ "name": "A" }] }));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn non_array_items_is_empty() {
        assert!(decode_items(&json!({ "items": 5, "data": [{ "name": "A" }] })).is_empty());
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert!(decode_items(&json!("text")).is_empty());
        assert!(decode_items(&json!(42)).is_empty());
        assert!(decode_items(&json!({ "rows": [] })).is_empty());
        assert!(decode_items(&Value::Null).is_empty());
    }

    #[test]
    fn scalar_fields_become_text() {
        let items = decode_items(&json!([{ "year": 1987, "code": true, "name": null }]));
        assert_eq!(items[0].year, "1987");
        assert_eq!(items[0].code, "true");
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn non_object_entries_are_blank_items() {
        let items = decode_items(&json!(["loose", 3]));
        assert_eq!(items, vec![Item::default(), Item::default()]);
    }

    #[test]
    fn parse_strips_bom_and_whitespace() {
        let items = parse_items("\u{feff}  [{\"name\":\"A\"}]\n").unwrap();
        assert_eq!(items[0].name, "A");
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(parse_items("[{\"name\":").is_err());
    }

    #[test]
    fn export_keeps_field_order_and_two_space_indent() {
        let json = to_json(&[Item {
            name: "A".into(),
            year: "1955".into(),
            code: "X2".into(),
            image: "a.jpg".into(),
            link: String::new(),
        }]);
        let expected = "[\n  {\n    \"name\": \"A\",\n    \"year\": \"1955\",\n    \"code\": \"X2\",\n    \"image\": \"a.jpg\",\n    \"link\": \"\"\n  }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn display_name_falls_back_to_dash() {
        assert_eq!(Item::default().display_name(), "—");
        assert_eq!(Item::blank_photo("0.jpg").image, "0.jpg");
    }

    #[test]
    fn field_get_set_roundtrip_by_name() {
        let mut item = Item::default();
        for field in Field::ALL {
            item.set(field, field.as_str());
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
        assert_eq!(item.get(Field::Link), "link");
        assert_eq!(Field::parse("price"), None);
    }
}
