//! Catalog components and their slot-specific attributes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::slot::Slot;

/// One attribute value in a component's `meta` bag.
///
/// Catalog JSON carries numbers, strings, or string lists depending on the
/// key (`tdp: 65`, `socket: "AM5"`, `formFactor: ["ATX", "Micro-ATX"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Numeric view. Numeric strings such as `"65"` count as numbers since
    /// spreadsheet-imported catalogs often quote them.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) if n.is_finite() => Some(*n),
            MetaValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List view; scalars are wrapped into a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            MetaValue::List(items) => items.clone(),
            scalar => vec![scalar.to_string()],
        }
    }

    /// `false` for `0`, `NaN` and the empty string; lists are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            MetaValue::Number(n) => *n != 0.0 && !n.is_nan(),
            MetaValue::Text(s) => !s.is_empty(),
            MetaValue::List(_) => true,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Number(n) => write!(f, "{n}"),
            MetaValue::Text(s) => f.write_str(s),
            MetaValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<f64> for MetaValue {
    fn from(n: f64) -> Self {
        MetaValue::Number(n)
    }
}

impl From<u32> for MetaValue {
    fn from(n: u32) -> Self {
        MetaValue::Number(f64::from(n))
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl From<Vec<&str>> for MetaValue {
    fn from(items: Vec<&str>) -> Self {
        MetaValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// A catalog item. Immutable once loaded; the engine only ever clones it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Slot name this component belongs to (`cpu`, `motherboard`, ...).
    pub sub_category: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub meta: BTreeMap<String, MetaValue>,
}

impl Component {
    /// Create a component for `slot` with no brand, image, or attributes.
    pub fn new(id: impl Into<String>, title: impl Into<String>, slot: Slot, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: "pc-components".to_string(),
            sub_category: slot.as_str().to_string(),
            brand: String::new(),
            price,
            image: String::new(),
            meta: BTreeMap::new(),
        }
    }

    /// Attach one `meta` attribute (builder pattern).
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// The slot named by `sub_category`, if it is one of the seven.
    pub fn slot(&self) -> Option<Slot> {
        self.sub_category.parse().ok()
    }

    pub fn fits(&self, slot: Slot) -> bool {
        self.sub_category == slot.as_str()
    }

    pub fn meta(&self, key: &str) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.meta(key).and_then(MetaValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.meta(key).and_then(MetaValue::as_text)
    }

    /// `key` as a string list; absent keys yield an empty list.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.meta(key).map(MetaValue::to_list).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_json() {
        let json = r#"{
            "id": "case-1",
            "title": "Airflow Mid Tower",
            "category": "pc-components",
            "subCategory": "case",
            "brand": "Fractal",
            "price": 1250000,
            "image": "https://cdn.example/case.png",
            "meta": { "formFactor": ["ATX", "Micro-ATX"], "maxGpuLength": 360, "color": "black" }
        }"#;
        let c: Component = serde_json::from_str(json).unwrap();
        assert_eq!(c.slot(), Some(Slot::Case));
        assert_eq!(c.list("formFactor"), vec!["ATX", "Micro-ATX"]);
        assert_eq!(c.number("maxGpuLength"), Some(360.0));
        assert_eq!(c.text("color"), Some("black"));
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{ "id": "x", "title": "Bare", "subCategory": "ram", "price": 0 }"#;
        let c: Component = serde_json::from_str(json).unwrap();
        assert!(c.meta.is_empty());
        assert!(c.brand.is_empty());
        assert!(c.fits(Slot::Ram));
    }

    #[test]
    fn numeric_strings_read_as_numbers() {
        let c = Component::new("cpu-1", "CPU", Slot::Cpu, 1.0)
            .with_meta("tdp", "65")
            .with_meta("socket", "AM5");
        assert_eq!(c.number("tdp"), Some(65.0));
        assert_eq!(c.number("socket"), None);
        assert_eq!(c.number("missing"), None);
    }

    #[test]
    fn scalar_wraps_into_list() {
        let c = Component::new("case-1", "Case", Slot::Case, 1.0).with_meta("formFactor", "ITX");
        assert_eq!(c.list("formFactor"), vec!["ITX"]);
        assert!(c.list("missing").is_empty());
    }

    #[test]
    fn truthiness() {
        assert!(!MetaValue::Text(String::new()).is_truthy());
        assert!(!MetaValue::Number(0.0).is_truthy());
        assert!(MetaValue::Number(1.0).is_truthy());
        assert!(MetaValue::List(vec![]).is_truthy());
    }

    #[test]
    fn unknown_sub_category_has_no_slot() {
        let mut c = Component::new("kb", "Keyboard", Slot::Cpu, 1.0);
        c.sub_category = "keyboard".to_string();
        assert_eq!(c.slot(), None);
        assert!(!c.fits(Slot::Cpu));
    }
}
