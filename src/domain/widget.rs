// Widget type and per-instance property model
use crate::domain::markup::js_identifier;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Property bag as it appears in a dashboard configuration (insertion-ordered).
pub type Properties = Map<String, Value>;

/// Largest delay browsers honour for `setInterval`; larger values fire immediately.
pub const MAX_TIMER_DELAY_MS: u64 = i32::MAX as u64;

pub type Generator = fn(&ResolvedProps<'_>) -> Result<String, WidgetError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("property `{key}` ({seconds}s) is not a usable refresh interval")]
    IntervalOutOfRange { key: String, seconds: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    Small,
    Large,
    Bar,
    Other,
}

impl WidgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetCategory::Small => "small",
            WidgetCategory::Large => "large",
            WidgetCategory::Bar => "bar",
            WidgetCategory::Other => "other",
        }
    }
}

/// A declared default property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Number(i64),
    Flag(bool),
}

impl From<DefaultValue> for Value {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Text(s) => Value::String(s.to_string()),
            DefaultValue::Number(n) => Value::Number(Number::from(n)),
            DefaultValue::Flag(b) => Value::Bool(b),
        }
    }
}

/// A compiled-in widget type.
#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// `None` lands in the `other` bucket when listing by category.
    pub category: Option<WidgetCategory>,
    pub description: &'static str,
    pub default_width: u32,
    pub default_height: u32,
    pub api_key_name: Option<&'static str>,
    pub defaults: &'static [(&'static str, DefaultValue)],
    /// Builder palette markup; never exported.
    pub preview: &'static str,
    pub generate_html: Generator,
    pub generate_js: Option<Generator>,
}

impl WidgetDefinition {
    pub fn has_api_key(&self) -> bool {
        self.api_key_name.is_some()
    }

    pub fn category(&self) -> WidgetCategory {
        self.category.unwrap_or(WidgetCategory::Other)
    }

    pub fn default_properties(&self) -> Properties {
        self.defaults
            .iter()
            .map(|(key, value)| (key.to_string(), Value::from(*value)))
            .collect()
    }
}

/// Instance properties with the `id` forced to the instance's own id.
///
/// Accessors fall back to the widget's declared default whenever a property is
/// absent, has the wrong type, or is JS-falsy (`""`, `0`).
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProps<'a> {
    id: &'a str,
    properties: &'a Properties,
    defaults: &'a [(&'static str, DefaultValue)],
}

impl<'a> ResolvedProps<'a> {
    pub fn new(
        id: &'a str,
        properties: &'a Properties,
        defaults: &'a [(&'static str, DefaultValue)],
    ) -> Self {
        Self {
            id,
            properties,
            defaults,
        }
    }

    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Raw lookup; `id` always resolves to the instance id.
    pub fn get(&self, key: &str) -> Option<Value> {
        if key == "id" {
            return Some(Value::String(self.id.to_string()));
        }
        self.properties.get(key).cloned()
    }

    /// The flat `{...properties, id}` mapping handed to generators.
    pub fn to_map(&self) -> Properties {
        let mut map = self.properties.clone();
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        map
    }

    fn default_for(&self, key: &str) -> Option<DefaultValue> {
        self.defaults
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    pub fn text(&self, key: &str) -> String {
        if key == "id" {
            return self.id.to_string();
        }
        match self.properties.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
        match self.default_for(key) {
            Some(DefaultValue::Text(s)) => s.to_string(),
            Some(DefaultValue::Number(n)) => n.to_string(),
            Some(DefaultValue::Flag(b)) => b.to_string(),
            None => String::new(),
        }
    }

    pub fn number(&self, key: &str) -> f64 {
        let given = match self.properties.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match given {
            Some(v) if v != 0.0 && v.is_finite() => v,
            _ => match self.default_for(key) {
                Some(DefaultValue::Number(n)) => n as f64,
                _ => 0.0,
            },
        }
    }

    /// A positive whole count; anything below 1 falls back to the default.
    pub fn count(&self, key: &str) -> u64 {
        let value = self.number(key).trunc();
        if (1.0..=u32::MAX as f64).contains(&value) {
            return value as u64;
        }
        match self.default_for(key) {
            Some(DefaultValue::Number(n)) if n > 0 => n as u64,
            _ => 1,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.properties.get(key) {
            Some(Value::Bool(b)) => *b,
            _ => matches!(self.default_for(key), Some(DefaultValue::Flag(true))),
        }
    }

    /// Refresh interval property (seconds) converted to a timer delay in ms.
    pub fn interval_ms(&self, key: &str) -> Result<u64, WidgetError> {
        let seconds = self.number(key);
        let ms = seconds * 1000.0;
        if !(1.0..=MAX_TIMER_DELAY_MS as f64).contains(&ms) {
            return Err(WidgetError::IntervalOutOfRange {
                key: key.to_string(),
                seconds,
            });
        }
        Ok(ms.round() as u64)
    }

    /// Only an explicit `showHeader: false` hides the header.
    pub fn show_header(&self) -> bool {
        !matches!(self.properties.get("showHeader"), Some(Value::Bool(false)))
    }

    /// Generated JS function name, unique per instance id.
    pub fn function_name(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, js_identifier(self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULTS: &[(&str, DefaultValue)] = &[
        ("title", DefaultValue::Text("Clock")),
        ("refreshInterval", DefaultValue::Number(30)),
        ("format24h", DefaultValue::Flag(false)),
    ];

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_id_cannot_be_overridden() {
        let map = props(json!({"id": "spoofed", "title": "Mine"}));
        let resolved = ResolvedProps::new("c1", &map, DEFAULTS);
        assert_eq!(resolved.id(), "c1");
        assert_eq!(resolved.text("id"), "c1");
        assert_eq!(resolved.get("id"), Some(json!("c1")));
        assert_eq!(resolved.to_map().get("id"), Some(&json!("c1")));
        assert_eq!(resolved.to_map().get("title"), Some(&json!("Mine")));
    }

    #[test]
    fn test_defaults_for_absent_and_wrong_typed() {
        let map = props(json!({"title": 42, "refreshInterval": "oops", "format24h": "yes"}));
        let resolved = ResolvedProps::new("w", &map, DEFAULTS);
        assert_eq!(resolved.text("title"), "42");
        assert_eq!(resolved.number("refreshInterval"), 30.0);
        assert!(!resolved.flag("format24h"));

        let empty = Properties::new();
        let resolved = ResolvedProps::new("w", &empty, DEFAULTS);
        assert_eq!(resolved.text("title"), "Clock");
        assert_eq!(resolved.text("missing"), "");
    }

    #[test]
    fn test_falsy_values_use_default() {
        let map = props(json!({"title": "", "refreshInterval": 0}));
        let resolved = ResolvedProps::new("w", &map, DEFAULTS);
        assert_eq!(resolved.text("title"), "Clock");
        assert_eq!(resolved.interval_ms("refreshInterval"), Ok(30_000));
    }

    #[test]
    fn test_interval_out_of_range() {
        let map = props(json!({"refreshInterval": 1e12}));
        let resolved = ResolvedProps::new("w", &map, DEFAULTS);
        assert!(matches!(
            resolved.interval_ms("refreshInterval"),
            Err(WidgetError::IntervalOutOfRange { .. })
        ));

        let map = props(json!({"refreshInterval": -5}));
        let resolved = ResolvedProps::new("w", &map, DEFAULTS);
        assert!(resolved.interval_ms("refreshInterval").is_err());

        let map = props(json!({"refreshInterval": "2.5"}));
        let resolved = ResolvedProps::new("w", &map, DEFAULTS);
        assert_eq!(resolved.interval_ms("refreshInterval"), Ok(2_500));
    }

    #[test]
    fn test_count_rejects_non_positive() {
        const LIMITS: &[(&str, DefaultValue)] = &[("maxLines", DefaultValue::Number(50))];
        for value in [json!(-3), json!(-0.5), json!(0.4), json!("-10"), json!(1e20)] {
            let map = props(json!({ "maxLines": value }));
            assert_eq!(ResolvedProps::new("w", &map, LIMITS).count("maxLines"), 50);
        }
        let map = props(json!({"maxLines": 7.9}));
        assert_eq!(ResolvedProps::new("w", &map, LIMITS).count("maxLines"), 7);
        assert_eq!(ResolvedProps::new("w", &map, LIMITS).count("unknown"), 1);
    }

    #[test]
    fn test_show_header_only_hidden_on_explicit_false() {
        for value in [json!({}), json!({"showHeader": true}), json!({"showHeader": "false"}), json!({"showHeader": 0})] {
            let map = props(value);
            assert!(ResolvedProps::new("w", &map, DEFAULTS).show_header());
        }
        let map = props(json!({"showHeader": false}));
        assert!(!ResolvedProps::new("w", &map, DEFAULTS).show_header());
    }

    #[test]
    fn test_function_name() {
        let empty = Properties::new();
        assert_eq!(
            ResolvedProps::new("a-1", &empty, DEFAULTS).function_name("update"),
            "update_a_1"
        );
    }
}
