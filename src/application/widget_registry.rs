// Widget type registry - the closed, compiled-in set of widget definitions
use crate::application::widgets::{large, navigation, small};
use crate::domain::widget::{Properties, WidgetCategory, WidgetDefinition};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

static BUILTIN: Lazy<WidgetRegistry> = Lazy::new(|| {
    WidgetRegistry::from_definitions([
        small::WEATHER,
        small::CLOCK,
        small::AUTH_STATUS,
        small::SESSION_COUNT,
        large::ACTIVITY_LIST,
        large::CRON_JOBS,
        large::SYSTEM_LOG,
        navigation::PAGES_MENU,
        navigation::TOPBAR,
    ])
});

/// The process-wide registry of built-in widget types.
pub fn builtin() -> &'static WidgetRegistry {
    &BUILTIN
}

#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    widgets: IndexMap<&'static str, WidgetDefinition>,
}

impl WidgetRegistry {
    /// Later definitions with a duplicate key replace earlier ones in place.
    pub fn from_definitions(definitions: impl IntoIterator<Item = WidgetDefinition>) -> Self {
        let widgets = definitions
            .into_iter()
            .map(|definition| (definition.key, definition))
            .collect();
        Self { widgets }
    }

    pub fn lookup(&self, widget_type: &str) -> Option<&WidgetDefinition> {
        self.widgets.get(widget_type)
    }

    /// Type identifiers in registration order.
    pub fn list_types(&self) -> Vec<&'static str> {
        self.widgets.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetDefinition> {
        self.widgets.values()
    }

    /// Definitions grouped by category; categories appear in first-seen order.
    pub fn list_by_category(&self) -> IndexMap<WidgetCategory, Vec<&WidgetDefinition>> {
        let mut categories: IndexMap<WidgetCategory, Vec<&WidgetDefinition>> = IndexMap::new();
        for definition in self.widgets.values() {
            categories
                .entry(definition.category())
                .or_default()
                .push(definition);
        }
        categories
    }

    /// Serializable palette for the builder UI.
    pub fn catalog(&self) -> IndexMap<&'static str, Vec<CatalogEntry>> {
        self.list_by_category()
            .into_iter()
            .map(|(category, definitions)| {
                let entries = definitions.into_iter().map(CatalogEntry::from).collect();
                (category.as_str(), entries)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub widget_type: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: WidgetCategory,
    pub description: &'static str,
    pub default_width: u32,
    pub default_height: u32,
    pub has_api_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_name: Option<&'static str>,
    pub properties: Properties,
    pub preview: &'static str,
}

impl From<&WidgetDefinition> for CatalogEntry {
    fn from(definition: &WidgetDefinition) -> Self {
        Self {
            widget_type: definition.key,
            name: definition.name,
            icon: definition.icon,
            category: definition.category(),
            description: definition.description,
            default_width: definition.default_width,
            default_height: definition.default_height,
            has_api_key: definition.has_api_key(),
            api_key_name: definition.api_key_name,
            properties: definition.default_properties(),
            preview: definition.preview,
        }
    }
}
