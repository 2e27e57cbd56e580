// README emitted alongside an exported dashboard
use crate::application::template::fill_template;
use crate::application::widget_registry::WidgetRegistry;
use crate::domain::dashboard::WidgetInstance;

/// Widget types that only work when served by the companion proxy server.
pub const COMPANION_SERVER_TYPES: &[&str] = &[
    "openclaw-release",
    "auth-status",
    "activity-list",
    "cron-jobs",
    "system-log",
    "session-count",
    "token-gauge",
];

const README: &str = r##"# LobsterBoard Dashboard

This dashboard was generated with LobsterBoard Dashboard Builder.

## Quick Start

${companion}
### Static mode

Open `index.html` directly in a browser.

## Files

| File | Description |
|------|-------------|
| `index.html` | Dashboard page |
| `css/style.css` | Styles |
| `js/dashboard.js` | Widget logic |
| `README.md` | This file |

${api_keys}
---

Generated with LobsterBoard - https://github.com/curbob/LobsterBoard
"##;

const COMPANION_SECTION: &str = r##"### Running with OpenClaw widgets

Your dashboard includes widgets that connect to OpenClaw. Run the companion server from this directory:

```bash
lobsterboard serve-export .
```

Open http://localhost:8080 in your browser.
"##;

/// Distinct API key names, in first-use order.
pub fn required_api_keys(registry: &WidgetRegistry, widgets: &[WidgetInstance]) -> Vec<&'static str> {
    let mut keys = Vec::new();
    for widget in widgets {
        if let Some(name) = registry
            .lookup(&widget.widget_type)
            .and_then(|definition| definition.api_key_name)
        {
            if !keys.contains(&name) {
                keys.push(name);
            }
        }
    }
    keys
}

pub fn needs_companion_server(widgets: &[WidgetInstance]) -> bool {
    widgets
        .iter()
        .any(|w| COMPANION_SERVER_TYPES.contains(&w.widget_type.as_str()))
}

pub fn generate_readme(registry: &WidgetRegistry, widgets: &[WidgetInstance]) -> String {
    let companion = if needs_companion_server(widgets) {
        COMPANION_SECTION
    } else {
        ""
    };

    let keys = required_api_keys(registry, widgets);
    let api_keys = if keys.is_empty() {
        String::new()
    } else {
        let lines = keys
            .iter()
            .map(|key| format!("- `YOUR_{}`", key))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "## API Keys\n\nEdit `js/dashboard.js` and replace these placeholders:\n{}\n",
            lines
        )
    };

    fill_template(README, &[("companion", companion), ("api_keys", &api_keys)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::widget_registry::builtin;

    #[test]
    fn test_openclaw_widgets_flag_server_and_keys() {
        let widgets = vec![
            WidgetInstance::new("a", "activity-list"),
            WidgetInstance::new("c", "clock"),
        ];
        let readme = generate_readme(builtin(), &widgets);
        assert!(readme.contains("### Running with OpenClaw widgets"));
        assert!(readme.contains("lobsterboard serve-export ."));
        assert!(readme.contains("## API Keys"));
        assert!(readme.contains("- `YOUR_OPENCLAW_API`"));
    }

    #[test]
    fn test_static_widgets_need_nothing() {
        let widgets = vec![WidgetInstance::new("c", "clock"), WidgetInstance::new("w", "weather")];
        let readme = generate_readme(builtin(), &widgets);
        assert!(!readme.contains("Running with OpenClaw widgets"));
        assert!(!readme.contains("API Keys"));
        assert!(!readme.contains("OPENCLAW_API"));
        assert!(readme.contains("### Static mode"));
    }

    #[test]
    fn test_keys_are_distinct() {
        let widgets = vec![
            WidgetInstance::new("a", "auth-status"),
            WidgetInstance::new("b", "session-count"),
            WidgetInstance::new("c", "cron-jobs"),
            WidgetInstance::new("x", "not-a-widget"),
        ];
        assert_eq!(required_api_keys(builtin(), &widgets), vec!["OPENCLAW_API"]);
        assert!(needs_companion_server(&widgets));
        assert!(!needs_companion_server(&[WidgetInstance::new("t", "topbar")]));
    }
}
