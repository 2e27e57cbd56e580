// Dashboard composer - configuration in, HTML/CSS/JS bundle out
use crate::application::edit_mode::edit_script;
use crate::application::readme::generate_readme;
use crate::application::renderer::{RenderedWidget, WidgetRenderer};
use crate::application::stylesheet::{STYLESHEET_PATH, dashboard_css};
use crate::application::template::fill_template;
use crate::application::widget_registry::WidgetRegistry;
use crate::domain::dashboard::{DashboardConfig, GeneratedOutput, WidgetInstance};

pub const SCRIPT_PATH: &str = "js/dashboard.js";

const DOCUMENT: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>My LobsterBoard Dashboard</title>
  <link rel="stylesheet" href="${stylesheet}">
</head>
<body>
  <main class="dashboard" style="width:${width}px;height:${height}px;position:relative;">
    ${widgets}
  </main>
  <script src="${script}"></script>
</body>
</html>"##;

const BUNDLE: &str = r##"/**
 * LobsterBoard Dashboard - Generated JavaScript
 * Replace YOUR_*_API_KEY placeholders with your actual API keys
 */

document.addEventListener('DOMContentLoaded', () => {
  console.log('Dashboard loaded');
});

${widgets}

${edit}
"##;

#[derive(Debug, Clone, Copy)]
pub struct DashboardComposer<'r> {
    registry: &'r WidgetRegistry,
    renderer: WidgetRenderer<'r>,
}

impl<'r> DashboardComposer<'r> {
    pub fn new(registry: &'r WidgetRegistry) -> Self {
        Self {
            registry,
            renderer: WidgetRenderer::new(registry),
        }
    }

    /// Compose every artifact. Never fails: bad widgets contribute nothing.
    pub fn compose(&self, config: &DashboardConfig) -> GeneratedOutput {
        let rendered = self.render_all(&config.widgets);
        tracing::debug!(
            "Composed dashboard with {} widgets ({} with scripts)",
            rendered.len(),
            rendered.iter().filter(|r| !r.js.is_empty()).count()
        );

        GeneratedOutput {
            html: self.document(config, &rendered),
            css: dashboard_css().to_string(),
            js: self.bundle(&rendered),
            readme: generate_readme(self.registry, &config.widgets),
        }
    }

    pub fn generate_html(&self, config: &DashboardConfig) -> String {
        self.document(config, &self.render_all(&config.widgets))
    }

    pub fn generate_js(&self, widgets: &[WidgetInstance]) -> String {
        self.bundle(&self.render_all(widgets))
    }

    fn render_all(&self, widgets: &[WidgetInstance]) -> Vec<RenderedWidget> {
        widgets.iter().map(|w| self.renderer.render(w)).collect()
    }

    fn document(&self, config: &DashboardConfig, rendered: &[RenderedWidget]) -> String {
        let widgets = rendered
            .iter()
            .map(|r| r.html.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let width = config.canvas.width.to_string();
        let height = config.canvas.height.to_string();

        fill_template(
            DOCUMENT,
            &[
                ("stylesheet", STYLESHEET_PATH),
                ("script", SCRIPT_PATH),
                ("width", &width),
                ("height", &height),
                ("widgets", &widgets),
            ],
        )
    }

    fn bundle(&self, rendered: &[RenderedWidget]) -> String {
        let widgets = rendered
            .iter()
            .filter(|r| !r.js.is_empty())
            .map(|r| r.js.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        fill_template(BUNDLE, &[("widgets", &widgets), ("edit", edit_script())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::widget_registry::builtin;
    use crate::domain::dashboard::Canvas;
    use serde_json::json;

    fn scenario() -> DashboardConfig {
        serde_json::from_value(json!({
            "canvas": {"width": 800, "height": 600},
            "widgets": [{
                "id": "c1", "type": "clock", "x": 10, "y": 10, "width": 200, "height": 120,
                "properties": {"format24h": true}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_clock_scenario() {
        let output = DashboardComposer::new(builtin()).compose(&scenario());

        assert!(output.html.starts_with("<!DOCTYPE html>"));
        assert!(output.html.contains(r#"<link rel="stylesheet" href="css/style.css">"#));
        assert!(output.html.contains(r#"<script src="js/dashboard.js"></script>"#));
        assert!(output.html.contains(
            r#"<main class="dashboard" style="width:800px;height:600px;position:relative;">"#
        ));
        assert!(output.html.contains("left:10px;top:10px;width:200px;height:120px;"));
        assert!(output.html.contains(r#"class="dash-card" id="widget-c1""#));

        assert!(output.js.contains("document.getElementById('c1-time')"));
        assert!(output.js.contains("document.getElementById('c1-date')"));
        assert!(output.js.contains("      updateClock_c1();\n"));
        assert!(output.js.contains("setInterval(updateClock_c1, 1000);"));
        assert!(output.js.contains("hour12: false"));
        assert_eq!(output.css, dashboard_css());
    }

    #[test]
    fn test_bundle_order() {
        let output = DashboardComposer::new(builtin()).compose(&scenario());
        let bootstrap = output.js.find("DOMContentLoaded', () =>").unwrap();
        let clock = output.js.find("updateClock_c1").unwrap();
        let editor = output.js.find("POST-EXPORT LAYOUT EDITING").unwrap();
        assert!(bootstrap < clock && clock < editor);
        assert!(output.js.ends_with(&format!("{}\n", edit_script())));
    }

    #[test]
    fn test_deterministic() {
        let config: DashboardConfig = serde_json::from_value(json!({
            "canvas": {"width": 1920, "height": 1080},
            "widgets": [
                {"id": "top", "type": "topbar", "x": 0, "y": 0, "width": 1920, "height": 48,
                 "properties": {"links": "A,B", "title": "Ops"}},
                {"id": "w", "type": "weather", "x": 0, "y": 60, "width": 200, "height": 120,
                 "properties": {"units": "C", "location": "Oslo", "zeta": 1, "alpha": 2}},
                {"id": "log", "type": "system-log", "x": 220, "y": 60, "width": 500, "height": 400}
            ]
        }))
        .unwrap();
        let composer = DashboardComposer::new(builtin());
        assert_eq!(composer.compose(&config), composer.compose(&config.clone()));
    }

    #[test]
    fn test_unknown_type_among_valid() {
        let config = DashboardConfig::new(
            Canvas::default(),
            vec![
                WidgetInstance::new("c1", "clock").at(0.0, 0.0, 200.0, 120.0),
                WidgetInstance::new("ghost", "does-not-exist").at(0.0, 0.0, 10.0, 10.0),
                WidgetInstance::new("s1", "session-count").at(0.0, 0.0, 160.0, 100.0),
            ],
        );
        let composer = DashboardComposer::new(builtin());
        let output = composer.compose(&config);
        assert!(!output.html.contains("ghost"));
        assert!(!output.js.contains("ghost"));
        assert!(output.html.contains(r#"data-widget-id="c1""#));
        assert!(output.html.contains(r#"data-widget-id="s1""#));
        assert!(output.js.contains("updateClock_c1"));
        assert!(output.js.contains("update_s1"));

        // The unknown widget leaves no gap in the script bundle.
        let without = DashboardConfig::new(
            Canvas::default(),
            vec![config.widgets[0].clone(), config.widgets[2].clone()],
        );
        assert_eq!(composer.generate_js(&without.widgets), output.js);
    }

    #[test]
    fn test_identifier_safety() {
        let config = DashboardConfig::new(
            Canvas::default(),
            vec![
                WidgetInstance::new("a-1", "cron-jobs").at(0.0, 0.0, 400.0, 250.0),
                WidgetInstance::new("a-2", "cron-jobs").at(0.0, 260.0, 400.0, 250.0),
            ],
        );
        let js = DashboardComposer::new(builtin()).generate_js(&config.widgets);
        assert!(js.contains("async function update_a_1()"));
        assert!(js.contains("async function update_a_2()"));
        assert_eq!(js.matches("async function update_a_1()").count(), 1);
        assert_eq!(js.matches("async function update_a_2()").count(), 1);
    }

    /// Brackets balance outside string literals and comments.
    fn assert_balanced(js: &str) {
        let mut stack = Vec::new();
        let mut chars = js.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\'' | '"' => {
                    while let Some(inner) = chars.next() {
                        match inner {
                            '\\' => {
                                chars.next();
                            }
                            '\n' => panic!("unterminated string literal"),
                            _ if inner == c => break,
                            _ => {}
                        }
                    }
                }
                '/' if chars.peek() == Some(&'/') => {
                    while chars.next_if(|&next| next != '\n').is_some() {}
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    let mut last = ' ';
                    for inner in chars.by_ref() {
                        if last == '*' && inner == '/' {
                            break;
                        }
                        last = inner;
                    }
                }
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    assert_eq!(stack.pop(), Some(expected), "mismatched {:?}", c);
                }
                '`' => panic!("unexpected template literal"),
                _ => {}
            }
        }
        assert!(stack.is_empty(), "unclosed brackets: {:?}", stack);
    }

    #[test]
    fn test_bundle_is_well_formed_for_every_type() {
        let mut widgets: Vec<WidgetInstance> = builtin()
            .list_types()
            .into_iter()
            .map(|key| WidgetInstance::new(format!("d-{}", key), key).at(0.0, 0.0, 300.0, 200.0))
            .collect();
        let hostile: DashboardConfig = serde_json::from_value(json!({
            "widgets": [
                {"id": "log 1", "type": "system-log", "x": 0, "y": 0, "width": 400, "height": 300,
                 "properties": {"maxLines": -3, "endpoint": "/api/logs?a='b'"}},
                {"id": "act.1", "type": "activity-list", "x": 0, "y": 0, "width": 400, "height": 300,
                 "properties": {"maxItems": -1, "title": "It's \"live\""}},
                {"id": "c'2", "type": "clock", "x": 0, "y": 0, "width": 200, "height": 120,
                 "properties": {"timezone": "Europe/Paris'); alert(1); ('"}},
                {"id": "w2", "type": "weather", "x": 0, "y": 0, "width": 200, "height": 120,
                 "properties": {"location": "St. John's\\\nNL", "units": "C"}},
                {"id": "t2", "type": "topbar", "x": 0, "y": 0, "width": 800, "height": 48,
                 "properties": {"title": "O'Neil {ops}", "links": "A (1),B [2]"}}
            ]
        }))
        .unwrap();
        widgets.extend(hostile.widgets);
        let config = DashboardConfig::new(Canvas::default(), widgets);

        let output = DashboardComposer::new(builtin()).compose(&config);
        for text in [&output.html, &output.js] {
            assert!(!text.contains("${"), "unfilled placeholder");
        }
        let negated_literal = output
            .js
            .as_bytes()
            .windows(3)
            .any(|w| w[0] == b'-' && w[1] == b'-' && w[2].is_ascii_digit());
        assert!(!negated_literal);
        assert!(output.js.contains("lines.slice(-50)"));
        assert!(output.js.contains("items.slice(0, 10)"));
        assert_balanced(&output.js);
    }

    #[test]
    fn test_empty_dashboard() {
        let output = DashboardComposer::new(builtin()).compose(&DashboardConfig::default());
        assert!(output.html.contains("width:1920px;height:1080px;"));
        assert!(!output.html.contains("widget-container"));
        assert!(output.js.contains(edit_script()));
    }
}
