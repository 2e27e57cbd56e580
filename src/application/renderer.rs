// Widget renderer - one instance in, positioned HTML fragment and script out
use crate::application::html_processing::strip_header;
use crate::application::template::fill_template;
use crate::application::widget_registry::WidgetRegistry;
use crate::domain::dashboard::WidgetInstance;
use crate::domain::markup::escape_html;
use crate::domain::widget::{ResolvedProps, WidgetError};

const CONTAINER: &str = r##"
    <div class="widget-container" data-widget-id="${id}" style="position:absolute;left:${x}px;top:${y}px;width:${width}px;height:${height}px;">
      ${html}
    </div>"##;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedWidget {
    pub html: String,
    pub js: String,
}

#[derive(Debug, Clone, Copy)]
pub struct WidgetRenderer<'r> {
    registry: &'r WidgetRegistry,
}

impl<'r> WidgetRenderer<'r> {
    pub fn new(registry: &'r WidgetRegistry) -> Self {
        Self { registry }
    }

    /// Render one instance. Unknown types and failing generators yield an
    /// empty contribution rather than an error.
    pub fn render(&self, instance: &WidgetInstance) -> RenderedWidget {
        let Some(definition) = self.registry.lookup(&instance.widget_type) else {
            tracing::warn!(
                "Skipping widget {}: unknown type '{}'",
                instance.id,
                instance.widget_type
            );
            return RenderedWidget::default();
        };

        let props = ResolvedProps::new(&instance.id, &instance.properties, definition.defaults);
        let rendered = (definition.generate_html)(&props).and_then(|html| {
            let js = match definition.generate_js {
                Some(generate) => generate(&props)?,
                None => String::new(),
            };
            Ok::<_, WidgetError>(RenderedWidget {
                html: wrap_positioned(instance, &strip_header(&html, props.show_header())),
                js,
            })
        });

        match rendered {
            Ok(rendered) => {
                tracing::debug!("Rendered widget {} ({})", instance.id, instance.widget_type);
                rendered
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping widget {} ({}): {}",
                    instance.id,
                    instance.widget_type,
                    e
                );
                RenderedWidget::default()
            }
        }
    }
}

/// Absolutely positioned container; coordinates are emitted unclamped.
fn wrap_positioned(instance: &WidgetInstance, html: &str) -> String {
    let id = escape_html(&instance.id);
    let x = instance.x.to_string();
    let y = instance.y.to_string();
    let width = instance.width.to_string();
    let height = instance.height.to_string();
    fill_template(
        CONTAINER,
        &[
            ("id", &id),
            ("x", &x),
            ("y", &y),
            ("width", &width),
            ("height", &height),
            ("html", html),
        ],
    )
}
