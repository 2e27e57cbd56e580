// Built-in widget definitions, grouped the way the builder palette shows them
pub mod large;
pub mod navigation;
pub mod small;

use crate::application::template::fill_template;
use crate::domain::markup::{escape_html, escape_js};
use crate::domain::widget::{ResolvedProps, WidgetError};

const POLLING_SCRIPT: &str = r##"
      // ${label} Widget: ${id}
      async function ${fn}() {
        try {
${body}
        } catch (e) {
${on_error}
        }
      }
      ${fn}();
      setInterval(${fn}, ${ms});
    "##;

/// An async `update_<id>` function that runs once and then every `refreshInterval` seconds.
///
/// `body` and `on_error` are trusted templates; `vars` fill their placeholders
/// alongside `id` (JS-escaped), `fn` and `ms`.
pub(crate) fn polling_script(
    label: &str,
    props: &ResolvedProps<'_>,
    body: &str,
    on_error: &str,
    vars: &[(&str, &str)],
) -> Result<String, WidgetError> {
    let ms = props.interval_ms("refreshInterval")?.to_string();
    let function = props.function_name("update");
    let id = escape_js(props.id());

    let script = fill_template(POLLING_SCRIPT, &[("body", body), ("on_error", on_error)]);

    let mut all: Vec<(&str, &str)> = vec![("label", label), ("fn", &function), ("id", &id), ("ms", &ms)];
    all.extend_from_slice(vars);
    Ok(fill_template(&script, &all))
}

/// Fill an HTML template with the escaped `id` and `title` plus extra vars.
pub(crate) fn card_html(template: &str, props: &ResolvedProps<'_>, vars: &[(&str, &str)]) -> String {
    let id = escape_html(props.id());
    let title = escape_html(&props.text("title"));

    let mut all: Vec<(&str, &str)> = vec![("id", &id), ("title", &title)];
    all.extend_from_slice(vars);
    fill_template(template, &all)
}

/// A positive count property rendered as a whole number.
pub(crate) fn whole_number(props: &ResolvedProps<'_>, key: &str) -> String {
    props.count(key).to_string()
}
