// Navigation widgets: page menu and top bar
use super::{card_html, polling_script};
use crate::application::template::fill_template;
use crate::domain::markup::{escape_html, escape_js};
use crate::domain::widget::{
    DefaultValue, ResolvedProps, WidgetCategory, WidgetDefinition, WidgetError,
};

pub const PAGES_MENU: WidgetDefinition = WidgetDefinition {
    key: "pages-menu",
    name: "Pages Menu",
    icon: "📑",
    category: Some(WidgetCategory::Small),
    description: "Navigation links to all discovered LobsterBoard pages. Supports vertical or horizontal layout.",
    default_width: 220,
    default_height: 200,
    api_key_name: None,
    defaults: &[
        ("title", DefaultValue::Text("Pages")),
        ("layout", DefaultValue::Text("vertical")),
        ("refreshInterval", DefaultValue::Number(60)),
    ],
    preview: r##"<div style="padding:6px;font-size:11px;color:#8b949e;">
      <div>📝 Notes</div>
      <div>📋 Board</div>
      <div>📅 Calendar</div>
    </div>"##,
    generate_html: pages_menu_html,
    generate_js: Some(pages_menu_js),
};

const PAGES_ENDPOINT: &str = "/api/pages";

fn pages_menu_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let layout = if props.text("layout") == "horizontal" {
        "pages-menu-horizontal"
    } else {
        "pages-menu-vertical"
    };
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">📑 ${title}</span>
        </div>
        <div class="dash-card-body pages-menu ${layout}" id="${id}-list">
          <span class="pages-menu-item">Loading…</span>
        </div>
      </div>
      <style>
        .pages-menu-vertical { display:flex; flex-direction:column; gap:4px; overflow-y:auto; }
        .pages-menu-horizontal { display:flex; flex-direction:row; flex-wrap:wrap; gap:6px; align-items:center; }
        .pages-menu-item {
          display:inline-flex; align-items:center; gap:6px;
          padding:6px 10px; border-radius:6px;
          background:#21262d; color:#c9d1d9;
          text-decoration:none; font-size:13px;
          transition: background .15s, color .15s;
        }
        .pages-menu-item:hover { background:#30363d; color:#58a6ff; }
        .pages-menu-item .pages-menu-icon { font-size:15px; }
      </style>"##,
        props,
        &[("layout", layout)],
    ))
}

fn pages_menu_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    polling_script(
        "Pages Menu",
        props,
        r##"          const res = await fetch('${endpoint}');
          const pages = await res.json();
          const list = document.getElementById('${id}-list');
          if (!pages.length) { list.innerHTML = '<span class="pages-menu-item">No pages found</span>'; return; }
          list.innerHTML = pages.map(p =>
            '<a class="pages-menu-item" href="/pages/' + p.id + '" title="' + (p.description || p.title || p.name || '') + '">' +
            '<span class="pages-menu-icon">' + (p.icon || '📄') + '</span>' +
            '<span>' + (p.title || p.name || p.id) + '</span></a>'
          ).join('');"##,
        r##"          console.error('Pages menu widget error:', e);
          document.getElementById('${id}-list').innerHTML = '<span class="pages-menu-item">Error loading pages</span>';"##,
        &[("endpoint", PAGES_ENDPOINT)],
    )
}

pub const TOPBAR: WidgetDefinition = WidgetDefinition {
    key: "topbar",
    name: "Top Nav Bar",
    icon: "🔝",
    category: Some(WidgetCategory::Bar),
    description: "Navigation bar with clock, weather, and system stats.",
    default_width: 1920,
    default_height: 48,
    api_key_name: None,
    defaults: &[
        ("title", DefaultValue::Text("OpenClaw")),
        ("links", DefaultValue::Text("Dashboard,Activity,Settings")),
    ],
    preview: r##"<div style="background:#161b22;padding:8px;font-size:11px;display:flex;gap:12px;">
      <span>🤖 OpenClaw</span>
      <span style="color:#58a6ff;">Dashboard</span>
    </div>"##,
    generate_html: topbar_html,
    generate_js: Some(topbar_js),
};

fn topbar_links(links: &str) -> String {
    links
        .split(',')
        .enumerate()
        .map(|(i, link)| {
            let active = if i == 0 { " active" } else { "" };
            format!(
                r##"<a href="#" class="topbar-link{}">{}</a>"##,
                active,
                escape_html(link.trim())
            )
        })
        .collect()
}

fn topbar_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let links = topbar_links(&props.text("links"));
    Ok(card_html(
        r##"
      <nav class="topbar" id="widget-${id}">
        <div class="topbar-left">
          <span class="topbar-brand">🤖 ${title}</span>
          ${links}
        </div>
        <div class="topbar-right">
          <span class="topbar-meta" id="${id}-refresh">—</span>
          <button class="topbar-refresh" onclick="location.reload()" title="Refresh">↻</button>
        </div>
      </nav>"##,
        props,
        &[("links", &links)],
    ))
}

fn topbar_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let id = escape_js(props.id());
    Ok(fill_template(
        r##"
      // Top Bar Widget: ${id}
      document.getElementById('${id}-refresh').textContent =
        new Date().toLocaleTimeString('en-US', { hour: 'numeric', minute: '2-digit' });
    "##,
        &[("id", &id)],
    ))
}
