// Large content cards backed by OpenClaw endpoints
use super::{card_html, polling_script, whole_number};
use crate::domain::markup::escape_js;
use crate::domain::widget::{
    DefaultValue, ResolvedProps, WidgetCategory, WidgetDefinition, WidgetError,
};

pub const ACTIVITY_LIST: WidgetDefinition = WidgetDefinition {
    key: "activity-list",
    name: "Activity List",
    icon: "📋",
    category: Some(WidgetCategory::Large),
    description: "Shows recent OpenClaw activity from /api/activity endpoint.",
    default_width: 400,
    default_height: 300,
    api_key_name: Some("OPENCLAW_API"),
    defaults: &[
        ("title", DefaultValue::Text("Today")),
        ("endpoint", DefaultValue::Text("/api/activity")),
        ("maxItems", DefaultValue::Number(10)),
        ("refreshInterval", DefaultValue::Number(60)),
    ],
    preview: r##"<div style="padding:4px;font-size:11px;color:#8b949e;">
      <div>• Meeting at 2pm</div>
      <div>• Review PR #42</div>
      <div>• Deploy v1.2</div>
    </div>"##,
    generate_html: activity_list_html,
    generate_js: Some(activity_list_js),
};

fn activity_list_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">📋 ${title}</span>
          <span class="dash-card-badge" id="${id}-badge">—</span>
        </div>
        <div class="dash-card-body compact-list" id="${id}-list">
          <div class="list-item">• Team standup at 10am</div>
          <div class="list-item">• Review PR #42</div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

fn activity_list_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let endpoint = escape_js(&props.text("endpoint"));
    let max_items = whole_number(props, "maxItems");
    polling_script(
        "Activity List",
        props,
        r##"          const res = await fetch('${endpoint}');
          const json = await res.json();
          const data = json.data || json;
          const list = document.getElementById('${id}-list');
          const badge = document.getElementById('${id}-badge');
          const items = data.items || [];
          list.innerHTML = items.slice(0, ${max_items}).map(item =>
            '<div class="list-item">' + item.text + '</div>'
          ).join('');
          badge.textContent = items.length + ' items';"##,
        r##"          console.error('Activity list widget error:', e);
          document.getElementById('${id}-list').innerHTML = '<div class="list-item">—</div>';"##,
        &[("endpoint", &endpoint), ("max_items", &max_items)],
    )
}

pub const CRON_JOBS: WidgetDefinition = WidgetDefinition {
    key: "cron-jobs",
    name: "Cron Jobs",
    icon: "⏰",
    category: Some(WidgetCategory::Large),
    description: "Lists scheduled cron jobs from OpenClaw /api/cron endpoint.",
    default_width: 400,
    default_height: 250,
    api_key_name: Some("OPENCLAW_API"),
    defaults: &[
        ("title", DefaultValue::Text("Cron")),
        ("endpoint", DefaultValue::Text("/api/cron")),
        ("refreshInterval", DefaultValue::Number(30)),
    ],
    preview: r##"<div style="padding:4px;font-size:11px;color:#8b949e;">
      <div>⏰ Daily backup - 2am</div>
      <div>⏰ Sync data - */5 *</div>
    </div>"##,
    generate_html: cron_jobs_html,
    generate_js: Some(cron_jobs_js),
};

fn cron_jobs_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">⏰ ${title}</span>
          <span class="dash-card-badge" id="${id}-badge">—</span>
        </div>
        <div class="dash-card-body" id="${id}-list">
          <div class="cron-item"><span class="cron-name">Daily backup</span><span class="cron-next">2:00 AM</span></div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

fn cron_jobs_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let endpoint = escape_js(&props.text("endpoint"));
    polling_script(
        "Cron Jobs",
        props,
        r##"          const res = await fetch('${endpoint}');
          const json = await res.json();
          const data = json.data || json;
          const list = document.getElementById('${id}-list');
          const badge = document.getElementById('${id}-badge');
          const jobs = data.jobs || [];
          list.innerHTML = jobs.map(job =>
            '<div class="cron-item"><span class="cron-name">' + job.name + '</span><span class="cron-next">' + job.next + '</span></div>'
          ).join('');
          badge.textContent = jobs.length + ' jobs';"##,
        r##"          console.error('Cron jobs widget error:', e);
          document.getElementById('${id}-list').innerHTML = '<div class="cron-item"><span class="cron-name">—</span></div>';"##,
        &[("endpoint", &endpoint)],
    )
}

pub const SYSTEM_LOG: WidgetDefinition = WidgetDefinition {
    key: "system-log",
    name: "System Log",
    icon: "🔧",
    category: Some(WidgetCategory::Large),
    description: "Shows recent system logs from OpenClaw /api/logs endpoint.",
    default_width: 500,
    default_height: 400,
    api_key_name: Some("OPENCLAW_API"),
    defaults: &[
        ("title", DefaultValue::Text("System Log")),
        ("endpoint", DefaultValue::Text("/api/logs")),
        ("maxLines", DefaultValue::Number(50)),
        ("refreshInterval", DefaultValue::Number(10)),
    ],
    preview: r##"<div style="padding:4px;font-size:10px;font-family:monospace;color:#8b949e;">
      <div>[INFO] System started</div>
      <div>[DEBUG] Loading config</div>
    </div>"##,
    generate_html: system_log_html,
    generate_js: Some(system_log_js),
};

fn system_log_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">🔧 ${title}</span>
          <span class="dash-card-badge" id="${id}-badge">—</span>
        </div>
        <div class="dash-card-body compact-list syslog-scroll" id="${id}-log">
          <div class="log-line">[INFO] System started successfully</div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

fn system_log_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let endpoint = escape_js(&props.text("endpoint"));
    let max_lines = whole_number(props, "maxLines");
    polling_script(
        "System Log",
        props,
        r##"          const res = await fetch('${endpoint}');
          const json = await res.json();
          const data = json.data || json;
          const log = document.getElementById('${id}-log');
          const badge = document.getElementById('${id}-badge');
          const lines = data.lines || [];
          log.innerHTML = lines.slice(-${max_lines}).map(line =>
            '<div class="log-line">' + line + '</div>'
          ).join('');
          badge.textContent = lines.length + ' lines';
          log.scrollTop = log.scrollHeight;"##,
        r##"          console.error('System log widget error:', e);
          document.getElementById('${id}-log').innerHTML = '<div class="log-line">—</div>';"##,
        &[("endpoint", &endpoint), ("max_lines", &max_lines)],
    )
}
