// Small KPI-style cards
use super::{card_html, polling_script};
use crate::application::template::fill_template;
use crate::domain::markup::{escape_html, escape_js};
use crate::domain::widget::{
    DefaultValue, ResolvedProps, WidgetCategory, WidgetDefinition, WidgetError,
};
use once_cell::sync::Lazy;
use regex::Regex;

pub const WEATHER: WidgetDefinition = WidgetDefinition {
    key: "weather",
    name: "Local Weather",
    icon: "🌡️",
    category: Some(WidgetCategory::Small),
    description: "Shows current weather for a single location using wttr.in (no API key needed).",
    default_width: 200,
    default_height: 120,
    api_key_name: None,
    defaults: &[
        ("title", DefaultValue::Text("Local Weather")),
        ("location", DefaultValue::Text("Atlanta")),
        ("units", DefaultValue::Text("F")),
        ("refreshInterval", DefaultValue::Number(600)),
    ],
    preview: r##"<div style="text-align:center;padding:8px;">
      <div style="font-size:24px;">72°F</div>
      <div style="font-size:11px;color:#8b949e;">Atlanta</div>
    </div>"##,
    generate_html: weather_html,
    generate_js: Some(weather_js),
};

fn weather_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let location = escape_html(&props.text("location"));
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">🌡️ ${title}</span>
        </div>
        <div class="dash-card-body" style="display:flex;align-items:center;justify-content:center;gap:10px;">
          <span id="${id}-icon" style="font-size:24px;">🌡️</span>
          <div>
            <div class="kpi-value blue" id="${id}-value">—</div>
            <div class="kpi-label" id="${id}-label">${location}</div>
          </div>
        </div>
      </div>"##,
        props,
        &[("location", &location)],
    ))
}

fn weather_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let location = escape_js(&props.text("location"));
    let celsius = props.text("units") == "C";
    let (field, unit) = if celsius {
        ("temp_C", "°C")
    } else {
        ("temp_F", "°F")
    };
    polling_script(
        "Weather",
        props,
        r##"          const location = encodeURIComponent('${location}');
          const res = await fetch('https://wttr.in/' + location + '?format=j1');
          const data = await res.json();
          const current = data.current_condition[0];
          document.getElementById('${id}-value').textContent = current.${field} + '${unit}';
          document.getElementById('${id}-label').textContent = current.weatherDesc[0].value;
          const code = parseInt(current.weatherCode);
          let icon = '🌡️';
          if (code === 113) icon = '☀️';
          else if (code === 116 || code === 119) icon = '⛅';
          else if (code >= 176 && code <= 359) icon = '🌧️';
          else if (code >= 368 && code <= 395) icon = '❄️';
          document.getElementById('${id}-icon').textContent = icon;"##,
        r##"          console.error('Weather widget error:', e);
          document.getElementById('${id}-value').textContent = '—';"##,
        &[("location", &location), ("field", field), ("unit", unit)],
    )
}

pub const CLOCK: WidgetDefinition = WidgetDefinition {
    key: "clock",
    name: "Clock",
    icon: "🕐",
    category: Some(WidgetCategory::Small),
    description: "Simple digital clock. Supports 12h or 24h format.",
    default_width: 200,
    default_height: 120,
    api_key_name: None,
    defaults: &[
        ("title", DefaultValue::Text("Clock")),
        ("timezone", DefaultValue::Text("local")),
        ("format24h", DefaultValue::Flag(false)),
    ],
    preview: r##"<div style="text-align:center;padding:8px;">
      <div style="font-size:24px;">3:45 PM</div>
      <div style="font-size:11px;color:#8b949e;">Wed, Feb 5</div>
    </div>"##,
    generate_html: clock_html,
    generate_js: Some(clock_js),
};

pub const CLOCK_TICK_MS: u64 = 1000;

fn clock_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">🕐 ${title}</span>
        </div>
        <div class="dash-card-body" style="display:flex;flex-direction:column;align-items:center;justify-content:center;">
          <div class="kpi-value" id="${id}-time">—</div>
          <div class="kpi-label" id="${id}-date">—</div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

/// IANA-shaped zone names (`Area/Location`, `UTC`, `Etc/GMT+5`).
static TIME_ZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_+\-]*(/[A-Za-z0-9_+\-]+)*$").expect("valid zone regex")
});

/// The configured zone, or `None` for the browser's own zone.
fn clock_time_zone(props: &ResolvedProps<'_>) -> Option<String> {
    let timezone = props.text("timezone");
    if timezone.eq_ignore_ascii_case("local") {
        return None;
    }
    if !TIME_ZONE_RE.is_match(&timezone) {
        tracing::warn!("Clock {}: ignoring malformed timezone '{}'", props.id(), timezone);
        return None;
    }
    Some(timezone)
}

fn clock_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let id = escape_js(props.id());
    let function = props.function_name("updateClock");
    let hour12 = (!props.flag("format24h")).to_string();
    let zone = match clock_time_zone(props) {
        Some(zone) => format!(
            "\n        timeOpts.timeZone = dateOpts.timeZone = '{}';",
            escape_js(&zone)
        ),
        None => String::new(),
    };
    let tick = CLOCK_TICK_MS.to_string();

    // A zone the browser rejects throws RangeError; retry in the local zone.
    Ok(fill_template(
        r##"
      // Clock Widget: ${id}
      function ${fn}() {
        const now = new Date();
        const timeEl = document.getElementById('${id}-time');
        const dateEl = document.getElementById('${id}-date');
        const timeOpts = { hour: 'numeric', minute: '2-digit', hour12: ${hour12} };
        const dateOpts = { weekday: 'short', month: 'short', day: 'numeric' };${zone}
        try {
          timeEl.textContent = now.toLocaleTimeString('en-US', timeOpts);
          dateEl.textContent = now.toLocaleDateString('en-US', dateOpts);
        } catch (e) {
          delete timeOpts.timeZone;
          delete dateOpts.timeZone;
          timeEl.textContent = now.toLocaleTimeString('en-US', timeOpts);
          dateEl.textContent = now.toLocaleDateString('en-US', dateOpts);
        }
      }
      ${fn}();
      setInterval(${fn}, ${tick});
    "##,
        &[
            ("id", &id),
            ("fn", &function),
            ("hour12", &hour12),
            ("zone", &zone),
            ("tick", &tick),
        ],
    ))
}

pub const AUTH_STATUS: WidgetDefinition = WidgetDefinition {
    key: "auth-status",
    name: "Auth Status",
    icon: "🔐",
    category: Some(WidgetCategory::Small),
    description: "Shows if OpenClaw is using Anthropic Max subscription (green) or API key fallback (yellow).",
    default_width: 180,
    default_height: 100,
    api_key_name: Some("OPENCLAW_API"),
    defaults: &[
        ("title", DefaultValue::Text("Auth Type")),
        ("endpoint", DefaultValue::Text("/api/status")),
        ("refreshInterval", DefaultValue::Number(30)),
    ],
    preview: r##"<div style="text-align:center;padding:8px;">
      <div style="width:10px;height:10px;background:#3fb950;border-radius:50%;margin:0 auto 4px;"></div>
      <div style="font-size:13px;">OAuth</div>
      <div style="font-size:11px;color:#8b949e;">Auth</div>
    </div>"##,
    generate_html: auth_status_html,
    generate_js: Some(auth_status_js),
};

fn auth_status_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="dash-card" id="widget-${id}" style="height:100%;">
        <div class="dash-card-head">
          <span class="dash-card-title">🔐 ${title}</span>
        </div>
        <div class="dash-card-body" style="display:flex;align-items:center;justify-content:center;gap:10px;">
          <div class="kpi-indicator" id="${id}-dot"></div>
          <div class="kpi-value" id="${id}-value">—</div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

fn auth_status_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let endpoint = escape_js(&props.text("endpoint"));
    polling_script(
        "Auth Status",
        props,
        r##"          const res = await fetch('${endpoint}');
          const json = await res.json();
          const data = json.data || json;
          const dot = document.getElementById('${id}-dot');
          const val = document.getElementById('${id}-value');
          val.textContent = data.authMode === 'oauth' ? 'Subscription' : 'API';
          dot.className = 'kpi-indicator ' + (data.authMode === 'oauth' ? 'green' : 'yellow');"##,
        r##"          console.error('Auth status widget error:', e);
          document.getElementById('${id}-value').textContent = '—';"##,
        &[("endpoint", &endpoint)],
    )
}

pub const SESSION_COUNT: WidgetDefinition = WidgetDefinition {
    key: "session-count",
    name: "Active Sessions",
    icon: "💬",
    category: Some(WidgetCategory::Small),
    description: "Shows count of active OpenClaw sessions.",
    default_width: 160,
    default_height: 100,
    api_key_name: Some("OPENCLAW_API"),
    defaults: &[
        ("title", DefaultValue::Text("Sessions")),
        ("endpoint", DefaultValue::Text("/api/sessions")),
        ("refreshInterval", DefaultValue::Number(30)),
    ],
    preview: r##"<div style="text-align:center;padding:8px;">
      <div style="font-size:28px;color:#58a6ff;">3</div>
      <div style="font-size:11px;color:#8b949e;">Active</div>
    </div>"##,
    generate_html: session_count_html,
    generate_js: Some(session_count_js),
};

fn session_count_html(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    Ok(card_html(
        r##"
      <div class="kpi-card kpi-sm" id="widget-${id}">
        <div class="kpi-icon">💬</div>
        <div class="kpi-data">
          <div class="kpi-value blue" id="${id}-count">—</div>
          <div class="kpi-label">Active</div>
        </div>
      </div>"##,
        props,
        &[],
    ))
}

fn session_count_js(props: &ResolvedProps<'_>) -> Result<String, WidgetError> {
    let endpoint = escape_js(&props.text("endpoint"));
    polling_script(
        "Session Count",
        props,
        r##"          const res = await fetch('${endpoint}');
          const json = await res.json();
          const data = json.data || json;
          document.getElementById('${id}-count').textContent = data.active || data.length || 0;"##,
        r##"          document.getElementById('${id}-count').textContent = '—';"##,
        &[("endpoint", &endpoint)],
    )
}
