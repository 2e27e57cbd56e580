// Post-export layout editor injected into every dashboard bundle
//
// The script is a two-state machine (view <-> edit) driven by a floating
// toggle button. Drag/resize values are clamped while moving and snapped to
// the grid on release; leaving edit mode persists the layout to localStorage.
use crate::application::template::fill_template;
use once_cell::sync::Lazy;

pub const STORAGE_KEY: &str = "lobsterboard-layout";
pub const GRID_SIZE: i64 = 20;
pub const MIN_WIDTH: i64 = 100;
pub const MIN_HEIGHT: i64 = 60;

const EDIT_SCRIPT: &str = r##"
// ─────────────────────────────────────────────
// POST-EXPORT LAYOUT EDITING
// ─────────────────────────────────────────────

(function() {
  const STORAGE_KEY = '${storage_key}';
  const GRID_SIZE = ${grid_size};
  const MIN_WIDTH = ${min_width};
  const MIN_HEIGHT = ${min_height};

  let editMode = false;
  let activeWidget = null;
  let startX, startY, origLeft, origTop, origWidth, origHeight;
  let isResizing = false;

  document.addEventListener('DOMContentLoaded', initEditMode);

  function initEditMode() {
    const btn = document.createElement('button');
    btn.id = 'edit-toggle';
    btn.textContent = '✏️ Edit Layout';
    btn.onclick = toggleEditMode;
    document.body.appendChild(btn);
    document.querySelectorAll('.widget-container').forEach(initWidget);
    loadPositions();
  }

  function initWidget(widget) {
    const handle = document.createElement('div');
    handle.className = 'resize-handle-edit';
    widget.appendChild(handle);
    widget.addEventListener('mousedown', onWidgetMouseDown);
    handle.addEventListener('mousedown', onResizeMouseDown);
  }

  function toggleEditMode() {
    editMode = !editMode;
    document.body.classList.toggle('edit-mode', editMode);
    const btn = document.getElementById('edit-toggle');
    btn.classList.toggle('active', editMode);
    btn.textContent = editMode ? '💾 Save Layout' : '✏️ Edit Layout';
    if (!editMode) savePositions();
  }

  function onWidgetMouseDown(e) {
    if (!editMode) return;
    if (e.target.classList.contains('resize-handle-edit')) return;
    if (e.button !== 0) return;
    e.preventDefault();
    activeWidget = e.currentTarget;
    isResizing = false;
    startX = e.clientX;
    startY = e.clientY;
    origLeft = activeWidget.offsetLeft;
    origTop = activeWidget.offsetTop;
    activeWidget.classList.add('dragging');
    document.addEventListener('mousemove', onMouseMove);
    document.addEventListener('mouseup', onMouseUp);
  }

  function onResizeMouseDown(e) {
    if (!editMode) return;
    if (e.button !== 0) return;
    e.preventDefault();
    e.stopPropagation();
    activeWidget = e.target.parentElement;
    isResizing = true;
    startX = e.clientX;
    startY = e.clientY;
    origWidth = activeWidget.offsetWidth;
    origHeight = activeWidget.offsetHeight;
    activeWidget.classList.add('dragging');
    document.addEventListener('mousemove', onMouseMove);
    document.addEventListener('mouseup', onMouseUp);
  }

  function onMouseMove(e) {
    if (!activeWidget) return;
    const dx = e.clientX - startX;
    const dy = e.clientY - startY;
    if (isResizing) {
      activeWidget.style.width = Math.max(MIN_WIDTH, origWidth + dx) + 'px';
      activeWidget.style.height = Math.max(MIN_HEIGHT, origHeight + dy) + 'px';
    } else {
      activeWidget.style.left = Math.max(0, origLeft + dx) + 'px';
      activeWidget.style.top = Math.max(0, origTop + dy) + 'px';
    }
  }

  function onMouseUp() {
    if (!activeWidget) return;
    if (isResizing) {
      activeWidget.style.width = snapToGrid(activeWidget.offsetWidth) + 'px';
      activeWidget.style.height = snapToGrid(activeWidget.offsetHeight) + 'px';
    } else {
      activeWidget.style.left = snapToGrid(activeWidget.offsetLeft) + 'px';
      activeWidget.style.top = snapToGrid(activeWidget.offsetTop) + 'px';
    }
    activeWidget.classList.remove('dragging');
    activeWidget = null;
    isResizing = false;
    document.removeEventListener('mousemove', onMouseMove);
    document.removeEventListener('mouseup', onMouseUp);
  }

  function snapToGrid(value) {
    return Math.round(value / GRID_SIZE) * GRID_SIZE;
  }

  function savePositions() {
    const positions = {};
    document.querySelectorAll('.widget-container').forEach(widget => {
      const id = widget.dataset.widgetId;
      if (id) {
        positions[id] = {
          left: widget.offsetLeft,
          top: widget.offsetTop,
          width: widget.offsetWidth,
          height: widget.offsetHeight
        };
      }
    });
    try {
      localStorage.setItem(STORAGE_KEY, JSON.stringify(positions));
    } catch (e) {}
  }

  function loadPositions() {
    try {
      const saved = localStorage.getItem(STORAGE_KEY);
      if (!saved) return;
      const positions = JSON.parse(saved);
      document.querySelectorAll('.widget-container').forEach(widget => {
        const pos = positions[widget.dataset.widgetId];
        if (pos) {
          widget.style.left = pos.left + 'px';
          widget.style.top = pos.top + 'px';
          widget.style.width = pos.width + 'px';
          widget.style.height = pos.height + 'px';
        }
      });
    } catch (e) {}
  }
})();
"##;

static SCRIPT: Lazy<String> = Lazy::new(|| {
    fill_template(
        EDIT_SCRIPT,
        &[
            ("storage_key", STORAGE_KEY),
            ("grid_size", &GRID_SIZE.to_string()),
            ("min_width", &MIN_WIDTH.to_string()),
            ("min_height", &MIN_HEIGHT.to_string()),
        ],
    )
});

/// The edit-mode script; identical for every dashboard.
pub fn edit_script() -> &'static str {
    &SCRIPT
}

/// Same rounding as the script's `snapToGrid` (`Math.round`, halves toward +inf).
pub fn snap_to_grid(value: f64) -> i64 {
    (value / GRID_SIZE as f64 + 0.5).floor() as i64 * GRID_SIZE
}

/// Position clamp applied while dragging.
pub fn clamp_position(value: f64) -> f64 {
    value.max(0.0)
}

/// Size clamp applied while resizing.
pub fn clamp_size(width: f64, height: f64) -> (f64, f64) {
    (width.max(MIN_WIDTH as f64), height.max(MIN_HEIGHT as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(13.0), 20);
        assert_eq!(snap_to_grid(9.0), 0);
        assert_eq!(snap_to_grid(10.0), 20);
        assert_eq!(snap_to_grid(30.0), 40);
        assert_eq!(snap_to_grid(29.0), 20);
        assert_eq!(snap_to_grid(-10.0), 0);
        assert_eq!(snap_to_grid(-11.0), -20);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_position(-40.0), 0.0);
        assert_eq!(clamp_position(35.0), 35.0);
        assert_eq!(clamp_size(20.0, 20.0), (100.0, 60.0));
        assert_eq!(clamp_size(300.0, 200.0), (300.0, 200.0));
    }

    #[test]
    fn test_script_constants_filled() {
        let script = edit_script();
        assert!(script.contains("const STORAGE_KEY = 'lobsterboard-layout';"));
        assert!(script.contains("const GRID_SIZE = 20;"));
        assert!(script.contains("const MIN_WIDTH = 100;"));
        assert!(script.contains("const MIN_HEIGHT = 60;"));
        assert!(!script.contains("${"));
    }

    #[test]
    fn test_script_state_machine() {
        let script = edit_script();
        assert!(script.contains("editMode = !editMode;"));
        assert!(script.contains("if (!editMode) savePositions();"));
        assert!(script.contains("Math.max(0, origLeft + dx)"));
        assert!(script.contains("localStorage.setItem(STORAGE_KEY, JSON.stringify(positions));"));
        assert!(script.contains("loadPositions();"));
        assert_eq!(edit_script(), script);
    }
}
