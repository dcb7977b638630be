//! Visual constants for the sprite panel.
//!
//! Kept free of DOM types so the values the grid applies can be asserted on
//! natively.

/// Id of the injected stylesheet; used to inject it only once per document.
pub const STYLE_ELEMENT_ID: &str = "stash-sprites-css";

/// Id of the tab link added to the host's navigation bar.
pub const TAB_LINK_ID: &str = "tab-sprites-nav";

/// Id of the content pane holding the panel.
pub const PANEL_ID: &str = "sprites-panel";

/// Class toggled on the host's tab-content container while the panel is shown.
pub const ACTIVE_CONTAINER_CLASS: &str = "stash-plugin-sprites-active";

/// Class on every tile element.
pub const TILE_CLASS: &str = "sprite-cell";

/// Class on every timestamp label.
pub const TIMESTAMP_CLASS: &str = "sprite-timestamp";

/// Stylesheet that hides the host's own panes while ours is active. Switching
/// happens on the container so the host's per-pane logic is left alone.
pub const PANEL_STYLESHEET: &str = "\
.tab-content.stash-plugin-sprites-active > .tab-pane { display: none !important; }
.tab-content.stash-plugin-sprites-active > #sprites-panel { display: block !important; }
";

pub const TILE_BORDER: &str = "1px solid #333";
pub const TILE_BORDER_HOVER_COLOR: &str = "#fff";
pub const TILE_RADIUS: &str = "4px";
pub const GRID_GAP: &str = "5px";
pub const HIGHLIGHT_SHADOW: &str = "inset 0 0 0 2px #00BFFF";

pub const TILE_CSS: &str = "width: 100%; aspect-ratio: 16/9; background-repeat: no-repeat; \
cursor: pointer; position: relative;";

pub const TIMESTAMP_CSS: &str = "position: absolute; bottom: 0; right: 0; \
background: rgba(0,0,0,0.7); color: #fff; font-size: 11px; padding: 1px 4px; \
pointer-events: none;";

pub const CONTAINER_CSS: &str = "width: 100%; display: flex; flex-direction: column;";

// Bottom padding keeps the last row clear of page footers.
pub const SCROLL_AREA_CSS: &str = "position: relative; width: 100%; padding-bottom: 50px;";

pub const CONTROLS_CSS: &str = "padding: 10px; display: flex; flex-wrap: wrap; \
align-items: center; gap: 15px; background: rgba(30, 30, 30, 0.95); \
border-bottom: 1px solid #444; margin-bottom: 15px; border-radius: 0 0 5px 5px; \
font-size: 14px; position: sticky; top: 0; z-index: 100; backdrop-filter: blur(5px);";

pub const SLIDER_WRAPPER_CSS: &str = "display: flex; align-items: center; gap: 5px; flex-grow: 1;";
pub const SLIDER_CSS: &str = "cursor: pointer; flex-grow: 1; max-width: 200px;";
pub const TOGGLE_CSS: &str = "display: flex; align-items: center; gap: 5px; cursor: pointer; margin: 0;";
pub const MESSAGE_CSS: &str = "padding: 20px;";

/// Tile border for the given compact mode.
pub fn tile_border(compact: bool) -> &'static str {
    if compact {
        "none"
    } else {
        TILE_BORDER
    }
}

/// Tile corner radius for the given compact mode.
pub fn tile_radius(compact: bool) -> &'static str {
    if compact {
        "0"
    } else {
        TILE_RADIUS
    }
}

/// Gap between tiles for the given compact mode.
pub fn grid_gap(compact: bool) -> &'static str {
    if compact {
        "0px"
    } else {
        GRID_GAP
    }
}

/// Box shadow marking the active tile.
pub fn highlight_shadow(active: bool) -> &'static str {
    if active {
        HIGHLIGHT_SHADOW
    } else {
        "none"
    }
}

/// Stacking order so the highlight ring is not covered by neighbours.
pub fn highlight_z_index(active: bool) -> &'static str {
    if active {
        "1"
    } else {
        "0"
    }
}

/// `display` value for a timestamp label.
pub fn label_display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

pub fn grid_template_columns(columns: u8) -> String {
    format!("repeat({columns}, 1fr)")
}

pub fn grid_css(columns: u8, compact: bool) -> String {
    format!(
        "display: grid; grid-template-columns: {}; gap: {}; padding-right: 5px;",
        grid_template_columns(columns),
        grid_gap(compact)
    )
}

pub fn background_position((x_pct, y_pct): (f64, f64)) -> String {
    format!("{x_pct}% {y_pct}%")
}

pub fn background_size(pct: f64) -> String {
    format!("{pct}%")
}

pub fn background_image(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('\'', "\\'");
    format!("url('{escaped}')")
}
