// Page hooks and inline styling for the overlay widgets.
// Kept free of `web_sys` so host-side tests can include this file directly.

// Marker elements created at runtime get this class; seeded ones are expected
// to carry it in the page markup.
pub const MARKER_CLASS: &str = "dot-tooltip";
pub const FLOATING_LABEL_CLASS: &str = "floating-label";

pub const BANNER_SELECTOR: &str = ".animated-text";
pub const BANNER_FADE_IN_CLASS: &str = "fade-in";
pub const BANNER_FADE_OUT_CLASS: &str = "fade-out";
// Optional overrides on the banner element, in milliseconds.
pub const BANNER_DISPLAY_ATTR: &str = "data-display-ms";
pub const BANNER_TRANSITION_ATTR: &str = "data-transition-ms";

pub const RESET_BUTTON_TEXT: &str = "\u{2b05}  Zoom Out";

pub const RESET_BUTTON_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("bottom", "2rem"),
    ("left", "2rem"),
    ("z-index", "1000"),
    ("padding", "10px 20px"),
    ("background-color", "#ff5a00"),
    ("color", "white"),
    ("border", "none"),
    ("border-radius", "5px"),
    ("cursor", "pointer"),
    ("opacity", "0"),
    ("transition", "opacity 0.3s ease"),
    ("pointer-events", "none"),
];

// Fixed bottom-left placement, independent of where the anchor projects.
pub const FLOATING_LABEL_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("background-color", "rgba(255, 255, 255, 0.1)"),
    ("backdrop-filter", "blur(8px)"),
    ("-webkit-backdrop-filter", "blur(8px)"),
    ("color", "black"),
    ("padding", "5px 10px"),
    ("border-radius", "10px"),
    ("max-width", "400px"),
    ("z-index", "2000"),
    ("pointer-events", "none"),
    ("transition", "opacity 0.3s ease"),
    ("opacity", "0"),
    ("font-family", "\"proxima-nova\", sans-serif"),
    ("font-size", "2rem"),
    ("line-height", "1.4"),
    ("bottom", "6rem"),
    ("left", "2rem"),
];

/// Look up a property in one of the style tables above.
#[allow(dead_code)]
pub fn style_value(table: &[(&str, &'static str)], property: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == property).map(|(_, v)| *v)
}

/// Seconds of an `opacity <n>s ...` transition value, if it has that shape.
#[allow(dead_code)]
pub fn opacity_transition_secs(value: &str) -> Option<f32> {
    let mut parts = value.split_whitespace();
    if parts.next()? != "opacity" {
        return None;
    }
    parts.next()?.strip_suffix('s')?.parse().ok()
}
