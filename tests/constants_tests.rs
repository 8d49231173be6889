// Host-side tests for the page constants and style tables.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use std::collections::HashSet;

#[test]
fn style_tables_have_no_duplicate_properties() {
    for table in [RESET_BUTTON_STYLE, FLOATING_LABEL_STYLE] {
        let mut seen = HashSet::new();
        for (k, _) in table {
            assert!(seen.insert(*k), "duplicate property {k}");
        }
    }
}

#[test]
fn reset_button_starts_hidden_and_inert() {
    assert_eq!(style_value(RESET_BUTTON_STYLE, "opacity"), Some("0"));
    assert_eq!(style_value(RESET_BUTTON_STYLE, "pointer-events"), Some("none"));
    assert!(RESET_BUTTON_TEXT.ends_with("Zoom Out"));
}

#[test]
fn label_sits_at_fixed_bottom_left_and_starts_transparent() {
    assert_eq!(style_value(FLOATING_LABEL_STYLE, "bottom"), Some("6rem"));
    assert_eq!(style_value(FLOATING_LABEL_STYLE, "left"), Some("2rem"));
    assert_eq!(style_value(FLOATING_LABEL_STYLE, "opacity"), Some("0"));
    assert_eq!(style_value(FLOATING_LABEL_STYLE, "pointer-events"), Some("none"));
    assert!(style_value(FLOATING_LABEL_STYLE, "top").is_none());
}

#[test]
fn label_fade_matches_removal_delay() {
    let css = style_value(FLOATING_LABEL_STYLE, "transition").unwrap();
    let secs = opacity_transition_secs(css).unwrap();
    let delay_secs = hotspot_core::LABEL_FADE_MS as f32 / 1000.0;
    assert!((secs - delay_secs).abs() < 1e-6);
}

#[test]
fn opacity_transition_parsing() {
    assert_eq!(opacity_transition_secs("opacity 0.3s ease"), Some(0.3));
    assert_eq!(opacity_transition_secs("opacity 1s"), Some(1.0));
    assert_eq!(opacity_transition_secs("transform 0.3s ease"), None);
    assert_eq!(opacity_transition_secs("opacity fast"), None);
    assert_eq!(opacity_transition_secs(""), None);
}

#[test]
fn banner_hooks_are_distinct() {
    assert_ne!(BANNER_FADE_IN_CLASS, BANNER_FADE_OUT_CLASS);
    assert!(BANNER_SELECTOR.starts_with('.'));
    assert!(BANNER_DISPLAY_ATTR.starts_with("data-"));
    assert!(BANNER_TRANSITION_ATTR.starts_with("data-"));
}
