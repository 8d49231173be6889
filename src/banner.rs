//! Drives the promo banner element with a `setTimeout` chain.

use crate::constants::*;
use crate::dom;
use anyhow::anyhow;
use hotspot_core::{BannerCycler, BannerStep, BannerTiming};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use web_sys as web;

static STARTED: AtomicBool = AtomicBool::new(false);

/// Timing from the element's data attributes, defaults otherwise.
fn timing_for(el: &web::Element) -> BannerTiming {
    let defaults = BannerTiming::default();
    BannerTiming {
        display: dom::attr_millis(el, BANNER_DISPLAY_ATTR).unwrap_or(defaults.display),
        transition: dom::attr_millis(el, BANNER_TRANSITION_ATTR).unwrap_or(defaults.transition),
    }
}

fn set_fade(el: &web::Element, fading_out: bool) {
    let cl = el.class_list();
    if fading_out {
        _ = cl.remove_1(BANNER_FADE_IN_CLASS);
        _ = cl.add_1(BANNER_FADE_OUT_CLASS);
    } else {
        _ = cl.remove_1(BANNER_FADE_OUT_CLASS);
        _ = cl.add_1(BANNER_FADE_IN_CLASS);
    }
}

fn schedule(el: web::Element, mut cycler: BannerCycler, delay: Duration) {
    dom::set_timeout(delay, move || {
        let (step, wait) = cycler.step();
        match step {
            BannerStep::FadeOut => set_fade(&el, true),
            BannerStep::Show(text) => {
                el.set_text_content(Some(&text));
                set_fade(&el, false);
            }
        }
        schedule(el, cycler, wait);
    });
}

/// Start cycling the banner. Runs once per page; `Ok(false)` if the page has
/// no banner element or it is already running.
pub fn start(document: &web::Document) -> anyhow::Result<bool> {
    let Some(el) = document
        .query_selector(BANNER_SELECTOR)
        .map_err(|e| anyhow!("query {BANNER_SELECTOR}: {:?}", e))?
    else {
        return Ok(false);
    };
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(false);
    }
    let timing = timing_for(&el);
    let cycler = BannerCycler::with_default_lines(timing)?;
    log::info!(
        "[banner] {} lines, display={}ms transition={}ms",
        cycler.len(),
        timing.display.as_millis(),
        timing.transition.as_millis()
    );
    el.set_text_content(Some(cycler.current()));
    set_fade(&el, false);
    let first = cycler.initial_delay();
    schedule(el, cycler, first);
    Ok(true)
}
