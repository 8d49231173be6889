//! DOM side of the hotspot overlay: marker elements, the reset button and
//! floating labels.

use crate::constants::*;
use crate::dom;
use anyhow::anyhow;
use fnv::FnvHashMap;
use hotspot_core::{AnchorId, LabelHandle, MarkerPlacement, OverlayCommand};
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn body(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document.body().ok_or_else(|| anyhow!("document has no body"))
}

pub fn create_html_element(document: &web::Document, tag: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| anyhow!("create <{tag}>: {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("<{tag}> is not an HtmlElement: {:?}", e))
}

/// Marker element per anchor, as registered by the host.
#[derive(Default)]
pub struct MarkerRegistry {
    elements: FnvHashMap<AnchorId, web::HtmlElement>,
}

/// Outcome of applying one frame of placements.
#[derive(Debug, Default)]
pub struct MarkerReport {
    pub placed: usize,
    pub missing: Vec<AnchorId>,
}

impl MarkerRegistry {
    pub fn insert(&mut self, id: AnchorId, el: web::HtmlElement) -> Option<web::HtmlElement> {
        self.elements.insert(id, el)
    }

    pub fn contains(&self, id: &AnchorId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn apply(&self, placements: &[MarkerPlacement]) -> MarkerReport {
        let mut report = MarkerReport::default();
        for p in placements {
            let Some(el) = self.elements.get(&p.id) else {
                report.missing.push(p.id.clone());
                continue;
            };
            let style = el.style();
            if p.visible() {
                _ = style.set_property("left", &format!("{}px", p.screen.x));
                _ = style.set_property("top", &format!("{}px", p.screen.y));
                _ = style.set_property("display", "block");
            } else {
                _ = style.set_property("display", "none");
            }
            report.placed += 1;
        }
        report
    }
}

/// Reset button plus whichever floating labels are still on the page.
pub struct OverlayView {
    document: web::Document,
    reset_button: web::HtmlElement,
    labels: FnvHashMap<LabelHandle, web::HtmlElement>,
}

impl OverlayView {
    pub fn new(document: web::Document) -> anyhow::Result<Self> {
        let reset_button = create_html_element(&document, "button")?;
        reset_button.set_text_content(Some(RESET_BUTTON_TEXT));
        dom::apply_style(&reset_button, RESET_BUTTON_STYLE);
        body(&document)?
            .append_child(&reset_button)
            .map_err(|e| anyhow!("append reset button: {:?}", e))?;
        Ok(Self {
            document,
            reset_button,
            labels: FnvHashMap::default(),
        })
    }

    pub fn reset_button(&self) -> &web::HtmlElement {
        &self.reset_button
    }

    pub fn apply(&mut self, cmd: OverlayCommand) {
        match cmd {
            OverlayCommand::ShowLabel { handle, text } => {
                if let Err(e) = self.show_label(handle, &text) {
                    log::error!("[overlay] label: {e:?}");
                }
            }
            OverlayCommand::RetireLabel {
                handle,
                remove_after,
            } => self.retire_label(handle, remove_after),
            OverlayCommand::SetResetVisible(visible) => self.set_reset_visible(visible),
        }
    }

    fn show_label(&mut self, handle: LabelHandle, text: &str) -> anyhow::Result<()> {
        let el = create_html_element(&self.document, "div")?;
        el.set_class_name(FLOATING_LABEL_CLASS);
        dom::apply_style(&el, FLOATING_LABEL_STYLE);
        el.set_text_content(Some(text));
        body(&self.document)?
            .append_child(&el)
            .map_err(|e| anyhow!("append label: {:?}", e))?;
        // Opacity has to change after the element is laid out for the CSS
        // transition to run.
        let fade_in = el.clone();
        dom::next_frame(move || {
            _ = fade_in.style().set_property("opacity", "1");
        });
        self.labels.insert(handle, el);
        Ok(())
    }

    fn retire_label(&mut self, handle: LabelHandle, remove_after: Duration) {
        let Some(el) = self.labels.remove(&handle) else {
            log::debug!("[overlay] label {} already gone", handle.raw());
            return;
        };
        _ = el.style().set_property("opacity", "0");
        dom::set_timeout(remove_after, move || el.remove());
    }

    fn set_reset_visible(&self, visible: bool) {
        let style = self.reset_button.style();
        let (opacity, events) = if visible { ("1", "auto") } else { ("0", "none") };
        _ = style.set_property("opacity", opacity);
        _ = style.set_property("pointer-events", events);
    }
}
