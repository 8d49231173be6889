use crate::anchor::AnchorId;

/// Handle to one floating label instance. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelHandle(u32);

impl LabelHandle {
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShownLabel {
    pub handle: LabelHandle,
    pub anchor: AnchorId,
    pub text: String,
}

/// Holds the single floating label currently on screen.
///
/// Showing a new label hands back the previous handle exactly once, so every
/// label is retired by its own handle and never by a later one.
#[derive(Debug, Default)]
pub struct LabelSlot {
    next: u32,
    current: Option<ShownLabel>,
}

impl LabelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new label in the slot. Returns the new handle and the one it
    /// displaced, if any.
    pub fn replace(
        &mut self,
        anchor: AnchorId,
        text: impl Into<String>,
    ) -> (LabelHandle, Option<LabelHandle>) {
        let handle = LabelHandle(self.next);
        self.next = self.next.wrapping_add(1);
        let previous = self.current.replace(ShownLabel {
            handle,
            anchor,
            text: text.into(),
        });
        (handle, previous.map(|p| p.handle))
    }

    /// Empty the slot.
    pub fn take(&mut self) -> Option<LabelHandle> {
        self.current.take().map(|l| l.handle)
    }

    pub fn current(&self) -> Option<&ShownLabel> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_hands_back_previous_once() {
        let mut slot = LabelSlot::new();
        let (a, prev) = slot.replace("tooltip-1".into(), "first");
        assert!(prev.is_none());
        let (b, prev) = slot.replace("tooltip-2".into(), "second");
        assert_eq!(prev, Some(a));
        assert_ne!(a, b);
        assert_eq!(slot.take(), Some(b));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn current_tracks_latest_text() {
        let mut slot = LabelSlot::new();
        slot.replace("tooltip-3".into(), "LINE OUT");
        let shown = slot.current().unwrap();
        assert_eq!(shown.text, "LINE OUT");
        assert_eq!(shown.anchor.as_str(), "tooltip-3");
    }
}
