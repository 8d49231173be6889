use glam::Vec3;
use std::fmt;

/// Identifier of an anchor, shared with the DOM id of its marker element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnchorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AnchorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A labelled world-space point on the product model.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorPoint {
    pub id: AnchorId,
    pub position: Vec3,
    pub label: String,
}

impl AnchorPoint {
    pub fn new(id: impl Into<AnchorId>, position: Vec3, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            label: label.into(),
        }
    }
}

// (id, position, label) for the hotspots placed on the sampler model.
const SEEDED: [(&str, [f32; 3], &str); 13] = [
    (
        "tooltip-1",
        [0.5429, 1.0906, -0.0970],
        "DC IN TerminalPower Supply, AC adaptor",
    ),
    (
        "tooltip-2",
        [0.30140, 1.09616, -0.0794],
        "USB Type-C (Audio, MIDI), USB bus power supply (USB Type-C port, 1.5 A ormore).",
    ),
    (
        "tooltip-3",
        [-0.2646, 1.087401, -0.10182],
        "LINE OUT jacks: 1/4-inch TRS phone type (impedance balanced), LINE IN jacks: 1/4-inch phone type (L/MONO, R).",
    ),
    (
        "tooltip-4",
        [0.094890, 1.08771, -0.098782],
        "MIDI (IN, OUT) jack: Stereo miniature phone type.",
    ),
    (
        "tooltip-5",
        [-0.296527, -0.80068, 0.4114854],
        "PHONES jacks: 1/4-inch phone type, Stereo miniature phone type.",
    ),
    (
        "tooltip-6",
        [0.3973702, -0.80011, 0.403313],
        "MIC/GUITAR IN jacks: 1/4-inch TRS phone type (for MIC), 1/4-inch phone type (for GUITAR).",
    ),
    (
        "tooltip-7",
        [-0.00020325, 0.577558, 0.232059],
        "Vivid OLED display for visual waveform editing, full menu access, customizable user design template, and support for importing your own startup logo and screensaver images.",
    ),
    (
        "tooltip-8",
        [-0.0281230, -0.240824, 0.4284462],
        "17 velocity-sensitive, RGB pads with no-click design for smooth playability.",
    ),
    (
        "tooltip-9",
        [0.5515076, 1.0490645, 0.1256213],
        "Customize the look with the detachable metal faceplate.",
    ),
    (
        "tooltip-10",
        [-0.386306, 0.5513043, 0.250242],
        "Extensive onboard effects, including SP classics like Vinyl Simulator and DJFX Looper plus new Lo-fi, Cassette Simulator, and Resonator",
    ),
    (
        "tooltip-11",
        [0.511137898, 0.21512472, 0.3105796],
        "Blazing onboard sample editing with real-time or auto-chop mode, auto BPM detect, envelope, pitch shift, and resampling for layering sounds and phrases.",
    ),
    (
        "tooltip-12",
        [-0.24108, 0.17122374, 0.320196],
        "Updated resampling workflow for re-recording with various effects for detailed sound design.",
    ),
    (
        "tooltip-13",
        [0.4074346, -0.1006333, 0.39778653],
        "Bus FX for layering multiple effects, with customizable routing for creating intricate sound textures.",
    ),
];

/// The hotspots the page ships with.
pub fn seeded_anchors() -> Vec<AnchorPoint> {
    SEEDED
        .iter()
        .map(|(id, p, label)| AnchorPoint::new(*id, Vec3::from(*p), *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_are_unique_and_ordered() {
        let anchors = seeded_anchors();
        assert_eq!(anchors.len(), 13);
        for (i, a) in anchors.iter().enumerate() {
            assert_eq!(a.id.as_str(), format!("tooltip-{}", i + 1));
            assert!(!a.label.is_empty());
        }
    }
}
