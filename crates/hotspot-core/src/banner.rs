//! Promo banner that rotates through a fixed list of lines.

use crate::config::BannerTiming;
use crate::error::BannerError;
use std::time::Duration;

pub const DEFAULT_LINES: [&str; 7] = [
    "Bigger, better, faster, stronger.",
    "Guerilla beatmaking.",
    "A sampler with soul.",
    "Performance-tuned sequencing.",
    "Serato power.",
    "Customize it.",
    "Break beats. Not banks.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerPhase {
    Visible,
    Transitioning,
}

/// What the page should do at a step, before waiting for the returned delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BannerStep {
    FadeOut,
    Show(String),
}

/// Two-state cycler: a line is shown for `display`, faded out over
/// `transition`, replaced by the next line (wrapping) and faded back in.
#[derive(Clone, Debug)]
pub struct BannerCycler {
    lines: Vec<String>,
    index: usize,
    phase: BannerPhase,
    timing: BannerTiming,
}

impl BannerCycler {
    pub fn new<I, S>(lines: I, timing: BannerTiming) -> Result<Self, BannerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(BannerError::NoLines);
        }
        if timing.display.is_zero() && timing.transition.is_zero() {
            return Err(BannerError::ZeroDuration);
        }
        Ok(Self {
            lines,
            index: 0,
            phase: BannerPhase::Visible,
            timing,
        })
    }

    pub fn with_default_lines(timing: BannerTiming) -> Result<Self, BannerError> {
        Self::new(DEFAULT_LINES, timing)
    }

    pub fn current(&self) -> &str {
        &self.lines[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> BannerPhase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn timing(&self) -> BannerTiming {
        self.timing
    }

    /// Delay before the first `step`, while line 0 is on screen.
    pub fn initial_delay(&self) -> Duration {
        self.timing.display
    }

    /// Move to the next phase. Returns the action to apply now and how long
    /// to wait before stepping again.
    pub fn step(&mut self) -> (BannerStep, Duration) {
        match self.phase {
            BannerPhase::Visible => {
                self.phase = BannerPhase::Transitioning;
                (BannerStep::FadeOut, self.timing.transition)
            }
            BannerPhase::Transitioning => {
                self.index = (self.index + 1) % self.lines.len();
                self.phase = BannerPhase::Visible;
                (BannerStep::Show(self.lines[self.index].clone()), self.timing.display)
            }
        }
    }

    /// Run one fade-out/fade-in cycle and return the line now shown.
    pub fn advance_cycle(&mut self) -> &str {
        if self.phase == BannerPhase::Visible {
            self.step();
        }
        self.step();
        self.current()
    }
}
