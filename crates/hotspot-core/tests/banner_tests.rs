// Drives the banner cycler with a simulated timer chain, the way the page
// schedules it with setTimeout.

use hotspot_core::*;
use std::time::Duration;

/// Line visible (fully or fading) at each step boundary, with its time.
fn timeline(c: &mut BannerCycler, steps: usize) -> Vec<(Duration, String, bool)> {
    let mut t = c.initial_delay();
    let mut out = Vec::new();
    for _ in 0..steps {
        let (step, wait) = c.step();
        let fading = matches!(step, BannerStep::FadeOut);
        out.push((t, c.current().to_string(), fading));
        t += wait;
    }
    out
}

#[test]
fn default_timing_schedule() {
    let mut c = BannerCycler::with_default_lines(BannerTiming::default()).unwrap();
    let tl = timeline(&mut c, 4);
    assert_eq!(tl[0], (Duration::from_millis(3000), DEFAULT_LINES[0].to_string(), true));
    assert_eq!(tl[1], (Duration::from_millis(3800), DEFAULT_LINES[1].to_string(), false));
    assert_eq!(tl[2], (Duration::from_millis(6800), DEFAULT_LINES[1].to_string(), true));
    assert_eq!(tl[3], (Duration::from_millis(7600), DEFAULT_LINES[2].to_string(), false));
}

#[test]
fn alternate_timing_pair_is_just_configuration() {
    let timing = BannerTiming::from_millis(4000, 1000);
    let mut c = BannerCycler::new(["one", "two"], timing).unwrap();
    let tl = timeline(&mut c, 2);
    assert_eq!(tl[0].0, Duration::from_millis(4000));
    assert_eq!(tl[1].0, Duration::from_millis(5000));
    assert_eq!(tl[1].1, "two");
}

#[test]
fn every_line_shown_once_per_round_in_order() {
    let mut c = BannerCycler::with_default_lines(BannerTiming::default()).unwrap();
    let mut seen = vec![c.current().to_string()];
    for _ in 1..c.len() {
        seen.push(c.advance_cycle().to_string());
    }
    assert_eq!(seen, DEFAULT_LINES.map(String::from).to_vec());
    assert_eq!(c.advance_cycle(), DEFAULT_LINES[0]);
}
