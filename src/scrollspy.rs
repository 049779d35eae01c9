//! Active-section tracking for the desktop nav
//!
//! Sections are checked in document order and a later match overwrites an
//! earlier one. When nothing matches, the indicator stays where it was.

use crate::config::SpyMode;

/// Viewport-relative vertical extent of a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

/// The active section changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpyChange {
    pub index: usize,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    mode: SpyMode,
    section_ids: Vec<String>,
    active: Option<usize>,
    armed: bool,
}

impl ScrollSpy {
    /// `None` when there is nothing to track or nothing to move
    pub fn new(section_ids: Vec<String>, has_backdrop: bool, mode: SpyMode) -> Option<Self> {
        if section_ids.is_empty() || !has_backdrop {
            log::debug!(
                "Scrollspy disabled ({} sections, backdrop: {})",
                section_ids.len(),
                has_backdrop
            );
            return None;
        }
        Some(Self {
            mode,
            section_ids,
            active: None,
            armed: false,
        })
    }

    /// Start tracking. Returns `false` if already armed.
    pub fn arm(&mut self) -> bool {
        !std::mem::replace(&mut self.armed, true)
    }

    /// Which section the given rects make current, if any
    pub fn current(&self, rects: &[SectionRect], viewport_height: f64) -> Option<usize> {
        let mut current = None;
        for (i, rect) in rects.iter().enumerate().take(self.section_ids.len()) {
            let hit = match self.mode {
                SpyMode::PastOffset { offset } => rect.top <= offset,
                SpyMode::CenterBand => {
                    let mid = viewport_height / 2.0;
                    rect.top <= mid && rect.bottom >= mid
                }
            };
            if hit {
                current = Some(i);
            }
        }
        current
    }

    /// Recompute on scroll; reports only actual changes
    pub fn update(&mut self, rects: &[SectionRect], viewport_height: f64) -> Option<SpyChange> {
        if !self.armed {
            return None;
        }
        // No match keeps the previous indicator
        let index = self.current(rects, viewport_height)?;
        if self.active == Some(index) {
            return None;
        }
        self.active = Some(index);
        Some(SpyChange {
            index,
            id: self.section_ids[index].clone(),
        })
    }
}

/// Backdrop fill behind the active link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Accent,
    Subtle,
}

impl Backdrop {
    pub fn css(&self) -> &'static str {
        match self {
            Backdrop::Accent => "var(--accent-primary)",
            Backdrop::Subtle => "rgba(255, 255, 255, 0.1)",
        }
    }
}

/// Where the backdrop goes for a given active link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub left: f64,
    pub width: f64,
    pub backdrop: Backdrop,
}

impl Indicator {
    /// Nav link that gets the accent backdrop
    pub const CONTACT_LINK_ID: &'static str = "btn-contact";

    pub fn for_link(link_id: &str, offset_left: f64, offset_width: f64) -> Self {
        Self {
            left: offset_left,
            width: offset_width,
            backdrop: if link_id == Self::CONTACT_LINK_ID {
                Backdrop::Accent
            } else {
                Backdrop::Subtle
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{i}")).collect()
    }

    fn armed(mode: SpyMode, n: usize) -> ScrollSpy {
        let mut spy = ScrollSpy::new(ids(n), true, mode).unwrap();
        spy.arm();
        spy
    }

    fn rect(top: f64, bottom: f64) -> SectionRect {
        SectionRect { top, bottom }
    }

    #[test]
    fn test_disabled_without_sections_or_backdrop() {
        assert!(ScrollSpy::new(Vec::new(), true, SpyMode::default()).is_none());
        assert!(ScrollSpy::new(ids(2), false, SpyMode::default()).is_none());
    }

    #[test]
    fn test_last_section_in_document_order_wins() {
        let mut spy = armed(SpyMode::default(), 3);
        // All three tops are within 300 of the viewport top
        let change = spy
            .update(&[rect(-900.0, -100.0), rect(-50.0, 600.0), rect(250.0, 1200.0)], 800.0)
            .unwrap();
        assert_eq!(change.index, 2);
        assert_eq!(change.id, "s2");
    }

    #[test]
    fn test_no_match_keeps_last_indicator() {
        let mut spy = armed(SpyMode::default(), 2);
        let change = spy.update(&[rect(0.0, 500.0), rect(500.0, 1000.0)], 800.0).unwrap();
        assert_eq!(change.id, "s0");
        // Scrolled above every section
        assert!(spy.update(&[rect(400.0, 900.0), rect(900.0, 1400.0)], 800.0).is_none());
        // Back on s0: still the active one, so no change
        assert!(spy.update(&[rect(0.0, 500.0), rect(500.0, 1000.0)], 800.0).is_none());
    }

    #[test]
    fn test_only_changes_are_reported() {
        let mut spy = armed(SpyMode::default(), 2);
        let rects = [rect(0.0, 500.0), rect(500.0, 1000.0)];
        assert!(spy.update(&rects, 800.0).is_some());
        assert!(spy.update(&rects, 800.0).is_none());
    }

    #[test]
    fn test_center_band() {
        let mut spy = armed(SpyMode::CenterBand, 2);
        // Middle of an 800px viewport is at 400
        let change = spy.update(&[rect(-600.0, 450.0), rect(450.0, 1200.0)], 800.0).unwrap();
        assert_eq!(change.index, 0);
        let change = spy.update(&[rect(-700.0, 350.0), rect(350.0, 1100.0)], 800.0).unwrap();
        assert_eq!(change.index, 1);
    }

    #[test]
    fn test_center_band_tie_goes_to_later_section() {
        let spy = armed(SpyMode::CenterBand, 3);
        // Sections 0 and 1 both straddle the middle line
        let rects = [rect(-200.0, 600.0), rect(400.0, 900.0), rect(900.0, 1500.0)];
        assert_eq!(spy.current(&rects, 800.0), Some(1));
        // Band edges are inclusive
        let rects = [rect(0.0, 400.0), rect(400.0, 800.0), rect(800.0, 1200.0)];
        assert_eq!(spy.current(&rects, 800.0), Some(1));
        // Nothing at the middle line
        assert_eq!(spy.current(&[rect(500.0, 900.0)], 800.0), None);
    }

    #[test]
    fn test_inert_until_armed() {
        let mut spy = ScrollSpy::new(ids(1), true, SpyMode::default()).unwrap();
        assert!(spy.update(&[rect(0.0, 10.0)], 800.0).is_none());
    }

    #[test]
    fn test_contact_link_gets_accent() {
        let ind = Indicator::for_link("btn-contact", 120.0, 80.0);
        assert_eq!(ind.backdrop, Backdrop::Accent);
        assert_eq!(Indicator::for_link("about", 0.0, 60.0).backdrop.css(), "rgba(255, 255, 255, 0.1)");
    }

    proptest! {
        #[test]
        fn prop_past_offset_picks_last_qualifying(tops in prop::collection::vec(-2000.0f64..2000.0, 1..10)) {
            let spy = armed(SpyMode::default(), tops.len());
            let rects: Vec<_> = tops.iter().map(|&t| rect(t, t + 400.0)).collect();
            let expected = tops.iter().rposition(|&t| t <= 300.0);
            prop_assert_eq!(spy.current(&rects, 800.0), expected);
        }
    }
}
