//! Smooth-scroll gate
//!
//! The smooth-scroll wrapper has one on/off switch shared by the preloader
//! and the mobile menu. Whoever disables it re-enables it on the matching
//! reverse action. There is no nesting: the last writer wins.

/// Who last touched the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollActor {
    Preloader,
    MobileMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollGate {
    pub enabled: bool,
    pub last_writer: Option<ScrollActor>,
}

impl Default for ScrollGate {
    fn default() -> Self {
        Self {
            enabled: true,
            last_writer: None,
        }
    }
}

impl ScrollGate {
    pub fn disable(self, by: ScrollActor) -> Self {
        Self {
            enabled: false,
            last_writer: Some(by),
        }
    }

    pub fn enable(self, by: ScrollActor) -> Self {
        Self {
            enabled: true,
            last_writer: Some(by),
        }
    }

    /// `Some(enabled)` when moving from `self` to `next` flips the switch
    pub fn transition(self, next: ScrollGate) -> Option<bool> {
        (self.enabled != next.enabled).then_some(next.enabled)
    }
}
