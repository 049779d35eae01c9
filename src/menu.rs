//! Mobile burger menu
//!
//! Opening stops smooth scroll, closing restarts it. A resize past the
//! mobile breakpoint while open force-closes the overlay in the same tick.

use crate::scroll::{ScrollActor, ScrollGate};
use crate::tween::{Ease, Props, Tween};

/// Direction to run the menu timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMotion {
    /// Play forward
    Open,
    /// Reverse
    Close,
}

/// Why the menu is changing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuInput {
    BurgerClick,
    LinkClick,
    Resize { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MobileMenu {
    pub open: bool,
}

impl MobileMenu {
    /// Apply one input. Returns the new menu, the new gate and the
    /// timeline motion to run, if any.
    pub fn apply(
        self,
        input: MenuInput,
        gate: ScrollGate,
        breakpoint: f64,
    ) -> (Self, ScrollGate, Option<MenuMotion>) {
        match input {
            MenuInput::BurgerClick if !self.open => (
                Self { open: true },
                gate.disable(ScrollActor::MobileMenu),
                Some(MenuMotion::Open),
            ),
            MenuInput::BurgerClick | MenuInput::LinkClick if self.open => self.close(gate),
            MenuInput::Resize { width } if self.open && width > breakpoint => {
                log::debug!("Resize to {width}px closes the mobile menu");
                self.close(gate)
            }
            _ => (self, gate, None),
        }
    }

    fn close(self, gate: ScrollGate) -> (Self, ScrollGate, Option<MenuMotion>) {
        (
            Self { open: false },
            gate.enable(ScrollActor::MobileMenu),
            Some(MenuMotion::Close),
        )
    }
}

/// Overlay fade-in, then links rising in 0.2s before it finishes
pub fn menu_tweens() -> (Tween, Tween, f64) {
    let overlay = Tween::to(
        Props {
            auto_alpha: Some(1.0),
            ..Default::default()
        },
        0.5,
        Ease::Power3InOut,
    );
    let links = Tween {
        from: Some(Props {
            y: Some(50.0),
            opacity: Some(0.0),
            ..Default::default()
        }),
        ..Tween::to(Props::default(), 0.6, Ease::Power4Out).with_stagger(0.1)
    };
    (overlay, links, 0.2)
}
