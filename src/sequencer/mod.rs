//! Preload sequencer
//!
//! Decides once per page load whether to play the intro or jump straight
//! to steady state, then hands off to the scroll-driven controllers.
//! Pure and deterministic: time only moves through `tick`.

pub mod state;
pub mod tick;
pub mod timeline;

pub use state::{
    HeroState, HeroStep, IntroStep, IntroTargets, PageKind, SequenceState, SiteEvent, SiteState,
    Target,
};
pub use tick::{TickInput, enter_steady_state, start, tick};
pub use timeline::{Fired, Position, Timeline};
