//! Portfolio Intro - preloader sequencing and scroll-driven UI for the portfolio site
//!
//! Core modules:
//! - `sequencer`: Once-per-session intro timeline and the steady-state handoff
//! - `reveal`: Scroll-triggered reveal bindings
//! - `scrollspy`: Active-section tracking for the nav backdrop
//! - `scroll`: Smooth-scroll enable/disable gate
//! - `menu`: Mobile burger menu
//! - `startup`: Fragment-loaded startup gate
//! - `session`: Session-scoped "has visited" flag
//! - `config`: Timings, offsets and breakpoints
//! - `platform`: Browser glue (wasm32 only)

pub mod config;
pub mod error;
pub mod menu;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod reveal;
pub mod scroll;
pub mod scrollspy;
pub mod sequencer;
pub mod session;
pub mod startup;
pub mod tween;

pub use config::{SiteConfig, SpyMode};
pub use error::{Result, SiteError};
pub use session::{MemorySession, SessionFlagStore};

/// Site-wide constants
pub mod consts {
    /// Session storage key for the visited flag
    pub const SESSION_KEY: &str = "hasVisited";
    pub const SESSION_VALUE: &str = "true";

    /// Intro fill wipe (seconds)
    pub const FILL_DURATION: f64 = 2.5;
    /// Loader overlay slide-out (seconds)
    pub const LOADER_SLIDE_DURATION: f64 = 0.8;
    /// Hero cue starts this long before the loader slide ends
    pub const HERO_OVERLAP: f64 = 0.7;

    /// Reveal band: trigger top crosses 85% down the viewport
    pub const REVEAL_START: f64 = 0.85;
    /// Scrollspy: section counts once its top is within 300px of the viewport top
    pub const SCROLLSPY_OFFSET: f64 = 300.0;

    /// Widths at or below this are mobile (no smooth scroll, burger menu)
    pub const MOBILE_BREAKPOINT: f64 = 768.0;
    /// Start anyway if fragments haven't signalled by then (ms)
    pub const FRAGMENT_FALLBACK_MS: f64 = 1000.0;
    /// Scroll distance after which the scroll indicator fades out
    pub const SCROLL_INDICATOR_THRESHOLD: f64 = 50.0;
    /// One marquee lap (seconds)
    pub const MARQUEE_DURATION: f64 = 35.0;
}
