//! Site configuration
//!
//! Read from an inline `<script type="application/json" id="site-config">`
//! block when the page provides one.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SiteError};

/// How the scrollspy decides which section is current
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpyMode {
    /// Last section whose top is within `offset` of the viewport top
    PastOffset { offset: f64 },
    /// Section spanning the vertical middle of the viewport
    CenterBand,
}

impl Default for SpyMode {
    fn default() -> Self {
        SpyMode::PastOffset {
            offset: SCROLLSPY_OFFSET,
        }
    }
}

/// Intro timeline durations (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroTimings {
    pub fill: f64,
    pub loader_slide: f64,
    /// How early the hero cue fires before the preceding step ends
    pub hero_overlap: f64,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            fill: FILL_DURATION,
            loader_slide: LOADER_SLIDE_DURATION,
            hero_overlap: HERO_OVERLAP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub intro: IntroTimings,

    /// Default reveal band as a fraction of viewport height
    pub reveal_start: f64,
    pub spy_mode: SpyMode,

    pub mobile_breakpoint: f64,
    pub fragment_fallback_ms: f64,
    pub scroll_indicator_threshold: f64,

    /// Allow the smooth-scroll wrapper on desktop
    pub smooth_scroll: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            intro: IntroTimings::default(),
            reveal_start: REVEAL_START,
            spy_mode: SpyMode::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT,
            fragment_fallback_ms: FRAGMENT_FALLBACK_MS,
            scroll_indicator_threshold: SCROLL_INDICATOR_THRESHOLD,
            smooth_scroll: true,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config block; missing keys take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig =
            serde_json::from_str(json).map_err(|e| SiteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("intro.fill", self.intro.fill),
            ("intro.loader_slide", self.intro.loader_slide),
            ("intro.hero_overlap", self.intro.hero_overlap),
            ("fragment_fallback_ms", self.fragment_fallback_ms),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(SiteError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.reveal_start) {
            return Err(SiteError::Config(format!(
                "reveal_start must be within 0..=1, got {}",
                self.reveal_start
            )));
        }
        if let SpyMode::PastOffset { offset } = self.spy_mode {
            if !offset.is_finite() {
                return Err(SiteError::Config("spy_mode.offset must be finite".into()));
            }
        }
        Ok(())
    }

    /// Whether a viewport of this width gets the mobile layout
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.mobile_breakpoint
    }

    /// DOM id of the inline config block
    const ELEMENT_ID: &'static str = "site-config";

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded site config from #{}", Self::ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("{e}; using defaults");
                    Self::default()
                }
            },
            None => {
                log::debug!("No #{} block, using default config", Self::ELEMENT_ID);
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("Native build, #{} is never present", Self::ELEMENT_ID);
        Self::default()
    }
}
