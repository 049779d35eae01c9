//! Sequencer state and the events it emits
//!
//! The platform layer drains `SiteState::events` after every tick and
//! applies them to the DOM, the tween engine and the smooth-scroll wrapper.

use super::timeline::Timeline;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::menu::{MenuMotion, MobileMenu};
use crate::reveal::{RevealBinding, RevealChange, RevealRegistry};
use crate::scroll::ScrollGate;
use crate::scrollspy::{ScrollSpy, SpyChange};
use crate::tween::{Props, Tween};

/// Which page we are on. Read once from the `<body>` marker class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    ProjectDetail,
}

impl PageKind {
    /// Body class that marks a project page
    pub const PROJECT_MARKER: &'static str = "project-page";

    pub fn from_marker(has_project_marker: bool) -> Self {
        if has_project_marker {
            PageKind::ProjectDetail
        } else {
            PageKind::Home
        }
    }
}

/// Intro sequencing phase. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    NotStarted,
    IntroPlaying,
    SteadyState,
}

/// Elements the intro and hero animations touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Fill,
    Loader,
    DesktopNav,
    HeroSection,
    HeroHeading,
    HeroSubtitle,
    ScrollIndicator,
    Marquee,
}

impl Target {
    pub const ALL: [Target; 8] = [
        Target::Fill,
        Target::Loader,
        Target::DesktopNav,
        Target::HeroSection,
        Target::HeroHeading,
        Target::HeroSubtitle,
        Target::ScrollIndicator,
        Target::Marquee,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            Target::Fill => ".fill",
            Target::Loader => ".preloader",
            Target::DesktopNav => ".desktop-nav",
            Target::HeroSection => ".hero",
            Target::HeroHeading => "h1.reveal-text",
            Target::HeroSubtitle => ".hero-subtitle",
            Target::ScrollIndicator => ".scroll-indicator",
            Target::Marquee => ".marquee-content",
        }
    }

    /// Final visible state, for the skip path
    pub fn rest_props(&self) -> Option<Props> {
        match self {
            Target::DesktopNav => Some(Props {
                y_percent: Some(0.0),
                x_percent: Some(-50.0),
                auto_alpha: Some(1.0),
                ..Default::default()
            }),
            Target::ScrollIndicator => Some(Props::rest(0.7)),
            Target::HeroHeading | Target::HeroSubtitle => Some(Props::rest(1.0)),
            _ => None,
        }
    }
}

/// Intro targets resolved once at setup. `E` is the element handle;
/// the core only looks at presence.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroTargets<E> {
    pub fill: Option<E>,
    pub loader: Option<E>,
    pub desktop_nav: Option<E>,
    pub hero_section: Option<E>,
    pub hero_heading: Option<E>,
    pub hero_subtitle: Option<E>,
    pub scroll_indicator: Option<E>,
    pub marquee: Option<E>,
}

impl<E> Default for IntroTargets<E> {
    fn default() -> Self {
        Self {
            fill: None,
            loader: None,
            desktop_nav: None,
            hero_section: None,
            hero_heading: None,
            hero_subtitle: None,
            scroll_indicator: None,
            marquee: None,
        }
    }
}

impl<E> IntroTargets<E> {
    /// Resolve every target through `find`
    pub fn resolve(mut find: impl FnMut(Target) -> Option<E>) -> Self {
        Self {
            fill: find(Target::Fill),
            loader: find(Target::Loader),
            desktop_nav: find(Target::DesktopNav),
            hero_section: find(Target::HeroSection),
            hero_heading: find(Target::HeroHeading),
            hero_subtitle: find(Target::HeroSubtitle),
            scroll_indicator: find(Target::ScrollIndicator),
            marquee: find(Target::Marquee),
        }
    }

    pub fn get(&self, target: Target) -> Option<&E> {
        match target {
            Target::Fill => self.fill.as_ref(),
            Target::Loader => self.loader.as_ref(),
            Target::DesktopNav => self.desktop_nav.as_ref(),
            Target::HeroSection => self.hero_section.as_ref(),
            Target::HeroHeading => self.hero_heading.as_ref(),
            Target::HeroSubtitle => self.hero_subtitle.as_ref(),
            Target::ScrollIndicator => self.scroll_indicator.as_ref(),
            Target::Marquee => self.marquee.as_ref(),
        }
    }

    pub fn has(&self, target: Target) -> bool {
        self.get(target).is_some()
    }

    /// Drop the handles, keep presence
    pub fn presence(&self) -> IntroTargets<()> {
        IntroTargets::resolve(|t| self.has(t).then_some(()))
    }
}

/// Steps of the one-time intro timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroStep {
    Fill,
    LoaderSlide,
    /// Zero-length cue that kicks off the hero entrance
    HeroCue,
}

/// Steps of the home hero entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroStep {
    Nav,
    Heading,
    Subtitle,
    ScrollIndicator,
}

/// Hero entrance progress
#[derive(Debug, Clone, PartialEq)]
pub enum HeroState {
    Pending,
    Playing(Timeline<HeroStep>),
    /// Played to the end, or set to rest without animating
    Settled,
}

/// Side effects for the platform to apply, in order
#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent {
    /// Smooth scroll switched on/off
    ScrollEnabled(bool),
    /// Start a tween on an intro target
    Tween { target: Target, tween: Tween },
    /// Jump straight to the resting state
    SetRest { target: Target, props: Props },
    HideLoader,
    /// Phase change
    Phase(SequenceState),
    /// Visited flag written
    SessionMarked,
    /// Reveal, scrollspy and scroll-indicator tracking armed
    TrackingStarted,
    Reveal(RevealChange),
    Spy(SpyChange),
    Menu(MenuMotion),
}

/// Everything the sequencer and its controllers own for the page lifetime
#[derive(Debug, Clone)]
pub struct SiteState {
    pub page: PageKind,
    pub config: SiteConfig,
    pub targets: IntroTargets<()>,
    pub phase: SequenceState,
    pub intro: Option<Timeline<IntroStep>>,
    pub hero: HeroState,
    pub scroll: ScrollGate,
    pub menu: MobileMenu,
    pub reveals: RevealRegistry,
    pub spy: Option<ScrollSpy>,
    /// Reveals and scrollspy are live
    pub tracking: bool,
    pub marquee_started: bool,
    pub scroll_cue_hidden: bool,
    pub events: Vec<SiteEvent>,
}

impl SiteState {
    /// Fails with `ReplayConflict` when two reveals share a target but not a policy.
    pub fn new(
        page: PageKind,
        config: SiteConfig,
        targets: IntroTargets<()>,
        reveals: Vec<RevealBinding>,
        spy: Option<ScrollSpy>,
    ) -> Result<Self> {
        let reveals = RevealRegistry::register(reveals)?;
        Ok(Self {
            page,
            config,
            targets,
            phase: SequenceState::NotStarted,
            intro: None,
            hero: HeroState::Pending,
            scroll: ScrollGate::default(),
            menu: MobileMenu::default(),
            reveals,
            spy,
            tracking: false,
            marquee_started: false,
            scroll_cue_hidden: false,
            events: Vec::new(),
        })
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<SiteEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace the scroll gate, emitting an event on an actual flip
    pub fn set_scroll(&mut self, next: ScrollGate) {
        if let Some(enabled) = self.scroll.transition(next) {
            self.events.push(SiteEvent::ScrollEnabled(enabled));
        }
        self.scroll = next;
    }

    pub fn set_phase(&mut self, phase: SequenceState) {
        if self.phase != phase {
            log::info!("Sequence {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(SiteEvent::Phase(phase));
        }
    }
}
