//! Sequencer entry points and per-frame tick

use super::state::{
    HeroState, HeroStep, IntroStep, PageKind, SequenceState, SiteEvent, SiteState, Target,
};
use super::timeline::{Position, Timeline};
use crate::consts::MARQUEE_DURATION;
use crate::menu::MenuInput;
use crate::scroll::ScrollActor;
use crate::scrollspy::SectionRect;
use crate::session::SessionFlagStore;
use crate::tween::{Ease, Props, Tween};

/// Everything measured by the platform for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub scroll_y: f64,
    /// Viewport-relative trigger tops, index-aligned with the reveal bindings
    pub reveal_tops: Vec<Option<f64>>,
    /// Viewport-relative section rects, in document order
    pub sections: Vec<SectionRect>,
    /// Menu clicks and resizes since the last frame, in arrival order
    pub menu: Vec<MenuInput>,
}

/// Read the visited flag and pick the intro or the fast path
pub fn start(state: &mut SiteState, session: &mut impl SessionFlagStore) {
    if state.phase != SequenceState::NotStarted {
        log::warn!("Sequencer already started ({:?})", state.phase);
        return;
    }
    if session.get() {
        skip_intro(state);
    } else {
        play_intro(state, session);
    }
}

/// Advance all timelines by `dt` seconds and react to scroll/menu input
pub fn tick(
    state: &mut SiteState,
    input: &TickInput,
    dt: f64,
    session: &mut impl SessionFlagStore,
) {
    for &menu_input in &input.menu {
        let (menu, gate, motion) =
            state
                .menu
                .apply(menu_input, state.scroll, state.config.mobile_breakpoint);
        state.menu = menu;
        state.set_scroll(gate);
        if let Some(motion) = motion {
            state.events.push(SiteEvent::Menu(motion));
        }
    }

    if state.phase == SequenceState::NotStarted {
        return;
    }

    // Hero first, so a hero started by the intro cue this frame is not
    // advanced twice
    advance_hero(state, dt);
    if state.phase == SequenceState::IntroPlaying {
        advance_intro(state, dt, session);
    }

    if state.tracking {
        track_scroll(state, input);
    }
}

/// Steady-state handoff: arm scroll tracking, start loops, play the hero
/// if nothing has yet. Returns `false` when it already ran.
pub fn enter_steady_state(state: &mut SiteState) -> bool {
    if state.tracking {
        log::debug!("Steady state already entered");
        return false;
    }
    state.tracking = true;

    let reveals = state.reveals.arm();
    let spy = state.spy.as_mut().map(|s| s.arm()).unwrap_or(false);
    log::info!(
        "Tracking {} reveal bindings, scrollspy {}",
        if reveals { state.reveals.len() } else { 0 },
        if spy { "on" } else { "off" }
    );
    state.events.push(SiteEvent::TrackingStarted);

    if state.targets.has(Target::Marquee) && !state.marquee_started {
        state.marquee_started = true;
        state.events.push(SiteEvent::Tween {
            target: Target::Marquee,
            tween: Tween::to(
                Props {
                    x_percent: Some(-100.0),
                    ..Default::default()
                },
                MARQUEE_DURATION,
                Ease::Linear,
            )
            .looping(),
        });
    }

    if state.page == PageKind::Home && state.hero == HeroState::Pending {
        play_hero(state, 0.0);
    }
    true
}

fn skip_intro(state: &mut SiteState) {
    log::info!("Returning visitor, skipping intro");
    if state.targets.has(Target::Loader) {
        state.events.push(SiteEvent::HideLoader);
    }

    let mut rest = vec![Target::DesktopNav, Target::ScrollIndicator];
    if state.page == PageKind::Home {
        rest.extend([Target::HeroHeading, Target::HeroSubtitle]);
    }
    for target in rest {
        if let (true, Some(props)) = (state.targets.has(target), target.rest_props()) {
            state.events.push(SiteEvent::SetRest { target, props });
        }
    }
    state.hero = HeroState::Settled;

    state.set_scroll(state.scroll.enable(ScrollActor::Preloader));
    state.set_phase(SequenceState::SteadyState);
    enter_steady_state(state);
}

fn play_intro(state: &mut SiteState, session: &mut impl SessionFlagStore) {
    log::info!("First visit this session, playing intro");
    state.set_scroll(state.scroll.disable(ScrollActor::Preloader));
    state.set_phase(SequenceState::IntroPlaying);

    let timings = state.config.intro;
    let mut timeline = Timeline::new();
    if state.targets.has(Target::Fill) {
        timeline.push("fill", timings.fill, Position::AfterPrevious, IntroStep::Fill);
    } else {
        log::warn!("No {} element, fill skipped", Target::Fill.selector());
    }
    if state.targets.has(Target::Loader) {
        timeline.push(
            "loader",
            timings.loader_slide,
            Position::AfterPrevious,
            IntroStep::LoaderSlide,
        );
    } else {
        log::warn!("No {} element, slide-out skipped", Target::Loader.selector());
    }
    timeline.push(
        "hero-cue",
        0.0,
        Position::Overlap(timings.hero_overlap),
        IntroStep::HeroCue,
    );
    if let Some(cue) = timeline.start_of("hero-cue") {
        log::info!("Intro ({:.1}s), hero cue at {cue:.1}s", timeline.duration());
    }
    state.intro = Some(timeline);

    advance_intro(state, 0.0, session);
}

fn advance_intro(state: &mut SiteState, dt: f64, session: &mut impl SessionFlagStore) {
    let Some(timeline) = state.intro.as_mut() else {
        return;
    };
    let (fired, done) = timeline.advance(dt);
    let elapsed = timeline.elapsed();
    let timings = state.config.intro;

    for step in fired {
        match step.action {
            IntroStep::Fill => state.events.push(SiteEvent::Tween {
                target: Target::Fill,
                tween: Tween::to(
                    Props {
                        background_position: Some("0% 0"),
                        ..Default::default()
                    },
                    timings.fill,
                    Ease::Power4InOut,
                ),
            }),
            IntroStep::LoaderSlide => state.events.push(SiteEvent::Tween {
                target: Target::Loader,
                tween: Tween::to(
                    Props {
                        y_percent: Some(-100.0),
                        ..Default::default()
                    },
                    timings.loader_slide,
                    Ease::Power4InOut,
                ),
            }),
            IntroStep::HeroCue => {
                if state.page == PageKind::Home {
                    play_hero(state, elapsed - step.at);
                } else {
                    log::debug!("Project page, hero cue ignored");
                }
            }
        }
    }

    if done {
        finish_intro(state, session);
    }
}

fn finish_intro(state: &mut SiteState, session: &mut impl SessionFlagStore) {
    session.set();
    state.events.push(SiteEvent::SessionMarked);
    state.set_scroll(state.scroll.enable(ScrollActor::Preloader));
    state.set_phase(SequenceState::SteadyState);
    enter_steady_state(state);
}

/// Start the home hero entrance, caught up by `late` seconds
fn play_hero(state: &mut SiteState, late: f64) {
    if state.hero != HeroState::Pending {
        return;
    }
    if !state.targets.has(Target::HeroSection) {
        log::warn!("No {} section, hero entrance skipped", Target::HeroSection.selector());
        state.hero = HeroState::Settled;
        return;
    }

    let mut timeline = Timeline::new();
    if state.targets.has(Target::DesktopNav) {
        timeline.push("nav", 0.8, Position::AfterPrevious, HeroStep::Nav);
    }
    if state.targets.has(Target::HeroHeading) {
        timeline.push("heading", 0.6, Position::Overlap(0.7), HeroStep::Heading);
    }
    if state.targets.has(Target::HeroSubtitle) {
        timeline.push("subtitle", 0.5, Position::Overlap(0.5), HeroStep::Subtitle);
    }
    if state.targets.has(Target::ScrollIndicator) {
        timeline.push(
            "scroll-indicator",
            0.5,
            Position::At(0.3),
            HeroStep::ScrollIndicator,
        );
    }
    log::info!("Hero entrance ({:.1}s)", timeline.duration());
    state.hero = HeroState::Playing(timeline);
    advance_hero(state, late.max(0.0));
}

fn advance_hero(state: &mut SiteState, dt: f64) {
    let HeroState::Playing(timeline) = &mut state.hero else {
        return;
    };
    let (fired, done) = timeline.advance(dt);
    for step in fired {
        let (target, tween) = hero_tween(step.action);
        state.events.push(SiteEvent::Tween { target, tween });
    }
    if done {
        state.hero = HeroState::Settled;
    }
}

/// Entrance tween for one hero step; each ends at the target's rest state
pub fn hero_tween(step: HeroStep) -> (Target, Tween) {
    match step {
        HeroStep::Nav => (
            Target::DesktopNav,
            Tween::from_to(
                Props {
                    y_percent: Some(-200.0),
                    x_percent: Some(-50.0),
                    auto_alpha: Some(0.0),
                    ..Default::default()
                },
                Props {
                    y_percent: Some(0.0),
                    x_percent: Some(-50.0),
                    auto_alpha: Some(1.0),
                    ..Default::default()
                },
                0.8,
                Ease::Power4Out,
            ),
        ),
        HeroStep::Heading => (
            Target::HeroHeading,
            Tween::from_to(Props::hidden_at(40.0), Props::rest(1.0), 0.6, Ease::Power4Out)
                .with_stagger(0.05),
        ),
        HeroStep::Subtitle => (
            Target::HeroSubtitle,
            Tween::from_to(Props::hidden_at(20.0), Props::rest(1.0), 0.5, Ease::Power3Out),
        ),
        HeroStep::ScrollIndicator => (
            Target::ScrollIndicator,
            Tween::from_to(Props::hidden_at(-10.0), Props::rest(0.7), 0.5, Ease::Power2Out),
        ),
    }
}

fn track_scroll(state: &mut SiteState, input: &TickInput) {
    let changes = state.reveals.update(input.viewport_height, &input.reveal_tops);
    state.events.extend(changes.into_iter().map(SiteEvent::Reveal));

    if let Some(spy) = state.spy.as_mut() {
        if let Some(change) = spy.update(&input.sections, input.viewport_height) {
            state.events.push(SiteEvent::Spy(change));
        }
    }

    if state.targets.has(Target::ScrollIndicator) {
        let hidden = input.scroll_y > state.config.scroll_indicator_threshold;
        if hidden != state.scroll_cue_hidden {
            state.scroll_cue_hidden = hidden;
            state.events.push(SiteEvent::Tween {
                target: Target::ScrollIndicator,
                tween: Tween::to(
                    Props {
                        opacity: Some(if hidden { 0.0 } else { 0.7 }),
                        ..Default::default()
                    },
                    0.3,
                    Ease::Linear,
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteConfig, SpyMode};
    use crate::menu::MenuMotion;
    use crate::reveal::{ReplayPolicy, RevealBinding, RevealEffect};
    use crate::scrollspy::ScrollSpy;
    use crate::sequencer::state::IntroTargets;
    use crate::session::MemorySession;
    use crate::SiteError;

    const FRAME: f64 = 0.1;

    fn targets(except: &[Target]) -> IntroTargets<()> {
        IntroTargets::resolve(|t| (!except.contains(&t)).then_some(()))
    }

    fn site(page: PageKind, except: &[Target]) -> SiteState {
        let reveals = vec![RevealBinding {
            target: ".about-image-wrapper".into(),
            trigger: ".about-section".into(),
            index: None,
            start: 0.85,
            effect: RevealEffect::Animate(Tween::default()),
            policy: ReplayPolicy::ReverseOnExit,
        }];
        let spy = ScrollSpy::new(vec!["about".into(), "work".into()], true, SpyMode::default());
        SiteState::new(page, SiteConfig::default(), targets(except), reveals, spy).unwrap()
    }

    fn frame() -> TickInput {
        TickInput {
            viewport_width: 1440.0,
            viewport_height: 900.0,
            ..Default::default()
        }
    }

    fn count(events: &[SiteEvent], pred: impl Fn(&SiteEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    fn tween_on(event: &SiteEvent, on: Target) -> bool {
        matches!(event, SiteEvent::Tween { target, .. } if *target == on)
    }

    /// Tick until steady state, returning (time, event) pairs
    fn run_to_steady(state: &mut SiteState, session: &mut MemorySession) -> Vec<(f64, SiteEvent)> {
        let mut trace: Vec<(f64, SiteEvent)> =
            state.drain_events().into_iter().map(|e| (0.0, e)).collect();
        let mut t = 0.0;
        let input = frame();
        for _ in 0..100 {
            t += FRAME;
            tick(state, &input, FRAME, session);
            trace.extend(state.drain_events().into_iter().map(|e| (t, e)));
            if state.phase == SequenceState::SteadyState && state.hero == HeroState::Settled {
                break;
            }
        }
        trace
    }

    #[test]
    fn test_first_visit_trace() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);

        assert_eq!(state.phase, SequenceState::IntroPlaying);
        assert!(!state.scroll.enabled);
        let intro = state.intro.as_ref().unwrap();
        assert_eq!(intro.start_of("fill"), Some(0.0));
        assert!((intro.start_of("loader").unwrap() - 2.5).abs() < 1e-9);
        assert!((intro.start_of("hero-cue").unwrap() - 2.6).abs() < 1e-9);

        let trace = run_to_steady(&mut state, &mut session);

        // Scroll goes off before anything animates
        let first_tween = trace.iter().position(|(_, e)| matches!(e, SiteEvent::Tween { .. }));
        let scroll_off = trace
            .iter()
            .position(|(_, e)| *e == SiteEvent::ScrollEnabled(false));
        assert!(scroll_off.unwrap() < first_tween.unwrap());

        let at = |pred: &dyn Fn(&SiteEvent) -> bool| {
            trace.iter().find(|(_, e)| pred(e)).map(|(t, _)| *t).unwrap()
        };
        assert_eq!(at(&|e| tween_on(e, Target::Fill)), 0.0);
        let loader = at(&|e| tween_on(e, Target::Loader));
        assert!((2.45..2.65).contains(&loader), "loader began at {loader}");
        let hero = at(&|e| tween_on(e, Target::DesktopNav));
        assert!((2.55..2.75).contains(&hero), "hero began at {hero}");
        assert!(hero > loader);

        // Completion: flag, then scroll, then tracking
        let marked = trace.iter().position(|(_, e)| *e == SiteEvent::SessionMarked).unwrap();
        let scroll_on = trace
            .iter()
            .position(|(_, e)| *e == SiteEvent::ScrollEnabled(true))
            .unwrap();
        let tracking = trace
            .iter()
            .position(|(_, e)| *e == SiteEvent::TrackingStarted)
            .unwrap();
        assert!(marked < scroll_on && scroll_on < tracking);
        assert!((3.25..3.45).contains(&trace[marked].0));

        assert!(session.get());
        assert_eq!(session.writes(), 1);
        assert!(state.scroll.enabled);
        // Already armed by the handoff
        assert!(!state.reveals.arm());
        assert_eq!(state.phase, SequenceState::SteadyState);
    }

    #[test]
    fn test_first_visit_hero_ends_at_rest() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let trace = run_to_steady(&mut state, &mut session);

        assert_eq!(state.hero, HeroState::Settled);
        for target in [
            Target::DesktopNav,
            Target::HeroHeading,
            Target::HeroSubtitle,
            Target::ScrollIndicator,
        ] {
            let last = trace
                .iter()
                .rev()
                .find_map(|(_, e)| match e {
                    SiteEvent::Tween { target: t, tween } if *t == target => Some(tween.to),
                    _ => None,
                })
                .unwrap();
            assert_eq!(Some(last), target.rest_props(), "{target:?}");
        }
        // Played once, not again on the steady-state handoff
        let nav_tweens = trace
            .iter()
            .filter(|(_, e)| tween_on(e, Target::DesktopNav))
            .count();
        assert_eq!(nav_tweens, 1);
    }

    #[test]
    fn test_repeat_visit_skips_intro() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::visited();
        start(&mut state, &mut session);
        let events = state.drain_events();

        assert!(state.intro.is_none());
        assert_eq!(state.phase, SequenceState::SteadyState);
        assert!(state.scroll.enabled);
        assert_eq!(state.hero, HeroState::Settled);
        assert_eq!(session.writes(), 0);

        assert!(events.contains(&SiteEvent::HideLoader));
        assert_eq!(count(&events, |e| matches!(e, SiteEvent::SetRest { .. })), 4);
        assert_eq!(count(&events, |e| matches!(e, SiteEvent::ScrollEnabled(false))), 0);
        for target in [Target::Fill, Target::Loader, Target::DesktopNav, Target::HeroHeading] {
            assert_eq!(count(&events, |e| tween_on(e, target)), 0);
        }
        assert_eq!(count(&events, |e| *e == SiteEvent::TrackingStarted), 1);
    }

    #[test]
    fn test_repeat_visit_project_page_rests_nav_only() {
        let mut state = site(PageKind::ProjectDetail, &[]);
        start(&mut state, &mut MemorySession::visited());
        let events = state.drain_events();
        let rested: Vec<Target> = events
            .iter()
            .filter_map(|e| match e {
                SiteEvent::SetRest { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(rested, vec![Target::DesktopNav, Target::ScrollIndicator]);
    }

    #[test]
    fn test_steady_state_is_idempotent() {
        let mut state = site(PageKind::Home, &[]);
        start(&mut state, &mut MemorySession::visited());
        assert!(!enter_steady_state(&mut state));
        assert!(!enter_steady_state(&mut state));
        let events = state.drain_events();
        assert_eq!(count(&events, |e| *e == SiteEvent::TrackingStarted), 1);
        assert_eq!(count(&events, |e| tween_on(e, Target::Marquee)), 1);
    }

    #[test]
    fn test_project_page_intro_has_no_hero() {
        let mut state = site(PageKind::ProjectDetail, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let trace = run_to_steady(&mut state, &mut session);
        assert_eq!(state.phase, SequenceState::SteadyState);
        assert!(session.get());
        assert!(!trace.iter().any(|(_, e)| tween_on(e, Target::DesktopNav)));
        assert_eq!(state.hero, HeroState::Pending);
    }

    #[test]
    fn test_missing_loader_runs_cue_only() {
        let mut state = site(PageKind::Home, &[Target::Fill, Target::Loader]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let events = state.drain_events();

        // Zero-length timeline completes on the spot
        assert_eq!(state.phase, SequenceState::SteadyState);
        assert!(session.get());
        assert!(state.scroll.enabled);
        assert_eq!(count(&events, |e| tween_on(e, Target::DesktopNav)), 1);
        assert_eq!(count(&events, |e| tween_on(e, Target::Loader)), 0);
    }

    #[test]
    fn test_missing_loader_cues_hero_off_fill() {
        let mut state = site(PageKind::Home, &[Target::Loader]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let intro = state.intro.as_ref().unwrap();
        assert_eq!(intro.start_of("loader"), None);
        assert!((intro.start_of("hero-cue").unwrap() - 1.8).abs() < 1e-9);

        let trace = run_to_steady(&mut state, &mut session);
        let hero = trace
            .iter()
            .find(|(_, e)| tween_on(e, Target::DesktopNav))
            .map(|(t, _)| *t)
            .unwrap();
        assert!((1.75..1.95).contains(&hero), "hero began at {hero}");
        assert!(!trace.iter().any(|(_, e)| tween_on(e, Target::Loader)));
        assert_eq!(session.writes(), 1);
    }

    #[test]
    fn test_long_frame_crosses_cue_and_completion() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        state.drain_events();

        // One stalled frame covers the cue, the loader end and the hero
        tick(&mut state, &frame(), 10.0, &mut session);
        let events = state.drain_events();

        assert_eq!(state.phase, SequenceState::SteadyState);
        assert_eq!(state.hero, HeroState::Settled);
        assert_eq!(session.writes(), 1);
        assert_eq!(count(&events, |e| *e == SiteEvent::SessionMarked), 1);
        for target in [Target::Loader, Target::DesktopNav, Target::HeroHeading] {
            assert_eq!(count(&events, |e| tween_on(e, target)), 1, "{target:?}");
        }

        tick(&mut state, &frame(), 10.0, &mut session);
        let events = state.drain_events();
        assert_eq!(session.writes(), 1);
        assert_eq!(count(&events, |e| tween_on(e, Target::DesktopNav)), 0);
    }

    #[test]
    fn test_repeat_visit_already_scrolled_hides_indicator() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::visited();
        start(&mut state, &mut session);
        state.drain_events();

        let scrolled = TickInput {
            scroll_y: 1200.0,
            ..frame()
        };
        tick(&mut state, &scrolled, FRAME, &mut session);
        let events = state.drain_events();
        assert!(state.scroll_cue_hidden);
        let fades: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SiteEvent::Tween { target: Target::ScrollIndicator, tween } => tween.to.opacity,
                _ => None,
            })
            .collect();
        assert_eq!(fades, vec![0.0]);

        // Still scrolled: no repeat fade
        tick(&mut state, &scrolled, FRAME, &mut session);
        assert_eq!(count(&state.drain_events(), |e| tween_on(e, Target::ScrollIndicator)), 0);
    }

    #[test]
    fn test_tracking_starts_before_first_reveal() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let mut events = state.drain_events();

        // Reveal trigger sits inside the band for the whole run
        let input = TickInput {
            reveal_tops: vec![Some(0.0)],
            ..frame()
        };
        for _ in 0..40 {
            tick(&mut state, &input, FRAME, &mut session);
            events.extend(state.drain_events());
        }
        let tracking = events.iter().position(|e| *e == SiteEvent::TrackingStarted).unwrap();
        let reveal = events
            .iter()
            .position(|e| matches!(e, SiteEvent::Reveal(_)))
            .unwrap();
        assert!(tracking < reveal);
        assert_eq!(count(&events, |e| matches!(e, SiteEvent::Reveal(_))), 1);
    }

    #[test]
    fn test_missing_hero_section_settles() {
        let mut state = site(PageKind::Home, &[Target::HeroSection]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        run_to_steady(&mut state, &mut session);
        assert_eq!(state.hero, HeroState::Settled);
        assert_eq!(state.phase, SequenceState::SteadyState);
    }

    #[test]
    fn test_no_tracking_during_intro() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let input = TickInput {
            reveal_tops: vec![Some(0.0)],
            ..frame()
        };
        tick(&mut state, &input, FRAME, &mut session);
        assert!(!state.drain_events().iter().any(|e| matches!(e, SiteEvent::Reveal(_))));
    }

    #[test]
    fn test_steady_state_tracks_scroll() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::visited();
        start(&mut state, &mut session);
        state.drain_events();

        let input = TickInput {
            scroll_y: 400.0,
            reveal_tops: vec![Some(100.0)],
            sections: vec![
                SectionRect { top: -400.0, bottom: 200.0 },
                SectionRect { top: 200.0, bottom: 900.0 },
            ],
            ..frame()
        };
        tick(&mut state, &input, FRAME, &mut session);
        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, SiteEvent::Reveal(_))), 1);
        assert!(events.iter().any(|e| matches!(e, SiteEvent::Spy(c) if c.id == "work")));
        assert!(state.scroll_cue_hidden);
        assert_eq!(count(&events, |e| tween_on(e, Target::ScrollIndicator)), 1);
    }

    #[test]
    fn test_resize_closes_menu_and_restores_scroll() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::visited();
        start(&mut state, &mut session);
        state.drain_events();

        let open = TickInput {
            menu: vec![MenuInput::BurgerClick],
            ..frame()
        };
        tick(&mut state, &open, FRAME, &mut session);
        assert!(state.menu.open);
        assert!(!state.scroll.enabled);

        let resize = TickInput {
            menu: vec![MenuInput::Resize { width: 1280.0 }],
            ..frame()
        };
        tick(&mut state, &resize, FRAME, &mut session);
        assert!(!state.menu.open);
        assert!(state.scroll.enabled);
        let events = state.drain_events();
        assert!(events.contains(&SiteEvent::Menu(MenuMotion::Close)));
        assert!(events.contains(&SiteEvent::ScrollEnabled(true)));
    }

    #[test]
    fn test_menu_during_intro_is_last_writer_wins() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);

        let toggle = TickInput {
            menu: vec![MenuInput::BurgerClick, MenuInput::BurgerClick],
            ..frame()
        };
        tick(&mut state, &toggle, FRAME, &mut session);
        // The menu re-enabled scroll mid-intro
        assert_eq!(state.phase, SequenceState::IntroPlaying);
        assert!(state.scroll.enabled);
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let mut state = site(PageKind::Home, &[]);
        let mut session = MemorySession::new();
        start(&mut state, &mut session);
        let before = state.intro.clone();
        start(&mut state, &mut MemorySession::visited());
        assert_eq!(state.intro, before);
        assert_eq!(state.phase, SequenceState::IntroPlaying);
    }

    #[test]
    fn test_conflicting_reveals_fail_setup() {
        let binding = |policy| RevealBinding {
            target: ".card".into(),
            trigger: ".card".into(),
            index: None,
            start: 0.85,
            effect: RevealEffect::Animate(Tween::default()),
            policy,
        };
        let err = SiteState::new(
            PageKind::Home,
            SiteConfig::default(),
            targets(&[]),
            vec![binding(ReplayPolicy::Once), binding(ReplayPolicy::ReverseOnExit)],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::ReplayConflict { .. }));
    }
}
