//! Portfolio Intro entry point
//!
//! Waits for the header/footer fragments, then runs the sequencer off the
//! tween engine's ticker, which also drives the smooth-scroll wrapper.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_site {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use portfolio_intro::SiteError;
    use portfolio_intro::config::SiteConfig;
    use portfolio_intro::menu::MenuInput;
    use portfolio_intro::platform::{Page, engine};
    use portfolio_intro::sequencer::{SiteState, start, tick};
    use portfolio_intro::session::BrowserSession;
    use portfolio_intro::startup::{Fragment, StartupGate};

    /// Site instance holding all state
    struct Site {
        state: SiteState,
        page: Page,
        session: BrowserSession,
        last_time: f64,
    }

    impl Site {
        fn new(config: SiteConfig) -> Result<Self, SiteError> {
            let window =
                web_sys::window().ok_or_else(|| SiteError::MissingElement("window".into()))?;
            let mut page = Page::resolve(window, &config)?;
            let bindings = page.reveal_bindings(&config)?;
            let spy = page.scroll_spy(&config);
            let state = SiteState::new(page.kind, config, page.targets.presence(), bindings, spy)?;
            Ok(Self {
                state,
                page,
                session: BrowserSession::open(),
                last_time: 0.0,
            })
        }

        fn start(&mut self) {
            start(&mut self.state, &mut self.session);
            self.flush();
        }

        /// Apply pending sequencer events to the page
        fn flush(&mut self) {
            for event in self.state.drain_events() {
                self.page.apply(&event, self.state.reveals.bindings());
            }
        }

        fn frame(&mut self, time: f64) {
            // Smooth scroll first so measurements see this frame's position
            self.page.frame(time);

            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.page.measure();
            tick(&mut self.state, &input, dt, &mut self.session);
            self.flush();
        }

        /// Menu input is handled on the spot, not on the next frame
        fn menu(&mut self, menu_input: MenuInput) {
            let mut input = self.page.measure();
            input.menu.push(menu_input);
            tick(&mut self.state, &input, 0.0, &mut self.session);
            self.flush();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let config = Rc::new(SiteConfig::load());
        let gate = Rc::new(RefCell::new(StartupGate::new()));

        for fragment in [Fragment::Header, Fragment::Footer] {
            let gate = gate.clone();
            let config = config.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let ready = gate.borrow_mut().on_loaded(fragment);
                if ready {
                    launch(&config);
                }
            });
            let _ = window.add_event_listener_with_callback(
                fragment.loaded_event(),
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Fallback if a fragment never shows up
        {
            let fallback_ms = config.fragment_fallback_ms as i32;
            let closure = Closure::once(move || {
                let ready = gate.borrow_mut().on_timeout();
                if ready {
                    launch(&config);
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                fallback_ms,
            );
            closure.forget();
        }

        log::info!("Portfolio intro waiting for fragments...");
    }

    fn launch(config: &SiteConfig) {
        if !engine::engine_ready() {
            log::error!("GSAP not loaded, animations disabled");
            return;
        }

        let site = match Site::new(config.clone()) {
            Ok(site) => Rc::new(RefCell::new(site)),
            Err(e) => {
                log::error!("Site setup failed: {e}");
                return;
            }
        };
        log::info!("Launching on {:?} page", site.borrow().page.kind);

        site.borrow_mut().start();
        setup_menu_handlers(site.clone());
        drive_from_ticker(site);
    }

    fn setup_menu_handlers(site: Rc<RefCell<Site>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Burger toggle
        if let Some(burger) = site.borrow().page.burger() {
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                site.borrow_mut().menu(MenuInput::BurgerClick);
            });
            let _ = burger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mobile links close the menu
        for link in site.borrow().page.mobile_links() {
            let site = site.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                site.borrow_mut().menu(MenuInput::LinkClick);
            });
            let _ = link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Growing past the breakpoint force-closes the menu
        {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let width = window_clone
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(0.0);
                site.borrow_mut().menu(MenuInput::Resize { width });
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One callback on the tween engine's ticker drives smooth scroll and
    /// the sequencer, so all three advance on the same frame clock
    fn drive_from_ticker(site: Rc<RefCell<Site>>) {
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            site.borrow_mut().frame(time);
        });
        engine::on_tick(&closure);
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_site::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio intro (native) starting...");
    log::info!("The site runs in the browser - build with `trunk serve` for the web version");

    println!("\nFirst-visit intro trace:");
    trace_first_visit();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print the first-visit event trace at 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn trace_first_visit() {
    use portfolio_intro::config::SiteConfig;
    use portfolio_intro::sequencer::{
        HeroState, IntroTargets, PageKind, SequenceState, SiteState, TickInput, start, tick,
    };
    use portfolio_intro::session::{MemorySession, SessionFlagStore};

    let targets = IntroTargets::resolve(|_| Some(()));
    let mut state = match SiteState::new(PageKind::Home, SiteConfig::default(), targets, Vec::new(), None) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    let mut session = MemorySession::new();
    start(&mut state, &mut session);

    let dt = 1.0 / 60.0;
    let input = TickInput {
        viewport_width: 1440.0,
        viewport_height: 900.0,
        ..Default::default()
    };
    let mut t = 0.0;
    loop {
        for event in state.drain_events() {
            println!("  t={t:>5.2}s  {event:?}");
        }
        if state.phase == SequenceState::SteadyState && state.hero == HeroState::Settled {
            break;
        }
        tick(&mut state, &input, dt, &mut session);
        t += dt;
    }
    println!("✓ Intro complete, visited flag = {}", session.get());
}
