//! DOM side of the site: resolve elements once, measure every frame,
//! apply sequencer events.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use super::engine::{self, SmoothScroll};
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::menu::{MenuMotion, menu_tweens};
use crate::reveal::{self, RevealBinding, RevealDirection, RevealEffect, RevealRegistry};
use crate::scrollspy::{Indicator, ScrollSpy, SectionRect, SpyChange};
use crate::sequencer::{IntroTargets, PageKind, SiteEvent, TickInput};

/// All matches for a selector, in document order
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("Bad selector `{selector}`");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn array_of(elements: &[Element]) -> JsValue {
    elements.iter().collect::<js_sys::Array>().into()
}

fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(prop, value);
    }
}

/// Elements behind one reveal binding
struct RevealTarget {
    targets: Vec<Element>,
    trigger: Option<Element>,
    /// Paused tweens, built once tracking starts
    anims: Vec<JsValue>,
}

impl RevealTarget {
    /// Build the paused animations. `fromTo` tweens apply their start state
    /// here, so targets sit hidden until their trigger crosses the band.
    fn prepare(&mut self, effect: &RevealEffect) {
        if !self.anims.is_empty() || self.targets.is_empty() {
            return;
        }
        self.anims = match effect {
            RevealEffect::Animate(tween) => vec![engine::paused_tween(&array_of(&self.targets), tween)],
            RevealEffect::CountUp { duration, ease } => self
                .targets
                .iter()
                .filter_map(|el| {
                    let Some(target) = reveal::count_target(el.get_attribute("data-target").as_deref()) else {
                        log::warn!("Counter without a numeric data-target, skipped");
                        return None;
                    };
                    Some(engine::count_up(el, target, *duration, *ease))
                })
                .collect(),
        };
    }
}

/// Position of `el` in `seen`, by node identity, adding it if new
fn node_identity(seen: &mut Vec<Element>, el: &Element) -> usize {
    let node: &Node = el;
    if let Some(i) = seen.iter().position(|known| known.is_same_node(Some(node))) {
        return i;
    }
    seen.push(el.clone());
    seen.len() - 1
}

pub struct Page {
    window: Window,
    document: Document,
    pub kind: PageKind,
    pub targets: IntroTargets<Element>,
    reveals: Vec<RevealTarget>,
    sections: Vec<Element>,
    nav_items: Vec<Element>,
    backdrop: Option<Element>,
    burger: Option<Element>,
    menu_timeline: Option<JsValue>,
    smooth_scroll: Option<SmoothScroll>,
}

impl Page {
    /// Resolve everything the sequencer touches. Missing pieces are logged
    /// and left as `None`.
    pub fn resolve(window: Window, config: &SiteConfig) -> Result<Self, SiteError> {
        let document = window
            .document()
            .ok_or_else(|| SiteError::MissingElement("document".into()))?;

        let kind = PageKind::from_marker(
            document
                .body()
                .map(|b| b.class_list().contains(PageKind::PROJECT_MARKER))
                .unwrap_or(false),
        );

        let targets = IntroTargets::resolve(|target| {
            let found = document.query_selector(target.selector()).ok().flatten();
            if found.is_none() {
                log::warn!("{}", SiteError::MissingElement(target.selector().into()));
            }
            found
        });

        let desktop = !config.is_mobile(window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0));
        let smooth_scroll = if desktop && config.smooth_scroll {
            SmoothScroll::create()
        } else {
            None
        };

        let menu_timeline = Self::build_menu(&document);
        let burger = document.query_selector(".burger-btn").ok().flatten();

        Ok(Self {
            sections: query_all(&document, "section[id]"),
            nav_items: query_all(&document, ".nav-item"),
            backdrop: document.query_selector(".nav-backdrop").ok().flatten(),
            reveals: Vec::new(),
            window,
            document,
            kind,
            targets,
            burger,
            menu_timeline,
            smooth_scroll,
        })
    }

    fn build_menu(document: &Document) -> Option<JsValue> {
        let overlay = document.query_selector(".mobile-menu-overlay").ok().flatten()?;
        let links = query_all(document, ".mobile-link");
        let (overlay_tween, links_tween, overlap) = menu_tweens();
        Some(engine::menu_timeline(
            &overlay,
            &array_of(&links),
            &overlay_tween,
            &links_tween,
            overlap,
        ))
    }

    pub fn burger(&self) -> Option<&Element> {
        self.burger.as_ref()
    }

    pub fn mobile_links(&self) -> Vec<Element> {
        query_all(&self.document, ".mobile-link")
    }

    /// Expand this page's reveal table against the DOM. Fails when two
    /// bindings land on the same element with different replay policies.
    pub fn reveal_bindings(&mut self, config: &SiteConfig) -> Result<Vec<RevealBinding>, SiteError> {
        let specs = match self.kind {
            PageKind::Home => reveal::home_reveals(config.reveal_start),
            PageKind::ProjectDetail => reveal::project_reveals(config.reveal_start),
        };
        let document = self.document.clone();
        let bindings = reveal::expand(&specs, |sel| query_all(&document, sel).len());

        self.reveals = bindings
            .iter()
            .map(|binding| {
                let all = query_all(&self.document, &binding.target);
                let (targets, trigger) = match binding.index {
                    Some(i) => {
                        let el = all.into_iter().nth(i);
                        (el.iter().cloned().collect(), el)
                    }
                    None => (
                        all,
                        self.document.query_selector(&binding.trigger).ok().flatten(),
                    ),
                };
                RevealTarget {
                    targets,
                    trigger,
                    anims: Vec::new(),
                }
            })
            .collect();

        let mut seen = Vec::new();
        let resolved: Vec<Vec<usize>> = self
            .reveals
            .iter()
            .map(|r| r.targets.iter().map(|el| node_identity(&mut seen, el)).collect())
            .collect();
        RevealRegistry::check_resolved(&bindings, &resolved)?;
        Ok(bindings)
    }

    /// Scrollspy over `section[id]`, home page only
    pub fn scroll_spy(&self, config: &SiteConfig) -> Option<ScrollSpy> {
        if self.kind != PageKind::Home {
            return None;
        }
        let ids = self.sections.iter().map(|s| s.id()).collect();
        ScrollSpy::new(ids, self.backdrop.is_some(), config.spy_mode)
    }

    /// Geometry for one tick
    pub fn measure(&self) -> TickInput {
        let viewport_width = self.window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let viewport_height = self.window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        TickInput {
            viewport_width,
            viewport_height,
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            reveal_tops: self
                .reveals
                .iter()
                .map(|r| r.trigger.as_ref().map(|t| t.get_bounding_client_rect().top()))
                .collect(),
            sections: self
                .sections
                .iter()
                .map(|s| {
                    let rect = s.get_bounding_client_rect();
                    SectionRect {
                        top: rect.top(),
                        bottom: rect.bottom(),
                    }
                })
                .collect(),
            menu: Vec::new(),
        }
    }

    /// Drive the smooth-scroll wrapper for this frame
    pub fn frame(&self, time: f64) {
        if let Some(scroll) = &self.smooth_scroll {
            scroll.raf(time);
        }
    }

    pub fn apply(&mut self, event: &SiteEvent, bindings: &[RevealBinding]) {
        match event {
            SiteEvent::ScrollEnabled(enabled) => {
                if let Some(scroll) = &self.smooth_scroll {
                    if *enabled {
                        scroll.start();
                    } else {
                        scroll.stop();
                    }
                }
            }
            SiteEvent::Tween { target, tween } => {
                if let Some(el) = self.targets.get(*target) {
                    engine::tween(el, tween);
                }
            }
            SiteEvent::SetRest { target, props } => {
                if let (Some(el), Ok(vars)) = (self.targets.get(*target), serde_json::to_value(props)) {
                    engine::set(el, &vars);
                }
            }
            SiteEvent::HideLoader => {
                if let Some(loader) = &self.targets.loader {
                    set_style(loader, "display", "none");
                }
            }
            SiteEvent::TrackingStarted => {
                for (reveal, binding) in self.reveals.iter_mut().zip(bindings) {
                    reveal.prepare(&binding.effect);
                }
            }
            SiteEvent::Reveal(change) => {
                let (Some(reveal), Some(binding)) =
                    (self.reveals.get_mut(change.binding), bindings.get(change.binding))
                else {
                    return;
                };
                reveal.prepare(&binding.effect);
                for anim in &reveal.anims {
                    match change.direction {
                        RevealDirection::Play => engine::play(anim),
                        RevealDirection::Reverse => engine::reverse(anim),
                    }
                }
            }
            SiteEvent::Spy(change) => self.move_indicator(change),
            SiteEvent::Menu(motion) => {
                if let Some(burger) = &self.burger {
                    let _ = burger
                        .class_list()
                        .toggle_with_force("active", *motion == MenuMotion::Open);
                }
                if let Some(timeline) = &self.menu_timeline {
                    match motion {
                        MenuMotion::Open => engine::play(timeline),
                        MenuMotion::Close => engine::reverse(timeline),
                    }
                }
            }
            SiteEvent::Phase(phase) => log::debug!("Phase {phase:?}"),
            SiteEvent::SessionMarked => {}
        }
    }

    fn move_indicator(&self, change: &SpyChange) {
        let Some(backdrop) = &self.backdrop else {
            return;
        };
        let selector = format!(".nav-item[href*=\"#{}\"]", change.id);
        let Some(link) = self
            .document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|l| l.dyn_into::<HtmlElement>().ok())
        else {
            log::debug!("No nav link for section `{}`", change.id);
            return;
        };

        for item in &self.nav_items {
            set_style(item, "color", "");
        }
        set_style(&link, "color", "white");

        let indicator = Indicator::for_link(&link.id(), link.offset_left() as f64, link.offset_width() as f64);
        set_style(backdrop, "width", &format!("{}px", indicator.width));
        set_style(backdrop, "left", &format!("{}px", indicator.left));
        set_style(backdrop, "background", indicator.backdrop.css());
    }
}
