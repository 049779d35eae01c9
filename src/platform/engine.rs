//! Bindings to the page's tween engine (GSAP) and smooth-scroll wrapper (Lenis)
//!
//! Both are loaded by `<script>` tags before the wasm module starts.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::tween::{Ease, Tween};

#[wasm_bindgen(inline_js = "
    export function engine_ready() {
        return typeof window.gsap !== 'undefined';
    }

    export function ticker_add(callback) {
        window.gsap.ticker.lagSmoothing(0);
        window.gsap.ticker.add((time) => callback(time * 1000));
    }

    export function gsap_tween(targets, from_vars, to_vars, paused) {
        const vars = paused ? Object.assign({}, to_vars, { paused: true }) : to_vars;
        return from_vars
            ? window.gsap.fromTo(targets, from_vars, vars)
            : window.gsap.to(targets, vars);
    }

    export function gsap_count_up(el, target, vars) {
        return window.gsap.to(el, Object.assign({}, vars, {
            innerText: target,
            snap: { innerText: 1 },
            paused: true,
            onUpdate: () => { el.innerText = Math.ceil(parseFloat(el.innerText)) + '+'; },
        }));
    }

    export function gsap_set(targets, vars) {
        window.gsap.set(targets, vars);
    }

    export function gsap_menu_timeline(overlay, links, overlay_vars, links_vars, overlap) {
        return window.gsap.timeline({ paused: true })
            .to(overlay, overlay_vars)
            .from(links, links_vars, '-=' + overlap);
    }

    export function anim_play(anim) { anim.play(); }
    export function anim_reverse(anim) { anim.reverse(); }

    export function lenis_create() {
        if (typeof window.Lenis === 'undefined') return null;
        const lenis = new window.Lenis({
            duration: 1.2,
            easing: (t) => Math.min(1, 1.001 - Math.pow(2, -10 * t)),
            smooth: true,
        });
        window.lenis = lenis;
        return lenis;
    }

    export function lenis_start(lenis) { lenis.start(); }
    export function lenis_stop(lenis) { lenis.stop(); }
    export function lenis_raf(lenis, time) { lenis.raf(time); }
")]
extern "C" {
    pub fn engine_ready() -> bool;
    fn ticker_add(callback: &js_sys::Function);
    fn gsap_tween(targets: &JsValue, from_vars: &JsValue, to_vars: &JsValue, paused: bool) -> JsValue;
    fn gsap_count_up(el: &JsValue, target: f64, vars: &JsValue) -> JsValue;
    fn gsap_set(targets: &JsValue, vars: &JsValue);
    fn gsap_menu_timeline(
        overlay: &JsValue,
        links: &JsValue,
        overlay_vars: &JsValue,
        links_vars: &JsValue,
        overlap: f64,
    ) -> JsValue;
    fn anim_play(anim: &JsValue);
    fn anim_reverse(anim: &JsValue);
    fn lenis_create() -> JsValue;
    fn lenis_start(lenis: &JsValue);
    fn lenis_stop(lenis: &JsValue);
    fn lenis_raf(lenis: &JsValue, time: f64);
}

fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

/// Start a tween right away
pub fn tween(targets: &JsValue, tween: &Tween) {
    run(targets, tween, false);
}

/// Create a paused tween to be played/reversed later
pub fn paused_tween(targets: &JsValue, tween: &Tween) -> JsValue {
    run(targets, tween, true)
}

fn run(targets: &JsValue, tween: &Tween, paused: bool) -> JsValue {
    let from = tween.from_vars().map(|v| to_js(&v)).unwrap_or(JsValue::NULL);
    gsap_tween(targets, &from, &to_js(&tween.to_vars()), paused)
}

/// Paused count-up from the element's current text to `target`
pub fn count_up(el: &JsValue, target: f64, duration: f64, ease: Ease) -> JsValue {
    let vars = serde_json::json!({ "duration": duration, "ease": ease.as_str() });
    gsap_count_up(el, target, &to_js(&vars))
}

/// Drive `frame` (time in ms) from the tween engine's ticker, so tweens,
/// smooth scroll and the sequencer share one clock
pub fn on_tick(frame: &Closure<dyn FnMut(f64)>) {
    ticker_add(frame.as_ref().unchecked_ref());
}

pub fn set(targets: &JsValue, vars: &Value) {
    gsap_set(targets, &to_js(vars));
}

/// Paused overlay+links timeline; links tween *from* their `from` props
pub fn menu_timeline(overlay: &JsValue, links: &JsValue, overlay_tween: &Tween, links_tween: &Tween, overlap: f64) -> JsValue {
    let mut links_vars = links_tween.to_vars();
    if let (Some(Value::Object(from)), Value::Object(vars)) = (links_tween.from_vars(), &mut links_vars) {
        vars.extend(from);
    }
    gsap_menu_timeline(
        overlay,
        links,
        &to_js(&overlay_tween.to_vars()),
        &to_js(&links_vars),
        overlap,
    )
}

pub fn play(anim: &JsValue) {
    anim_play(anim);
}

pub fn reverse(anim: &JsValue) {
    anim_reverse(anim);
}

/// Smooth-scroll wrapper handle
pub struct SmoothScroll(JsValue);

impl SmoothScroll {
    /// `None` when the Lenis script isn't on the page
    pub fn create() -> Option<Self> {
        let lenis = lenis_create();
        if lenis.is_null() || lenis.is_undefined() {
            log::warn!("Lenis not loaded, native scrolling");
            None
        } else {
            Some(Self(lenis))
        }
    }

    pub fn start(&self) {
        lenis_start(&self.0);
    }

    pub fn stop(&self) {
        lenis_stop(&self.0);
    }

    /// Drive one frame (`time` in ms)
    pub fn raf(&self, time: f64) {
        lenis_raf(&self.0, time);
    }
}
