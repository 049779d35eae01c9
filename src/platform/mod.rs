//! Browser platform layer (wasm32 only)
//!
//! - `engine`: GSAP and Lenis bindings
//! - `dom`: element resolution, per-frame measurement, event application

pub mod dom;
pub mod engine;

pub use dom::Page;
pub use engine::SmoothScroll;
