//! Scroll-triggered reveals
//!
//! Each binding watches its trigger element's top edge against a band at
//! `start * viewport_height`. Crossing it plays the binding's effect.

use crate::error::{Result, SiteError};
use crate::tween::{Ease, Props, Tween};

/// What happens when the trigger scrolls back out of the band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// Play on first entry, then never again
    Once,
    /// Reverse when scrolled back above, play again on re-entry
    ReverseOnExit,
}

/// What a reveal does to its targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealEffect {
    Animate(Tween),
    /// Count each target's text up to its `data-target`, as a whole
    /// number with a `+` suffix
    CountUp { duration: f64, ease: Ease },
}

/// Declarative reveal, written against selectors
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub trigger: &'static str,
    pub targets: &'static str,
    /// One binding per matched element, each its own trigger
    pub per_element: bool,
    pub start: f64,
    pub effect: RevealEffect,
    pub policy: ReplayPolicy,
}

/// A registered reveal, resolved against the DOM by selector
#[derive(Debug, Clone, PartialEq)]
pub struct RevealBinding {
    pub target: String,
    pub trigger: String,
    /// Per-element binding: the `index`th match of `target` is both the
    /// animated element and the trigger
    pub index: Option<usize>,
    pub start: f64,
    pub effect: RevealEffect,
    pub policy: ReplayPolicy,
}

impl RevealBinding {
    /// Whether both bindings can animate the same element, judged on
    /// selectors alone
    fn overlaps(&self, other: &Self) -> bool {
        self.target == other.target
            && match (self.index, other.index) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }

    fn describe(&self) -> String {
        match self.index {
            Some(i) => format!("{}[{i}]", self.target),
            None => self.target.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealDirection {
    Play,
    Reverse,
}

/// A binding's animation starting in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealChange {
    pub binding: usize,
    pub direction: RevealDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealState {
    Waiting,
    Played,
    /// Once-only binding that has fired
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct RevealRegistry {
    bindings: Vec<RevealBinding>,
    states: Vec<RevealState>,
    armed: bool,
}

impl RevealRegistry {
    /// Validate and store bindings. Bindings stay inert until [`arm`](Self::arm).
    pub fn register(bindings: Vec<RevealBinding>) -> Result<Self> {
        for (i, binding) in bindings.iter().enumerate() {
            let clash = bindings[..i]
                .iter()
                .any(|earlier| earlier.policy != binding.policy && earlier.overlaps(binding));
            if clash {
                return Err(SiteError::ReplayConflict {
                    target: binding.describe(),
                });
            }
        }
        let states = vec![RevealState::Waiting; bindings.len()];
        Ok(Self {
            bindings,
            states,
            armed: false,
        })
    }

    /// Check bindings against the elements they actually resolved to.
    /// `resolved[i]` holds an identity per element of binding `i`; two
    /// bindings sharing an element must share a replay policy.
    pub fn check_resolved<K: PartialEq>(bindings: &[RevealBinding], resolved: &[Vec<K>]) -> Result<()> {
        for (i, binding) in bindings.iter().enumerate() {
            let Some(elements) = resolved.get(i) else {
                continue;
            };
            for (j, earlier) in bindings[..i].iter().enumerate() {
                if earlier.policy == binding.policy {
                    continue;
                }
                let shared = resolved
                    .get(j)
                    .is_some_and(|theirs| elements.iter().any(|el| theirs.contains(el)));
                if shared {
                    return Err(SiteError::ReplayConflict {
                        target: format!("{} / {}", earlier.describe(), binding.describe()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Start watching. Returns `false` if already armed.
    pub fn arm(&mut self) -> bool {
        !std::mem::replace(&mut self.armed, true)
    }

    pub fn bindings(&self) -> &[RevealBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Compare trigger tops (viewport-relative, index-aligned with the
    /// bindings) against each band. `None` tops are skipped.
    pub fn update(&mut self, viewport_height: f64, trigger_tops: &[Option<f64>]) -> Vec<RevealChange> {
        if !self.armed {
            return Vec::new();
        }
        let mut changes = Vec::new();
        for (i, binding) in self.bindings.iter().enumerate() {
            let Some(top) = trigger_tops.get(i).copied().flatten() else {
                continue;
            };
            let inside = top <= binding.start * viewport_height;
            let state = &mut self.states[i];
            let direction = match (*state, inside, binding.policy) {
                (RevealState::Waiting, true, ReplayPolicy::Once) => {
                    *state = RevealState::Done;
                    Some(RevealDirection::Play)
                }
                (RevealState::Waiting, true, ReplayPolicy::ReverseOnExit) => {
                    *state = RevealState::Played;
                    Some(RevealDirection::Play)
                }
                (RevealState::Played, false, _) => {
                    *state = RevealState::Waiting;
                    Some(RevealDirection::Reverse)
                }
                _ => None,
            };
            if let Some(direction) = direction {
                changes.push(RevealChange {
                    binding: i,
                    direction,
                });
            }
        }
        changes
    }
}

/// Expand selector specs against the live DOM. `count` returns how many
/// elements a selector matches; zero matches yield no binding.
pub fn expand(specs: &[RevealSpec], mut count: impl FnMut(&str) -> usize) -> Vec<RevealBinding> {
    let mut out = Vec::new();
    for spec in specs {
        let n = count(spec.targets);
        if n == 0 {
            log::debug!("Reveal `{}` matches nothing, skipped", spec.targets);
            continue;
        }
        if spec.per_element {
            out.extend((0..n).map(|i| RevealBinding {
                target: spec.targets.to_string(),
                trigger: spec.targets.to_string(),
                index: Some(i),
                start: spec.start,
                effect: spec.effect,
                policy: spec.policy,
            }));
        } else {
            out.push(RevealBinding {
                target: spec.targets.to_string(),
                trigger: spec.trigger.to_string(),
                index: None,
                start: spec.start,
                effect: spec.effect,
                policy: spec.policy,
            });
        }
    }
    out
}

/// Reveals on the home page
pub fn home_reveals(start: f64) -> Vec<RevealSpec> {
    vec![
        RevealSpec {
            trigger: ".about-section",
            targets: ".about-text .reveal-text",
            per_element: false,
            start: 0.70,
            effect: RevealEffect::Animate(Tween {
                from: Some(Props::hidden_at(30.0)),
                ..Tween::to(Props::rest(1.0), 1.0, Ease::Power3Out).with_stagger(0.1)
            }),
            policy: ReplayPolicy::ReverseOnExit,
        },
        RevealSpec {
            trigger: ".about-section",
            targets: ".about-image-wrapper",
            per_element: false,
            start: 0.70,
            effect: RevealEffect::Animate(Tween::to(
                Props {
                    auto_alpha: Some(1.0),
                    scale: Some(1.0),
                    ..Default::default()
                },
                1.5,
                Ease::Power2Out,
            )),
            policy: ReplayPolicy::ReverseOnExit,
        },
        RevealSpec {
            trigger: ".stats-grid",
            targets: ".counter",
            per_element: false,
            start,
            effect: RevealEffect::CountUp {
                duration: 2.0,
                ease: Ease::Power1Out,
            },
            policy: ReplayPolicy::Once,
        },
    ]
}

/// Final value for a counter, from its `data-target` attribute
pub fn count_target(attr: Option<&str>) -> Option<f64> {
    attr?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reveals on a project page
pub fn project_reveals(start: f64) -> Vec<RevealSpec> {
    let rise = |y: f64, duration: f64, ease: Ease| Tween {
        from: Some(Props {
            y: Some(y),
            opacity: Some(0.0),
            ..Default::default()
        }),
        ..Tween::to(
            Props {
                y: Some(0.0),
                opacity: Some(1.0),
                ..Default::default()
            },
            duration,
            ease,
        )
    };
    vec![
        RevealSpec {
            trigger: ".context-section h2, .context-section p",
            targets: ".context-section h2, .context-section p",
            per_element: true,
            start,
            effect: RevealEffect::Animate(rise(30.0, 0.8, Ease::Power3Out)),
            policy: ReplayPolicy::Once,
        },
        RevealSpec {
            trigger: ".scroll-image-item",
            targets: ".scroll-image-item",
            per_element: true,
            start,
            effect: RevealEffect::Animate(rise(50.0, 1.0, Ease::Power2Out)),
            policy: ReplayPolicy::Once,
        },
    ]
}
