//! Animation descriptors handed to the tween engine
//!
//! The engine itself lives in JS; these are the vars objects it receives.

use serde::Serialize;
use serde_json::{Map, Value};

/// Easing curves used by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    #[default]
    Linear,
    Power1Out,
    Power2Out,
    Power3Out,
    Power4Out,
    Power3InOut,
    Power4InOut,
}

impl Ease {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::Power1Out => "power1.out",
            Ease::Power2Out => "power2.out",
            Ease::Power3Out => "power3.out",
            Ease::Power4Out => "power4.out",
            Ease::Power3InOut => "power3.inOut",
            Ease::Power4InOut => "power4.inOut",
        }
    }
}

/// Animated properties, serialized with the engine's camelCase names
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_percent: Option<f64>,
    /// Opacity plus visibility toggling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<&'static str>,
}

impl Props {
    /// Resting position at the given alpha
    pub fn rest(alpha: f64) -> Self {
        Self {
            y: Some(0.0),
            auto_alpha: Some(alpha),
            ..Default::default()
        }
    }

    /// Offset by `y` and fully transparent
    pub fn hidden_at(y: f64) -> Self {
        Self {
            y: Some(y),
            auto_alpha: Some(0.0),
            ..Default::default()
        }
    }
}

/// A single tween: optional start state, end state and timing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tween {
    /// `None` tweens from the element's current state
    pub from: Option<Props>,
    pub to: Props,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: Option<f64>,
    /// Repeat forever
    pub looping: bool,
}

impl Tween {
    pub fn to(to: Props, duration: f64, ease: Ease) -> Self {
        Self {
            to,
            duration,
            ease,
            ..Default::default()
        }
    }

    pub fn from_to(from: Props, to: Props, duration: f64, ease: Ease) -> Self {
        Self {
            from: Some(from),
            to,
            duration,
            ease,
            ..Default::default()
        }
    }

    pub fn with_stagger(mut self, stagger: f64) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// End-state vars object, timing keys included
    pub fn to_vars(&self) -> Value {
        let mut vars = props_object(&self.to);
        vars.insert("duration".into(), self.duration.into());
        vars.insert("ease".into(), self.ease.as_str().into());
        if let Some(stagger) = self.stagger {
            vars.insert("stagger".into(), stagger.into());
        }
        if self.looping {
            vars.insert("repeat".into(), (-1).into());
        }
        Value::Object(vars)
    }

    /// Start-state vars object, if any
    pub fn from_vars(&self) -> Option<Value> {
        self.from.as_ref().map(|p| Value::Object(props_object(p)))
    }
}

fn props_object(props: &Props) -> Map<String, Value> {
    match serde_json::to_value(props) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
