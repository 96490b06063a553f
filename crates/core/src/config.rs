use crate::{Transform, Vec2};
use serde::{Deserialize, Serialize};

/// Arc parameters for the hand fan. Angles are in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutRules {
    #[serde(default = "default_spread")]
    pub spread: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_max_tilt")]
    pub max_tilt: f32,
}

fn default_spread() -> f32 {
    60.0
}

fn default_radius() -> f32 {
    420.0
}

fn default_max_tilt() -> f32 {
    12.0
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            spread: default_spread(),
            radius: default_radius(),
            max_tilt: default_max_tilt(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRules {
    #[serde(default = "default_hand_capacity")]
    pub hand_capacity: usize,
    #[serde(default = "default_pile_draw")]
    pub pile_draw: usize,
    #[serde(default = "default_pile_origin")]
    pub pile_origin: Vec2,
    /// Per-index offset of stacked pile cards.
    #[serde(default = "default_pile_step")]
    pub pile_step: Vec2,
    #[serde(default = "default_hand_pivot")]
    pub hand_pivot: Vec2,
    /// Enlarged pose a drawn card settles into while focused.
    #[serde(default = "default_focus_anchor")]
    pub focus_anchor: Transform,
    #[serde(default = "default_lift_height")]
    pub lift_height: f32,
    #[serde(default = "default_lift_duration")]
    pub lift_duration: f32,
    #[serde(default = "default_travel_duration")]
    pub travel_duration: f32,
    #[serde(default = "default_settle_duration")]
    pub settle_duration: f32,
    #[serde(default)]
    pub layout: LayoutRules,
}

fn default_hand_capacity() -> usize {
    8
}

fn default_pile_draw() -> usize {
    15
}

fn default_pile_origin() -> Vec2 {
    Vec2::new(1100.0, 560.0)
}

fn default_pile_step() -> Vec2 {
    Vec2::new(0.0, -2.0)
}

fn default_hand_pivot() -> Vec2 {
    Vec2::new(640.0, 600.0)
}

fn default_focus_anchor() -> Transform {
    Transform {
        pos: Vec2::new(640.0, 330.0),
        scale: 1.6,
        rot: 0.0,
    }
}

fn default_lift_height() -> f32 {
    40.0
}

fn default_lift_duration() -> f32 {
    0.12
}

fn default_travel_duration() -> f32 {
    0.25
}

fn default_settle_duration() -> f32 {
    0.2
}

impl Default for BuildRules {
    fn default() -> Self {
        Self {
            hand_capacity: default_hand_capacity(),
            pile_draw: default_pile_draw(),
            pile_origin: default_pile_origin(),
            pile_step: default_pile_step(),
            hand_pivot: default_hand_pivot(),
            focus_anchor: default_focus_anchor(),
            lift_height: default_lift_height(),
            lift_duration: default_lift_duration(),
            travel_duration: default_travel_duration(),
            settle_duration: default_settle_duration(),
            layout: LayoutRules::default(),
        }
    }
}
