//! Physics tuning
//!
//! Every gameplay constant lives here so the host can override any subset of
//! them from JSON without a rebuild. Defaults reproduce the shipped feel.

use serde::{Deserialize, Serialize};

/// Physics tuning knobs (all distances in pixels, all rates per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Body radius
    pub player_radius: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_force: f32,
    /// Downward acceleration per tick
    pub gravity: f32,

    // === Hammer ===
    pub hammer_length: f32,
    /// Visual width of the hammer handle
    pub hammer_width: f32,
    /// A hit closer than this to the hammer tip dangles instead of hooking
    pub dangle_threshold: f32,
    /// Extra rope allowed beyond the hammer length while dangling
    pub dangle_slack: f32,
    /// Horizontal spring pulling a swinging player back onto the swing circle
    pub swing_spring: f32,
    /// Velocity added per pixel of pointer movement while hooked
    pub pointer_drag_factor: f32,

    // === Floor ===
    /// Upward push per pixel of penetration below the floor plane
    pub buoyancy_factor: f32,

    // === Hammer strikes ===
    /// Base impulse when the free hammer hits terrain
    pub strike_impulse: f32,
    /// Extra impulse per unit of current speed
    pub strike_speed_bonus: f32,

    // === Friction (velocity multiplier per tick) ===
    pub drag_friction: f32,
    pub swing_friction: f32,
    pub dangle_friction: f32,
    pub air_friction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            jump_force: -15.0,
            gravity: 0.5,

            hammer_length: 100.0,
            hammer_width: 15.0,
            dangle_threshold: 30.0,
            dangle_slack: 10.0,
            swing_spring: 0.5,
            pointer_drag_factor: 0.5,

            buoyancy_factor: 0.1,

            strike_impulse: 2.0,
            strike_speed_bonus: 0.03,

            drag_friction: 0.9,
            swing_friction: 0.99,
            dangle_friction: 0.98,
            air_friction: 0.95,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON (for dumping the active tuning)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse `json` if present, falling back to defaults on error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(text) => match Self::from_json(text) {
                Ok(settings) => {
                    log::info!("Loaded tuning overrides");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid tuning JSON: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Id of the DOM element that may carry tuning JSON
    const TUNING_ELEMENT_ID: &'static str = "tuning";

    /// Load tuning from the page's `<script type="application/json" id="tuning">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::TUNING_ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_json_or_default(text.as_deref())
    }

    /// Native: read tuning JSON from the `POT_CLIMB_TUNING` environment variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("Tuning element id '{}' unused natively", Self::TUNING_ELEMENT_ID);
        let text = std::env::var("POT_CLIMB_TUNING").ok();
        Self::from_json_or_default(text.as_deref())
    }
}
