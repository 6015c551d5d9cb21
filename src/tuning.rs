//! Data-driven game balance
//!
//! Persisted separately from any game session in LocalStorage (web) or read
//! from a JSON file (native). Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::item::{ItemKind, ItemTemplate};

/// Errors raised while loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("item table is empty")]
    NoItems,
    #[error("item {kind:?} has invalid weight {weight}")]
    BadWeight { kind: ItemKind, weight: f64 },
    #[error("item weights sum to zero")]
    ZeroTotalWeight,
    #[error("item {kind:?} has non-positive lifetime {lifetime}")]
    BadLifetime { kind: ItemKind, lifetime: f32 },
    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}

/// Balance knobs for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Item spawn table (order defines the weighted list indices)
    pub items: Vec<ItemTemplate>,
    /// Weight moved from keys to orange gems per key collected
    pub key_weight_shift: f64,

    // === Enemies ===
    /// Max random speed gained per level (px/s)
    pub enemy_speed_per_level: f32,
    /// Slowest allowed enemy (px/s)
    pub enemy_min_speed: f32,
    /// Fastest allowed enemy, about one board width per second
    pub enemy_max_speed: f32,
    /// Cap on damage from one enemy hit
    pub max_enemy_damage: i32,

    // === Spawning ===
    /// Item cap while a star bonus is running
    pub bonus_item_cap: usize,
    /// Item cap once the level passes `late_item_cap_level`
    pub late_item_cap: usize,
    pub late_item_cap_level: u32,
    /// Spawn chance at level 0, ramps linearly to 1.0 at `spawn_chance_full_level`
    pub spawn_chance_base: f32,
    pub spawn_chance_full_level: u32,

    // === Progression ===
    /// next_level = ceil(level^2 / divisor)
    pub level_curve_divisor: f64,

    // === Point animations ===
    pub point_animation_time: f32,
    /// Drift speed (px/s) on both axes
    pub point_animation_speed: f32,
    /// Countdown drain per second
    pub point_animation_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            items: default_items(),
            key_weight_shift: 0.005,

            enemy_speed_per_level: 50.0,
            enemy_min_speed: 20.0,
            enemy_max_speed: 505.0,
            max_enemy_damage: 99,

            bonus_item_cap: 14,
            late_item_cap: 5,
            late_item_cap_level: 5,
            spawn_chance_base: 0.25,
            spawn_chance_full_level: 15,

            level_curve_divisor: 0.19,

            point_animation_time: 3.0,
            point_animation_speed: 60.0,
            point_animation_decay: 5.0,
        }
    }
}

/// Level-one item table
pub fn default_items() -> Vec<ItemTemplate> {
    vec![
        ItemTemplate::new(ItemKind::BlueGem, 0.50, 5, 0, 5.0),
        ItemTemplate::new(ItemKind::GreenGem, 0.15, 10, 1, 4.0),
        ItemTemplate::new(ItemKind::OrangeGem, 0.10, 20, 2, 3.0),
        ItemTemplate::new(ItemKind::Heart, 0.10, 0, 5, 4.0),
        ItemTemplate::new(ItemKind::Key, 0.025, 0, 0, 2.0),
        ItemTemplate::new(ItemKind::Obstacle, 0.10, -5, -5, 5.0),
        ItemTemplate::new(ItemKind::Star, 0.025, 25, 10, 2.0),
    ]
}

impl Tuning {
    /// Parse and validate a JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON tuning file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the table is usable by the spawner
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.items.is_empty() {
            return Err(TuningError::NoItems);
        }
        for item in &self.items {
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(TuningError::BadWeight {
                    kind: item.kind,
                    weight: item.weight,
                });
            }
            if !(item.lifetime > 0.0) {
                return Err(TuningError::BadLifetime {
                    kind: item.kind,
                    lifetime: item.lifetime,
                });
            }
        }
        let total: f64 = self.items.iter().map(|i| (i.weight * 1000.0).round()).sum();
        if total <= 0.0 {
            return Err(TuningError::ZeroTotalWeight);
        }
        if !(self.level_curve_divisor > 0.0) {
            return Err(TuningError::NotPositive {
                field: "level_curve_divisor",
            });
        }
        if !(self.point_animation_decay > 0.0) {
            return Err(TuningError::NotPositive {
                field: "point_animation_decay",
            });
        }
        if self.enemy_max_speed < self.enemy_min_speed || !(self.enemy_min_speed > 0.0) {
            return Err(TuningError::NotPositive {
                field: "enemy speed range",
            });
        }
        Ok(())
    }

    /// Spawn gate probability for a level (bonus levels always pass)
    pub fn spawn_chance(&self, level: u32, bonus_active: bool) -> f32 {
        if bonus_active {
            return 1.0;
        }
        let full = self.spawn_chance_full_level.max(1) as f32;
        let ramp = (level as f32 / full).min(1.0);
        let base = self.spawn_chance_base.clamp(0.0, 1.0);
        base + (1.0 - base) * ramp
    }

    /// Points needed in a level before the next level-up
    pub fn next_level(&self, level: u32) -> u32 {
        let level = f64::from(level);
        (level * level / self.level_curve_divisor).ceil() as u32
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "gem_crossing_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        let total: f64 = tuning.items.iter().map(|i| i.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_next_level_curve() {
        let tuning = Tuning::default();
        assert_eq!(tuning.next_level(1), 6);
        assert_eq!(tuning.next_level(2), 22);
        assert_eq!(tuning.next_level(3), 48);
        assert_eq!(tuning.next_level(10), 527);
    }

    #[test]
    fn test_spawn_chance_ramps_with_level() {
        let tuning = Tuning::default();
        let low = tuning.spawn_chance(1, false);
        let mid = tuning.spawn_chance(7, false);
        let high = tuning.spawn_chance(15, false);
        assert!(low < mid && mid < high);
        assert_eq!(high, 1.0);
        assert_eq!(tuning.spawn_chance(40, false), 1.0);
        assert_eq!(tuning.spawn_chance(1, true), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "bonus_item_cap": 9 }"#).unwrap();
        assert_eq!(tuning.bonus_item_cap, 9);
        assert_eq!(tuning.items, default_items());
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            Tuning::from_json(r#"{ "items": [] }"#),
            Err(TuningError::NoItems)
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));

        let mut tuning = Tuning::default();
        tuning.items[0].weight = -1.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BadWeight { kind: ItemKind::BlueGem, .. })
        ));

        let mut tuning = Tuning::default();
        for item in &mut tuning.items {
            item.weight = 0.0;
        }
        assert!(matches!(tuning.validate(), Err(TuningError::ZeroTotalWeight)));

        let mut tuning = Tuning::default();
        tuning.items[4].lifetime = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::BadLifetime { kind: ItemKind::Key, .. })
        ));
    }
}
