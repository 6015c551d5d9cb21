//! Collectible items: gems, hearts, keys, rocks and stars

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::consts::{COL_STEP, ITEM_CENTER_OFFSET, ITEM_ROW_OFFSET, ROW_STEP};

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    BlueGem,
    GreenGem,
    OrangeGem,
    Heart,
    /// Unlocks another player skin
    Key,
    /// Rock: costs points and life and sends the player home
    Obstacle,
    /// Starts a bonus level
    Star,
}

impl ItemKind {
    pub fn sprite(self) -> &'static str {
        match self {
            ItemKind::BlueGem => "gem-blue",
            ItemKind::GreenGem => "gem-green",
            ItemKind::OrangeGem => "gem-orange",
            ItemKind::Heart => "heart",
            ItemKind::Key => "key",
            ItemKind::Obstacle => "rock",
            ItemKind::Star => "star",
        }
    }

    /// CSS color used for HUD accents
    pub fn color(self) -> &'static str {
        match self {
            ItemKind::BlueGem => "blue",
            ItemKind::GreenGem => "green",
            ItemKind::OrangeGem => "orange",
            ItemKind::Heart => "red",
            ItemKind::Key => "gold",
            ItemKind::Obstacle => "gray",
            ItemKind::Star => "yellow",
        }
    }
}

/// Spawn table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub kind: ItemKind,
    /// Relative spawn probability (the default table sums to 1.0)
    pub weight: f64,
    pub points: i32,
    pub life: i32,
    /// Seconds on the board before expiring
    pub lifetime: f32,
}

impl ItemTemplate {
    pub fn new(kind: ItemKind, weight: f64, points: i32, life: i32, lifetime: f32) -> Self {
        Self {
            kind,
            weight,
            points,
            life,
            lifetime,
        }
    }
}

/// An item placed on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub piece: Piece,
    pub kind: ItemKind,
    pub points: i32,
    pub life: i32,
    pub time_remaining: f32,
    pub active: bool,
    pub center: Vec2,
}

impl Item {
    /// Place a new item from a template into a grid cell
    pub fn spawn(template: &ItemTemplate, row: usize, col: usize) -> Self {
        let pos = Vec2::new(
            col as f32 * COL_STEP,
            row as f32 * ROW_STEP + ITEM_ROW_OFFSET,
        );
        let piece = Piece::at(pos);
        Self {
            piece,
            kind: template.kind,
            points: template.points,
            life: template.life,
            time_remaining: template.lifetime,
            active: true,
            center: piece.offset(ITEM_CENTER_OFFSET),
        }
    }

    /// Count down the lifetime; the item goes inactive once it runs out
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.time_remaining -= dt;
            if self.time_remaining <= 0.0 {
                self.active = false;
            }
        }
    }

    /// Mark collected
    pub fn collect(&mut self) {
        self.active = false;
        self.time_remaining = 0.0;
    }

    /// Inactive items are not drawn
    pub fn visible(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position_and_center() {
        let template = ItemTemplate::new(ItemKind::GreenGem, 0.15, 10, 1, 4.0);
        let item = Item::spawn(&template, 1, 3);
        assert_eq!(item.piece.pos, Vec2::new(303.0, 133.0));
        assert_eq!(item.center, Vec2::new(353.0, 266.0));
        assert_eq!(item.points, 10);
        assert_eq!(item.life, 1);
        assert!(item.visible());
    }

    #[test]
    fn test_lifetime_expires() {
        let template = ItemTemplate::new(ItemKind::Key, 0.025, 0, 0, 2.0);
        let mut item = Item::spawn(&template, 0, 0);
        item.update(1.5);
        assert!(item.active);
        item.update(0.5);
        assert!(!item.active);
        assert!(!item.visible());
        // Stays expired
        item.update(1.0);
        assert_eq!(item.time_remaining, 0.0);
    }

    #[test]
    fn test_collect_deactivates() {
        let template = ItemTemplate::new(ItemKind::Star, 0.025, 25, 10, 2.0);
        let mut item = Item::spawn(&template, 2, 4);
        item.collect();
        assert!(!item.active);
        assert_eq!(item.time_remaining, 0.0);
    }

    #[test]
    fn test_kind_serializes_camel_case() {
        let json = serde_json::to_string(&ItemKind::OrangeGem).unwrap();
        assert_eq!(json, "\"orangeGem\"");
    }
}
