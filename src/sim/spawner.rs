//! Weighted item selection and spawn caps
//!
//! Each template's weight is expanded into `round(weight * 1000)` copies of its
//! index; a uniform pick over that list is a weighted pick over the table.

use rand::Rng;

use super::item::{ItemKind, ItemTemplate};
use crate::tuning::Tuning;

/// Entries per unit of weight
pub const WEIGHT_RESOLUTION: f64 = 1000.0;

/// Flattened sampling list of template indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedTable {
    entries: Vec<usize>,
}

impl WeightedTable {
    pub fn build(items: &[ItemTemplate]) -> Self {
        let mut entries = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let copies = (item.weight.max(0.0) * WEIGHT_RESOLUTION).round() as usize;
            entries.extend(std::iter::repeat_n(index, copies));
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Template index drawn with probability proportional to its weight
    pub fn pick(&self, rng: &mut impl Rng) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[rng.random_range(0..self.entries.len())])
    }
}

/// How many items may be on the board at once
pub fn max_items(level: u32, bonus_active: bool, tuning: &Tuning) -> usize {
    if bonus_active {
        tuning.bonus_item_cap
    } else if level > tuning.late_item_cap_level {
        tuning.late_item_cap
    } else {
        level as usize
    }
}

/// Make keys rarer and orange gems commoner after a key pickup
pub fn shift_key_weight(items: &mut [ItemTemplate], shift: f64) {
    for item in items.iter_mut() {
        match item.kind {
            ItemKind::Key => item.weight = (item.weight - shift).max(0.0),
            ItemKind::OrangeGem => item.weight += shift,
            _ => {}
        }
    }
}
