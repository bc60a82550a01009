//! Units and items placed on the grid.

use hexfog_core::{ItemId, UnitId};

/// Default movement points per turn.
pub const DEFAULT_SPEED: i32 = 24;

/// Default sight range in cells.
pub const DEFAULT_VISION_RANGE: i32 = 3;

/// Per-unit movement and sight parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitConfig {
    pub speed: i32,
    pub vision_range: i32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            vision_range: DEFAULT_VISION_RANGE,
        }
    }
}

/// A unit standing on exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub location: usize,
    pub speed: i32,
    pub vision_range: i32,
    /// Owned units reveal fog for the local player.
    pub owned: bool,
}

impl Unit {
    pub(crate) fn new(id: UnitId, location: usize, owned: bool, cfg: &UnitConfig) -> Self {
        Self {
            id,
            location,
            speed: cfg.speed,
            vision_range: cfg.vision_range,
            owned,
        }
    }
}

/// Item kinds. Pickup effects are resolved outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Treasure,
    Key,
    Coin,
    Bonus,
    Bomb,
    Poison,
    Energy,
    FakeTreasureItem,
    Change,
    FakeTreasure,
}

/// An item lying on a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub location: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_takes_config() {
        let cfg = UnitConfig {
            speed: 12,
            vision_range: 5,
        };
        let u = Unit::new(3, 40, true, &cfg);
        assert_eq!((u.id, u.location, u.speed, u.vision_range), (3, 40, 12, 5));
        assert_eq!(UnitConfig::default().speed, DEFAULT_SPEED);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unit_config_serde() {
        let cfg: UnitConfig = serde_json::from_str(r#"{"speed":30,"vision_range":2}"#).unwrap();
        assert_eq!(cfg.speed, 30);
        let kind: ItemKind = serde_json::from_str(r#""Treasure""#).unwrap();
        assert_eq!(kind, ItemKind::Treasure);
    }
}
