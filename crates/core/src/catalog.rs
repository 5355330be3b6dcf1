use serde::Serialize;

pub const TIER_COUNT: usize = 8;

/// Prices of every tier, index-aligned with [`UPGRADE_CATALOG`].
pub type UpgradePrices = [u64; TIER_COUNT];

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct UpgradeTier {
    pub index: usize,
    pub name: &'static str,
    /// Element id of the store entry on the live game page.
    pub store_id: &'static str,
    /// Production of this tier relative to the tier below it.
    pub value: f64,
}

pub const UPGRADE_CATALOG: [UpgradeTier; TIER_COUNT] = [
    UpgradeTier {
        index: 0,
        name: "Cursor",
        store_id: "buyCursor",
        value: 1.0,
    },
    UpgradeTier {
        index: 1,
        name: "Grandma",
        store_id: "buyGrandma",
        value: 4.0,
    },
    UpgradeTier {
        index: 2,
        name: "Factory",
        store_id: "buyFactory",
        value: 5.0,
    },
    UpgradeTier {
        index: 3,
        name: "Mine",
        store_id: "buyMine",
        value: 2.5,
    },
    UpgradeTier {
        index: 4,
        name: "Shipment",
        store_id: "buyShipment",
        value: 3.5,
    },
    UpgradeTier {
        index: 5,
        name: "Alchemy lab",
        store_id: "buyAlchemy lab",
        value: 7.14,
    },
    UpgradeTier {
        index: 6,
        name: "Portal",
        store_id: "buyPortal",
        value: 20.0,
    },
    UpgradeTier {
        index: 7,
        name: "Time machine",
        store_id: "buyTime machine",
        value: 123.456789,
    },
];

pub fn tier(index: usize) -> Option<&'static UpgradeTier> {
    UPGRADE_CATALOG.get(index)
}

pub fn tier_name(index: usize) -> &'static str {
    tier(index).map(|item| item.name).unwrap_or("?")
}

pub fn upgrade_values() -> [f64; TIER_COUNT] {
    UPGRADE_CATALOG.map(|item| item.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_index_aligned() {
        for (idx, item) in UPGRADE_CATALOG.iter().enumerate() {
            assert_eq!(item.index, idx);
        }
    }

    #[test]
    fn multipliers_match_game_table() {
        assert_eq!(
            upgrade_values(),
            [1.0, 4.0, 5.0, 2.5, 3.5, 7.14, 20.0, 123.456789]
        );
    }

    #[test]
    fn out_of_range_tier_has_placeholder_name() {
        assert_eq!(tier_name(2), "Factory");
        assert_eq!(tier_name(8), "?");
        assert!(tier(8).is_none());
    }
}
