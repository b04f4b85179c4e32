//! Shelf slot categories.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Storage category of a shelf slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Elitebooks,
    Zbooks,
    Toughbooks,
    Repaired,
    Desktops,
    Phones,
    Unassigned,
}

impl Category {
    /// Categories that own a slot range, in shelf order.
    pub const SHELVES: [Self; 6] = [
        Self::Elitebooks,
        Self::Zbooks,
        Self::Toughbooks,
        Self::Repaired,
        Self::Desktops,
        Self::Phones,
    ];

    pub fn from_slot(slot: u32) -> Self {
        Self::SHELVES
            .into_iter()
            .find(|category| category.range().is_some_and(|range| range.contains(&slot)))
            .unwrap_or(Self::Unassigned)
    }

    pub fn range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Elitebooks => Some(1..=36),
            Self::Zbooks => Some(37..=56),
            Self::Toughbooks => Some(57..=61),
            Self::Repaired => Some(62..=71),
            Self::Desktops => Some(72..=72),
            Self::Phones => Some(100..=121),
            Self::Unassigned => None,
        }
    }

    /// Stable identifier, also used as the persisted preference value.
    pub fn key(self) -> &'static str {
        match self {
            Self::Elitebooks => "elitebooks",
            Self::Zbooks => "zbooks",
            Self::Toughbooks => "toughbooks",
            Self::Repaired => "repaired",
            Self::Desktops => "desktops",
            Self::Phones => "phones",
            Self::Unassigned => "unassigned",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::SHELVES
            .into_iter()
            .chain([Self::Unassigned])
            .find(|category| category.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Elitebooks => "Slots 1–36: Elitebooks",
            Self::Zbooks => "Slots 37–56: ZBooks",
            Self::Toughbooks => "Slots 57–61: Toughbooks",
            Self::Repaired => "Slots 62–71: Repaired",
            Self::Desktops => "Slot 72: Desktops",
            Self::Phones => "Slots 100–121: Phones",
            Self::Unassigned => "Unassigned",
        }
    }

    /// Short label for category chips.
    pub fn label(self) -> &'static str {
        match self {
            Self::Elitebooks => "Elitebooks",
            Self::Zbooks => "ZBooks",
            Self::Toughbooks => "Toughbooks",
            Self::Repaired => "Repaired",
            Self::Desktops => "Desktops",
            Self::Phones => "Phones",
            Self::Unassigned => "Unassigned",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Slot value stored on a ticket.
///
/// Usually a shelf number, but the notify automation also stores overflow
/// notices, error text and `-1` for devices that skip the shelf. Any value
/// means the device has been handled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceSlot {
    Number(u32),
    Text(String),
}

impl DeviceSlot {
    /// Shelf number, taken from the leading digits of a text value.
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Number(slot) => Some(*slot),
            Self::Text(text) => {
                let text = text.trim_start();
                let end = text
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(text.len());
                text[..end].parse().ok()
            }
        }
    }

    pub fn category(&self) -> Category {
        self.number().map_or(Category::Unassigned, Category::from_slot)
    }
}

impl From<u32> for DeviceSlot {
    fn from(slot: u32) -> Self {
        Self::Number(slot)
    }
}

impl std::fmt::Display for DeviceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(slot) => write!(f, "{slot}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Lowest free slot of `category`, given the slots already occupied.
pub fn suggest_slot(category: Category, occupied: impl IntoIterator<Item = u32>) -> Option<u32> {
    let range = category.range()?;
    let used: BTreeSet<u32> = occupied.into_iter().collect();
    range.into_iter().find(|slot| !used.contains(slot))
}
