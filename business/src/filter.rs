//! Filter selections of both tables.
//!
//! Every filter is single-select with `All` meaning "no restriction". Selecting
//! the active filter again returns to `All`.

use crate::device::{DeviceRow, DeviceType};
use crate::loaner::{LoanerRow, LoanerStatus};
use crate::slot::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceFilter {
    #[default]
    All,
    Computer,
    Incident,
    Phone,
}

impl DeviceFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Computer, Self::Incident, Self::Phone];

    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Computer => "computer",
            Self::Incident => "incident",
            Self::Phone => "phone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Computer => "Computers",
            Self::Incident => "Incidents",
            Self::Phone => "Phones",
        }
    }

    /// Result of clicking `self` while `self` may already be active.
    pub fn toggled(self, current: Self) -> Self {
        if self == current { Self::All } else { self }
    }

    pub fn matches(self, row: &DeviceRow) -> bool {
        match self {
            Self::All => true,
            Self::Computer => row.device_type == DeviceType::Computer,
            Self::Incident => row.device_type == DeviceType::Computer && row.incident,
            Self::Phone => row.device_type == DeviceType::Phone,
        }
    }
}

/// Category selector of the device table, independent of the type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        if key == "all" {
            return Some(Self::All);
        }
        Category::from_key(key).map(Self::Only)
    }

    pub fn toggled(self, current: Self) -> Self {
        if self == current { Self::All } else { self }
    }

    pub fn matches(self, row: &DeviceRow) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => row.category == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoanerFilter {
    #[default]
    All,
    InStock,
    InUse,
    Reimaging,
}

impl LoanerFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::InStock, Self::InUse, Self::Reimaging];

    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InStock => "in_stock",
            Self::InUse => "in_use",
            Self::Reimaging => "reimaging",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::InStock => "In Stock",
            Self::InUse => "In Use",
            Self::Reimaging => "Re-imaging",
        }
    }

    pub fn toggled(self, current: Self) -> Self {
        if self == current { Self::All } else { self }
    }

    /// `not found` loaners never match, not even `All`.
    pub fn matches(self, row: &LoanerRow) -> bool {
        if !row.status.is_visible() {
            return false;
        }
        match self {
            Self::All => true,
            Self::InStock => row.status == LoanerStatus::InStock,
            Self::InUse => row.status == LoanerStatus::InUse,
            Self::Reimaging => row.status == LoanerStatus::Reimaging,
        }
    }
}
