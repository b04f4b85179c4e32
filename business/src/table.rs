//! Row identity, row actions and column sorting shared by both tables.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Placeholder shown in cells without content or action.
pub const PLACEHOLDER: &str = "—";

/// Identifier of a row, unique within one table for the lifetime of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row_{}", self.0)
    }
}

/// Monotonic row id generator.
#[derive(Debug, Default, Clone)]
pub struct RowIdSeq {
    last: u64,
}

impl RowIdSeq {
    pub fn next_id(&mut self) -> RowId {
        self.last += 1;
        RowId(self.last)
    }
}

/// What the action cell of a row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// An enabled Notify button.
    Notify,
    /// A disabled Notify button with a spinner: the request is in flight.
    Pending,
    /// No action available.
    Placeholder,
}

impl RowAction {
    pub fn cell_text(self) -> &'static str {
        match self {
            Self::Notify | Self::Pending => "Notify",
            Self::Placeholder => PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: the active column flips direction, any other column starts ascending.
    pub fn click(&mut self, column: usize) {
        let direction = if self.column == Some(column) && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        *self = Self {
            column: Some(column),
            direction,
        };
    }

    /// Arrow appended to the header label of `column`.
    pub fn indicator(&self, column: usize) -> &'static str {
        match (self.column == Some(column), self.direction) {
            (false, _) => "",
            (true, SortDirection::Asc) => " ▲",
            (true, SortDirection::Desc) => " ▼",
        }
    }
}

/// A display row the sort engine can order.
pub trait SortableRow {
    /// Column compared as dates rather than text.
    const DATE_COLUMN: Option<usize> = None;

    fn cell_text(&self, column: usize) -> &str;

    /// Date shown in [`Self::DATE_COLUMN`].
    fn sort_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Sorts rows in place. Does nothing when no column is active.
///
/// The sort is stable, so rows that compare equal keep their backend order.
pub fn sort_rows<R: SortableRow>(rows: &mut [R], sort: SortState) {
    let Some(column) = sort.column else {
        return;
    };
    rows.sort_by(|a, b| sort.direction.apply(compare_cells(a, b, column)));
}

/// Ascending comparison of one column.
///
/// Dates compare as dates with dated rows first; otherwise numbers compare
/// numerically when both cells are numeric, and everything else compares as
/// case-insensitive text.
pub fn compare_cells<R: SortableRow>(a: &R, b: &R, column: usize) -> Ordering {
    if R::DATE_COLUMN == Some(column) {
        return match (a.sort_date(), b.sort_date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
    }

    let a_text = a.cell_text(column).trim().to_lowercase();
    let b_text = b.cell_text(column).trim().to_lowercase();
    match (parse_number(&a_text), parse_number(&b_text)) {
        (Some(a_num), Some(b_num)) => a_num.partial_cmp(&b_num).unwrap_or(Ordering::Equal),
        _ => a_text.cmp(&b_text),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
