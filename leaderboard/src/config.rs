// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// One line of the source file, keyed by the header names.
///
/// Only exists between parsing and normalization.
pub type RawRecord = HashMap<String, String>;

/// A normalized leaderboard entry.
///
/// All the fields are kept as they appear in the source. In particular the score
/// is not converted: the conversion to a number only happens when comparing rows.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LeaderboardRow {
    pub timestamp_utc: String,
    pub team: String,
    pub model: String,
    pub score: String,
    pub notes: String,
}

impl LeaderboardRow {
    /// The raw value displayed for this column.
    ///
    /// The rank is not stored in the row, so it reads as an empty string.
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Rank => "",
            Column::Team => &self.team,
            Column::Model => &self.model,
            Column::Score => &self.score,
            Column::TimestampUtc => &self.timestamp_utc,
            Column::Notes => &self.notes,
        }
    }
}

// ******** Display data structures *********

/// The columns of the table, in display order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Column {
    Rank,
    Team,
    Model,
    Score,
    TimestampUtc,
    Notes,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Rank,
        Column::Team,
        Column::Model,
        Column::Score,
        Column::TimestampUtc,
        Column::Notes,
    ];

    /// The key used in the source header and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Rank => "rank",
            Column::Team => "team",
            Column::Model => "model",
            Column::Score => "score",
            Column::TimestampUtc => "timestamp_utc",
            Column::Notes => "notes",
        }
    }

    /// The human-readable header label.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Rank => "Rank",
            Column::Team => "Team",
            Column::Model => "Model",
            Column::Score => "Score",
            Column::TimestampUtc => "Date",
            Column::Notes => "Notes",
        }
    }

    pub fn from_key(key: &str) -> Result<Column, LeaderboardErrors> {
        Column::ALL
            .iter()
            .find(|c| c.key() == key)
            .copied()
            .ok_or_else(|| LeaderboardErrors::UnknownColumn(key.to_string()))
    }

    /// The direction picked when the user switches to this column.
    /// A high score is the default notion of "best".
    pub fn default_dir(&self) -> SortDir {
        match self {
            Column::Score => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flipped(self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn from_key(key: &str) -> Result<SortDir, LeaderboardErrors> {
        match key {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            x => Err(LeaderboardErrors::UnknownSortDir(x.to_string())),
        }
    }
}

/// The date window of the date dropdown.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DateWindow {
    All,
    Last30,
    Last180,
}

impl DateWindow {
    pub const ALL: [DateWindow; 3] = [DateWindow::All, DateWindow::Last30, DateWindow::Last180];

    /// The maximum age in days that passes the filter, if bounded.
    pub fn max_days(&self) -> Option<f64> {
        match self {
            DateWindow::All => None,
            DateWindow::Last30 => Some(30.0),
            DateWindow::Last180 => Some(180.0),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Last30 => "last30",
            DateWindow::Last180 => "last180",
        }
    }

    pub fn from_key(key: &str) -> Result<DateWindow, LeaderboardErrors> {
        DateWindow::ALL
            .iter()
            .find(|d| d.key() == key)
            .copied()
            .ok_or_else(|| LeaderboardErrors::UnknownDateWindow(key.to_string()))
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ModelFilter {
    All,
    Only(String),
}

impl ModelFilter {
    /// Reads a dropdown value, `all` being the sentinel for no filtering.
    pub fn from_key(key: &str) -> ModelFilter {
        if key == "all" {
            ModelFilter::All
        } else {
            ModelFilter::Only(key.to_string())
        }
    }
}

/// Everything the filter and sort steps depend on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Query {
    pub text: String,
    pub model: ModelFilter,
    pub date: DateWindow,
    pub sort_key: Column,
    pub sort_dir: SortDir,
}

impl Query {
    pub const DEFAULT_QUERY: Query = Query {
        text: String::new(),
        model: ModelFilter::All,
        date: DateWindow::All,
        sort_key: Column::Score,
        sort_dir: SortDir::Desc,
    };
}

impl Default for Query {
    fn default() -> Self {
        Query::DEFAULT_QUERY
    }
}

// ******** Output data structures *********

/// A row of the current view, with its rank.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankedRow {
    pub rank: usize,
    pub row: LeaderboardRow,
}

/// A row as displayed: only the visible cells, in column order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ProjectedRow {
    pub cells: Vec<(Column, String)>,
}

impl ProjectedRow {
    pub fn cell(&self, column: Column) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }
}

/// Errors when reading user-provided names of columns or options.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LeaderboardErrors {
    UnknownColumn(String),
    UnknownSortDir(String),
    UnknownDateWindow(String),
}

impl Error for LeaderboardErrors {}

impl Display for LeaderboardErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardErrors::UnknownColumn(x) => write!(
                f,
                "unknown column {:?} (expected one of rank, team, model, score, timestamp_utc, notes)",
                x
            ),
            LeaderboardErrors::UnknownSortDir(x) => {
                write!(f, "unknown sort direction {:?} (expected asc or desc)", x)
            }
            LeaderboardErrors::UnknownDateWindow(x) => write!(
                f,
                "unknown date window {:?} (expected all, last30 or last180)",
                x
            ),
        }
    }
}
