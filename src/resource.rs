use crate::error::IngestError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Resource category used to filter candidates for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "DEV", alias = "DEVELOPER")]
    Developer,
    #[serde(rename = "TESTER")]
    Tester,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Developer => "DEV",
            Role::Tester => "TESTER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Developer => write!(f, "developer"),
            Role::Tester => write!(f, "tester"),
        }
    }
}

impl FromStr for Role {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEV" | "DEVELOPER" => Ok(Role::Developer),
            "TESTER" => Ok(Role::Tester),
            _ => Err(IngestError::UnknownRole(s.trim().to_string())),
        }
    }
}

/// Dates a resource cannot take new work on. Never holds duplicates and keeps
/// insertion order so leave shows up before assignments when displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NaiveDate>", into = "Vec<NaiveDate>")]
pub struct BlockedDates {
    ordered: Vec<NaiveDate>,
    lookup: HashSet<NaiveDate>,
}

impl BlockedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.lookup.contains(date)
    }

    /// Returns false when the date was already blocked.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        if !self.lookup.insert(date) {
            return false;
        }
        self.ordered.push(date);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.ordered.iter()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Extend<NaiveDate> for BlockedDates {
    fn extend<T: IntoIterator<Item = NaiveDate>>(&mut self, iter: T) {
        for date in iter {
            self.insert(date);
        }
    }
}

impl FromIterator<NaiveDate> for BlockedDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        let mut dates = Self::new();
        dates.extend(iter);
        dates
    }
}

impl From<Vec<NaiveDate>> for BlockedDates {
    fn from(value: Vec<NaiveDate>) -> Self {
        value.into_iter().collect()
    }
}

impl From<BlockedDates> for Vec<NaiveDate> {
    fn from(value: BlockedDates) -> Self {
        value.ordered
    }
}

/// A developer or tester together with every date they are unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(alias = "type")]
    pub role: Role,
    /// Starts out as the leave schedule; grows as blocks are committed.
    #[serde(default, alias = "leave_schedule")]
    pub blocked_dates: BlockedDates,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            blocked_dates: BlockedDates::new(),
        }
    }

    pub fn with_leave<I>(mut self, leave: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.blocked_dates.extend(leave);
        self
    }

    pub fn is_blocked(&self, date: &NaiveDate) -> bool {
        self.blocked_dates.contains(date)
    }

    /// Marks every date as taken. Dates already present are left alone.
    pub fn block_dates<'a, I>(&mut self, dates: I) -> usize
    where
        I: IntoIterator<Item = &'a NaiveDate>,
    {
        dates
            .into_iter()
            .filter(|date| self.blocked_dates.insert(**date))
            .count()
    }
}
