//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default seating capacity for new tables
pub const DEFAULT_TABLE_CAPACITY: u32 = 4;

/// Table status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    /// Only entered or left through an explicit status change
    Reserved,
}

impl TableStatus {
    /// German display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Frei",
            Self::Occupied => "Besetzt",
            Self::Reserved => "Reserviert",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Floor plan position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Dining table entity (Tisch)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    /// `T<n>`, unique per operator
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: TableStatus,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub name: String,
    pub capacity: Option<u32>,
    pub position: Option<Position>,
}

impl TableCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: None,
            position: None,
        }
    }
}
