//! Shapes of the dashboard query results.
//!
//! Every value is a fresh snapshot of one query call. Lists keep the
//! order the query produced them in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label used when a category property is missing on the node.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Arrests recorded on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrestsByDate {
    pub date: NaiveDate,
    pub count: i64,
}

/// Arrests at one borough/precinct location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub borough: String,
    pub precinct: String,
    pub count: i64,
}

/// Arrests per perpetrator age group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategoryCount {
    pub age_group: String,
    pub count: i64,
}

/// Arrests per demographic category (race or gender).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

/// Size of one Louvain community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityStat {
    pub community_id: i64,
    pub member_count: i64,
}

/// Degree centrality score of a precinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityStat {
    pub precinct: String,
    pub score: f64,
}

/// How often an offense was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeCount {
    pub crime: String,
    pub count: i64,
}

impl ArrestsByDate {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }
}

impl Hotspot {
    pub fn new(borough: impl Into<String>, precinct: impl Into<String>, count: i64) -> Self {
        Self {
            borough: borough.into(),
            precinct: precinct.into(),
            count,
        }
    }
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: i64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

impl CrimeCount {
    pub fn new(crime: impl Into<String>, count: i64) -> Self {
        Self {
            crime: crime.into(),
            count,
        }
    }
}
