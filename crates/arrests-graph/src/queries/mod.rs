//! The dashboard's fixed query set.
//!
//! - `aggregations`: grouped counts over arrests, demographics and crimes
//! - `stats`: scalar graph statistics
//! - `algorithms`: GDS algorithm streams over pre-built projections

pub mod aggregations;
pub mod algorithms;
pub mod stats;

pub use aggregations::{
    AGE_CATEGORIES, ARRESTS_BY_DATE, ARRESTS_BY_GENDER, ARRESTS_BY_RACE, COMMON_CRIMES, CRIME_LIST,
    HOTSPOTS,
};
pub use algorithms::{COMMUNITY, DEGREE_CENTRALITY, projection_exists_query};
pub use stats::{CRIMES_COMMITTED, ISOLATED_NODES, NUM_CRIMES, NUM_RELATIONSHIPS, TOTAL_NODES};
