//! Grouped count queries over arrests, demographics and crimes.

use arrests_core::model::{
    AgeCategoryCount, ArrestsByDate, CategoryCount, CrimeCount, Hotspot,
};
use arrests_core::QueryResult;

use crate::query::{QueryKind, ReadQuery};
use crate::record::{Column, ColumnKind, Record};

/// Arrests per day, oldest first.
pub static ARRESTS_BY_DATE: ReadQuery<ArrestsByDate> = ReadQuery {
    name: "arrests_by_date",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (p:Person)-[r:ARRESTED_AT]->(a:Address)
             RETURN date(r.arrest_date) AS arrest_date, count(p) AS arrests_count
             ORDER BY arrest_date",
    columns: &[
        Column::new("arrest_date", ColumnKind::Date),
        Column::new("arrests_count", ColumnKind::Integer),
    ],
    shape: shape_arrests_by_date,
};

/// Arrests per borough and precinct, busiest first.
pub static HOTSPOTS: ReadQuery<Hotspot> = ReadQuery {
    name: "hotspots",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (l:Location)<-[:ARRESTED_AT]-(p:Person)
             RETURN l.arrest_boro AS borough, l.arrest_precinct AS precinct, count(p) AS num_arrests
             ORDER BY num_arrests DESC",
    columns: &[
        Column::new("borough", ColumnKind::Text),
        Column::new("precinct", ColumnKind::Text),
        Column::new("num_arrests", ColumnKind::Integer),
    ],
    shape: shape_hotspot,
};

pub static AGE_CATEGORIES: ReadQuery<AgeCategoryCount> = ReadQuery {
    name: "age_categories",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (p:Person)-[:BELONGS_TO]->(a:AgeGroup)
             WITH a, count(p) AS arrest_count
             RETURN a.age_group AS age, arrest_count
             ORDER BY arrest_count DESC",
    columns: &[
        Column::new("age", ColumnKind::Text),
        Column::new("arrest_count", ColumnKind::Integer),
    ],
    shape: shape_age_category,
};

pub static ARRESTS_BY_RACE: ReadQuery<CategoryCount> = ReadQuery {
    name: "arrests_by_race",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (p:Person)
             RETURN p.perp_race AS category, count(*) AS arrest_count
             ORDER BY arrest_count DESC",
    columns: CATEGORY_COLUMNS,
    shape: shape_category,
};

pub static ARRESTS_BY_GENDER: ReadQuery<CategoryCount> = ReadQuery {
    name: "arrests_by_gender",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (p:Person)
             RETURN p.perp_sex AS category, count(*) AS arrest_count
             ORDER BY arrest_count DESC",
    columns: CATEGORY_COLUMNS,
    shape: shape_category,
};

/// The five most frequent offenses.
pub static COMMON_CRIMES: ReadQuery<CrimeCount> = ReadQuery {
    name: "common_crimes",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (p:Person)-[:COMMITTED]->(c:Crime)
             WITH c.offense_desc AS crime, count(*) AS crime_count
             RETURN crime, crime_count
             ORDER BY crime_count DESC
             LIMIT 5",
    columns: &[
        Column::new("crime", ColumnKind::Text),
        Column::new("crime_count", ColumnKind::Integer),
    ],
    shape: shape_crime_count,
};

/// Every distinct offense description, alphabetically.
pub static CRIME_LIST: ReadQuery<String> = ReadQuery {
    name: "crime_list",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (n:Crime)
             RETURN DISTINCT n.offense_desc AS crime
             ORDER BY crime",
    columns: &[Column::new("crime", ColumnKind::Text)],
    shape: shape_crime_name,
};

const CATEGORY_COLUMNS: &[Column] = &[
    Column::new("category", ColumnKind::Text),
    Column::new("arrest_count", ColumnKind::Integer),
];

fn shape_arrests_by_date(record: &Record) -> QueryResult<ArrestsByDate> {
    Ok(ArrestsByDate {
        date: record.date("arrest_date")?,
        count: record.integer("arrests_count")?,
    })
}

fn shape_hotspot(record: &Record) -> QueryResult<Hotspot> {
    Ok(Hotspot {
        borough: record.label("borough")?,
        precinct: record.label("precinct")?,
        count: record.integer("num_arrests")?,
    })
}

fn shape_age_category(record: &Record) -> QueryResult<AgeCategoryCount> {
    Ok(AgeCategoryCount {
        age_group: record.label("age")?,
        count: record.integer("arrest_count")?,
    })
}

fn shape_category(record: &Record) -> QueryResult<CategoryCount> {
    Ok(CategoryCount {
        label: record.label("category")?,
        count: record.integer("arrest_count")?,
    })
}

fn shape_crime_count(record: &Record) -> QueryResult<CrimeCount> {
    Ok(CrimeCount {
        crime: record.label("crime")?,
        count: record.integer("crime_count")?,
    })
}

fn shape_crime_name(record: &Record) -> QueryResult<String> {
    record.label("crime")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrests_core::QueryError;
    use chrono::NaiveDate;

    #[test]
    fn test_hotspot_with_numeric_precinct() {
        let record = Record::new()
            .with("borough", "K")
            .with("precinct", 75_i64)
            .with("num_arrests", 120_i64);
        let hotspot = (HOTSPOTS.shape)(&record).unwrap();
        assert_eq!(hotspot, Hotspot::new("K", "75", 120));
    }

    #[test]
    fn test_shape_all_keeps_query_order() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let records = vec![
            Record::new().with("arrest_date", jan).with("arrests_count", 2_i64),
            Record::new().with("arrest_date", feb).with("arrests_count", 1_i64),
        ];
        let rows = ARRESTS_BY_DATE.shape_all(&records).unwrap();
        assert_eq!(rows, vec![ArrestsByDate::new(jan, 2), ArrestsByDate::new(feb, 1)]);
    }

    #[test]
    fn test_shape_all_fails_on_bad_row() {
        let records = vec![
            Record::new().with("category", "M").with("arrest_count", 4_i64),
            Record::new().with("category", "F"),
        ];
        let err = ARRESTS_BY_GENDER.shape_all(&records).unwrap_err();
        assert!(matches!(err, QueryError::Decode { ref column, .. } if column == "arrest_count"));
    }

    #[test]
    fn test_declared_columns_cover_shaper() {
        for column in ARRESTS_BY_RACE.columns {
            assert!(["category", "arrest_count"].contains(&column.name));
        }
        assert_eq!(COMMON_CRIMES.kind, QueryKind::Aggregation);
        assert!(COMMON_CRIMES.cypher.contains("LIMIT 5"));
    }

    #[test]
    fn test_ranked_queries_sort_descending() {
        let ranked: [(&str, &str); 5] = [
            (HOTSPOTS.cypher, "ORDER BY num_arrests DESC"),
            (AGE_CATEGORIES.cypher, "ORDER BY arrest_count DESC"),
            (ARRESTS_BY_RACE.cypher, "ORDER BY arrest_count DESC"),
            (ARRESTS_BY_GENDER.cypher, "ORDER BY arrest_count DESC"),
            (COMMON_CRIMES.cypher, "ORDER BY crime_count DESC"),
        ];
        for (cypher, order) in ranked {
            assert!(cypher.contains(order), "missing `{order}` in {cypher}");
        }
        assert!(ARRESTS_BY_DATE.cypher.contains("ORDER BY arrest_date"));
        assert!(!ARRESTS_BY_DATE.cypher.contains("DESC"));
    }
}
