//! View models for dashboard panels.
//!
//! A [`Section`] renders as one of: a table (with optional chart), a
//! "no data" note, or an error banner. With `show_errors` off, a failed
//! query renders like an empty one.

use arrests_core::{DashboardSettings, QueryError, QueryResult};

pub const NO_DATA: &str = "No data to display.";

/// One panel of a page.
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub heading: String,
    pub banner: String,
    pub note: String,
    pub stats: Vec<StatLine>,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub chart_svg: String,
}

/// A labelled scalar on the statistics page.
#[derive(Debug, Clone)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    /// A table panel built from a query result.
    pub fn table<T>(
        heading: impl Into<String>,
        headers: &[&'static str],
        result: &QueryResult<Vec<T>>,
        settings: &DashboardSettings,
        row: impl Fn(&T) -> Vec<String>,
    ) -> Self {
        let mut section = Self::new(heading);
        section.headers = headers.to_vec();
        match result {
            Ok(items) if items.is_empty() => section.note = NO_DATA.to_string(),
            Ok(items) => section.rows = items.iter().map(row).collect(),
            Err(e) => section.fail(e, settings),
        }
        section
    }

    /// A chart panel for a result that is also shown as a table. A failure
    /// is reported by the table's banner, so here it only suppresses the chart.
    pub fn chart<T>(
        heading: impl Into<String>,
        result: &QueryResult<Vec<T>>,
        render: impl FnOnce(&[T]) -> String,
    ) -> Self {
        let mut section = Self::new(heading);
        match result {
            Ok(items) if items.is_empty() => section.note = NO_DATA.to_string(),
            Ok(items) => section.chart_svg = render(items),
            Err(_) => section.note = NO_DATA.to_string(),
        }
        section
    }

    /// Add a scalar line. Failures are listed in the banner when enabled.
    pub fn stat(
        mut self,
        label: &'static str,
        result: &QueryResult<i64>,
        settings: &DashboardSettings,
    ) -> Self {
        let value = match result {
            Ok(v) => v.to_string(),
            Err(e) => {
                if settings.show_errors {
                    let line = format!("{label}: {}", failure_text(e));
                    if self.banner.is_empty() {
                        self.banner = line;
                    } else {
                        self.banner = format!("{}; {line}", self.banner);
                    }
                }
                "n/a".to_string()
            }
        };
        self.stats.push(StatLine { label, value });
        self
    }

    fn fail(&mut self, error: &QueryError, settings: &DashboardSettings) {
        if settings.show_errors {
            self.banner = failure_text(error);
        } else {
            self.note = NO_DATA.to_string();
        }
    }
}

fn failure_text(error: &QueryError) -> String {
    format!("Could not load data ({}): {}", error.category(), error)
}
