//! Dashboard page handlers.
//!
//! Each page calls every facade method it needs exactly once and renders
//! the results through `page.html`.

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::aggregate;
use crate::chart;
use crate::state::AppState;
use crate::view::Section;

/// Sidebar entries: (label, path).
pub const PAGES: &[(&str, &str)] = &[
    ("Arrests Overview", "/"),
    ("Hotspots", "/hotspots"),
    ("Graph Statistics", "/stats"),
];

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate {
    title: &'static str,
    nav: Vec<NavLink>,
    sections: Vec<Section>,
}

struct NavLink {
    label: &'static str,
    href: &'static str,
    active: bool,
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Arrests over time.
pub async fn overview(State(state): State<AppState>) -> Response {
    let arrests = state.repo.get_arrests().await;

    let sections = vec![
        Section::table(
            "Arrests by Date",
            &["Arrest Date", "Arrests Count"],
            &arrests,
            &state.settings,
            |r| vec![r.date.to_string(), r.count.to_string()],
        ),
        Section::chart("Number of Arrests by Month", &arrests, |rows| {
            let bars: Vec<(String, i64)> = aggregate::monthly_totals(rows)
                .into_iter()
                .map(|(month, count)| (aggregate::month_label(month), count))
                .collect();
            chart::bar_chart("Number of Arrests by Month", &bars, "Month", "Number of Arrests")
        }),
    ];

    render_page("Arrests Overview", sections)
}

/// GET /hotspots - Locations, demographics, crimes and GDS results.
pub async fn hotspots(State(state): State<AppState>) -> Response {
    let settings = &state.settings;
    let repo = &state.repo;

    let hotspots = repo.get_hotspots().await;
    let ages = repo.age_categories().await;
    let crimes = repo.common_crimes().await;
    let races = repo.arrests_by_race().await;
    let genders = repo.arrests_by_gender().await;
    let communities = repo.community().await;
    let centrality = repo.degree_centrality().await;

    let sections = vec![
        Section::table(
            "Hotspots",
            &["Borough", "Precinct", "Arrests Count"],
            &hotspots,
            settings,
            |h| vec![h.borough.clone(), h.precinct.clone(), h.count.to_string()],
        ),
        Section::chart("Hotspots Bar Chart", &hotspots, |rows| {
            chart::bar_chart(
                "Hotspots",
                &aggregate::borough_totals(rows),
                "Borough",
                "Arrests Count",
            )
        }),
        Section::table(
            "Age Categories",
            &["Age Category", "Arrests Count"],
            &ages,
            settings,
            |a| vec![a.age_group.clone(), a.count.to_string()],
        ),
        Section::chart("Age Category Pie Chart", &ages, |rows| {
            let slices = aggregate::shares(rows.iter().map(|a| (a.age_group.as_str(), a.count)));
            chart::pie_chart("Age Category", &slices)
        }),
        Section::table(
            "Most Common Crimes",
            &["Most Common Crimes", "Count"],
            &crimes,
            settings,
            |c| vec![c.crime.clone(), c.count.to_string()],
        ),
        Section::table(
            "Arrests By Race",
            &["Race", "Arrest Count"],
            &races,
            settings,
            |c| vec![c.label.clone(), c.count.to_string()],
        ),
        Section::chart("Arrests By Race Pie Chart", &races, |rows| {
            let slices = aggregate::shares(rows.iter().map(|c| (c.label.as_str(), c.count)));
            chart::pie_chart("Arrests By Race", &slices)
        }),
        Section::table(
            "Arrests By Gender",
            &["Gender", "Arrest Count"],
            &genders,
            settings,
            |c| vec![c.label.clone(), c.count.to_string()],
        ),
        Section::chart("Arrests By Gender Pie Chart", &genders, |rows| {
            let slices = aggregate::shares(rows.iter().map(|c| (c.label.as_str(), c.count)));
            chart::pie_chart("Arrests By Gender", &slices)
        }),
        Section::table(
            "GDS Library: Community Sizes",
            &["Community", "Community Size"],
            &communities,
            settings,
            |c| vec![c.community_id.to_string(), c.member_count.to_string()],
        ),
        Section::table(
            "Precincts with the Most Arrests (Degree Centrality)",
            &["Precinct", "Score"],
            &centrality,
            settings,
            |c| vec![c.precinct.clone(), format!("{:.1}", c.score)],
        ),
    ];

    render_page("Hotspots", sections)
}

/// GET /stats - Graph size and the distinct crime list.
pub async fn stats(State(state): State<AppState>) -> Response {
    let settings = &state.settings;
    let repo = &state.repo;

    let counts = Section::new("")
        .stat("Total number of nodes", &repo.total_nodes().await, settings)
        .stat("Total number of relationships", &repo.num_relationships().await, settings)
        .stat("Number of isolated nodes", &repo.isolated_nodes().await, settings)
        .stat("Number of crimes committed", &repo.crimes_committed().await, settings)
        .stat("Number of distinct crimes", &repo.num_crimes().await, settings);

    let crime_list = repo.crime_list().await;
    let crimes = Section::table("Crimes", &["Crime"], &crime_list, settings, |c| vec![c.clone()]);

    render_page("Graph Statistics", vec![counts, crimes])
}

// ============================================================
// HELPERS
// ============================================================

fn render_page(title: &'static str, sections: Vec<Section>) -> Response {
    let nav = PAGES
        .iter()
        .map(|&(label, href)| NavLink {
            label,
            href,
            active: label == title,
        })
        .collect();

    let template = PageTemplate {
        title,
        nav,
        sections,
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(page = title, error = %e, "Template render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Template error: {}", e)),
            )
                .into_response()
        }
    }
}
