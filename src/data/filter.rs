use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Selection – the user-chosen filter state
// ---------------------------------------------------------------------------

/// Site dropdown value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteChoice {
    /// No site filter.
    #[default]
    All,
    Site(String),
}

impl SiteChoice {
    fn admits(&self, site: &str) -> bool {
        match self {
            SiteChoice::All => true,
            SiteChoice::Site(s) => s == site,
        }
    }
}

/// Inclusive payload mass bounds in kg. `low > high` selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    pub fn is_degenerate(&self) -> bool {
        self.low > self.high
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub site: SiteChoice,
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Derived tables
// ---------------------------------------------------------------------------

/// Pre-aggregated pie row for the all-sites view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSuccessCount {
    pub site: String,
    pub success_count: usize,
}

/// One record's outcome, for the single-site view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRow {
    pub site: String,
    pub outcome: Outcome,
}

/// Pie chart input. The two policies are kept apart: all sites are counted
/// here, a single site is left as raw rows for the chart to proportion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum PieData {
    SuccessBySite(Vec<SiteSuccessCount>),
    OutcomeDistribution(Vec<OutcomeRow>),
}

impl PieData {
    pub fn is_empty(&self) -> bool {
        match self {
            PieData::SuccessBySite(rows) => rows.is_empty(),
            PieData::OutcomeDistribution(rows) => rows.is_empty(),
        }
    }
}

/// Scatter chart row, the filtered record unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterRow {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub booster_version: String,
}

impl From<&LaunchRecord> for ScatterRow {
    fn from(rec: &LaunchRecord) -> Self {
        ScatterRow {
            site: rec.site.clone(),
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome.clone(),
            booster_category: rec.booster_category.clone(),
            booster_version: rec.booster_version.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Derive operations
// ---------------------------------------------------------------------------

/// Pie chart table for a site choice.
///
/// * `All` → successes counted per site, sorted by site; sites without a
///   success do not appear.
/// * a specific site → one row per record of that site with its outcome.
pub fn derive_pie_data(records: &[LaunchRecord], site: &SiteChoice) -> PieData {
    match site {
        SiteChoice::All => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in records.iter().filter(|r| r.outcome.success) {
                *counts.entry(rec.site.as_str()).or_default() += 1;
            }
            PieData::SuccessBySite(
                counts
                    .into_iter()
                    .map(|(site, success_count)| SiteSuccessCount {
                        site: site.to_string(),
                        success_count,
                    })
                    .collect(),
            )
        }
        SiteChoice::Site(name) => PieData::OutcomeDistribution(
            records
                .iter()
                .filter(|r| &r.site == name)
                .map(|r| OutcomeRow {
                    site: r.site.clone(),
                    outcome: r.outcome.clone(),
                })
                .collect(),
        ),
    }
}

/// Scatter chart table: records inside the payload bounds, optionally
/// restricted to one site, in file order.
pub fn derive_scatter_data(
    records: &[LaunchRecord],
    site: &SiteChoice,
    payload: PayloadRange,
) -> Vec<ScatterRow> {
    records
        .iter()
        .filter(|r| payload.contains(r.payload_mass_kg))
        .filter(|r| site.admits(&r.site))
        .map(ScatterRow::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Single dispatch per selection change
// ---------------------------------------------------------------------------

/// Declarative chart parameters handed to the renderer with each table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub color_field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub selection: Selection,
    pub pie_chart: ChartSpec,
    pub pie: PieData,
    pub scatter_chart: ChartSpec,
    pub scatter: Vec<ScatterRow>,
}

/// Derive both chart inputs for the current selection.
pub fn derive_views(records: &[LaunchRecord], selection: &Selection) -> DashboardViews {
    let (pie_chart, scatter_title) = match &selection.site {
        SiteChoice::All => (
            ChartSpec {
                title: "Total Success Launches by Site".to_string(),
                x_field: "site",
                y_field: "success_count",
                color_field: "site",
            },
            "Payload vs. Launch Success".to_string(),
        ),
        SiteChoice::Site(name) => (
            ChartSpec {
                title: format!("Success Rate for {name}"),
                x_field: "outcome",
                y_field: "count",
                color_field: "outcome",
            },
            format!("Payload vs. Launch Success for {name}"),
        ),
    };

    DashboardViews {
        selection: selection.clone(),
        pie_chart,
        pie: derive_pie_data(records, &selection.site),
        scatter_chart: ChartSpec {
            title: scatter_title,
            x_field: "payload_mass_kg",
            y_field: "outcome",
            color_field: "booster_category",
        },
        scatter: derive_scatter_data(records, &selection.site, selection.payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn scenario() -> Vec<LaunchRecord> {
        vec![
            record("siteA", 500.0, true),
            record("siteA", 1500.0, false),
            record("siteB", 3000.0, true),
        ]
    }

    fn site(s: &str) -> SiteChoice {
        SiteChoice::Site(s.to_string())
    }

    #[test]
    fn all_sites_full_range() {
        let records = scenario();
        let views = derive_views(
            &records,
            &Selection {
                site: SiteChoice::All,
                payload: PayloadRange::new(0.0, 10000.0),
            },
        );

        assert_eq!(
            views.pie,
            PieData::SuccessBySite(vec![
                SiteSuccessCount { site: "siteA".into(), success_count: 1 },
                SiteSuccessCount { site: "siteB".into(), success_count: 1 },
            ])
        );
        assert_eq!(views.scatter.len(), 3);
        assert_eq!(views.pie_chart.title, "Total Success Launches by Site");
    }

    #[test]
    fn single_site_low_range() {
        let records = scenario();
        let views = derive_views(
            &records,
            &Selection {
                site: site("siteA"),
                payload: PayloadRange::new(0.0, 1000.0),
            },
        );

        assert_eq!(views.scatter.len(), 1);
        assert_eq!(views.scatter[0].payload_mass_kg, 500.0);
        assert!(views.scatter[0].outcome.success);

        let PieData::OutcomeDistribution(rows) = &views.pie else {
            panic!("expected outcome distribution");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().filter(|r| r.outcome.success).count(), 1);
        assert_eq!(rows.iter().filter(|r| !r.outcome.success).count(), 1);
        assert_eq!(views.pie_chart.title, "Success Rate for siteA");
    }

    #[test]
    fn sites_without_success_are_absent() {
        let mut records = scenario();
        records.push(record("siteC", 100.0, false));
        records.push(record("siteB", 200.0, true));

        let PieData::SuccessBySite(rows) = derive_pie_data(&records, &SiteChoice::All) else {
            panic!("expected counts");
        };
        assert!(rows.iter().all(|r| r.site != "siteC"));
        let b = rows.iter().find(|r| r.site == "siteB").unwrap();
        assert_eq!(b.success_count, 2);
    }

    #[test]
    fn degenerate_range_is_empty() {
        let records = scenario();
        for (lo, hi) in [(1.0, 0.0), (5000.0, 4999.0), (10000.0, 0.0)] {
            let range = PayloadRange::new(lo, hi);
            assert!(range.is_degenerate());
            assert!(derive_scatter_data(&records, &SiteChoice::All, range).is_empty());
        }
    }

    #[test]
    fn scatter_rows_respect_bounds_inclusively() {
        let records = scenario();
        let range = PayloadRange::new(500.0, 1500.0);
        let rows = derive_scatter_data(&records, &SiteChoice::All, range);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| range.contains(r.payload_mass_kg)));
    }

    #[test]
    fn site_filter_applies_to_both_views() {
        let records = scenario();
        let rows = derive_scatter_data(&records, &site("siteB"), PayloadRange::new(0.0, 10000.0));
        assert!(rows.iter().all(|r| r.site == "siteB"));
        assert_eq!(rows.len(), 1);

        let PieData::OutcomeDistribution(rows) = derive_pie_data(&records, &site("siteB")) else {
            panic!("expected outcome distribution");
        };
        assert!(rows.iter().all(|r| r.site == "siteB"));
    }

    #[test]
    fn unknown_site_yields_empty_tables() {
        let records = scenario();
        assert!(derive_pie_data(&records, &site("nowhere")).is_empty());
        assert!(
            derive_scatter_data(&records, &site("nowhere"), PayloadRange::new(0.0, 1e6)).is_empty()
        );
    }

    #[test]
    fn derive_is_idempotent() {
        let records = scenario();
        let sel = Selection {
            site: site("siteA"),
            payload: PayloadRange::new(0.0, 2000.0),
        };
        assert_eq!(derive_views(&records, &sel), derive_views(&records, &sel));
    }

    #[test]
    fn views_serialize_with_tagged_pie() {
        let records = scenario();
        let views = derive_views(
            &records,
            &Selection {
                site: SiteChoice::All,
                payload: PayloadRange::new(0.0, 10000.0),
            },
        );
        let json = serde_json::to_value(&views).unwrap();
        assert_eq!(json["pie"]["kind"], "success_by_site");
        assert_eq!(json["pie"]["rows"][0]["success_count"], 1);
        assert_eq!(json["scatter"].as_array().unwrap().len(), 3);
    }
}
