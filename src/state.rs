use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::{PAYLOAD_SLIDER_MIN, payload_slider_max};
use crate::data::filter::{DashboardViews, PayloadRange, Selection, SiteChoice, derive_views};
use crate::data::model::LaunchDataset;
use crate::ui::scatter::OutcomeAxis;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup, shared read-only.
    pub dataset: Arc<LaunchDataset>,

    /// Current dropdown + slider values.
    pub selection: Selection,

    /// Chart inputs for `selection` (cached until it changes).
    pub views: DashboardViews,

    /// Upper end of the payload sliders.
    pub slider_max: f64,

    /// Text typed into the site search box.
    pub site_search: String,

    /// Stable colours for sites, outcome labels and booster categories.
    pub site_colors: ColorMap,
    pub outcome_colors: ColorMap,
    pub category_colors: ColorMap,

    /// Scatter y positions for every outcome label in the dataset.
    pub outcome_axis: OutcomeAxis,
}

impl AppState {
    /// Ingest the dataset and derive the initial views for all sites and the
    /// full payload range.
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        let slider_max = payload_slider_max(&dataset);
        let selection = Selection {
            site: SiteChoice::All,
            payload: PayloadRange::new(PAYLOAD_SLIDER_MIN, slider_max),
        };
        let views = derive_views(&dataset.records, &selection);

        let site_colors = ColorMap::new(dataset.sites.iter().map(String::as_str));
        let outcome_colors =
            ColorMap::new(dataset.records.iter().map(|r| r.outcome.label.as_str()));
        let category_colors =
            ColorMap::new(dataset.records.iter().map(|r| r.booster_category.as_str()));
        let outcome_axis = OutcomeAxis::new(dataset.records.iter().map(|r| &r.outcome));

        Self {
            dataset,
            selection,
            views,
            slider_max,
            site_search: String::new(),
            site_colors,
            outcome_colors,
            category_colors,
            outcome_axis,
        }
    }

    /// Apply a new selection, re-deriving the views only if it changed.
    pub fn select(&mut self, selection: Selection) {
        if selection == self.selection {
            return;
        }
        log::debug!("Selection changed: {selection:?}");
        self.views = derive_views(&self.dataset.records, &selection);
        self.selection = selection;
    }

    pub fn set_site(&mut self, site: SiteChoice) {
        let selection = Selection {
            site,
            ..self.selection.clone()
        };
        self.select(selection);
    }

    pub fn set_payload(&mut self, payload: PayloadRange) {
        let selection = Selection {
            payload,
            ..self.selection.clone()
        };
        self.select(selection);
    }

    /// Sites matching the search box, case-insensitively.
    pub fn matching_sites(&self) -> Vec<&str> {
        let needle = self.site_search.trim().to_lowercase();
        self.dataset
            .sites
            .iter()
            .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}
