use serde::Serialize;

use super::schema::DatasetVariant;

// ---------------------------------------------------------------------------
// Outcome – canonical launch result
// ---------------------------------------------------------------------------

/// Canonical launch outcome.
///
/// Both dataset layouts are converted into this shape at load time: the
/// success flag drives aggregation, the label is what the charts display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub label: String,
}

impl Outcome {
    pub const SUCCESS_LABEL: &'static str = "Success";
    pub const FAILURE_LABEL: &'static str = "Failure";

    /// Interpret a textual mission outcome. Only an exact `Success` counts.
    pub fn from_text(text: &str) -> Self {
        let label = text.trim().to_string();
        Self {
            success: label == Self::SUCCESS_LABEL,
            label,
        }
    }

    /// Build from a binary class flag.
    pub fn from_flag(success: bool) -> Self {
        let label = if success {
            Self::SUCCESS_LABEL
        } else {
            Self::FAILURE_LABEL
        };
        Self {
            success,
            label: label.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: String,
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed site list and payload bounds.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    pub sites: Vec<String>,
    /// Smallest and largest payload seen (`None` for an empty file).
    pub payload_bounds: Option<(f64, f64)>,
    /// Layout the file was bound with.
    pub variant: DatasetVariant,
}

impl LaunchDataset {
    /// Build the site index and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>, variant: DatasetVariant) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            payload_bounds,
            variant,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_flag(success),
            booster_version: "F9 FT B1021.1".to_string(),
            booster_category: "FT".to_string(),
        }
    }

    #[test]
    fn text_outcome_requires_exact_success() {
        assert!(Outcome::from_text("Success").success);
        assert!(Outcome::from_text("  Success ").success);
        assert!(!Outcome::from_text("Success (payload status unclear)").success);
        assert!(!Outcome::from_text("Failure (in flight)").success);
        assert_eq!(Outcome::from_text(" Failure (in flight)").label, "Failure (in flight)");
    }

    #[test]
    fn trailing_space_merges_into_success() {
        let padded = Outcome::from_text("Success ");
        assert!(padded.success);
        assert_eq!(padded, Outcome::from_text("Success"));
        assert_eq!(padded.label, "Success");
    }

    #[test]
    fn flag_outcome_labels() {
        assert_eq!(Outcome::from_flag(true).label, "Success");
        assert_eq!(Outcome::from_flag(false).label, "Failure");
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = LaunchDataset::from_records(
            vec![
                record("VAFB SLC-4E", 9600.0, true),
                record("CCAFS LC-40", 0.0, false),
                record("VAFB SLC-4E", 500.0, true),
            ],
            DatasetVariant::ClassFlag,
        );
        assert_eq!(ds.sites, vec!["VAFB SLC-4E", "CCAFS LC-40"]);
        assert_eq!(ds.payload_bounds, Some((0.0, 9600.0)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new(), DatasetVariant::MissionOutcome);
        assert!(ds.is_empty());
        assert!(ds.payload_bounds.is_none());
    }
}
