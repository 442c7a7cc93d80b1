use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Payload slider settings
// ---------------------------------------------------------------------------

pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;
pub const PAYLOAD_SLIDER_MARKS: [f64; 5] = [0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0];

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const DEFAULT_DATA_PATH: &str = "Spacex.csv";

/// Upper end of the payload slider: the default maximum, raised to the next
/// step when the data goes beyond it.
pub fn payload_slider_max(dataset: &LaunchDataset) -> f64 {
    match dataset.payload_bounds {
        Some((_, max)) if max > PAYLOAD_SLIDER_MAX => {
            let raised = (max / PAYLOAD_SLIDER_STEP).ceil() * PAYLOAD_SLIDER_STEP;
            log::warn!(
                "Largest payload {max} kg exceeds the slider range, raising maximum to {raised} kg"
            );
            raised
        }
        _ => PAYLOAD_SLIDER_MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::schema::DatasetVariant;

    #[test]
    fn slider_max_defaults_to_ten_tonnes() {
        let ds = LaunchDataset::from_records(
            vec![record("A", 9600.0, true)],
            DatasetVariant::ClassFlag,
        );
        assert_eq!(payload_slider_max(&ds), 10_000.0);
    }

    #[test]
    fn slider_max_rounds_up_to_step() {
        let ds = LaunchDataset::from_records(
            vec![record("A", 15_600.0, true)],
            DatasetVariant::ClassFlag,
        );
        assert_eq!(payload_slider_max(&ds), 16_000.0);
    }
}
