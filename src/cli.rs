use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_DATA_PATH;
use crate::data::filter::{PayloadRange, Selection, SiteChoice};
use crate::data::schema::DatasetVariant;

#[derive(Debug, Parser)]
#[command(name = "launch-dashboard", version, about = "Launch records dashboard")]
pub struct CliArgs {
    /// Launch dataset (.csv, .tsv, .json or .parquet)
    #[arg(long, value_name = "PATH", env = "LAUNCH_DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Force a column layout instead of detecting it from the header
    #[arg(long, value_enum)]
    pub variant: Option<DatasetVariant>,

    /// Print the derived views as JSON and exit
    #[arg(long)]
    pub headless: bool,

    /// Site to select in headless mode (all sites when omitted)
    #[arg(long, value_name = "SITE", requires = "headless")]
    pub site: Option<String>,

    /// Lower payload bound in kg for headless mode
    #[arg(long, value_name = "KG", requires = "headless")]
    pub payload_min: Option<f64>,

    /// Upper payload bound in kg for headless mode
    #[arg(long, value_name = "KG", requires = "headless")]
    pub payload_max: Option<f64>,
}

impl CliArgs {
    /// Selection described by the headless flags.
    pub fn selection(&self, slider_min: f64, slider_max: f64) -> Selection {
        Selection {
            site: self
                .site
                .clone()
                .map_or(SiteChoice::All, SiteChoice::Site),
            payload: PayloadRange::new(
                self.payload_min.unwrap_or(slider_min),
                self.payload_max.unwrap_or(slider_max),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_selection_from_flags() {
        let args = CliArgs::try_parse_from([
            "launch-dashboard",
            "--data",
            "launches.csv",
            "--variant",
            "class-flag",
            "--headless",
            "--site",
            "KSC LC-39A",
            "--payload-max",
            "5000",
        ])
        .unwrap();

        assert_eq!(args.variant, Some(DatasetVariant::ClassFlag));
        assert_eq!(args.data, PathBuf::from("launches.csv"));
        let sel = args.selection(0.0, 10_000.0);
        assert_eq!(sel.site, SiteChoice::Site("KSC LC-39A".to_string()));
        assert_eq!(sel.payload, PayloadRange::new(0.0, 5000.0));
    }

    #[test]
    fn selection_flags_require_headless() {
        assert!(CliArgs::try_parse_from(["launch-dashboard", "--site", "X"]).is_err());
    }

    #[test]
    fn defaults_select_everything() {
        let args = CliArgs::try_parse_from(["launch-dashboard", "--headless"]).unwrap();
        let sel = args.selection(0.0, 10_000.0);
        assert_eq!(sel.site, SiteChoice::All);
        assert_eq!(sel.payload, PayloadRange::new(0.0, 10_000.0));
    }
}
