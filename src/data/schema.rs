use std::fmt;

use thiserror::Error;

use super::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Errors raised while binding a raw table to the launch schema
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("required column '{column}' is missing for the {variant} layout")]
    MissingColumn {
        column: &'static str,
        variant: DatasetVariant,
    },

    #[error("no known dataset layout matches the header {header:?}")]
    UnknownLayout { header: Vec<String> },

    #[error("row {row}, column '{column}': {reason} (value '{value}')")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Raw table – what every file reader produces
// ---------------------------------------------------------------------------

/// Header plus string cells, before any typing happens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    fn position(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == column)
    }
}

// ---------------------------------------------------------------------------
// Dataset layouts
// ---------------------------------------------------------------------------

/// Known physical layouts of the launch dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetVariant {
    /// `Launch_Site`, `PAYLOAD_MASS__KG_`, textual `Mission_Outcome`.
    MissionOutcome,
    /// `Launch Site`, `Payload Mass (kg)`, binary `class` flag.
    ClassFlag,
}

impl fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetVariant::MissionOutcome => write!(f, "mission-outcome"),
            DatasetVariant::ClassFlag => write!(f, "class-flag"),
        }
    }
}

/// How the outcome column is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeEncoding {
    Text,
    Flag,
}

/// Where the booster category comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Column(&'static str),
    FromBoosterVersion,
}

/// Binding of logical fields to physical column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub variant: DatasetVariant,
    pub site: &'static str,
    pub payload_mass: &'static str,
    pub outcome: &'static str,
    pub outcome_encoding: OutcomeEncoding,
    pub booster_version: &'static str,
    pub booster_category: CategorySource,
}

impl DatasetVariant {
    pub const ALL: [DatasetVariant; 2] = [DatasetVariant::MissionOutcome, DatasetVariant::ClassFlag];

    pub fn mapping(self) -> ColumnMapping {
        match self {
            DatasetVariant::MissionOutcome => ColumnMapping {
                variant: self,
                site: "Launch_Site",
                payload_mass: "PAYLOAD_MASS__KG_",
                outcome: "Mission_Outcome",
                outcome_encoding: OutcomeEncoding::Text,
                booster_version: "Booster_Version",
                booster_category: CategorySource::FromBoosterVersion,
            },
            DatasetVariant::ClassFlag => ColumnMapping {
                variant: self,
                site: "Launch Site",
                payload_mass: "Payload Mass (kg)",
                outcome: "class",
                outcome_encoding: OutcomeEncoding::Flag,
                booster_version: "Booster Version",
                booster_category: CategorySource::Column("Booster Version Category"),
            },
        }
    }

    /// Pick the first layout whose site column appears in the header.
    pub fn detect(header: &[String]) -> Result<Self, SchemaError> {
        DatasetVariant::ALL
            .into_iter()
            .find(|v| header.iter().any(|h| h.trim() == v.mapping().site))
            .ok_or_else(|| SchemaError::UnknownLayout {
                header: header.to_vec(),
            })
    }
}

/// Category shorthand from a booster version such as `F9 v1.1 B1011`.
pub fn derive_booster_category(booster_version: &str) -> String {
    let mut tokens = booster_version.split_whitespace();
    let first = tokens.next();
    match (first, tokens.next()) {
        (Some(_), Some(second)) => second.to_string(),
        _ => booster_version.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

struct BoundColumns {
    site: usize,
    payload_mass: usize,
    outcome: usize,
    booster_version: usize,
    booster_category: Option<usize>,
}

impl ColumnMapping {
    fn resolve(&self, table: &RawTable) -> Result<BoundColumns, SchemaError> {
        let find = |column: &'static str| {
            table.position(column).ok_or(SchemaError::MissingColumn {
                column,
                variant: self.variant,
            })
        };

        Ok(BoundColumns {
            site: find(self.site)?,
            payload_mass: find(self.payload_mass)?,
            outcome: find(self.outcome)?,
            booster_version: find(self.booster_version)?,
            booster_category: match self.booster_category {
                CategorySource::Column(name) => Some(find(name)?),
                CategorySource::FromBoosterVersion => None,
            },
        })
    }

    /// Convert every raw row into a typed record, failing on the first bad cell.
    pub fn bind(&self, table: &RawTable) -> Result<Vec<LaunchRecord>, SchemaError> {
        let cols = self.resolve(table)?;

        table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row_no = i + 1;
                let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

                let site = cell(cols.site);
                if site.is_empty() {
                    return Err(SchemaError::InvalidValue {
                        row: row_no,
                        column: self.site,
                        value: String::new(),
                        reason: "site identifier is empty",
                    });
                }

                let payload_mass_kg = parse_payload(cell(cols.payload_mass)).map_err(|reason| {
                    SchemaError::InvalidValue {
                        row: row_no,
                        column: self.payload_mass,
                        value: cell(cols.payload_mass).to_string(),
                        reason,
                    }
                })?;

                let raw_outcome = cell(cols.outcome);
                let outcome = match self.outcome_encoding {
                    OutcomeEncoding::Text => Outcome::from_text(raw_outcome),
                    OutcomeEncoding::Flag => parse_flag(raw_outcome)
                        .map(Outcome::from_flag)
                        .ok_or_else(|| SchemaError::InvalidValue {
                            row: row_no,
                            column: self.outcome,
                            value: raw_outcome.to_string(),
                            reason: "expected a 0/1 class flag",
                        })?,
                };

                let booster_version = cell(cols.booster_version).to_string();
                let booster_category = match cols.booster_category {
                    Some(idx) => cell(idx).to_string(),
                    None => derive_booster_category(&booster_version),
                };

                Ok(LaunchRecord {
                    site: site.to_string(),
                    payload_mass_kg,
                    outcome,
                    booster_version,
                    booster_category,
                })
            })
            .collect()
    }
}

fn parse_payload(s: &str) -> Result<f64, &'static str> {
    if s.is_empty() {
        return Err("payload mass is empty");
    }
    let v: f64 = s.parse().map_err(|_| "payload mass is not a number")?;
    if !v.is_finite() {
        return Err("payload mass is not finite");
    }
    if v < 0.0 {
        return Err("payload mass is negative");
    }
    Ok(v)
}

fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" | "1.0" | "true" => Some(true),
        "0" | "0.0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn detects_both_layouts() {
        let h = |cols: &[&str]| cols.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            DatasetVariant::detect(&h(&["Flight", "Launch_Site"])),
            Ok(DatasetVariant::MissionOutcome)
        );
        assert_eq!(
            DatasetVariant::detect(&h(&["Launch Site", "class"])),
            Ok(DatasetVariant::ClassFlag)
        );
        assert!(matches!(
            DatasetVariant::detect(&h(&["site", "mass"])),
            Err(SchemaError::UnknownLayout { .. })
        ));
    }

    #[test]
    fn binds_mission_outcome_layout() {
        let t = table(
            &["Launch_Site", "PAYLOAD_MASS__KG_", "Mission_Outcome", "Booster_Version"],
            &[
                &["CCAFS LC-40", "0", "Success", "F9 v1.0  B0003"],
                &["KSC LC-39A", "2490", "Failure (in flight)", "F9 FT B1031.1"],
            ],
        );
        let records = DatasetVariant::MissionOutcome.mapping().bind(&t).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].outcome.success);
        assert_eq!(records[0].booster_category, "v1.0");
        assert!(!records[1].outcome.success);
        assert_eq!(records[1].outcome.label, "Failure (in flight)");
        assert_eq!(records[1].booster_category, "FT");
        assert_eq!(records[1].payload_mass_kg, 2490.0);
    }

    #[test]
    fn padded_success_cell_shares_the_success_slice() {
        use crate::data::filter::{SiteChoice, derive_pie_data};

        let t = table(
            &["Launch_Site", "PAYLOAD_MASS__KG_", "Mission_Outcome", "Booster_Version"],
            &[
                &["CCAFS LC-40", "500", "Success ", "F9 FT B1021.1"],
                &["CCAFS LC-40", "600", "Success", "F9 FT B1022"],
            ],
        );
        let records = DatasetVariant::MissionOutcome.mapping().bind(&t).unwrap();
        assert!(records.iter().all(|r| r.outcome.success));
        assert_eq!(records[0].outcome, records[1].outcome);

        let pie = derive_pie_data(&records, &SiteChoice::Site("CCAFS LC-40".to_string()));
        let crate::data::filter::PieData::OutcomeDistribution(rows) = pie else {
            panic!("expected the single-site distribution");
        };
        assert!(rows.iter().all(|r| r.outcome.label == "Success"));
    }

    #[test]
    fn binds_class_flag_layout() {
        let t = table(
            &["Flight Number", "Launch Site", "class", "Payload Mass (kg)", "Booster Version", "Booster Version Category"],
            &[
                &["1", "CCAFS LC-40", "0", "0.0", "F9 v1.0  B0003", "v1.0"],
                &["2", "VAFB SLC-4E", "1.0", "9600.0", "F9 B4 B1041.1", "B4"],
            ],
        );
        let records = DatasetVariant::ClassFlag.mapping().bind(&t).unwrap();
        assert_eq!(records[0].outcome, Outcome::from_flag(false));
        assert_eq!(records[1].outcome, Outcome::from_flag(true));
        assert_eq!(records[1].booster_category, "B4");
        assert_eq!(records[1].site, "VAFB SLC-4E");
    }

    #[test]
    fn missing_column_names_the_column() {
        let t = table(&["Launch Site", "class", "Booster Version"], &[]);
        let err = DatasetVariant::ClassFlag.mapping().bind(&t).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                column: "Payload Mass (kg)",
                variant: DatasetVariant::ClassFlag,
            }
        );
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn rejects_bad_payloads() {
        let header = ["Launch_Site", "PAYLOAD_MASS__KG_", "Mission_Outcome", "Booster_Version"];
        for bad in ["-5", "", "heavy", "inf"] {
            let t = table(&header, &[&["CCAFS LC-40", bad, "Success", "F9"]]);
            let err = DatasetVariant::MissionOutcome.mapping().bind(&t).unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidValue { row: 1, column: "PAYLOAD_MASS__KG_", .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn rejects_empty_site_and_bad_flag() {
        let header = ["Launch Site", "Payload Mass (kg)", "class", "Booster Version", "Booster Version Category"];
        let t = table(&header, &[&["", "10", "1", "F9", "FT"]]);
        assert!(matches!(
            DatasetVariant::ClassFlag.mapping().bind(&t),
            Err(SchemaError::InvalidValue { column: "Launch Site", .. })
        ));

        let t = table(&header, &[&["CCAFS", "10", "1", "F9", "FT"], &["CCAFS", "10", "2", "F9", "FT"]]);
        assert!(matches!(
            DatasetVariant::ClassFlag.mapping().bind(&t),
            Err(SchemaError::InvalidValue { row: 2, column: "class", .. })
        ));
    }

    #[test]
    fn category_from_booster_version() {
        assert_eq!(derive_booster_category("F9 v1.1 B1011"), "v1.1");
        assert_eq!(derive_booster_category("F9 FT B1021.1"), "FT");
        assert_eq!(derive_booster_category("F9 B5 B1046.1"), "B5");
        assert_eq!(derive_booster_category("  F9 v1.1 "), "v1.1");
        assert_eq!(derive_booster_category(" Falcon "), "Falcon");
    }
}
