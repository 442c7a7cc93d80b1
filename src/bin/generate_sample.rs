use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::{Parser, ValueEnum};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.60),
    ("CCAFS SLC-40", 0.85),
    ("KSC LC-39A", 0.80),
    ("VAFB SLC-4E", 0.65),
];

const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 1.0),
    ("v1.1", 0.9),
    ("FT", 1.0),
    ("B4", 1.05),
    ("B5", 1.15),
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    MissionOutcome,
    ClassFlag,
}

#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Write a synthetic launch dataset")]
struct Args {
    /// Output file (.csv or .parquet)
    #[arg(default_value = "sample_launches.csv")]
    output: PathBuf,

    /// Column layout to write
    #[arg(long, value_enum, default_value = "class-flag")]
    variant: Layout,

    /// Number of launches
    #[arg(long, default_value_t = 56)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// One synthetic launch before it is written in a given layout.
struct Launch {
    flight: i64,
    site: &'static str,
    payload: f64,
    success: bool,
    booster_version: String,
    category: &'static str,
}

fn generate(rows: usize, seed: u64) -> Vec<Launch> {
    let mut rng = SimpleRng::new(seed);
    (0..rows)
        .map(|i| {
            let (site, site_rate) = SITES[rng.pick(SITES.len())];
            // Later flights fly newer boosters.
            let era = (i * BOOSTERS.len() / rows.max(1)).min(BOOSTERS.len() - 1);
            let (category, lift) = BOOSTERS[era];
            let payload = (rng.next_f64() * 9_600.0 * lift).min(15_600.0).round();
            let success = rng.next_f64() < site_rate;
            Launch {
                flight: i as i64 + 1,
                site,
                payload,
                success,
                booster_version: format!("F9 {category} B{}", 1000 + i),
                category,
            }
        })
        .collect()
}

#[derive(Serialize)]
struct MissionOutcomeRow<'a> {
    #[serde(rename = "Flight_Number")]
    flight: i64,
    #[serde(rename = "Launch_Site")]
    site: &'a str,
    #[serde(rename = "Booster_Version")]
    booster_version: &'a str,
    #[serde(rename = "PAYLOAD_MASS__KG_")]
    payload: f64,
    #[serde(rename = "Mission_Outcome")]
    outcome: &'a str,
}

#[derive(Serialize)]
struct ClassFlagRow<'a> {
    #[serde(rename = "Flight Number")]
    flight: i64,
    #[serde(rename = "Launch Site")]
    site: &'a str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload: f64,
    #[serde(rename = "Booster Version")]
    booster_version: &'a str,
    #[serde(rename = "Booster Version Category")]
    category: &'a str,
}

fn write_csv(path: &Path, layout: Layout, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    for l in launches {
        match layout {
            Layout::MissionOutcome => writer.serialize(MissionOutcomeRow {
                flight: l.flight,
                site: l.site,
                booster_version: &l.booster_version,
                payload: l.payload,
                outcome: if l.success { "Success" } else { "Failure (in flight)" },
            })?,
            Layout::ClassFlag => writer.serialize(ClassFlagRow {
                flight: l.flight,
                site: l.site,
                class: i64::from(l.success),
                payload: l.payload,
                booster_version: &l.booster_version,
                category: l.category,
            })?,
        }
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, layout: Layout, launches: &[Launch]) -> Result<()> {
    let sites = StringArray::from(launches.iter().map(|l| l.site).collect::<Vec<_>>());
    let payloads = Float64Array::from(launches.iter().map(|l| l.payload).collect::<Vec<_>>());
    let boosters = StringArray::from(
        launches
            .iter()
            .map(|l| l.booster_version.as_str())
            .collect::<Vec<_>>(),
    );

    let (schema, columns) = match layout {
        Layout::MissionOutcome => {
            let outcomes = StringArray::from(
                launches
                    .iter()
                    .map(|l| if l.success { "Success" } else { "Failure (in flight)" })
                    .collect::<Vec<_>>(),
            );
            (
                Schema::new(vec![
                    Field::new("Launch_Site", DataType::Utf8, false),
                    Field::new("Booster_Version", DataType::Utf8, false),
                    Field::new("PAYLOAD_MASS__KG_", DataType::Float64, false),
                    Field::new("Mission_Outcome", DataType::Utf8, false),
                ]),
                vec![
                    Arc::new(sites) as ArrayRef,
                    Arc::new(boosters) as ArrayRef,
                    Arc::new(payloads) as ArrayRef,
                    Arc::new(outcomes) as ArrayRef,
                ],
            )
        }
        Layout::ClassFlag => {
            let class = Int64Array::from(
                launches
                    .iter()
                    .map(|l| i64::from(l.success))
                    .collect::<Vec<_>>(),
            );
            let categories =
                StringArray::from(launches.iter().map(|l| l.category).collect::<Vec<_>>());
            (
                Schema::new(vec![
                    Field::new("Launch Site", DataType::Utf8, false),
                    Field::new("class", DataType::Int64, false),
                    Field::new("Payload Mass (kg)", DataType::Float64, false),
                    Field::new("Booster Version", DataType::Utf8, false),
                    Field::new("Booster Version Category", DataType::Utf8, false),
                ]),
                vec![
                    Arc::new(sites) as ArrayRef,
                    Arc::new(class) as ArrayRef,
                    Arc::new(payloads) as ArrayRef,
                    Arc::new(boosters) as ArrayRef,
                    Arc::new(categories) as ArrayRef,
                ],
            )
        }
    };

    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let launches = generate(args.rows, args.seed);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, args.variant, &launches)?,
        "parquet" | "pq" => write_parquet(&args.output, args.variant, &launches)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!(
        "Wrote {} launches ({:?} layout) to {}",
        launches.len(),
        args.variant,
        args.output.display()
    );
    Ok(())
}
