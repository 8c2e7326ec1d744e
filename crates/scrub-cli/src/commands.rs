//! Command implementations: `clean` and `config`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use scrub_clean::{BatchStats, FieldCleaner, RuleObserver};
use scrub_model::{BatchErrorPolicy, Config, Domain};
use scrub_report::{CleanReport, FieldFailure, RuleTrace};

use crate::cli::{CleanArgs, ColumnSpec, ConfigArgs};

/// Everything `clean` produces for the summary printer.
pub struct CleanOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub rows: usize,
    pub columns: Vec<ColumnStats>,
    pub report: CleanReport,
    pub failures: Vec<FieldFailure>,
}

impl CleanOutcome {
    pub fn failed_cells(&self) -> usize {
        self.columns.iter().map(|column| column.stats.failed).sum()
    }
}

/// Per-column cleaning counts.
pub struct ColumnStats {
    pub name: String,
    pub domain: Domain,
    pub stats: BatchStats,
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.overrides)?;
    let rendered = config
        .to_json_string()
        .context("render configuration")?;
    println!("{rendered}");
    Ok(())
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanOutcome> {
    let config = load_config(args.config.as_deref(), &args.overrides)?;
    let policy = if args.fail_fast {
        BatchErrorPolicy::FailFast
    } else {
        config.batch.error_policy
    };

    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();

    let (headers, rows) = read_csv(&args.input)?;
    let bindings = bind_columns(&headers, &args.columns, &config)?;
    info!(
        rows = rows.len(),
        columns = bindings.len(),
        policy = ?policy,
        "input loaded"
    );

    let mut trace = RuleTrace::new();
    let mut stats: Vec<BatchStats> = vec![BatchStats::default(); bindings.len()];
    let mut cleaned_rows: Vec<StringRecord> = Vec::with_capacity(rows.len());

    let progress = ProgressBar::new(rows.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} rows")
            .context("progress template")?,
    );
    let start = Instant::now();
    for (row_index, row) in rows.iter().enumerate() {
        let mut cells: Vec<String> = row.iter().map(str::to_string).collect();
        for (binding_index, binding) in bindings.iter().enumerate() {
            let raw = &cells[binding.column];
            stats[binding_index].total += 1;
            match binding.cleaner.clean_value_observed(raw, &binding.name, &mut trace) {
                Ok(value) => {
                    stats[binding_index].cleaned += 1;
                    cells[binding.column] = value.to_string();
                }
                Err(error) => {
                    if policy == BatchErrorPolicy::FailFast {
                        bail!(
                            "row {}, column '{}': {error}",
                            row_index + 1,
                            binding.name
                        );
                    }
                    // The raw value stays in the output; failures are
                    // counted and reported, never silently blanked.
                    warn!(
                        row = row_index + 1,
                        column = %binding.name,
                        %error,
                        "cell failed to clean"
                    );
                    trace.item_failed(&binding.name, &error);
                    stats[binding_index].failed += 1;
                }
            }
        }
        cleaned_rows.push(StringRecord::from(cells));
        progress.inc(1);
    }
    progress.finish_and_clear();
    info!(
        rows = cleaned_rows.len(),
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );

    let output = if args.dry_run {
        debug!("dry run, skipping output");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input));
        write_csv(&path, &headers, &cleaned_rows)?;
        info!(output = %path.display(), "output written");
        Some(path)
    };

    let columns = bindings
        .into_iter()
        .zip(stats)
        .map(|(binding, stats)| ColumnStats {
            name: binding.name,
            domain: binding.domain,
            stats,
        })
        .collect();
    Ok(CleanOutcome {
        input: args.input.clone(),
        output,
        rows: cleaned_rows.len(),
        report: trace.report(),
        failures: trace.failures().to_vec(),
        columns,
    })
}

/// Load defaults, merge an optional file, then apply `--set` overrides
/// in order.
fn load_config(path: Option<&Path>, overrides: &[String]) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    for entry in overrides {
        let Some((key, raw)) = entry.split_once('=') else {
            bail!("expected PATH=VALUE in --set, got '{entry}'");
        };
        // Values that parse as JSON are taken as-is (numbers, booleans,
        // arrays); everything else is a plain string.
        let value: Value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        config
            .set(key.trim(), value)
            .with_context(|| format!("apply --set {entry}"))?;
    }
    Ok(config)
}

struct ColumnBinding {
    name: String,
    column: usize,
    domain: Domain,
    cleaner: FieldCleaner,
}

fn bind_columns(
    headers: &StringRecord,
    specs: &[ColumnSpec],
    config: &Config,
) -> Result<Vec<ColumnBinding>> {
    specs
        .iter()
        .map(|spec| {
            let column = headers
                .iter()
                .position(|header| header == spec.name)
                .with_context(|| format!("column '{}' not found in input header", spec.name))?;
            Ok(ColumnBinding {
                name: spec.name.clone(),
                column,
                domain: spec.domain,
                cleaner: FieldCleaner::for_domain(spec.domain, config),
            })
        })
        .collect()
}

fn read_csv(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.with_context(|| format!("read {}", path.display()))?);
    }
    Ok((headers, rows))
}

fn write_csv(path: &Path, headers: &StringRecord, rows: &[StringRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(headers)
        .context("write header")?;
    for row in rows {
        writer.write_record(row).context("write row")?;
    }
    writer.flush().context("flush output")?;
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}.cleaned.csv"))
}
