//! Housing CSV ingest and exploratory statistics.
//!
//! This module turns the bundled `Housing.csv` into the precomputed series the
//! charts screen renders: a bedrooms histogram, a price five-number summary,
//! a price-vs-area scatter, and a numeric correlation matrix.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no rendering logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use nalgebra::DMatrix;

use crate::error::AppError;

/// Yes/no columns mapped to 1/0 before correlation.
///
/// `furnishingstatus` is a three-level enum, not yes/no, so it stays
/// non-numeric and is excluded from the correlation matrix.
const YES_NO_COLUMNS: [&str; 6] = [
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "prefarea",
];

/// Numeric columns required for the chart panels.
const REQUIRED_COLUMNS: [&str; 3] = ["price", "area", "bedrooms"];

/// Numeric columns included in the correlation matrix when present.
const OPTIONAL_NUMERIC_COLUMNS: [&str; 3] = ["bathrooms", "stories", "parking"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// One histogram bin (integer bedroom counts).
#[derive(Debug, Clone)]
pub struct HistBin {
    pub label: String,
    pub count: u64,
}

/// Five-number summary plus IQR fences for the price boxplot.
#[derive(Debug, Clone, Copy)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

/// Pearson correlation matrix over the numeric (and mapped yes/no) columns.
#[derive(Debug, Clone)]
pub struct CorrMatrix {
    pub labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything the charts screen needs, precomputed once per load.
#[derive(Debug, Clone)]
pub struct HousingSummary {
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
    pub bedrooms_hist: Vec<HistBin>,
    pub price_box: BoxStats,
    /// `(area, price)` points for the scatter panel.
    pub scatter: Vec<(f64, f64)>,
    pub corr: CorrMatrix,
}

/// Load and summarize the housing dataset.
///
/// Failures here are recoverable at the UI level (the charts screen simply
/// reports them); only the caller decides whether they are fatal.
pub fn load_housing_summary(path: &Path) -> Result<HousingSummary, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open dataset '{}': {e}", path.display()),
        )
    })?;
    summarize_from_reader(file)
}

/// Summarize the dataset from any reader (used directly by tests).
pub fn summarize_from_reader<R: Read>(rdr: R) -> Result<HousingSummary, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }

    // Column order for the correlation matrix: required numerics, optional
    // numerics that exist, then the mapped yes/no columns that exist.
    let mut corr_columns: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    for name in OPTIONAL_NUMERIC_COLUMNS {
        if header_map.contains_key(name) {
            corr_columns.push(name);
        }
    }
    let yes_no_start = corr_columns.len();
    for name in YES_NO_COLUMNS {
        if header_map.contains_key(name) {
            corr_columns.push(name);
        }
    }

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, &corr_columns, yes_no_start) {
            Ok(values) => rows.push(values),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(
            3,
            "No valid rows remain after normalization.",
        ));
    }

    // The required columns seeded `corr_columns`, so they sit at fixed slots.
    let column = |idx: usize| -> Vec<f64> { rows.iter().map(|r| r[idx]).collect() };
    let prices = column(0);
    let areas = column(1);
    let bedrooms = column(2);

    let price_box = box_stats(&prices)
        .ok_or_else(|| AppError::new(3, "Could not compute price statistics."))?;
    let scatter = areas.iter().copied().zip(prices.iter().copied()).collect();
    let bedrooms_hist = integer_histogram(&bedrooms);
    let corr = correlation_matrix(&rows, &corr_columns);

    Ok(HousingSummary {
        rows_read,
        rows_used: rows.len(),
        row_errors,
        bedrooms_hist,
        price_box,
        scatter,
        corr,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    corr_columns: &[&str],
    yes_no_start: usize,
) -> Result<Vec<f64>, String> {
    let mut values = Vec::with_capacity(corr_columns.len());
    for (pos, name) in corr_columns.iter().enumerate() {
        let raw = get_required(record, header_map, name)?;
        let value = if pos >= yes_no_start {
            map_yes_no(raw).ok_or_else(|| {
                format!("Invalid `{name}` value '{raw}' (expected yes/no).")
            })?
        } else {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("Invalid numeric `{name}` value '{raw}'."))?
        };
        values.push(value);
    }
    Ok(values)
}

fn map_yes_no(raw: &str) -> Option<f64> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" => Some(1.0),
        "no" => Some(0.0),
        _ => None,
    }
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Count occurrences of each integer value between the observed min and max.
fn integer_histogram(values: &[f64]) -> Vec<HistBin> {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for v in values {
        *counts.entry(v.round() as i64).or_insert(0) += 1;
    }
    let (&lo, &hi) = match (counts.keys().min(), counts.keys().max()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Vec::new(),
    };
    (lo..=hi)
        .map(|k| HistBin {
            label: k.to_string(),
            count: counts.get(&k).copied().unwrap_or(0),
        })
        .collect()
}

/// Linear-interpolated quantile over a sorted slice (the usual `(n-1)*p` rule).
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = (n - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;

    Some(BoxStats {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_fence: q1 - 1.5 * iqr,
        upper_fence: q3 + 1.5 * iqr,
    })
}

/// Pearson correlation over the encoded numeric columns.
///
/// Columns with zero variance correlate as 0 with everything (and 1 with
/// themselves) rather than producing NaNs in the heatmap.
fn correlation_matrix(rows: &[Vec<f64>], labels: &[&str]) -> CorrMatrix {
    let n_rows = rows.len();
    let n_cols = labels.len();
    let m = DMatrix::from_fn(n_rows, n_cols, |r, c| rows[r][c]);

    let means: Vec<f64> = (0..n_cols).map(|c| m.column(c).mean()).collect();
    let centered = DMatrix::from_fn(n_rows, n_cols, |r, c| m[(r, c)] - means[c]);

    let mut values = vec![vec![0.0; n_cols]; n_cols];
    for i in 0..n_cols {
        for j in 0..=i {
            let ci = centered.column(i);
            let cj = centered.column(j);
            let denom = (ci.dot(&ci) * cj.dot(&cj)).sqrt();
            let r = if i == j {
                1.0
            } else if denom > 0.0 {
                ci.dot(&cj) / denom
            } else {
                0.0
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrMatrix {
        labels: labels.iter().map(|s| s.to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "price,area,bedrooms,bathrooms,stories,parking,mainroad,guestroom,basement,hotwaterheating,airconditioning,prefarea,furnishingstatus";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out
    }

    #[test]
    fn summarizes_a_clean_dataset() {
        let csv = csv_with_rows(&[
            "1000000,2000,2,1,1,0,yes,no,no,no,no,no,unfurnished",
            "2000000,4000,3,2,2,1,yes,no,yes,no,yes,yes,furnished",
            "3000000,6000,4,2,2,2,no,yes,yes,no,yes,yes,semi-furnished",
        ]);
        let summary = summarize_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_used, 3);
        assert!(summary.row_errors.is_empty());
        assert_eq!(summary.scatter.len(), 3);
        assert_eq!(summary.scatter[0], (2000.0, 1_000_000.0));

        // price and area are perfectly linear here.
        let pi = summary.corr.labels.iter().position(|l| l == "price").unwrap();
        let ai = summary.corr.labels.iter().position(|l| l == "area").unwrap();
        assert!((summary.corr.get(pi, ai) - 1.0).abs() < 1e-12);
        assert!((summary.corr.get(pi, pi) - 1.0).abs() < 1e-12);

        // furnishingstatus is non-numeric and must not appear.
        assert!(!summary.corr.labels.iter().any(|l| l == "furnishingstatus"));
    }

    #[test]
    fn bad_yes_no_token_skips_the_row_and_reports_it() {
        let csv = csv_with_rows(&[
            "1000000,2000,2,1,1,0,maybe,no,no,no,no,no,unfurnished",
            "2000000,4000,3,2,2,1,yes,no,yes,no,yes,yes,furnished",
        ]);
        let summary = summarize_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_used, 1);
        assert_eq!(summary.row_errors.len(), 1);
        assert_eq!(summary.row_errors[0].line, 2);
        assert!(summary.row_errors[0].message.contains("mainroad"));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "area,bedrooms\n2000,2";
        let err = summarize_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("`price`"));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let csv = csv_with_rows(&["abc,2000,2,1,1,0,yes,no,no,no,no,no,unfurnished"]);
        assert!(summarize_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.q1 - 1.75).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert!((stats.q3 - 3.25).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.upper_fence - (3.25 + 1.5 * 1.5)).abs() < 1e-12);
    }

    #[test]
    fn histogram_covers_the_integer_range() {
        let hist = integer_histogram(&[2.0, 2.0, 4.0]);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist[0].label, "2");
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[1].count, 0);
        assert_eq!(hist[2].count, 1);
    }

    #[test]
    fn anticorrelated_columns_hit_minus_one() {
        let rows = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
        let corr = correlation_matrix(&rows, &["a", "b"]);
        assert!((corr.get(0, 1) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_correlates_as_zero() {
        let rows = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let corr = correlation_matrix(&rows, &["a", "b"]);
        assert_eq!(corr.get(0, 1), 0.0);
        assert_eq!(corr.get(1, 1), 1.0);
    }
}
