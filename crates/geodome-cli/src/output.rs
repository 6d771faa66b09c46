//! Rendering of convergence samples as text, CSV or JSON lines.

use clap::ValueEnum;
use geodome_analyze::ConvergenceSample;
use serde::{Deserialize, Serialize};

/// Output format for per-frequency records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Aligned columns for reading in a terminal.
    #[default]
    Text,
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON object per line.
    Json,
}

const COLUMNS: [&str; 9] = [
    "frequency",
    "vertices",
    "faces",
    "surface_area",
    "volume",
    "area_error",
    "volume_error",
    "relative_area_error",
    "isoperimetric_quotient",
];

/// Header line for `format`, if it has one.
pub fn header(format: Format) -> Option<String> {
    match format {
        Format::Text => Some(format!(
            "{:>5} {:>9} {:>9} {:>18} {:>18} {:>14} {:>14} {:>11} {:>10}",
            "nu", "V", "F", "S", "Vol", "eps", "dV", "rel_eps", "Q"
        )),
        Format::Csv => Some(COLUMNS.join(",")),
        Format::Json => None,
    }
}

/// One line describing `sample`.
pub fn format_record(sample: &ConvergenceSample, format: Format) -> String {
    match format {
        Format::Text => format!(
            "{:>5} {:>9} {:>9} {:>18.10e} {:>18.10e} {:>14.6e} {:>14.6e} {:>11.4e} {:>10.6}",
            sample.frequency,
            sample.vertices,
            sample.faces,
            sample.surface_area,
            sample.volume,
            sample.area_error,
            sample.volume_error,
            sample.relative_area_error(),
            sample.isoperimetric_quotient,
        ),
        Format::Csv => format!(
            "{},{},{},{},{},{},{},{},{}",
            sample.frequency,
            sample.vertices,
            sample.faces,
            sample.surface_area,
            sample.volume,
            sample.area_error,
            sample.volume_error,
            sample.relative_area_error(),
            sample.isoperimetric_quotient,
        ),
        Format::Json => {
            // Serializing a struct of plain numbers cannot fail.
            serde_json::to_string(sample).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConvergenceSample {
        ConvergenceSample {
            frequency: 2,
            vertices: 42,
            faces: 80,
            surface_area: 11.5,
            volume: 3.75,
            area_error: -1.0,
            volume_error: -0.5,
            isoperimetric_quotient: 0.95,
        }
    }

    #[test]
    fn test_csv_matches_header() {
        let head = header(Format::Csv).unwrap();
        let row = format_record(&sample(), Format::Csv);
        assert_eq!(head.split(',').count(), row.split(',').count());
        assert!(row.starts_with("2,42,80,11.5,3.75,-1,-0.5,"));
    }

    #[test]
    fn test_json_line_round_trips() {
        let line = format_record(&sample(), Format::Json);
        assert!(!line.contains('\n'));
        let back: ConvergenceSample = serde_json::from_str(&line).unwrap();
        assert_eq!(back, sample());
        assert!(header(Format::Json).is_none());
    }

    #[test]
    fn test_text_columns_align() {
        let head = header(Format::Text).unwrap();
        let row = format_record(&sample(), Format::Text);
        assert_eq!(head.split_whitespace().count(), row.split_whitespace().count());
        assert!(row.trim_start().starts_with('2'));
    }

    #[test]
    fn test_text_keeps_small_magnitudes() {
        let mut tiny = sample();
        tiny.surface_area = 9.574541383e-24;
        tiny.volume = 2.5361507e-36;
        let row = format_record(&tiny, Format::Text);
        let cols: Vec<&str> = row.split_whitespace().collect();
        let area: f64 = cols[3].parse().unwrap();
        let volume: f64 = cols[4].parse().unwrap();
        assert!((area / 9.574541383e-24 - 1.0).abs() < 1e-9);
        assert!((volume / 2.5361507e-36 - 1.0).abs() < 1e-9);
    }
}
