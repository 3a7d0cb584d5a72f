//! Column files of frequency-domain data

use super::format_scientific;
use crate::error::{ProcessingError, Result};
use crate::spectrum::{AmplitudeSpectrum, SmoothedEas, EAS_B_EXP};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read the frequency column and amplitude column `column` (0-based)
///
/// Comment lines and any text lines ahead of the first numeric row are
/// skipped. Once numeric rows have started every row must parse.
pub fn read_fas_columns<R: BufRead>(reader: R, column: usize) -> Result<AmplitudeSpectrum> {
    if column == 0 {
        return Err(ProcessingError::InvalidArgument(
            "column 0 holds frequencies, pick an amplitude column".into(),
        ));
    }

    let mut frequencies = Vec::new();
    let mut amplitudes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let parsed: std::result::Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();
        let values = match parsed {
            Ok(values) => values,
            Err(_) if frequencies.is_empty() => continue,
            Err(e) => {
                return Err(ProcessingError::Parse {
                    line: index + 1,
                    message: e.to_string(),
                })
            }
        };

        let amplitude = values.get(column).copied().ok_or_else(|| ProcessingError::Parse {
            line: index + 1,
            message: format!("expected at least {} columns, found {}", column + 1, values.len()),
        })?;
        frequencies.push(values[0]);
        amplitudes.push(amplitude);
    }

    Ok(AmplitudeSpectrum {
        frequencies,
        amplitudes,
    })
}

/// Read one amplitude column from a file
pub fn load_fas_columns(path: impl AsRef<Path>, column: usize) -> Result<AmplitudeSpectrum> {
    read_fas_columns(BufReader::new(File::open(path.as_ref())?), column)
}

/// Write frequencies, both horizontals, EAS and smoothed EAS, tab-separated
pub fn write_smoothed_eas<W: Write>(record: &SmoothedEas, mut writer: W) -> Result<()> {
    writeln!(
        writer,
        "# Freq(Hz)\t FAS H1 (cm/s)\t FAS H2 (cm/s)\t EAS (cm/s)\t Smoothed EAS, b={:.6} (cm/s)",
        EAS_B_EXP
    )?;

    for i in 0..record.len() {
        let row = [
            record.frequencies[i],
            record.fas_h1[i],
            record.fas_h2[i],
            record.eas[i],
            record.smoothed_eas[i],
        ];
        let formatted: Vec<String> = row.iter().map(|&value| format_scientific(value, 7)).collect();
        writeln!(writer, "{}", formatted.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_smoothed_eas(record: &SmoothedEas, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_smoothed_eas(record, BufWriter::new(file))
}
