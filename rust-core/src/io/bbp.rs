//! BBP text time series: four whitespace-separated columns (time, h1, h2, v)
//! under `#`/`%` header lines

use super::format_scientific;
use crate::error::{ProcessingError, Result};
use crate::timeseries::{Orientation, Timeseries, Units};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Which optional header blocks [`write_bbp`] emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BbpWriteOptions {
    /// Station, location, units, padding and orientation block
    pub long_headers: bool,
    /// One `# <entry>` line per history entry
    pub write_history: bool,
}

/// Value after the first `=` of a header line
fn header_value(line: &str) -> &str {
    line.split_once('=').map_or("", |(_, value)| value.trim())
}

/// Units from the `time(sec)` column header, e.g. `0.0(cm/s/s)`
fn parse_units_token(line: &str) -> Result<Units> {
    let token = line.split_whitespace().nth(2).unwrap_or("");
    let units = token
        .find('(')
        .zip(token.find(')'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &token[start + 1..end])
        .ok_or_else(|| {
            ProcessingError::InvalidArgument(format!("cannot parse units in BBP header '{}'", line.trim()))
        })?;
    units.parse()
}

/// Strip an in-line `#` or `%` comment
fn strip_comment(line: &str) -> &str {
    let end = line.find(|c: char| c == '#' || c == '%').unwrap_or(line.len());
    &line[..end]
}

#[derive(Default)]
struct Header {
    units: Option<Units>,
    orientation: Option<Orientation>,
    station: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    padding: Option<usize>,
}

impl Header {
    fn parse_line(&mut self, line: &str) -> Result<()> {
        if self.units.is_none() && line.contains("time(sec)") {
            self.units = Some(parse_units_token(line)?);
        } else if self.orientation.is_none() && line.contains("orientation=") {
            self.orientation = Some(header_value(line).parse()?);
        } else if line.contains("Station=") {
            self.station = Some(header_value(line).to_string());
        } else if line.contains("lat=") {
            self.latitude = header_value(line).parse().ok();
        } else if line.contains("lon=") {
            self.longitude = header_value(line).parse().ok();
        } else if line.contains("padding=") {
            self.padding = header_value(line).parse().ok();
        }
        Ok(())
    }
}

/// Read a BBP record
///
/// Units are required in the `time(sec)` header. Orientation, station,
/// location and padding are picked up when their headers are present.
pub fn read_bbp<R: BufRead>(reader: R) -> Result<Timeseries> {
    let mut header = Header::default();
    let mut columns: [Vec<f64>; 4] = Default::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.starts_with('#') || trimmed.starts_with('%') {
            header.parse_line(trimmed)?;
            continue;
        }

        let data = strip_comment(trimmed);
        if data.trim().is_empty() {
            continue;
        }
        let values = data
            .split_whitespace()
            .map(|piece| {
                piece.parse::<f64>().map_err(|_| ProcessingError::Parse {
                    line: index + 1,
                    message: format!("invalid number '{}'", piece),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if values.len() < 4 {
            return Err(ProcessingError::Parse {
                line: index + 1,
                message: format!("expected 4 columns, found {}", values.len()),
            });
        }
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }

    let units = header
        .units
        .ok_or_else(|| ProcessingError::InvalidArgument("cannot find units in BBP header".into()))?;
    let [time, h1, h2, v] = columns;
    let mut timeseries = Timeseries::new(time, h1, h2, v, units)?;

    if let Some(orientation) = header.orientation {
        timeseries = timeseries.with_orientation(orientation);
    }
    if let Some(station) = header.station {
        timeseries = timeseries.with_station(station);
    }
    if let (Some(latitude), Some(longitude)) = (header.latitude, header.longitude) {
        timeseries = timeseries.with_location(latitude, longitude);
    }
    if let Some(padding) = header.padding {
        timeseries.set_padding(padding);
    }
    Ok(timeseries)
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| String::from("None"), |v| format!("{:?}", v))
}

/// Write a record as BBP text
pub fn write_bbp<W: Write>(timeseries: &Timeseries, mut writer: W, options: BbpWriteOptions) -> Result<()> {
    timeseries.ensure_aligned("write")?;
    if options.write_history {
        for entry in timeseries.history() {
            writeln!(writer, "# {}", entry)?;
        }
    }

    let orientation = timeseries.orientation();
    let units = timeseries.units();
    if options.long_headers {
        writeln!(writer, "#     Station= {}", timeseries.station_name())?;
        writeln!(writer, "#         lon= {}", optional(timeseries.longitude()))?;
        writeln!(writer, "#         lat= {}", optional(timeseries.latitude()))?;
        writeln!(writer, "#       units= {}", units)?;
        writeln!(writer, "#     padding= {}", timeseries.padding())?;
        writeln!(writer, "# orientation= {}", orientation)?;
        writeln!(writer, "#")?;
        writeln!(writer, "# Data fields are TAB-separated")?;
        writeln!(writer, "# Column 1: Time (s)")?;
        writeln!(writer, "# Column 2: H1 component (+ is {:?})", orientation.h1_azimuth)?;
        writeln!(writer, "# Column 3: H2 component (+ is {:?})", orientation.h2_azimuth)?;
        writeln!(writer, "# Column 4: V component (+ is {})", orientation.vertical)?;
        writeln!(writer, "#")?;
    }
    writeln!(
        writer,
        "#    time(sec)      {:?}({u})      {:?}({u})      {}({u})",
        orientation.h1_azimuth,
        orientation.h2_azimuth,
        orientation.vertical,
        u = units
    )?;

    let rows = timeseries
        .time()
        .iter()
        .zip(timeseries.h1())
        .zip(timeseries.h2())
        .zip(timeseries.v());
    for (((t, h1), h2), v) in rows {
        writeln!(
            writer,
            "{} {} {} {}",
            format_scientific(*t, 9),
            format_scientific(*h1, 9),
            format_scientific(*h2, 9),
            format_scientific(*v, 9)
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a BBP file, recording the load in the history
pub fn load_bbp(path: impl AsRef<Path>) -> Result<Timeseries> {
    let path = path.as_ref();
    let mut timeseries = read_bbp(BufReader::new(File::open(path)?))?;
    timeseries.record(format!("Loaded BBP file: {}", path.display()));
    Ok(timeseries)
}

/// Write a record to a BBP file
pub fn save_bbp(timeseries: &Timeseries, path: impl AsRef<Path>, options: BbpWriteOptions) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_bbp(timeseries, BufWriter::new(file), options)
}
