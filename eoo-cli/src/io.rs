//! Tab-separated locality input and result output.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;

use eoo_core::{Category, EooResults, OccurrenceRecord, Zones};

/// Input column names.
#[derive(Debug, Clone)]
pub struct Columns {
    pub longitude: String,
    pub latitude: String,
    pub status: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            longitude: "DDE".to_string(),
            latitude: "DDS".to_string(),
            status: "LocStatus".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Tsv,
    Json,
}

pub fn load_records(path: &Path, columns: &Columns) -> Result<Vec<OccurrenceRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open locations file: {:?}", path))?;
    let records =
        read_records(file, columns).with_context(|| format!("Failed to read locations file: {:?}", path))?;
    debug!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Reads a tab-separated file with a header row.
///
/// Header names and coordinates are trimmed; status values are kept verbatim, so `" Extant"` is not extant.
pub fn read_records<R: Read>(reader: R, columns: &Columns) -> Result<Vec<OccurrenceRecord>> {
    let mut rdr = ReaderBuilder::new().delimiter(b'\t').flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let index = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| anyhow!("Column '{}' not found in header", name))
    };
    let lon_idx = index(&columns.longitude)?;
    let lat_idx = index(&columns.latitude)?;
    let status_idx = index(&columns.status)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let coord = |idx: usize, name: &str| -> Result<f64> {
            let field = row.get(idx).ok_or_else(|| anyhow!("line {}: missing '{}'", line, name))?.trim();
            let value = field
                .parse::<f64>()
                .with_context(|| format!("line {}: invalid '{}' value {:?}", line, name, field))?;
            if !value.is_finite() {
                return Err(anyhow!("line {}: non-finite '{}' value {:?}", line, name, field));
            }
            Ok(value)
        };
        let longitude = coord(lon_idx, &columns.longitude)?;
        let latitude = coord(lat_idx, &columns.latitude)?;
        let status = row.get(status_idx).unwrap_or("");
        records.push(OccurrenceRecord::new(longitude, latitude, status));
    }
    Ok(records)
}

pub fn load_zones(path: &Path) -> Result<Zones> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read zones file: {:?}", path))?;
    Zones::from_json(&json).with_context(|| format!("Failed to parse zones file: {:?}", path))
}

/// Header row then one row of areas, undefined areas as empty fields.
pub fn write_tsv<W: Write>(writer: W, results: &EooResults) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    wtr.write_record(Category::ALL.map(|c| c.header()))?;
    wtr.write_record(results.to_array().map(|r| r.to_string()))?;
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, results: &EooResults) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    Ok(())
}

fn write_results(w: &mut dyn Write, results: &EooResults, format: Format) -> Result<()> {
    match format {
        Format::Tsv => write_tsv(w, results),
        Format::Json => write_json(w, results),
    }
}

/// Writes `results` to `path`, or to stdout if `path` is `-`.
pub fn save(path: &Path, results: &EooResults, format: Format) -> Result<()> {
    if path == Path::new("-") {
        let mut out = io::stdout().lock();
        write_results(&mut out, results, format)
    } else {
        let mut file = File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
        write_results(&mut file, results, format)
            .with_context(|| format!("Error writing to output file: {:?}", path))
    }
}
