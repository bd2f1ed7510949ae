//! CSV export for meter readings and settlement history.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::types::{EnergySettlement, SmartMeterReading};

/// Column header for reading export.
const READINGS_HEADER: &str = "timestamp,meter_id,consumption_kwh,generation_kwh,\
                               net_usage_kwh,peak_demand_kw,voltage,grid_status";

/// Column header for settlement export.
const SETTLEMENTS_HEADER: &str = "period_start,period_end,imported_kwh,exported_kwh,\
                                  net_kwh,import_rate,export_rate,net_amount,currency,status";

/// Exports meter readings to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_readings_csv(readings: &[SmartMeterReading], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_readings_csv(readings, buf)
}

/// Writes meter readings as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_readings_csv(readings: &[SmartMeterReading], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(READINGS_HEADER.split(',').map(str::trim))?;

    for r in readings {
        wtr.write_record(&[
            r.timestamp.to_rfc3339(),
            r.meter_id.clone(),
            format!("{:.2}", r.consumption_kwh),
            format!("{:.2}", r.generation_kwh),
            format!("{:.2}", r.net_usage_kwh),
            format!("{:.2}", r.peak_demand_kw),
            r.voltage.to_string(),
            r.grid_status.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports settlement history to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_settlements_csv(settlements: &[EnergySettlement], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_settlements_csv(settlements, buf)
}

/// Writes settlement history as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_settlements_csv(
    settlements: &[EnergySettlement],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(SETTLEMENTS_HEADER.split(',').map(str::trim))?;

    for s in settlements {
        wtr.write_record(&[
            s.billing_period_start.format("%Y-%m-%d").to_string(),
            s.billing_period_end.format("%Y-%m-%d").to_string(),
            format!("{:.0}", s.energy_imported_kwh),
            format!("{:.0}", s.energy_exported_kwh),
            format!("{:.0}", s.net_energy_kwh),
            format!("{:.2}", s.import_rate),
            format!("{:.2}", s.export_rate),
            format!("{:.2}", s.net_amount),
            s.currency.clone(),
            s.status.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::{SeedableRng, rngs::StdRng};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample_readings() -> Vec<crate::types::SmartMeterReading> {
        let mut rng = StdRng::seed_from_u64(42);
        synth::meters::meter_readings(&mut rng, now(), "m1", 1)
    }

    fn sample_settlements() -> Vec<crate::types::EnergySettlement> {
        let mut rng = StdRng::seed_from_u64(42);
        synth::grid::settlements(&mut rng, now(), "c1", 6)
    }

    #[test]
    fn readings_header_and_row_count() {
        let readings = sample_readings();
        let mut buf = Vec::new();
        write_readings_csv(&readings, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), 25); // header + 24 hourly rows
        assert!(lines[0].starts_with("timestamp,meter_id,consumption_kwh"));
    }

    #[test]
    fn settlements_header_and_row_count() {
        let settlements = sample_settlements();
        let mut buf = Vec::new();
        write_settlements_csv(&settlements, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), 7); // header + 6 periods
        assert!(lines[0].starts_with("period_start,period_end"));
    }

    #[test]
    fn deterministic_output() {
        let readings = sample_readings();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_readings_csv(&readings, &mut buf1).ok();
        write_readings_csv(&readings, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn readings_round_trip_parseable() {
        let readings = sample_readings();
        let mut buf = Vec::new();
        write_readings_csv(&readings, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(8));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            // Numeric columns parse back as f64.
            for i in 2..6 {
                let val: Result<f64, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            let voltage: Result<u32, _> = rec[6].parse();
            assert!(voltage.is_ok(), "voltage column should parse as u32");
            row_count += 1;
        }
        assert_eq!(row_count, 24);
    }

    #[test]
    fn settlement_rows_carry_sign_of_net_amount() {
        let settlements = sample_settlements();
        let mut buf = Vec::new();
        write_settlements_csv(&settlements, &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();

        for (line, s) in output.lines().skip(1).zip(settlements.iter()) {
            let negative_in_csv = line.split(',').nth(7).is_some_and(|v| v.starts_with('-'));
            assert_eq!(negative_in_csv, s.net_amount < 0.0);
        }
    }
}
