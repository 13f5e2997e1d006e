//! Rendering reservations and tables in the supported output formats.

use crate::error::CliError;
use seatbook::{OutputFormat, Reservation, Table};
use std::io::Write;

const RESERVATION_HEADERS: [&str; 8] = [
    "reservation_id",
    "first_name",
    "last_name",
    "mobile_number",
    "people",
    "reservation_date",
    "reservation_time",
    "status",
];

const TABLE_HEADERS: [&str; 4] = ["table_id", "table_name", "capacity", "reservation_id"];

fn reservation_row(r: &Reservation) -> [String; 8] {
    [
        r.id().to_string(),
        r.first_name().to_string(),
        r.last_name().to_string(),
        r.mobile_number().to_string(),
        r.people().to_string(),
        r.date().to_string(),
        r.time_label(),
        r.status().to_string(),
    ]
}

fn table_row(t: &Table) -> [String; 4] {
    [
        t.id().to_string(),
        t.name().to_string(),
        t.capacity().to_string(),
        t.occupant().map(|id| id.to_string()).unwrap_or_default(),
    ]
}

fn reservation_json(r: &Reservation) -> serde_json::Value {
    serde_json::json!({
        "reservation_id": r.id(),
        "first_name": r.first_name(),
        "last_name": r.last_name(),
        "mobile_number": r.mobile_number(),
        "people": r.people(),
        "reservation_date": r.date().to_string(),
        "reservation_time": r.time_label(),
        "status": r.status(),
        "created_at": r.created_at().to_rfc3339(),
        "updated_at": r.updated_at().to_rfc3339(),
    })
}

fn table_json(t: &Table) -> serde_json::Value {
    serde_json::json!({
        "table_id": t.id(),
        "table_name": t.name(),
        "capacity": t.capacity(),
        "reservation_id": t.occupant(),
    })
}

/// Write reservations in `format`.
pub fn write_reservations(
    out: &mut impl Write,
    format: OutputFormat,
    reservations: &[Reservation],
) -> Result<(), CliError> {
    let rows: Vec<_> = reservations.iter().map(reservation_row).collect();
    match format {
        OutputFormat::Json => {
            let values: Vec<_> = reservations.iter().map(reservation_json).collect();
            write_json(out, &values)
        }
        other => write_rows(out, other, &RESERVATION_HEADERS, &rows),
    }
}

/// Write tables in `format`.
pub fn write_tables(
    out: &mut impl Write,
    format: OutputFormat,
    tables: &[Table],
) -> Result<(), CliError> {
    let rows: Vec<_> = tables.iter().map(table_row).collect();
    match format {
        OutputFormat::Json => {
            let values: Vec<_> = tables.iter().map(table_json).collect();
            write_json(out, &values)
        }
        other => write_rows(out, other, &TABLE_HEADERS, &rows),
    }
}

fn write_json(out: &mut impl Write, values: &[serde_json::Value]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, values)?;
    writeln!(out)?;
    Ok(())
}

fn write_rows<const N: usize>(
    out: &mut impl Write,
    format: OutputFormat,
    headers: &[&str; N],
    rows: &[[String; N]],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header_line = headers
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header_line}")?;
            for row in rows {
                let cells: Vec<&str> = row
                    .iter()
                    .map(|cell| if cell.is_empty() { "-" } else { cell.as_str() })
                    .collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
            Ok(())
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            let mut writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(&mut *out);
            writer.write_record(headers)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Json => unreachable!("JSON is rendered from values"),
    }
}
