//! CSV rows to renderer points.
//!
//! Rows look like `ignored,X,Y[,...]`. There is no header line. Column 1 becomes `x`,
//! column 2 is inverted against the canvas height to become `y`.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use crate::foundation::{
    core::Point,
    error::{PlaceheatError, PlaceheatResult},
};

pub const X_COLUMN: usize = 1;
pub const Y_COLUMN: usize = 2;

/// Read every record from `reader` and convert it to a [`Point`].
///
/// Any malformed record aborts the whole parse; no partial sequence is returned.
#[tracing::instrument(skip(reader))]
pub fn parse_points<R: Read>(reader: R) -> PlaceheatResult<Vec<Point>> {
    let mut rdr = ReaderBuilder::new().has_headers(false).from_reader(reader);

    let mut points = Vec::new();
    let mut record = ByteRecord::new();
    loop {
        match rdr.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => return Err(reader_error(&err, &record, rdr.position().line())),
        }
        let line = record.position().map_or(0, |p| p.line());
        points.push(parse_point(&record, line)?);
    }

    tracing::info!(points = points.len(), "parsed CSV data");
    Ok(points)
}

/// Convert a single record, reporting `line` in any error.
pub fn parse_point(record: &ByteRecord, line: u64) -> PlaceheatResult<Point> {
    let x = parse_coord(record, X_COLUMN, "x", line)?;
    let y = parse_coord(record, Y_COLUMN, "y", line)?;
    Ok(Point::from_data(x, y))
}

fn parse_coord(
    record: &ByteRecord,
    column: usize,
    field: &'static str,
    line: u64,
) -> PlaceheatResult<i64> {
    let fail = |reason: String| PlaceheatError::parse(line, field, raw_record(record), reason);

    let raw = record
        .get(column)
        .ok_or_else(|| fail(format!("missing column {column}")))?;
    let text = std::str::from_utf8(raw).map_err(|e| fail(format!("invalid UTF-8: {e}")))?;
    text.parse::<i64>()
        .map_err(|e| fail(format!("{text:?} is not a base-10 integer: {e}")))
}

/// I/O errors carry no position, so `fallback` is the reader's line when the stream broke.
fn reader_error(err: &csv::Error, record: &ByteRecord, fallback: u64) -> PlaceheatError {
    let line = err.position().map_or(fallback, |p| p.line());
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("record has {len} fields, previous records have {expected_len}"),
        _ => err.to_string(),
    };
    PlaceheatError::parse(line, "record", raw_record(record), reason)
}

fn raw_record(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}
