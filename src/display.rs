//! Conversion between calendar dates and index timestamps and the text layout of records.
//!
//! All dates are interpreted in the local time zone of the process.
use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::record::{Record, Timestamp};

static ROW_DATE_FORMAT: &'static str = "%d-%b-%Y";
static FOUND_DATE_FORMAT: &'static str = "%a %b %d %H:%M:%S %Y";
static TRACE_DATE_FORMAT: &'static str = "%a %b %e %H:%M:%S %Y";
static QUERY_DATE_FORMAT: &'static str = "%m/%d/%Y";

/// Timestamp of local midnight at the start of `date`.
///
/// Returns `None` if midnight does not exist on that day (a daylight saving gap). If midnight
/// occurs twice, the earlier instant is used.
pub fn local_midnight(date: NaiveDate) -> Option<Timestamp> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Local.from_local_datetime(&midnight)
        .earliest()
        .map(|datetime| datetime.timestamp())
}

/// Parses a query date in `mm/dd/yyyy` notation.
pub fn parse_query_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), QUERY_DATE_FORMAT).ok()
}

fn to_local(timestamp: Timestamp) -> Option<DateTime<Local>> {
    Local.timestamp_opt(timestamp, 0).single()
}

fn format_timestamp(timestamp: Timestamp, format: &str) -> String {
    match to_local(timestamp) {
        Some(datetime) => datetime.format(format).to_string(),
        None => format!("<timestamp {}>", timestamp),
    }
}

/// Temperature and humidity of a record.
///
/// Each value is shown with one decimal followed by its raw value in hex.
fn format_values(record: &Record) -> String {
    format!("{:.1}F({:08X}) {:.1}%({:08X})",
            f64::from(record.temperature), record.temperature,
            f64::from(record.humidity), record.humidity)
}

/// Formats a record as a row of the temperature/humidity table.
pub fn format_row(record: &Record) -> String {
    format!("{}     {}", format_timestamp(record.timestamp, ROW_DATE_FORMAT), format_values(record))
}

/// Full date of a record found by a query.
pub fn format_found_date(timestamp: Timestamp) -> String {
    format_timestamp(timestamp, FOUND_DATE_FORMAT)
}

/// A record found by a query, with its full date.
pub fn format_found(record: &Record) -> String {
    format!("{}     {}", format_found_date(record.timestamp), format_values(record))
}

/// Line printed for every node visited during a traced query.
pub fn format_trace(record: &Record) -> String {
    format!("-> [{}] {}", record.timestamp, format_timestamp(record.timestamp, TRACE_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn query_date_parsing() {
        assert_eq!(parse_query_date("03/05/2023"), Some(date(2023, 3, 5)));
        assert_eq!(parse_query_date(" 12/31/2023 "), Some(date(2023, 12, 31)));
        assert_eq!(parse_query_date("2023-03-05"), None);
        assert_eq!(parse_query_date("13/01/2023"), None);
        assert_eq!(parse_query_date("02/30/2023"), None);
        assert_eq!(parse_query_date(""), None);
    }

    #[test]
    fn consecutive_midnights_are_ordered() {
        let first = local_midnight(date(2023, 6, 1)).unwrap();
        let second = local_midnight(date(2023, 6, 2)).unwrap();
        assert_eq!(second - first, 86_400);
    }

    #[test]
    fn row_layout() {
        let timestamp = local_midnight(date(2023, 3, 5)).unwrap();
        let row = format_row(&Record::new(timestamp, 50, 70));
        assert_eq!(row, "05-Mar-2023     50.0F(00000032) 70.0%(00000046)");
    }

    #[test]
    fn found_and_trace_layout() {
        let timestamp = local_midnight(date(2023, 3, 5)).unwrap();
        assert_eq!(format_found_date(timestamp), "Sun Mar 05 00:00:00 2023");
        assert_eq!(format_found(&Record::new(timestamp, 255, 16)),
                   "Sun Mar 05 00:00:00 2023     255.0F(000000FF) 16.0%(00000010)");
        assert_eq!(format_trace(&Record::new(timestamp, 1, 2)),
                   format!("-> [{}] Sun Mar  5 00:00:00 2023", timestamp));
    }
}
