//! iCalendar export of logged shifts.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::models::{DateRange, ShiftRecord};

use super::ExportFile;
use super::currency::{format_hours, format_yen};

const CRLF: &str = "\r\n";

/// Product identifier written to the calendar header.
pub const PRODID: &str = "-//ShiftPay Calculator//Calendar Export//EN";

/// Builds an `.ics` file with one event per record in the given month.
///
/// Records outside the month are skipped. Lines end with CRLF. A shift that
/// crosses midnight ends on the following date.
///
/// Returns `None` for an invalid month.
///
/// # Example
///
/// ```
/// use shift_pay::export::calendar_export;
///
/// let file = calendar_export(&[], 2025, 1).unwrap();
/// assert_eq!(file.filename, "shiftpay-calendar-January-2025.ics");
/// assert!(file.content.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
/// assert!(file.content.ends_with("END:VCALENDAR\r\n"));
/// ```
pub fn calendar_export(records: &[ShiftRecord], year: i32, month: u32) -> Option<ExportFile> {
    let range = DateRange::month(year, month)?;

    let mut content = String::new();
    push_line(&mut content, "BEGIN:VCALENDAR");
    push_line(&mut content, "VERSION:2.0");
    push_line(&mut content, &format!("PRODID:{}", PRODID));

    for record in records.iter().filter(|r| range.contains_date(r.work_date)) {
        push_event(&mut content, record);
    }

    push_line(&mut content, "END:VCALENDAR");

    Some(ExportFile {
        filename: format!(
            "shiftpay-calendar-{}.ics",
            range.start_date.format("%B-%Y")
        ),
        content,
    })
}

fn push_event(content: &mut String, record: &ShiftRecord) {
    let end_date = if record.crosses_midnight() {
        record
            .work_date
            .checked_add_days(Days::new(1))
            .unwrap_or(record.work_date)
    } else {
        record.work_date
    };

    push_line(content, "BEGIN:VEVENT");
    push_line(
        content,
        &format!("DTSTART:{}", timestamp(record.work_date, record.start_time)),
    );
    push_line(content, &format!("DTEND:{}", timestamp(end_date, record.end_time)));
    push_line(content, &format!("SUMMARY:{} Shift", record.shift_type));
    // The \n is a literal backslash-n, the iCalendar text escape for a newline.
    push_line(
        content,
        &format!(
            "DESCRIPTION:Pay: {}\\nHours: {}h",
            format_yen(record.total_pay()),
            format_hours(record.net_hours())
        ),
    );
    push_line(content, "END:VEVENT");
}

fn timestamp(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}T{}00", date.format("%Y%m%d"), time.format("%H%M"))
}

fn push_line(content: &mut String, line: &str) {
    content.push_str(line);
    content.push_str(CRLF);
}
