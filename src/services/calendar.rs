use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::errors::ScheduleError;
use crate::models::{Booking, BookingStatus, TimeOfDay, Weekday};

pub fn to_minutes(hhmm: &str) -> Result<u16, ScheduleError> {
    TimeOfDay::parse(hhmm).map(TimeOfDay::minutes)
}

pub fn to_hhmm(minutes: u16) -> Result<String, ScheduleError> {
    TimeOfDay::from_minutes(minutes).map(TimeOfDay::hhmm)
}

pub fn custom_weekday_of(date: NaiveDate) -> Weekday {
    Weekday::from_chrono(date.weekday())
}

/// Next date strictly after `from` that falls on `weekday`.
///
/// A weekday equal to `from`'s own resolves a full week ahead: same-day
/// bookings are never offered.
pub fn next_occurrence(weekday: Weekday, from: NaiveDate) -> NaiveDate {
    let today = custom_weekday_of(from).index() as i64;
    let target = weekday.index() as i64;
    let ahead = match (target - today).rem_euclid(7) {
        0 => 7,
        n => n,
    };
    from + Duration::days(ahead)
}

pub fn next_occurrence_from_today(weekday: Weekday) -> NaiveDate {
    next_occurrence(weekday, Local::now().date_naive())
}

pub fn generate_ics(booking: &Booking, provider_name: &str, stamp: NaiveDateTime) -> String {
    let dtstart = booking
        .date
        .and_time(booking.slot.start.to_naive_time())
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtend = booking
        .date
        .and_time(booking.slot.end.to_naive_time())
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = stamp.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@bookwell", booking.id);

    let summary = format!("Appointment with {provider_name}");
    let description = booking
        .notes
        .as_deref()
        .unwrap_or("No additional notes");

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Bookwell//Booking Client//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         STATUS:{}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n",
        ics_status(booking)
    )
}

fn ics_status(booking: &Booking) -> &'static str {
    match booking.status {
        BookingStatus::Cancelled => "CANCELLED",
        _ => "CONFIRMED",
    }
}
