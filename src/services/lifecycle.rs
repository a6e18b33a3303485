use chrono::NaiveDate;

use crate::errors::ScheduleError;
use crate::models::{Booking, BookingStatus, RescheduleRequest, TimeSlot, Weekday};
use crate::services::booking;

pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    match (from, to) {
        (BookingStatus::Pending, _) => true,
        (BookingStatus::Completed | BookingStatus::Cancelled, _) => false,
    }
}

pub fn ensure_transition(booking: &Booking, to: BookingStatus) -> Result<(), ScheduleError> {
    if can_transition(booking.status, to) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidStateTransition {
            from: booking.status,
            to,
        })
    }
}

pub fn cancel(booking: &mut Booking) -> Result<(), ScheduleError> {
    ensure_transition(booking, BookingStatus::Cancelled)?;
    booking.status = BookingStatus::Cancelled;
    Ok(())
}

pub fn complete(booking: &mut Booking) -> Result<(), ScheduleError> {
    ensure_transition(booking, BookingStatus::Completed)?;
    booking.status = BookingStatus::Completed;
    Ok(())
}

pub fn plan_reschedule(
    booking: &Booking,
    new_weekday: Weekday,
    new_slot: &TimeSlot,
    today: NaiveDate,
) -> Result<RescheduleRequest, ScheduleError> {
    ensure_transition(booking, BookingStatus::Pending)?;
    booking::reschedule_booking(booking, new_weekday, new_slot, today)
}

pub fn apply_reschedule(
    booking: &mut Booking,
    request: &RescheduleRequest,
) -> Result<(), ScheduleError> {
    ensure_transition(booking, BookingStatus::Pending)?;
    booking.weekday = request.new_weekday;
    booking.date = request.new_date;
    booking.slot = TimeSlot {
        id: request.slot_id.clone(),
        start: request.new_start,
        end: request.new_end,
        is_booked: None,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingKind, TimeOfDay};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(TimeOfDay::parse(start).unwrap(), TimeOfDay::parse(end).unwrap())
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: "b1".to_string(),
            provider_id: "g1".to_string(),
            customer_id: "c1".to_string(),
            weekday: Weekday::Sunday,
            date: date("2025-06-22"),
            slot: slot("18:00", "19:00"),
            status,
            kind: BookingKind::Checkup,
            notes: None,
        }
    }

    #[test]
    fn test_pending_can_cancel_and_complete() {
        let mut b = booking(BookingStatus::Pending);
        cancel(&mut b).unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);

        let mut b = booking(BookingStatus::Pending);
        complete(&mut b).unwrap();
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
            let mut b = booking(status);
            assert_eq!(
                cancel(&mut b),
                Err(ScheduleError::InvalidStateTransition {
                    from: status,
                    to: BookingStatus::Cancelled,
                })
            );
            assert!(complete(&mut b).is_err());
            assert!(matches!(
                plan_reschedule(&b, Weekday::Monday, &slot("09:00", "10:00"), date("2025-06-16")),
                Err(ScheduleError::InvalidStateTransition { .. })
            ));
            assert_eq!(b.status, status);
        }
    }

    #[test]
    fn test_reschedule_keeps_pending() {
        let mut b = booking(BookingStatus::Pending);
        let request =
            plan_reschedule(&b, Weekday::Monday, &slot("09:00", "10:00"), date("2025-06-16"))
                .unwrap();
        apply_reschedule(&mut b, &request).unwrap();
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.weekday, Weekday::Monday);
        assert_eq!(b.date, date("2025-06-23"));
        assert_eq!(b.slot.start, TimeOfDay::parse("09:00").unwrap());
    }

    #[test]
    fn test_reschedule_reuses_noop_guard() {
        let b = booking(BookingStatus::Pending);
        assert_eq!(
            plan_reschedule(&b, Weekday::Sunday, &slot("18:00", "19:00"), date("2025-06-16")),
            Err(ScheduleError::NoOpReschedule)
        );
    }
}
