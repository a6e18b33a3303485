use chrono::NaiveDate;

use crate::errors::ScheduleError;
use crate::models::{
    AvailabilityRuleSet, Booking, BookingKind, BookingRequest, ProviderRef, RescheduleRequest,
    TimeSlot, Weekday,
};
use crate::services::calendar;
use crate::services::slots;

#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub provider: ProviderRef,
    pub customer_id: String,
    pub weekday: Option<Weekday>,
    pub slot_id: Option<String>,
    pub price_minor: u64,
    pub kind: BookingKind,
    pub evidence_images: Vec<String>,
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn new(provider: ProviderRef, customer_id: impl Into<String>, kind: BookingKind) -> Self {
        Self {
            provider,
            customer_id: customer_id.into(),
            weekday: None,
            slot_id: None,
            price_minor: 0,
            kind,
            evidence_images: Vec::new(),
            notes: None,
        }
    }
}

pub fn resolve_booking_date(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    calendar::next_occurrence(weekday, today)
}

pub fn create_booking_request(
    rule_set: &AvailabilityRuleSet,
    draft: &BookingDraft,
    today: NaiveDate,
) -> Result<BookingRequest, ScheduleError> {
    let slot_id = draft
        .slot_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ScheduleError::MissingSlotSelection)?;

    let weekday = match draft.weekday {
        Some(weekday) => weekday,
        None if !rule_set.is_empty() => return Err(ScheduleError::MissingWeekdaySelection),
        None => {
            return Err(ScheduleError::UnknownSlot {
                weekday: None,
                slot_id: slot_id.to_string(),
            })
        }
    };

    let slot = rule_set
        .rule(weekday)
        .and_then(|r| r.slot(slot_id))
        .ok_or_else(|| ScheduleError::UnknownSlot {
            weekday: Some(weekday),
            slot_id: slot_id.to_string(),
        })?;

    if draft.kind == BookingKind::Consultation && draft.evidence_images.is_empty() {
        return Err(ScheduleError::MissingEvidence);
    }

    Ok(BookingRequest {
        provider: draft.provider.clone(),
        customer_id: draft.customer_id.clone(),
        weekday,
        date: resolve_booking_date(weekday, today),
        slot_id: slot_id.to_string(),
        start: slot.start,
        end: slot.end,
        price_minor: draft.price_minor,
        kind: draft.kind,
        evidence_images: draft.evidence_images.clone(),
        notes: draft.notes.clone(),
    })
}

pub fn reschedule_booking(
    existing: &Booking,
    new_weekday: Weekday,
    new_slot: &TimeSlot,
    today: NaiveDate,
) -> Result<RescheduleRequest, ScheduleError> {
    if let Some(kind) = slots::validate_slot(std::slice::from_ref(new_slot), 0) {
        return Err(ScheduleError::Slot {
            weekday: new_weekday,
            index: 0,
            kind,
        });
    }

    let new_date = resolve_booking_date(new_weekday, today);
    if new_weekday == existing.weekday
        && new_date == existing.date
        && new_slot.same_times(&existing.slot)
    {
        return Err(ScheduleError::NoOpReschedule);
    }

    Ok(RescheduleRequest {
        new_weekday,
        new_date,
        new_start: new_slot.start,
        new_end: new_slot.end,
        slot_id: new_slot.id.clone(),
    })
}
