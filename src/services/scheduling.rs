use chrono::NaiveDate;

use crate::errors::{ApiError, AppError};
use crate::models::{AvailabilityRuleSet, Booking, BookingStatus, ProviderRef, TimeSlot, Weekday};
use crate::services::availability::AvailabilityDraft;
use crate::services::booking::{self, BookingDraft};
use crate::services::lifecycle;
use crate::state::AppState;

pub async fn load_availability(
    state: &AppState,
    provider: &ProviderRef,
) -> Result<AvailabilityRuleSet, AppError> {
    let rule_set = state.api.provider_availability(provider).await?;
    tracing::debug!(
        provider = %provider,
        weekdays = rule_set.weekday_rules.len(),
        "loaded availability"
    );
    Ok(rule_set)
}

pub async fn publish_availability(
    state: &AppState,
    provider: &ProviderRef,
    draft: &AvailabilityDraft,
) -> Result<AvailabilityRuleSet, AppError> {
    let rule_set = draft.publish().inspect_err(|e| {
        tracing::info!(provider = %provider, error = %e, "availability not published");
    })?;

    state.api.replace_availability(provider, &rule_set).await?;
    tracing::info!(
        provider = %provider,
        availability = %rule_set.to_human_readable(),
        "availability published"
    );
    Ok(rule_set)
}

pub async fn book(
    state: &AppState,
    rule_set: &AvailabilityRuleSet,
    draft: &BookingDraft,
    today: NaiveDate,
) -> Result<Booking, AppError> {
    let request = booking::create_booking_request(rule_set, draft, today)?;

    match state.api.create_booking(&request).await {
        Ok(created) => {
            tracing::info!(
                booking_id = %created.id,
                provider = %request.provider,
                customer = %request.customer_id,
                date = %request.date,
                start = %request.start,
                "booking created"
            );
            Ok(created)
        }
        Err(ApiError::SlotAlreadyBooked) => {
            tracing::warn!(
                provider = %request.provider,
                slot_id = %request.slot_id,
                date = %request.date,
                "slot was taken before the booking reached the server"
            );
            Err(ApiError::SlotAlreadyBooked.into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn reschedule(
    state: &AppState,
    booking: &mut Booking,
    new_weekday: Weekday,
    new_slot: &TimeSlot,
    today: NaiveDate,
) -> Result<(), AppError> {
    let request = lifecycle::plan_reschedule(booking, new_weekday, new_slot, today)?;
    let updated = state.api.reschedule_booking(&booking.id, &request).await?;

    tracing::info!(
        booking_id = %booking.id,
        from = %booking.date,
        to = %request.new_date,
        "booking rescheduled"
    );
    *booking = updated;
    Ok(())
}

pub async fn cancel(state: &AppState, booking: &mut Booking) -> Result<(), AppError> {
    lifecycle::ensure_transition(booking, BookingStatus::Cancelled)?;
    state.api.cancel_booking(&booking.id).await?;
    lifecycle::cancel(booking)?;
    tracing::info!(booking_id = %booking.id, "booking cancelled");
    Ok(())
}
