use crate::models::{BookingStatus, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotErrorKind {
    InvalidInterval,
    SlotTooLong,
    Overlap,
}

impl std::fmt::Display for SlotErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotErrorKind::InvalidInterval => write!(f, "end time must be after start time"),
            SlotErrorKind::SlotTooLong => write!(f, "slot is longer than one hour"),
            SlotErrorKind::Overlap => write!(f, "slot overlaps another slot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    #[error("{weekday} slot #{index}: {kind}")]
    Slot {
        weekday: Weekday,
        index: usize,
        kind: SlotErrorKind,
    },

    #[error("{0} is already part of the availability")]
    DuplicateWeekday(Weekday),

    #[error("no weekday selected")]
    EmptyWeekdaySet,

    #[error("{0} has no time slots")]
    EmptySlotSet(Weekday),

    #[error("no time slot selected")]
    MissingSlotSelection,

    #[error("no weekday selected for the booking")]
    MissingWeekdaySelection,

    #[error("slot {slot_id} is not offered on the selected weekday")]
    UnknownSlot {
        weekday: Option<Weekday>,
        slot_id: String,
    },

    #[error("consultation bookings need at least one evidence image")]
    MissingEvidence,

    #[error("reschedule would not change the booking")]
    NoOpReschedule,

    #[error("booking cannot move from {from} to {to}")]
    InvalidStateTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("invalid availability payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("slot is already booked")]
    SlotAlreadyBooked,

    #[error("request declined ({status}): {message}")]
    Declined { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server sent unusable data: {0}")]
    InvalidPayload(ScheduleError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("api error: {0}")]
    Api(#[from] ApiError),
}
