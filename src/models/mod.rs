pub mod availability;
pub mod booking;
pub mod post;
pub mod slot;
pub mod weekday;

pub use availability::{AvailabilityRuleSet, WeekdayRule};
pub use booking::{
    Booking, BookingKind, BookingRequest, BookingStatus, ProviderKind, ProviderRef,
    RescheduleRequest,
};
pub use post::{Post, PostPage, ReactionKind, ReactionRequest, TargetType};
pub use slot::{TimeOfDay, TimeSlot, LAST_MINUTE};
pub use weekday::Weekday;
