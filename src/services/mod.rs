pub mod api;
pub mod availability;
pub mod booking;
pub mod calendar;
pub mod lifecycle;
pub mod reactions;
pub mod scheduling;
pub mod slots;
