use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{TimeOfDay, TimeSlot, Weekday};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Doctor,
    Gym,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Doctor => "doctor",
            ProviderKind::Gym => "gym",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "doctor" => Some(ProviderKind::Doctor),
            "gym" => Some(ProviderKind::Gym),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderRef {
    pub kind: ProviderKind,
    pub id: String,
}

impl ProviderRef {
    pub fn doctor(id: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Doctor,
            id: id.into(),
        }
    }

    pub fn gym(id: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Gym,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for ProviderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Checkup,
    Consultation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub provider_id: String,
    pub customer_id: String,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub status: BookingStatus,
    pub kind: BookingKind,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub provider: ProviderRef,
    pub customer_id: String,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub slot_id: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub price_minor: u64,
    pub kind: BookingKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub new_weekday: Weekday,
    pub new_date: NaiveDate,
    pub new_start: TimeOfDay,
    pub new_end: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
}
