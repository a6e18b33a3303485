pub mod http;

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{
    AvailabilityRuleSet, Booking, BookingRequest, PostPage, ProviderRef, ReactionRequest,
    RescheduleRequest,
};

#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn provider_availability(
        &self,
        provider: &ProviderRef,
    ) -> Result<AvailabilityRuleSet, ApiError>;

    async fn replace_availability(
        &self,
        provider: &ProviderRef,
        rule_set: &AvailabilityRuleSet,
    ) -> Result<(), ApiError>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError>;

    async fn reschedule_booking(
        &self,
        booking_id: &str,
        request: &RescheduleRequest,
    ) -> Result<Booking, ApiError>;

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError>;

    async fn react(&self, request: &ReactionRequest) -> Result<(), ApiError>;

    async fn fetch_posts(&self, feed: &str, page: u32) -> Result<PostPage, ApiError>;
}
