use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::MarketplaceApi;
use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::models::{
    AvailabilityRuleSet, Booking, BookingRequest, BookingStatus, PostPage, ProviderRef,
    ReactionRequest, RescheduleRequest,
};

pub struct HttpMarketplaceApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpMarketplaceApi {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            config.api_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn availability_url(&self, provider: &ProviderRef) -> String {
        self.url(&format!("{}s/{}/availability", provider.kind.as_str(), provider.id))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let resp = self.authorize(request).send().await?;
        check_status(resp).await
    }

    async fn send_booking(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        self.send(request).await.map_err(slot_conflict)
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Declined {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

// A 409 on a booking endpoint means another customer took the slot first.
fn slot_conflict(err: ApiError) -> ApiError {
    match err {
        ApiError::Declined { status, .. } if status == StatusCode::CONFLICT.as_u16() => {
            ApiError::SlotAlreadyBooked
        }
        other => other,
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn provider_availability(
        &self,
        provider: &ProviderRef,
    ) -> Result<AvailabilityRuleSet, ApiError> {
        let resp = self
            .send(self.client.get(self.availability_url(provider)))
            .await?;
        let body = resp.text().await?;
        AvailabilityRuleSet::from_json(&body).map_err(ApiError::InvalidPayload)
    }

    async fn replace_availability(
        &self,
        provider: &ProviderRef,
        rule_set: &AvailabilityRuleSet,
    ) -> Result<(), ApiError> {
        self.send(self.client.put(self.availability_url(provider)).json(rule_set))
            .await?;
        Ok(())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        let resp = self
            .send_booking(self.client.post(self.url("bookings")).json(request))
            .await?;
        decode(resp).await
    }

    async fn reschedule_booking(
        &self,
        booking_id: &str,
        request: &RescheduleRequest,
    ) -> Result<Booking, ApiError> {
        let resp = self
            .send_booking(
                self.client
                    .put(self.url(&format!("bookings/{booking_id}")))
                    .json(request),
            )
            .await?;
        decode(resp).await
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<(), ApiError> {
        let body = json!({ "status": BookingStatus::Cancelled });
        self.send(
            self.client
                .put(self.url(&format!("bookings/{booking_id}/status")))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    async fn react(&self, request: &ReactionRequest) -> Result<(), ApiError> {
        self.send(self.client.post(self.url("reactions")).json(request))
            .await?;
        Ok(())
    }

    async fn fetch_posts(&self, feed: &str, page: u32) -> Result<PostPage, ApiError> {
        let resp = self
            .send(
                self.client
                    .get(self.url(&format!("feeds/{feed}/posts")))
                    .query(&[("page", page)]),
            )
            .await?;
        decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"slot taken"}"#), "slot taken");
        assert_eq!(error_message(r#"{"error":"forbidden"}"#), "forbidden");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_only_conflicts_become_slot_already_booked() {
        let conflict = ApiError::Declined {
            status: 409,
            message: "taken".to_string(),
        };
        assert!(matches!(slot_conflict(conflict), ApiError::SlotAlreadyBooked));

        let other = ApiError::Declined {
            status: 422,
            message: "bad date".to_string(),
        };
        assert!(matches!(
            slot_conflict(other),
            ApiError::Declined { status: 422, .. }
        ));
    }

    #[test]
    fn test_availability_url_per_provider_kind() {
        let api = HttpMarketplaceApi::new("http://api.local/v1/", None, Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            api.availability_url(&ProviderRef::doctor("42")),
            "http://api.local/v1/doctors/42/availability"
        );
        assert_eq!(
            api.availability_url(&ProviderRef::gym("7")),
            "http://api.local/v1/gyms/7/availability"
        );
    }
}
