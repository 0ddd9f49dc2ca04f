//! Client for the application backend, which owns all application state.

use serde::{Deserialize, Serialize};
use serenity::all::{GuildId, MessageId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode application: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("applicant id {0:?} is not a snowflake")]
    InvalidApplicant(String),
}

/// A pending membership application, keyed by guild and application message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Application {
    pub applicant_id: UserId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationBody {
    applicant_id: String,
}

/// Body of the denial POST
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DenialRequest {
    pub admin_id: String,
    pub reason: String,
}
impl DenialRequest {
    pub fn new(admin_id: UserId, reason: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.get().to_string(),
            reason: reason.into(),
        }
    }
}

#[serenity::async_trait]
pub trait ApplicationApi: Send + Sync {
    /// `None` when the backend has no application for this message.
    async fn fetch_application(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> Result<Option<Application>, ApiError>;

    /// Records the denial. Succeeds whenever the request was delivered.
    async fn record_denial(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
        request: &DenialRequest,
    ) -> Result<(), ApiError>;
}

pub struct HttpApplicationApi {
    client: reqwest::Client,
    base_url: String,
}
impl HttpApplicationApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn application_url(&self, guild_id: GuildId, message_id: MessageId) -> String {
        format!(
            "{}/v1/deny/guilds/{guild_id}/application/{message_id}",
            self.base_url
        )
    }
}

#[serenity::async_trait]
impl ApplicationApi for HttpApplicationApi {
    async fn fetch_application(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> Result<Option<Application>, ApiError> {
        let url = self.application_url(guild_id, message_id);
        let request_error = |source| ApiError::Request {
            url: url.clone(),
            source,
        };

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?
            .bytes()
            .await
            .map_err(request_error)?;

        parse_application(&body)
    }

    async fn record_denial(
        &self,
        guild_id: GuildId,
        message_id: MessageId,
        request: &DenialRequest,
    ) -> Result<(), ApiError> {
        let url = self.application_url(guild_id, message_id);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                %url,
                "backend did not accept the denial"
            );
        }
        Ok(())
    }
}

fn parse_application(body: &[u8]) -> Result<Option<Application>, ApiError> {
    let Some(body) = serde_json::from_slice::<Option<ApplicationBody>>(body)? else {
        return Ok(None);
    };

    let applicant_id = body
        .applicant_id
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or(ApiError::InvalidApplicant(body.applicant_id))?;

    Ok(Some(Application {
        applicant_id: UserId::new(applicant_id),
    }))
}
