use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::{
    backend::DjBackend,
    errors::DjError,
    types::{
        CommandRequest, Credential, FeedbackKind, FeedbackRequest, LoginResponse,
        RecommendationsResponse, Track,
    },
};

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }
}

/// Splits a backend answer into tracks, an invalid credential or an error.
async fn recommendations_from(response: Response) -> Result<Vec<Track>, DjError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(DjError::AuthInvalid(format!("backend answered {status}")));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DjError::Recommendation {
            status: status.as_u16(),
            body,
        });
    }

    let json = response.json::<RecommendationsResponse>().await?;
    Ok(json.recommendations)
}

#[async_trait]
impl DjBackend for BackendClient {
    async fn recommendations(&self, credential: &Credential) -> Result<Vec<Track>, DjError> {
        let response = self
            .client
            .get(self.url("/recommendations"))
            .query(&[
                ("access_token", credential.access_token()),
                ("user_id", credential.user_id()),
            ])
            .send()
            .await?;

        recommendations_from(response).await
    }

    async fn feedback(
        &self,
        user_id: &str,
        track_id: &str,
        kind: FeedbackKind,
    ) -> Result<(), DjError> {
        let body = FeedbackRequest {
            user_id: user_id.to_string(),
            track_id: track_id.to_string(),
            feedback: kind,
        };

        // the answer carries nothing we act on
        self.client
            .post(self.url("/feedback"))
            .json(&body)
            .send()
            .await?;
        Ok(())
    }

    async fn command(
        &self,
        credential: &Credential,
        message: &str,
    ) -> Result<Vec<Track>, DjError> {
        let body = CommandRequest {
            user_id: credential.user_id().to_string(),
            message: message.to_string(),
            access_token: credential.access_token().to_string(),
        };

        let response = self
            .client
            .post(self.url("/command"))
            .json(&body)
            .send()
            .await?;

        recommendations_from(response).await
    }

    async fn login_url(&self) -> Result<String, DjError> {
        let response = self
            .client
            .get(self.url("/login"))
            .send()
            .await
            .map_err(|e| DjError::LoginFailed(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| DjError::LoginFailed(e.to_string()))?;

        let json = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| DjError::LoginFailed(e.to_string()))?;

        Ok(json.url)
    }
}
