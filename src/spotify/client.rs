use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::CONTENT_LENGTH};

use crate::{
    errors::DjError,
    spotify::PlayerApi,
    types::{CurrentPlayback, Credential, Device, DevicesResponse, PlayRequest},
};

pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url)
    }

    /// Devices the user can currently send playback commands to.
    pub async fn devices(&self, credential: &Credential) -> Result<Vec<Device>, DjError> {
        let response = self
            .client
            .get(self.url("/me/player/devices"))
            .bearer_auth(credential.access_token())
            .send()
            .await?;

        let response = command_status(response).await?;
        let json = response.json::<DevicesResponse>().await?;
        Ok(json.devices)
    }

    /// Current playback, `None` when nothing is loaded on any device.
    pub async fn playback_state(
        &self,
        credential: &Credential,
    ) -> Result<Option<CurrentPlayback>, DjError> {
        let response = self
            .client
            .get(self.url("/me/player"))
            .bearer_auth(credential.access_token())
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = command_status(response).await?;
        let json = response.json::<CurrentPlayback>().await?;
        Ok(Some(json))
    }

    async fn send_command(&self, request: RequestBuilder) -> Result<(), DjError> {
        let response = request.send().await?;
        command_status(response).await?;
        Ok(())
    }
}

async fn command_status(response: Response) -> Result<Response, DjError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(DjError::AuthInvalid(format!("Spotify answered {status}")));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DjError::Playback(format!("{status}: {body}")));
    }

    Ok(response)
}

#[async_trait]
impl PlayerApi for SpotifyClient {
    async fn verify(&self, credential: &Credential) -> Result<(), DjError> {
        let response = self
            .client
            .get(self.url("/me"))
            .bearer_auth(credential.access_token())
            .send()
            .await
            .map_err(|e| DjError::AuthInvalid(format!("profile check failed: {e}")))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(DjError::AuthInvalid(format!(
                "profile check answered {status}"
            )));
        }

        Ok(())
    }

    async fn play(
        &self,
        credential: &Credential,
        device_id: &str,
        uri: &str,
    ) -> Result<(), DjError> {
        let request = self
            .client
            .put(self.url("/me/player/play"))
            .query(&[("device_id", device_id)])
            .bearer_auth(credential.access_token())
            .json(&PlayRequest {
                uris: vec![uri.to_string()],
            });

        self.send_command(request).await
    }

    async fn pause(&self, credential: &Credential, device_id: &str) -> Result<(), DjError> {
        let request = self
            .client
            .put(self.url("/me/player/pause"))
            .query(&[("device_id", device_id)])
            .bearer_auth(credential.access_token())
            .header(CONTENT_LENGTH, 0);

        self.send_command(request).await
    }

    async fn resume(&self, credential: &Credential, device_id: &str) -> Result<(), DjError> {
        let request = self
            .client
            .put(self.url("/me/player/play"))
            .query(&[("device_id", device_id)])
            .bearer_auth(credential.access_token())
            .header(CONTENT_LENGTH, 0);

        self.send_command(request).await
    }

    async fn set_volume(
        &self,
        credential: &Credential,
        device_id: &str,
        percent: u8,
    ) -> Result<(), DjError> {
        let percent = percent.min(100).to_string();
        let request = self
            .client
            .put(self.url("/me/player/volume"))
            .query(&[("volume_percent", percent.as_str()), ("device_id", device_id)])
            .bearer_auth(credential.access_token())
            .header(CONTENT_LENGTH, 0);

        self.send_command(request).await
    }
}
