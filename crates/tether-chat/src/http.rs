//! HTTP client for the hosted chat backend's server-side REST API.
//!
//! Authenticated with a server-scoped token signed by the API secret. Every
//! request carries an explicit timeout; the only retry in the system lives
//! in the resolver's conflict path, not here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::backend::{ChannelState, ChatBackend, ChatConnector, ChatUser, MESSAGING};
use crate::error::ChatError;
use crate::token::TokenIssuer;

pub struct HttpChatBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    server_token: String,
}

impl HttpChatBackend {
    pub fn new(
        base_url: impl Into<String>,
        issuer: &TokenIssuer,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let server_token = issuer.server_token()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: issuer.api_key().to_string(),
            server_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.server_token)
            .header("x-api-key", &self.api_key)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            404 => ChatError::NotFound,
            409 => ChatError::Conflict,
            401 | 403 => ChatError::Unauthorized(message),
            429 => ChatError::RateLimited,
            code => ChatError::Api { status: code, message },
        })
    }
}

fn transport(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout
    } else {
        ChatError::Transport(err)
    }
}

#[derive(Debug, Serialize)]
struct CreateChannelBody<'a> {
    members: &'a [String],
    created_by_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChannelEnvelope {
    channel: ChannelState,
}

#[derive(Debug, Deserialize)]
struct ChannelsPage {
    channels: Vec<ChannelState>,
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn get_channel(&self, channel_id: &str) -> Result<ChannelState, ChatError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("v1/channels/{MESSAGING}/{channel_id}"),
            )
            .send()
            .await
            .map_err(transport)?;
        let envelope: ChannelEnvelope = self.check(response).await?.json().await.map_err(transport)?;
        Ok(envelope.channel)
    }

    async fn create_channel(
        &self,
        channel_id: &str,
        members: &[String],
        created_by: &str,
    ) -> Result<ChannelState, ChatError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("v1/channels/{MESSAGING}/{channel_id}"),
            )
            .json(&CreateChannelBody {
                members,
                created_by_id: created_by,
            })
            .send()
            .await
            .map_err(transport)?;
        let envelope: ChannelEnvelope = self.check(response).await?.json().await.map_err(transport)?;
        Ok(envelope.channel)
    }

    async fn query_channels(
        &self,
        member_id: &str,
        limit: u32,
    ) -> Result<Vec<ChannelState>, ChatError> {
        let limit = limit.to_string();
        let response = self
            .request(reqwest::Method::GET, "v1/channels")
            .query(&[
                ("type", MESSAGING),
                ("member", member_id),
                ("sort", "last_message_at:desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let page: ChannelsPage = self.check(response).await?.json().await.map_err(transport)?;
        Ok(page.channels)
    }

    async fn upsert_user(&self, user: &ChatUser) -> Result<(), ChatError> {
        let response = self
            .request(reqwest::Method::POST, "v1/users")
            .json(&json!({ "users": [user] }))
            .send()
            .await
            .map_err(transport)?;
        self.check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatConnector for HttpChatBackend {
    async fn connect(&self, user: &ChatUser, token: &str) -> Result<(), ChatError> {
        let response = self
            .request(reqwest::Method::POST, "v1/connect")
            .json(&json!({ "user": user, "token": token }))
            .send()
            .await
            .map_err(transport)?;
        self.check(response).await?;
        Ok(())
    }

    async fn disconnect(&self, user_id: &str) -> Result<(), ChatError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("v1/connect/{user_id}"))
            .send()
            .await
            .map_err(transport)?;
        self.check(response).await?;
        Ok(())
    }
}
