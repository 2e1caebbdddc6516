//! Supabase REST calls needed to remove a member's account.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::SupabaseConfig;

pub const PROFILE_PICTURES_BUCKET: &str = "profile-pictures";

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("supabase not configured")]
    NotConfigured,
    #[error("supabase returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("supabase request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageObject {
    pub name: String,
}

#[derive(Serialize)]
struct RemoveObjects<'a> {
    prefixes: &'a [String],
}

struct Keys {
    url: String,
    anon_key: String,
    service_role_key: String,
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    keys: Option<std::sync::Arc<Keys>>,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Self {
        let keys = match (&config.url, &config.anon_key, &config.service_role_key) {
            (Some(url), Some(anon), Some(service)) => Some(std::sync::Arc::new(Keys {
                url: url.trim_end_matches('/').to_string(),
                anon_key: anon.clone(),
                service_role_key: service.clone(),
            })),
            _ => None,
        };
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });
        Self { http, keys }
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    fn keys(&self) -> Result<&Keys, SupabaseError> {
        self.keys.as_deref().ok_or(SupabaseError::NotConfigured)
    }

    fn as_service(&self, builder: RequestBuilder, keys: &Keys) -> RequestBuilder {
        builder
            .header("apikey", &keys.service_role_key)
            .bearer_auth(&keys.service_role_key)
    }

    /// Resolves the member behind a user access token.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let keys = self.keys()?;
        let resp = self
            .http
            .get(format!("{}/auth/v1/user", keys.url))
            .header("apikey", &keys.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<StorageObject>, SupabaseError> {
        let keys = self.keys()?;
        let req = self
            .http
            .post(format!("{}/storage/v1/object/list/{}", keys.url, bucket))
            .json(&json!({ "prefix": prefix, "limit": 100, "offset": 0 }));
        let resp = self.as_service(req, keys).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn remove_objects(&self, bucket: &str, paths: &[String]) -> Result<(), SupabaseError> {
        let keys = self.keys()?;
        let req = self
            .http
            .delete(format!("{}/storage/v1/object/{}", keys.url, bucket))
            .json(&RemoveObjects { prefixes: paths });
        check(self.as_service(req, keys).send().await?).await?;
        Ok(())
    }

    /// Deletes the `users` row; attendance rows cascade.
    pub async fn delete_profile(&self, user_id: &str) -> Result<(), SupabaseError> {
        let keys = self.keys()?;
        let req = self
            .http
            .delete(format!("{}/rest/v1/users", keys.url))
            .query(&[("id", format!("eq.{user_id}"))]);
        check(self.as_service(req, keys).send().await?).await?;
        Ok(())
    }

    pub async fn delete_auth_user(&self, user_id: &str) -> Result<(), SupabaseError> {
        let keys = self.keys()?;
        let req = self
            .http
            .delete(format!("{}/auth/v1/admin/users/{}", keys.url, user_id));
        check(self.as_service(req, keys).send().await?).await?;
        Ok(())
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SupabaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SupabaseError::Status { status, body })
}
