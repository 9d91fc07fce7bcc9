//! Live marketplace REST backend.
//!
//! Entity collections map onto `/api/{entity}` resources:
//! `GET /api/{entity}`, `POST /api/{entity}`, `PUT /api/{entity}/{id}`,
//! `DELETE /api/{entity}/{id}`. All requests optionally carry a bearer
//! token.

use cardvault_core::EntityKind;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use super::{ApiError, Op};

pub(super) struct RestBackend {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl RestBackend {
    pub(super) fn new(base_url: Url, token: Option<SecretString>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn collection_url(&self, kind: EntityKind) -> Result<Url, ApiError> {
        self.base_url
            .join(&format!("api/{}", kind.api_path()))
            .map_err(|source| ApiError::InvalidUrl {
                entity: kind.name(),
                source,
            })
    }

    fn record_url(&self, kind: EntityKind, id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url(kind)?;
        // Url::join would treat the collection path as a base, so push a
        // segment instead.
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                entity: kind.name(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        kind: EntityKind,
        op: Op,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(request).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::RequestFailed {
                entity: kind.name(),
                op,
                status: response.status(),
            });
        }
        Ok(response)
    }

    #[tracing::instrument(skip(self), fields(entity = kind.name()))]
    pub(super) async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        let url = self.collection_url(kind)?;
        let response = self.send(self.http.get(url), kind, Op::List).await?;
        Ok(response.json().await?)
    }

    #[tracing::instrument(skip(self, data), fields(entity = kind.name()))]
    pub(super) async fn create(&self, kind: EntityKind, data: Value) -> Result<Value, ApiError> {
        let url = self.collection_url(kind)?;
        let response = self
            .send(self.http.post(url).json(&data), kind, Op::Create)
            .await?;
        Ok(response.json().await?)
    }

    #[tracing::instrument(skip(self, data), fields(entity = kind.name()))]
    pub(super) async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        data: Value,
    ) -> Result<Value, ApiError> {
        let url = self.record_url(kind, id)?;
        let response = self
            .send(self.http.put(url).json(&data), kind, Op::Update)
            .await?;
        Ok(response.json().await?)
    }

    #[tracing::instrument(skip(self), fields(entity = kind.name()))]
    pub(super) async fn delete(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        let url = self.record_url(kind, id)?;
        let response = self.send(self.http.delete(url), kind, Op::Delete).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url_uses_lowercase_entity_path() {
        let backend = RestBackend::new(Url::parse("http://localhost:8080/").unwrap(), None);
        let url = backend.collection_url(EntityKind::FraudAlert).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/fraudalert");
    }

    #[test]
    fn test_record_url_appends_id_segment() {
        let backend = RestBackend::new(Url::parse("http://localhost:8080/").unwrap(), None);
        let url = backend.record_url(EntityKind::Order, "ord_42").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/order/ord_42");
    }
}
