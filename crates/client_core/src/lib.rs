use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Company, CompanyId, ContactId},
    protocol::CompanyPayload,
};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod effects;
pub mod error;
pub mod navigator;
pub mod route;
pub mod screens;
pub mod validation;

pub use config::{load_settings, ClientSettings, Timing};
pub use effects::{ApiRequest, Completion, Effect, Notice, NoticeKind};
pub use error::ClientError;
pub use navigator::{Navigator, ScreenTicket};
pub use route::Route;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The REST surface of the company backend.
#[async_trait]
pub trait CompanyApi: Send + Sync {
    async fn list_companies(&self) -> ClientResult<Vec<Company>>;
    async fn get_company(&self, id: CompanyId) -> ClientResult<Company>;
    /// Success is decided by the status code; the echoed record is optional.
    async fn create_company(&self, payload: &CompanyPayload) -> ClientResult<Option<Company>>;
    async fn update_company(
        &self,
        id: CompanyId,
        payload: &CompanyPayload,
    ) -> ClientResult<Option<Company>>;
    async fn delete_company(&self, id: CompanyId) -> ClientResult<()>;
    async fn delete_contact(&self, id: ContactId) -> ClientResult<()>;
}

pub struct HttpCompanyClient {
    http: Client,
    base_url: String,
}

impl HttpCompanyClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        method: &'static str,
        endpoint: &str,
        request: RequestBuilder,
    ) -> ClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                method,
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                method,
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(method, endpoint, status = status.as_u16(), "api request ok");
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        method: &'static str,
        endpoint: &str,
        response: Response,
    ) -> ClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                method,
                endpoint: endpoint.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Reads an echoed record if the backend sent one that parses.
    async fn read_optional_company(endpoint: &str, response: Response) -> Option<Company> {
        let bytes = response.bytes().await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(company) => Some(company),
            Err(err) => {
                debug!(endpoint, "ignoring unparseable success body: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl CompanyApi for HttpCompanyClient {
    async fn list_companies(&self) -> ClientResult<Vec<Company>> {
        let endpoint = self.endpoint("/companies/");
        let response = self
            .send("GET", &endpoint, self.http.get(&endpoint))
            .await?;
        Self::read_json("GET", &endpoint, response).await
    }

    async fn get_company(&self, id: CompanyId) -> ClientResult<Company> {
        let endpoint = self.endpoint(&format!("/companies/{}", id.0));
        let response = self
            .send("GET", &endpoint, self.http.get(&endpoint))
            .await?;
        Self::read_json("GET", &endpoint, response).await
    }

    async fn create_company(&self, payload: &CompanyPayload) -> ClientResult<Option<Company>> {
        let endpoint = self.endpoint("/companies");
        let response = self
            .send("POST", &endpoint, self.http.post(&endpoint).json(payload))
            .await?;
        let created = Self::read_optional_company(&endpoint, response).await;
        info!(
            title = %payload.title,
            id = created.as_ref().map(|c| c.id.0),
            "company created"
        );
        Ok(created)
    }

    async fn update_company(
        &self,
        id: CompanyId,
        payload: &CompanyPayload,
    ) -> ClientResult<Option<Company>> {
        let endpoint = self.endpoint(&format!("/companies/{}", id.0));
        let response = self
            .send("PUT", &endpoint, self.http.put(&endpoint).json(payload))
            .await?;
        info!(company = id.0, contacts = payload.contacts.len(), "company updated");
        Ok(Self::read_optional_company(&endpoint, response).await)
    }

    async fn delete_company(&self, id: CompanyId) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("/companies/{}", id.0));
        self.send("DELETE", &endpoint, self.http.delete(&endpoint))
            .await?;
        info!(company = id.0, "company deleted");
        Ok(())
    }

    async fn delete_contact(&self, id: ContactId) -> ClientResult<()> {
        let endpoint = self.endpoint(&format!("/companies/contact/{}", id.0));
        self.send("DELETE", &endpoint, self.http.delete(&endpoint))
            .await?;
        info!(contact = id.0, "contact deleted");
        Ok(())
    }
}

/// Validates an http(s) base url and strips trailing slashes so endpoint
/// paths can be appended verbatim.
pub fn normalize_base_url(raw: &str) -> ClientResult<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
