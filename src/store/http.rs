use std::time::{Duration, Instant};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::domain::{Car, CarId, CarPatch, NewCar};

use super::{CarStore, DEFAULT_API_URL, StoreError};

/// Characters escaped when an id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct HttpCarStoreBuilder {
    base_url: String,
    timeout: Duration,
    token: Option<String>,
}

impl HttpCarStoreBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Capability token sent as `Authorization: Bearer`. The store validates it.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|token| !token.trim().is_empty());
        self
    }

    pub fn build(self) -> Result<HttpCarStore, StoreError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("wheeldeal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        Ok(HttpCarStore {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            token: self.token,
        })
    }
}

/// `CarStore` over a JSON REST collection at `{base_url}/cars`.
#[derive(Debug, Clone)]
pub struct HttpCarStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCarStore {
    pub fn builder(base_url: impl Into<String>) -> HttpCarStoreBuilder {
        HttpCarStoreBuilder {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            token: None,
        }
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        Self::builder(base_url).build()
    }

    pub fn local() -> Result<Self, StoreError> {
        Self::new(DEFAULT_API_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/cars", self.base_url)
    }

    fn item_url(&self, id: &CarId) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            utf8_percent_encode(id.as_str(), PATH_SEGMENT)
        )
    }

    fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, StoreError> {
        let _span = tracing::debug_span!("store_request", method, url).entered();
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let started = Instant::now();
        let response = request.send().map_err(|err| {
            tracing::warn!(error = %err, "store request failed");
            StoreError::Transport(err.to_string())
        })?;
        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "store request finished"
        );
        match status {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::Unauthorized(status.as_u16()))
            }
            status => Err(StoreError::Status(status.as_u16())),
        }
    }
}

impl CarStore for HttpCarStore {
    fn list(&self) -> Result<Vec<Car>, StoreError> {
        let url = self.collection_url();
        let response = self.send("GET", &url, self.client.get(&url))?;
        response
            .json::<Vec<Car>>()
            .map_err(|err| StoreError::Decode(err.to_string()))
    }

    fn create(&self, car: &NewCar) -> Result<Car, StoreError> {
        let url = self.collection_url();
        let response = self.send("POST", &url, self.client.post(&url).json(car))?;
        // Only the status decides success; the echoed record is a convenience.
        let body = response.text().unwrap_or_default();
        match serde_json::from_str::<Car>(&body) {
            Ok(created) => Ok(created),
            Err(err) => {
                tracing::debug!(error = %err, "create response carried no usable record");
                Ok(Car::from_new(CarId::new(""), car.clone()))
            }
        }
    }

    fn update(&self, id: &CarId, patch: &CarPatch) -> Result<(), StoreError> {
        let url = self.item_url(id);
        self.send("PATCH", &url, self.client.patch(&url).json(patch))?;
        Ok(())
    }

    fn delete(&self, id: &CarId) -> Result<(), StoreError> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.client.delete(&url))?;
        Ok(())
    }
}
