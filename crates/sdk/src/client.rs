// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
	StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::{
	BalanceError, CancelInvoiceError, CreateInvoiceError, InvoiceInformationError,
	InvoiceListError, StaticWalletError, StatisticsError,
};
use crate::http::{Endpoint, HttpMethod, RequestSpec, is_known_error_status};
use crate::response::{ErrorBody, ResponseEnvelope};
use crate::transport::{ReqwestTransport, Transport, TransportError, TransportRequest};
use crate::types::{
	BalanceSuccess, CancelInvoiceRequest, CancelInvoiceSuccess, CreateInvoiceBody,
	CreateInvoiceRequest, CreateInvoiceSuccess, InvoiceInformationRequest,
	InvoiceInformationSuccess, InvoiceListRequest, InvoiceListSuccess, StaticWalletRequest,
	StaticWalletSuccess, StatisticsRequest, StatisticsSuccess,
};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.cryptocloud.plus/v2/";

const DISPATCH_TARGET: &str = "cryptocloud::dispatch";

/// Error types for client operations
///
/// Structured 400/403 answers are not errors; they come back as
/// [`ResponseEnvelope::Error`].
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("HTTP method {method} does not support a request body ({endpoint})")]
	BodyNotAllowed { method: HttpMethod, endpoint: Endpoint },
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
	#[error("Invalid header value: {0}")]
	InvalidHeader(#[from] InvalidHeaderValue),
	#[error("Failed to build HTTP transport: {0}")]
	TransportSetup(#[source] TransportError),
	#[error("Network error: {method} {endpoint}: {source}")]
	Transport {
		method: HttpMethod,
		endpoint: Endpoint,
		#[source]
		source: TransportError,
	},
	#[error("HTTP error! status: {status} ({method} {endpoint}): {body}")]
	UnexpectedStatus {
		method: HttpMethod,
		endpoint: Endpoint,
		status: StatusCode,
		body: String,
	},
	#[error("Invalid response from {endpoint} (status {status}): {source}")]
	Decode {
		endpoint: Endpoint,
		status: StatusCode,
		#[source]
		source: serde_json::Error,
	},
	#[error("Failed to create tokio runtime: {0}")]
	Runtime(#[from] std::io::Error),
}

impl ClientError {
	/// HTTP status carried by the error, if the server answered at all
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			ClientError::UnexpectedStatus { status, .. } | ClientError::Decode { status, .. } => {
				Some(*status)
			}
			_ => None,
		}
	}
}

/// Credentials and endpoint of one merchant account
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
	/// API key sent as a bearer token
	pub api_key: String,
	/// Shop (merchant) identifier
	pub shop_id: String,
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Request timeout in milliseconds handed to the transport; none when unset
	#[serde(default)]
	pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
	DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
	pub fn new(api_key: impl Into<String>, shop_id: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			shop_id: shop_id.into(),
			base_url: default_base_url(),
			timeout_ms: None,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Set the request timeout, rounded up to whole milliseconds
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		let millis = timeout.as_nanos().div_ceil(1_000_000);
		self.timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
		self
	}

	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_ms.map(Duration::from_millis)
	}

	fn normalized(mut self) -> Self {
		self.base_url = normalize_base_url(&self.base_url);
		self
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("api_key", &"<redacted>")
			.field("shop_id", &self.shop_id)
			.field("base_url", &self.base_url)
			.field("timeout_ms", &self.timeout_ms)
			.finish()
	}
}

/// Ensure the base URL ends with exactly one `/`
pub fn normalize_base_url(base_url: &str) -> String {
	format!("{}/", base_url.trim_end_matches('/'))
}

/// Client for the merchant API
///
/// Holds immutable configuration only, so a single instance (or its clones)
/// can serve any number of concurrent calls.
#[derive(Clone)]
pub struct Client {
	config: ClientConfig,
	transport: Arc<dyn Transport>,
}

impl Client {
	/// Create a client for the production API
	pub fn new(api_key: impl Into<String>, shop_id: impl Into<String>) -> Self {
		Self::with_transport(
			ClientConfig::new(api_key, shop_id),
			Arc::new(ReqwestTransport::new()),
		)
	}

	/// Create a client from a full configuration, honouring its timeout
	pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
		let transport = match config.timeout() {
			Some(timeout) => ReqwestTransport::with_timeout(timeout)
				.map_err(ClientError::TransportSetup)?,
			None => ReqwestTransport::new(),
		};
		Ok(Self::with_transport(config, Arc::new(transport)))
	}

	/// Create a client over a custom transport
	pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
		Self {
			config: config.normalized(),
			transport,
		}
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Normalized base URL, always ending with `/`
	pub fn base_url(&self) -> &str {
		&self.config.base_url
	}

	pub fn shop_id(&self) -> &str {
		&self.config.shop_id
	}

	/// Absolute URL of `endpoint`
	pub fn url_for(&self, endpoint: Endpoint) -> String {
		format!("{}{}", self.config.base_url, endpoint.as_str())
	}

	/// Default headers with `overrides` applied on top
	fn request_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap, ClientError> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))?;
		bearer.set_sensitive(true);
		headers.insert(AUTHORIZATION, bearer);

		for (name, value) in overrides.iter() {
			headers.insert(name.clone(), value.clone());
		}
		Ok(headers)
	}

	/// Send one request and classify the answer.
	///
	/// - 2xx: the body is decoded as an envelope, trusting its `status` field
	/// - 400/403: the body is decoded as an error envelope
	/// - any other status, or a transport fault: `Err`
	///
	/// A body on a verb that forbids one fails before the transport is touched.
	pub async fn dispatch<R, E>(
		&self,
		spec: RequestSpec,
	) -> Result<ResponseEnvelope<R, E>, ClientError>
	where
		R: DeserializeOwned,
		E: DeserializeOwned,
	{
		let RequestSpec {
			method,
			endpoint,
			headers,
			body,
		} = spec;

		if body.is_some() && !method.body_allowed() {
			return Err(ClientError::BodyNotAllowed { method, endpoint });
		}

		let url = self.url_for(endpoint);
		let headers = self.request_headers(&headers)?;
		let body = match body {
			Some(body) if method.body_allowed() => Some(serde_json::to_vec(&body)?),
			_ => None,
		};

		debug!(
			target: DISPATCH_TARGET,
			%method,
			%endpoint,
			has_body = body.is_some(),
			"Sending request"
		);

		let response = self
			.transport
			.send(TransportRequest {
				method,
				url,
				headers,
				body,
			})
			.await
			.map_err(|source| {
				warn!(target: DISPATCH_TARGET, %method, %endpoint, error = %source, "Request failed");
				ClientError::Transport {
					method,
					endpoint,
					source,
				}
			})?;

		let status = response.status;
		debug!(
			target: DISPATCH_TARGET,
			%method,
			%endpoint,
			status = status.as_u16(),
			"Received response"
		);

		if status.is_success() {
			return serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
				endpoint,
				status,
				source,
			});
		}

		if is_known_error_status(status) {
			let error: ErrorBody<E> =
				serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
					endpoint,
					status,
					source,
				})?;
			return Ok(ResponseEnvelope::Error(error.result));
		}

		warn!(
			target: DISPATCH_TARGET,
			%method,
			%endpoint,
			status = status.as_u16(),
			"Unexpected HTTP status"
		);
		Err(ClientError::UnexpectedStatus {
			method,
			endpoint,
			status,
			body: String::from_utf8_lossy(&response.body).into_owned(),
		})
	}

	/// Create an invoice for the configured shop
	pub async fn create_invoice(
		&self,
		request: &CreateInvoiceRequest,
	) -> Result<ResponseEnvelope<CreateInvoiceSuccess, CreateInvoiceError>, ClientError> {
		let body = CreateInvoiceBody {
			shop_id: &self.config.shop_id,
			request,
		};
		let spec = RequestSpec::new(HttpMethod::Post, Endpoint::InvoiceCreate).with_body(&body)?;
		self.dispatch(spec).await
	}

	/// Cancel an invoice that has not been paid yet
	pub async fn cancel_invoice(
		&self,
		request: &CancelInvoiceRequest,
	) -> Result<ResponseEnvelope<CancelInvoiceSuccess, CancelInvoiceError>, ClientError> {
		let spec = RequestSpec::new(HttpMethod::Post, Endpoint::InvoiceCancel).with_body(request)?;
		self.dispatch(spec).await
	}

	/// List invoices created within a date range
	pub async fn invoice_list(
		&self,
		request: &InvoiceListRequest,
	) -> Result<ResponseEnvelope<InvoiceListSuccess, InvoiceListError>, ClientError> {
		let spec = RequestSpec::new(HttpMethod::Post, Endpoint::InvoiceInfo).with_body(request)?;
		self.dispatch(spec).await
	}

	/// Fetch invoices by uuid
	pub async fn invoice_information(
		&self,
		request: &InvoiceInformationRequest,
	) -> Result<ResponseEnvelope<InvoiceInformationSuccess, InvoiceInformationError>, ClientError>
	{
		let spec = RequestSpec::new(HttpMethod::Post, Endpoint::InvoiceInfo).with_body(request)?;
		self.dispatch(spec).await
	}

	/// Balances of every merchant wallet
	pub async fn balance(
		&self,
	) -> Result<ResponseEnvelope<BalanceSuccess, BalanceError>, ClientError> {
		self.dispatch(RequestSpec::new(HttpMethod::Get, Endpoint::WalletBalance))
			.await
	}

	/// Invoice counts and amounts within a date range
	pub async fn statistics(
		&self,
		request: &StatisticsRequest,
	) -> Result<ResponseEnvelope<StatisticsSuccess, StatisticsError>, ClientError> {
		let spec =
			RequestSpec::new(HttpMethod::Post, Endpoint::InvoiceStatistics).with_body(request)?;
		self.dispatch(spec).await
	}

	/// Issue a static wallet, defaulting to the configured shop
	pub async fn static_wallet(
		&self,
		request: &StaticWalletRequest,
	) -> Result<ResponseEnvelope<StaticWalletSuccess, StaticWalletError>, ClientError> {
		let mut body = request.clone();
		if body.shop_id.is_none() {
			body.shop_id = Some(self.config.shop_id.clone());
		}
		let spec =
			RequestSpec::new(HttpMethod::Post, Endpoint::StaticWalletCreate).with_body(&body)?;
		self.dispatch(spec).await
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs it on its own tokio runtime, so it
/// must not be used from inside another runtime. For new code, prefer using
/// the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client for the production API
	pub fn new(api_key: impl Into<String>, shop_id: impl Into<String>) -> Result<Self, ClientError> {
		Self::from_client(Client::new(api_key, shop_id))
	}

	pub fn from_client(client: Client) -> Result<Self, ClientError> {
		let runtime = tokio::runtime::Runtime::new()?;
		Ok(Self { client, runtime })
	}

	pub fn client(&self) -> &Client {
		&self.client
	}

	pub fn create_invoice(
		&self,
		request: &CreateInvoiceRequest,
	) -> Result<ResponseEnvelope<CreateInvoiceSuccess, CreateInvoiceError>, ClientError> {
		self.runtime.block_on(self.client.create_invoice(request))
	}

	pub fn cancel_invoice(
		&self,
		request: &CancelInvoiceRequest,
	) -> Result<ResponseEnvelope<CancelInvoiceSuccess, CancelInvoiceError>, ClientError> {
		self.runtime.block_on(self.client.cancel_invoice(request))
	}

	pub fn invoice_list(
		&self,
		request: &InvoiceListRequest,
	) -> Result<ResponseEnvelope<InvoiceListSuccess, InvoiceListError>, ClientError> {
		self.runtime.block_on(self.client.invoice_list(request))
	}

	pub fn invoice_information(
		&self,
		request: &InvoiceInformationRequest,
	) -> Result<ResponseEnvelope<InvoiceInformationSuccess, InvoiceInformationError>, ClientError>
	{
		self.runtime.block_on(self.client.invoice_information(request))
	}

	pub fn balance(&self) -> Result<ResponseEnvelope<BalanceSuccess, BalanceError>, ClientError> {
		self.runtime.block_on(self.client.balance())
	}

	pub fn statistics(
		&self,
		request: &StatisticsRequest,
	) -> Result<ResponseEnvelope<StatisticsSuccess, StatisticsError>, ClientError> {
		self.runtime.block_on(self.client.statistics(request))
	}

	pub fn static_wallet(
		&self,
		request: &StaticWalletRequest,
	) -> Result<ResponseEnvelope<StaticWalletSuccess, StaticWalletError>, ClientError> {
		self.runtime.block_on(self.client.static_wallet(request))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reqwest::header::HeaderName;

	#[test]
	fn test_client_creation() {
		let client = Client::new("key", "shop-1");
		assert_eq!(client.base_url(), DEFAULT_BASE_URL);
		assert_eq!(client.shop_id(), "shop-1");
	}

	#[test]
	fn test_sync_client_creation() {
		let client = SyncClient::new("key", "shop-1");
		assert!(client.is_ok());
	}

	#[test]
	fn test_normalize_base_url() {
		assert_eq!(normalize_base_url("https://host/v2"), "https://host/v2/");
		assert_eq!(normalize_base_url("https://host/v2/"), "https://host/v2/");
		assert_eq!(normalize_base_url("https://host/v2//"), "https://host/v2/");
	}

	#[test]
	fn test_url_for_endpoint() {
		let config = ClientConfig::new("key", "shop-1").with_base_url("https://host/v2");
		let client = Client::with_transport(config, Arc::new(ReqwestTransport::new()));
		assert_eq!(
			client.url_for(Endpoint::InvoiceCreate),
			"https://host/v2/invoice/create"
		);
	}

	#[test]
	fn test_default_headers() {
		let client = Client::new("secret", "shop-1");
		let headers = client.request_headers(&HeaderMap::new()).unwrap();
		assert_eq!(headers[CONTENT_TYPE], "application/json");
		assert_eq!(headers[AUTHORIZATION], "Bearer secret");
		assert_eq!(headers.len(), 2);
	}

	#[test]
	fn test_header_overrides_win() {
		let client = Client::new("secret", "shop-1");
		let mut overrides = HeaderMap::new();
		overrides.insert(AUTHORIZATION, HeaderValue::from_static("Token other"));
		overrides.insert(
			HeaderName::from_static("x-request-id"),
			HeaderValue::from_static("abc"),
		);

		let headers = client.request_headers(&overrides).unwrap();
		assert_eq!(headers[AUTHORIZATION], "Token other");
		assert_eq!(headers["x-request-id"], "abc");
		assert_eq!(headers[CONTENT_TYPE], "application/json");
	}

	#[test]
	fn test_invalid_api_key_header() {
		let client = Client::new("bad\nkey", "shop-1");
		let result = client.request_headers(&HeaderMap::new());
		assert!(matches!(result, Err(ClientError::InvalidHeader(_))));
	}

	#[test]
	fn test_config_debug_redacts_api_key() {
		let config = ClientConfig::new("super-secret", "shop-1");
		let rendered = format!("{:?}", config);
		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("shop-1"));
	}

	#[test]
	fn test_config_deserialize_defaults() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"api_key":"k","shop_id":"s"}"#).unwrap();
		assert_eq!(config.base_url, DEFAULT_BASE_URL);
		assert_eq!(config.timeout_ms, None);
	}

	#[test]
	fn test_from_config_with_timeout() {
		let config = ClientConfig::new("key", "shop-1").with_timeout(Duration::from_secs(10));
		let client = Client::from_config(config).unwrap();
		assert_eq!(client.config().timeout_ms, Some(10_000));
	}

	#[test]
	fn test_sub_second_timeout_is_kept() {
		let config = ClientConfig::new("key", "shop-1").with_timeout(Duration::from_millis(500));
		assert_eq!(config.timeout_ms, Some(500));
		assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

		let config = ClientConfig::new("key", "shop-1").with_timeout(Duration::from_micros(1_900_001));
		assert_eq!(config.timeout_ms, Some(1_901));

		let config = ClientConfig::new("key", "shop-1").with_timeout(Duration::from_micros(10));
		assert_eq!(config.timeout_ms, Some(1));
	}
}
