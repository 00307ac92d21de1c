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

//! The HTTP collaborator behind the dispatcher.
//!
//! The dispatcher only needs to issue one request and read back a status and
//! a body. [`ReqwestTransport`] is the production implementation; anything
//! else implementing [`Transport`] can stand in for it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode, header::HeaderMap};
use thiserror::Error;

use crate::http::HttpMethod;

/// Error types for transport-level faults
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),
	#[error("{0}")]
	Other(String),
}

/// A fully resolved outgoing request
#[derive(Debug, Clone)]
pub struct TransportRequest {
	pub method: HttpMethod,
	pub url: String,
	pub headers: HeaderMap,
	/// Serialized JSON body, only present for verbs that accept one
	pub body: Option<Vec<u8>>,
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
	pub status: StatusCode,
	pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
	/// Issue exactly one request and return whatever the server answered.
	///
	/// Only faults that prevent a response (DNS, connect, timeout, broken
	/// body stream) are errors; every HTTP status is a valid response.
	async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Transport backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
	client: ReqwestClient,
}

impl ReqwestTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a transport whose requests give up after `timeout`
	pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
		let client = ReqwestClient::builder().timeout(timeout).build()?;
		Ok(Self { client })
	}

	/// Wrap an existing, caller-configured `reqwest` client
	pub fn from_client(client: ReqwestClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for ReqwestTransport {
	async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
		let mut builder = self
			.client
			.request(request.method.into(), &request.url)
			.headers(request.headers);
		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let status = response.status();
		let body = response.bytes().await?.to_vec();

		Ok(TransportResponse { status, body })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transport_with_timeout() {
		let transport = ReqwestTransport::with_timeout(Duration::from_secs(5));
		assert!(transport.is_ok());
	}

	#[test]
	fn test_other_error_display() {
		let err = TransportError::Other("connection reset".to_string());
		assert_eq!(err.to_string(), "connection reset");
	}
}
