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

//! Request vocabulary shared by every operation: verbs, endpoints and the
//! request description handed to the dispatcher.

use std::fmt;

use reqwest::{
	StatusCode,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;

/// HTTP verbs understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	Get,
	Post,
	Put,
	Delete,
	Head,
	Options,
	Patch,
	Trace,
}

impl HttpMethod {
	/// Every verb, in declaration order
	pub const ALL: [HttpMethod; 8] = [
		HttpMethod::Get,
		HttpMethod::Post,
		HttpMethod::Put,
		HttpMethod::Delete,
		HttpMethod::Head,
		HttpMethod::Options,
		HttpMethod::Patch,
		HttpMethod::Trace,
	];

	/// Whether a request with this verb may carry a body.
	///
	/// Fixed table: POST, PUT, DELETE and PATCH accept a body; GET, HEAD,
	/// OPTIONS and TRACE never do.
	pub const fn body_allowed(self) -> bool {
		match self {
			HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete | HttpMethod::Patch => true,
			HttpMethod::Get | HttpMethod::Head | HttpMethod::Options | HttpMethod::Trace => false,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
			HttpMethod::Head => "HEAD",
			HttpMethod::Options => "OPTIONS",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Trace => "TRACE",
		}
	}
}

impl fmt::Display for HttpMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<HttpMethod> for reqwest::Method {
	fn from(method: HttpMethod) -> Self {
		match method {
			HttpMethod::Get => reqwest::Method::GET,
			HttpMethod::Post => reqwest::Method::POST,
			HttpMethod::Put => reqwest::Method::PUT,
			HttpMethod::Delete => reqwest::Method::DELETE,
			HttpMethod::Head => reqwest::Method::HEAD,
			HttpMethod::Options => reqwest::Method::OPTIONS,
			HttpMethod::Patch => reqwest::Method::PATCH,
			HttpMethod::Trace => reqwest::Method::TRACE,
		}
	}
}

/// Relative API paths, resolved against the client's base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// `invoice/create`
	InvoiceCreate,
	/// `invoice/merchant/canceled`
	InvoiceCancel,
	/// `invoice/merchant/info`
	///
	/// Shared by the invoice list and invoice information operations; the
	/// request body decides which one the API answers.
	InvoiceInfo,
	/// `merchant/wallet/balance/all`
	WalletBalance,
	/// `invoice/merchant/statistics`
	InvoiceStatistics,
	/// `invoice/static/create`
	StaticWalletCreate,
}

impl Endpoint {
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::InvoiceCreate => "invoice/create",
			Endpoint::InvoiceCancel => "invoice/merchant/canceled",
			Endpoint::InvoiceInfo => "invoice/merchant/info",
			Endpoint::WalletBalance => "merchant/wallet/balance/all",
			Endpoint::InvoiceStatistics => "invoice/merchant/statistics",
			Endpoint::StaticWalletCreate => "invoice/static/create",
		}
	}
}

impl fmt::Display for Endpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Non-2xx statuses the API answers with a structured error body
pub const KNOWN_ERROR_STATUSES: [StatusCode; 2] = [StatusCode::BAD_REQUEST, StatusCode::FORBIDDEN];

pub fn is_known_error_status(status: StatusCode) -> bool {
	KNOWN_ERROR_STATUSES.contains(&status)
}

/// A single request as seen by the dispatcher
///
/// A body set on a verb that forbids one is rejected at dispatch time,
/// before anything reaches the transport.
#[derive(Debug, Clone)]
pub struct RequestSpec {
	pub method: HttpMethod,
	pub endpoint: Endpoint,
	/// Applied on top of the default headers; these win on collision
	pub headers: HeaderMap,
	pub body: Option<serde_json::Value>,
}

impl RequestSpec {
	pub fn new(method: HttpMethod, endpoint: Endpoint) -> Self {
		Self {
			method,
			endpoint,
			headers: HeaderMap::new(),
			body: None,
		}
	}

	/// Add a single header override
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// Add every header in `headers` as an override
	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		for (name, value) in headers.iter() {
			self.headers.insert(name.clone(), value.clone());
		}
		self
	}

	/// Attach an already encoded JSON body
	pub fn with_json(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);
		self
	}

	/// Encode `body` to JSON and attach it
	pub fn with_body<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, serde_json::Error> {
		Ok(self.with_json(serde_json::to_value(body)?))
	}
}
