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

//! CryptoCloud SDK - Client library for the merchant payment API
//!
//! This crate provides a typed client for invoice, balance, statistics and
//! static wallet operations, the request/response structures they exchange,
//! and the single dispatcher every operation goes through.
//!
//! Every call resolves to one of three outcomes:
//! - `Ok(ResponseEnvelope::Success(..))` for a successful answer
//! - `Ok(ResponseEnvelope::Error(..))` for a structured 400/403 answer
//! - `Err(ClientError)` for contract violations, transport faults and
//!   unexpected statuses
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No runtime initialization
//! - No environment or configuration loading

pub mod client;
pub mod errors;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{Client, ClientConfig, ClientError, DEFAULT_BASE_URL, SyncClient};
pub use http::{Endpoint, HttpMethod, RequestSpec};
pub use response::{ErrorResult, ResponseEnvelope};
pub use transport::{
	ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};
pub use types::*;
