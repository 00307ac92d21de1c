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

use serde::{Deserialize, Serialize};

use crate::errors::AuthorizationError;

/// Result of an operation the API answered in the documented shape
///
/// Serialized with the upstream `status` discriminator (`"success"` or
/// `"error"`) and the payload under `result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum ResponseEnvelope<R, E> {
	Success(R),
	Error(ErrorResult<E>),
}

/// Payload of an `"error"` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorResult<E> {
	/// The API key was missing or rejected
	Authorization(AuthorizationError),
	/// Error specific to the operation
	Operation(E),
}

impl<R, E> ResponseEnvelope<R, E> {
	pub fn is_success(&self) -> bool {
		matches!(self, ResponseEnvelope::Success(_))
	}

	pub fn success(&self) -> Option<&R> {
		match self {
			ResponseEnvelope::Success(result) => Some(result),
			ResponseEnvelope::Error(_) => None,
		}
	}

	pub fn error(&self) -> Option<&ErrorResult<E>> {
		match self {
			ResponseEnvelope::Success(_) => None,
			ResponseEnvelope::Error(error) => Some(error),
		}
	}

	pub fn into_result(self) -> Result<R, ErrorResult<E>> {
		match self {
			ResponseEnvelope::Success(result) => Ok(result),
			ResponseEnvelope::Error(error) => Err(error),
		}
	}
}

impl<E> ErrorResult<E> {
	/// The operation-specific payload, if this is not an authorization failure
	pub fn operation(&self) -> Option<&E> {
		match self {
			ErrorResult::Authorization(_) => None,
			ErrorResult::Operation(error) => Some(error),
		}
	}
}

/// Body of a 400/403 response; the status field is implied by the HTTP status
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody<E> {
	pub(crate) result: ErrorResult<E>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::errors::{ForbiddenError, ValidateError};
	use serde_json::json;

	#[test]
	fn test_success_envelope() {
		let envelope: ResponseEnvelope<Vec<String>, ValidateError> =
			serde_json::from_value(json!({ "status": "success", "result": ["ok"] })).unwrap();
		assert!(envelope.is_success());
		assert_eq!(envelope.success(), Some(&vec!["ok".to_string()]));
	}

	#[test]
	fn test_error_envelope_operation_payload() {
		let envelope: ResponseEnvelope<Vec<String>, ValidateError> = serde_json::from_value(
			json!({ "status": "error", "result": { "validate_error": "Invoice not found" } }),
		)
		.unwrap();
		let error = envelope.into_result().unwrap_err();
		assert_eq!(
			error.operation(),
			Some(&ValidateError {
				validate_error: "Invoice not found".to_string()
			})
		);
	}

	#[test]
	fn test_error_envelope_authorization_payload() {
		let envelope: ResponseEnvelope<Vec<String>, ForbiddenError> = serde_json::from_value(
			json!({ "status": "error", "result": { "authorization": "Token is invalid" } }),
		)
		.unwrap();
		assert!(matches!(
			envelope.error(),
			Some(ErrorResult::Authorization(AuthorizationError { authorization })) if authorization == "Token is invalid"
		));
	}

	#[test]
	fn test_envelope_serializes_with_status_tag() {
		let envelope: ResponseEnvelope<u32, ValidateError> = ResponseEnvelope::Success(7);
		assert_eq!(
			serde_json::to_value(&envelope).unwrap(),
			json!({ "status": "success", "result": 7 })
		);
	}

	#[test]
	fn test_unknown_status_is_rejected() {
		let parsed: Result<ResponseEnvelope<u32, ValidateError>, _> =
			serde_json::from_value(json!({ "status": "pending", "result": 1 }));
		assert!(parsed.is_err());
	}
}
