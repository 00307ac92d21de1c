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

//! Structured error payloads the API returns with 400 and 403 responses.
//!
//! Unions are untagged: the variant is picked from whichever fields the body
//! carries, so variants with required fields come before catch-all ones.
//! Single-field variants reject extra fields so a multi-field body falls
//! through to the variant that keeps every message.

use serde::{Deserialize, Serialize};

/// Generic rejection of the API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationError {
	pub authorization: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceMandatoryFieldsError {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shop_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInvoiceInvalidAmountError {
	pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateInvoiceInvalidCurrencyError {
	pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceListMandatoryFieldsError {
	pub start: String,
	pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenError {
	pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateError {
	pub validate_error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateInvoiceError {
	InvalidCurrency(CreateInvoiceInvalidCurrencyError),
	InvalidAmount(CreateInvoiceInvalidAmountError),
	MandatoryFields(CreateInvoiceMandatoryFieldsError),
}

pub type CancelInvoiceError = ValidateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvoiceListError {
	MandatoryFields(InvoiceListMandatoryFieldsError),
	Forbidden(ForbiddenError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvoiceInformationError {
	Validate(ValidateError),
	Forbidden(ForbiddenError),
}

pub type BalanceError = ForbiddenError;

pub type StatisticsError = ValidateError;

pub type StaticWalletError = ValidateError;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_create_invoice_error_variants() {
		let amount: CreateInvoiceError =
			serde_json::from_str(r#"{"amount":"Ensure this value is greater than 0"}"#).unwrap();
		assert!(matches!(amount, CreateInvoiceError::InvalidAmount(ref e) if e.amount.starts_with("Ensure")));

		let currency: CreateInvoiceError =
			serde_json::from_str(r#"{"currency":"Invalid currency code"}"#).unwrap();
		assert!(matches!(currency, CreateInvoiceError::InvalidCurrency(_)));

		let missing: CreateInvoiceError = serde_json::from_str(r#"{"shop_id":"required"}"#).unwrap();
		assert_eq!(
			missing,
			CreateInvoiceError::MandatoryFields(CreateInvoiceMandatoryFieldsError {
				amount: None,
				shop_id: Some("required".to_string()),
			})
		);
	}

	#[test]
	fn test_create_invoice_error_keeps_every_field() {
		let both: CreateInvoiceError =
			serde_json::from_str(r#"{"amount":"required","shop_id":"required"}"#).unwrap();
		assert_eq!(
			both,
			CreateInvoiceError::MandatoryFields(CreateInvoiceMandatoryFieldsError {
				amount: Some("required".to_string()),
				shop_id: Some("required".to_string()),
			})
		);
	}

	#[test]
	fn test_invoice_list_error_variants() {
		let fields: InvoiceListError =
			serde_json::from_str(r#"{"start":"required","end":"required"}"#).unwrap();
		assert!(matches!(fields, InvoiceListError::MandatoryFields(_)));

		let forbidden: InvoiceListError =
			serde_json::from_str(r#"{"detail":"You do not have permission"}"#).unwrap();
		assert!(matches!(forbidden, InvoiceListError::Forbidden(_)));
	}

	#[test]
	fn test_invoice_information_error_variants() {
		let validate: InvoiceInformationError =
			serde_json::from_str(r#"{"validate_error":"uuids is empty"}"#).unwrap();
		assert!(matches!(validate, InvoiceInformationError::Validate(_)));

		let forbidden: InvoiceInformationError =
			serde_json::from_str(r#"{"detail":"Authentication credentials were not provided."}"#)
				.unwrap();
		assert_eq!(
			forbidden,
			InvoiceInformationError::Forbidden(ForbiddenError {
				detail: "Authentication credentials were not provided.".to_string()
			})
		);
	}
}
