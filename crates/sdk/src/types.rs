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

//! Domain entities returned by the API and the typed inputs of each operation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fiat currencies an invoice amount can be denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
	Usd,
	Uzs,
	Kgs,
	Kzt,
	Amd,
	Azn,
	Byn,
	Aud,
	Try,
	Aed,
	Cad,
	Cny,
	Hkd,
	Idr,
	Inr,
	Jpy,
	Php,
	Sgd,
	Thb,
	Vnd,
	Myr,
	Rub,
	Uah,
	Eur,
	Gbp,
}

/// Recurrence period for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
	Month,
	Week,
	Day,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
	/// Payment page language (e.g., "en")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeToPay {
	pub hours: u32,
	pub minutes: u32,
}

/// Optional invoice settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalFields {
	/// How long the invoice stays payable
	#[serde(skip_serializing_if = "Option::is_none")]
	pub time_to_pay: Option<TimeToPay>,
	/// Address the payment receipt is sent to
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email_to_send: Option<String>,
	/// Restrict the payer to these currencies
	#[serde(skip_serializing_if = "Option::is_none")]
	pub available_currencies: Option<Vec<String>>,
	/// Preselected payment currency
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cryptocurrency: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub period: Option<Period>,
}

/// Request to create an invoice
///
/// The shop id is not part of the request: the client fills it in from its
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
	/// Amount in `currency` (USD when omitted)
	pub amount: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub currency: Option<CurrencyCode>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub query: Option<Query>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub add_fields: Option<AdditionalFields>,
	/// Merchant-side order identifier
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order_id: Option<String>,
	/// Payer email
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

impl CreateInvoiceRequest {
	pub fn new(amount: f64) -> Self {
		Self {
			amount,
			..Default::default()
		}
	}
}

/// Wire body of `invoice/create`
#[derive(Debug, Serialize)]
pub(crate) struct CreateInvoiceBody<'a> {
	pub(crate) shop_id: &'a str,
	#[serde(flatten)]
	pub(crate) request: &'a CreateInvoiceRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelInvoiceRequest {
	pub uuid: String,
}

/// Invoices created within a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceListRequest {
	#[serde(with = "dmy_date")]
	pub start: NaiveDate,
	#[serde(with = "dmy_date")]
	pub end: NaiveDate,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub offset: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceInformationRequest {
	pub uuids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRequest {
	#[serde(with = "dmy_date")]
	pub start: NaiveDate,
	#[serde(with = "dmy_date")]
	pub end: NaiveDate,
}

/// Request to issue a static wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticWalletRequest {
	/// Shop to issue the wallet for; the client's shop when omitted
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shop_id: Option<String>,
	/// Cryptocurrency code (e.g., "USDT_TRC20")
	pub currency: String,
	/// Merchant-side identifier of the wallet owner
	pub identify: String,
}

/// Blockchain network a currency lives on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyNetwork {
	pub code: String,
	pub id: u64,
	pub icon: String,
	pub fullname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceCurrency {
	pub id: u64,
	pub code: String,
	pub fullcode: String,
	pub network: CurrencyNetwork,
	pub name: String,
	pub is_email_required: bool,
	pub stablecoin: bool,
	pub icon_base: String,
	pub icon_network: String,
	pub icon_qr: String,
	pub order: i64,
}

/// Merchant project (shop) an invoice belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
	pub id: u64,
	pub name: String,
	pub fail: String,
	pub success: String,
	pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
	pub uuid: String,
	pub created: String,
	pub address: String,
	pub expiry_date: String,
	pub side_commission: String,
	pub side_commission_cc: String,
	pub amount: f64,
	pub amount_usd: f64,
	pub amount_in_fiat: f64,
	pub fee: f64,
	pub fee_usd: f64,
	pub service_fee: f64,
	pub service_fee_usd: f64,
	pub type_payments: String,
	pub fiat_currency: String,
	/// Lifecycle state: created, paid, overpaid, partial, canceled
	pub status: String,
	pub is_email_required: bool,
	/// Hosted payment page
	pub link: String,
	pub invoice_id: Option<String>,
	pub currency: InvoiceCurrency,
	pub project: Project,
	pub test_mode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceCurrency {
	pub id: u64,
	pub code: String,
	pub short_code: String,
	pub name: String,
	pub is_email_required: bool,
	pub stablecoin: bool,
	pub icon_base: String,
	pub icon_network: String,
	pub icon_qr: String,
	pub order: i64,
	pub obj_network: CurrencyNetwork,
	pub enable: bool,
}

/// Wallet balance for one currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
	pub currency: BalanceCurrency,
	pub balance_crypto: f64,
	pub balance_usd: f64,
	pub available_balance: f64,
	pub available_balance_usd: f64,
}

/// Per-status breakdown used for both invoice counts and amounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsSummary {
	pub all: f64,
	pub created: f64,
	pub paid: f64,
	pub overpaid: f64,
	pub partial: f64,
	pub canceled: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
	pub count: StatisticsSummary,
	pub amount: StatisticsSummary,
}

/// Reusable deposit address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticWallet {
	pub currency: BalanceCurrency,
	pub address: String,
	pub uuid: String,
}

pub type CreateInvoiceSuccess = Invoice;

/// Always `["ok"]`
pub type CancelInvoiceSuccess = Vec<String>;

pub type InvoiceListSuccess = Vec<Invoice>;

pub type InvoiceInformationSuccess = Vec<Invoice>;

pub type BalanceSuccess = Vec<Balance>;

pub type StatisticsSuccess = Statistics;

pub type StaticWalletSuccess = StaticWallet;

/// `dd.mm.yyyy` dates as used by the date-range endpoints
mod dmy_date {
	use chrono::NaiveDate;
	use serde::{Deserialize, Deserializer, Serializer, de::Error};

	const FORMAT: &str = "%d.%m.%Y";

	pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&date.format(FORMAT))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
		let raw = String::deserialize(deserializer)?;
		NaiveDate::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_create_invoice_body_omits_unset_fields() {
		let request = CreateInvoiceRequest::new(10.0);
		let body = CreateInvoiceBody {
			shop_id: "shop-1",
			request: &request,
		};
		assert_eq!(
			serde_json::to_value(&body).unwrap(),
			json!({ "shop_id": "shop-1", "amount": 10.0 })
		);
	}

	#[test]
	fn test_create_invoice_body_full() {
		let request = CreateInvoiceRequest {
			amount: 25.5,
			currency: Some(CurrencyCode::Eur),
			query: Some(Query {
				locale: Some("en".to_string()),
			}),
			add_fields: Some(AdditionalFields {
				time_to_pay: Some(TimeToPay {
					hours: 1,
					minutes: 30,
				}),
				period: Some(Period::Week),
				..Default::default()
			}),
			order_id: Some("order-42".to_string()),
			email: None,
		};
		let body = serde_json::to_value(CreateInvoiceBody {
			shop_id: "shop-1",
			request: &request,
		})
		.unwrap();
		assert_eq!(body["currency"], "EUR");
		assert_eq!(body["query"], json!({ "locale": "en" }));
		assert_eq!(
			body["add_fields"],
			json!({ "time_to_pay": { "hours": 1, "minutes": 30 }, "period": "week" })
		);
		assert_eq!(body["order_id"], "order-42");
		assert!(body.get("email").is_none());
	}

	#[test]
	fn test_date_range_format() {
		let request = StatisticsRequest {
			start: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
			end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
		};
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({ "start": "05.01.2024", "end": "31.12.2024" })
		);

		let parsed: InvoiceListRequest =
			serde_json::from_value(json!({ "start": "01.02.2024", "end": "29.02.2024" })).unwrap();
		assert_eq!(parsed.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
		assert_eq!(parsed.offset, None);
	}

	#[test]
	fn test_invoice_tolerates_partial_payload() {
		let invoice: Invoice = serde_json::from_value(json!({
			"uuid": "INV-XXXXXX",
			"amount": 10.0,
			"status": "created",
			"invoice_id": null,
			"currency": { "code": "USDT", "network": { "code": "TRC20" } }
		}))
		.unwrap();
		assert_eq!(invoice.uuid, "INV-XXXXXX");
		assert_eq!(invoice.invoice_id, None);
		assert_eq!(invoice.currency.network.code, "TRC20");
		assert!(!invoice.test_mode);
	}

	#[test]
	fn test_statistics_payload() {
		let stats: Statistics = serde_json::from_value(json!({
			"count": { "all": 4, "created": 1, "paid": 2, "overpaid": 0, "partial": 0, "canceled": 1 },
			"amount": { "all": 120.5, "created": 20, "paid": 100.5, "overpaid": 0, "partial": 0, "canceled": 0 }
		}))
		.unwrap();
		assert_eq!(stats.count.paid, 2.0);
		assert_eq!(stats.amount.all, 120.5);
	}
}
