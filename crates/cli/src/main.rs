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

//! Command-line access to the CryptoCloud merchant API
//!
//! Reads credentials from `CRYPTOCLOUD_*` environment variables (or a
//! configuration file), runs a single operation and prints the response
//! envelope as JSON. Structured API errors are printed too and make the
//! process exit with a non-zero status.

mod config;
mod logging;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cryptocloud_sdk::{
	CancelInvoiceRequest, Client, CreateInvoiceRequest, CurrencyCode, InvoiceInformationRequest,
	InvoiceListRequest, Query, ResponseEnvelope, StaticWalletRequest, StatisticsRequest,
};
use serde::Serialize;
use tracing::info;

use crate::logging::init_logging;

/// CryptoCloud merchant API client
#[derive(Parser, Debug)]
#[command(name = "cryptocloud")]
#[command(about = "Call the CryptoCloud merchant API")]
struct Cli {
	/// Path to a configuration file (environment variables still apply on top)
	#[arg(short, long)]
	config: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Create an invoice for the configured shop
	CreateInvoice {
		#[arg(long)]
		amount: f64,
		/// Fiat currency code (e.g., USD, EUR)
		#[arg(long, value_parser = parse_currency)]
		currency: Option<CurrencyCode>,
		#[arg(long)]
		order_id: Option<String>,
		#[arg(long)]
		email: Option<String>,
		/// Payment page language
		#[arg(long)]
		locale: Option<String>,
	},
	/// Cancel an unpaid invoice
	CancelInvoice {
		uuid: String,
	},
	/// List invoices created between two dates (dd.mm.yyyy)
	InvoiceList {
		#[arg(long, value_parser = parse_date)]
		start: NaiveDate,
		#[arg(long, value_parser = parse_date)]
		end: NaiveDate,
		#[arg(long)]
		offset: Option<u32>,
		#[arg(long)]
		limit: Option<u32>,
	},
	/// Show invoices by uuid
	InvoiceInfo {
		#[arg(required = true)]
		uuids: Vec<String>,
	},
	/// Show wallet balances
	Balance,
	/// Invoice statistics between two dates (dd.mm.yyyy)
	Statistics {
		#[arg(long, value_parser = parse_date)]
		start: NaiveDate,
		#[arg(long, value_parser = parse_date)]
		end: NaiveDate,
	},
	/// Issue a static wallet
	StaticWallet {
		#[arg(long)]
		currency: String,
		#[arg(long)]
		identify: String,
		/// Defaults to the configured shop
		#[arg(long)]
		shop_id: Option<String>,
	},
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
	NaiveDate::parse_from_str(raw, "%d.%m.%Y")
		.or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
		.map_err(|_| format!("invalid date '{}', expected dd.mm.yyyy", raw))
}

fn parse_currency(raw: &str) -> Result<CurrencyCode, String> {
	serde_json::from_value(serde_json::Value::String(raw.to_uppercase()))
		.map_err(|_| format!("unsupported currency '{}'", raw))
}

/// Print the envelope; an error envelope fails the command
fn report<R: Serialize, E: Serialize>(envelope: ResponseEnvelope<R, E>) -> Result<()> {
	println!(
		"{}",
		serde_json::to_string_pretty(&envelope).context("Failed to render response")?
	);
	if !envelope.is_success() {
		bail!("API returned an error response");
	}
	Ok(())
}

async fn run(client: &Client, command: Command) -> Result<()> {
	match command {
		Command::CreateInvoice {
			amount,
			currency,
			order_id,
			email,
			locale,
		} => {
			let request = CreateInvoiceRequest {
				currency,
				order_id,
				email,
				query: locale.map(|locale| Query {
					locale: Some(locale),
				}),
				..CreateInvoiceRequest::new(amount)
			};
			report(client.create_invoice(&request).await?)
		}
		Command::CancelInvoice { uuid } => {
			report(client.cancel_invoice(&CancelInvoiceRequest { uuid }).await?)
		}
		Command::InvoiceList {
			start,
			end,
			offset,
			limit,
		} => {
			let request = InvoiceListRequest {
				start,
				end,
				offset,
				limit,
			};
			report(client.invoice_list(&request).await?)
		}
		Command::InvoiceInfo { uuids } => report(
			client
				.invoice_information(&InvoiceInformationRequest { uuids })
				.await?,
		),
		Command::Balance => report(client.balance().await?),
		Command::Statistics { start, end } => {
			report(client.statistics(&StatisticsRequest { start, end }).await?)
		}
		Command::StaticWallet {
			currency,
			identify,
			shop_id,
		} => {
			let request = StaticWalletRequest {
				shop_id,
				currency,
				identify,
			};
			report(client.static_wallet(&request).await?)
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	init_logging()?;

	let cli = Cli::parse();
	let client_config = match cli.config.as_deref() {
		Some(path) => config::from_file(path)?,
		None => config::from_env()?,
	};
	info!(target: "cli", "Using {:?}", client_config);

	let client = Client::from_config(client_config).context("Failed to create API client")?;
	run(&client, cli.command).await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_date_formats() {
		let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
		assert_eq!(parse_date("09.03.2024"), Ok(expected));
		assert_eq!(parse_date("2024-03-09"), Ok(expected));
		assert!(parse_date("March 9").is_err());
	}

	#[test]
	fn test_parse_currency() {
		assert_eq!(parse_currency("eur"), Ok(CurrencyCode::Eur));
		assert!(parse_currency("XYZ").is_err());
	}

	#[test]
	fn test_cli_parses_subcommands() {
		let cli = Cli::try_parse_from([
			"cryptocloud",
			"invoice-list",
			"--start",
			"01.01.2024",
			"--end",
			"31.01.2024",
			"--limit",
			"10",
		])
		.unwrap();
		assert!(matches!(
			cli.command,
			Command::InvoiceList {
				limit: Some(10),
				offset: None,
				..
			}
		));

		let cli = Cli::try_parse_from(["cryptocloud", "invoice-info", "INV-1", "INV-2"]).unwrap();
		assert!(matches!(cli.command, Command::InvoiceInfo { ref uuids } if uuids.len() == 2));
	}
}
