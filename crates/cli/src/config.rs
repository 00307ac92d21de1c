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

use anyhow::{Context, Result};
use cryptocloud_sdk::ClientConfig;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "cli";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Client configuration constants
/// Prefix of the environment variables holding client settings
/// (CRYPTOCLOUD_API_KEY, CRYPTOCLOUD_SHOP_ID, CRYPTOCLOUD_BASE_URL, CRYPTOCLOUD_TIMEOUT_MS)
pub const ENV_PREFIX: &str = "CRYPTOCLOUD";

/// Load client configuration from the environment (and `.env`)
pub fn from_env() -> Result<ClientConfig> {
	dotenv::dotenv().ok();

	let cfg = config::Config::builder()
		.add_source(config::Environment::with_prefix(ENV_PREFIX))
		.build()
		.context("Failed to read client configuration from environment")?;

	cfg.try_deserialize()
		.with_context(|| format!("Missing or invalid {}_* settings", ENV_PREFIX))
}

/// Load client configuration from file, with environment variables on top
pub fn from_file(path: &str) -> Result<ClientConfig> {
	dotenv::dotenv().ok();

	let cfg = config::Config::builder()
		.add_source(config::File::with_name(path))
		.add_source(config::Environment::with_prefix(ENV_PREFIX))
		.build()
		.with_context(|| format!("Failed to load configuration file: {}", path))?;

	cfg.try_deserialize()
		.with_context(|| format!("Invalid client configuration in {}", path))
}
