//! Signer configuration from environment variables.
//!
//! # Environment Variables
//! - `SIGNER_PRIVATE_KEY`: 40-byte key as hex, optional `0x` prefix (required)
//! - `SIGNER_ACCOUNT_INDEX`: account index (required)
//! - `SIGNER_API_KEY_INDEX`: api key index (default: `0`)
//! - `SIGNER_NETWORK`: `mainnet` (default) or `testnet`
//! - `SIGNER_CHAIN_ID`: explicit chain id, overrides the network

use std::fmt;
use std::str::FromStr;

use crate::errors::SignerError;
use crate::transaction::{MAINNET_CHAIN_ID, TESTNET_CHAIN_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub const fn chain_id(self) -> u32 {
        match self {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Testnet => TESTNET_CHAIN_ID,
        }
    }
}

impl FromStr for Network {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(SignerError::Config(format!("unknown network: {other}"))),
        }
    }
}

#[derive(Clone)]
pub struct SignerConfig {
    pub private_key: String,
    pub account_index: i64,
    pub api_key_index: u8,
    pub chain_id: u32,
}

impl SignerConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, SignerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SignerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key = lookup("SIGNER_PRIVATE_KEY")
            .ok_or_else(|| SignerError::Config("SIGNER_PRIVATE_KEY not set".into()))?;

        let account_index = lookup("SIGNER_ACCOUNT_INDEX")
            .ok_or_else(|| SignerError::Config("SIGNER_ACCOUNT_INDEX not set".into()))
            .and_then(|v| parse("SIGNER_ACCOUNT_INDEX", &v))?;

        let api_key_index = match lookup("SIGNER_API_KEY_INDEX") {
            Some(v) => parse("SIGNER_API_KEY_INDEX", &v)?,
            None => 0,
        };

        let network = match lookup("SIGNER_NETWORK") {
            Some(v) => v.parse::<Network>()?,
            None => Network::default(),
        };

        let chain_id = match lookup("SIGNER_CHAIN_ID") {
            Some(v) => parse("SIGNER_CHAIN_ID", &v)?,
            None => network.chain_id(),
        };

        Ok(Self {
            private_key,
            account_index,
            api_key_index,
            chain_id,
        })
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SignerError>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| SignerError::Config(format!("invalid {key} '{value}': {e}")))
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &"[REDACTED]")
            .field("account_index", &self.account_index)
            .field("api_key_index", &self.api_key_index)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}
