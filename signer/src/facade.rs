//! Transaction signing facade.
//!
//! `TxSigner` validates a request against its configured identity, fills in
//! the nonce and expiry defaults, hashes the resolved transaction and signs it.
//! A call either returns a complete [`SignedTransaction`] or an error.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use curve::BaseField;
use schnorr::{Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{auth_message, auth_message_hash, DEFAULT_AUTH_LIFETIME_SECS};
use crate::config::SignerConfig;
use crate::errors::{Result, SignerError, ValidationError};
use crate::providers::{
    Clock, LocalNonceCounter, NonceProvider, OsScalarSampler, ScalarSampler, SystemClock,
};
use crate::transaction::{
    default_order_expiry, CancelOrderRequest, CancelOrderTxInfo, CreateOrderRequest,
    CreateOrderTxInfo, ModifyOrderRequest, ModifyOrderTxInfo, TxInfo, DEFAULT_TX_EXPIRY_MS,
};

/// A signed transaction ready to be submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub tx_type: u8,
    /// Transaction body with exchange field names, including `Sig`.
    pub tx_info: serde_json::Value,
    /// Hex of the 40-byte little-endian message hash.
    pub tx_hash: String,
    /// Base64 of the 80-byte signature.
    pub signature: String,
}

pub struct TxSigner {
    key: SigningKey,
    public_key: VerifyingKey,
    account_index: i64,
    api_key_index: u8,
    chain_id: u32,
    nonce_provider: Box<dyn NonceProvider>,
    clock: Box<dyn Clock>,
    sampler: Box<dyn ScalarSampler>,
}

impl TxSigner {
    /// Creates a signer with the system clock, the OS sampler and an
    /// uninitialised [`LocalNonceCounter`].
    pub fn new(
        private_key_hex: &str,
        account_index: i64,
        api_key_index: u8,
        chain_id: u32,
    ) -> Result<Self> {
        let key = SigningKey::from_hex(private_key_hex).map_err(ValidationError::PrivateKey)?;

        Ok(Self {
            public_key: key.verifying_key(),
            key,
            account_index,
            api_key_index,
            chain_id,
            nonce_provider: Box::new(LocalNonceCounter::new()),
            clock: Box::new(SystemClock),
            sampler: Box::new(OsScalarSampler),
        })
    }

    pub fn from_config(config: &SignerConfig) -> Result<Self> {
        Self::new(
            &config.private_key,
            config.account_index,
            config.api_key_index,
            config.chain_id,
        )
    }

    pub fn with_nonce_provider(mut self, provider: impl NonceProvider + 'static) -> Self {
        self.nonce_provider = Box::new(provider);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_scalar_sampler(mut self, sampler: impl ScalarSampler + 'static) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn account_index(&self) -> i64 {
        self.account_index
    }

    pub fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    pub fn chain_id(&self) -> u32 {
        self.chain_id
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.public_key
    }

    /// `0x`-prefixed hex of the encoded public key.
    pub fn public_key_hex(&self) -> String {
        self.public_key.to_prefixed_hex()
    }

    pub fn sign_create_order(&self, request: &CreateOrderRequest) -> Result<SignedTransaction> {
        self.check_identity(request.account_index, request.api_key_index)?;
        request.validate()?;

        let now = self.clock.now_millis();
        let nonce = self.resolve_nonce(request.nonce)?;
        let expired_at = request.expired_at.unwrap_or(now + DEFAULT_TX_EXPIRY_MS);
        let order_expiry = request
            .order_expiry
            .unwrap_or_else(|| default_order_expiry(request.order_type, request.time_in_force, now));
        debug!(nonce, expired_at, order_expiry, "Resolved create order defaults");

        self.sign_tx(CreateOrderTxInfo {
            account_index: request.account_index,
            api_key_index: request.api_key_index,
            market_index: request.market_index,
            client_order_index: request.client_order_index,
            base_amount: request.base_amount,
            price: request.price,
            is_ask: request.is_ask as u8,
            order_type: request.order_type.code(),
            time_in_force: request.time_in_force.code(),
            reduce_only: request.reduce_only as u8,
            trigger_price: request.trigger_price,
            order_expiry,
            expired_at,
            nonce,
            sig: None,
        })
    }

    pub fn sign_cancel_order(&self, request: &CancelOrderRequest) -> Result<SignedTransaction> {
        self.check_identity(request.account_index, request.api_key_index)?;

        let nonce = self.resolve_nonce(request.nonce)?;
        let expired_at = self.resolve_expiry(request.expired_at);
        debug!(nonce, expired_at, "Resolved cancel order defaults");

        self.sign_tx(CancelOrderTxInfo {
            account_index: request.account_index,
            api_key_index: request.api_key_index,
            market_index: request.market_index,
            index: request.index,
            expired_at,
            nonce,
            sig: None,
        })
    }

    pub fn sign_modify_order(&self, request: &ModifyOrderRequest) -> Result<SignedTransaction> {
        self.check_identity(request.account_index, request.api_key_index)?;

        let nonce = self.resolve_nonce(request.nonce)?;
        let expired_at = self.resolve_expiry(request.expired_at);
        debug!(nonce, expired_at, "Resolved modify order defaults");

        self.sign_tx(ModifyOrderTxInfo {
            account_index: request.account_index,
            api_key_index: request.api_key_index,
            market_index: request.market_index,
            index: request.index,
            base_amount: request.base_amount,
            price: request.price,
            trigger_price: request.trigger_price,
            expired_at,
            nonce,
            sig: None,
        })
    }

    /// Returns `"{deadline}:{account}:{api_key}:{signature_hex}"`.
    ///
    /// `deadline` is in seconds and defaults to seven hours from now.
    pub fn create_auth_token(&self, deadline: Option<i64>) -> Result<String> {
        let deadline =
            deadline.unwrap_or_else(|| self.clock.now_seconds() + DEFAULT_AUTH_LIFETIME_SECS);
        let message = auth_message(deadline, self.account_index, self.api_key_index);

        let signature = self.sign_message_hash(&auth_message_hash(&message))?;
        debug!(deadline, "Created auth token");

        Ok(format!("{message}:{}", signature.to_hex()))
    }

    /// Signs a precomputed Fp5 message hash with a freshly sampled nonce.
    pub fn sign_message_hash(&self, hash: &BaseField) -> Result<Signature> {
        let nonce = self.sampler.sample_scalar();
        Ok(self.key.sign_with_nonce(hash, &nonce)?)
    }

    fn check_identity(&self, account_index: i64, api_key_index: u8) -> Result<()> {
        if account_index != self.account_index {
            warn!(
                expected = self.account_index,
                actual = account_index,
                "Account index mismatch"
            );
            return Err(ValidationError::AccountMismatch {
                expected: self.account_index,
                actual: account_index,
            }
            .into());
        }
        if api_key_index != self.api_key_index {
            warn!(
                expected = self.api_key_index,
                actual = api_key_index,
                "Api key index mismatch"
            );
            return Err(ValidationError::ApiKeyMismatch {
                expected: self.api_key_index,
                actual: api_key_index,
            }
            .into());
        }
        Ok(())
    }

    /// Negative nonces are fetched from the provider.
    fn resolve_nonce(&self, nonce: i64) -> Result<i64> {
        if nonce >= 0 {
            return Ok(nonce);
        }
        self.nonce_provider
            .next_nonce(self.account_index, self.api_key_index)
            .map_err(SignerError::NonceProvider)
    }

    fn resolve_expiry(&self, expired_at: Option<i64>) -> i64 {
        expired_at.unwrap_or_else(|| self.clock.now_millis() + DEFAULT_TX_EXPIRY_MS)
    }

    fn sign_tx<T: TxInfo>(&self, mut tx: T) -> Result<SignedTransaction> {
        let hash = tx.hash(self.chain_id);
        let tx_hash = hex::encode(hash.to_bytes_le());
        debug!(tx_hash = %tx_hash, "Hashed transaction");

        let signature = BASE64.encode(self.sign_message_hash(&hash)?.to_bytes());
        tx.set_signature(signature.clone());
        let tx_info = serde_json::to_value(&tx)?;

        info!(
            tx_type = T::TX_TYPE.tag(),
            account_index = self.account_index,
            tx_hash = %tx_hash,
            "Transaction signed"
        );

        Ok(SignedTransaction {
            tx_type: T::TX_TYPE.tag(),
            tx_info,
            tx_hash,
            signature,
        })
    }
}

impl fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxSigner")
            .field("public_key", &self.public_key_hex())
            .field("account_index", &self.account_index)
            .field("api_key_index", &self.api_key_index)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
