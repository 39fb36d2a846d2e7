//! Exchange transaction signing on top of the Fp5 Schnorr scheme.
//!
//! [`TxSigner`] turns create, cancel and modify order requests into signed
//! payloads and issues auth tokens. The nonce source, the clock and the
//! signature-nonce sampler are injected, so tests can pin every input.
//!
//! ```
//! use signer::{CancelOrderRequest, TxSigner, TESTNET_CHAIN_ID};
//!
//! let key = "11".repeat(40);
//! let signer = TxSigner::new(&key, 1, 0, TESTNET_CHAIN_ID).unwrap();
//!
//! let signed = signer
//!     .sign_cancel_order(&CancelOrderRequest {
//!         account_index: 1,
//!         api_key_index: 0,
//!         market_index: 2,
//!         index: 123456,
//!         nonce: 8,
//!         expired_at: None,
//!     })
//!     .unwrap();
//! assert_eq!(signed.tx_type, 15);
//! assert_eq!(signed.tx_info["Sig"], signed.signature);
//! ```

pub mod auth;
pub mod config;
pub mod errors;
pub mod facade;
pub mod logging;
pub mod providers;
pub mod transaction;

pub use config::{Network, SignerConfig};
pub use errors::{Result, SignerError, ValidationError};
pub use facade::{SignedTransaction, TxSigner};
pub use logging::init_logging;
pub use providers::{
    Clock, LocalNonceCounter, NonceCounterError, NonceProvider, OsScalarSampler, ProviderError,
    ScalarSampler, SystemClock,
};
pub use transaction::{
    CancelOrderRequest, CancelOrderTxInfo, CreateOrderRequest, CreateOrderTxInfo,
    ModifyOrderRequest, ModifyOrderTxInfo, OrderType, TimeInForce, TxInfo, TxType,
    MAINNET_CHAIN_ID, NIL_NONCE, TESTNET_CHAIN_ID,
};
