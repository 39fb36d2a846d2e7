//! Transaction payloads and their field-element layouts.
//!
//! Each transaction kind is flattened into a fixed, ordered list of Goldilocks
//! elements and hashed with the Poseidon2 sponge into one Fp5 message hash.
//! The element order is fixed by the exchange and must not change.
//!
//! Small codes and indices are embedded as unsigned 32-bit values. Indices,
//! amounts, nonces and timestamps are embedded as signed 64-bit values:
//! negative numbers use their two's-complement bit pattern, reduced mod p.

use curve::{BaseField, Goldilocks};
use schnorr::hash_to_quintic_extension;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const MAINNET_CHAIN_ID: u32 = 304;
pub const TESTNET_CHAIN_ID: u32 = 300;

/// Request nonce meaning "fetch the next nonce from the provider".
pub const NIL_NONCE: i64 = -1;

/// Expiry applied when a request does not carry one (just under 10 minutes).
pub const DEFAULT_TX_EXPIRY_MS: i64 = 599_000;
pub const DEFAULT_ORDER_EXPIRY_MS: i64 = 28 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxType {
    CreateOrder,
    CancelOrder,
    ModifyOrder,
}

impl TxType {
    pub const fn tag(self) -> u8 {
        match self {
            TxType::CreateOrder => 14,
            TxType::CancelOrder => 15,
            TxType::ModifyOrder => 17,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    Twap,
}

impl OrderType {
    pub const fn code(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::Market => 1,
            OrderType::StopLoss => 2,
            OrderType::StopLossLimit => 3,
            OrderType::TakeProfit => 4,
            OrderType::TakeProfitLimit => 5,
            OrderType::Twap => 6,
        }
    }

    /// Orders that rest until a trigger price is crossed.
    pub const fn is_trigger(self) -> bool {
        matches!(
            self,
            OrderType::StopLoss
                | OrderType::StopLossLimit
                | OrderType::TakeProfit
                | OrderType::TakeProfitLimit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    ImmediateOrCancel,
    #[default]
    GoodTillTime,
    PostOnly,
}

impl TimeInForce {
    pub const fn code(self) -> u8 {
        match self {
            TimeInForce::ImmediateOrCancel => 0,
            TimeInForce::GoodTillTime => 1,
            TimeInForce::PostOnly => 2,
        }
    }
}

/// Default order expiry: immediate orders never rest, so they carry 0.
pub fn default_order_expiry(order_type: OrderType, time_in_force: TimeInForce, now_ms: i64) -> i64 {
    if order_type == OrderType::Market || time_in_force == TimeInForce::ImmediateOrCancel {
        0
    } else {
        now_ms + DEFAULT_ORDER_EXPIRY_MS
    }
}

#[inline]
pub fn unsigned32(value: u32) -> Goldilocks {
    Goldilocks::from_u32(value)
}

#[inline]
pub fn signed64(value: i64) -> Goldilocks {
    Goldilocks::from_i64(value)
}

/// A fully resolved transaction body that can be hashed and signed.
pub trait TxInfo: Serialize {
    const TX_TYPE: TxType;

    fn account_index(&self) -> i64;

    fn api_key_index(&self) -> u8;

    /// Ordered field elements, starting with the chain id and the type tag.
    fn field_elements(&self, chain_id: u32) -> Vec<Goldilocks>;

    fn hash(&self, chain_id: u32) -> BaseField {
        hash_to_quintic_extension(&self.field_elements(chain_id))
    }

    fn set_signature(&mut self, sig: String);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOrderTxInfo {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub client_order_index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub is_ask: u8,
    #[serde(rename = "Type")]
    pub order_type: u8,
    pub time_in_force: u8,
    pub reduce_only: u8,
    pub trigger_price: u32,
    pub order_expiry: i64,
    pub expired_at: i64,
    pub nonce: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl TxInfo for CreateOrderTxInfo {
    const TX_TYPE: TxType = TxType::CreateOrder;

    fn account_index(&self) -> i64 {
        self.account_index
    }

    fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    fn field_elements(&self, chain_id: u32) -> Vec<Goldilocks> {
        vec![
            unsigned32(chain_id),
            unsigned32(Self::TX_TYPE.tag() as u32),
            signed64(self.nonce),
            signed64(self.expired_at),
            signed64(self.account_index),
            unsigned32(self.api_key_index as u32),
            unsigned32(self.market_index as u32),
            signed64(self.client_order_index),
            signed64(self.base_amount),
            unsigned32(self.price),
            unsigned32(self.is_ask as u32),
            unsigned32(self.order_type as u32),
            unsigned32(self.time_in_force as u32),
            unsigned32(self.reduce_only as u32),
            unsigned32(self.trigger_price),
            signed64(self.order_expiry),
        ]
    }

    fn set_signature(&mut self, sig: String) {
        self.sig = Some(sig);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelOrderTxInfo {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub index: i64,
    pub expired_at: i64,
    pub nonce: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl TxInfo for CancelOrderTxInfo {
    const TX_TYPE: TxType = TxType::CancelOrder;

    fn account_index(&self) -> i64 {
        self.account_index
    }

    fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    fn field_elements(&self, chain_id: u32) -> Vec<Goldilocks> {
        vec![
            unsigned32(chain_id),
            unsigned32(Self::TX_TYPE.tag() as u32),
            signed64(self.nonce),
            signed64(self.expired_at),
            signed64(self.account_index),
            unsigned32(self.api_key_index as u32),
            unsigned32(self.market_index as u32),
            signed64(self.index),
        ]
    }

    fn set_signature(&mut self, sig: String) {
        self.sig = Some(sig);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyOrderTxInfo {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub trigger_price: u32,
    pub expired_at: i64,
    pub nonce: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl TxInfo for ModifyOrderTxInfo {
    const TX_TYPE: TxType = TxType::ModifyOrder;

    fn account_index(&self) -> i64 {
        self.account_index
    }

    fn api_key_index(&self) -> u8 {
        self.api_key_index
    }

    fn field_elements(&self, chain_id: u32) -> Vec<Goldilocks> {
        vec![
            unsigned32(chain_id),
            unsigned32(Self::TX_TYPE.tag() as u32),
            signed64(self.nonce),
            signed64(self.expired_at),
            signed64(self.account_index),
            unsigned32(self.api_key_index as u32),
            unsigned32(self.market_index as u32),
            signed64(self.index),
            signed64(self.base_amount),
            unsigned32(self.price),
            unsigned32(self.trigger_price),
        ]
    }

    fn set_signature(&mut self, sig: String) {
        self.sig = Some(sig);
    }
}

/// A create-order request as supplied by the caller.
///
/// `nonce` may be [`NIL_NONCE`]; `expired_at` and `order_expiry` fall back to
/// the defaults when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub client_order_index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub is_ask: bool,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub reduce_only: bool,
    pub trigger_price: u32,
    pub order_expiry: Option<i64>,
    pub nonce: i64,
    pub expired_at: Option<i64>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order_type.is_trigger() && self.trigger_price == 0 {
            return Err(ValidationError::MissingField("TriggerPrice"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderRequest {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub index: i64,
    pub nonce: i64,
    pub expired_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyOrderRequest {
    pub account_index: i64,
    pub api_key_index: u8,
    pub market_index: u8,
    pub index: i64,
    pub base_amount: i64,
    pub price: u32,
    pub trigger_price: u32,
    pub nonce: i64,
    pub expired_at: Option<i64>,
}
