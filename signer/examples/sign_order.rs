//! Signs a limit order and an auth token with the key from the environment.
//!
//! ```text
//! SIGNER_PRIVATE_KEY=0x... SIGNER_ACCOUNT_INDEX=1 SIGNER_NETWORK=testnet \
//!     LOG_FORMAT=pretty cargo run -p signer --example sign_order
//! ```

use signer::{
    init_logging, CreateOrderRequest, LocalNonceCounter, OrderType, SignerConfig, TimeInForce,
    TxSigner, NIL_NONCE,
};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = SignerConfig::from_env()?;
    info!(config = ?config, "Loaded signer configuration");

    let signer = TxSigner::from_config(&config)?.with_nonce_provider(LocalNonceCounter::with_nonce(0));
    info!(public_key = %signer.public_key_hex(), "Signer ready");

    let signed = signer.sign_create_order(&CreateOrderRequest {
        account_index: config.account_index,
        api_key_index: config.api_key_index,
        market_index: 0,
        client_order_index: 1,
        base_amount: 1000,
        price: 500_000,
        is_ask: false,
        order_type: OrderType::Limit,
        time_in_force: TimeInForce::GoodTillTime,
        reduce_only: false,
        trigger_price: 0,
        order_expiry: None,
        nonce: NIL_NONCE,
        expired_at: None,
    })?;
    println!("{}", serde_json::to_string_pretty(&signed)?);

    let token = signer.create_auth_token(None)?;
    println!("auth token: {token}");

    Ok(())
}
