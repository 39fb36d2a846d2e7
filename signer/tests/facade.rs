use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use curve::{RandomField, ScalarField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use signer::{
    CancelOrderRequest, Clock, CreateOrderRequest, LocalNonceCounter, NonceProvider, OrderType,
    ProviderError, ScalarSampler, SignerError, TimeInForce, TxSigner, ValidationError,
    MAINNET_CHAIN_ID, NIL_NONCE,
};

const KEY: &str = "0x825ed9fde4a049e5eb4a0a31dd3cc53ac657e4e0171f44ae1224ad301f8e51af5c4bbcafa28e1b55";
const NOW_MS: i64 = 1_700_000_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[derive(Clone, Default)]
struct CountingSampler(Arc<AtomicUsize>);

impl ScalarSampler for CountingSampler {
    fn sample_scalar(&self) -> ScalarField {
        let n = self.0.fetch_add(1, Ordering::SeqCst) as u64;
        ScalarField::random(&mut StdRng::seed_from_u64(n))
    }
}

#[derive(Clone, Default)]
struct CountingNonces(Arc<AtomicUsize>);

impl NonceProvider for CountingNonces {
    fn next_nonce(&self, _account_index: i64, _api_key_index: u8) -> Result<i64, ProviderError> {
        Ok(100 + self.0.fetch_add(1, Ordering::SeqCst) as i64)
    }
}

struct FailingNonces;

impl NonceProvider for FailingNonces {
    fn next_nonce(&self, _account_index: i64, _api_key_index: u8) -> Result<i64, ProviderError> {
        Err("nonce endpoint unavailable".into())
    }
}

fn limit_order(order_type: OrderType, time_in_force: TimeInForce) -> CreateOrderRequest {
    CreateOrderRequest {
        account_index: 7,
        api_key_index: 2,
        market_index: 0,
        client_order_index: 11,
        base_amount: 250,
        price: 31_000,
        is_ask: true,
        order_type,
        time_in_force,
        reduce_only: false,
        trigger_price: 0,
        order_expiry: None,
        nonce: NIL_NONCE,
        expired_at: None,
    }
}

fn signer() -> TxSigner {
    TxSigner::new(KEY, 7, 2, MAINNET_CHAIN_ID)
        .unwrap()
        .with_clock(FixedClock(NOW_MS))
}

#[test]
fn test_rejects_bad_private_key() {
    let err = TxSigner::new("0x1234", 1, 0, MAINNET_CHAIN_ID).unwrap_err();
    assert!(matches!(
        err,
        SignerError::Validation(ValidationError::PrivateKey(_))
    ));

    let err = TxSigner::new(&"g".repeat(80), 1, 0, MAINNET_CHAIN_ID).unwrap_err();
    assert!(matches!(
        err,
        SignerError::Validation(ValidationError::PrivateKey(_))
    ));
}

#[test]
fn test_identity_mismatch_runs_no_crypto() {
    let samples = CountingSampler::default();
    let nonces = CountingNonces::default();
    let signer = signer()
        .with_scalar_sampler(samples.clone())
        .with_nonce_provider(nonces.clone());

    let mut wrong_account = limit_order(OrderType::Limit, TimeInForce::GoodTillTime);
    wrong_account.account_index = 8;
    assert!(matches!(
        signer.sign_create_order(&wrong_account),
        Err(SignerError::Validation(ValidationError::AccountMismatch {
            expected: 7,
            actual: 8
        }))
    ));

    let wrong_key = CancelOrderRequest {
        account_index: 7,
        api_key_index: 3,
        market_index: 0,
        index: 1,
        nonce: NIL_NONCE,
        expired_at: None,
    };
    assert!(matches!(
        signer.sign_cancel_order(&wrong_key),
        Err(SignerError::Validation(ValidationError::ApiKeyMismatch {
            expected: 2,
            actual: 3
        }))
    ));

    assert_eq!(samples.0.load(Ordering::SeqCst), 0);
    assert_eq!(nonces.0.load(Ordering::SeqCst), 0);
}

#[test]
fn test_defaults_are_filled_in() {
    let signer = signer().with_nonce_provider(LocalNonceCounter::with_nonce(41));

    let limit = signer
        .sign_create_order(&limit_order(OrderType::Limit, TimeInForce::GoodTillTime))
        .unwrap();
    assert_eq!(limit.tx_info["Nonce"], 41);
    assert_eq!(limit.tx_info["ExpiredAt"], NOW_MS + 599_000);
    assert_eq!(limit.tx_info["OrderExpiry"], NOW_MS + 28 * 24 * 3600 * 1000);

    let market = signer
        .sign_create_order(&limit_order(OrderType::Market, TimeInForce::GoodTillTime))
        .unwrap();
    assert_eq!(market.tx_info["Nonce"], 42);
    assert_eq!(market.tx_info["OrderExpiry"], 0);

    let ioc = signer
        .sign_create_order(&limit_order(OrderType::Limit, TimeInForce::ImmediateOrCancel))
        .unwrap();
    assert_eq!(ioc.tx_info["OrderExpiry"], 0);
}

#[test]
fn test_explicit_nonce_skips_provider() {
    let nonces = CountingNonces::default();
    let signer = signer().with_nonce_provider(nonces.clone());

    let mut request = limit_order(OrderType::Limit, TimeInForce::PostOnly);
    request.nonce = 0;
    let signed = signer.sign_create_order(&request).unwrap();
    assert_eq!(signed.tx_info["Nonce"], 0);
    assert_eq!(nonces.0.load(Ordering::SeqCst), 0);

    request.nonce = NIL_NONCE;
    let signed = signer.sign_create_order(&request).unwrap();
    assert_eq!(signed.tx_info["Nonce"], 100);
}

#[test]
fn test_nonce_provider_failure_propagates() {
    let failing = signer().with_nonce_provider(FailingNonces);
    let err = failing
        .sign_create_order(&limit_order(OrderType::Limit, TimeInForce::GoodTillTime))
        .unwrap_err();
    match err {
        SignerError::NonceProvider(source) => {
            assert_eq!(source.to_string(), "nonce endpoint unavailable")
        }
        other => panic!("unexpected error: {other}"),
    }

    // An unseeded local counter is a provider failure too.
    let err = signer()
        .sign_create_order(&limit_order(OrderType::Limit, TimeInForce::GoodTillTime))
        .unwrap_err();
    assert!(matches!(err, SignerError::NonceProvider(_)));
}

#[test]
fn test_trigger_order_needs_trigger_price() {
    let signer = signer().with_nonce_provider(LocalNonceCounter::with_nonce(1));
    let err = signer
        .sign_create_order(&limit_order(OrderType::TakeProfit, TimeInForce::ImmediateOrCancel))
        .unwrap_err();
    assert!(matches!(
        err,
        SignerError::Validation(ValidationError::MissingField("TriggerPrice"))
    ));
}

#[test]
fn test_fresh_nonces_give_distinct_valid_signatures() {
    let signer = signer();
    let request = CancelOrderRequest {
        account_index: 7,
        api_key_index: 2,
        market_index: 1,
        index: 99,
        nonce: 3,
        expired_at: Some(NOW_MS + 1000),
    };

    let first = signer.sign_cancel_order(&request).unwrap();
    let second = signer.sign_cancel_order(&request).unwrap();
    assert_eq!(first.tx_hash, second.tx_hash);
    assert_ne!(first.signature, second.signature);
}

#[test]
fn test_default_auth_deadline() {
    let token = signer().create_auth_token(None).unwrap();
    let parts: Vec<&str> = token.split(':').collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], (NOW_MS / 1000 + 7 * 3600).to_string());
    assert_eq!(parts[1], "7");
    assert_eq!(parts[2], "2");
    assert_eq!(parts[3].len(), 160);
}

#[test]
fn test_signed_transaction_json() {
    let signed = signer()
        .sign_cancel_order(&CancelOrderRequest {
            account_index: 7,
            api_key_index: 2,
            market_index: 1,
            index: 5,
            nonce: 4,
            expired_at: None,
        })
        .unwrap();

    let json = serde_json::to_value(&signed).unwrap();
    assert_eq!(json["tx_type"], 15);
    assert_eq!(json["tx_hash"], signed.tx_hash);
    assert_eq!(json["signature"], signed.signature);
    assert_eq!(json["tx_info"]["MarketIndex"], 1);

    let debug = format!("{:?}", signer());
    assert!(!debug.contains("825ed9"));
}
