//! Collaborators consumed by the signer: nonce source, clock and the
//! per-signature scalar sampler.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use curve::{RandomField, ScalarField};
use thiserror::Error;

/// Error type returned by external collaborators.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Source of protocol nonces, usually backed by a network call.
pub trait NonceProvider: Send + Sync {
    fn next_nonce(&self, account_index: i64, api_key_index: u8) -> Result<i64, ProviderError>;
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;

    fn now_seconds(&self) -> i64 {
        self.now_millis() / 1000
    }
}

/// Source of signature nonces `k`. Must be cryptographically secure.
pub trait ScalarSampler: Send + Sync {
    fn sample_scalar(&self) -> ScalarField;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Samples from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsScalarSampler;

impl ScalarSampler for OsScalarSampler {
    fn sample_scalar(&self) -> ScalarField {
        ScalarField::random(&mut rand::rng())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceCounterError {
    #[error("nonce counter is not initialised")]
    Uninitialised,

    #[error("no acquired nonce to roll back")]
    NothingToRollBack,
}

const UNINITIALISED: i64 = -1;

/// Optimistic in-process nonce counter.
///
/// Hands out consecutive nonces without a network round-trip once seeded with
/// [`set_nonce`](Self::set_nonce). A rejected transaction can return its nonce
/// with [`rollback`](Self::rollback).
#[derive(Debug)]
pub struct LocalNonceCounter {
    next: AtomicI64,
}

impl LocalNonceCounter {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(UNINITIALISED),
        }
    }

    pub fn with_nonce(nonce: i64) -> Self {
        let counter = Self::new();
        counter.set_nonce(nonce);
        counter
    }

    /// Sets the next nonce to hand out. Negative values reset the counter.
    pub fn set_nonce(&self, nonce: i64) {
        let value = if nonce < 0 { UNINITIALISED } else { nonce };
        self.next.store(value, Ordering::SeqCst);
    }

    pub fn is_initialised(&self) -> bool {
        self.next.load(Ordering::SeqCst) >= 0
    }

    pub fn acquire(&self) -> Result<i64, NonceCounterError> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n >= 0).then_some(n + 1)
            })
            .map_err(|_| NonceCounterError::Uninitialised)
    }

    /// Gives back the most recently acquired nonce and returns it.
    ///
    /// The counter is left untouched when it is unseeded or already at zero.
    pub fn rollback(&self) -> Result<i64, NonceCounterError> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n > 0).then_some(n - 1)
            })
            .map(|n| n - 1)
            .map_err(|n| {
                if n < 0 {
                    NonceCounterError::Uninitialised
                } else {
                    NonceCounterError::NothingToRollBack
                }
            })
    }
}

impl Default for LocalNonceCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for LocalNonceCounter {
    fn next_nonce(&self, _account_index: i64, _api_key_index: u8) -> Result<i64, ProviderError> {
        Ok(self.acquire()?)
    }
}
