//! Cache Key Module
//!
//! Derives fixed-length content fingerprints from call arguments.
//!
//! Arguments are converted to `serde_json::Value`, named arguments are kept
//! in a `BTreeMap` so their order never matters, and the canonical JSON text
//! is hashed with SHA-256. Two argument sets map to the same key exactly when
//! their JSON forms are equal, so `1` and `1.0` are different arguments.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::cache::finite::ensure_finite;
use crate::error::{CacheError, Result};

// == Cache Key ==
/// Hex-encoded SHA-256 fingerprint of a call's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Length of every key in characters.
    pub const LEN: usize = 64;

    /// Parses an externally supplied key, e.g. from an invalidation request.
    pub fn parse(raw: &str) -> Result<Self> {
        let well_formed = raw.len() == Self::LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(CacheError::InvalidRequest(format!(
                "Cache key must be {} lowercase hex characters",
                Self::LEN
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_digest(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Key Derivation ==
/// Fingerprints positional and named arguments.
///
/// Pure and deterministic; never touches cache state.
pub fn derive_key(args: &[Value], kwargs: &BTreeMap<String, Value>) -> CacheKey {
    fingerprint(None, args, kwargs)
}

fn fingerprint(scope: Option<&str>, args: &[Value], kwargs: &BTreeMap<String, Value>) -> CacheKey {
    let mut canonical = String::new();

    canonical.push_str(&Value::from(scope).to_string());
    canonical.push('\n');

    canonical.push('[');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            canonical.push(',');
        }
        canonical.push_str(&arg.to_string());
    }
    canonical.push(']');
    canonical.push('\n');

    canonical.push('{');
    for (i, (name, value)) in kwargs.iter().enumerate() {
        if i > 0 {
            canonical.push(',');
        }
        canonical.push_str(&Value::from(name.as_str()).to_string());
        canonical.push(':');
        canonical.push_str(&value.to_string());
    }
    canonical.push('}');

    let digest = Sha256::digest(canonical.as_bytes());
    CacheKey::from_digest(&digest)
}

/// Converts one argument to its canonical JSON form.
///
/// Non-finite floats are rejected: JSON has no spelling for them and
/// `serde_json` would silently write `null`.
fn to_argument<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    ensure_finite(value)?;
    Ok(serde_json::to_value(value)?)
}

// == Call Arguments ==
/// The arguments of one call to a memoized function.
///
/// ```
/// use memo_cache::cache::CallArgs;
///
/// let a = CallArgs::new().arg("AAPL")?.named("years", &5)?.named("adjusted", &true)?;
/// let b = CallArgs::new().arg("AAPL")?.named("adjusted", &true)?.named("years", &5)?;
/// assert_eq!(a.derive_key(), b.derive_key());
/// # Ok::<(), memo_cache::error::CacheError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    scope: Option<String>,
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.positional.push(to_argument(value)?);
        Ok(self)
    }

    /// Sets a named argument, replacing any earlier value under that name.
    pub fn named<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Result<Self> {
        self.named.insert(name.into(), to_argument(value)?);
        Ok(self)
    }

    /// Namespaces the key, so equal arguments to different functions differ.
    pub fn scoped(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_args(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Fingerprints these arguments.
    pub fn derive_key(&self) -> CacheKey {
        fingerprint(self.scope.as_deref(), &self.positional, &self.named)
    }
}
