//! Request signing for the merchant API.
//!
//! The upstream verifies every call by recomputing
//! `md5(k1=v1&k2=v2&...<secret>)` over the form parameters sorted by key,
//! so the canonical form below must stay byte-for-byte stable.

use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// Name of the form field carrying the signature.
pub const SIGN_PARAM: &str = "sign";
/// Name of the form field carrying the request time, in seconds since the epoch.
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Computes the signature of a parameter set.
///
/// Any parameter named `sign` is ignored, keys are sorted byte-wise and the secret
/// is appended to the joined string without a separator. The result is the
/// lowercase hex MD5 digest.
///
/// ```rust
/// # use std::collections::HashMap;
/// # use merchant_bot::signing::sign;
/// let params: HashMap<_, _> = [("b", "2"), ("a", "1")].into_iter().collect();
/// // md5("a=1&b=2secret")
/// assert_eq!(sign(&params, "secret").len(), 32);
/// ```
pub fn sign<'a, I, K, V>(params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: AsRef<str> + ?Sized + 'a,
    V: AsRef<str> + ?Sized + 'a,
{
    let mut pairs: Vec<(&str, &str)> = params
        .into_iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .filter(|(k, _)| *k != SIGN_PARAM)
        .collect();
    pairs.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let mut canonical = String::new();
    for (i, (k, v)) in pairs.into_iter().enumerate() {
        if i > 0 {
            canonical.push('&');
        }
        canonical.push_str(k);
        canonical.push('=');
        canonical.push_str(v);
    }
    canonical.push_str(secret);

    hex::encode(Md5::digest(canonical.as_bytes()))
}

/// Stamps `params` with the given `timestamp` and attaches the resulting signature.
///
/// A stale `sign` entry already present in `params` is replaced.
pub fn attach_signature(params: &mut BTreeMap<String, String>, secret: &str, timestamp: i64) {
    params.insert(TIMESTAMP_PARAM.to_string(), timestamp.to_string());
    let signature = sign(params.iter(), secret);
    params.insert(SIGN_PARAM.to_string(), signature);
}
