//! Shared hospital alert password.
//!
//! Only the SHA-256 digest of the configured password is retained. Candidate
//! passwords are hashed the same way and the digests compared in constant
//! time, so timing reveals neither the secret length nor the position of the
//! first mismatch.

use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type SecretDigest = Zeroizing<[u8; 32]>;

fn digest(value: &str) -> SecretDigest {
    Zeroizing::new(Sha256::digest(value.as_bytes()).into())
}

/// Alert password loaded once at startup.
///
/// # Examples
/// ```
/// use bloodlink::domain::AlertSecret;
///
/// let secret = AlertSecret::new("letmein").expect("non-empty secret");
/// assert!(secret.verify("letmein"));
/// assert!(!secret.verify("LetMeIn"));
/// assert!(AlertSecret::new("").is_none());
/// ```
#[derive(Clone)]
pub struct AlertSecret {
    digest: SecretDigest,
}

impl AlertSecret {
    /// Wrap a configured password. Empty input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            digest: digest(raw),
        })
    }

    /// Compare a caller-supplied password with the configured one.
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = digest(candidate);
        self.digest.as_slice().ct_eq(candidate.as_slice()).into()
    }
}

impl fmt::Debug for AlertSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AlertSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Verification and redaction.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hunter2", true)]
    #[case("hunter3", false)]
    #[case("hunter2 ", false)]
    #[case("hunter2hunter2hunter2hunter2hunter2", false)]
    #[case("", false)]
    fn verifies_exact_matches(#[case] candidate: &str, #[case] expected: bool) {
        let secret = AlertSecret::new("hunter2").expect("non-empty");
        assert_eq!(secret.verify(candidate), expected);
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = AlertSecret::new("hunter2").expect("non-empty");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
