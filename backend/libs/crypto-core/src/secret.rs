//! Signing secret strength checks
//!
//! HS256 is only as strong as its shared secret. Services call
//! [`assess_secret`] at startup and report weak secrets; nothing here rejects
//! a secret outright.

const MIN_SECRET_LENGTH: usize = 32; // 256 bits
const RECOMMENDED_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_BYTE: f64 = 4.0;
const STRONG_ENTROPY_BITS_PER_BYTE: f64 = 5.0;

/// Strength classification of a signing secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStrength {
    Weak(WeakSecretReason),
    Acceptable,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakSecretReason {
    TooShort,
    LowEntropy,
    ObviousPattern,
}

impl std::fmt::Display for WeakSecretReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeakSecretReason::TooShort => {
                write!(f, "shorter than {MIN_SECRET_LENGTH} bytes")
            }
            WeakSecretReason::LowEntropy => write!(f, "low entropy"),
            WeakSecretReason::ObviousPattern => write!(f, "repeating or sequential characters"),
        }
    }
}

impl SecretStrength {
    pub fn is_weak(&self) -> bool {
        matches!(self, SecretStrength::Weak(_))
    }
}

/// Classify a secret by length, Shannon entropy and obvious patterns
pub fn assess_secret(secret: &str) -> SecretStrength {
    let bytes = secret.as_bytes();

    if bytes.len() < MIN_SECRET_LENGTH {
        return SecretStrength::Weak(WeakSecretReason::TooShort);
    }

    let entropy = shannon_entropy(bytes);
    if entropy < MIN_ENTROPY_BITS_PER_BYTE {
        return SecretStrength::Weak(WeakSecretReason::LowEntropy);
    }

    if has_obvious_patterns(bytes) {
        return SecretStrength::Weak(WeakSecretReason::ObviousPattern);
    }

    if bytes.len() >= RECOMMENDED_SECRET_LENGTH && entropy >= STRONG_ENTROPY_BITS_PER_BYTE {
        SecretStrength::Strong
    } else {
        SecretStrength::Acceptable
    }
}

/// Bits per byte, 0..=8
fn shannon_entropy(data: &[u8]) -> f64 {
    let mut freq = [0u32; 256];
    for &byte in data {
        freq[byte as usize] += 1;
    }

    let len = data.len() as f64;
    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = f64::from(count) / len;
            -p * p.log2()
        })
        .sum()
}

/// Four or more repeated ("aaaa") or ascending ("1234") bytes in a row
fn has_obvious_patterns(data: &[u8]) -> bool {
    let mut same = 1;
    let mut ascending = 1;

    for window in data.windows(2) {
        same = if window[0] == window[1] { same + 1 } else { 1 };
        ascending = if i16::from(window[1]) - i16::from(window[0]) == 1 {
            ascending + 1
        } else {
            1
        };

        if same >= 4 || ascending >= 4 {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_is_weak() {
        assert_eq!(
            assess_secret("TEST_SECRET_KEY"),
            SecretStrength::Weak(WeakSecretReason::TooShort)
        );
    }

    #[test]
    fn test_low_entropy_secret_is_weak() {
        assert_eq!(
            assess_secret("abababababababababababababababab"),
            SecretStrength::Weak(WeakSecretReason::LowEntropy)
        );
    }

    #[test]
    fn test_sequential_secret_is_weak() {
        assert_eq!(
            assess_secret("abcdefghijklmnopqrstuvwxyzabcdef"),
            SecretStrength::Weak(WeakSecretReason::ObviousPattern)
        );
    }

    #[test]
    fn test_acceptable_secret() {
        let strength = assess_secret("J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W");
        assert_eq!(strength, SecretStrength::Acceptable);
        assert!(!strength.is_weak());
    }

    #[test]
    fn test_strong_secret() {
        assert_eq!(
            assess_secret("y9K$mP2vRx#TnZ@s4Yw!cGf7Dh&e3Xa6Wq8Lj5BtNu1Zp0MkYhVgCxFbAsSdQwEr"),
            SecretStrength::Strong
        );
    }

    #[test]
    fn test_entropy_bounds() {
        assert!(shannon_entropy(&[b'a'; 100]) < 0.1);

        let uniform: Vec<u8> = (0..=255).collect();
        assert!(shannon_entropy(&uniform) > 7.5);
    }
}
