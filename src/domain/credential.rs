use std::fmt;

const SCHEME: &str = "Bearer ";

/// Operator-supplied secret, normalized to a full `Authorization` header value.
///
/// The raw value is trimmed and prefixed with `Bearer ` unless the prefix is
/// already present. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential {
    header: String,
}

impl BearerCredential {
    /// Normalize a credential; blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let header = if trimmed.starts_with(SCHEME) {
            trimmed.to_string()
        } else {
            format!("{SCHEME}{trimmed}")
        };

        Some(Self { header })
    }

    pub fn header_value(&self) -> &str {
        &self.header
    }

    /// Length of the secret itself, for diagnostics.
    pub fn secret_len(&self) -> usize {
        self.header.len() - SCHEME.len()
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCredential")
            .field("secret_len", &self.secret_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_scheme_once() {
        let plain = BearerCredential::parse("  s3cret ").expect("credential");
        assert_eq!(plain.header_value(), "Bearer s3cret");
        assert_eq!(plain.secret_len(), 6);

        let prefixed = BearerCredential::parse("Bearer s3cret").expect("credential");
        assert_eq!(prefixed, plain);
    }

    #[test]
    fn blank_values_are_rejected() {
        assert!(BearerCredential::parse("").is_none());
        assert!(BearerCredential::parse("   ").is_none());
    }

    #[test]
    fn debug_hides_secret() {
        let credential = BearerCredential::parse("topsecret").expect("credential");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("secret_len"));
    }
}
