//! Federated identity payloads and customer ID derivation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use nazsu_core::UserId;

/// Errors decoding a federated ID token.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Token does not have a payload segment.
    #[error("malformed id token")]
    MalformedToken,

    /// Payload segment is not base64url.
    #[error("invalid token encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Payload is not the expected JSON object.
    #[error("invalid token payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Profile claims from a Google sign-in, trusted as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleIdentity {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub email_verified: bool,
}

impl GoogleIdentity {
    /// Decode the claims segment of a JWT.
    ///
    /// The signature is not verified.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the token has no payload segment or the
    /// payload is not base64url-encoded JSON.
    pub fn from_id_token(token: &str) -> Result<Self, IdentityError> {
        let payload = token
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(IdentityError::MalformedToken)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `given_name`, or the first word of `name`.
    #[must_use]
    pub fn first_name(&self) -> String {
        if self.given_name.is_empty() {
            self.name
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            self.given_name.clone()
        }
    }

    /// `family_name`, or every word of `name` after the first.
    #[must_use]
    pub fn last_name(&self) -> String {
        if self.family_name.is_empty() {
            self.name
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            self.family_name.clone()
        }
    }
}

/// Upper-case ASCII letters of `street` with diacritics folded.
///
/// Decomposes to NFD and keeps only base letters. Dotless `ı` has no
/// decomposition, so it is mapped to `i` first.
///
/// ```
/// use nazsu_storefront::services::identity::normalize_street;
///
/// assert_eq!(normalize_street("Atatürk Cad."), "ATATURKCAD");
/// assert_eq!(normalize_street("Çırağan Sk. 4"), "CIRAGANSK");
/// ```
#[must_use]
pub fn normalize_street(street: &str) -> String {
    street
        .chars()
        .map(|c| if c == 'ı' { 'i' } else { c })
        .nfd()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Permanent customer ID for a completed federated sign-up.
///
/// Two customers at the same street, apartment and door get the same ID.
#[must_use]
pub fn derive_customer_id(street: &str, apartment_no: &str, door_no: &str) -> UserId {
    UserId::new(format!(
        "{}{apartment_no}{door_no}",
        normalize_street(street)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token_for(claims: &str) -> String {
        format!(
            "eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl",
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn test_derive_customer_id() {
        assert_eq!(
            derive_customer_id("Atatürk Cad.", "5", "2").as_str(),
            "ATATURKCAD52"
        );
        assert_eq!(
            derive_customer_id("İstiklal Caddesi", "12", "3").as_str(),
            "ISTIKLALCADDESI123"
        );
    }

    #[test]
    fn test_normalize_turkish_letters() {
        assert_eq!(normalize_street("Şişli"), "SISLI");
        assert_eq!(normalize_street("Bağdat Cad."), "BAGDATCAD");
        assert_eq!(normalize_street("Gökçe Öz"), "GOKCEOZ");
        assert_eq!(normalize_street("123 / -"), "");
    }

    #[test]
    fn test_from_id_token() {
        let token = token_for(
            r#"{"email":"zeynep@gmail.com","name":"Zeynep Nur Ak","given_name":"Zeynep","family_name":"Ak","picture":"https://example.com/z.png","email_verified":true,"iss":"accounts.google.com"}"#,
        );
        let identity = GoogleIdentity::from_id_token(&token).unwrap();
        assert_eq!(identity.email, "zeynep@gmail.com");
        assert_eq!(identity.first_name(), "Zeynep");
        assert_eq!(identity.last_name(), "Ak");
        assert!(identity.email_verified);
    }

    #[test]
    fn test_names_fall_back_to_full_name() {
        let identity = GoogleIdentity {
            email: "zeynep@gmail.com".to_string(),
            name: "Zeynep Nur Ak".to_string(),
            ..GoogleIdentity::default()
        };
        assert_eq!(identity.first_name(), "Zeynep");
        assert_eq!(identity.last_name(), "Nur Ak");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(
            GoogleIdentity::from_id_token("no-dots"),
            Err(IdentityError::MalformedToken)
        ));
        assert!(matches!(
            GoogleIdentity::from_id_token("a.!!!.c"),
            Err(IdentityError::Encoding(_))
        ));
        assert!(matches!(
            GoogleIdentity::from_id_token(&token_for("[1,2]")),
            Err(IdentityError::Payload(_))
        ));
    }
}
