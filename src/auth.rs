//! OAuth 1.0a request signing (HMAC-SHA1) for the Twitter/X API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;

use crate::config::TwitterConfig;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters are the only ones left unescaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const NONCE_LEN: usize = 32;

/// Percent-encode a value the way OAuth 1.0a requires (spaces as `%20`).
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Per-request values that must be unique for every signed request.
#[derive(Debug, Clone)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Nonce {
    pub fn generate() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        Self {
            nonce,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

fn oauth_params(creds: &TwitterConfig, nonce: &Nonce) -> Vec<(&'static str, String)> {
    vec![
        ("oauth_consumer_key", creds.consumer_key.clone()),
        ("oauth_nonce", nonce.nonce.clone()),
        ("oauth_signature_method", "HMAC-SHA1".to_string()),
        ("oauth_timestamp", nonce.timestamp.to_string()),
        ("oauth_token", creds.access_token.clone()),
        ("oauth_version", "1.0".to_string()),
    ]
}

/// Build the signature base string.
///
/// `url` must not carry a query string; query and form parameters go in
/// `request_params`.
pub fn signature_base_string(
    creds: &TwitterConfig,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    nonce: &Nonce,
) -> String {
    let mut encoded: Vec<(String, String)> = oauth_params(creds, nonce)
        .into_iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(&v)))
        .chain(
            request_params
                .iter()
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string),
    )
}

/// HMAC-SHA1 signature of a request, base64-encoded.
pub fn sign(
    creds: &TwitterConfig,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    nonce: &Nonce,
) -> String {
    let base = signature_base_string(creds, method, url, request_params, nonce);
    let key = format!(
        "{}&{}",
        percent_encode(&creds.consumer_secret),
        percent_encode(&creds.access_token_secret),
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// `Authorization` header value for a request with an explicit nonce.
pub fn authorization_header_with(
    creds: &TwitterConfig,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    nonce: &Nonce,
) -> String {
    let signature = sign(creds, method, url, request_params, nonce);
    let mut params = oauth_params(creds, nonce);
    params.push(("oauth_signature", signature));
    params.sort();

    let fields = params
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

/// `Authorization` header value for a request, with a fresh nonce.
pub fn authorization_header(
    creds: &TwitterConfig,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
) -> String {
    authorization_header_with(creds, method, url, request_params, &Nonce::generate())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from Twitter's "Creating a signature" guide.
    fn creds() -> TwitterConfig {
        TwitterConfig {
            consumer_key: "xvz1evFS4wEEPTGEFPHBog".into(),
            consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".into(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".into(),
        }
    }

    fn nonce() -> Nonce {
        Nonce {
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".into(),
            timestamp: 1318622958,
        }
    }

    const URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const PARAMS: &[(&str, &str)] = &[
        ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
        ("include_entities", "true"),
    ];

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(percent_encode("#MILvsCLE"), "%23MILvsCLE");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn base_string_matches_reference() {
        let base = signature_base_string(&creds(), "post", URL, PARAMS, &nonce());
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26oauth_version%3D1.0%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn signature_matches_reference() {
        assert_eq!(
            sign(&creds(), "POST", URL, PARAMS, &nonce()),
            "hCtSmYh+iHYCEqBWrE7C7hYmtUk="
        );
    }

    #[test]
    fn header_contains_encoded_signature() {
        let header = authorization_header_with(&creds(), "POST", URL, PARAMS, &nonce());
        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));
    }

    #[test]
    fn generated_nonces_differ() {
        let a = Nonce::generate();
        let b = Nonce::generate();
        assert_eq!(a.nonce.len(), NONCE_LEN);
        assert_ne!(a.nonce, b.nonce);
    }
}
