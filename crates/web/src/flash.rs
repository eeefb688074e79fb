//! One-shot notices carried across a redirect in a signed cookie.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const FLASH_COOKIE: &str = "slidegen_flash";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Error,
}

impl FlashCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A notice shown once on the next form render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

/// Signs and verifies the flash cookie with HMAC-SHA256.
///
/// Cookie value: `base64url(json) "." base64url(mac)`.
#[derive(Clone)]
pub struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    pub fn new(secret_key: &str) -> Self {
        Self {
            mac: keyed_mac(secret_key.as_bytes()),
        }
    }

    pub fn encode(&self, flashes: &[Flash]) -> String {
        let json = serde_json::to_vec(flashes).unwrap_or_default();
        let mut mac = self.mac.clone();
        mac.update(&json);
        let tag = mac.finalize().into_bytes();
        format!("{}.{}", URL_SAFE_NO_PAD.encode(&json), URL_SAFE_NO_PAD.encode(tag))
    }

    /// Decode a cookie value; `None` when malformed or not signed by us.
    pub fn decode(&self, value: &str) -> Option<Vec<Flash>> {
        let (payload, tag) = value.split_once('.')?;
        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;

        let mut mac = self.mac.clone();
        mac.update(&json);
        mac.verify_slice(&tag).ok()?;

        serde_json::from_slice(&json).ok()
    }

    /// Pending notices from the request's cookies. Tampered cookies are dropped.
    pub fn read(&self, headers: &HeaderMap) -> Vec<Flash> {
        let Some(value) = cookie_value(headers, FLASH_COOKIE) else {
            return Vec::new();
        };
        match self.decode(value) {
            Some(flashes) => flashes,
            None => {
                log::warn!("Ignoring flash cookie with a bad signature");
                Vec::new()
            }
        }
    }

    /// `Set-Cookie` value storing `flashes`.
    pub fn set_cookie(&self, flashes: &[Flash]) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode(flashes)
        )
    }
}

/// HMAC keyed with `secret`, padded to the block size by hand (hashed first
/// when longer) so construction cannot fail.
fn keyed_mac(secret: &[u8]) -> HmacSha256 {
    let mut key = Key::<HmacSha256>::default();
    if secret.len() > key.len() {
        let digest = Sha256::digest(secret);
        key[..digest.len()].copy_from_slice(&digest);
    } else {
        key[..secret.len()].copy_from_slice(secret);
    }
    <HmacSha256 as KeyInit>::new(&key)
}

/// `Set-Cookie` value removing the flash cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", FLASH_COOKIE)
}

/// Whether the request carries a flash cookie, valid or not.
pub fn has_cookie(headers: &HeaderMap) -> bool {
    cookie_value(headers, FLASH_COOKIE).is_some()
}

/// Find a cookie by name across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
