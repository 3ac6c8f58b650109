use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// Signs and verifies the compact tokens the backend hands to clients:
/// session tokens and pending-profile envelopes. HS256 over a shared
/// secret; expiry is enforced on decode.
#[derive(Clone)]
pub struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Signer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub(crate) fn sign<T: Serialize>(&self, claims: &T) -> Result<String, Error> {
        Ok(encode(&Header::default(), claims, &self.encoding_key)?)
    }

    pub(crate) fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
    ) -> Result<T, jsonwebtoken::errors::Error> {
        Ok(decode::<T>(token, &self.decoding_key, &Validation::default())?.claims)
    }
}
