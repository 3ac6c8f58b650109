use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Signer;
use crate::error::{invalid_envelope_error, Error};

pub const ENVELOPE_TTL_MINUTES: i64 = 5;

/// Identity fields collected before the owning record exists. Carried
/// inside a signed envelope between the two legs of a verification flow,
/// never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingProfile {
    Phone {
        phone: String,
    },
    Email {
        email: String,
        first_name: String,
        last_name: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct EnvelopeClaims {
    profile: PendingProfile,
    code: String,
    iat: i64,
    exp: i64,
}

impl Signer {
    /// Seals the pending profile and its verification code into a signed
    /// envelope valid for five minutes.
    #[tracing::instrument(skip(self, code))]
    pub fn seal_envelope(&self, profile: PendingProfile, code: &str) -> Result<String, Error> {
        let now = Utc::now();

        let claims = EnvelopeClaims {
            profile,
            code: code.into(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ENVELOPE_TTL_MINUTES)).timestamp(),
        };

        self.sign(&claims)
    }

    /// Recovers the pending profile and code from an envelope, rejecting
    /// anything expired, tampered with, or signed elsewhere.
    pub fn open_envelope(&self, token: &str) -> Result<(PendingProfile, String), Error> {
        let claims: EnvelopeClaims = self.verify(token).map_err(|_| invalid_envelope_error())?;

        Ok((claims.profile, claims.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_profile() -> PendingProfile {
        PendingProfile::Email {
            email: "rider@example.com".into(),
            first_name: "Asha".into(),
            last_name: "Rao".into(),
        }
    }

    #[test]
    fn envelope_round_trips_profile_and_code() {
        let signer = Signer::new("test-secret");

        let token = signer.seal_envelope(email_profile(), "4217").unwrap();
        let (profile, code) = signer.open_envelope(&token).unwrap();

        assert_eq!(profile, email_profile());
        assert_eq!(code, "4217");
    }

    #[test]
    fn phone_profiles_seal_too() {
        let signer = Signer::new("test-secret");
        let profile = PendingProfile::Phone {
            phone: "+15550100".into(),
        };

        let token = signer.seal_envelope(profile.clone(), "1000").unwrap();
        let (recovered, _) = signer.open_envelope(&token).unwrap();

        assert_eq!(recovered, profile);
    }

    #[test]
    fn tampered_envelopes_are_rejected() {
        let signer = Signer::new("test-secret");

        let mut token = signer.seal_envelope(email_profile(), "4217").unwrap();
        token.push('x');

        assert!(signer.open_envelope(&token).is_err());
    }

    #[test]
    fn expired_envelopes_are_rejected() {
        let signer = Signer::new("test-secret");
        let now = Utc::now();

        let claims = EnvelopeClaims {
            profile: email_profile(),
            code: "4217".into(),
            iat: (now - Duration::minutes(10)).timestamp(),
            exp: (now - Duration::minutes(5)).timestamp(),
        };
        let token = signer.sign(&claims).unwrap();

        assert!(signer.open_envelope(&token).is_err());
    }

    #[test]
    fn envelopes_from_another_secret_are_rejected() {
        let signer = Signer::new("test-secret");
        let other = Signer::new("other-secret");

        let token = other.seal_envelope(email_profile(), "4217").unwrap();

        assert!(signer.open_envelope(&token).is_err());
    }
}
