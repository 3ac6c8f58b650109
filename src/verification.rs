use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Codes outlive the request that issued them by this long.
pub fn default_ttl() -> Duration {
    Duration::seconds(300)
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, Debug)]
struct IssuedCode {
    code: String,
    expires_at: DateTime<Utc>,
}

/// In-memory store of live verification codes, keyed by phone number or
/// email address. At most one live code per identifier; issuing again is
/// last-write-wins. Expiry is enforced at read time, with a deferred
/// cleanup task reclaiming entries that were never read again.
#[derive(Clone)]
pub struct CodeStore {
    entries: Arc<Mutex<HashMap<String, IssuedCode>>>,
    clock: Arc<dyn Clock>,
}

impl CodeStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    /// Issues a fresh 4-digit code for `identifier`, replacing any code
    /// already live for it.
    pub fn issue(&self, identifier: &str, ttl: Duration) -> String {
        let code = rand::thread_rng().gen_range(1000..=9999).to_string();
        let expires_at = self.clock.now() + ttl;

        {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(
                identifier.to_string(),
                IssuedCode {
                    code: code.clone(),
                    expires_at,
                },
            );
        }

        self.schedule_cleanup(identifier.to_string(), ttl);

        code
    }

    /// True when `candidate` matches the live code for `identifier`.
    /// An expired entry is removed on the spot and never matches.
    /// A match does not consume the entry: the code keeps validating
    /// until it expires or is replaced.
    pub fn validate(&self, identifier: &str, candidate: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();

        let (matches, expired) = match entries.get(identifier) {
            Some(entry) => (
                entry.code == candidate,
                self.clock.now() > entry.expires_at,
            ),
            None => return false,
        };

        if expired {
            entries.remove(identifier);
            return false;
        }

        matches
    }

    /// Drops the live code for `identifier`, if any.
    pub fn remove(&self, identifier: &str) {
        self.entries.lock().unwrap().remove(identifier);
    }

    // the timer re-checks expiry before deleting, so a timer left over from
    // a replaced code cannot reclaim the replacement early
    fn schedule_cleanup(&self, identifier: String, ttl: Duration) {
        let entries = Arc::clone(&self.entries);
        let clock = Arc::clone(&self.clock);
        let delay = ttl.to_std().unwrap_or_default();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut entries = entries.lock().unwrap();
            if let Some(entry) = entries.get(&identifier) {
                if clock.now() > entry.expires_at {
                    entries.remove(&identifier);
                }
            }
        });
    }

    #[cfg(test)]
    fn contains(&self, identifier: &str) -> bool {
        self.entries.lock().unwrap().contains_key(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_now() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[tokio::test]
    async fn issued_codes_are_four_digit_numeric_strings() {
        let store = CodeStore::new();

        for _ in 0..100 {
            let code = store.issue("+15550100", default_ttl());
            let value: u32 = code.parse().unwrap();
            assert_eq!(code.len(), 4);
            assert!((1000..=9999).contains(&value));
        }
    }

    #[tokio::test]
    async fn validate_matches_only_the_issued_code() {
        let store = CodeStore::new();
        let code = store.issue("+15550100", default_ttl());

        assert!(!store.validate("+15550100", "0000"));
        assert!(!store.validate("+15559999", &code));
        assert!(store.validate("+15550100", &code));
    }

    #[tokio::test]
    async fn validation_does_not_consume_the_code() {
        let store = CodeStore::new();
        let code = store.issue("rider@example.com", default_ttl());

        assert!(store.validate("rider@example.com", &code));
        assert!(store.validate("rider@example.com", &code));
    }

    #[tokio::test]
    async fn expired_codes_never_validate() {
        let clock = ManualClock::starting_now();
        let store = CodeStore::with_clock(clock.clone());

        let code = store.issue("+15550100", default_ttl());
        assert!(store.validate("+15550100", &code));

        clock.advance(default_ttl() + Duration::seconds(1));

        assert!(!store.validate("+15550100", &code));
        // the expired entry was dropped by the read
        assert!(!store.contains("+15550100"));
    }

    #[tokio::test]
    async fn reissuing_invalidates_the_previous_code() {
        let store = CodeStore::new();

        let first = store.issue("+15550100", default_ttl());
        let second = store.issue("+15550100", default_ttl());

        if first != second {
            assert!(!store.validate("+15550100", &first));
        }
        assert!(store.validate("+15550100", &second));
    }

    #[tokio::test]
    async fn remove_consumes_the_code() {
        let store = CodeStore::new();
        let code = store.issue("+15550100", default_ttl());

        store.remove("+15550100");

        assert!(!store.validate("+15550100", &code));
    }

    #[tokio::test]
    async fn cleanup_task_reclaims_expired_entries() {
        let store = CodeStore::new();
        store.issue("+15550100", Duration::milliseconds(10));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert!(!store.contains("+15550100"));
    }

    #[tokio::test]
    async fn stale_cleanup_timer_spares_a_replacement_code() {
        let store = CodeStore::new();

        store.issue("+15550100", Duration::milliseconds(10));
        let replacement = store.issue("+15550100", default_ttl());

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert!(store.validate("+15550100", &replacement));
    }
}
