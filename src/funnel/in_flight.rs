//! Re-entrancy guard for the submitting actions.
//!
//! Every action which talks to a collaborator (registration insert,
//! screenshot upload) first claims a key here. While the key is claimed a
//! second attempt with the same key is turned away without any remote call.
//! The claim is released when the returned guard is dropped, whatever the
//! outcome of the action.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// Claims `key`, or returns `None` if it is already claimed.
    pub fn begin(&self, key: impl Into<String>) -> Option<InFlightGuard> {
        let key = key.into();
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: self.keys.clone(),
            key,
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

#[must_use = "the key is released as soon as the guard is dropped"]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_release() {
        let in_flight = InFlight::default();

        let guard = in_flight.begin("register:t1").unwrap();
        assert!(in_flight.is_in_flight("register:t1"));
        assert!(in_flight.begin("register:t1").is_none());

        // other keys are independent
        let other = in_flight.begin("register:t2");
        assert!(other.is_some());

        drop(guard);
        assert!(!in_flight.is_in_flight("register:t1"));
        assert!(in_flight.begin("register:t1").is_some());
    }

    #[test]
    fn clones_share_claims() {
        let a = InFlight::default();
        let b = a.clone();

        let _guard = a.begin("upload:r1").unwrap();
        assert!(b.begin("upload:r1").is_none());
    }
}
