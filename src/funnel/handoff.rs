//! Typed payloads passed from one funnel page to the next.
//!
//! A payload travels in an encrypted, HTTP-only cookie, similar to a login
//! session. A page reading one always gets a [`Handoff`]: either the payload,
//! or [`Handoff::Missing`] when it was never written, has expired or could
//! not be decrypted.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::registrations::Registration;

pub const PAYMENT_COOKIE: &str = "skillsprint_payment";
pub const SUCCESS_COOKIE: &str = "skillsprint_success";

/// How long a visitor has to complete payment after registering.
pub const PAYMENT_HANDOFF_TTL: Duration = Duration::minutes(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff<T> {
    Present(T),
    Missing,
}

impl<T> Handoff<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Handoff::Present(t) => Some(t),
            Handoff::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Handoff::Missing)
    }
}

/// Registration form → payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHandoff {
    pub id: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub team_leader_email: String,
    pub expires_at: NaiveDateTime,
}

impl PaymentHandoff {
    pub fn new(registration: &Registration, now: NaiveDateTime) -> Self {
        Self {
            id: registration.id.clone(),
            team_name: registration.team_name.clone(),
            team_leader_name: registration.team_leader_name.clone(),
            team_leader_email: registration.team_leader_email.clone(),
            expires_at: now + PAYMENT_HANDOFF_TTL,
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Payment page → success page. Read once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessHandoff {
    pub team_name: String,
}

pub fn write_payment(
    jar: PrivateCookieJar,
    handoff: &PaymentHandoff,
) -> PrivateCookieJar {
    write(jar, PAYMENT_COOKIE, handoff)
}

pub fn read_payment(
    jar: &PrivateCookieJar,
    now: NaiveDateTime,
) -> Handoff<PaymentHandoff> {
    match read::<PaymentHandoff>(jar, PAYMENT_COOKIE) {
        Handoff::Present(handoff) if handoff.is_expired(now) => {
            tracing::debug!("Payment handoff for {} has expired", handoff.id);
            Handoff::Missing
        }
        other => other,
    }
}

pub fn clear_payment(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(PAYMENT_COOKIE).path("/"))
}

pub fn write_success(
    jar: PrivateCookieJar,
    handoff: &SuccessHandoff,
) -> PrivateCookieJar {
    write(jar, SUCCESS_COOKIE, handoff)
}

/// Reads the success payload and removes it, so that it is shown once.
pub fn take_success(
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Handoff<SuccessHandoff>) {
    let handoff = read::<SuccessHandoff>(&jar, SUCCESS_COOKIE);
    let jar = match handoff {
        Handoff::Present(_) => jar.remove(Cookie::build(SUCCESS_COOKIE).path("/")),
        Handoff::Missing => jar,
    };
    (jar, handoff)
}

fn write<T: Serialize>(
    jar: PrivateCookieJar,
    name: &'static str,
    value: &T,
) -> PrivateCookieJar {
    match serde_json::to_string(value) {
        Ok(json) => jar.add(
            Cookie::build((name, json))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            tracing::error!("Could not encode {name} handoff: {e}");
            jar
        }
    }
}

fn read<T: DeserializeOwned>(jar: &PrivateCookieJar, name: &str) -> Handoff<T> {
    let Some(cookie) = jar.get(name) else {
        return Handoff::Missing;
    };

    match serde_json::from_str::<T>(cookie.value()) {
        Ok(t) => Handoff::Present(t),
        Err(e) => {
            tracing::warn!("Discarding malformed {name} handoff: {e}");
            Handoff::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Key;
    use chrono::Utc;

    use super::*;

    fn handoff(now: NaiveDateTime) -> PaymentHandoff {
        PaymentHandoff {
            id: "r1".to_string(),
            team_name: "Alpha".to_string(),
            team_leader_name: "A. Lee".to_string(),
            team_leader_email: "a@x.com".to_string(),
            expires_at: now + PAYMENT_HANDOFF_TTL,
        }
    }

    #[test]
    fn payment_handoff_round_trips_until_expiry() {
        let now = Utc::now().naive_utc();
        let jar = PrivateCookieJar::new(Key::generate());

        assert!(read_payment(&jar, now).is_missing());

        let jar = write_payment(jar, &handoff(now));
        assert_eq!(read_payment(&jar, now), Handoff::Present(handoff(now)));

        let later = now + PAYMENT_HANDOFF_TTL;
        assert!(read_payment(&jar, later).is_missing());

        let jar = clear_payment(jar);
        assert!(read_payment(&jar, now).is_missing());
    }

    #[test]
    fn success_handoff_is_read_once() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = write_success(
            jar,
            &SuccessHandoff {
                team_name: "Alpha".to_string(),
            },
        );

        let (jar, first) = take_success(jar);
        assert_eq!(
            first.present().map(|h| h.team_name),
            Some("Alpha".to_string())
        );

        let (_, second) = take_success(jar);
        assert!(second.is_missing());
    }
}
