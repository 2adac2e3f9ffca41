//! Event-wide settings: when the hackathon starts and how registration is
//! paid for.
//!
//! These are fixed values. The fee in particular is never derived from a
//! registration (team size does not change it).

use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    /// Target of the countdown on the landing page.
    pub starts_at: DateTime<FixedOffset>,
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// UPI virtual payment address of the organisers.
    pub payee: String,
    pub payee_name: String,
    pub amount: Decimal,
    /// ISO 4217 code, e.g. `INR`.
    pub currency: String,
    pub currency_symbol: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        // 24 September 2025, 09:00 IST (kickoff).
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60)
            .expect("IST is a valid offset");
        Self {
            name: "Skill Sprint".to_string(),
            starts_at: ist
                .with_ymd_and_hms(2025, 9, 24, 9, 0, 0)
                .single()
                .expect("kickoff time is unambiguous"),
            payment: PaymentConfig::default(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            payee: "skillsprint@upi".to_string(),
            payee_name: "SkillSprint".to_string(),
            amount: Decimal::new(500, 0),
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl EventConfig {
    /// Reads the event configuration from a TOML file, or returns the
    /// defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::info!("No event configuration file given, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn starts_at_utc(&self) -> DateTime<Utc> {
        self.starts_at.with_timezone(&Utc)
    }
}

impl PaymentConfig {
    /// The scannable payment request, e.g.
    /// `upi://pay?pa=skillsprint%40upi&pn=SkillSprint&am=500&cu=INR`.
    pub fn request_uri(&self) -> Url {
        let mut url =
            Url::parse("upi://pay").expect("static payment URI is valid");
        url.query_pairs_mut()
            .append_pair("pa", &self.payee)
            .append_pair("pn", &self.payee_name)
            .append_pair("am", &self.amount.normalize().to_string())
            .append_pair("cu", &self.currency);
        url
    }

    /// Amount for display, e.g. `₹500`.
    pub fn display_amount(&self) -> String {
        format!("{}{}", self.currency_symbol, self.amount.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_payment_request_is_fixed() {
        let payment = PaymentConfig::default();
        let uri = payment.request_uri();

        assert_eq!(uri.scheme(), "upi");
        let pairs: Vec<(String, String)> = uri
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("pa".to_string(), "skillsprint@upi".to_string()),
                ("pn".to_string(), "SkillSprint".to_string()),
                ("am".to_string(), "500".to_string()),
                ("cu".to_string(), "INR".to_string()),
            ]
        );
        assert_eq!(payment.display_amount(), "₹500");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: EventConfig = toml::from_str(
            r#"
            name = "Skill Sprint 2"

            [payment]
            amount = "750.00"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "Skill Sprint 2");
        assert_eq!(config.payment.display_amount(), "₹750");
        assert_eq!(config.payment.payee, "skillsprint@upi");
        assert_eq!(
            config.starts_at_utc(),
            EventConfig::default().starts_at_utc()
        );
    }
}
