//! Countdown to the start of the event.
//!
//! The remaining time is computed on the server; the widget asks for a fresh
//! copy of itself once a second.

use chrono::{DateTime, Utc};
use hypertext::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn is_over(&self) -> bool {
        *self == Remaining::default()
    }
}

/// Time left from `now` until `target`, all zero once `target` has passed.
pub fn remaining(now: DateTime<Utc>, target: DateTime<Utc>) -> Remaining {
    let total = (target - now).num_seconds();
    if total <= 0 {
        return Remaining::default();
    }

    Remaining {
        days: total / 86_400,
        hours: (total % 86_400) / 3_600,
        minutes: (total % 3_600) / 60,
        seconds: total % 60,
    }
}

pub struct Countdown {
    pub remaining: Remaining,
}

impl Renderable for Countdown {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let units = [
            ("Days", self.remaining.days),
            ("Hours", self.remaining.hours),
            ("Minutes", self.remaining.minutes),
            ("Seconds", self.remaining.seconds),
        ];

        maud! {
            div id="countdown"
                class="d-flex justify-content-center gap-3 my-4"
                hx-get="/countdown"
                hx-trigger="every 1s"
                hx-swap="outerHTML"
            {
                @for (label, value) in units {
                    div class="countdown-unit glass-card text-center px-3 py-2" {
                        div class="fs-2 fw-bold" { (format!("{value:02}")) }
                        div class="small text-white-50 text-uppercase" { (label) }
                    }
                }
            }
        }
        .render_to(buffer);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn splits_into_units() {
        let target = Utc.with_ymd_and_hms(2025, 9, 24, 3, 30, 0).unwrap();
        let now = target
            - (Duration::days(2)
                + Duration::hours(5)
                + Duration::minutes(7)
                + Duration::seconds(9));

        assert_eq!(
            remaining(now, target),
            Remaining {
                days: 2,
                hours: 5,
                minutes: 7,
                seconds: 9
            }
        );
    }

    #[test]
    fn clamps_at_zero() {
        let target = Utc.with_ymd_and_hms(2025, 9, 24, 3, 30, 0).unwrap();

        assert!(remaining(target, target).is_over());
        assert!(remaining(target + Duration::days(40), target).is_over());
        assert!(!remaining(target - Duration::seconds(1), target).is_over());
    }

    #[test]
    fn polls_for_fresh_copy() {
        let html = Countdown {
            remaining: Remaining {
                days: 1,
                hours: 2,
                minutes: 3,
                seconds: 4,
            },
        }
        .render()
        .into_inner();

        assert!(html.contains(r#"hx-get="/countdown""#));
        assert!(html.contains(r#"hx-trigger="every 1s""#));
        assert!(html.contains(">04<"));
    }
}
