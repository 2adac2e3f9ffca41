//! The registration funnel: `/register` → `/payment` → `/success`.
//!
//! Each stage hands a small payload to the next through [`handoff`]. The
//! submitting actions ([`register::submit_registration`] and
//! [`payment::upload_screenshot`]) are plain async functions over the store
//! traits, so they can be exercised without HTTP; the handlers only translate
//! between forms, cookies and pages.

pub mod error;
pub mod handoff;
pub mod in_flight;
pub mod payment;
pub mod register;
pub mod success;
