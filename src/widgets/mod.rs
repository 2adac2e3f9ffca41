//! This module contains user interface components which are reused between
//! different pages of the site.
//!
//! Most of them are purely presentational. [`countdown`] and [`faq`] also
//! hold the (small) amount of logic behind the landing page's interactive
//! parts, so that it can be tested without rendering anything.

pub mod actions;
pub mod alert;
pub mod celebration;
pub mod countdown;
pub mod faq;
pub mod particles;
pub mod qr;
