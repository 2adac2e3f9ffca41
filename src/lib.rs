//! The Skill Sprint hackathon website.
//!
//! Marketing pages are rendered from static content in [`pages`]. The
//! registration funnel (form → payment → confirmation) lives in [`funnel`],
//! and talks to persistence only through the [`registrations`] and
//! [`storage`] capability traits.

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod config;
pub mod event;
pub mod funnel;
pub mod pages;
pub mod registrations;
pub mod schema;
pub mod state;
pub mod storage;
pub mod template;
pub mod util_resp;
pub mod validation;
pub mod widgets;

#[cfg(test)]
mod test;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
