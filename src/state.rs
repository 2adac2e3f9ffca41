use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use diesel::{
    SqliteConnection,
    r2d2::{ConnectionManager, Pool},
};

use crate::{
    event::EventConfig, funnel::in_flight::InFlight,
    registrations::RegistrationStore, storage::BlobStore,
};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Shared by every handler. Both collaborators sit behind trait objects so
/// that tests can swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub registrations: Arc<dyn RegistrationStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub event: Arc<EventConfig>,
    pub in_flight: InFlight,
    /// Encrypts the cookies which carry data between funnel pages.
    pub key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
