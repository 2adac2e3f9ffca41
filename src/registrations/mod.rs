//! Team registrations and the store they are kept in.
//!
//! A registration is inserted once by the registration form and updated once
//! more, by id, when a payment screenshot has been uploaded. Nothing in this
//! crate lists or deletes registrations.

use axum::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod sqlite;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    /// `Member 1`, `Member 2`, … in the order the names were entered.
    pub position: String,
}

impl TeamMember {
    pub fn numbered(index: usize, name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            position: format!("Member {}", index + 1),
        }
    }
}

/// A validated registration which has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub team_name: String,
    pub team_leader_name: String,
    pub team_leader_email: String,
    pub team_leader_phone: String,
    pub team_size: i64,
    pub institution: Option<String>,
    pub state: Option<String>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    /// Members other than the leader; `team_size - 1` entries.
    pub team_members: Vec<TeamMember>,
    pub registration_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: String,
    pub team_name: String,
    pub team_leader_name: String,
    /// Copy of the leader's name, kept for consumers which expect a generic
    /// `name` column.
    pub name: Option<String>,
    pub team_leader_email: String,
    pub team_leader_phone: String,
    pub team_size: i64,
    pub institution: Option<String>,
    pub state: Option<String>,
    pub github_profile: Option<String>,
    pub linkedin_profile: Option<String>,
    pub team_members: Vec<TeamMember>,
    pub registration_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub payment_screenshot: Option<String>,
}

impl Registration {
    /// The record as it is after a successful insert of `new`.
    pub fn inserted(
        id: String,
        new: NewRegistration,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: Some(new.team_leader_name.clone()),
            team_name: new.team_name,
            team_leader_name: new.team_leader_name,
            team_leader_email: new.team_leader_email,
            team_leader_phone: new.team_leader_phone,
            team_size: new.team_size,
            institution: new.institution,
            state: new.state,
            github_profile: new.github_profile,
            linkedin_profile: new.linkedin_profile,
            team_members: new.team_members,
            registration_date: new.registration_date,
            created_at,
            payment_screenshot: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("could not acquire a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("team members could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("no registration with id {0}")]
    NotFound(String),
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("registration store unavailable: {0}")]
    Unavailable(String),
}

/// Create one record, or update one record by id.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Inserts `registration` and returns the stored record, including the
    /// id generated for it.
    async fn create(
        &self,
        registration: NewRegistration,
    ) -> Result<Registration, StoreError>;

    /// Records where the payment screenshot of registration `id` was stored.
    async fn attach_payment_screenshot(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<(), StoreError>;
}
