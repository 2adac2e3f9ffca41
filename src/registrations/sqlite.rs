use axum::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use tokio::task::spawn_blocking;
use uuid::Uuid;

use crate::{
    registrations::{
        NewRegistration, Registration, RegistrationStore, StoreError,
        TeamMember,
    },
    schema::registrations,
    state::DbPool,
};

/// Column-for-column image of the `registrations` table.
#[derive(Queryable, Debug)]
struct RegistrationRow {
    id: String,
    team_name: String,
    team_leader_name: String,
    name: Option<String>,
    team_leader_email: String,
    team_leader_phone: String,
    team_size: i64,
    institution: Option<String>,
    state: Option<String>,
    github_profile: Option<String>,
    linkedin_profile: Option<String>,
    team_members: String,
    registration_date: NaiveDateTime,
    created_at: NaiveDateTime,
    payment_screenshot: Option<String>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = StoreError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Registration {
            team_members: serde_json::from_str::<Vec<TeamMember>>(
                &row.team_members,
            )?,
            id: row.id,
            team_name: row.team_name,
            team_leader_name: row.team_leader_name,
            name: row.name,
            team_leader_email: row.team_leader_email,
            team_leader_phone: row.team_leader_phone,
            team_size: row.team_size,
            institution: row.institution,
            state: row.state,
            github_profile: row.github_profile,
            linkedin_profile: row.linkedin_profile,
            registration_date: row.registration_date,
            created_at: row.created_at,
            payment_screenshot: row.payment_screenshot,
        })
    }
}

/// Keeps registrations in SQLite. Diesel is blocking, so every call runs on
/// the blocking thread pool.
pub struct SqliteRegistrationStore {
    pool: DbPool,
}

impl SqliteRegistrationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub async fn fetch(&self, id: &str) -> Result<Registration, StoreError> {
        let pool = self.pool.clone();
        let id = id.to_string();
        spawn_blocking(move || {
            let mut conn = pool.get()?;
            let row = registrations::table
                .filter(registrations::id.eq(&id))
                .first::<RegistrationRow>(&mut conn)
                .optional()?
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            Registration::try_from(row)
        })
        .await?
    }
}

#[async_trait]
impl RegistrationStore for SqliteRegistrationStore {
    #[tracing::instrument(skip_all, fields(team = %new.team_name))]
    async fn create(
        &self,
        new: NewRegistration,
    ) -> Result<Registration, StoreError> {
        let pool = self.pool.clone();

        spawn_blocking(move || {
            let mut conn = pool.get()?;
            let id = Uuid::now_v7().to_string();
            let members = serde_json::to_string(&new.team_members)?;

            conn.transaction(|conn| {
                let n = diesel::insert_into(registrations::table)
                    .values((
                        registrations::id.eq(&id),
                        registrations::team_name.eq(&new.team_name),
                        registrations::team_leader_name
                            .eq(&new.team_leader_name),
                        registrations::name.eq(Some(&new.team_leader_name)),
                        registrations::team_leader_email
                            .eq(&new.team_leader_email),
                        registrations::team_leader_phone
                            .eq(&new.team_leader_phone),
                        registrations::team_size.eq(new.team_size),
                        registrations::institution.eq(&new.institution),
                        registrations::state.eq(&new.state),
                        registrations::github_profile.eq(&new.github_profile),
                        registrations::linkedin_profile
                            .eq(&new.linkedin_profile),
                        registrations::team_members.eq(&members),
                        registrations::registration_date
                            .eq(new.registration_date),
                        registrations::created_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                assert_eq!(n, 1);

                let row = registrations::table
                    .filter(registrations::id.eq(&id))
                    .first::<RegistrationRow>(conn)?;

                tracing::trace!("Inserted registration {id}");

                Registration::try_from(row)
            })
        })
        .await?
    }

    #[tracing::instrument(skip(self))]
    async fn attach_payment_screenshot(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<(), StoreError> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let reference = reference.to_string();

        spawn_blocking(move || {
            let mut conn = pool.get()?;
            let n = diesel::update(
                registrations::table.filter(registrations::id.eq(&id)),
            )
            .set(registrations::payment_screenshot.eq(Some(&reference)))
            .execute(&mut conn)?;

            match n {
                0 => Err(StoreError::NotFound(id)),
                _ => Ok(()),
            }
        })
        .await?
    }
}
