use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::get,
};
use axum_extra::extract::cookie::Key;
use diesel::{
    SqliteConnection,
    r2d2::{ConnectionManager, Pool},
};
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    MIGRATIONS,
    event::EventConfig,
    funnel::{
        in_flight::InFlight,
        payment::{UPLOAD_BODY_LIMIT, do_upload, payment_page},
        register::{do_register, registration_page},
        success::success_page,
    },
    pages::{
        about::about_page,
        landing::{countdown_fragment, landing_page},
        not_found,
        tracks::tracks_page,
    },
    registrations::sqlite::SqliteRegistrationStore,
    state::{AppState, DbPool},
    storage::local::{LocalBlobStore, UPLOADS_PREFIX},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read event configuration {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid event configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("SECRET_KEY must be at least 64 bytes long")]
    SecretKeyTooShort,
    #[error("could not open database: {0}")]
    Database(#[from] diesel::r2d2::PoolError),
    #[error("could not run migrations: {0}")]
    Migrations(String),
    #[error("could not create upload directory {path}: {source}")]
    UploadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("start-up task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Everything needed to assemble the application at start-up.
pub struct Settings {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub secret_key: Option<String>,
    pub event: EventConfig,
}

/// Opens the database (running any pending migrations), prepares the upload
/// directory and wires both into an [`AppState`].
pub async fn build_state(settings: &Settings) -> Result<AppState, ConfigError> {
    let key = cookie_key(settings.secret_key.as_deref())?;

    tracing::info!(location = %settings.database_url, "Opening database");

    let pool: DbPool = Pool::builder()
        .max_size(if settings.database_url == ":memory:" { 1 } else { 10 })
        .build(ConnectionManager::<SqliteConnection>::new(
            settings.database_url.clone(),
        ))?;

    let migrations_pool = pool.clone();
    spawn_blocking(move || -> Result<(), ConfigError> {
        let mut conn = migrations_pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| ConfigError::Migrations(e.to_string()))?;
        for version in applied {
            tracing::info!(%version, "Applied migration");
        }
        Ok(())
    })
    .await??;

    tokio::fs::create_dir_all(&settings.upload_dir)
        .await
        .map_err(|source| ConfigError::UploadDir {
            path: settings.upload_dir.clone(),
            source,
        })?;

    Ok(AppState {
        registrations: Arc::new(SqliteRegistrationStore::new(pool)),
        blobs: Arc::new(LocalBlobStore::new(&settings.upload_dir)),
        event: Arc::new(settings.event.clone()),
        in_flight: InFlight::default(),
        key,
    })
}

fn cookie_key(secret: Option<&str>) -> Result<Key, ConfigError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|_| ConfigError::SecretKeyTooShort),
        None => {
            tracing::warn!(
                "SECRET_KEY not set, generating a random key. Visitors part \
                 way through registration will lose their progress when the \
                 server restarts."
            );
            Ok(Key::generate())
        }
    }
}

/// Builds the router. When `uploads` is given, stored payment screenshots
/// are served read-only from it.
pub fn create_app(state: AppState, uploads: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/", get(landing_page))
        .route("/countdown", get(countdown_fragment))
        .route("/about", get(about_page))
        .route("/tracks", get(tracks_page))
        .route("/register", get(registration_page).post(do_register))
        .route(
            "/payment",
            get(payment_page)
                .post(do_upload)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/success", get(success_page))
        .route(
            "/registration-success",
            get(|| async { Redirect::permanent("/success") }),
        )
        .fallback(not_found);

    let router = match uploads {
        Some(dir) => router.nest_service(UPLOADS_PREFIX, ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(
            cookie_key(Some("too short")),
            Err(ConfigError::SecretKeyTooShort)
        ));
        assert!(cookie_key(Some(&"0".repeat(64))).is_ok());
    }

    #[tokio::test]
    async fn in_memory_state_runs_migrations() {
        let upload_dir = std::env::temp_dir()
            .join(format!("skillsprint-config-{}", uuid::Uuid::new_v4()));
        let settings = Settings {
            database_url: ":memory:".to_string(),
            upload_dir: upload_dir.clone(),
            secret_key: Some("0".repeat(64)),
            event: EventConfig::default(),
        };

        let state = build_state(&settings).await.unwrap();
        let app = create_app(state, Some(&upload_dir));
        let server = axum_test::TestServer::new(app).unwrap();

        let res = server.get("/registration-success").await;
        assert_eq!(res.status_code(), axum::http::StatusCode::PERMANENT_REDIRECT);

        let _ = std::fs::remove_dir_all(upload_dir);
    }

    #[tokio::test]
    async fn stored_screenshots_are_served() {
        use axum::{
            body::{Body, Bytes},
            http::{Request, StatusCode},
        };
        use tower::ServiceExt;

        let upload_dir = std::env::temp_dir()
            .join(format!("skillsprint-serve-{}", uuid::Uuid::new_v4()));
        let settings = Settings {
            database_url: ":memory:".to_string(),
            upload_dir: upload_dir.clone(),
            secret_key: None,
            event: EventConfig::default(),
        };

        let state = build_state(&settings).await.unwrap();
        let stored = state
            .blobs
            .put(
                "payments/r1-1.png",
                Bytes::from_static(b"not really a png"),
                "image/png",
            )
            .await
            .unwrap();

        let res = create_app(state, Some(&upload_dir))
            .oneshot(
                Request::get(stored.reference.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let _ = std::fs::remove_dir_all(upload_dir);
    }
}
