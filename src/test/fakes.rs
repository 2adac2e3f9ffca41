//! In-memory stand-ins for the registration and blob stores, which count
//! calls and can be told to fail or to block.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use axum::{async_trait, body::Bytes};
use axum_extra::extract::cookie::Key;
use axum_test::{TestServer, TestServerConfig};
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    config::create_app,
    event::EventConfig,
    funnel::in_flight::InFlight,
    registrations::{NewRegistration, Registration, RegistrationStore, StoreError},
    state::AppState,
    storage::{BlobStore, StorageError, StoredObject},
};

/// Holds a call open until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[derive(Default)]
pub struct FakeRegistrations {
    pub records: Mutex<HashMap<String, Registration>>,
    pub create_calls: AtomicUsize,
    pub attach_calls: AtomicUsize,
    pub fail_create: AtomicBool,
    pub fail_attach: AtomicBool,
    pub gate: Option<Arc<Gate>>,
}

impl FakeRegistrations {
    pub fn with_gate(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn attaches(&self) -> usize {
        self.attach_calls.load(Ordering::SeqCst)
    }

    pub fn only_record(&self) -> Registration {
        let records = self.records.lock().unwrap();
        assert_eq!(records.len(), 1, "expected exactly one registration");
        records.values().next().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationStore for FakeRegistrations {
    async fn create(
        &self,
        registration: NewRegistration,
    ) -> Result<Registration, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert refused".to_string()));
        }

        let record = Registration::inserted(
            Uuid::now_v7().to_string(),
            registration,
            Utc::now().naive_utc(),
        );
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn attach_payment_screenshot(
        &self,
        id: &str,
        reference: &str,
    ) -> Result<(), StoreError> {
        self.attach_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("update refused".to_string()));
        }

        match self.records.lock().unwrap().get_mut(id) {
            Some(record) => {
                record.payment_screenshot = Some(reference.to_string());
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct FakeBlobs {
    pub objects: Mutex<HashMap<String, (Bytes, String)>>,
    pub put_calls: AtomicUsize,
    pub fail_put: AtomicBool,
    pub gate: Option<Arc<Gate>>,
}

impl FakeBlobs {
    pub fn with_gate(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn puts(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for FakeBlobs {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("bucket refused".to_string()));
        }

        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(StoredObject {
            key: key.to_string(),
            reference: format!("/uploads/{key}"),
        })
    }
}

pub struct Harness {
    pub server: TestServer,
    pub registrations: Arc<FakeRegistrations>,
    pub blobs: Arc<FakeBlobs>,
}

pub fn harness() -> Harness {
    harness_with(FakeRegistrations::default(), FakeBlobs::default())
}

/// A server over the given fakes which keeps cookies between requests, like
/// a browser would.
pub fn harness_with(
    registrations: FakeRegistrations,
    blobs: FakeBlobs,
) -> Harness {
    let registrations = Arc::new(registrations);
    let blobs = Arc::new(blobs);

    let state = AppState {
        registrations: registrations.clone(),
        blobs: blobs.clone(),
        event: Arc::new(EventConfig::default()),
        in_flight: InFlight::default(),
        key: Key::generate(),
    };

    let server = TestServer::new_with_config(
        create_app(state, None),
        TestServerConfig {
            save_cookies: true,
            ..TestServerConfig::default()
        },
    )
    .unwrap();

    Harness {
        server,
        registrations,
        blobs,
    }
}
