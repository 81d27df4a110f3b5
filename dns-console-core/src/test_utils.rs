//! Test helper module
//!
//! In-memory mocks for every collaborator plus factory helpers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dns_console_api::{ApiError, Result as ApiResult};
use proptest::prelude::*;
use tokio::sync::{Barrier, Notify, RwLock};

use crate::services::ServiceContext;
use crate::traits::{DomainApi, Notifier, RecordApi, SessionListener, SessionProvider};
use crate::types::{Domain, Notice, Record, RecordInput, RecordType, User};

pub const TEST_DOMAIN_ID: &str = "dom-1";

/// Failure to inject into the next mock call.
#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    Unauthorized,
    Server,
    Conflict,
}

impl MockFailure {
    fn into_error(self) -> ApiError {
        match self {
            Self::Unauthorized => ApiError::Unauthorized { raw_message: None },
            Self::Server => ApiError::ServerError {
                status: 500,
                raw_message: Some("Internal server error".to_string()),
            },
            Self::Conflict => ApiError::Conflict {
                raw_message: Some("Already exists".to_string()),
            },
        }
    }
}

pub fn test_user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
    }
}

pub fn test_domain() -> Domain {
    Domain {
        id: TEST_DOMAIN_ID.to_string(),
        name: "example.com".to_string(),
        verified: true,
        record_count: 1,
        updated_at: None,
    }
}

pub fn test_record(id: &str, record_type: RecordType, name: &str, value: &str) -> Record {
    Record {
        id: id.to_string(),
        domain_id: TEST_DOMAIN_ID.to_string(),
        record_type,
        name: name.to_string(),
        value: value.to_string(),
        ttl: 300,
        priority: None,
        created_at: None,
        updated_at: None,
    }
}

// ===== Generated inputs =====

pub fn arb_record_type() -> impl Strategy<Value = RecordType> {
    proptest::sample::select(RecordType::ALL.to_vec())
}

/// Up to `max` records with unique ids `g0`, `g1`, ... in list order.
pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (
            arb_record_type(),
            "[a-zA-Z0-9_@.-]{0,10}",
            "[a-zA-Z0-9 .:=-]{0,16}",
        ),
        0..max,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (record_type, name, value))| Record {
                record_type,
                name,
                value,
                ..test_record(&format!("g{i}"), record_type, "", "")
            })
            .collect()
    })
}

// ===== CallGate =====

/// Holds a mock call in flight until released.
#[derive(Default)]
pub struct CallGate {
    /// Signalled when a call reaches the gate.
    pub entered: Notify,
    /// Signal to let the held call continue.
    pub release: Notify,
}

impl CallGate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

async fn wait_at(barrier: &RwLock<Option<Arc<Barrier>>>) {
    let barrier = barrier.read().await.clone();
    if let Some(barrier) = barrier {
        barrier.wait().await;
    }
}

// ===== MockRecordApi =====

/// Server-side record list with failure injection.
pub struct MockRecordApi {
    records: RwLock<Vec<Record>>,
    next_failure: RwLock<Option<MockFailure>>,
    next_list_failure: RwLock<Option<MockFailure>>,
    gate: RwLock<Option<Arc<CallGate>>>,
    list_gate: RwLock<Option<Arc<CallGate>>>,
    list_barrier: RwLock<Option<Arc<Barrier>>>,
    last_input: RwLock<Option<RecordInput>>,
    list_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_failure: RwLock::new(None),
            next_list_failure: RwLock::new(None),
            gate: RwLock::new(None),
            list_gate: RwLock::new(None),
            list_barrier: RwLock::new(None),
            last_input: RwLock::new(None),
            list_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(100),
        }
    }

    /// Replaces the server-side records.
    pub async fn seed(&self, records: Vec<Record>) {
        *self.records.write().await = records;
    }

    /// Adds a record on the server only.
    pub async fn seed_extra(&self, record: Record) {
        self.records.write().await.push(record);
    }

    /// The next create/update/delete fails.
    pub async fn fail_next(&self, failure: MockFailure) {
        *self.next_failure.write().await = Some(failure);
    }

    /// The next list fails.
    pub async fn fail_next_list(&self, failure: MockFailure) {
        *self.next_list_failure.write().await = Some(failure);
    }

    /// Every following mutation waits at the returned gate.
    pub async fn hold_mutations(&self) -> Arc<CallGate> {
        let gate = Arc::new(CallGate::default());
        *self.gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    /// The next list takes its snapshot, then waits at the returned gate.
    pub async fn hold_next_list(&self) -> Arc<CallGate> {
        let gate = Arc::new(CallGate::default());
        *self.list_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    /// Lists wait at `barrier` before answering.
    pub async fn list_waits_at(&self, barrier: Arc<Barrier>) {
        *self.list_barrier.write().await = Some(barrier);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub async fn last_input(&self) -> Option<RecordInput> {
        self.last_input.read().await.clone()
    }

    async fn begin_mutation(&self, input: Option<&RecordInput>) -> ApiResult<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(input) = input {
            *self.last_input.write().await = Some(input.clone());
        }
        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        match self.next_failure.write().await.take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

fn record_not_found(id: &str) -> ApiError {
    ApiError::NotFound {
        resource: format!("record {id}"),
        raw_message: Some("Record not found".to_string()),
    }
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn list_records(&self, _domain_id: &str) -> ApiResult<Vec<Record>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        wait_at(&self.list_barrier).await;
        if let Some(failure) = self.next_list_failure.write().await.take() {
            return Err(failure.into_error());
        }
        let snapshot = self.records.read().await.clone();
        let gate = self.list_gate.write().await.take();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        Ok(snapshot)
    }

    async fn create_record(&self, domain_id: &str, record: &RecordInput) -> ApiResult<Record> {
        self.begin_mutation(Some(record)).await?;
        let id = format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Record {
            id,
            domain_id: domain_id.to_string(),
            record_type: record.record_type,
            name: record.name.clone(),
            value: record.value.clone(),
            ttl: record.ttl,
            priority: record.priority,
            created_at: None,
            updated_at: None,
        };
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, record_id: &str, record: &RecordInput) -> ApiResult<Record> {
        self.begin_mutation(Some(record)).await?;
        let mut records = self.records.write().await;
        let existing = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| record_not_found(record_id))?;
        existing.record_type = record.record_type;
        existing.name.clone_from(&record.name);
        existing.value.clone_from(&record.value);
        existing.ttl = record.ttl;
        existing.priority = record.priority;
        Ok(existing.clone())
    }

    async fn delete_record(&self, record_id: &str) -> ApiResult<()> {
        self.begin_mutation(None).await?;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| record_not_found(record_id))?;
        records.remove(index);
        Ok(())
    }
}

// ===== MockDomainApi =====

pub struct MockDomainApi {
    domains: RwLock<Vec<Domain>>,
    next_failure: RwLock<Option<MockFailure>>,
    get_barrier: RwLock<Option<Arc<Barrier>>>,
    create_calls: AtomicUsize,
}

impl MockDomainApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(vec![test_domain()]),
            next_failure: RwLock::new(None),
            get_barrier: RwLock::new(None),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub async fn fail_next(&self, failure: MockFailure) {
        *self.next_failure.write().await = Some(failure);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Domain lookups wait at `barrier` before answering.
    pub async fn get_waits_at(&self, barrier: Arc<Barrier>) {
        *self.get_barrier.write().await = Some(barrier);
    }

    async fn take_failure(&self) -> ApiResult<()> {
        match self.next_failure.write().await.take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DomainApi for MockDomainApi {
    async fn list_domains(&self) -> ApiResult<Vec<Domain>> {
        self.take_failure().await?;
        Ok(self.domains.read().await.clone())
    }

    async fn get_domain(&self, domain_id: &str) -> ApiResult<Domain> {
        wait_at(&self.get_barrier).await;
        self.take_failure().await?;
        self.domains
            .read()
            .await
            .iter()
            .find(|d| d.id == domain_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("domain {domain_id}"),
                raw_message: Some("Domain not found".to_string()),
            })
    }

    async fn create_domain(&self, domain_name: &str) -> ApiResult<Domain> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure().await?;
        let domain = Domain {
            id: format!("dom-new-{n}"),
            name: domain_name.to_string(),
            verified: false,
            record_count: 0,
            updated_at: None,
        };
        self.domains.write().await.push(domain.clone());
        Ok(domain)
    }
}

// ===== MockSessionProvider =====

pub struct MockSessionProvider {
    signed_in: RwLock<bool>,
    barrier: RwLock<Option<Arc<Barrier>>>,
    calls: AtomicUsize,
}

impl MockSessionProvider {
    pub fn new() -> Self {
        Self {
            signed_in: RwLock::new(true),
            barrier: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_signed_in(&self, signed_in: bool) {
        *self.signed_in.write().await = signed_in;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// User lookups wait at `barrier` before answering.
    pub async fn waits_at(&self, barrier: Arc<Barrier>) {
        *self.barrier.write().await = Some(barrier);
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn current_user(&self) -> ApiResult<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        wait_at(&self.barrier).await;
        if *self.signed_in.read().await {
            Ok(test_user())
        } else {
            Err(ApiError::Unauthorized {
                raw_message: Some("Unauthorized".to_string()),
            })
        }
    }
}

// ===== RecordingNotifier / CountingSessionListener =====

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices().into_iter().filter(Notice::is_error).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct CountingSessionListener {
    count: AtomicUsize,
}

impl CountingSessionListener {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl SessionListener for CountingSessionListener {
    fn session_expired(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

// ===== Factory methods =====

/// Handles to the mocks behind a test `ServiceContext`.
pub struct TestMocks {
    pub record_api: Arc<MockRecordApi>,
    pub domain_api: Arc<MockDomainApi>,
    pub session_provider: Arc<MockSessionProvider>,
    pub notifier: Arc<RecordingNotifier>,
    pub session_listener: Arc<CountingSessionListener>,
}

/// Create a `ServiceContext` for tests
pub fn create_test_context() -> (Arc<ServiceContext>, TestMocks) {
    let mocks = TestMocks {
        record_api: Arc::new(MockRecordApi::new()),
        domain_api: Arc::new(MockDomainApi::new()),
        session_provider: Arc::new(MockSessionProvider::new()),
        notifier: Arc::new(RecordingNotifier::default()),
        session_listener: Arc::new(CountingSessionListener::default()),
    };

    let ctx = Arc::new(ServiceContext::new(
        mocks.record_api.clone(),
        mocks.domain_api.clone(),
        mocks.session_provider.clone(),
        mocks.notifier.clone(),
        mocks.session_listener.clone(),
    ));

    (ctx, mocks)
}
