//! Record editing workflow for one domain page
//!
//! Drives the create/edit/delete lifecycle:
//! open editor → validate → submit → refresh-or-patch → notify.
//!
//! Every mutation outcome notifies exactly once. Create and update reload the
//! full record list afterwards so server-assigned fields are picked up; delete
//! removes the record locally. State lives behind a mutex that is never held
//! across a network call, so search and browsing keep working while a submit
//! is in flight.
//!
//! At most one mutation is in flight per workflow. Every confirmed mutation
//! bumps a generation counter; a record list fetched under an older
//! generation is discarded and fetched again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::try_join;
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult, Operation};
use crate::services::{DomainSession, RecordStore, RecordValidator, ServiceContext};
use crate::types::{
    EditorMode, EditorPhase, EditorState, PageContext, Record, RecordDraft, User,
    ValidationErrors, WorkflowPhase,
};

/// Reloads attempted when mutations keep landing during a list fetch.
const MAX_STALE_RELOADS: usize = 3;

#[derive(Debug, Default)]
struct WorkflowState {
    store: RecordStore,
    editor: Option<EditorState>,
    pending_delete: Option<Record>,
    /// A confirmed delete request is on the wire.
    delete_in_flight: bool,
    /// Bumped by every confirmed mutation.
    generation: u64,
    page: Option<PageContext>,
}

impl WorkflowState {
    fn mutation_in_flight(&self) -> bool {
        self.delete_in_flight || self.editor.as_ref().is_some_and(EditorState::is_submitting)
    }

    fn mark_mutated(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Orchestrator for a single domain's record page.
///
/// The only component that calls the Record API. Create one per page
/// activation and call [`deactivate`](Self::deactivate) when leaving.
pub struct RecordWorkflow {
    ctx: Arc<ServiceContext>,
    session: DomainSession,
    domain_id: String,
    state: Mutex<WorkflowState>,
    active: AtomicBool,
}

impl RecordWorkflow {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, domain_id: impl Into<String>) -> Self {
        Self {
            session: DomainSession::new(Arc::clone(&ctx)),
            ctx,
            domain_id: domain_id.into(),
            state: Mutex::new(WorkflowState::default()),
            active: AtomicBool::new(true),
        }
    }

    pub fn domain_id(&self) -> &str {
        &self.domain_id
    }

    // ===== Page lifecycle =====

    /// Loads user, domain and records concurrently.
    ///
    /// The page is ready only when all three resolve; the first failure wins
    /// and the other results are ignored.
    pub async fn activate(&self, cached_user: Option<&User>) -> CoreResult<PageContext> {
        self.ensure_active()?;
        let generation = self.state.lock().await.generation;

        let joined = try_join!(
            self.session.resolve_user(cached_user),
            self.session.resolve_domain(&self.domain_id),
            self.fetch_records(),
        );
        self.ensure_active()?;

        let (user, domain, records) = match joined {
            Ok(parts) => parts,
            Err(e) => {
                self.ctx.notify_failure(&e);
                return Err(e);
            }
        };

        let page = PageContext { user, domain };
        let stale = {
            let mut state = self.state.lock().await;
            state.page = Some(page.clone());
            let stale = state.generation != generation;
            if !stale {
                state.store.load(records);
            }
            stale
        };
        if stale {
            self.refresh().await?;
        }
        log::info!(
            "Domain {} loaded with {} records",
            page.domain.name,
            self.state.lock().await.store.len()
        );
        Ok(page)
    }

    /// Marks the workflow torn down. Responses arriving afterwards are dropped.
    pub fn deactivate(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            log::debug!("Record workflow for domain {} deactivated", self.domain_id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Full reload of the record list. Failures are notified.
    ///
    /// A list that was fetched while a mutation got confirmed is stale and is
    /// fetched again instead of overwriting the newer local state.
    pub async fn refresh(&self) -> CoreResult<()> {
        self.ensure_active()?;
        for _ in 0..=MAX_STALE_RELOADS {
            let generation = self.state.lock().await.generation;
            let records = match self.fetch_records().await {
                Ok(records) => records,
                Err(e) => {
                    if self.is_active() {
                        self.ctx.notify_failure(&e);
                    }
                    return Err(e);
                }
            };
            self.ensure_active()?;

            let mut state = self.state.lock().await;
            if state.generation == generation {
                state.store.load(records);
                return Ok(());
            }
            log::debug!(
                "Record list for domain {} changed during fetch, reloading",
                self.domain_id
            );
        }
        log::warn!(
            "Record list for domain {} kept changing, keeping local view",
            self.domain_id
        );
        Ok(())
    }

    // ===== Editor intents =====

    /// Opens the editor with the blank template.
    pub async fn open_add(&self) -> CoreResult<()> {
        self.open_editor(EditorMode::Create, RecordDraft::default()).await
    }

    /// Opens the editor with a copy of `record`.
    pub async fn open_edit(&self, record: &Record) -> CoreResult<()> {
        self.open_editor(
            EditorMode::Edit {
                record_id: record.id.clone(),
            },
            RecordDraft::from_record(record),
        )
        .await
    }

    /// Edits the open draft in place.
    pub async fn update_draft<F>(&self, edit: F) -> CoreResult<()>
    where
        F: FnOnce(&mut RecordDraft),
    {
        self.ensure_active()?;
        let mut state = self.state.lock().await;
        let editor = state.editor.as_mut().ok_or(CoreError::NoEditor)?;
        if editor.is_submitting() {
            return Err(CoreError::EditorBusy);
        }
        edit(&mut editor.draft);
        Ok(())
    }

    /// Discards the editor; refused while a submit is in flight.
    pub async fn cancel_edit(&self) -> CoreResult<()> {
        let mut state = self.state.lock().await;
        if state.editor.as_ref().is_some_and(EditorState::is_submitting) {
            return Err(CoreError::EditorBusy);
        }
        state.editor = None;
        Ok(())
    }

    /// Validates and sends the open draft.
    ///
    /// On success the editor closes, one success notice is sent and the list
    /// is reloaded. On a remote failure the editor returns to editing with the
    /// draft intact and one failure notice is sent. Validation failures stay
    /// on the editor and are not notified.
    pub async fn submit(&self) -> CoreResult<Record> {
        self.ensure_active()?;
        self.ctx.ensure_session()?;

        let (mode, input) = {
            let mut state = self.state.lock().await;
            if state.delete_in_flight {
                return Err(CoreError::EditorBusy);
            }
            let editor = state.editor.as_mut().ok_or(CoreError::NoEditor)?;
            if editor.is_submitting() {
                return Err(CoreError::EditorBusy);
            }
            match RecordValidator::validate(&editor.draft) {
                Ok(input) => {
                    editor.phase = EditorPhase::Submitting;
                    editor.error = None;
                    editor.field_errors = ValidationErrors::default();
                    (editor.mode.clone(), input)
                }
                Err(errors) => {
                    log::debug!("Record draft rejected: {errors}");
                    editor.field_errors = errors.clone();
                    return Err(CoreError::Validation(errors));
                }
            }
        };

        let (operation, result) = match &mode {
            EditorMode::Create => (
                Operation::CreateRecord,
                self.ctx
                    .record_api
                    .create_record(&self.domain_id, &input)
                    .await,
            ),
            EditorMode::Edit { record_id } => (
                Operation::UpdateRecord,
                self.ctx.record_api.update_record(record_id, &input).await,
            ),
        };

        if !self.is_active() {
            log::debug!("Dropping {operation} response for deactivated workflow");
            return Err(CoreError::Deactivated);
        }

        match result {
            Ok(record) => {
                {
                    let mut state = self.state.lock().await;
                    state.editor = None;
                    state.mark_mutated();
                }
                let message = match mode {
                    EditorMode::Create => "Record created successfully",
                    EditorMode::Edit { .. } => "Record updated successfully",
                };
                log::info!("{message}: {} {}", record.record_type, record.name);
                self.ctx.notify_success(message);

                if let Err(e) = self.refresh().await {
                    log::warn!("Refresh after {operation} failed: {e}");
                }
                Ok(record)
            }
            Err(api_err) => {
                let err = self.ctx.handle_api_error(operation, api_err);
                {
                    let mut state = self.state.lock().await;
                    if let Some(editor) = state.editor.as_mut() {
                        editor.phase = EditorPhase::Editing;
                        if !err.is_session_expired() {
                            editor.error = Some(err.to_string());
                        }
                    }
                }
                self.ctx.notify_failure(&err);
                Err(err)
            }
        }
    }

    // ===== Delete intents =====

    /// Opens the delete confirmation for `record`. Nothing is sent yet.
    ///
    /// Refused while another mutation is in flight.
    pub async fn request_delete(&self, record: &Record) -> CoreResult<()> {
        self.ensure_active()?;
        let mut state = self.state.lock().await;
        if state.mutation_in_flight() {
            return Err(CoreError::EditorBusy);
        }
        state.pending_delete = Some(record.clone());
        Ok(())
    }

    pub async fn cancel_delete(&self) {
        self.state.lock().await.pending_delete = None;
    }

    /// Deletes the record awaiting confirmation.
    ///
    /// The prompt closes whatever the outcome once the request is sent. On
    /// success the record is removed locally without a reload; on failure the
    /// store is untouched. While a submit is in flight nothing is sent and
    /// the prompt stays open.
    pub async fn confirm_delete(&self) -> CoreResult<Record> {
        self.ensure_active()?;
        let record = {
            let mut state = self.state.lock().await;
            if state.mutation_in_flight() {
                return Err(CoreError::EditorBusy);
            }
            let record = state
                .pending_delete
                .take()
                .ok_or(CoreError::NoPendingDelete)?;
            self.ctx.ensure_session()?;
            state.delete_in_flight = true;
            record
        };

        let result = self.ctx.record_api.delete_record(&record.id).await;

        let mut state = self.state.lock().await;
        state.delete_in_flight = false;

        if !self.is_active() {
            log::debug!("Dropping delete response for deactivated workflow");
            return Err(CoreError::Deactivated);
        }

        if let Err(api_err) = result {
            drop(state);
            let err = self.ctx.handle_api_error(Operation::DeleteRecord, api_err);
            self.ctx.notify_failure(&err);
            return Err(err);
        }

        let spliced = state.store.apply_deleted(&record.id);
        state.mark_mutated();
        drop(state);
        log::info!("Record deleted: {} {}", record.record_type, record.name);
        self.ctx.notify_success("Record deleted successfully");

        if let Err(e) = spliced {
            log::error!("{e}; reloading records");
            if let Err(e) = self.refresh().await {
                log::warn!("Reload after inconsistent delete failed: {e}");
            }
        }
        Ok(record)
    }

    // ===== Search =====

    pub async fn set_query(&self, text: &str) {
        self.state.lock().await.store.set_query(text);
    }

    pub async fn query(&self) -> String {
        self.state.lock().await.store.query().to_string()
    }

    // ===== Read accessors =====

    pub async fn phase(&self) -> WorkflowPhase {
        match self.state.lock().await.editor.as_ref().map(|e| e.phase) {
            None => WorkflowPhase::Idle,
            Some(EditorPhase::Editing) => WorkflowPhase::Editing,
            Some(EditorPhase::Submitting) => WorkflowPhase::Submitting,
        }
    }

    pub async fn editor(&self) -> Option<EditorState> {
        self.state.lock().await.editor.clone()
    }

    pub async fn pending_delete(&self) -> Option<Record> {
        self.state.lock().await.pending_delete.clone()
    }

    pub async fn filtered_view(&self) -> Vec<Record> {
        self.state.lock().await.store.filtered_view()
    }

    pub async fn records(&self) -> Vec<Record> {
        self.state.lock().await.store.records().to_vec()
    }

    pub async fn page(&self) -> Option<PageContext> {
        self.state.lock().await.page.clone()
    }

    // ===== Internals =====

    fn ensure_active(&self) -> CoreResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(CoreError::Deactivated)
        }
    }

    async fn open_editor(&self, mode: EditorMode, draft: RecordDraft) -> CoreResult<()> {
        self.ensure_active()?;
        let mut state = self.state.lock().await;
        if state.mutation_in_flight() {
            return Err(CoreError::EditorBusy);
        }
        state.editor = Some(EditorState::new(mode, draft));
        Ok(())
    }

    async fn fetch_records(&self) -> CoreResult<Vec<Record>> {
        self.ctx.ensure_session()?;
        self.ctx
            .record_api
            .list_records(&self.domain_id)
            .await
            .map_err(|e| self.ctx.handle_api_error(Operation::ListRecords, e))
    }
}
