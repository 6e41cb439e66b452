//! The listing form and its submit workflow.
//!
//! A [`SubmissionForm`] is one page view of the form. It owns the entered
//! values, the per-field errors, the flow flags, the overlay, and the
//! notifications; nothing here is shared between views.
//!
//! # Submit sequence
//!
//! [`SubmissionForm::submit`] runs all of it. A caller that shares the form
//! between requests splits it: [`SubmissionForm::begin`] (steps 1 to 3),
//! [`PendingInsert::run`] (step 4 and the success delay) without holding
//! the form, then [`SubmissionForm::finish`].
//!
//! 1. Refuse if a submission is already running (or has succeeded) here.
//! 2. Validate all four fields. On failure record the errors and stop;
//!    the flow flags are not touched.
//! 3. Set both flow flags and mount the overlay.
//! 4. One insert against the store. No timeout, no retry.
//! 5. Success: sleep the fixed success delay, clear the fields, route to
//!    `/thank-you`. The flags stay set.
//! 6. Failure: one generic error notification, flags cleared, overlay
//!    unmounted, values kept.

use std::sync::Arc;
use std::time::Duration;

use listpad_storage::{ListingRecord, ListingStore, StoreError};
use tracing::{info, warn};

use crate::error::SubmitError;
use crate::flow::SubmissionFlowState;
use crate::listing::{FieldErrors, ListingSubmission};
use crate::notify::Notifications;
use crate::progress::ProgressSequence;
use crate::route::Route;

/// Minimum time between a successful insert and navigation. Matches the
/// four one-second overlay stages.
pub const SUCCESS_DELAY: Duration = Duration::from_millis(4000);

/// The only message a persistence failure ever shows.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// One page view of the listing form.
pub struct SubmissionForm {
    store: Arc<dyn ListingStore>,
    values: ListingSubmission,
    errors: FieldErrors,
    flow: SubmissionFlowState,
    progress: Option<ProgressSequence>,
    notifications: Notifications,
    route: Route,
    success_delay: Duration,
}

impl SubmissionForm {
    /// A fresh, empty form writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self {
            store,
            values: ListingSubmission::default(),
            errors: FieldErrors::default(),
            flow: SubmissionFlowState::default(),
            progress: None,
            notifications: Notifications::default(),
            route: Route::SubmissionForm,
            success_delay: SUCCESS_DELAY,
        }
    }

    /// Override the post-success delay.
    #[must_use]
    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    #[must_use]
    pub fn values(&self) -> &ListingSubmission {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn flow(&self) -> SubmissionFlowState {
        self.flow
    }

    /// The overlay, while mounted.
    #[must_use]
    pub fn progress(&self) -> Option<&ProgressSequence> {
        self.progress.as_ref()
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Where this view wants the visitor to be.
    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Accept `fields` for submission: steps 1 to 3.
    ///
    /// On success the flags are set and the overlay is mounted; the returned
    /// [`PendingInsert`] carries the insert and must be handed back to
    /// [`finish`](Self::finish) once run. The form itself is not borrowed
    /// while the insert is in flight.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Busy`] if this view is already submitting. Nothing
    ///   changes, the entered values included.
    /// - [`SubmitError::Invalid`] if any field fails; the store is not called.
    pub fn begin(&mut self, fields: ListingSubmission) -> Result<PendingInsert, SubmitError> {
        if self.flow.is_submitting {
            return Err(SubmitError::Busy);
        }

        self.values = fields;
        if let Err(errors) = self.values.validate() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }
        self.errors.clear();

        self.flow.begin();
        self.progress = Some(ProgressSequence::mount());

        Ok(PendingInsert {
            store: Arc::clone(&self.store),
            record: self.values.to_record(),
            success_delay: self.success_delay,
        })
    }

    /// Apply the outcome of a [`PendingInsert::run`]: steps 5 and 6.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Persistence`] if the insert failed. The form is
    /// editable again and carries one error notification.
    pub fn finish(&mut self, outcome: Result<(), StoreError>) -> Result<Route, SubmitError> {
        match outcome {
            Ok(()) => {
                self.values.clear();
                self.route = Route::ThankYou;
                Ok(self.route)
            }
            Err(err) => {
                self.notifications.error(FAILURE_MESSAGE);
                self.flow.reset();
                self.progress = None;
                Err(SubmitError::Persistence(err))
            }
        }
    }

    /// Run the whole submit workflow for `fields` on this form.
    ///
    /// Returns the route navigated to on success.
    ///
    /// # Errors
    ///
    /// See [`begin`](Self::begin) and [`finish`](Self::finish).
    pub async fn submit(&mut self, fields: ListingSubmission) -> Result<Route, SubmitError> {
        let pending = self.begin(fields)?;
        let outcome = pending.run().await;
        self.finish(outcome)
    }
}

/// An accepted submission whose insert has not run yet.
#[must_use = "an accepted submission does nothing until it is run"]
pub struct PendingInsert {
    store: Arc<dyn ListingStore>,
    record: ListingRecord,
    success_delay: Duration,
}

impl PendingInsert {
    #[must_use]
    pub fn record(&self) -> &ListingRecord {
        &self.record
    }

    /// One insert against the store, then the success delay. No timeout,
    /// no retry.
    ///
    /// # Errors
    ///
    /// Whatever the store reports; the delay is skipped.
    pub async fn run(self) -> Result<(), StoreError> {
        if let Err(err) = self.store.insert(&self.record).await {
            warn!(store = self.store.name(), error = %err, "listing submission failed");
            return Err(err);
        }

        info!(
            store = self.store.name(),
            listing = %self.record.name,
            "listing submitted"
        );

        tokio::time::sleep(self.success_delay).await;
        Ok(())
    }
}

impl std::fmt::Debug for PendingInsert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingInsert")
            .field("store", &self.store.name())
            .field("success_delay", &self.success_delay)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SubmissionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionForm")
            .field("store", &self.store.name())
            .field("flow", &self.flow)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use listpad_storage::MemoryStore;
    use tokio::sync::Notify;
    use tokio::time::Instant;

    use super::*;
    use crate::error::FieldError;
    use crate::listing::Field;

    fn valid() -> ListingSubmission {
        ListingSubmission {
            name: "Acme Rockets".to_owned(),
            website: "https://acme.example.com".to_owned(),
            about: "Rockets, anvils, and portable holes.".to_owned(),
            contact_number: "5551234567".to_owned(),
        }
    }

    fn form_with(store: &MemoryStore) -> SubmissionForm {
        SubmissionForm::new(Arc::new(store.clone()))
    }

    /// Holds every insert until released, counting calls.
    #[derive(Default)]
    struct GatedStore {
        calls: AtomicUsize,
        release: Notify,
    }

    #[async_trait::async_trait]
    impl ListingStore for GatedStore {
        fn name(&self) -> &str {
            "gated"
        }

        async fn insert(&self, _record: &ListingRecord) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_field_makes_no_store_call() {
        for field in Field::ALL {
            let store = MemoryStore::new();
            let mut form = form_with(&store);
            let mut fields = valid();
            fields.set(field, "");

            let result = form.submit(fields).await;

            assert!(
                matches!(&result, Err(SubmitError::Invalid(errors)) if errors.get(field).is_some()),
                "expected a validation error for {field}, got {result:?}"
            );
            assert!(store.is_empty().await);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_submit_leaves_flow_untouched() {
        let store = MemoryStore::new();
        let mut form = form_with(&store);

        let result = form.submit(ListingSubmission::default()).await;

        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(form.flow().is_idle());
        assert!(form.progress().is_none());
        assert_eq!(form.errors().len(), 4);
        assert_eq!(form.route(), Route::SubmissionForm);
        assert!(form.notifications().active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submit_waits_then_navigates() {
        let store = MemoryStore::new();
        let mut form = form_with(&store);
        let started = Instant::now();

        let route = form.submit(valid()).await.unwrap();

        assert_eq!(route, Route::ThankYou);
        assert_eq!(form.route(), Route::ThankYou);
        assert!(started.elapsed() >= SUCCESS_DELAY);
        assert!(form.values().is_empty());
        assert!(form.flow().is_submitting);
        assert!(form.flow().show_confirmation_sequence);
        assert!(form.progress().is_some());

        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].contact_number, "5551234567");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submit_restores_editable_form() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let mut form = form_with(&store);

        let result = form.submit(valid()).await;

        assert!(matches!(result, Err(SubmitError::Persistence(_))));
        assert!(form.flow().is_idle());
        assert!(form.progress().is_none());
        assert_eq!(form.values(), &valid());
        assert_eq!(form.route(), Route::SubmissionForm);

        let active = form.notifications().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, FAILURE_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submit_can_be_retried_by_hand() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let mut form = form_with(&store);
        assert!(form.submit(valid()).await.is_err());

        store.set_unavailable(false);
        let values = form.values().clone();
        assert_eq!(form.submit(values).await.unwrap(), Route::ThankYou);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn flags_are_set_before_the_insert_runs() {
        let store = Arc::new(GatedStore::default());
        let mut form = SubmissionForm::new(store.clone());

        let pending = form.begin(valid()).unwrap();
        assert!(form.flow().is_submitting);
        assert!(form.flow().show_confirmation_sequence);
        assert!(form.progress().is_some());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pending.record().name, "Acme Rockets");

        let run = tokio::spawn(pending.run());
        while store.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        // Still mid-insert: the flags hold.
        assert!(form.flow().is_submitting);
        assert!(form.flow().show_confirmation_sequence);

        store.release.notify_one();
        let outcome = run.await.unwrap();
        assert_eq!(form.finish(outcome).unwrap(), Route::ThankYou);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_while_busy_keeps_values_and_skips_store() {
        let store = Arc::new(GatedStore::default());
        let mut form = SubmissionForm::new(store.clone());
        let _pending = form.begin(valid()).unwrap();

        let mut other = valid();
        other.name = "Someone Else".to_owned();
        let second = form.submit(other).await;

        assert!(matches!(second, Err(SubmitError::Busy)));
        assert_eq!(form.values(), &valid());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_after_success_is_refused() {
        let store = MemoryStore::new();
        let mut form = form_with(&store);

        form.submit(valid()).await.unwrap();
        let second = form.submit(valid()).await;

        assert!(matches!(second, Err(SubmitError::Busy)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn success_delay_is_configurable() {
        let store = MemoryStore::new();
        let mut form = form_with(&store).with_success_delay(Duration::from_millis(10));
        let started = Instant::now();

        form.submit(valid()).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
        assert!(elapsed < SUCCESS_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn valid_resubmit_clears_stale_errors() {
        let store = MemoryStore::new();
        let mut form = form_with(&store);

        let mut fields = valid();
        fields.about = "short".to_owned();
        assert!(form.submit(fields).await.is_err());
        assert_eq!(
            form.errors().get(Field::About),
            Some(FieldError::AboutTooShort)
        );

        form.submit(valid()).await.unwrap();
        assert!(form.errors().is_empty());
    }
}
