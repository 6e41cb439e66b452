//! Submit status of one form view.

/// The two flags that drive the submit control and the overlay.
///
/// They move together: both set when a submit attempt passes validation,
/// both cleared when the store reports a failure. After a successful
/// submission they stay set; the view is torn down by navigation instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFlowState {
    /// The submit control is disabled.
    pub is_submitting: bool,
    /// The staged-progress overlay is mounted.
    pub show_confirmation_sequence: bool,
}

impl SubmissionFlowState {
    /// Mark a submit attempt as started.
    pub fn begin(&mut self) {
        self.is_submitting = true;
        self.show_confirmation_sequence = true;
    }

    /// Return to the editable, resubmittable state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Neither flag is set.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.is_submitting && !self.show_confirmation_sequence
    }
}
