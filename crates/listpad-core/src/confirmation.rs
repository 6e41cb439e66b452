//! The thank-you screen.

use crate::route::Route;

/// Static acknowledgment shown after a successful submission.
///
/// Holds no state and reads nothing; a direct link renders it the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmationView;

impl ConfirmationView {
    pub const TITLE: &'static str = "Thank You for Your Submission!";
    pub const MESSAGE: &'static str =
        "We've received your listing and will review it shortly. You'll hear back from us soon!";
    pub const ACTION_LABEL: &'static str = "Submit Another Listing";

    /// The single action: back to the form.
    #[must_use]
    pub const fn submit_another(self) -> Route {
        Route::SubmissionForm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_returns_to_the_form() {
        assert_eq!(ConfirmationView.submit_another(), Route::SubmissionForm);
        assert_eq!(ConfirmationView.submit_another().path(), "/");
    }
}
