//! Client-side routes of the listing flow.

/// The two views a visitor can be on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: the listing form. Default entry.
    #[default]
    SubmissionForm,
    /// `/thank-you`: the confirmation screen.
    ThankYou,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SubmissionForm => "/",
            Self::ThankYou => "/thank-you",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_and_display_agree() {
        assert_eq!(Route::SubmissionForm.path(), "/");
        assert_eq!(Route::ThankYou.path(), "/thank-you");
        assert_eq!(Route::ThankYou.to_string(), "/thank-you");
    }

    #[test]
    fn default_route_is_the_form() {
        assert_eq!(Route::default(), Route::SubmissionForm);
    }
}
