use {
    crate::issue::Issue,
    serde::{Deserialize, Serialize},
};

/// Errors and warnings collected while validating an order.
///
/// Both lists keep insertion order. An empty value means no issue of that
/// class was found, never that the check did not run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Diagnostics {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Diagnostics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, issue: impl Into<Issue>) {
        self.errors.push(issue.into());
    }

    pub fn add_warning(&mut self, issue: impl Into<Issue>) {
        self.warnings.push(issue.into());
    }

    /// Errors of `self` followed by the errors of `other`, and likewise for
    /// warnings.
    pub fn concat(mut self, other: Diagnostics) -> Self {
        self.extend(other);
        self
    }

    /// In place version of [`Diagnostics::concat`].
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warnings
    }
}

impl FromIterator<Diagnostics> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostics>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::concat)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::issue::{OfferIssue, StatusIssue, TimeIssue},
        serde_json::json,
    };

    #[test]
    fn empty_has_no_issues() {
        let diagnostics = Diagnostics::empty();
        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.has_warnings());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn concat_keeps_lists_separate_and_ordered() {
        let mut a = Diagnostics::empty();
        a.add_error(TimeIssue::Expired);
        a.add_warning(TimeIssue::NotActive);
        a.add_error(TimeIssue::EndTimeBeforeStartTime);

        let mut b = Diagnostics::empty();
        b.add_warning(OfferIssue::MoreThanOneItem);
        b.add_error(StatusIssue::Cancelled);

        let combined = a.concat(b);
        assert_eq!(
            combined.errors(),
            [
                Issue::from(TimeIssue::Expired),
                Issue::from(TimeIssue::EndTimeBeforeStartTime),
                Issue::from(StatusIssue::Cancelled),
            ]
        );
        assert_eq!(
            combined.warnings(),
            [
                Issue::from(TimeIssue::NotActive),
                Issue::from(OfferIssue::MoreThanOneItem),
            ]
        );
        assert!(combined.has_errors());
    }

    #[test]
    fn collects_in_iteration_order() {
        let parts = [StatusIssue::Cancelled, StatusIssue::FullyFilled].map(|issue| {
            let mut diagnostics = Diagnostics::empty();
            diagnostics.add_error(issue);
            diagnostics
        });
        let combined: Diagnostics = parts.into_iter().collect();
        assert_eq!(
            combined.errors(),
            [Issue::from(StatusIssue::Cancelled), Issue::from(StatusIssue::FullyFilled)]
        );
    }

    #[test]
    fn serializes_codes() {
        let mut diagnostics = Diagnostics::empty();
        diagnostics.add_error(TimeIssue::Expired);
        diagnostics.add_warning(OfferIssue::NativeItem);
        assert_eq!(
            serde_json::to_value(&diagnostics).unwrap(),
            json!({ "errors": [901], "warnings": [603] })
        );
    }
}
