use std::fmt;

use serde::Serialize;

/// Final classification of a completed session: whether a suggestion was
/// used, whether the user edited the form, and whether it was submitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    NoSuggestionFormChangedSubmitted,
    NoSuggestionFormChangedNotSubmitted,
    NoSuggestionFormUnchangedSubmitted,
    NoSuggestionFormUnchangedNotSubmitted,
    SuggestionUsedFormChangedSubmitted,
    SuggestionUsedFormChangedNotSubmitted,
    SuggestionUsedFormUnchangedSubmitted,
    SuggestionUsedFormUnchangedNotSubmitted,
}

impl SessionOutcome {
    pub const ALL: [SessionOutcome; 8] = [
        SessionOutcome::NoSuggestionFormChangedSubmitted,
        SessionOutcome::NoSuggestionFormChangedNotSubmitted,
        SessionOutcome::NoSuggestionFormUnchangedSubmitted,
        SessionOutcome::NoSuggestionFormUnchangedNotSubmitted,
        SessionOutcome::SuggestionUsedFormChangedSubmitted,
        SessionOutcome::SuggestionUsedFormChangedNotSubmitted,
        SessionOutcome::SuggestionUsedFormUnchangedSubmitted,
        SessionOutcome::SuggestionUsedFormUnchangedNotSubmitted,
    ];

    pub fn classify(suggestion_used: bool, form_changed: bool, submitted: bool) -> Self {
        match (suggestion_used, form_changed, submitted) {
            (false, true, true) => SessionOutcome::NoSuggestionFormChangedSubmitted,
            (false, true, false) => SessionOutcome::NoSuggestionFormChangedNotSubmitted,
            (false, false, true) => SessionOutcome::NoSuggestionFormUnchangedSubmitted,
            (false, false, false) => SessionOutcome::NoSuggestionFormUnchangedNotSubmitted,
            (true, true, true) => SessionOutcome::SuggestionUsedFormChangedSubmitted,
            (true, true, false) => SessionOutcome::SuggestionUsedFormChangedNotSubmitted,
            (true, false, true) => SessionOutcome::SuggestionUsedFormUnchangedSubmitted,
            (true, false, false) => SessionOutcome::SuggestionUsedFormUnchangedNotSubmitted,
        }
    }

    /// Stable histogram bucket.
    pub fn ordinal(&self) -> u8 {
        match self {
            SessionOutcome::NoSuggestionFormChangedSubmitted => 0,
            SessionOutcome::NoSuggestionFormChangedNotSubmitted => 1,
            SessionOutcome::NoSuggestionFormUnchangedSubmitted => 2,
            SessionOutcome::NoSuggestionFormUnchangedNotSubmitted => 3,
            SessionOutcome::SuggestionUsedFormChangedSubmitted => 4,
            SessionOutcome::SuggestionUsedFormChangedNotSubmitted => 5,
            SessionOutcome::SuggestionUsedFormUnchangedSubmitted => 6,
            SessionOutcome::SuggestionUsedFormUnchangedNotSubmitted => 7,
        }
    }

    pub fn suggestion_used(&self) -> bool {
        self.ordinal() >= 4
    }

    pub fn form_changed(&self) -> bool {
        self.ordinal() % 4 < 2
    }

    pub fn submitted(&self) -> bool {
        self.ordinal() % 2 == 0
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionOutcome::NoSuggestionFormChangedSubmitted => {
                "no-suggestion.form-changed.submitted"
            }
            SessionOutcome::NoSuggestionFormChangedNotSubmitted => {
                "no-suggestion.form-changed.not-submitted"
            }
            SessionOutcome::NoSuggestionFormUnchangedSubmitted => {
                "no-suggestion.form-unchanged.submitted"
            }
            SessionOutcome::NoSuggestionFormUnchangedNotSubmitted => {
                "no-suggestion.form-unchanged.not-submitted"
            }
            SessionOutcome::SuggestionUsedFormChangedSubmitted => {
                "suggestion-used.form-changed.submitted"
            }
            SessionOutcome::SuggestionUsedFormChangedNotSubmitted => {
                "suggestion-used.form-changed.not-submitted"
            }
            SessionOutcome::SuggestionUsedFormUnchangedSubmitted => {
                "suggestion-used.form-unchanged.submitted"
            }
            SessionOutcome::SuggestionUsedFormUnchangedNotSubmitted => {
                "suggestion-used.form-unchanged.not-submitted"
            }
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_combinations_are_distinct() {
        let mut seen = HashSet::new();
        for suggestion in [false, true] {
            for changed in [false, true] {
                for submitted in [false, true] {
                    let outcome = SessionOutcome::classify(suggestion, changed, submitted);
                    assert_eq!(outcome.suggestion_used(), suggestion);
                    assert_eq!(outcome.form_changed(), changed);
                    assert_eq!(outcome.submitted(), submitted);
                    assert!(seen.insert(outcome.ordinal()));
                }
            }
        }
        assert_eq!(seen.len(), SessionOutcome::ALL.len());
    }

    #[test]
    fn label_of_full_interaction() {
        let outcome = SessionOutcome::classify(true, true, true);
        assert_eq!(outcome.label(), "suggestion-used.form-changed.submitted");
        assert_eq!(outcome.ordinal(), 4);
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        for (idx, outcome) in SessionOutcome::ALL.iter().enumerate() {
            assert_eq!(outcome.ordinal() as usize, idx);
        }
    }
}
