use crate::model::ids::OptionId;

/// Recorded outcome of answering one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    selected: OptionId,
    correct: bool,
}

impl AnswerResult {
    #[must_use]
    pub fn new(selected: OptionId, correct: bool) -> Self {
        Self { selected, correct }
    }

    #[must_use]
    pub fn selected(&self) -> OptionId {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn is_selected(&self, option: OptionId) -> bool {
        self.selected == option
    }
}
