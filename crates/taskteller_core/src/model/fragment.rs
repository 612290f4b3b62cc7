//! Raw task fragment decoded from a language-model reply.

/// Loosely structured task description, before any date/time resolution.
///
/// Produced by the decoding chain and consumed immediately by
/// `ResolvedTask::from_fragment`. Phrases are kept exactly as the model
/// wrote them; normalization happens in the resolvers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTaskFragment {
    /// Task title; may be empty, downstream keeps it as-is.
    pub title: String,
    pub due_date_phrase: Option<String>,
    pub due_time_phrase: Option<String>,
    pub priority_phrase: Option<String>,
    pub category_phrase: Option<String>,
    pub notes: Option<String>,
}

impl RawTaskFragment {
    /// Creates a fragment that only carries a title.
    ///
    /// Used by the terminal fallback, where the original user input becomes
    /// the title and nothing else is known.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
