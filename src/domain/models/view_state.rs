/// The single display state of the front-end.
///
/// Exactly one variant is active at a time. `Result` and `Error` are
/// mutually exclusive display states; entering either replaces the other.
/// The rendering layer only ever reads the projections below; mutation
/// happens through the submit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Result(String),
    Error(String),
}

impl ViewState {
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn result(text: impl Into<String>) -> Self {
        Self::Result(text.into())
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result_text(&self) -> Option<&str> {
        match self {
            Self::Result(text) => Some(text),
            _ => None,
        }
    }

    pub fn error_text(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Idle
    }
}
