use shared::domain::User;

/// What the presentation layer should render right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Loading,
    /// Users in server order, already narrowed by the current search query.
    Success(Vec<User>),
    Error(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn users(&self) -> Option<&[User]> {
        match self {
            Self::Success(users) => Some(users),
            Self::Loading | Self::Error(_) => None,
        }
    }
}
