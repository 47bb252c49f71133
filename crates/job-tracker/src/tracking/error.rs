/// Failures surfaced to whoever drives the tracker. Each kind carries a fixed, user-displayable
/// message and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please fill in all required fields.")]
    EmptyFields,
    #[error("The application could not be found.")]
    ApplicationNotFound,
    #[error("Failed to save the application. Please try again.")]
    SaveFailed,
    #[error("Please enter a valid date.")]
    InvalidDate,
}

impl TrackerError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::EmptyFields => "Please fill in all required fields.",
            Self::ApplicationNotFound => "The application could not be found.",
            Self::SaveFailed => "Failed to save the application. Please try again.",
            Self::InvalidDate => "Please enter a valid date.",
        }
    }

    pub const fn kind_label(self) -> &'static str {
        match self {
            Self::InvalidEmail => "InvalidEmail",
            Self::EmptyFields => "EmptyFields",
            Self::ApplicationNotFound => "ApplicationNotFound",
            Self::SaveFailed => "SaveFailed",
            Self::InvalidDate => "InvalidDate",
        }
    }
}
