use thiserror::Error;

use crate::gateway::TransportError;
use crate::payments::PaymentError;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Stage not found")]
    StageNotFound,

    #[error("Registration is closed for this stage")]
    RegistrationClosed,

    #[error("Already registered for this stage")]
    AlreadyRegistered,

    #[error("Participant is not registered")]
    ParticipantNotRegistered,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl BotError {
    /// Plain-language reply for errors the chat user caused and can
    /// act on. `None` means the error is an internal failure and the
    /// user gets a generic message instead.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            BotError::StageNotFound => Some(crate::texts::STAGE_NOT_FOUND),
            BotError::RegistrationClosed => Some(crate::texts::REGISTRATION_CLOSED),
            BotError::AlreadyRegistered => Some(crate::texts::ALREADY_REGISTERED),
            BotError::ParticipantNotRegistered => Some(crate::texts::NOT_REGISTERED_YET),
            BotError::RegistrationNotFound => None,
            BotError::Storage(_) | BotError::Payment(_) | BotError::Transport(_) => None,
        }
    }
}
