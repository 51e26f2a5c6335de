pub mod engine;
pub mod error;
pub mod export;
pub mod gateway;
pub mod locks;
pub mod payments;
pub mod session;
pub mod token;

mod dispatcher;
mod flows;
mod screens;
mod signup;
mod texts;

pub use engine::{Engine, EngineOptions};
pub use error::BotError;
pub use gateway::{Button, ChatEvent, ChatGateway, EventKind, Keyboard, TransportError};
pub use signup::WebhookReceipt;
