mod participant;
mod photo;
mod registration;
mod result;
pub mod stage;
pub(crate) mod team;

pub use participant::Participant;
pub use photo::Photo;
pub use registration::{PayStatus, Registration, Role};
pub use result::StageResult;
pub use stage::Stage;
pub use team::Team;
