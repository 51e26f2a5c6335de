pub(crate) mod broadcast;
pub(crate) mod create_stage;
pub(crate) mod registration;
pub(crate) mod team;
