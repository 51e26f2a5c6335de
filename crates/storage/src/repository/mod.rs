mod participants;
mod photos;
mod registrations;
mod results;
mod stages;
mod teams;

pub use participants::ParticipantRepository;
pub use photos::PhotoRepository;
pub use registrations::RegistrationRepository;
pub use results::ResultRepository;
pub use stages::StageRepository;
pub use teams::TeamRepository;

/// Cell accessor tolerant of ragged rows: the backing store trims
/// trailing empty cells, so short rows are normal, not an error.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}
