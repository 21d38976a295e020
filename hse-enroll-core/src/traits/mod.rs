//! Backend capability traits

mod authenticator;
mod email_checker;
mod program_directory;
mod registration_submitter;
mod remote_backend;

pub use authenticator::Authenticator;
pub use email_checker::EmailAvailabilityChecker;
pub use program_directory::ProgramDirectory;
pub use registration_submitter::RegistrationSubmitter;
pub use remote_backend::RemoteBackend;
