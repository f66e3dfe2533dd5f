pub mod draft;
pub mod history;
pub mod job;
pub mod profile;

pub use draft::DraftEmail;
pub use history::ApplicationHistoryEntry;
pub use job::{Job, JobCandidate};
pub use profile::UserProfile;
