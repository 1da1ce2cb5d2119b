mod candidate;
mod email;
mod job;

pub use candidate::Candidate;
pub use email::{DeliveryDetail, DraftField, EmailDraft};
pub use job::Job;
