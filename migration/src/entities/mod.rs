pub mod link;
pub mod submission;

pub use link::Entity as LinkEntity;
pub use submission::Entity as SubmissionEntity;
