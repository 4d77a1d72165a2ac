pub mod drafts;
pub mod submission;
