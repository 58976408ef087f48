pub mod dashboard;
pub mod entry;
