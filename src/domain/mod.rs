pub mod topic;

pub use topic::{normalize_id, Topic};
