pub mod list;
pub mod refresh;
pub mod schedule;
pub mod search;
