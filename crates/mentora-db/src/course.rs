pub mod mutation;
pub mod query;

pub use mutation::{CourseChanges, Mutation, NewCourse};
pub use query::{CourseFilter, Query};
