pub mod mutation;
pub mod query;

pub use mutation::{Mutation, NewSlot, TutorProfileChanges};
pub use query::Query;
