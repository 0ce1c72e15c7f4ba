pub mod mutation;
pub mod query;

pub use mutation::{AccountError, Mutation, NewAccount, TutorDetails};
pub use query::Query;
