pub mod mutation;
pub mod query;

pub use mutation::{EnrollmentError, Mutation};
pub use query::Query;
