pub mod mutation;
pub mod query;

use mentora_entity::progress::Model as Progress;

pub use mutation::Mutation;
pub use query::Query;

/// A progress row together with the modules completed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub progress: Progress,
    pub completed_modules: Vec<String>,
}
