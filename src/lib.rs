pub mod dates;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod probe;
pub mod publish;
pub mod summary;
