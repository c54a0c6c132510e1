pub mod compare;
pub mod models;
pub mod serve;

pub use compare::CompareCommand;
pub use serve::ServeCommand;
