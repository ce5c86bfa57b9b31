pub mod runner;
pub mod scheduler;
pub mod transcript;

pub use runner::GameRunner;
