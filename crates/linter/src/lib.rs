pub mod arguments;
mod run;

pub use run::start;
