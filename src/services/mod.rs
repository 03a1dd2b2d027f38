pub mod source_steps;

pub use source_steps::SourceSteps;
