pub mod builder;
pub mod evaluator;
