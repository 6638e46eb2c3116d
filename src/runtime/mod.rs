//! Runtime execution for cidlang programs

mod environment;
mod lisp_evaluator;
mod procedure;

pub use environment::Environment;
pub use lisp_evaluator::LispEvaluator;
pub use procedure::Procedure;
