//! Standard library host functions
//!
//! These make up the default global environment of every interpreter.

pub mod equality;
pub mod lists;
pub mod math;
pub mod strings;
pub mod system;
pub mod type_predicates;

use crate::tools::ToolRegistry;

/// Register all standard library tools
pub fn register_all(registry: &mut ToolRegistry) {
    math::register(registry);
    lists::register(registry);
    equality::register(registry);
    type_predicates::register(registry);
    strings::register(registry);
    system::register(registry);
}
