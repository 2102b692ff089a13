//! Dash module - page layout, chart handlers and the callback registry

pub mod callbacks;
pub mod handlers;
pub mod layout;

pub use callbacks::{
    Args, CallbackError, CallbackOutput, CallbackRegistry, CallbackSpec, ControlState, Dependency,
};
pub use layout::Layout;

/// Registry with the dashboard's two chart bindings.
pub fn build_callbacks() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    handlers::register_callbacks(&mut registry);
    registry
}
