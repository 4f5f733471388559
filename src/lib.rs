//! Bookshelf application library
//!
//! Project modules plugged into the bookshelf kernel and HTTP facade.

pub mod modules;

use bookshelf_kernel::{settings::Settings, ModuleRegistry};

/// Registry holding every project module
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Fully wired router for the given settings, without binding a socket
pub fn app_router(registry: &ModuleRegistry, settings: &Settings) -> axum::Router {
    bookshelf_http::build_router(registry, settings)
}
