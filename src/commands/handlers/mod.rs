//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add RolesHandler (admins, addadmin, removeadmin, restricted, restrict, unrestrict)
//! - 1.0.0: Initial release with FoodHandler, CatalogHandler and UtilityHandler

pub mod catalog;
pub mod food;
pub mod roles;
pub mod utility;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(food::FoodHandler),
        Arc::new(catalog::CatalogHandler),
        Arc::new(roles::RolesHandler),
    ]
}
