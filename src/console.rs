//! The registrar console's route declaration.
//!
//! ```text
//! ''            -> redirect /home (full)
//! registrars    -> registrar picker
//! home          -> home            [registrar]
//! tlds          -> tlds            [registrar]
//! settings      -> settings shell  [registrar]
//!   ''          -> redirect contact (full)
//!   contact | whois | security | epp-password | users | registrars
//! ```
//!
//! `security` and `epp-password` are two independent leaves bound to the same
//! view.

use crate::error::ConfigError;
use crate::guard::GuardRegistry;
use crate::router::RouteTree;
use crate::spec::{build_tree, PathMatch, RouteDecl};
use std::sync::Arc;

pub const REGISTRAR_GUARD: &str = "registrar";

pub mod views {
    pub const REGISTRAR: &str = "registrar";
    pub const HOME: &str = "home";
    pub const TLDS: &str = "tlds";
    pub const SETTINGS: &str = "settings";
    pub const SETTINGS_CONTACT: &str = "settings.contact";
    pub const SETTINGS_WHOIS: &str = "settings.whois";
    pub const SETTINGS_SECURITY: &str = "settings.security";
    pub const SETTINGS_USERS: &str = "settings.users";
    pub const SETTINGS_REGISTRARS: &str = "settings.registrars";
}

/// The static declaration, in declaration order.
#[must_use]
pub fn console_routes() -> Vec<RouteDecl> {
    vec![
        RouteDecl::redirect("", "/home", PathMatch::Full),
        RouteDecl::view("registrars", views::REGISTRAR),
        RouteDecl::view("home", views::HOME).guarded(REGISTRAR_GUARD),
        RouteDecl::view("tlds", views::TLDS).guarded(REGISTRAR_GUARD),
        RouteDecl::view("settings", views::SETTINGS)
            .guarded(REGISTRAR_GUARD)
            .with_children(vec![
                RouteDecl::redirect("", "contact", PathMatch::Full),
                RouteDecl::view("contact", views::SETTINGS_CONTACT),
                RouteDecl::view("whois", views::SETTINGS_WHOIS),
                RouteDecl::view("security", views::SETTINGS_SECURITY),
                RouteDecl::view("epp-password", views::SETTINGS_SECURITY),
                RouteDecl::view("users", views::SETTINGS_USERS),
                RouteDecl::view("registrars", views::SETTINGS_REGISTRARS),
            ]),
    ]
}

/// Build the console tree with the console guard registry.
pub fn console_tree() -> Result<Arc<RouteTree>, ConfigError> {
    build_tree(&console_routes(), &GuardRegistry::console())
}
