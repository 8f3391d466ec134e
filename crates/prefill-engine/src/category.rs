//! Category names shared by provider grouping and display grouping

pub const DIRECT_DEPENDENCIES: &str = "Direct Dependencies";
pub const TRANSITIVE_DEPENDENCIES: &str = "Transitive Dependencies";
pub const ACTION_PROPERTIES: &str = "Action Properties";
pub const CLIENT_ORGANIZATION_PROPERTIES: &str = "Client Organization Properties";
pub const GLOBAL: &str = "Global";

/// Category for elements whose type tag has no display category
pub const UNCATEGORIZED: &str = "";

/// Display order: built-in categories in provider order, fallback last
pub const DISPLAY_ORDER: [&str; 6] = [
    DIRECT_DEPENDENCIES,
    TRANSITIVE_DEPENDENCIES,
    ACTION_PROPERTIES,
    CLIENT_ORGANIZATION_PROPERTIES,
    GLOBAL,
    UNCATEGORIZED,
];
