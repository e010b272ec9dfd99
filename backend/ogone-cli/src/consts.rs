/// Prefix of the environment variables overriding configuration, e.g. `OGONE__AUTH__PSPID`.
pub const CONFIG_ENV_PREFIX: &str = "OGONE";
pub const CONFIG_ENV_SEPARATOR: &str = "__";

pub const CONFIG_DIRECTORY: &str = "config";

/// Crates whose logs are shown at the configured console level.
pub const LOGGED_CRATES: [&str; 6] = [
    "ogone_cli",
    "connector_integration",
    "external_services",
    "interfaces",
    "domain_types",
    "ogone_common_utils",
];
