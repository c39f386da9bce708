/// Constants used throughout the cf-vault codebase
// Argument alias prefixes, tested in this order
pub const ORG_PREFIX: &str = "cf_o/";
pub const SPACE_PREFIX: &str = "cf_s/";
pub const INSTANCE_PREFIX: &str = "cf_i/";

// Separator placed between a backend path and the remainder of an aliased argument
pub const PATH_SEPARATOR: &str = "/";

// Secrets tool
pub const VAULT_BINARY: &str = "vault";
pub const VAULT_TOKEN_VAR: &str = "VAULT_TOKEN";
pub const VAULT_ADDR_VAR: &str = "VAULT_ADDR";

// Environment variable names
pub const CF_HOME_VAR: &str = "CF_HOME";
pub const CF_VAULT_LOG_VAR: &str = "CF_VAULT_LOG";
pub const CF_VAULT_BINARY_VAR: &str = "CF_VAULT_BINARY";

// Platform CLI session file, relative to CF_HOME
pub const CF_CONFIG_DIR: &str = ".cf";
pub const CF_CONFIG_FILENAME: &str = "config.json";

// Default log filter
pub const DEFAULT_LOG_FILTER: &str = "info";
