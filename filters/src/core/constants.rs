// =============================================================================
// Filter Key Grammar
// =============================================================================

/// Separates the field path from the operator suffix (`age__gte`)
pub const OPERATOR_DELIMITER: &str = "__";

/// Separates the members of an OR-group (`name__like___or___surname__like`)
pub const OR_DELIMITER: &str = "___or___";

/// Separates a join field from the joined entity's field (`owner.name`)
pub const JOIN_DELIMITER: char = '.';

// =============================================================================
// Parameter Naming
// =============================================================================

/// Default bind parameter prefix (keeps names valid identifiers)
pub const DEFAULT_PARAMETER_PREFIX: &str = "f";

/// Default number of md5 hex chars appended to the prefix
pub const DEFAULT_PARAMETER_HASH_LEN: usize = 5;

/// Length of an md5 digest in hex chars
pub const MAX_PARAMETER_HASH_LEN: usize = 32;

// =============================================================================
// JSON Input Limits
// =============================================================================

/// Maximum size of filter JSON in bytes (64KB)
pub const DEFAULT_MAX_FILTER_JSON_BYTES: usize = 64 * 1024;

/// Maximum number of filter entries
pub const DEFAULT_MAX_FILTERS: usize = 50;

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the default combination mode (`and` / `or`)
pub const ENV_MODE: &str = "QUERY_FILTERS_MODE";

/// Environment variable to enable LIKE metacharacter escaping
pub const ENV_ESCAPE_LIKE: &str = "QUERY_FILTERS_ESCAPE_LIKE";

/// Environment variable for the bind parameter prefix
pub const ENV_PARAMETER_PREFIX: &str = "QUERY_FILTERS_PARAMETER_PREFIX";

/// Environment variable for the maximum number of filter entries
pub const ENV_MAX_FILTERS: &str = "QUERY_FILTERS_MAX_FILTERS";
