//! Default configuration values

/// Version file used when an app does not name one
pub const DEFAULT_VERSION_FILE: &str = "./package.json";

/// Build context used when an app sets neither `context` nor `build_context`
pub const DEFAULT_CONTEXT: &str = ".";

/// Placeholder emitted in `matrix_init` when no init units are supplied
pub const NO_INIT_SENTINEL: &str = "__no_init__";

/// Workspace root when `GITHUB_WORKSPACE` is unset
pub const DEFAULT_WORKSPACE: &str = ".";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
