//! Knowledge directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the knowledge directory.
pub const KNOWLEDGE_ENV_VAR: &str = "LAB_KNOWLEDGE_DIR";

/// Get the knowledge root directory.
///
/// Resolution order:
/// 1. `LAB_KNOWLEDGE_DIR` environment variable
/// 2. `knowledge/` directory relative to workspace root
pub fn knowledge_root() -> PathBuf {
    if let Ok(root) = std::env::var(KNOWLEDGE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../knowledge")
}
