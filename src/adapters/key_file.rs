//! Key file adapter — one key per file, stored as standard base64 text.
//!
//! Loading tolerates surrounding whitespace (editors add trailing newlines).

use std::path::Path;

use crate::crypto::envelope::{from_base64, to_base64};
use crate::domain::SecCwResult;

/// Write `key` to `path` as a single base64 line.
pub fn save_key(key: &[u8], path: &Path) -> SecCwResult<()> {
    std::fs::write(path, format!("{}\n", to_base64(key)))?;
    log::debug!("saved {}-byte key to {}", key.len(), path.display());
    Ok(())
}

/// Read a base64 key file.
pub fn load_key(path: &Path) -> SecCwResult<Vec<u8>> {
    let text = std::fs::read_to_string(path)?;
    from_base64(text.trim())
}
