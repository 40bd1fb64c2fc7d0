pub mod init;
pub mod play;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

/// Pick the word list from the command line, falling back to the config.
pub(crate) fn resolve_word_list(
    words: Option<PathBuf>,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    words
        .or_else(|| configured.map(Path::to_path_buf))
        .ok_or_else(|| {
            anyhow::anyhow!("no word list given; pass --words or set word_list in lexiquiz.toml")
        })
}
