//! Shared helpers for values that end up on a remote shell command line.

/// Punctuation allowed in a plain shell word besides ASCII letters and digits.
const PLAIN_WORD_PUNCTUATION: &[char] = &['-', '_', '.', '/', ':', '@', '+', '=', ',', '%', '~'];

/// Returns true if `word` is non-empty and passes through `sh` without quoting.
pub fn is_plain_shell_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || PLAIN_WORD_PUNCTUATION.contains(&ch))
}

/// Returns true if the remote path is a plain shell word rooted at `/`.
pub fn is_absolute_remote_path(path: &str) -> bool {
    path.starts_with('/') && is_plain_shell_word(path)
}

/// Joins a remote directory and a file name with exactly one separator.
pub fn join_remote_path(dir: &str, file_name: &str) -> String {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.is_empty() {
        return format!("/{file_name}");
    }
    format!("{trimmed}/{file_name}")
}
