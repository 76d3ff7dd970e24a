//! First-letter subfolder naming.

use crate::config::MAX_JOBS;

/// Uppercase letter for subfolder `index` (0 → 'A', 25 → 'Z'), or `None` past 'Z'.
pub fn subfolder_letter(index: usize) -> Option<char> {
    if index >= MAX_JOBS {
        return None;
    }
    Some(char::from(b'A' + index as u8))
}

/// All 26 subfolder letters in order.
pub fn subfolder_letters() -> impl Iterator<Item = char> {
    (0..MAX_JOBS).filter_map(subfolder_letter)
}

/// URL of the subfolder for `letter`, always ending in `/`.
pub fn subfolder_url(base: &str, letter: char) -> String {
    super::join_url(base, &format!("{}/", letter))
}
