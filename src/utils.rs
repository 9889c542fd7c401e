use std::borrow::Cow;
use std::os::fd::RawFd;

/// Trims `word` and, when `fold_case` is set, upper-cases it.
///
/// Upper-casing uses the locale-independent Unicode mapping, so a dotted `i`
/// becomes `I` rather than the Turkish `İ`.
pub fn normalize (word: &str, fold_case: bool) -> Cow<'_, str> {
    let word = word.trim();

    if fold_case && word.chars().any(|ch| ch.to_uppercase().ne(std::iter::once(ch))) {
        Cow::Owned(word.to_uppercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Longest prefix shared by all `completions`, never shorter than `word`.
///
/// Every completion is expected to start with `word`.
pub fn longest_common_prefix <T: AsRef<str>>(word: &str, completions: &[T]) -> String {
    let Some((first, rest)) = completions.split_first() else {
        return word.to_string();
    };

    let first = first.as_ref();
    let mut end = first.len();

    for comp in rest {
        let shared: usize = first.chars()
            .zip(comp.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();

        end = end.min(shared);
    }

    if end < word.len() {
        return word.to_string();
    }

    first[..end].to_string()
}

pub fn is_terminal (fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}
