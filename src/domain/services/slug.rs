//! Link derivation shared by drafts, event validation and export filenames.

/// Lowercases, transliterates to ASCII, collapses every run of
/// non-alphanumerics into one `-` and trims hyphens at both ends.
pub fn slugify(value: &str) -> String {
    slug::slugify(value)
}

pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}
