//! Line classification for the mixed INI / directive dialect.
//!
//! Each line is classified once into a [`LineKind`]; only
//! [`LineKind::Entry`] carries data into the mapping.

/// Which separator split an entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `key = value`, split on the first `=`.
    Equals,
    /// `key value`, split on the first run of whitespace.
    Whitespace,
}

/// Classification of a single configuration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming.
    Blank,
    /// Starts with `#` or `;`.
    Comment,
    /// `[section]` header.
    Section,
    /// A usable key/value pair, both already trimmed and non-empty.
    Entry {
        key: &'a str,
        value: &'a str,
        separator: Separator,
    },
    /// Anything else: a bare word, `key =` with no value, `= value` with no key.
    Unusable,
}

impl LineKind<'_> {
    /// Returns `true` for lines that contribute an entry.
    pub fn is_entry(&self) -> bool {
        matches!(self, LineKind::Entry { .. })
    }
}

/// Classifies one raw line.
///
/// A line containing `=` is always split on its first `=`, so values such as
/// connection strings may contain further `=` characters.  Lines without `=`
/// are split on the first run of whitespace.
pub fn classify_line(raw: &str) -> LineKind<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') || line.starts_with(';') {
        return LineKind::Comment;
    }
    if line.starts_with('[') && line.ends_with(']') {
        return LineKind::Section;
    }

    let (separator, parts) = match line.split_once('=') {
        Some(parts) => (Separator::Equals, Some(parts)),
        None => (Separator::Whitespace, line.split_once(char::is_whitespace)),
    };

    let Some((key, value)) = parts else {
        return LineKind::Unusable;
    };

    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return LineKind::Unusable;
    }

    LineKind::Entry {
        key,
        value,
        separator,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
