//! Phrase tables used when condensing meta descriptions.

/// Marketing filler dropped outright (case-insensitive, whole words).
///
/// Longer phrases come first so that "ultimate guide to" wins over any
/// shorter overlapping entry.
pub const FILLER_PHRASES: &[&str] = &[
    "everything you need to know about",
    "ultimate guide to",
    "complete guide to",
    "comprehensive",
    "definitive",
    "in-depth",
    "basically",
    "actually",
    "really",
    "very",
];

/// Wordy phrases and their shorter equivalents, applied in order.
///
/// Patterns keep their trailing space so that only phrase-initial matches
/// inside running text are rewritten.
pub const WORDY_PHRASES: &[(&str, &str)] = &[
    ("learn how to ", " "),
    ("dive deep into ", "explore "),
    ("due to the fact that ", "because "),
    ("in order to ", "to "),
    ("a wide range of ", "many "),
    ("a variety of ", "various "),
    ("take a look at ", "see "),
    ("whether you are ", "if you're "),
    ("make sure to ", ""),
];
