//! Content type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema category of a CMS record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Blog post
    Article,
    /// Taxonomy entry grouping articles
    Category,
    /// Product review (grinders, machines, beans)
    Product,
    /// Brewing recipe
    Recipe,
    /// Long-form how-to guide
    Guide,
}

impl ContentType {
    /// All content types, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Article,
        Self::Category,
        Self::Product,
        Self::Recipe,
        Self::Guide,
    ];

    /// Lowercase identifier used in config files and store exports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Category => "category",
            Self::Product => "product",
            Self::Recipe => "recipe",
            Self::Guide => "guide",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown content type identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type `{0}` (expected one of: article, category, product, recipe, guide)")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept plural forms too, the CMS admin API uses them in routes
        match s.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" => Ok(Self::Article),
            "category" | "categories" => Ok(Self::Category),
            "product" | "products" => Ok(Self::Product),
            "recipe" | "recipes" => Ok(Self::Recipe),
            "guide" | "guides" => Ok(Self::Guide),
            _ => Err(UnknownContentType(s.to_string())),
        }
    }
}
