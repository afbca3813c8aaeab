//! Configuration section definitions.
//!
//! Each module corresponds to a section in `brewpress.toml`:
//!
//! | Module      | TOML Section    | Purpose                              |
//! |-------------|-----------------|--------------------------------------|
//! | `seo`       | `[seo]`         | Description budget, filler phrases   |
//! | `store`     | `[store]`       | Content export location              |
//! | `intercept` | `[[intercept]]` | Per-content-type interception rules  |

pub mod intercept;
mod seo;
mod store;

pub use seo::{MIN_DESCRIPTION_LIMIT, SeoSectionConfig};
pub use store::StoreSectionConfig;
