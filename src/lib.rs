//! Brewpress: SEO hygiene for a coffee-content CMS.
//!
//! Writes to configured content types pass through an [`intercept::Interceptor`]
//! that shortens the long-text field to the description budget and keeps the
//! publish timestamp stable on metadata-only updates.
//!
//! | Module      | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `seo`       | Description shortening heuristic               |
//! | `intercept` | Pre-write hooks and the write pipeline         |
//! | `store`     | `ContentStore` trait, memory and JSON backends |
//! | `content`   | Content types, records, update operations      |
//! | `config`    | `brewpress.toml` loading and validation        |
//! | `logger`    | Colored log output and progress line           |

pub mod config;
pub mod content;
pub mod intercept;
pub mod logger;
pub mod seo;
pub mod store;
pub mod utils;
