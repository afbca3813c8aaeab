//! SEO text handling.
//!
//! - `shorten` - meta-description shortening heuristic
//! - `phrases` - filler and wordy phrase tables

mod phrases;
mod shorten;

pub use phrases::{FILLER_PHRASES, WORDY_PHRASES};
pub use shorten::{DEFAULT_LIMIT, Shortener, shorten};
