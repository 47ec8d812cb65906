//! Page-level checks and rewrites for course Markdown.

pub mod fix;
pub mod heading;
pub mod lint;
pub mod normalize;
