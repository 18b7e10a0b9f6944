//! Move date-prefixed blog posts (`_posts/2021-05-01-my-post.md`) into a
//! directory-per-post layout (`posts/my-post/index.md`), adding a
//! `date: "2021-05-01"` line to each post's front matter.

pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod output;
pub mod store;
pub mod tokens;
