//! The library code for the `postsmith` static blog generator. A build is a
//! straight pipeline, run once per invocation:
//!
//! 1. Loading the post and listing templates ([`crate::template`])
//! 2. Building one page per Markdown source ([`crate::post`]): splitting off
//!    the front matter ([`crate::frontmatter`]), rendering the body
//!    ([`crate::markdown`]), and substituting the results into the post
//!    template
//! 3. Sorting every post's metadata newest first and rendering the listing
//!    page ([`crate::listing`])
//!
//! [`crate::build::build_site`] drives those steps from a [`crate::config::Config`].
//! Templates are plain HTML with literal `{{placeholder}}` tokens; nothing is
//! evaluated and nothing is escaped.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod date;
pub mod frontmatter;
pub mod listing;
pub mod markdown;
pub mod post;
pub mod tag;
pub mod template;
mod util;
