//! Renders the listing page: one entry per post, newest first.

use crate::date::format_date;
use crate::post::PostMetadata;
use crate::tag::render_tags;
use crate::template::Template;
use crate::util::relative;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rendered in place of the post list when there are no posts.
pub const EMPTY_LISTING: &str = "<p>No posts yet.</p>";

/// Sorts posts by date, most recent first. Dates are compared as plain
/// strings, which orders `YYYY-MM-DD` dates correctly and puts posts without a
/// date last. The sort is stable: posts with the same date keep their order.
pub fn sort_newest_first(posts: &mut [PostMetadata]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Builds the listing page from post metadata.
pub struct ListingBuilder<'a> {
    /// The template for the listing page. Its `{{post_list_html}}` token is
    /// replaced with the rendered entries.
    template: &'a Template,

    /// Where the listing page is written.
    output_path: &'a Path,

    /// The project root; only used to shorten paths in log messages.
    root_directory: &'a Path,
}

impl<'a> ListingBuilder<'a> {
    pub fn new(
        template: &'a Template,
        output_path: &'a Path,
        root_directory: &'a Path,
    ) -> ListingBuilder<'a> {
        ListingBuilder {
            template,
            output_path,
            root_directory,
        }
    }

    /// Renders the listing page with one entry per post, in the order given.
    pub fn render(&self, posts: &[PostMetadata]) -> String {
        let post_list_html = match posts.is_empty() {
            true => EMPTY_LISTING.to_owned(),
            false => posts
                .iter()
                .map(listing_item)
                .collect::<Vec<String>>()
                .join("\n"),
        };
        self.template
            .render(&[("{{post_list_html}}", post_list_html.as_str())])
    }

    /// Renders the listing page and writes it to disk.
    pub fn write(&self, posts: &[PostMetadata]) -> Result<()> {
        std::fs::write(self.output_path, self.render(posts)).map_err(|err| {
            Error::Write {
                path: self.output_path.to_owned(),
                err,
            }
        })?;
        info!(
            "Written: {}",
            relative(self.output_path, self.root_directory).display()
        );
        Ok(())
    }
}

/// Renders a single listing entry. Post pages live in `posts/` next to the
/// listing page, so links are relative.
fn listing_item(post: &PostMetadata) -> String {
    format!(
        r#"          <article class="blog-post-item">
            <time class="blog-post-date" datetime="{date}">{date_formatted}</time>
            <div>
              <a href="posts/{slug}.html" class="blog-post-title">{title}</a>
              <p class="blog-post-desc">{description}</p>
              <div class="blog-post-tags">{tags_html}</div>
            </div>
          </article>"#,
        date = post.date,
        date_formatted = format_date(&post.date),
        slug = post.slug,
        title = post.title,
        description = post.description,
        tags_html = render_tags(&post.tags),
    )
}

/// The result of a fallible listing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error writing the listing page.
#[derive(Debug)]
pub enum Error {
    /// Returned when the listing file can't be written.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write { path, err } => {
                write!(f, "writing listing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write { path: _, err } => Some(err),
        }
    }
}
