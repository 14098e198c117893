//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the blog: loading the templates, building every post
//! page ([`crate::post`]), and rendering the listing page
//! ([`crate::listing`]).

use crate::config::{Config, Error as ConfigError};
use crate::listing::{sort_newest_first, Error as ListingError, ListingBuilder};
use crate::post::{Error as PostError, PostBuilder, PostMetadata};
use crate::template::{Error as TemplateError, Template};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = "md";

/// What a successful build produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// The number of post pages written.
    pub posts_built: usize,
}

/// Builds the blog described by a [`Config`]. Both templates are loaded
/// before any post is touched, so a missing template fails the build without
/// writing anything but the output directory. Post pages are then built one
/// at a time in file name order and the listing is written last, newest post
/// first.
pub fn build_site(config: &Config) -> Result<Summary> {
    std::fs::create_dir_all(&config.posts_output_directory).map_err(|err| {
        Error::CreateOutputDirectory {
            path: config.posts_output_directory.clone(),
            err,
        }
    })?;

    let post_template = Template::load(&config.post_template)?;
    let listing_template = Template::load(&config.listing_template)?;

    let sources = discover_posts(&config.posts_source_directory)?;
    if sources.is_empty() {
        info!(
            "No .md files found in {}. Creating empty blog index.",
            config.posts_source_directory.display()
        );
    }

    info!("Building {} post(s)...", sources.len());
    let post_builder = PostBuilder::new(
        &post_template,
        &config.posts_output_directory,
        &config.root_directory,
    );
    let mut posts: Vec<PostMetadata> = Vec::with_capacity(sources.len());
    for source in &sources {
        posts.push(post_builder.build(source)?);
    }

    sort_newest_first(&mut posts);

    info!("Building blog index...");
    ListingBuilder::new(
        &listing_template,
        &config.listing_output_path,
        &config.root_directory,
    )
    .write(&posts)?;

    Ok(Summary {
        posts_built: posts.len(),
    })
}

/// Returns the `*.md` files directly inside `dir`, sorted by file name. A
/// directory that doesn't exist has no posts.
fn discover_posts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = result?;
        let is_markdown = entry
            .path()
            .extension()
            .map_or(false, |ext| ext == MARKDOWN_EXTENSION);
        if entry.file_type().is_file() && is_markdown {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

/// The result of a build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can come from loading the
/// configuration or the templates, discovering sources, building posts, and
/// writing the listing.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the project configuration.
    Config(ConfigError),

    /// Returned when a template is missing or unreadable.
    Template(TemplateError),

    /// Returned when the output directory can't be created.
    CreateOutputDirectory { path: PathBuf, err: std::io::Error },

    /// Returned when the posts directory can't be listed.
    Discover(walkdir::Error),

    /// Returned for errors building a post page.
    Post(PostError),

    /// Returned for errors writing the listing page.
    Listing(ListingError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Template(err) => err.fmt(f),
            Error::CreateOutputDirectory { path, err } => {
                write!(f, "creating directory '{}': {}", path.display(), err)
            }
            Error::Discover(err) => write!(f, "finding posts: {}", err),
            Error::Post(err) => err.fmt(f),
            Error::Listing(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Template(err) => Some(err),
            Error::CreateOutputDirectory { path: _, err } => Some(err),
            Error::Discover(err) => Some(err),
            Error::Post(err) => Some(err),
            Error::Listing(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::Discover(err)
    }
}

impl From<PostError> for Error {
    /// Converts [`PostError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PostError) -> Error {
        Error::Post(err)
    }
}

impl From<ListingError> for Error {
    /// Converts [`ListingError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ListingError) -> Error {
        Error::Listing(err)
    }
}
