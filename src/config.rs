//! Resolves where posts, templates and output live for a project.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// The optional project file at the project root.
pub const PROJECT_FILE: &str = "postsmith.yaml";

/// The contents of [`PROJECT_FILE`]. Every field is optional and relative
/// paths are resolved against the project root.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct Project {
    /// The directory holding the `*.md` post sources. Defaults to `posts`.
    posts_directory: Option<PathBuf>,

    /// The directory the blog is written to. Defaults to `blog`.
    output_directory: Option<PathBuf>,

    /// The directory holding `post.html` and `blog-listing.html`. Defaults to
    /// `templates`.
    templates_directory: Option<PathBuf>,
}

/// Every path a build touches. Constructed once at startup and passed to
/// [`crate::build::build_site`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The project root. Output paths are logged relative to it.
    pub root_directory: PathBuf,

    /// The directory searched for `*.md` post sources.
    pub posts_source_directory: PathBuf,

    /// The directory that receives one `{slug}.html` per post.
    pub posts_output_directory: PathBuf,

    /// The template for post pages.
    pub post_template: PathBuf,

    /// The template for the listing page.
    pub listing_template: PathBuf,

    /// Where the listing page is written.
    pub listing_output_path: PathBuf,
}

impl Config {
    /// The default layout under `root`:
    ///
    /// ```text
    /// posts/*.md                    sources
    /// templates/post.html           post template
    /// templates/blog-listing.html   listing template
    /// blog/posts/{slug}.html        post pages
    /// blog/index.html               listing page
    /// ```
    pub fn new(root: &Path) -> Config {
        Config::from_project(root, Project::default())
    }

    /// Builds the configuration for the project at `root`, applying
    /// [`PROJECT_FILE`] on top of the defaults if it exists.
    pub fn from_directory(root: &Path) -> Result<Config> {
        let path = root.join(PROJECT_FILE);
        if !path.exists() {
            return Ok(Config::new(root));
        }

        let contents = std::fs::read_to_string(&path).map_err(|err| Error::Io {
            path: path.clone(),
            err,
        })?;
        let project: Project = match contents.trim().is_empty() {
            true => Project::default(),
            false => serde_yaml::from_str(&contents)
                .map_err(|err| Error::DeserializeYaml { path, err })?,
        };
        Ok(Config::from_project(root, project))
    }

    fn from_project(root: &Path, project: Project) -> Config {
        let resolve = |dir: Option<PathBuf>, default: &str| -> PathBuf {
            root.join(dir.unwrap_or_else(|| PathBuf::from(default)))
        };
        let output_directory = resolve(project.output_directory, "blog");
        let templates_directory = resolve(project.templates_directory, "templates");

        Config {
            root_directory: root.to_owned(),
            posts_source_directory: resolve(project.posts_directory, "posts"),
            posts_output_directory: output_directory.join("posts"),
            post_template: templates_directory.join("post.html"),
            listing_template: templates_directory.join("blog-listing.html"),
            listing_output_path: output_directory.join("index.html"),
        }
    }
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the project file exists but can't be read.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the project file isn't valid YAML or has unknown keys.
    DeserializeYaml {
        path: PathBuf,
        err: serde_yaml::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "reading project file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml { path, err } => {
                write!(f, "loading project file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::DeserializeYaml { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::new(Path::new("/site"));
        assert_eq!(
            Config {
                root_directory: PathBuf::from("/site"),
                posts_source_directory: PathBuf::from("/site/posts"),
                posts_output_directory: PathBuf::from("/site/blog/posts"),
                post_template: PathBuf::from("/site/templates/post.html"),
                listing_template: PathBuf::from("/site/templates/blog-listing.html"),
                listing_output_path: PathBuf::from("/site/blog/index.html"),
            },
            config
        );
    }

    #[test]
    fn test_without_project_file() -> Result<()> {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::new(dir.path()), Config::from_directory(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_empty_project_file() -> Result<()> {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "\n").unwrap();
        assert_eq!(Config::new(dir.path()), Config::from_directory(dir.path())?);
        Ok(())
    }

    #[test]
    fn test_project_file_overrides() -> Result<()> {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "posts_directory: content\noutput_directory: public\n",
        )
        .unwrap();
        let config = Config::from_directory(dir.path())?;
        assert_eq!(dir.path().join("content"), config.posts_source_directory);
        assert_eq!(dir.path().join("public/posts"), config.posts_output_directory);
        assert_eq!(dir.path().join("public/index.html"), config.listing_output_path);
        assert_eq!(dir.path().join("templates/post.html"), config.post_template);
        Ok(())
    }

    #[test]
    fn test_malformed_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "posts_dir: typo\n").unwrap();
        match Config::from_directory(dir.path()) {
            Err(Error::DeserializeYaml { .. }) => {}
            other => panic!("expected Error::DeserializeYaml, got {:?}", other),
        }
    }
}
