//! Defines [`PostMetadata`] and the [`PostBuilder`] which turns a single
//! Markdown source file into a rendered HTML page on disk.

use crate::date::format_date;
use crate::frontmatter::{self, FrontMatter};
use crate::markdown;
use crate::tag::render_tags;
use crate::template::Template;
use crate::util::relative;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What the listing page needs to know about a post once it has been built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostMetadata {
    pub title: String,

    /// The raw date from the front matter (ideally `YYYY-MM-DD`), or empty.
    pub date: String,

    pub description: String,
    pub tags: Vec<String>,

    /// The source file's stem. It names the output file, so it doesn't change
    /// when the post's title does.
    pub slug: String,
}

impl PostMetadata {
    /// Fills in defaults for anything the front matter left out. A missing
    /// title is derived from the slug (`hello-world` becomes `Hello World`);
    /// everything else defaults to empty.
    pub fn resolve(front_matter: FrontMatter, slug: &str) -> PostMetadata {
        PostMetadata {
            title: front_matter
                .title
                .unwrap_or_else(|| title_from_slug(slug)),
            date: front_matter.date.unwrap_or_default(),
            description: front_matter.description.unwrap_or_default(),
            tags: front_matter.tags.unwrap_or_default(),
            slug: slug.to_owned(),
        }
    }
}

/// Returns the slug for a source path: its file name without the extension.
pub fn slug(source_path: &Path) -> Result<&str> {
    source_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidFileName(source_path.to_owned()))
}

/// Replaces hyphens with spaces and capitalizes the first letter of every
/// run of letters, lowercasing the rest (`my-2nd-post` -> `My 2Nd Post`).
fn title_from_slug(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut in_word = false;
    for c in slug.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }
    title
}

/// Builds post pages from Markdown source files.
pub struct PostBuilder<'a> {
    /// The template for post pages.
    template: &'a Template,

    /// The directory in which `{slug}.html` files are written.
    output_directory: &'a Path,

    /// The project root; only used to shorten paths in log messages.
    root_directory: &'a Path,
}

impl<'a> PostBuilder<'a> {
    /// Constructs a new builder. See fields on [`PostBuilder`] for argument
    /// descriptions.
    pub fn new(
        template: &'a Template,
        output_directory: &'a Path,
        root_directory: &'a Path,
    ) -> PostBuilder<'a> {
        PostBuilder {
            template,
            output_directory,
            root_directory,
        }
    }

    /// Reads the post at `source_path`, renders it into the post template,
    /// writes `{output_directory}/{slug}.html` and returns the post's
    /// metadata. Broken front matter only costs the post its metadata (see
    /// [`frontmatter::parse`]); read and write failures are returned.
    pub fn build(&self, source_path: &Path) -> Result<PostMetadata> {
        let file_name = source_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        info!("Processing: {}", file_name);

        let source = fs::read_to_string(source_path).map_err(|err| Error::Read {
            path: source_path.to_owned(),
            err,
        })?;
        let (front_matter, body) = frontmatter::parse(&source);
        let post = PostMetadata::resolve(front_matter, slug(source_path)?);

        let html = self.render(&post, &markdown::to_html(body));

        let output_path = self.output_path(&post.slug);
        fs::write(&output_path, html).map_err(|err| Error::Write {
            path: output_path.clone(),
            err,
        })?;
        info!(
            "Written: {}",
            relative(&output_path, self.root_directory).display()
        );

        Ok(post)
    }

    /// Substitutes a post into the post template. `content` is the post body
    /// already rendered to HTML.
    fn render(&self, post: &PostMetadata, content: &str) -> String {
        let date_formatted = format_date(&post.date);
        let tags_html = render_tags(&post.tags);
        self.template.render(&[
            ("{{title}}", post.title.as_str()),
            ("{{date}}", post.date.as_str()),
            ("{{date_formatted}}", date_formatted.as_str()),
            ("{{description}}", post.description.as_str()),
            ("{{content}}", content),
            ("{{tags_html}}", tags_html.as_str()),
        ])
    }

    fn output_path(&self, slug: &str) -> PathBuf {
        self.output_directory.join(format!("{}.html", slug))
    }
}

/// Represents the result of a post-building operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error building a post. Front matter problems are not errors;
/// they are logged and the post is built with default metadata.
#[derive(Debug)]
pub enum Error {
    /// Returned when the source file can't be read (or isn't UTF-8).
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when the output file can't be written.
    Write { path: PathBuf, err: std::io::Error },

    /// Returned when the source file name has no UTF-8 stem to use as a slug.
    InvalidFileName(PathBuf),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "reading post '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "writing post '{}': {}", path.display(), err)
            }
            Error::InvalidFileName(path) => {
                write!(f, "invalid file name: {:?}", path)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
            Error::InvalidFileName(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    const POST_TEMPLATE: &str = "<title>{{title}}</title>\n\
        <time datetime=\"{{date}}\">{{date_formatted}}</time>\n\
        <meta name=\"description\" content=\"{{description}}\">\n\
        <article>{{content}}</article>\n\
        <div class=\"tags\">{{tags_html}}</div>\n";

    #[test]
    fn test_title_from_slug() {
        assert_eq!("Hello World", title_from_slug("hello-world"));
        assert_eq!("My 2Nd Post", title_from_slug("my-2nd-post"));
        assert_eq!("Already Title", title_from_slug("ALREADY-tITLE"));
        assert_eq!("", title_from_slug(""));
    }

    #[test]
    fn test_resolve_defaults() {
        let post = PostMetadata::resolve(FrontMatter::default(), "first-post");
        assert_eq!(
            PostMetadata {
                title: "First Post".to_owned(),
                date: String::new(),
                description: String::new(),
                tags: Vec::new(),
                slug: "first-post".to_owned(),
            },
            post
        );
    }

    #[test]
    fn test_slug_ignores_title() -> Result<()> {
        let a = PostMetadata::resolve(
            FrontMatter {
                title: Some("One title".to_owned()),
                ..FrontMatter::default()
            },
            slug(Path::new("drafts/launch.md"))?,
        );
        let b = PostMetadata::resolve(
            FrontMatter {
                title: Some("A different title".to_owned()),
                ..FrontMatter::default()
            },
            slug(Path::new("posts/launch.md"))?,
        );
        assert_eq!("launch", a.slug);
        assert_eq!(a.slug, b.slug);
        Ok(())
    }

    #[test]
    fn test_build() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let source = dir.path().join("hello.md");
        fs::write(
            &source,
            "---\ntitle: \"Hello\"\ndate: \"2026-02-20\"\ndescription: \"Greeting\"\n\
             tags: [\"x\"]\n---\n\n# Hi\n",
        )?;
        let template = Template::from(POST_TEMPLATE);
        let builder = PostBuilder::new(&template, dir.path(), dir.path());

        let post = builder.build(&source)?;
        assert_eq!(
            PostMetadata {
                title: "Hello".to_owned(),
                date: "2026-02-20".to_owned(),
                description: "Greeting".to_owned(),
                tags: vec!["x".to_owned()],
                slug: "hello".to_owned(),
            },
            post
        );

        let html = fs::read_to_string(dir.path().join("hello.html"))?;
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<time datetime=\"2026-02-20\">Feb 20, 2026</time>"));
        assert!(html.contains("content=\"Greeting\""));
        assert!(html.contains("<h1 id=\"hi\">Hi</h1>"));
        assert!(html.contains("<span class=\"tag\">x</span>"));
        Ok(())
    }

    #[test]
    fn test_build_without_front_matter() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let dir = TempDir::new()?;
        let source = dir.path().join("plain-notes.md");
        fs::write(&source, "Just some notes.")?;
        let template = Template::from(POST_TEMPLATE);
        let builder = PostBuilder::new(&template, dir.path(), dir.path());

        let post = builder.build(&source)?;
        assert_eq!("Plain Notes", post.title);
        assert_eq!("", post.date);

        let html = fs::read_to_string(dir.path().join("plain-notes.html"))?;
        assert!(html.contains("<time datetime=\"\"></time>"));
        assert!(html.contains("<p>Just some notes.</p>"));
        assert!(html.contains("<div class=\"tags\"></div>"));
        Ok(())
    }

    #[test]
    fn test_build_unreadable_source() {
        let dir = TempDir::new().unwrap();
        let template = Template::from(POST_TEMPLATE);
        let builder = PostBuilder::new(&template, dir.path(), dir.path());
        match builder.build(&dir.path().join("missing.md")) {
            Err(Error::Read { .. }) => {}
            other => panic!("expected Error::Read, got {:?}", other),
        }
    }

    #[test]
    fn test_build_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("post.md");
        fs::write(&source, "text").unwrap();
        let template = Template::from(POST_TEMPLATE);
        let missing = dir.path().join("no-such-dir");
        let builder = PostBuilder::new(&template, &missing, dir.path());
        match builder.build(&source) {
            Err(Error::Write { path, .. }) => {
                assert_eq!(missing.join("post.html"), path)
            }
            other => panic!("expected Error::Write, got {:?}", other),
        }
    }
}
