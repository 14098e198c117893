//! Splits a post source document into its YAML front matter and its Markdown
//! body. See [`parse`] for the recognized layout.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::warn;

/// The front matter fence. Both the opening and the closing delimiter are
/// lines consisting of exactly this text.
const FENCE: &str = "---";

/// The metadata block at the top of a post. Every field is optional; the
/// defaults are resolved later by [`crate::post::PostMetadata::resolve`], not
/// here, so a missing key stays `None`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// The post title.
    #[serde(default, deserialize_with = "scalar")]
    pub title: Option<String>,

    /// The post date, expected as `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "scalar")]
    pub date: Option<String>,

    /// A one-line summary of the post.
    #[serde(default, deserialize_with = "scalar")]
    pub description: Option<String>,

    /// The post's tags, in the order they were written.
    #[serde(default, deserialize_with = "scalars")]
    pub tags: Option<Vec<String>>,
}

/// Splits `input` into `(front_matter, body)`.
///
/// The document must begin (after leading whitespace) with `---` and contain
/// a later line that is exactly `---`. Anything else is treated as a document
/// without front matter and the input is returned untouched as the body.
/// Malformed YAML between the fences is logged and replaced by an empty
/// [`FrontMatter`]; it never fails the build.
///
/// ```md
/// ---
/// title: "Post Title"
/// date: "2026-02-20"
/// description: "One-line summary."
/// tags: ["tag1", "tag2"]
/// ---
/// # Body
/// ```
pub fn parse(input: &str) -> (FrontMatter, &str) {
    let trimmed = input.trim();
    if !trimmed.starts_with(FENCE) {
        return (FrontMatter::default(), input);
    }

    let (yaml_stop, body_start) = match closing_fence(trimmed) {
        Some(indices) => indices,
        None => return (FrontMatter::default(), input),
    };

    let yaml = &trimmed[FENCE.len()..yaml_stop];
    let body = trimmed[body_start..].trim();
    let front_matter = match deserialize(yaml) {
        Ok(front_matter) => front_matter,
        Err(err) => {
            warn!("YAML parse error in front matter: {}", err);
            FrontMatter::default()
        }
    };

    (front_matter, body)
}

fn deserialize(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    let front_matter: Option<FrontMatter> = serde_yaml::from_str(yaml)?;
    Ok(front_matter.unwrap_or_default())
}

/// Finds the closing fence in a document that starts with the opening fence.
/// Returns the byte offsets of the start of the closing fence line and of the
/// text right after it.
fn closing_fence(input: &str) -> Option<(usize, usize)> {
    let mut offset = match input.find('\n') {
        Some(i) => i + 1,
        None => return None,
    };
    while offset < input.len() {
        let rest = &input[offset..];
        let (line, next) = match rest.find('\n') {
            Some(i) => (&rest[..i], offset + i + 1),
            None => (rest, input.len()),
        };
        if line.trim_end() == FENCE {
            return Some((offset, next));
        }
        offset = next;
    }
    None
}

/// Renders a YAML scalar as text. Unquoted dates, numbers and booleans are
/// accepted as their literal form; `null` counts as missing.
fn scalar_text(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Sequence(_) => Err("expected a scalar, found a sequence".to_owned()),
        Value::Mapping(_) => Err("expected a scalar, found a mapping".to_owned()),
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn scalars<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Sequence(items) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                if let Some(tag) = scalar_text(item).map_err(D::Error::custom)? {
                    tags.push(tag);
                }
            }
            Ok(Some(tags))
        }
        // A lone `tags: rust` is read as a single tag.
        other => Ok(scalar_text(other)
            .map_err(D::Error::custom)?
            .map(|tag| vec![tag])),
    }
}
