//! Renders post tags as HTML fragments for both post pages and the listing.

/// Renders each tag as `<span class="tag">{tag}</span>`, one per line, in the
/// given order. Tag text is inserted verbatim (no HTML escaping), so tags are
/// expected to be plain words. An empty slice renders as the empty string.
pub fn render_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, tag.as_ref()))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_tags() {
        let tags: [&str; 0] = [];
        assert_eq!("", render_tags(&tags));
    }

    #[test]
    fn test_tags_keep_input_order() {
        assert_eq!(
            "<span class=\"tag\">b</span>\n<span class=\"tag\">a</span>",
            render_tags(&["b", "a"])
        );
    }

    #[test]
    fn test_tag_text_is_verbatim() {
        assert_eq!(
            "<span class=\"tag\">C++ & <Rust></span>",
            render_tags(&[String::from("C++ & <Rust>")])
        );
    }
}
