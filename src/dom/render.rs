use crate::dom::element::{display_from_style, Element};
use std::ops::Range;

/// Serializes a region's current state back to HTML.
///
/// Untouched markup is copied from `source` as written. An element whose
/// classes or display changed gets a rebuilt start tag, and one whose text was
/// set gets its children replaced by that text.
pub fn render_fragment(source: &str, elements: &[Element]) -> String {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for el in elements {
        if el.tag_changed() {
            edits.push((el.start_tag.clone(), start_tag(source, el)));
        }
        if let (Some(text), Some(content)) = (el.text_override(), el.content.as_ref()) {
            edits.push((content.clone(), escape_text(text)));
        }
    }
    if edits.is_empty() {
        return source.to_string();
    }
    edits.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        // inside content that was already replaced
        if range.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

fn start_tag(source: &str, el: &Element) -> String {
    let mut tag = format!("<{}", el.tag);
    let mut wrote_class = false;
    let mut wrote_style = false;

    for (name, value) in el.attrs() {
        match name.as_str() {
            "class" => {
                wrote_class = true;
                push_attr(&mut tag, name, &el.classes().join(" "));
            }
            "style" => {
                wrote_style = true;
                push_attr(&mut tag, name, &restyle(value, el.display()));
            }
            _ => push_attr(&mut tag, name, value),
        }
    }
    if !wrote_class && !el.classes().is_empty() {
        push_attr(&mut tag, "class", &el.classes().join(" "));
    }
    if !wrote_style {
        if let Some(display) = el.display() {
            push_attr(&mut tag, "style", &format!("display: {}", display));
        }
    }

    let original = &source[el.start_tag.clone()];
    if original.trim_end_matches('>').trim_end().ends_with('/') {
        tag.push_str(" />");
    } else {
        tag.push('>');
    }
    tag
}

fn push_attr(tag: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        tag.push_str(&format!(" {}", name));
    } else {
        tag.push_str(&format!(" {}=\"{}\"", name, value.replace('"', "&quot;")));
    }
}

// keeps every declaration but display, then appends the current display
fn restyle(style: &str, display: Option<&str>) -> String {
    let mut decls: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && display_from_style(decl).is_none())
        .map(str::to_string)
        .collect();
    if let Some(display) = display {
        decls.push(format!("display: {}", display));
    }
    decls.join("; ")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
