use crate::dom::element::Element;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

// fragments are trusted site content, so a tag scanner is enough to index them.
// it tracks nesting for `closest` lookups, direct text for form defaults, and
// the byte spans the renderer splices changed elements back into.

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern compiles"));

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("tag pattern compiles")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/"'>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern compiles")
});

const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn parse_fragment(html: &str) -> Vec<Element> {
    // comments are blanked to same-length padding so offsets stay valid in `html`
    let masked = COMMENT.replace_all(html, |caps: &regex::Captures| " ".repeat(caps[0].len()));
    let mut elements: Vec<Element> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut cursor = 0;

    for caps in TAG.captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        append_text(&mut elements, &open, &html[cursor..whole.start()]);
        cursor = whole.end();

        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let tag = caps
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        if closing {
            // unbalanced closers are dropped; a matching one closes everything above it
            if let Some(pos) = open.iter().rposition(|&i| elements[i].tag == tag) {
                for &i in &open[pos..] {
                    close(&mut elements[i], whole.start());
                }
                open.truncate(pos);
            }
            continue;
        }

        let raw_attrs = caps.get(3).map_or("", |m| m.as_str());
        let self_closing = raw_attrs.trim_end().ends_with('/');
        let void = VOID_TAGS.contains(&tag.as_str());

        let index = elements.len();
        let mut element = Element::new(tag, open.last().copied(), parse_attrs(raw_attrs));
        element.start_tag = whole.range();

        if !self_closing && !void {
            element.content = Some(whole.end()..whole.end());
            open.push(index);
        }
        elements.push(element);
    }

    append_text(&mut elements, &open, &html[cursor..]);
    for &i in &open {
        close(&mut elements[i], html.len());
    }
    elements
}

fn close(element: &mut Element, end: usize) {
    if let Some(content) = element.content.as_mut() {
        content.end = end;
    }
}

fn append_text(elements: &mut [Element], open: &[usize], text: &str) {
    let text = COMMENT.replace_all(text, "");
    if text.is_empty() {
        return;
    }
    if let Some(&top) = open.last() {
        elements[top].push_text(&text);
    }
}

fn parse_attrs(raw: &str) -> BTreeMap<String, String> {
    ATTR.captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}
