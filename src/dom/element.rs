use std::collections::BTreeMap;
use std::ops::Range;

const FORM_FIELDS: [&str; 3] = ["input", "textarea", "select"];

/// One element of a parsed fragment, plus the live state scripts mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub parent: Option<usize>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    own_text: String,
    text_override: Option<String>,
    value_override: Option<String>,
    display: Option<String>,
    // byte spans in the region's source html
    pub(crate) start_tag: Range<usize>,
    pub(crate) content: Option<Range<usize>>,
}

impl Element {
    pub fn new(tag: String, parent: Option<usize>, attrs: BTreeMap<String, String>) -> Self {
        let classes = parsed_classes(&attrs);
        let display = parsed_display(&attrs);

        Self {
            tag,
            parent,
            attrs,
            classes,
            own_text: String::new(),
            text_override: None,
            value_override: None,
            display,
            start_tag: 0..0,
            content: None,
        }
    }

    /// Attributes as written in the source, before any script changes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replaces the whole class list, like assigning `className`.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    pub fn text(&self) -> &str {
        match &self.text_override {
            Some(text) => text,
            None => self.own_text.trim(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_override = Some(text.into());
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.own_text.push_str(text);
    }

    pub fn is_form_field(&self) -> bool {
        FORM_FIELDS.contains(&self.tag.as_str())
    }

    pub fn default_value(&self) -> &str {
        if self.tag == "textarea" {
            self.own_text.trim()
        } else {
            self.attr("value").unwrap_or_default()
        }
    }

    pub fn value(&self) -> &str {
        match &self.value_override {
            Some(value) => value,
            None => self.default_value(),
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value_override = Some(value.into());
    }

    pub fn reset_value(&mut self) {
        self.value_override = None;
    }

    /// The text set by a script, if any, replacing the element's children.
    pub fn text_override(&self) -> Option<&str> {
        self.text_override.as_deref()
    }

    /// True when the class list or display no longer match the start tag.
    pub fn tag_changed(&self) -> bool {
        self.classes != parsed_classes(&self.attrs) || self.display != parsed_display(&self.attrs)
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    pub fn set_display(&mut self, display: &str) {
        self.display = Some(display.to_string());
    }
}

fn parsed_classes(attrs: &BTreeMap<String, String>) -> Vec<String> {
    attrs
        .get("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn parsed_display(attrs: &BTreeMap<String, String>) -> Option<String> {
    attrs.get("style").and_then(|s| display_from_style(s))
}

pub(crate) fn display_from_style(style: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        (prop.trim().eq_ignore_ascii_case("display")).then(|| value.trim().to_string())
    })
}
