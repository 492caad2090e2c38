//! Headless document model.
//!
//! A [`Document`] is the shell page reduced to its placeholder regions
//! (`#site-header`, `#content`, `#site-footer`). Each region holds the raw
//! HTML last injected into it together with a parsed element index that
//! scripts read and mutate. A region's `inner_html` is rendered from that
//! index, so script changes show up in it. Replacing a region's HTML bumps
//! its generation, which invalidates every [`NodeRef`] taken against the old
//! content.

pub mod element;
pub mod parse;
pub mod render;
pub mod reveal;

pub use self::element::Element;
pub use self::reveal::{RevealObserver, FADE_IN_CLASS, SHOWN_CLASS};

use std::cell::OnceCell;
use std::collections::BTreeMap;

pub const HEADER_SELECTOR: &str = "#site-header";
pub const CONTENT_SELECTOR: &str = "#content";
pub const FOOTER_SELECTOR: &str = "#site-footer";

/// Points at one element of one region's content as of a given generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    pub region: String,
    pub generation: u64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub struct Region {
    source: String,
    rendered: OnceCell<String>,
    elements: Vec<Element>,
    generation: u64,
    opacity: f64,
    transition: Option<String>,
    reveal: Option<RevealObserver>,
}

impl Region {
    fn empty() -> Self {
        Self {
            source: String::new(),
            rendered: OnceCell::new(),
            elements: Vec::new(),
            generation: 0,
            opacity: 1.0,
            transition: None,
            reveal: None,
        }
    }

    pub fn inner_html(&self) -> &str {
        self.rendered
            .get_or_init(|| render::render_fragment(&self.source, &self.elements))
    }

    /// The HTML as it was injected, before any script changes.
    pub fn source_html(&self) -> &str {
        &self.source
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn transition(&self) -> Option<&str> {
        self.transition.as_deref()
    }

    pub fn reveal(&self) -> Option<&RevealObserver> {
        self.reveal.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    regions: BTreeMap<String, Region>,
    scroll: ScrollPosition,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
            scroll: ScrollPosition {
                top: 0.0,
                behavior: ScrollBehavior::Instant,
            },
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's `index.html` shell: header, content and footer placeholders.
    pub fn shell() -> Self {
        let mut doc = Self::new();
        for selector in [HEADER_SELECTOR, CONTENT_SELECTOR, FOOTER_SELECTOR] {
            doc.add_region(selector);
        }
        doc
    }

    pub fn add_region(&mut self, selector: &str) {
        self.regions
            .entry(selector.to_string())
            .or_insert_with(Region::empty);
    }

    pub fn has_region(&self, selector: &str) -> bool {
        self.regions.contains_key(selector)
    }

    pub fn region(&self, selector: &str) -> Option<&Region> {
        self.regions.get(selector)
    }

    pub fn inner_html(&self, selector: &str) -> Option<&str> {
        self.region(selector).map(Region::inner_html)
    }

    /// Swaps the region's content and returns its new generation.
    ///
    /// Any reveal observer over the old content is dropped with it.
    pub fn set_inner_html(&mut self, selector: &str, html: &str) -> Option<u64> {
        let region = self.regions.get_mut(selector)?;
        region.source = html.to_string();
        region.rendered = OnceCell::new();
        region.elements = parse::parse_fragment(html);
        region.generation += 1;
        region.reveal = None;
        Some(region.generation)
    }

    pub fn set_opacity(&mut self, selector: &str, opacity: f64) {
        if let Some(region) = self.regions.get_mut(selector) {
            region.opacity = opacity;
        }
    }

    pub fn set_transition(&mut self, selector: &str, transition: &str) {
        if let Some(region) = self.regions.get_mut(selector) {
            region.transition = Some(transition.to_string());
        }
    }

    pub fn scroll(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll = ScrollPosition { top, behavior };
    }

    fn node_ref(&self, selector: &str, index: usize) -> Option<NodeRef> {
        let region = self.region(selector)?;
        Some(NodeRef {
            region: selector.to_string(),
            generation: region.generation,
            index,
        })
    }

    pub fn query_all<F>(&self, selector: &str, predicate: F) -> Vec<NodeRef>
    where
        F: Fn(&Element) -> bool,
    {
        let Some(region) = self.region(selector) else {
            return Vec::new();
        };
        region
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| predicate(*el))
            .filter_map(|(index, _)| self.node_ref(selector, index))
            .collect()
    }

    pub fn query<F>(&self, selector: &str, predicate: F) -> Option<NodeRef>
    where
        F: Fn(&Element) -> bool,
    {
        let region = self.region(selector)?;
        let index = region.elements.iter().position(predicate)?;
        self.node_ref(selector, index)
    }

    pub fn find_by_id(&self, selector: &str, id: &str) -> Option<NodeRef> {
        self.query(selector, |el| el.id() == Some(id))
    }

    pub fn find_by_class(&self, selector: &str, class: &str) -> Vec<NodeRef> {
        self.query_all(selector, |el| el.has_class(class))
    }

    /// Every element across all regions matching `predicate`, in region order.
    pub fn query_document<F>(&self, predicate: F) -> Vec<NodeRef>
    where
        F: Fn(&Element) -> bool,
    {
        self.regions
            .keys()
            .flat_map(|selector| self.query_all(selector, &predicate))
            .collect()
    }

    /// Resolves a node, or `None` if its region has been replaced since.
    pub fn element(&self, node: &NodeRef) -> Option<&Element> {
        let region = self.region(&node.region)?;
        if region.generation != node.generation {
            return None;
        }
        region.elements.get(node.index)
    }

    pub fn element_mut(&mut self, node: &NodeRef) -> Option<&mut Element> {
        let region = self.regions.get_mut(&node.region)?;
        if region.generation != node.generation {
            return None;
        }
        region.rendered.take();
        region.elements.get_mut(node.index)
    }

    /// The node itself or its nearest ancestor matching `predicate`.
    pub fn closest<F>(&self, node: &NodeRef, predicate: F) -> Option<NodeRef>
    where
        F: Fn(&Element) -> bool,
    {
        let region = self.region(&node.region)?;
        if region.generation != node.generation {
            return None;
        }
        let mut cursor = Some(node.index);
        while let Some(index) = cursor {
            let el = region.elements.get(index)?;
            if predicate(el) {
                return Some(NodeRef {
                    index,
                    ..node.clone()
                });
            }
            cursor = el.parent;
        }
        None
    }

    pub fn is_descendant_of(&self, node: &NodeRef, ancestor: &NodeRef) -> bool {
        if node.region != ancestor.region || node.generation != ancestor.generation {
            return false;
        }
        let Some(region) = self.region(&node.region) else {
            return false;
        };
        let mut cursor = region.elements.get(node.index).and_then(|el| el.parent);
        while let Some(index) = cursor {
            if index == ancestor.index {
                return true;
            }
            cursor = region.elements.get(index).and_then(|el| el.parent);
        }
        false
    }

    /// Starts observing every fade-in candidate of the region, replacing any
    /// earlier observer. Returns how many elements are being watched.
    pub fn observe_reveal(&mut self, selector: &str, threshold: f64) -> usize {
        let Some(region) = self.regions.get_mut(selector) else {
            return 0;
        };
        let targets: Vec<usize> = region
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.has_class(FADE_IN_CLASS))
            .map(|(index, _)| index)
            .collect();
        let observer = RevealObserver::new(threshold, targets);
        let count = observer.observed_count();
        region.reveal = Some(observer);
        count
    }

    /// Feeds a viewport intersection report for `node`. Returns true if the
    /// report revealed it.
    pub fn report_intersection(&mut self, node: &NodeRef, ratio: f64) -> bool {
        let Some(region) = self.regions.get_mut(&node.region) else {
            return false;
        };
        if region.generation != node.generation {
            return false;
        }
        let Some(observer) = region.reveal.as_mut() else {
            return false;
        };
        if !observer.on_intersection(node.index, ratio) {
            return false;
        }
        region.rendered.take();
        match region.elements.get_mut(node.index) {
            Some(el) => {
                el.add_class(SHOWN_CLASS);
                true
            }
            None => false,
        }
    }
}
