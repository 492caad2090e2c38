use crate::dom::{Document, NodeRef};
use crate::lock;
use crate::messages::CONTACT_THANKS;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const CONTACT_ALERT_ID: &str = "contactAlert";
const ALERT_CLASS_NAME: &str = "alert alert-success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A bound handler took over; the default submission was prevented.
    Handled,
    /// Nothing is bound to this form, so the browser default would run.
    Default,
}

#[derive(Debug, Clone)]
struct ContactBinding {
    root: String,
    form: NodeRef,
}

/// Behaviour wired into freshly loaded page content.
///
/// Wiring is tracked per content root (region plus generation): attaching to
/// a root that has already been wired does nothing, and a root whose content
/// is replaced counts as new.
pub struct PageScripts {
    alert_hide: Duration,
    wired_roots: Mutex<HashSet<(String, u64)>>,
    bindings: Mutex<Vec<ContactBinding>>,
}

impl PageScripts {
    pub fn new(alert_hide: Duration) -> Self {
        Self {
            alert_hide,
            wired_roots: Mutex::new(HashSet::new()),
            bindings: Mutex::new(Vec::new()),
        }
    }

    /// Wires the root's current content. Returns false if it was already wired.
    pub fn attach(&self, doc: &Document, root: &str) -> bool {
        let Some(generation) = doc.region(root).map(|r| r.generation()) else {
            return false;
        };

        {
            let mut wired = lock(&self.wired_roots);
            if !wired.insert((root.to_string(), generation)) {
                return false;
            }
            wired.retain(|(r, g)| r != root || *g == generation);
        }

        let mut bindings = lock(&self.bindings);
        bindings.retain(|b| b.root != root || b.form.generation == generation);

        if let Some(form) = doc.find_by_id(root, CONTACT_FORM_ID) {
            debug!("PageScripts: bound contact form in {}", root);
            bindings.push(ContactBinding {
                root: root.to_string(),
                form,
            });
        }
        true
    }

    pub fn binding_count(&self) -> usize {
        lock(&self.bindings).len()
    }

    pub fn is_bound(&self, form: &NodeRef) -> bool {
        lock(&self.bindings).iter().any(|b| &b.form == form)
    }

    /// Runs the submit handler bound to `form`, if any.
    ///
    /// Shows the thank-you alert, clears the form's fields and schedules the
    /// alert to be hidden again. Every submission schedules its own timer.
    pub fn submit(&self, document: &Arc<Mutex<Document>>, form: &NodeRef) -> SubmitOutcome {
        let Some(binding) = lock(&self.bindings).iter().find(|b| &b.form == form).cloned() else {
            return SubmitOutcome::Default;
        };

        let alert = {
            let mut doc = lock(document);
            if doc.element(&binding.form).is_none() {
                return SubmitOutcome::Default;
            }

            let alert = doc.find_by_id(&binding.root, CONTACT_ALERT_ID);
            if let Some(el) = alert.as_ref().and_then(|node| doc.element_mut(node)) {
                el.set_display("block");
                el.set_class_name(ALERT_CLASS_NAME);
                el.set_text(CONTACT_THANKS);
            }

            let fields: Vec<NodeRef> = doc
                .query_all(&binding.root, |el| el.is_form_field())
                .into_iter()
                .filter(|node| doc.is_descendant_of(node, &binding.form))
                .collect();
            for field in &fields {
                if let Some(el) = doc.element_mut(field) {
                    el.reset_value();
                }
            }
            alert
        };

        if let Some(alert) = alert {
            let document = Arc::clone(document);
            let delay = self.alert_hide;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Some(el) = lock(&document).element_mut(&alert) {
                    el.set_display("none");
                }
            });
        }

        SubmitOutcome::Handled
    }
}
