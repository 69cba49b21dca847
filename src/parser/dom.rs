//! Minimal tree-query capability used by the walker.
//!
//! The walker only needs to find elements by class, walk children and read
//! text, so that is all the traits expose. `scraper` backs them in the
//! binary; any other HTML tree can be plugged in by implementing the two
//! traits.

use scraper::{ElementRef, Html, Node};

/// A child of an element: either another element or a raw text node.
pub enum Child<'a, E> {
    Element(E),
    Text(&'a str),
}

pub trait Element<'a>: Copy {
    fn tag_name(self) -> &'a str;

    /// Child nodes in document order, comments and other node kinds skipped.
    fn child_nodes(self) -> Vec<Child<'a, Self>>;

    fn element_children(self) -> Vec<Self> {
        self.child_nodes()
            .into_iter()
            .filter_map(|c| match c {
                Child::Element(e) => Some(e),
                Child::Text(_) => None,
            })
            .collect()
    }

    /// Descendant elements named `tag`, in document order.
    fn descendants_named(self, tag: &str) -> Vec<Self> {
        let mut found = Vec::new();
        let mut stack = self.element_children();
        stack.reverse();
        while let Some(el) = stack.pop() {
            if el.tag_name().eq_ignore_ascii_case(tag) {
                found.push(el);
            }
            stack.extend(el.element_children().into_iter().rev());
        }
        found
    }

    /// Visit descendant text nodes in document order without entering
    /// elements named `skip`. Stops as soon as `visit` returns `true`.
    fn visit_text<F>(self, skip: Option<&str>, mut visit: F)
    where
        F: FnMut(&'a str) -> bool,
    {
        let mut stack = self.child_nodes();
        stack.reverse();
        while let Some(node) = stack.pop() {
            match node {
                Child::Text(t) => {
                    if visit(t) {
                        return;
                    }
                }
                Child::Element(e) => {
                    if skip.is_some_and(|tag| e.tag_name().eq_ignore_ascii_case(tag)) {
                        continue;
                    }
                    stack.extend(e.child_nodes().into_iter().rev());
                }
            }
        }
    }

    fn text_content(self) -> String {
        collect_text(self, None)
    }

    /// Text with every `skip` element cut out, e.g. a nested table.
    fn text_skipping(self, skip: &str) -> String {
        collect_text(self, Some(skip))
    }

    /// First descendant text node with visible content, trimmed.
    fn first_text_node(self) -> Option<&'a str> {
        first_text(self, None)
    }

    fn first_text_skipping(self, skip: &str) -> Option<&'a str> {
        first_text(self, Some(skip))
    }
}

fn collect_text<'a, E: Element<'a>>(el: E, skip: Option<&str>) -> String {
    let mut out = String::new();
    el.visit_text(skip, |t| {
        out.push_str(t);
        false
    });
    out
}

fn first_text<'a, E: Element<'a>>(el: E, skip: Option<&str>) -> Option<&'a str> {
    let mut found = None;
    el.visit_text(skip, |t| {
        let t = t.trim();
        if t.is_empty() {
            return false;
        }
        found = Some(t);
        true
    });
    found
}

pub trait Document {
    type Element<'a>: Element<'a>
    where
        Self: 'a;

    /// Elements carrying the CSS class `marker`, in document order.
    fn find_by_marker(&self, marker: &str) -> Vec<Self::Element<'_>>;
}

pub fn parse_html(text: &str) -> Html {
    Html::parse_document(text)
}

impl<'a> Element<'a> for ElementRef<'a> {
    fn tag_name(self) -> &'a str {
        self.value().name()
    }

    fn child_nodes(self) -> Vec<Child<'a, Self>> {
        self.children()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(Child::Text(&**text)),
                Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
                _ => None,
            })
            .collect()
    }
}

impl Document for Html {
    type Element<'a> = ElementRef<'a>;

    fn find_by_marker(&self, marker: &str) -> Vec<ElementRef<'_>> {
        self.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().classes().any(|c| c == marker))
            .collect()
    }
}
