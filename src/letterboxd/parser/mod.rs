//! Event-driven extraction of search results from the site's markup.
//!
//! Result boundaries and fields are not declared by any schema; they are
//! recognized from class-attribute fragments and sibling order. The parsed
//! tree is therefore replayed as a stream of discrete open-tag, text, and
//! close-tag events, and each extractor is a state machine over that stream.

pub mod film;
pub mod person;

use ego_tree::iter::Edge;
use scraper::node::Element;
use scraper::{Html, Node};

/// A state machine consuming markup events in document order.
pub trait Scanner: Default {
    type Record;

    fn handle_open(&mut self, element: &Element);
    fn handle_text(&mut self, text: &str);
    fn handle_close(&mut self, name: &str);
    fn finish(self) -> Vec<Self::Record>;
}

/// Runs the scanner `S` over `html`. The underlying HTML5 parser recovers
/// from arbitrarily malformed input, so scanning is total; at worst a
/// partial result block contributes no record.
pub fn scan<S: Scanner>(html: &str) -> Vec<S::Record> {
    let document = Html::parse_document(html);
    let mut scanner = S::default();
    for edge in document.root_element().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => scanner.handle_open(element),
                Node::Text(text) => scanner.handle_text(&text.text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    scanner.handle_close(element.name());
                }
            }
        }
    }
    scanner.finish()
}

pub(crate) fn class_contains(element: &Element, marker: &str) -> bool {
    element
        .attr("class")
        .map_or(false, |class| class.contains(marker))
}
