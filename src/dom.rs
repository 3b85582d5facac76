//! Document-order helpers over a parsed page.
//!
//! Every element of a document is flattened once into pre-order, which makes
//! "everything before X" and "everything between X and Y" plain slice walks.

use scraper::{ElementRef, Html};

pub struct DocumentOrder<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> DocumentOrder<'a> {
    pub fn new(doc: &'a Html) -> Self {
        let elements = doc
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        DocumentOrder { elements }
    }

    pub fn elements(&self) -> &[ElementRef<'a>] {
        &self.elements
    }

    pub fn position(&self, el: ElementRef<'a>) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == el.id())
    }

    /// Elements strictly before `el` in document order (its ancestors included).
    pub fn preceding(&self, el: ElementRef<'a>) -> &[ElementRef<'a>] {
        match self.position(el) {
            Some(idx) => &self.elements[..idx],
            None => &[],
        }
    }

    /// Elements after `start` in document order, stopping at `stop` or at the
    /// first element found inside `stop`. Descendants of `start` are visited.
    pub fn between(&self, start: ElementRef<'a>, stop: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let Some(idx) = self.position(start) else {
            return Vec::new();
        };
        self.elements[idx + 1..]
            .iter()
            .copied()
            .take_while(|el| el.id() != stop.id() && !is_descendant_of(*el, stop))
            .collect()
    }
}

pub fn is_descendant_of(el: ElementRef, ancestor: ElementRef) -> bool {
    el.ancestors().any(|n| n.id() == ancestor.id())
}

/// Closest ancestor of `el` whose tag name is one of `names`.
pub fn nearest_ancestor<'a>(el: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| names.contains(&a.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    fn names(els: &[ElementRef]) -> Vec<String> {
        els.iter()
            .map(|e| e.value().attr("id").unwrap_or(e.value().name()).to_string())
            .collect()
    }

    const PAGE: &str = r#"<html><body>
        <h2 id="h">T</h2>
        <table id="t"><tr><td id="cell">x</td></tr></table>
        <p id="p1"><a id="a1" href="/1.pdf">1</a></p>
        <div id="stop"><p id="inner">Atenção</p></div>
        <p id="after">z</p>
    </body></html>"#;

    #[test]
    fn between_covers_start_descendants_and_halts_at_stop() {
        let doc = Html::parse_document(PAGE);
        let order = DocumentOrder::new(&doc);
        let got = order.between(first(&doc, "#t"), first(&doc, "#stop"));
        let got = names(&got);
        assert!(got.contains(&"cell".to_string()));
        assert!(got.contains(&"a1".to_string()));
        assert!(!got.contains(&"stop".to_string()));
        assert!(!got.contains(&"inner".to_string()));
        assert!(!got.contains(&"after".to_string()));
    }

    #[test]
    fn between_is_empty_when_start_sits_inside_stop() {
        let doc = Html::parse_document(
            r#"<div id="wrap"><table id="t"><tr><td>x</td></tr></table><a href="/a.pdf">a</a></div>"#,
        );
        let order = DocumentOrder::new(&doc);
        let got = order.between(first(&doc, "#t"), first(&doc, "#wrap"));
        assert!(got.is_empty());
    }

    #[test]
    fn preceding_lists_earlier_elements_only() {
        let doc = Html::parse_document(PAGE);
        let order = DocumentOrder::new(&doc);
        let got = names(order.preceding(first(&doc, "#t")));
        assert_eq!(got.last().map(String::as_str), Some("h"));
        assert!(!got.contains(&"cell".to_string()));
    }

    #[test]
    fn nearest_ancestor_picks_closest_block() {
        let doc = Html::parse_document(PAGE);
        let a = first(&doc, "#a1");
        let block = nearest_ancestor(a, &["p", "div"]).unwrap();
        assert_eq!(block.value().attr("id"), Some("p1"));
        assert!(nearest_ancestor(a, &["blockquote"]).is_none());
    }
}
