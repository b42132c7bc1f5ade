//! Read-only DOM access used by the module parsers
//!
//! Parsers only ever need a handful of queries against a listing node, so
//! they go through [`DomNode`] instead of touching `scraper` directly. The
//! `scraper::ElementRef` implementation lets tests run against in-memory
//! HTML fixtures.

use scraper::{ElementRef, Node, Selector};

/// Minimal read-only query surface over an element
pub trait DomNode: Sized + Copy {
    /// First descendant matching `selector`, in document order
    fn select_one(&self, selector: &Selector) -> Option<Self>;

    /// Every descendant matching `selector`, in document order
    fn select_all(&self, selector: &Selector) -> Vec<Self>;

    /// Full text content including nested elements, untrimmed
    fn text(&self) -> String;

    /// Text of the direct text-node children only, untrimmed, in order
    fn direct_text(&self) -> Vec<String>;

    /// Text of the first child node when that child is a text node
    fn leading_text(&self) -> Option<String>;

    fn has_children(&self) -> bool;

    /// Whether the element takes part in layout (no `hidden` attribute and
    /// no `display: none` on itself or any ancestor)
    fn is_rendered(&self) -> bool;
}

impl<'a> DomNode for ElementRef<'a> {
    fn select_one(&self, selector: &Selector) -> Option<Self> {
        self.select(selector).next()
    }

    fn select_all(&self, selector: &Selector) -> Vec<Self> {
        self.select(selector).collect()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn direct_text(&self) -> Vec<String> {
        self.children()
            .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
            .collect()
    }

    fn leading_text(&self) -> Option<String> {
        self.first_child()
            .and_then(|child| child.value().as_text().map(|t| t.to_string()))
    }

    fn has_children(&self) -> bool {
        (**self).has_children()
    }

    fn is_rendered(&self) -> bool {
        std::iter::once(**self)
            .chain(self.ancestors())
            .filter_map(|node| match node.value() {
                Node::Element(el) => Some(el),
                _ => None,
            })
            .all(|el| el.attr("hidden").is_none() && !hides_via_style(el.attr("style")))
    }
}

fn hides_via_style(style: Option<&str>) -> bool {
    let Some(style) = style else {
        return false;
    };
    style.split(';').any(|decl| {
        let mut parts = decl.splitn(2, ':');
        let prop = parts.next().unwrap_or_default().trim();
        let value = parts.next().unwrap_or_default().trim();
        prop.eq_ignore_ascii_case("display") && value.to_ascii_lowercase().starts_with("none")
    })
}

/// Trimmed text of the first match, empty when nothing matches
pub fn text_of<N: DomNode>(node: &N, selector: &Selector) -> String {
    node.select_one(selector)
        .map(|el| el.text().trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of the first selector that matches at all.
///
/// A selector that matches an element with empty text still wins; this is
/// "first location present", not "first non-empty".
pub fn text_of_first_match<N: DomNode>(node: &N, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .find_map(|selector| node.select_one(selector))
        .map(|el| el.text().trim().to_string())
        .unwrap_or_default()
}

/// Trimmed text of the first selector whose text is non-empty
pub fn first_non_empty_text<N: DomNode>(node: &N, selectors: &[Selector]) -> String {
    selectors
        .iter()
        .map(|selector| text_of(node, selector))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn direct_text_skips_nested_elements() {
        let html = Html::parse_fragment(r#"<div class="price">120<span>icon</span>Gold</div>"#);
        let price = html.root_element().select_one(&sel(".price")).unwrap();
        assert_eq!(price.direct_text(), vec!["120", "Gold"]);
        assert_eq!(DomNode::text(&price), "120iconGold");
    }

    #[test]
    fn leading_text_only_for_text_first_child() {
        let html = Html::parse_fragment(
            r#"<p class="a">Seller<i>online</i></p><p class="b"><i>online</i>Seller</p><p class="c"></p>"#,
        );
        let root = html.root_element();
        assert_eq!(root.select_one(&sel(".a")).unwrap().leading_text().as_deref(), Some("Seller"));
        assert_eq!(root.select_one(&sel(".b")).unwrap().leading_text(), None);
        let empty = root.select_one(&sel(".c")).unwrap();
        assert!(!DomNode::has_children(&empty));
    }

    #[test]
    fn hidden_ancestors_hide_descendants() {
        let html = Html::parse_fragment(
            r#"<div style="color: red; display : NONE"><span class="x">a</span></div>
               <div hidden><span class="y">b</span></div>
               <div style="display:block"><span class="z">c</span></div>"#,
        );
        let root = html.root_element();
        assert!(!root.select_one(&sel(".x")).unwrap().is_rendered());
        assert!(!root.select_one(&sel(".y")).unwrap().is_rendered());
        assert!(root.select_one(&sel(".z")).unwrap().is_rendered());
    }

    #[test]
    fn text_helpers_default_to_empty() {
        let html = Html::parse_fragment(r#"<div><b class="n">  </b><i class="m"> Name </i></div>"#);
        let root = html.root_element();
        assert_eq!(text_of(&root, &sel(".missing")), "");
        assert_eq!(first_non_empty_text(&root, &[sel(".n"), sel(".m")]), "Name");
        assert_eq!(text_of_first_match(&root, &[sel(".n"), sel(".m")]), "");
    }
}
