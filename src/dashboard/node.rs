//! DOM-like render tree
//!
//! The dashboard renders into a small element tree that can be serialised
//! as HTML or flattened into plain text for terminals.

use std::fmt::Write as _;

/// A node in the render tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes (in insertion order) and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements written without a closing tag
const VOID_TAGS: [&str; 3] = ["br", "hr", "img"];

impl Node {
    /// Create an empty element
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Builder method: add an attribute (ignored on text nodes)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element(el) = &mut self {
            el.attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Builder method: set the `class` attribute
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Builder method: append a child (ignored on text nodes)
    pub fn child(mut self, child: Node) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.push(child);
        }
        self
    }

    /// Builder method: append several children
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element(el) = &mut self {
            el.children.extend(children);
        }
        self
    }

    /// Builder method: append a text child
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(&el.tag),
            Node::Text(_) => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(el) => el
                .attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn child_nodes(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All descendant elements (depth-first, self included) matching a predicate
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if pred(node) {
                found.push(node);
            }
        });
        found
    }

    /// All descendant elements with the given tag
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Node> {
        self.find_all(&|n| n.tag() == Some(tag))
    }

    /// All descendant elements carrying the given class
    pub fn find_by_class(&self, class: &str) -> Vec<&Node> {
        self.find_all(&|n| n.has_class(class))
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.child_nodes() {
            child.walk(visit);
        }
    }

    /// Serialise as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&html_escape::encode_text(t)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(
                        out,
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                if VOID_TAGS.contains(&el.tag.as_str()) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// Flatten into terminal text.
    ///
    /// Headings become underlined lines, list items become bullets and
    /// `svg` subtrees are skipped.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let el = match self {
            Node::Text(t) => {
                out.push_str(t);
                return;
            }
            Node::Element(el) => el,
        };

        match el.tag.as_str() {
            "svg" => {}
            "h1" | "h2" => {
                let title = self.text_content();
                let _ = writeln!(out, "{}\n{}", title, "=".repeat(title.chars().count()));
            }
            "h3" | "h4" => {
                let title = self.text_content();
                let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.chars().count()));
            }
            "li" => {
                let _ = writeln!(out, "{}- {}", "  ".repeat(depth), self.text_content());
            }
            "ul" | "ol" => {
                for child in &el.children {
                    child.write_text(out, depth + 1);
                }
            }
            "p" => {
                let _ = writeln!(out, "{}", self.text_content());
            }
            _ => {
                for child in &el.children {
                    child.write_text(out, depth);
                }
            }
        }
    }
}
