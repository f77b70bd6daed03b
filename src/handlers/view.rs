//! Headless element tree produced by the components, with the queries the tests and the
//! terminal renderer need.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Text(String),
    Image { src: String, alt: String },
    Button(String),
    Input { placeholder: String, value: String },
    Group {
        test_id: Option<&'static str>,
        key: Option<u32>,
        children: Vec<Element>,
    },
}

impl Element {
    pub fn text(value: impl Into<String>) -> Self {
        Element::Text(value.into())
    }

    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Element::Image {
            src: src.into(),
            alt: alt.into(),
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Element::Button(label.into())
    }

    pub fn group(children: Vec<Element>) -> Self {
        Element::Group {
            test_id: None,
            key: None,
            children,
        }
    }

    pub fn tagged(test_id: &'static str, key: u32, children: Vec<Element>) -> Self {
        Element::Group {
            test_id: Some(test_id),
            key: Some(key),
            children,
        }
    }

    pub fn key(&self) -> Option<u32> {
        match self {
            Element::Group { key, .. } => *key,
            _ => None,
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Group { children, .. } => children,
            _ => &[],
        }
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in self.children() {
            child.walk(out);
        }
    }

    fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    /// Exact match against text nodes and button labels.
    pub fn has_text(&self, text: &str) -> bool {
        self.descendants().into_iter().any(|el| match el {
            Element::Text(value) | Element::Button(value) => value == text,
            _ => false,
        })
    }

    pub fn has_alt(&self, alt: &str) -> bool {
        self.descendants()
            .into_iter()
            .any(|el| matches!(el, Element::Image { alt: a, .. } if a == alt))
    }

    pub fn has_display_value(&self, value: &str) -> bool {
        self.descendants()
            .into_iter()
            .any(|el| matches!(el, Element::Input { value: v, .. } if v == value))
    }

    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        self.descendants()
            .into_iter()
            .any(|el| matches!(el, Element::Input { placeholder: p, .. } if p == placeholder))
    }

    pub fn find_all_by_test_id(&self, test_id: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| matches!(el, Element::Group { test_id: Some(id), .. } if *id == test_id))
            .collect()
    }

    /// First element with `test_id` whose subtree contains `text`.
    pub fn find_by_test_id_with_text(&self, test_id: &str, text: &str) -> Option<&Element> {
        self.find_all_by_test_id(test_id)
            .into_iter()
            .find(|el| el.has_text(text))
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match self {
            Element::Text(value) => writeln!(f, "{}{}", pad, value),
            Element::Image { alt, .. } => writeln!(f, "{}[{}]", pad, alt),
            Element::Button(label) => writeln!(f, "{}<{}>", pad, label),
            Element::Input { placeholder, value } => {
                if value.is_empty() {
                    writeln!(f, "{}__{}__", pad, placeholder)
                } else {
                    writeln!(f, "{}__{}__", pad, value)
                }
            }
            Element::Group { test_id, key, children } => {
                let mut depth = depth;
                if let (Some(id), Some(key)) = (test_id, key) {
                    writeln!(f, "{}{} #{}", pad, id, key)?;
                    depth += 1;
                }
                for child in children {
                    child.fmt_indented(f, depth)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
