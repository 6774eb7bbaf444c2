//! Text containers and container lookup.
//!
//! The animation mutates a single text-bearing handle one character at a
//! time. This module defines the two seams the core is written against:
//!
//! 1. [`TextContainer`] - a mutable text handle (append/remove one char)
//! 2. [`ContainerRegistry`] - resolves an identifier to a container, or
//!    reports "not found"
//!
//! In-memory implementations ([`TextBuffer`], [`MemoryDom`]) are always
//! available and back the test suite. With the `web` feature, containers
//! wrap live DOM elements looked up by id.

use std::collections::HashMap;

/// A mutable text-bearing handle.
///
/// All operations respect `char` boundaries; multi-byte UTF-8 content is
/// appended and removed one character (not one byte) at a time.
pub trait TextContainer {
    /// Current text content of the container.
    fn text(&self) -> String;

    /// Replace the entire text content.
    fn set_text(&mut self, text: &str);

    /// Append a single character to the end of the content.
    fn push_char(&mut self, ch: char) {
        let mut text = self.text();
        text.push(ch);
        self.set_text(&text);
    }

    /// Remove the last character of the content, if any.
    fn pop_char(&mut self) {
        let mut text = self.text();
        if text.pop().is_some() {
            // String::pop removes a full char, so the result is still
            // valid UTF-8 at a char boundary.
            self.set_text(&text);
        }
    }

    /// Number of characters (not bytes) in the content.
    fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

/// Resolves container identifiers to live containers.
///
/// This is the DOM-like lookup seam: `container_mut` returns `None` when
/// the identifier does not resolve, and callers treat that as a silent
/// no-op rather than an error.
pub trait ContainerRegistry {
    /// Look up a container by identifier.
    fn container_mut(&mut self, id: &str) -> Option<&mut dyn TextContainer>;
}

/// A plain in-memory text container.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextContainer for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn pop_char(&mut self) {
        self.text.pop();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An in-memory registry of named text buffers.
///
/// Useful for tests and for non-web hosts that render the buffer contents
/// themselves.
///
/// ## Example
///
/// ```rust
/// use typecycle::{ContainerRegistry, MemoryDom, TextContainer};
///
/// let mut dom = MemoryDom::new();
/// dom.insert("hero-text", "");
///
/// let container = dom.container_mut("hero-text").unwrap();
/// container.push_char('H');
/// container.push_char('i');
/// assert_eq!(container.text(), "Hi");
///
/// assert!(dom.container_mut("no-such-id").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryDom {
    containers: HashMap<String, TextBuffer>,
}

impl MemoryDom {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container under `id` with initial content.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.containers
            .insert(id.into(), TextBuffer::with_text(text));
    }

    /// Remove the container registered under `id`.
    pub fn remove(&mut self, id: &str) {
        self.containers.remove(id);
    }

    /// Read the text of the container under `id`, if present.
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.containers.get(id).map(|c| c.text.clone())
    }
}

impl ContainerRegistry for MemoryDom {
    fn container_mut(&mut self, id: &str) -> Option<&mut dyn TextContainer> {
        self.containers
            .get_mut(id)
            .map(|c| c as &mut dyn TextContainer)
    }
}

/// Web-specific containers backed by DOM elements.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use web_sys::{Document, Element};

    /// A text container wrapping a live DOM element.
    ///
    /// Text is read and written through `textContent`, matching the
    /// character-level append/remove semantics of the in-memory buffer.
    #[derive(Clone, Debug)]
    pub struct DomContainer {
        element: Element,
    }

    impl DomContainer {
        /// Wrap an existing element.
        pub fn new(element: Element) -> Self {
            Self { element }
        }

        /// Look up an element by id on the given document.
        pub fn by_id(document: &Document, id: &str) -> Option<Self> {
            document.get_element_by_id(id).map(Self::new)
        }
    }

    impl TextContainer for DomContainer {
        fn text(&self) -> String {
            self.element.text_content().unwrap_or_default()
        }

        fn set_text(&mut self, text: &str) {
            self.element.set_text_content(Some(text));
        }
    }

    /// A registry resolving ids against a DOM document.
    ///
    /// Resolved elements are cached so repeated steps against the same
    /// container skip the document lookup.
    #[derive(Clone, Debug)]
    pub struct DomRegistry {
        document: Document,
        cache: HashMap<String, DomContainer>,
    }

    impl DomRegistry {
        /// Create a registry for the given document.
        pub fn new(document: Document) -> Self {
            Self {
                document,
                cache: HashMap::new(),
            }
        }

        /// Create a registry for the current window's document.
        ///
        /// Returns `None` outside a browsing context.
        pub fn for_window() -> Option<Self> {
            let document = web_sys::window()?.document()?;
            Some(Self::new(document))
        }
    }

    impl ContainerRegistry for DomRegistry {
        fn container_mut(&mut self, id: &str) -> Option<&mut dyn TextContainer> {
            if !self.cache.contains_key(id) {
                let container = DomContainer::by_id(&self.document, id)?;
                self.cache.insert(id.to_string(), container);
            }
            self.cache
                .get_mut(id)
                .map(|c| c as &mut dyn TextContainer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_push_pop() {
        let mut buf = TextBuffer::new();
        buf.push_char('a');
        buf.push_char('b');
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.char_len(), 2);

        buf.pop_char();
        assert_eq!(buf.text(), "a");
        buf.pop_char();
        assert_eq!(buf.text(), "");
        buf.pop_char(); // popping empty is a no-op
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_buffer_unicode_char_boundaries() {
        let mut buf = TextBuffer::with_text("héllo");
        assert_eq!(buf.char_len(), 5);

        buf.pop_char();
        buf.pop_char();
        buf.pop_char();
        buf.pop_char();
        assert_eq!(buf.text(), "h");

        buf.push_char('é');
        assert_eq!(buf.text(), "hé");
        assert_eq!(buf.char_len(), 2);
    }

    #[test]
    fn test_memory_dom_lookup() {
        let mut dom = MemoryDom::new();
        dom.insert("one", "x");

        assert!(dom.container_mut("one").is_some());
        assert!(dom.container_mut("two").is_none());
        assert_eq!(dom.text_of("one"), Some("x".to_string()));
        assert_eq!(dom.text_of("two"), None);

        dom.remove("one");
        assert!(dom.container_mut("one").is_none());
    }
}
