//! Placeholders: named values filled in at render time.
//!
//! A [`Placeholder`] is a key (`name` plus an optional `item`). Rendering
//! asks a [`PlaceholderResolver`] for its value and falls back to the
//! placeholder's own token (`{name}` or `{name item}`) when nothing resolves.
//!
//! ```
//! use std::collections::HashMap;
//! use chat_text::placeholder::{Placeholder, PlaceholderResolver};
//!
//! let player = Placeholder::new("player");
//! let mut values = HashMap::new();
//! values.insert(player.clone(), "Steve".to_string());
//!
//! assert_eq!(values.resolve(&player), Some("Steve".to_string()));
//! assert_eq!(Placeholder::with_item("stat", "kills").to_string(), "{stat kills}");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

/// A reference to a value that is only known at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder {
    name: String,
    item: Option<String>,
}

impl Placeholder {
    /// Create a placeholder without an item.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: None,
        }
    }

    /// Create a placeholder that selects `item` from `name`.
    #[must_use]
    pub fn with_item(name: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item: Some(item.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Resolve through `resolver`, falling back to the placeholder token.
    ///
    /// The resolver is consulted at most once.
    #[must_use]
    pub fn resolve_or_token(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        resolver
            .and_then(|resolver| resolver.resolve(self))
            .unwrap_or_else(|| self.to_string())
    }
}

/// The fallback token: `{name}` or `{name item}`.
impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{{{} {item}}}", self.name),
            None => write!(f, "{{{}}}", self.name),
        }
    }
}

/// Supplies placeholder values during rendering.
pub trait PlaceholderResolver {
    /// The value of `placeholder`, or `None` if it cannot be resolved.
    fn resolve(&self, placeholder: &Placeholder) -> Option<String>;
}

impl<F> PlaceholderResolver for F
where
    F: Fn(&Placeholder) -> Option<String>,
{
    fn resolve(&self, placeholder: &Placeholder) -> Option<String> {
        self(placeholder)
    }
}

impl<S: BuildHasher> PlaceholderResolver for HashMap<Placeholder, String, S> {
    fn resolve(&self, placeholder: &Placeholder) -> Option<String> {
        self.get(placeholder).cloned()
    }
}
