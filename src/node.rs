//! Chat text node trees.
//!
//! A message is an immutable tree of [`Node`]s built bottom-up and rendered
//! any number of times. Each render walks the tree with an optional
//! [`Client`] and an optional [`PlaceholderResolver`] and produces one of:
//!
//! - plain text ([`Node::to_plain_string`])
//! - a legacy string with `§` codes ([`Node::to_legacy_string`])
//! - a JSON text component ([`Node::to_json`])
//!
//! # Examples
//!
//! ```
//! use chat_text::prelude::*;
//!
//! let message = GroupNode::new([
//!     Node::from("Hello, "),
//!     PlaceholderNode::new(Placeholder::new("player"))
//!         .with_color(Color::GOLD)
//!         .into(),
//! ])
//! .with_style(Formatting::Bold);
//!
//! let resolver = |p: &Placeholder| (p.name() == "player").then(|| "Alex".to_string());
//!
//! assert_eq!(message.to_plain_string(None), "Hello, {player}");
//! assert_eq!(message.to_plain_string(Some(&resolver)), "Hello, Alex");
//! assert_eq!(
//!     message.to_json_string(None, Some(&resolver)),
//!     r#"{"bold":true,"extra":["Hello, ",{"color":"gold","text":"Alex"}]}"#
//! );
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::action::{ClickAction, HoverAction};
use crate::client::{Client, ClientFeature};
use crate::color::Color;
use crate::formatting::{CombinedFormatting, Formatting};
use crate::placeholder::{Placeholder, PlaceholderResolver};

/// JSON keys of the formatting flags, in emission order.
const STYLE_KEYS: [(Formatting, &str); 6] = [
    (Formatting::Reset, "reset"),
    (Formatting::Obfuscated, "obfuscated"),
    (Formatting::Bold, "bold"),
    (Formatting::Strikethrough, "strikethrough"),
    (Formatting::Underlined, "underlined"),
    (Formatting::Italic, "italic"),
];

/// A node in a chat text tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    String(StringNode),
    /// Text resolved at render time.
    Placeholder(PlaceholderNode),
    /// A styled sequence of child nodes.
    Group(GroupNode),
    /// A node with click and hover behavior.
    Action(Box<ActionNode>),
}

impl Node {
    /// Render as plain text, dropping colors, styles and actions.
    #[must_use]
    pub fn to_plain_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        match self {
            Self::String(node) => node.to_plain_string(resolver),
            Self::Placeholder(node) => node.to_plain_string(resolver),
            Self::Group(node) => node.to_plain_string(resolver),
            Self::Action(node) => node.to_plain_string(resolver),
        }
    }

    /// Render as a legacy string: each node's color code and style codes
    /// followed by its text.
    ///
    /// Inside a group, every reset code emitted by a child is replaced by the
    /// group's own prefix, so a reset never escapes the group's style.
    #[must_use]
    pub fn to_legacy_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        match self {
            Self::String(node) => node.to_legacy_string(resolver),
            Self::Placeholder(node) => node.to_legacy_string(resolver),
            Self::Group(node) => node.to_legacy_string(resolver),
            Self::Action(node) => node.to_legacy_string(resolver),
        }
    }

    /// Render as a JSON text component.
    ///
    /// Colors are written by full name for clients that support RGB text and
    /// by nearest legacy name otherwise (including when `client` is `None`).
    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Value {
        match self {
            Self::String(node) => node.to_json(client, resolver),
            Self::Placeholder(node) => node.to_json(client, resolver),
            Self::Group(node) => node.to_json(client, resolver),
            Self::Action(node) => node.to_json(client, resolver),
        }
    }

    /// The color set directly on this node. Action nodes report the color of
    /// the node they wrap.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::String(node) => node.color(),
            Self::Placeholder(node) => node.color(),
            Self::Group(node) => node.color(),
            Self::Action(node) => node.text.color(),
        }
    }

    /// The formatting set directly on this node. Action nodes report the
    /// formatting of the node they wrap.
    #[must_use]
    pub fn style(&self) -> Option<CombinedFormatting> {
        match self {
            Self::String(node) => node.style(),
            Self::Placeholder(node) => node.style(),
            Self::Group(node) => node.style(),
            Self::Action(node) => node.text.style(),
        }
    }
}

/// Bare value for undecorated text, `{...style, "text": value}` otherwise.
fn text_component(style: Option<Map<String, Value>>, text: Value) -> Value {
    match style {
        Some(mut object) => {
            object.insert("text".to_string(), text);
            Value::Object(object)
        }
        None => text,
    }
}

// ============================================================================
// Decoration
// ============================================================================

/// Color and formatting shared by the text-bearing nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Decoration {
    color: Option<Color>,
    style: Option<CombinedFormatting>,
}

impl Decoration {
    /// Color code followed by style codes.
    fn legacy_prefix(&self) -> String {
        let mut prefix = String::new();
        if let Some(color) = self.color {
            prefix.push_str(&color.to_legacy_string());
        }
        if let Some(style) = self.style {
            prefix.push_str(&style.to_legacy_string());
        }
        prefix
    }

    /// JSON style properties, or `None` when neither color nor style is set.
    ///
    /// A style that is set but empty still yields an (empty) object.
    fn style_object(&self, client: Option<&Client>) -> Option<Map<String, Value>> {
        if self.color.is_none() && self.style.is_none() {
            return None;
        }

        let mut object = Map::new();
        if let Some(color) = self.color {
            let rgb = client.is_some_and(|client| client.supports(ClientFeature::TextRgb));
            let name = if rgb {
                color.name()
            } else {
                color.legacy_name().to_string()
            };
            object.insert("color".to_string(), Value::String(name));
        }

        if let Some(style) = self.style {
            for (flag, key) in STYLE_KEYS {
                if style.has(flag) {
                    object.insert(key.to_string(), Value::Bool(true));
                }
            }
        }

        Some(object)
    }
}

/// Builder methods for the nodes that carry a [`Decoration`].
macro_rules! impl_decorated {
    ($node:ty) => {
        impl $node {
            /// Set the color.
            #[must_use]
            pub fn with_color(mut self, color: impl Into<Color>) -> Self {
                self.decoration.color = Some(color.into());
                self
            }

            /// Set the formatting.
            #[must_use]
            pub fn with_style(mut self, style: impl Into<CombinedFormatting>) -> Self {
                self.decoration.style = Some(style.into());
                self
            }

            #[must_use]
            pub fn color(&self) -> Option<Color> {
                self.decoration.color
            }

            #[must_use]
            pub fn style(&self) -> Option<CombinedFormatting> {
                self.decoration.style
            }
        }
    };
}

// ============================================================================
// Node Types
// ============================================================================

/// Literal text with optional color and formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode {
    text: String,
    decoration: Decoration,
}

impl StringNode {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decoration: Decoration::default(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn to_plain_string(&self, _resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.text.clone()
    }

    #[must_use]
    pub fn to_legacy_string(&self, _resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.decoration.legacy_prefix() + &self.text
    }

    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        _resolver: Option<&dyn PlaceholderResolver>,
    ) -> Value {
        text_component(
            self.decoration.style_object(client),
            Value::String(self.text.clone()),
        )
    }
}

impl_decorated!(StringNode);

/// A placeholder with optional color and formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderNode {
    placeholder: Placeholder,
    decoration: Decoration,
}

impl PlaceholderNode {
    #[must_use]
    pub fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            decoration: Decoration::default(),
        }
    }

    #[must_use]
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// The resolved value, or the placeholder token.
    #[must_use]
    pub fn to_plain_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.placeholder.resolve_or_token(resolver)
    }

    #[must_use]
    pub fn to_legacy_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.decoration.legacy_prefix() + &self.placeholder.resolve_or_token(resolver)
    }

    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Value {
        text_component(
            self.decoration.style_object(client),
            Value::String(self.placeholder.resolve_or_token(resolver)),
        )
    }
}

impl_decorated!(PlaceholderNode);

/// An ordered list of nodes sharing a color and formatting.
///
/// Children render inside the group's style: nested as `extra` in JSON, and
/// behind the group's prefix (re-emitted after every reset) in legacy text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupNode {
    children: Vec<Node>,
    decoration: Decoration,
}

impl GroupNode {
    #[must_use]
    pub fn new(children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            children: children.into_iter().collect(),
            decoration: Decoration::default(),
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Concatenation of the children's plain text.
    #[must_use]
    pub fn to_plain_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.children
            .iter()
            .map(|child| child.to_plain_string(resolver))
            .collect()
    }

    /// The group prefix, then the children with each reset code replaced by
    /// the group prefix. An undecorated group strips child resets.
    #[must_use]
    pub fn to_legacy_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        let prefix = self.decoration.legacy_prefix();
        let children: String = self
            .children
            .iter()
            .map(|child| child.to_legacy_string(resolver))
            .collect();
        let reset = Formatting::Reset.to_legacy_string();
        let mut out = children.replace(&reset, &prefix);
        out.insert_str(0, &prefix);
        out
    }

    /// The group style object (possibly empty) with the children under
    /// `extra`.
    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Value {
        let mut object = self.decoration.style_object(client).unwrap_or_default();
        let extra = self
            .children
            .iter()
            .map(|child| child.to_json(client, resolver))
            .collect();
        object.insert("extra".to_string(), Value::Array(extra));
        Value::Object(object)
    }
}

impl_decorated!(GroupNode);

/// A node that reacts to clicks and hovers. It has no style of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionNode {
    text: Node,
    on_click: Option<ClickAction>,
    on_hover: Option<HoverAction>,
}

impl ActionNode {
    /// Wrap a node without any action yet.
    #[must_use]
    pub fn new(text: impl Into<Node>) -> Self {
        Self {
            text: text.into(),
            on_click: None,
            on_hover: None,
        }
    }

    #[must_use]
    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }

    #[must_use]
    pub fn on_hover(mut self, action: HoverAction) -> Self {
        self.on_hover = Some(action);
        self
    }

    #[must_use]
    pub fn text(&self) -> &Node {
        &self.text
    }

    #[must_use]
    pub fn click_action(&self) -> Option<&ClickAction> {
        self.on_click.as_ref()
    }

    #[must_use]
    pub fn hover_action(&self) -> Option<&HoverAction> {
        self.on_hover.as_ref()
    }

    #[must_use]
    pub fn to_plain_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.text.to_plain_string(resolver)
    }

    #[must_use]
    pub fn to_legacy_string(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.text.to_legacy_string(resolver)
    }

    /// The wrapped node's JSON as an object (a bare value becomes `text`),
    /// then `hoverEvent`, then `clickEvent`.
    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Value {
        let mut object = match self.text.to_json(client, resolver) {
            Value::Object(object) => object,
            primitive => {
                let mut object = Map::new();
                object.insert("text".to_string(), primitive);
                object
            }
        };
        if let Some(hover) = &self.on_hover {
            object.extend(hover.to_json(client, resolver));
        }
        if let Some(click) = &self.on_click {
            object.extend(click.to_json(client, resolver));
        }
        Value::Object(object)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<StringNode> for Node {
    fn from(node: StringNode) -> Self {
        Self::String(node)
    }
}

impl From<PlaceholderNode> for Node {
    fn from(node: PlaceholderNode) -> Self {
        Self::Placeholder(node)
    }
}

impl From<GroupNode> for Node {
    fn from(node: GroupNode) -> Self {
        Self::Group(node)
    }
}

impl From<ActionNode> for Node {
    fn from(node: ActionNode) -> Self {
        Self::Action(Box::new(node))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        StringNode::new(text).into()
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        StringNode::new(text).into()
    }
}

impl From<Placeholder> for Node {
    fn from(placeholder: Placeholder) -> Self {
        PlaceholderNode::new(placeholder).into()
    }
}

impl<N: Into<Node>> FromIterator<N> for Node {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        GroupNode::new(iter.into_iter().map(Into::into)).into()
    }
}

/// Serialized JSON and `Display` for every node type.
macro_rules! impl_render {
    ($node:ty) => {
        impl $node {
            /// Render as a compact serialized JSON text component.
            #[must_use]
            pub fn to_json_string(
                &self,
                client: Option<&Client>,
                resolver: Option<&dyn PlaceholderResolver>,
            ) -> String {
                #[cfg(feature = "tracing")]
                let _span = tracing::debug_span!("chat_text.to_json").entered();

                self.to_json(client, resolver).to_string()
            }
        }

        /// Plain text without resolving placeholders.
        impl fmt::Display for $node {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_plain_string(None))
            }
        }
    };
}

impl_render!(StringNode);
impl_render!(PlaceholderNode);
impl_render!(GroupNode);
impl_render!(ActionNode);
impl_render!(Node);
