//! Click and hover actions for [`ActionNode`](crate::node::ActionNode).
//!
//! Each action wraps a [`Node`]. Click actions send the node's plain text
//! (with placeholders resolved); hover actions show the node itself.
//!
//! ```
//! use chat_text::action::ClickAction;
//! use chat_text::placeholder::Placeholder;
//!
//! let click = ClickAction::suggest_command(Placeholder::new("reply"));
//! let resolver = |_: &Placeholder| Some("/msg Alex ".to_string());
//!
//! assert_eq!(click.value(None), "{reply}");
//! assert_eq!(click.value(Some(&resolver)), "/msg Alex ");
//! ```

use serde_json::{Map, Value, json};

use crate::client::Client;
use crate::node::Node;
use crate::placeholder::PlaceholderResolver;

/// What happens when a player clicks the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Copy the text to the clipboard.
    CopyText(Node),
    /// Run the text as a command.
    RunCommand(Node),
    /// Put the text in the chat input.
    SuggestCommand(Node),
}

impl ClickAction {
    #[must_use]
    pub fn copy_text(text: impl Into<Node>) -> Self {
        Self::CopyText(text.into())
    }

    #[must_use]
    pub fn run_command(command: impl Into<Node>) -> Self {
        Self::RunCommand(command.into())
    }

    #[must_use]
    pub fn suggest_command(command: impl Into<Node>) -> Self {
        Self::SuggestCommand(command.into())
    }

    /// The protocol name of the action.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::CopyText(_) => "copy_to_clipboard",
            Self::RunCommand(_) => "run_command",
            Self::SuggestCommand(_) => "suggest_command",
        }
    }

    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::CopyText(node) | Self::RunCommand(node) | Self::SuggestCommand(node) => node,
        }
    }

    /// The text sent by the action.
    #[must_use]
    pub fn value(&self, resolver: Option<&dyn PlaceholderResolver>) -> String {
        self.node().to_plain_string(resolver)
    }

    /// `{"clickEvent": {"action": ..., "value": ...}}`
    ///
    /// The value is plain text for every client.
    #[must_use]
    pub fn to_json(
        &self,
        _client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert(
            "clickEvent".to_string(),
            json!({
                "action": self.action_name(),
                "value": self.value(resolver),
            }),
        );
        object
    }
}

/// What happens when a player hovers over the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverAction {
    /// Show a text tooltip.
    ShowText(Node),
}

impl HoverAction {
    #[must_use]
    pub fn show_text(text: impl Into<Node>) -> Self {
        Self::ShowText(text.into())
    }

    /// The protocol name of the action.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::ShowText(_) => "show_text",
        }
    }

    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::ShowText(node) => node,
        }
    }

    /// `{"hoverEvent": {"action": "show_text", "value": <node json>}}`
    #[must_use]
    pub fn to_json(
        &self,
        client: Option<&Client>,
        resolver: Option<&dyn PlaceholderResolver>,
    ) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert(
            "hoverEvent".to_string(),
            json!({
                "action": self.action_name(),
                "value": self.node().to_json(client, resolver),
            }),
        );
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::node::{GroupNode, StringNode};
    use crate::placeholder::Placeholder;

    #[test]
    fn test_click_action_names() {
        assert_eq!(ClickAction::copy_text("x").action_name(), "copy_to_clipboard");
        assert_eq!(ClickAction::run_command("x").action_name(), "run_command");
        assert_eq!(ClickAction::suggest_command("x").action_name(), "suggest_command");
    }

    #[test]
    fn test_click_json() {
        let click = ClickAction::copy_text("secret");
        assert_eq!(
            Value::Object(click.to_json(None, None)),
            json!({"clickEvent": {"action": "copy_to_clipboard", "value": "secret"}})
        );
    }

    #[test]
    fn test_click_value_is_plain_text() {
        let command = GroupNode::new([
            Node::from("/tp "),
            StringNode::new("spawn").with_color(Color::RED).into(),
        ]);
        let click = ClickAction::run_command(command);
        assert_eq!(click.value(None), "/tp spawn");
        assert_eq!(
            Value::Object(click.to_json(Some(&Client::latest()), None)),
            json!({"clickEvent": {"action": "run_command", "value": "/tp spawn"}})
        );
    }

    #[test]
    fn test_click_resolves_placeholders() {
        let click = ClickAction::run_command(Placeholder::with_item("cmd", "home"));
        let resolver = |p: &Placeholder| p.item().map(|item| format!("/{item}"));
        assert_eq!(click.value(Some(&resolver)), "/home");
        assert_eq!(click.value(None), "{cmd home}");
    }

    #[test]
    fn test_hover_json() {
        let hover = HoverAction::show_text(StringNode::new("tip").with_color(Color::from_rgb(0x123456)));
        assert_eq!(
            Value::Object(hover.to_json(Some(&Client::latest()), None)),
            json!({"hoverEvent": {"action": "show_text", "value": {"text": "tip", "color": "#123456"}}})
        );
        assert_eq!(
            Value::Object(hover.to_json(None, None)),
            json!({"hoverEvent": {"action": "show_text", "value": {"text": "tip", "color": "dark_blue"}}})
        );
    }

    #[test]
    fn test_hover_bare_text() {
        let hover = HoverAction::show_text("tip");
        assert_eq!(hover.node(), &Node::from("tip"));
        assert_eq!(
            Value::Object(hover.to_json(None, None)),
            json!({"hoverEvent": {"action": "show_text", "value": "tip"}})
        );
    }
}
