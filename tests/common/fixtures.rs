//! Shared nodes, resolvers and clients for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use chat_text::prelude::*;

/// A client that understands RGB text colors.
pub fn rgb_client() -> Client {
    Client::latest()
}

/// A client limited to the legacy palette.
pub fn legacy_client() -> Client {
    Client::compatible()
}

/// Resolver with a player name and a kill count.
pub fn player_values() -> HashMap<Placeholder, String> {
    let mut values = HashMap::new();
    values.insert(Placeholder::new("player"), "Alex".to_string());
    values.insert(Placeholder::with_item("stat", "kills"), "12".to_string());
    values
}

/// `[Server] Welcome, {player}!` with a gold tag and a clickable name.
pub fn welcome_message() -> Node {
    GroupNode::new([
        StringNode::new("[Server] ")
            .with_color(Color::GOLD)
            .with_style(Formatting::Bold)
            .into(),
        Node::from("Welcome, "),
        ActionNode::new(PlaceholderNode::new(Placeholder::new("player")).with_color(Color::AQUA))
            .on_hover(HoverAction::show_text("Click to message"))
            .on_click(ClickAction::suggest_command(Placeholder::new("player")))
            .into(),
        Node::from("!"),
    ])
    .into()
}
