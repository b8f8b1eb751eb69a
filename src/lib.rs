//! # chat_text
//!
//! Rich chat text for a protocol with two wire forms: legacy strings with
//! inline `§` formatting codes, and structured JSON text components.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_text::prelude::*;
//!
//! let node: Node = ActionNode::new(
//!     StringNode::new("[spawn]").with_color(Color::from_rgb(0xC0FFEE)),
//! )
//! .on_click(ClickAction::run_command("/spawn"))
//! .into();
//!
//! assert_eq!(node.to_legacy_string(None), "\u{a7}b[spawn]");
//! assert_eq!(
//!     node.to_json_string(Some(&Client::latest()), None),
//!     r##"{"clickEvent":{"action":"run_command","value":"/spawn"},"color":"#c0ffee","text":"[spawn]"}"##
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: 24-bit colors, downgraded to the 16-color legacy palette by
//!   perceptual (CIEDE2000) distance for clients that need it
//! - **Formatting**: Style flags and their bitset combination
//! - **Node**: Immutable text trees rendered as plain, legacy or JSON text
//! - **Placeholder**: Values substituted at render time
//! - **Client**: Decides which features the rendered output may use

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod client;
pub mod color;
pub mod color_space;
pub mod formatting;
pub mod logging;
pub mod node;
pub mod placeholder;
pub mod sync;

/// The control character that starts every legacy formatting code.
pub const LEGACY_PREFIX: char = '\u{a7}';

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::action::{ClickAction, HoverAction};
    pub use crate::client::{Client, ClientFeature, ClientVersion};
    pub use crate::color::Color;
    pub use crate::formatting::{CombinedFormatting, Formatting};
    pub use crate::node::{ActionNode, GroupNode, Node, PlaceholderNode, StringNode};
    pub use crate::placeholder::{Placeholder, PlaceholderResolver};
}

// Re-export key types at crate root
pub use action::{ClickAction, HoverAction};
pub use client::{Client, ClientFeature, ClientVersion, VersionParseError};
pub use color::{Color, ColorParseError};
pub use formatting::{CombinedFormatting, Formatting, FormattingParseError};
pub use logging::ChatLogger;
pub use node::{ActionNode, GroupNode, Node, PlaceholderNode, StringNode};
pub use placeholder::{Placeholder, PlaceholderResolver};
