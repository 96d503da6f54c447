// SPDX-FileCopyrightText: 2026 Modquery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown-to-HTML rendering shim over comrak.

use comrak::{markdown_to_html, Options};

/// Renders raw markdown to HTML. Pure function; the renderer defines no
/// failure contract.
pub fn render_markdown(markdown: &str) -> String {
    markdown_to_html(markdown, &Options::default())
}
