//! Quill Format Reference
//!
//! This module documents the Quill markup as implemented by this library.
//! It contains no code.
//!
//! # Overview
//!
//! Quill is a line-oriented markup for authoring structured article content.
//! Every line is handled on its own: comments are stripped, surrounding
//! whitespace is trimmed, and the line is classified by its shape.
//! Indentation therefore carries no meaning; the serializer indents nested
//! blocks for readability only.
//!
//! # Values
//!
//! A document is a mapping of `key: value` lines:
//!
//! ```text
//! title: Hello
//! count: 3
//! active: true
//! subtitle:
//! ```
//!
//! The text after the first colon is trimmed and typed:
//!
//! | Token | Value |
//! |-------|-------|
//! | `true`, `false` | boolean |
//! | `-?digits(.digits)?` | number (`f64`) |
//! | nothing | empty string |
//! | anything else | string, verbatim (`34px`, `v1.2.3`, `1e5`) |
//!
//! Lines without a colon are ignored.
//!
//! ## Dot-path keys
//!
//! Dots in a key address nested mappings. Later paths merge into mappings
//! created earlier rather than replacing them:
//!
//! ```text
//! a.b: x
//! a.c: y        // a is {b: x, c: y}
//! ```
//!
//! A mapping assigned to a key that already holds a mapping is merged into
//! it key by key; any other value replaces what was there.
//!
//! # Blocks
//!
//! A key whose value ends with an opener starts a block, which runs until
//! a line that is exactly its closer:
//!
//! | Opener | Closer | Value |
//! |--------|--------|-------|
//! | `key: {` | `}` | mapping |
//! | `key: [` | `]` | list |
//! | `key: [[` | `]]` | content block |
//! | `key::` | `::` | multiline string |
//!
//! A mapping may also be written on one line: `a: {b: {c: x}, d: 1}`.
//!
//! ## Lists
//!
//! Each line of a list is one element, typed like a value. A line that is
//! exactly `[`, `[[` or `{` opens a nested list, content block or mapping.
//!
//! ```text
//! tags: [
//!   intro
//!   42
//!   [
//!     nested
//!   ]
//!   {
//!     name: Ada
//!   }
//! ]
//! ```
//!
//! ## Multiline strings
//!
//! Lines between `key::` and `::` are captured verbatim (each trimmed, no
//! comment stripping) and joined with newlines.
//!
//! ```text
//! intro::
//!   First line.
//!   /* kept as text */
//! ::
//! ```
//!
//! # Content blocks
//!
//! A content block is a list of typed items. Each line is one of:
//!
//! - `#type.mod1.mod2: value`: an item with a type, modifiers and a value
//!   (the value is empty when there is no colon)
//! - `<#type.mods: value` ... `>`: the same, followed by a property block
//! - anything else: a paragraph, `{type: p, value: line}`
//!
//! ```text
//! body: [[
//!   #h.large: Welcome
//!   A paragraph of text.
//!   <#image: cat.jpg
//!     alt: A cat
//!     size.w: 300
//!   >
//! ]]
//! ```
//!
//! ## Property blocks
//!
//! The lines of a property block are parsed like a mapping, closed by `>`.
//! Two keys are reserved: `value` replaces the item's value, and `mods`
//! holding a list replaces its modifiers. If the header value ends with
//! `[[`, a nested content block follows and becomes the value; any text
//! before the `[[` on that line is dropped.
//!
//! ```text
//! <#grid.two: [[
//!   #h: Left
//!   #h: Right
//! ]]
//!   gap: 8
//! >
//! ```
//!
//! # Comments
//!
//! - `// ...` on a line of its own
//! - `/* ... */` anywhere, including across lines and block boundaries
//!
//! `//` inside a value (as in a URL) is text.
//!
//! # Inline markup
//!
//! String values may carry inline markup, read with
//! [`parse_inline`](crate::parse_inline). See [`inline`](crate::inline)
//! for the bracket grammar:
//!
//! ```text
//! Read [the guide|/docs] or [this|#em.soft|title: Hover text].
//! Line one[/]line two, a[]b and hy[-]phen.
//! ```
//!
//! # Errors
//!
//! Parsing is forgiving. A block that reaches the end of input without its
//! closer keeps everything read so far. With
//! [`Options::strict`](crate::Options::strict),
//! [`parse_with_options`](crate::parse_with_options) reports it instead as
//! [`Error::UnterminatedBlock`](crate::Error::UnterminatedBlock).
