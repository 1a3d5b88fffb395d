//! Inline markup inside string values.
//!
//! Inline markup is a second grammar, independent of the line structure: a
//! string such as `Read [the guide|/docs] first` splits into text spans and
//! bracketed spans.
//!
//! ## Brackets
//!
//! A bracket holds `|`-separated parameters. The first is the value; the
//! rest are, in order of precedence:
//!
//! - `#type.mod1.mod2`: an explicit type with modifiers
//! - a link (`/...`, `http://...`, `https://...`, `@...`) in second
//!   position: becomes the `href` property and makes the span an `a`
//! - `key: value`: a property, with dotted keys nesting
//!
//! Without an explicit type a span is `a` when it has a link, `html` when
//! its value starts with `<`, and `strong` otherwise. Three bodies are
//! reserved: `[]` is a non-breaking space, `[/]` a line break and `[-]` a
//! soft hyphen.
//!
//! ## Typography
//!
//! Outside `html` spans, `"` becomes `”` and `--` becomes `–`; `\"` is a
//! literal quote. `\[`, `\]` and (inside brackets) `\|` are literal too.
//! There is no escape for `-`, so a `–` written next to a literal `-` reads
//! back with the two swapped; the serializer logs a warning for it.
//!
//! ```rust
//! use serde_quill::{parse_inline, serialize_inline, InlineItem};
//!
//! let items = parse_inline("Click [here|/go] now");
//! assert_eq!(items[0], InlineItem::text("Click "));
//! assert_eq!(items[1].kind, "a");
//! assert_eq!(serialize_inline(&items), "Click [here|/go] now");
//! ```

use crate::scalar::coerce;
use crate::{InlineItem, Map, Value};

const RIGHT_QUOTE: char = '\u{201D}';
const EN_DASH: char = '\u{2013}';

const NBSP: &str = "&nbsp;";
const LINE_BREAK: &str = "<br>";
const SOFT_HYPHEN: &str = "&shy;";

/// Splits a string into text and bracketed spans.
pub fn parse_inline(text: &str) -> Vec<InlineItem> {
    let mut items = Vec::new();
    let mut pending = String::new();
    let mut rest = text;

    while let Some(open) = find_unescaped(rest, '[') {
        let after = &rest[open + 1..];
        let Some(close) = find_unescaped(after, ']') else {
            break;
        };
        pending.push_str(&rest[..open]);
        flush(&mut items, &mut pending);
        items.push(bracket(&after[..close]));
        rest = &after[close + 1..];
    }
    // An unmatched `[` stays in the text.
    pending.push_str(rest);
    flush(&mut items, &mut pending);

    items
}

/// Writes spans back out as inline markup.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{serialize_inline, InlineItem};
///
/// let items = vec![
///     InlineItem::text("Line one"),
///     InlineItem::html("<br>"),
///     InlineItem::new("em", "two"),
/// ];
/// assert_eq!(serialize_inline(&items), "Line one[/][two|#em]");
/// ```
pub fn serialize_inline(items: &[InlineItem]) -> String {
    let mut out = String::new();
    for item in items {
        write_item(&mut out, item);
    }
    out
}

/// The type a span gets when no `#type` parameter is given.
///
/// This is the one rule shared by the parser (to pick a type) and the
/// serializer (to decide whether `#type` can be left out).
///
/// # Examples
///
/// ```rust
/// use serde_quill::inline::implied_type;
///
/// assert_eq!(implied_type("here", true), "a");
/// assert_eq!(implied_type("  <em>x</em>", false), "html");
/// assert_eq!(implied_type("bold", false), "strong");
/// ```
pub fn implied_type(value: &str, has_link: bool) -> &'static str {
    if has_link {
        "a"
    } else if value.trim_start().starts_with('<') {
        "html"
    } else {
        "strong"
    }
}

/// Returns `true` if the item's type would be inferred again from its value
/// and link, so its bracket needs no `#type` parameter.
pub fn has_implied_type(item: &InlineItem) -> bool {
    item.mods.is_empty() && item.kind == implied_type(&item.value, link_shorthand(item).is_some())
}

/// Returns `true` for parameters that read as a link target.
pub fn is_link(param: &str) -> bool {
    ["/", "http://", "https://", "@"]
        .iter()
        .any(|prefix| param.starts_with(prefix))
}

fn flush(items: &mut Vec<InlineItem>, pending: &mut String) {
    if !pending.is_empty() {
        items.push(InlineItem::text(resolve(pending, true)));
        pending.clear();
    }
}

fn bracket(body: &str) -> InlineItem {
    match body {
        "" => return InlineItem::html(NBSP),
        "/" => return InlineItem::html(LINE_BREAK),
        "-" => return InlineItem::html(SOFT_HYPHEN),
        _ => {}
    }

    let params = split_params(body);
    let value = params[0].as_str();
    let mut explicit: Option<(String, Vec<String>)> = None;
    let mut has_link = false;
    let mut props = Map::new();

    for (index, param) in params.iter().enumerate().skip(1) {
        if let Some(sigil) = param.strip_prefix('#') {
            let mut parts = sigil.split('.');
            let kind = parts.next().unwrap_or_default().to_string();
            explicit = Some((kind, parts.map(str::to_string).collect()));
        } else if index == 1 && is_link(param) {
            has_link = true;
            props.insert("href".to_string(), Value::String(resolve(param, false)));
        } else if let Some((key, raw)) = param.split_once(':') {
            let raw = resolve(raw.trim(), false);
            let value = if raw.is_empty() {
                Value::String(raw)
            } else {
                coerce(&raw)
            };
            props.merge_path(key.trim(), value);
        } else {
            log::trace!("ignoring inline parameter {:?}", param);
        }
    }

    let (kind, mods) =
        explicit.unwrap_or_else(|| (implied_type(value, has_link).to_string(), Vec::new()));
    let value = resolve(value, kind != "html");

    InlineItem::new(kind, value)
        .with_mods(mods)
        .with_props(props)
}

/// Byte offset of the first `target` that is not escaped by a backslash.
fn find_unescaped(s: &str, target: char) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == target {
            return Some(i);
        }
    }
    None
}

/// Splits a bracket body on unescaped `|`, unescaping `\|` and trimming each parameter.
fn split_params(body: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('|') => current.push('|'),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            '|' => params.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    params.push(current);

    params.into_iter().map(|p| p.trim().to_string()).collect()
}

/// Resolves `\[` and `\]`; with `typeset`, also quotes, dashes and `\"`.
fn resolve(raw: &str, typeset: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next @ ('[' | ']')) => out.push(next),
                Some('"') if typeset => out.push('"'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' if typeset => out.push(RIGHT_QUOTE),
            '-' if typeset && chars.peek() == Some(&'-') => {
                chars.next();
                out.push(EN_DASH);
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Inverse of [`resolve`]; `in_bracket` also escapes `|`.
fn escape(value: &str, typeset: bool, in_bracket: bool) -> String {
    if typeset && (value.contains("-\u{2013}") || value.contains("\u{2013}-")) {
        log::warn!("inline text {:?} has a dash beside a hyphen and will not read back exactly", value);
    }
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '[' => out.push_str("\\["),
            ']' => out.push_str("\\]"),
            '|' if in_bracket => out.push_str("\\|"),
            '"' if typeset => out.push_str("\\\""),
            RIGHT_QUOTE if typeset => out.push('"'),
            EN_DASH if typeset => out.push_str("--"),
            _ => out.push(ch),
        }
    }
    out
}

/// The `href` that can be written as a bare second parameter, if any.
fn link_shorthand(item: &InlineItem) -> Option<&str> {
    if item.kind != "a" {
        return None;
    }
    item.props
        .get("href")
        .and_then(Value::as_str)
        .filter(|href| is_link(href))
}

fn write_item(out: &mut String, item: &InlineItem) {
    let plain = item.mods.is_empty() && item.props.is_empty();

    if plain && item.kind == "text" {
        out.push_str(&escape(&item.value, true, false));
        return;
    }
    if plain && item.kind == "html" {
        let short = match item.value.as_str() {
            NBSP => Some("[]"),
            LINE_BREAK => Some("[/]"),
            SOFT_HYPHEN => Some("[-]"),
            _ => None,
        };
        if let Some(short) = short {
            out.push_str(short);
            return;
        }
    }

    if item.value != item.value.trim() {
        log::warn!("inline value {:?} will lose its surrounding whitespace", item.value);
    }

    let mut params = vec![escape(&item.value, item.kind != "html", true)];

    let href = link_shorthand(item);
    if let Some(href) = href {
        params.push(escape(href, false, true));
    }

    let reserved = params.len() == 1 && matches!(params[0].as_str(), "" | "/" | "-");
    if !has_implied_type(item) || reserved {
        let mut sigil = format!("#{}", item.kind);
        for m in &item.mods {
            sigil.push('.');
            sigil.push_str(m);
        }
        params.push(escape(&sigil, false, true));
    }

    let mut props = item.props.clone();
    if href.is_some() {
        props.remove("href");
    }
    flatten_props("", &props, &mut params);

    out.push('[');
    out.push_str(&params.join("|"));
    out.push(']');
}

/// Writes nested properties as dotted `key: value` parameters.
fn flatten_props(prefix: &str, props: &Map, params: &mut Vec<String>) {
    for (key, value) in props {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Map(nested) => flatten_props(&path, nested, params),
            Value::List(_) | Value::Content(_) => {
                log::warn!("inline property '{}' is not a scalar and is left out", path);
            }
            scalar => {
                params.push(format!("{}: {}", path, escape(&scalar.to_string(), false, true)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, Value)]) -> Map {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just words"), vec![InlineItem::text("just words")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_link_shorthand() {
        let items = parse_inline("Click [here|/go] now");
        assert_eq!(
            items,
            vec![
                InlineItem::text("Click "),
                InlineItem::new("a", "here").with_props(props(&[("href", Value::from("/go"))])),
                InlineItem::text(" now"),
            ]
        );
    }

    #[test]
    fn test_reserved_bodies() {
        let items = parse_inline("a[]b[/]c[-]d");
        let kinds: Vec<&str> = items.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["text", "html", "text", "html", "text", "html", "text"]
        );
        assert_eq!(items[1].value, "&nbsp;");
        assert_eq!(items[3].value, "<br>");
        assert_eq!(items[5].value, "&shy;");
    }

    #[test]
    fn test_default_types() {
        assert_eq!(parse_inline("[bold]"), vec![InlineItem::new("strong", "bold")]);
        assert_eq!(
            parse_inline("[<em>x</em>]"),
            vec![InlineItem::html("<em>x</em>")]
        );
    }

    #[test]
    fn test_explicit_type_with_link_keeps_href() {
        let items = parse_inline("[Docs|https://example.com|#button.primary]");
        assert_eq!(items[0].kind, "button");
        assert_eq!(items[0].mods, vec!["primary"]);
        assert_eq!(
            items[0].props.get("href"),
            Some(&Value::from("https://example.com"))
        );
    }

    #[test]
    fn test_link_only_counts_in_second_position() {
        let items = parse_inline("[x|#em|/go]");
        assert_eq!(items[0].kind, "em");
        assert!(items[0].props.is_empty());
    }

    #[test]
    fn test_dotted_properties_nest_and_coerce() {
        let items = parse_inline("[Photo|#img|size.w: 300|size.h: 200|lazy: true]");
        let size = items[0].props.get("size").and_then(Value::as_map).unwrap();
        assert_eq!(size.get("w"), Some(&Value::Number(300.0)));
        assert_eq!(size.get("h"), Some(&Value::Number(200.0)));
        assert_eq!(items[0].props.get("lazy"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_typography() {
        let items = parse_inline(r#"He said "yes" -- twice, \"literally\""#);
        assert_eq!(
            items,
            vec![InlineItem::text("He said \u{201D}yes\u{201D} \u{2013} twice, \"literally\"")]
        );
    }

    #[test]
    fn test_html_value_is_not_typeset() {
        let items = parse_inline(r#"[<a class="x">--</a>]"#);
        assert_eq!(items, vec![InlineItem::html(r#"<a class="x">--</a>"#)]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(parse_inline(r"\[not a span\]"), vec![InlineItem::text("[not a span]")]);

        let items = parse_inline(r"[a \| b \] c|#code]");
        assert_eq!(items, vec![InlineItem::new("code", "a | b ] c")]);
    }

    #[test]
    fn test_unmatched_bracket_is_text() {
        assert_eq!(parse_inline("a [b"), vec![InlineItem::text("a [b")]);
    }

    #[test]
    fn test_serialize_elides_implied_type() {
        let items = vec![
            InlineItem::new("strong", "bold"),
            InlineItem::html("<i>x</i>"),
            InlineItem::new("em", "soft"),
        ];
        assert_eq!(serialize_inline(&items), "[bold][<i>x</i>][soft|#em]");
    }

    #[test]
    fn test_serialize_forces_type_on_reserved_bodies() {
        let items = vec![InlineItem::new("strong", "/"), InlineItem::new("strong", "")];
        let text = serialize_inline(&items);
        assert_eq!(text, "[/|#strong][|#strong]");
        assert_eq!(parse_inline(&text), items);
    }

    #[test]
    fn test_serialize_link_without_shorthand() {
        let item = InlineItem::new("a", "mail").with_props(props(&[("href", Value::from("mailto:x@y.z"))]));
        let text = serialize_inline(&[item.clone()]);
        assert_eq!(text, "[mail|#a|href: mailto:x@y.z]");
        assert_eq!(parse_inline(&text), vec![item]);
    }

    #[test]
    fn test_serialize_round_trips_typography_and_escapes() {
        let source = r#"A "quote" -- [x\|y|#code] and \[brackets\]"#;
        let items = parse_inline(source);
        assert_eq!(parse_inline(&serialize_inline(&items)), items);
    }

    #[test]
    fn test_dash_beside_hyphen_is_lossy() {
        let items = vec![InlineItem::text("a-\u{2013}b")];
        let text = serialize_inline(&items);
        assert_eq!(text, "a---b");
        assert_eq!(parse_inline(&text), vec![InlineItem::text("a\u{2013}-b")]);

        let spaced = vec![InlineItem::text("a - \u{2013} b")];
        assert_eq!(parse_inline(&serialize_inline(&spaced)), spaced);
    }

    #[test]
    fn test_has_implied_type() {
        let link = InlineItem::new("a", "here").with_props(props(&[("href", Value::from("/go"))]));
        assert!(has_implied_type(&link));
        assert!(!has_implied_type(&InlineItem::new("a", "here")));
        assert!(!has_implied_type(&InlineItem::new("strong", "x").with_mods(vec!["big".into()])));
    }
}
