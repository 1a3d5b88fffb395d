//! Dynamic value representation for Quill documents.
//!
//! ## Core Types
//!
//! - [`Value`]: any Quill value (string, number, boolean, list, mapping, content block)
//! - [`ContentItem`]: one typed entry of a `[[...]]` content block
//! - [`InlineItem`]: one span produced by [`parse_inline`](crate::parse_inline)
//!
//! The value space is deliberately small: there is no null, no integer/float
//! split (every number is an `f64`) and no dates. Content blocks are a
//! distinct variant so a list of content items never has to be recognised
//! by its shape.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_quill::{parse, ContentItem, Value};
//!
//! let doc = parse("title: Hello\nbody: [[\n#h: Hi\nSome text.\n]]");
//!
//! assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("Hello"));
//!
//! let body = doc.get("body").and_then(|v| v.as_content()).unwrap();
//! assert_eq!(body[0], ContentItem::new("h", "Hi"));
//! assert_eq!(body[1], ContentItem::new("p", "Some text."));
//! ```
//!
//! ### Converting into Rust types
//!
//! `Value` implements [`serde::Deserializer`], so a parsed tree converts into
//! any `T: Deserialize`:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_quill::{parse, Value};
//!
//! #[derive(Deserialize)]
//! struct Page { title: String, count: u32 }
//!
//! let doc = parse("title: Home\ncount: 3");
//! let page = Page::deserialize(Value::Map(doc)).unwrap();
//! assert_eq!(page.count, 3);
//! ```

use crate::{Error, Map, Result};
use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::{forward_to_deserialize_any, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any Quill value.
///
/// # Examples
///
/// ```rust
/// use serde_quill::Value;
///
/// let num = Value::Number(42.0);
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// assert_eq!(num.to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(Map),
    Content(Vec<ContentItem>),
}

/// One entry of a content block: a heading, paragraph, image or any typed component.
///
/// Empty `mods` and `props` are left out when the item is serialized with
/// serde, so `{"type": "h", "value": "Hi"}` is the JSON form of `#h: Hi`.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{ContentItem, Value};
///
/// let item = ContentItem::new("image", "cat.jpg").with_mods(vec!["wide".to_string()]);
/// assert_eq!(item.kind, "image");
/// assert_eq!(item.value, Value::from("cat.jpg"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map,
}

/// One span of inline markup: plain text, an emphasised run, a link or raw HTML.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{parse_inline, InlineItem};
///
/// let items = parse_inline("say [hi]");
/// assert_eq!(items[0], InlineItem::text("say "));
/// assert_eq!(items[1], InlineItem::new("strong", "hi"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InlineItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map,
}

impl ContentItem {
    /// Creates an item with no modifiers and no properties.
    pub fn new(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        ContentItem {
            kind: kind.into(),
            value: value.into(),
            mods: Vec::new(),
            props: Map::new(),
        }
    }

    #[must_use]
    pub fn with_mods(mut self, mods: Vec<String>) -> Self {
        self.mods = mods;
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Map) -> Self {
        self.props = props;
        self
    }

    /// Returns `true` for an item that reads back from a bare line of text:
    /// a `p` with no modifiers and no properties.
    #[must_use]
    pub fn is_plain_paragraph(&self) -> bool {
        self.kind == "p" && self.mods.is_empty() && self.props.is_empty()
    }

    /// Recognises a mapping shaped like a content item.
    ///
    /// The mapping must hold all of `type` (a string), `value`, `mods`
    /// (a list) and `props` (a mapping); anything less is an ordinary mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::{quill, ContentItem};
    ///
    /// let full = quill!({ "type": "h", "value": "Hi", "mods": [], "props": {} });
    /// assert!(ContentItem::from_map(full.as_map().unwrap()).is_some());
    ///
    /// let partial = quill!({ "type": "h", "value": "Hi" });
    /// assert!(ContentItem::from_map(partial.as_map().unwrap()).is_none());
    /// ```
    #[must_use]
    pub fn from_map(map: &Map) -> Option<ContentItem> {
        let kind = map.get("type")?.as_str()?;
        let value = map.get("value")?;
        let mods = map.get("mods")?.as_list()?;
        let props = map.get("props")?.as_map()?;

        Some(ContentItem {
            kind: kind.to_string(),
            value: value.clone(),
            mods: mods.iter().map(Value::to_string).collect(),
            props: props.clone(),
        })
    }

    /// Recognises a list that is really a content block.
    ///
    /// Holds when the list is non-empty and every element passes
    /// [`ContentItem::from_map`]. The parser and the serializer both use it, so
    /// such a list reads back as `Value::Content` whichever way it was built.
    #[must_use]
    pub fn from_list(items: &[Value]) -> Option<Vec<ContentItem>> {
        if items.is_empty() {
            return None;
        }
        items
            .iter()
            .map(|item| item.as_map().and_then(ContentItem::from_map))
            .collect()
    }

    /// Converts the item into its mapping form, leaving out empty `mods` and `props`.
    #[must_use]
    pub fn into_map(self) -> Map {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.kind));
        map.insert("value".to_string(), self.value);
        if !self.mods.is_empty() {
            let mods = self.mods.into_iter().map(Value::String).collect();
            map.insert("mods".to_string(), Value::List(mods));
        }
        if !self.props.is_empty() {
            map.insert("props".to_string(), Value::Map(self.props));
        }
        map
    }
}

impl InlineItem {
    /// Creates an item with no modifiers and no properties.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        InlineItem {
            kind: kind.into(),
            value: value.into(),
            mods: Vec::new(),
            props: Map::new(),
        }
    }

    /// Creates a plain `text` span.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new("text", value)
    }

    /// Creates an `html` span holding raw markup.
    pub fn html(value: impl Into<String>) -> Self {
        Self::new("html", value)
    }

    #[must_use]
    pub fn with_mods(mut self, mods: Vec<String>) -> Self {
        self.mods = mods;
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Map) -> Self {
        self.props = props;
        self
    }
}

impl Value {
    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a plain list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if the value is a content block.
    #[inline]
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Value::Content(_))
    }

    /// Returns `true` for strings, numbers and booleans.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::String(_) | Value::Number(_) | Value::Bool(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42.0).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a plain list, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a mapping, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a content block, returns its items. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_content(&self) -> Option<&Vec<ContentItem>> {
        match self {
            Value::Content(items) => Some(items),
            _ => None,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "mapping",
            Value::Content(_) => "content block",
        }
    }
}

/// Scalars display as the token that reads back to them; containers get a
/// short placeholder.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(
                    f,
                    "[{}]",
                    items
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Map(_) => write!(f, "{{map}}"),
            Value::Content(items) => write!(f, "[[{} items]]", items.len()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
            Value::Content(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number, boolean, list or mapping")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
                Err(E::custom("null values have no Quill representation"))
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
                self.visit_unit()
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Map(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Whole numbers are offered to visitors as integers so they fit integer fields.
fn visit_number<'de, V>(n: f64, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        visitor.visit_i64(n as i64)
    } else {
        visitor.visit_f64(n)
    }
}

impl<'de> Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_string(s),
            Value::Number(n) => visit_number(n, visitor),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items.into_iter())),
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map.into_iter())),
            Value::Content(items) => visitor.visit_seq(SeqDeserializer::new(
                items.into_iter().map(|item| Value::Map(item.into_map())),
            )),
        }
    }

    // Authors write `version: 2` for a string field; accept the scalar's text.
    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Number(_) | Value::Bool(_) => visitor.visit_string(self.to_string()),
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected a unit variant name, found {}",
                other.kind_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.kind_name()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Vec<ContentItem>> for Value {
    fn from(value: Vec<ContentItem>) -> Self {
        Value::Content(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}
