/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Object keys must be string literals and nested values single token trees
/// (literals, `[...]` or `{...}`); any other expression is converted through
/// [`to_value`](crate::to_value). There is no `null`: Quill has no null.
///
/// # Panics
///
/// Panics if a fallback expression has no Quill representation, such as `()`.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{quill, Value};
///
/// let page = quill!({
///     "title": "Home",
///     "count": 3,
///     "tags": ["intro", "rust"]
/// });
///
/// let map = page.as_map().unwrap();
/// assert_eq!(map.get("count"), Some(&Value::Number(3.0)));
/// ```
#[macro_export]
macro_rules! quill {
    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::quill!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key.to_string(), $crate::quill!($value));
        )*
        $crate::Value::Map(map)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).expect("quill! value has no Quill representation")
    };
}
