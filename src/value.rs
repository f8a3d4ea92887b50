/*!
# Value Model

The searches in this crate never look at a concrete JSON type directly.
Instead they ask a node for its [`Shape`]: one of the six JSON kinds, with
the children exposed for the two container kinds.

Two trees implement [`JsonNode`] out of the box:

- [`serde_json::Value`], the owned tree produced by `serde_json`.
- [`serde_json_borrow::Value`], a zero-copy tree that keeps object entries in
  document order, duplicate keys included.

```rust
use jsonkeys::value::{JsonNode, ValueKind};
use serde_json::json;

let doc = json!({"a": [1, 2]});
assert_eq!(doc.shape().kind(), ValueKind::Object);
assert_eq!(jsonkeys::value::depth(&doc), 3);
```
*/
use std::fmt;

/// Iterator over the `(name, value)` entries of an object.
pub type Entries<'a, N> = Box<dyn Iterator<Item = (&'a str, &'a N)> + 'a>;

/// The shape of a single node. Leaves carry no payload since the searches
/// only ever discard them.
pub enum Shape<'a, N> {
    /// Mapping from string key to value, in the backing value's order
    Object(Entries<'a, N>),
    /// Ordered sequence of values
    Array(&'a [N]),
    /// A JSON string
    String,
    /// A JSON number
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
}

impl<N> Shape<'_, N> {
    /// Returns the kind tag of this shape.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Shape::Object(_) => ValueKind::Object,
            Shape::Array(_) => ValueKind::Array,
            Shape::String => ValueKind::String,
            Shape::Number => ValueKind::Number,
            Shape::Boolean => ValueKind::Boolean,
            Shape::Null => ValueKind::Null,
        }
    }
}

impl<N> fmt::Debug for Shape<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array(items) => write!(f, "Array(len={})", items.len()),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Kind tag of a JSON value, used in diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// A node of an untyped JSON tree.
///
/// `Debug` is required so that work lists can print the element they expose
/// when tracing is enabled.
pub trait JsonNode: fmt::Debug + Sized {
    /// Returns the shape of this node, borrowing its children.
    fn shape(&self) -> Shape<'_, Self>;
}

impl JsonNode for serde_json::Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Self::Object(map) => {
                Shape::Object(Box::new(map.iter().map(|(k, v)| (k.as_str(), v))))
            }
            Self::Array(items) => Shape::Array(items),
            Self::String(_) => Shape::String,
            Self::Number(_) => Shape::Number,
            Self::Bool(_) => Shape::Boolean,
            Self::Null => Shape::Null,
        }
    }
}

impl JsonNode for serde_json_borrow::Value<'_> {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Self::Object(obj) => Shape::Object(Box::new(obj.iter())),
            Self::Array(items) => Shape::Array(items),
            Self::Str(_) => Shape::String,
            Self::Number(_) => Shape::Number,
            Self::Bool(_) => Shape::Boolean,
            Self::Null => Shape::Null,
        }
    }
}

/// Returns the depth of the JSON value. A leaf or an empty container has depth
/// `1`.
#[must_use]
pub fn depth<N: JsonNode>(node: &N) -> usize {
    match node.shape() {
        Shape::Object(entries) => {
            1 + entries.map(|(_, value)| depth(value)).max().unwrap_or(0)
        }
        Shape::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Shape::String | Shape::Number | Shape::Boolean | Shape::Null => 1,
    }
}
