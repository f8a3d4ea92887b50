//! # Key Searches
//!
//! Two schema-free queries over any [`JsonNode`] tree:
//! - [`JsonSearch::find_all`]: every value bound to one key, at any depth
//!   (depth-first, explicit stack)
//! - [`JsonSearch::find_chain`]: the values reached by following an ordered
//!   chain of keys level by level (breadth-first, explicit queue)
//!
//! Both return references into the searched tree, in discovery order.

pub mod chain;
pub mod error;
pub mod key;
pub mod worklist;

use std::fmt;
use std::str::FromStr;

use crate::value::JsonNode;

// Re-exports
pub use error::SearchError;
pub use worklist::{Queue, Stack, WorkList, WorkListKind};

/// Search configuration.
///
/// A `JsonSearch` holds no traversal state: every call allocates its own work
/// list, so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSearch {
    /// Emit a trace record for every stack push/pop in [`Self::find_all`]
    pub stack_trace: bool,
    /// Emit a trace record for every queue push/pop in [`Self::find_chain`]
    pub queue_trace: bool,
}

impl JsonSearch {
    /// Constructs a search with tracing disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stack_trace: false,
            queue_trace: false,
        }
    }

    /// Enables or disables stack tracing.
    #[must_use]
    pub const fn with_stack_trace(mut self, enabled: bool) -> Self {
        self.stack_trace = enabled;
        self
    }

    /// Enables or disables queue tracing.
    #[must_use]
    pub const fn with_queue_trace(mut self, enabled: bool) -> Self {
        self.queue_trace = enabled;
        self
    }

    /// Finds every value bound to `key` in every object of `root`, at any
    /// depth. Matched values are not searched further.
    ///
    /// See [`key`] for the traversal order.
    #[must_use]
    pub fn find_all<'a, N: JsonNode>(&self, root: &'a N, key: &str) -> Vec<&'a N> {
        key::collect_key(root, key, self.stack_trace)
    }

    /// Follows the ordered key chain `keys` from `root`, returning the
    /// search queue's contents once every key has matched.
    ///
    /// See [`chain`] for the round semantics. An empty chain returns `[root]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::KeyNotFound`] if the queue runs dry while a key
    /// is still pending.
    pub fn find_chain<'a, N: JsonNode, K: AsRef<str>>(
        &self,
        root: &'a N,
        keys: &[K],
    ) -> Result<Vec<&'a N>, SearchError> {
        chain::collect_chain(root, keys, self.queue_trace)
    }
}

/// Runs [`JsonSearch::find_all`] without tracing.
#[must_use]
pub fn find_all<'a, N: JsonNode>(root: &'a N, key: &str) -> Vec<&'a N> {
    JsonSearch::new().find_all(root, key)
}

/// Runs [`JsonSearch::find_chain`] without tracing.
///
/// # Errors
///
/// Returns [`SearchError::KeyNotFound`] if a key of the chain is never found.
pub fn find_chain<'a, N: JsonNode, K: AsRef<str>>(
    root: &'a N,
    keys: &[K],
) -> Result<Vec<&'a N>, SearchError> {
    JsonSearch::new().find_chain(root, keys)
}

/// An owned, ordered chain of keys for [`JsonSearch::find_chain`].
///
/// Chains can be parsed from dotted strings or built from JSON:
///
/// ```rust
/// use jsonkeys::search::KeyChain;
/// use serde_json::json;
///
/// let dotted: KeyChain = "store.books.title".parse().expect("valid chain");
/// let from_json = KeyChain::try_from(&json!(["store", "books", "title"]))
///     .expect("valid chain");
/// assert_eq!(dotted, from_json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChain(Vec<String>);

impl KeyChain {
    /// Constructs a chain from the given keys.
    #[must_use]
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// The keys of the chain, front first.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Number of keys in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[String]> for KeyChain {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for KeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyChain {
    type Err = SearchError;

    /// Splits a dotted chain such as `a.b.c`. Empty segments are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .enumerate()
            .map(|(i, key)| {
                if key.is_empty() {
                    Err(SearchError::InvalidKeyType(format!(
                        "empty key at position {i} in {s:?}"
                    )))
                } else {
                    Ok(key.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<&serde_json::Value> for KeyChain {
    type Error = SearchError;

    /// Accepts a single string key or an array of string keys.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(key) => Ok(Self(vec![key.clone()])),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    serde_json::Value::String(key) => Ok(key.clone()),
                    other => Err(SearchError::InvalidKeyType(format!(
                        "expected string at position {i}, found {}",
                        other.shape().kind()
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            other => Err(SearchError::InvalidValueKind {
                expected: "string or array of strings",
                found: other.shape().kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use serde_json::json;

    #[test]
    fn search_object_is_shareable_across_threads() {
        let search = JsonSearch::new().with_stack_trace(false);
        let root = json!({"a": [{"k": 1}, {"k": 2}], "b": {"c": {"k": 3}}});

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| search.find_all(&root, "k").len()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().expect("thread panicked"), 3);
            }
        });
    }

    #[test]
    fn builder_flags() {
        let search = JsonSearch::new()
            .with_stack_trace(true)
            .with_queue_trace(true);
        assert!(search.stack_trace && search.queue_trace);
        assert_eq!(JsonSearch::default(), JsonSearch::new());
    }

    #[test]
    fn free_functions_match_methods() {
        let root = json!({"a": {"b": 1}, "c": {"b": 2}});
        assert_eq!(find_all(&root, "b"), JsonSearch::new().find_all(&root, "b"));
        assert_eq!(
            find_chain(&root, &["a", "b"]),
            JsonSearch::new().find_chain(&root, &["a", "b"])
        );
    }

    #[test]
    fn find_chain_accepts_key_chain() {
        let root = json!({"a": {"b": 1}});
        let chain: KeyChain = "a.b".parse().expect("valid chain");
        assert_eq!(find_chain(&root, chain.keys()), Ok(vec![&json!(1)]));
    }

    #[test]
    fn dotted_chain_parsing() {
        let chain: KeyChain = "a.b.c".parse().expect("valid chain");
        assert_eq!(chain, KeyChain::new(["a", "b", "c"]));
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.to_string(), "a.b.c");

        assert!(matches!(
            "a..b".parse::<KeyChain>(),
            Err(SearchError::InvalidKeyType(_))
        ));
        assert!(matches!(
            "".parse::<KeyChain>(),
            Err(SearchError::InvalidKeyType(_))
        ));
    }

    #[test]
    fn chain_from_json_values() {
        assert_eq!(
            KeyChain::try_from(&json!("solo")),
            Ok(KeyChain::new(["solo"]))
        );
        assert_eq!(
            KeyChain::try_from(&json!([])),
            Ok(KeyChain::default())
        );
        assert!(matches!(
            KeyChain::try_from(&json!(["a", 2])),
            Err(SearchError::InvalidKeyType(_))
        ));
        assert_eq!(
            KeyChain::try_from(&json!({"a": 1})),
            Err(SearchError::InvalidValueKind {
                expected: "string or array of strings",
                found: ValueKind::Object,
            })
        );
    }
}
