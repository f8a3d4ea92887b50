/*!
# Key Search

Depth-first search for every value bound to one key, at any depth.

The traversal keeps an explicit [`Stack`] instead of recursing, so deep
documents cannot overflow the call stack. Array elements are pushed in
document order, which means the *last* element of an array is expanded
first:

```rust
use serde_json::json;

let root = json!({"a": [{"k": 1}, {"k": 2}]});
let found = jsonkeys::find_all(&root, "k");
assert_eq!(found, vec![&json!(2), &json!(1)]);
```

A matched value is collected but never expanded, so keys nested inside a
match are not reported separately.
*/
use log::debug;

use crate::search::worklist::{Stack, WorkList};
use crate::value::{JsonNode, Shape};

/// Collects every value bound to `key` in every object reachable from
/// `root`, in depth-first discovery order.
pub(crate) fn collect_key<'a, N: JsonNode>(
    root: &'a N,
    key: &str,
    trace: bool,
) -> Vec<&'a N> {
    let mut stack = Stack::new(trace);
    let mut results: Vec<&'a N> = Vec::new();
    stack.push(root);

    while let Some(node) = stack.pop() {
        match node.shape() {
            Shape::Array(items) => stack.extend(items),
            Shape::Object(entries) => {
                for (name, value) in entries {
                    if name == key {
                        results.push(value);
                    } else {
                        stack.push(value);
                    }
                }
            }
            // Leaves carry no keys
            Shape::String | Shape::Number | Shape::Boolean | Shape::Null => {}
        }
    }

    debug!("key {key:?}: {} match(es)", results.len());
    results
}
