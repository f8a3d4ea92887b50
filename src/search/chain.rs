/*!
# Key-Chain Search

Breadth-first search for the values reached by following an ordered chain of
keys `k1, k2, ..., kn` level by level.

The search works in *rounds* over a FIFO [`Queue`]. A round processes exactly
the elements present in the queue when the round starts; anything enqueued
during the round waits for the next one. Within a round:

- arrays are expanded, their elements enqueued in document order;
- objects enqueue the values bound to the current front key and drop every
  other entry;
- leaves are discarded.

If any object in the round matched the front key, the chain advances to the
next key. Otherwise the same key is tried again on the next round, which lets
a key be found below any number of nested arrays.

When the chain is exhausted the *remaining queue contents* are returned: the
values matched in the final round, together with any array elements that
were enqueued in that round and never processed.

```rust
use serde_json::json;

let root = json!({"a": {"b": 1}, "c": {"b": 2}});
let found = jsonkeys::find_chain(&root, &["a", "b"]).expect("chain matches");
assert_eq!(found, vec![&json!(1)]);
```

If the queue runs dry while a key is still pending, the search stops with
[`SearchError::KeyNotFound`].
*/
use log::debug;

use crate::search::error::SearchError;
use crate::search::worklist::{Queue, WorkList};
use crate::value::{JsonNode, Shape};

/// Runs the round-based key-chain search from `root`.
pub(crate) fn collect_chain<'a, N: JsonNode, K: AsRef<str>>(
    root: &'a N,
    keys: &[K],
    trace: bool,
) -> Result<Vec<&'a N>, SearchError> {
    let mut queue = Queue::new(trace);
    queue.push(root);

    // Index of the front key of the pending chain
    let mut pending = 0;
    let mut round = 0;

    while let Some(key) = keys.get(pending).map(AsRef::as_ref) {
        let snapshot = queue.len();
        if snapshot == 0 {
            return Err(SearchError::KeyNotFound {
                key: key.to_string(),
                round,
            });
        }

        let mut found = false;
        for _ in 0..snapshot {
            let node = queue.try_pop()?;
            match node.shape() {
                Shape::Array(items) => queue.extend(items),
                Shape::Object(entries) => {
                    for (_, value) in entries.filter(|(name, _)| *name == key) {
                        queue.push(value);
                        found = true;
                    }
                }
                Shape::String | Shape::Number | Shape::Boolean | Shape::Null => {}
            }
        }

        debug!(
            "round {round}: key {key:?} over {snapshot} element(s), found: {found}, queued: {}",
            queue.len()
        );

        if found {
            pending += 1;
        }
        round += 1;
    }

    Ok(queue.into_vec())
}
