/*!
# `jsonkeys` Library

Schema-free key search over JSON-shaped trees: every value bound to a key at
any depth ([`find_all`]), or the values reached by an ordered chain of keys
([`find_chain`]).
*/

pub mod input;
pub mod search;
pub mod utils;
pub mod value;

// Re-exports
pub use search::{JsonSearch, KeyChain, SearchError, find_all, find_chain};
pub use value::{JsonNode, Shape, ValueKind, depth};
