//! Searching a document for a key at any depth, and for a chain of keys.
use jsonkeys::{JsonSearch, KeyChain, SearchError};
use serde_json::json;

fn main() -> Result<(), SearchError> {
    let doc = json!({
        "store": {
            "books": [
                {"title": "Dune", "price": 9},
                {"title": "Emma", "price": 7}
            ],
            "bicycle": {"price": 120}
        }
    });
    let search = JsonSearch::new();

    // Every "price", wherever it occurs. Books are expanded before the
    // bicycle, and the last book is found first.
    let prices = search.find_all(&doc, "price");
    assert_eq!(prices, vec![&json!(7), &json!(9), &json!(120)]);

    // Only the prices reached through store -> books -> price.
    let chain: KeyChain = "store.books.price".parse()?;
    let book_prices = search.find_chain(&doc, chain.keys())?;
    assert_eq!(book_prices, vec![&json!(9), &json!(7)]);

    // A key that is never reached ends the search with an error.
    let missing = search.find_chain(&doc, &["store", "magazines"]);
    assert!(matches!(missing, Err(SearchError::KeyNotFound { .. })));

    Ok(())
}
