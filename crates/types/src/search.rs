use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SearchResultType {
    Block,
    Transaction,
    Address,
    ContractAddress,
}

pub type SearchTypeFilter = HashSet<SearchResultType>;

/// One hit from `Search` (§4.5.3). `value` is a JSON-encoded payload of the
/// resolved entity, kept generic so block/tx/address results share one
/// result type without a trait object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub result_type: SearchResultType,
    pub value: serde_json::Value,
    pub label: String,
    pub metadata: serde_json::Value,
}
