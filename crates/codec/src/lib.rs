//! Value Codec (Component B, §4.2): turns domain records into the bytes the
//! store persists and back. Blocks, transactions, and receipts use
//! canonical-compatible RLP; everything else uses self-described JSON;
//! counters, presence markers, and signed balance deltas use small raw
//! scalar formats. Primary entities are never optional at this layer —
//! encoding an absent primary entity is a caller error the write path
//! (`chainidx-engine`) must reject before it reaches the codec.

pub mod json;
pub mod rlp;
pub mod scalar;

pub use rlp::{decode_block, decode_receipt, decode_transaction, encode_block, encode_receipt, encode_transaction};
pub use scalar::{decode_marker, decode_signed_u256, decode_u64, encode_marker, encode_signed_u256, encode_u64};
