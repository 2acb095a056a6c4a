//! Write Path and Read Path (§4.4–§4.5): the engine that ties together the
//! Key Schema, Value Codec, and Store Core crates into the public
//! operations a caller drives. Everything here is synchronous — callers
//! share an `Arc<Engine>` across OS threads (§5 "parallel threads").

pub mod aggregate;
pub mod derived;
pub mod engine;
pub mod read;
pub mod search;
pub mod sequence;
pub mod token_metadata;
pub mod write;

pub use engine::Engine;
pub use token_metadata::TokenMetadataFetcher;
pub use write::IngestBlockRequest;
