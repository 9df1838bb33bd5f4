//! Tabular endpoints around the engine
//!
//! - definition: hierarchy definition rows → `DefinitionRecord`
//! - prices: price rows → chunked `PriceUpdate` stream
//! - sink: echoed updates and valuations → output table

pub mod definition;
pub mod prices;
pub mod sink;

pub use definition::{load_hierarchy, load_hierarchy_from_path, DefinitionReader};
pub use prices::{
    price_chunks, price_chunks_from_path, Chunked, PriceChunks, PriceReader, PriceUpdate,
};
pub use sink::{CsvSink, MemorySink, ValuationSink};
