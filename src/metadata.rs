//! Track metadata: the fixed-schema record and the analyzer-backed extractor.

mod extract;
mod model;

pub use extract::MetadataExtractor;
pub use model::{Field, MetadataRecord};

#[cfg(test)]
pub use extract::parse_analyzer_output;
#[cfg(test)]
pub use model::UNKNOWN;

#[cfg(test)]
mod tests;
