//! Duration recognition: the pattern catalogue and the extraction cascade.

pub mod extractor;
pub mod patterns;

pub use extractor::{DateRange, DateRangeExtractor};
pub use patterns::DurationPatterns;
