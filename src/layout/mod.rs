//! Layout-driven structure inference: header signatures, section
//! segmentation, and job-entry segmentation.

pub mod jobs;
pub mod sections;
pub mod signature;

pub use jobs::segment_jobs;
pub use sections::{segment, UNLABELED_SECTION};
pub use signature::{infer_signature, VisualSignature};
