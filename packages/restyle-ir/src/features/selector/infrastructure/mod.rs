//! Selector classifier implementation

pub mod classifier;

pub use classifier::SelectorClassifier;
