//! Resolution application layer

pub mod resolver;

pub use resolver::DynamicExpressionResolver;
