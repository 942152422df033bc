//! Expression Builder application layer

pub mod expression_usecase;

pub use expression_usecase::{ExpressionBuilderUseCase, ExpressionBuilderUseCaseImpl};
