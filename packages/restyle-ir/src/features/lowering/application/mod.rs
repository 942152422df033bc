//! Lowering application layer

mod declaration;
pub mod engine;
pub mod lowering_usecase;
mod overrides;
mod variants;

pub use declaration::{ComposedStyle, HelperIndex};
pub use engine::RuleLoweringEngine;
pub use lowering_usecase::LoweringUseCase;
