pub mod scanner;
pub mod tokenize;
pub mod types;

pub use scanner::LineScanner;
pub use tokenize::classify;
pub use types::{AliasRule, LineKind};
