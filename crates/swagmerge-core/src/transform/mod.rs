pub mod merge_definitions;
pub mod ref_rewriter;
pub mod type_hint;

pub use merge_definitions::{MergeSummary, merge_definitions};
pub use ref_rewriter::{
    RefRewrite, RewriteConvention, apply_rewrites, plan_rewrites, rewrite_refs,
};
pub use type_hint::TypeHint;
