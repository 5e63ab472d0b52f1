// Resume rewriting: generation service first when requested, deterministic template otherwise.
pub mod handlers;
pub mod prompts;
pub mod rewriter;
