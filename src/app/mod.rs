pub mod codes;
pub mod dedupe;
pub mod pipelines;
