// Scoring and recommendation pipeline.
// skill_matcher → market → ranker → planner + guidance, all pure functions over the catalog.

pub mod guidance;
pub mod handlers;
pub mod market;
pub mod pipeline;
pub mod planner;
pub mod ranker;
pub mod skill_matcher;

pub use pipeline::{run_analysis, AnalysisReport, AnalysisSettings};
