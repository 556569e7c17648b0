pub mod context;
pub mod gate;
pub mod github;

pub use context::{Commit, RefContext};
pub use gate::{evaluate, GatePolicy, Verdict};
pub use github::{group, render_annotations, render_failure, DEFAULT_ANNOTATIONS_LIMIT};
