pub mod ci;
pub mod log;
pub mod report;

pub use ci::{
    evaluate, group, render_annotations, render_failure, GatePolicy, RefContext, Verdict,
    DEFAULT_ANNOTATIONS_LIMIT,
};
pub use log::{
    file_reader::FileLogReader, Annotation, Classifier, FileRef, Level, LogReader, Message, Report,
    ScopeConfig, Source, Summary,
};
pub use report::render_log;
