//! Credential usage recording

mod recorder;

pub use recorder::UsageRecorder;
