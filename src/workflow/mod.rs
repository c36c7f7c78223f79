pub mod row_ctx;
pub mod submission_flow;

pub use row_ctx::RowCtx;
pub use submission_flow::{next_state, RowResolution, RowState, SubmissionFlow, SubmissionOutcome};
