// Engine orchestration — fetch pipeline, outcome delivery and session state.

pub mod dispatcher;
pub mod fetcher;
pub mod session;
pub mod stats;
