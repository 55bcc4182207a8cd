mod session_coordinator;
mod snapshot_store;
mod submission_gateway;

pub use session_coordinator::{
    ListenerHandle, SessionCoordinator, SessionListener, DEFAULT_TICK_INTERVAL,
};
pub use snapshot_store::{
    SessionSnapshotStore, ELAPSED_TIME_KEY, IS_TRACKING_KEY, TIME_IN_KEY, WORK_DATE_KEY,
};
pub use submission_gateway::SubmissionGateway;
