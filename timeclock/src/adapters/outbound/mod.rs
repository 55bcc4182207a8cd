mod file_store;
mod memory_store;
#[cfg(test)]
mod mock_timesheets;
mod timesheet_api;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
#[cfg(test)]
pub use mock_timesheets::MockTimesheetStorage;
pub use timesheet_api::TimesheetApiAdapter;
