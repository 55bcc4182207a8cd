mod clock;
mod key_value_store;
mod timesheet_storage;

pub use clock::*;
pub use key_value_store::*;
pub use timesheet_storage::*;
