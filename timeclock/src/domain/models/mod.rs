mod hours;
mod ids;
mod session;
mod submission;
mod timesheet;

pub use hours::*;
pub use ids::*;
pub use session::*;
pub use submission::*;
pub use timesheet::*;
