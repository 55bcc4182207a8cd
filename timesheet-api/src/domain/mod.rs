mod category;
mod shift;
mod timesheet;
mod user;

pub use category::*;
pub use shift::*;
pub use timesheet::*;
pub use user::*;
