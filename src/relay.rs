//! Teacher relay: student question alerts out, teacher replies back in.

mod alert;
mod notify;
mod reply;

pub use alert::{AlertAddress, AlertCommand, AlertOrigin, Student, TeacherAlert};
pub use notify::NotificationRelay;
pub use reply::{ReplyError, ReplyOutcome, parse_reply, route_reply};
