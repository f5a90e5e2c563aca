//! Activity: recording and reading board history

mod list;
mod recorder;

pub use list::ListActivity;
pub use recorder::ActivityRecorder;
