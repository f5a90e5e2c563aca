//! Membership commands: add, remove

mod add;
mod remove;

pub use add::AddMember;
pub use remove::RemoveMember;
