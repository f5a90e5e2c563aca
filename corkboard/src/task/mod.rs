//! Task commands: create, get, update, move, delete, assign, unassign

mod assign;
mod create;
mod delete;
mod get;
mod mv;
mod unassign;
mod update;

pub use assign::AssignTask;
pub use create::CreateTask;
pub use delete::DeleteTask;
pub use get::GetTask;
pub use mv::MoveTask;
pub use unassign::UnassignTask;
pub use update::UpdateTask;
