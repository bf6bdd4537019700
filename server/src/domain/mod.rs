//! Domain types for the task list.
//!
//! A single entity lives here: [`Task`], together with the validated
//! inputs accepted by the storage layer ([`NewTask`], [`TaskPatch`]).

pub mod task;

pub use task::{NewTask, Task, TaskId, TaskPatch, ValidationError};
