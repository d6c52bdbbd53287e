//! Task domain: the record model, the store that owns the collection, and
//! the derived views over it.
//!
//! - [`TaskStore`]: canonical collection with create/toggle/delete/update
//! - [`TaskProvider`] / [`TaskHandle`]: scoped access for the UI layers
//! - [`TaskView`]: agenda, overdue, all-tasks and timeline derivations

mod codec;
mod context;
mod model;
mod seed;
mod store;
pub mod timestamp;
mod view;

pub use codec::{decode, encode};
pub use context::{TaskHandle, TaskProvider};
pub use model::{NewTask, Priority, Status, Task, TaskPatch};
pub use seed::seed_tasks;
pub use store::{SubscriptionId, TaskStore, STORAGE_KEY};
pub use view::{Dashboard, TaskStats, TaskView, ViewCounts};
