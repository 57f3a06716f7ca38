//! TaskFlow features.
//!
//! Each feature is a `State` + `Action` + `Reducer`. The app shell in
//! [`app`] composes them with `scope_reducer`.

pub mod app;
pub mod counter;
pub mod greeting;
pub mod header;
pub mod home;
pub mod todo_item;
pub mod todos;
