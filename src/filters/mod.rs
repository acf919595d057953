pub mod apply;

pub use apply::{filter_todos, select_todo};
