use crate::models::TodoItem;

/// Keep the items whose to-do text contains `query`
///
/// Matching is a case-sensitive literal substring test against the to-do text
/// (checkbox prefix removed, no colors, no source tag). Order is preserved.
pub fn filter_todos(todos: Vec<TodoItem>, query: &str) -> Vec<TodoItem> {
    if query.is_empty() {
        return todos;
    }

    todos.into_iter().filter(|todo| todo.todo().contains(query)).collect()
}

/// First item, in list order, whose short id starts with `prefix`
///
/// Short ids are not unique. Passing the full sorted list means collisions
/// resolve to the higher-priority, more recent item.
pub fn select_todo<'a>(todos: &'a [TodoItem], prefix: &str) -> Option<&'a TodoItem> {
    todos.iter().find(|todo| todo.id.starts_with(prefix))
}
