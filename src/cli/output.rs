use crate::model::Task;

/// One task as a plain-text row: checkbox, id, name, optional due date.
pub fn format_task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    if task.due_date.is_empty() {
        format!("{} {}  {}", checkbox, task.id, task.name)
    } else {
        format!(
            "{} {}  {}  (due {})",
            checkbox, task.id, task.name, task.due_date
        )
    }
}
