use crate::errors::AppResult;
use crate::models::task::task_catalog;
use crate::utils::colors::RESET;
use crate::utils::formatting::describe_category;
use crate::utils::table::Table;

/// Handle the `tasks` command: print the fixed task catalog.
pub fn handle() -> AppResult<()> {
    let mut table = Table::new(&["ID", "Task", "Category"]);

    for task in task_catalog() {
        let (label, color) = describe_category(task.category.code());
        table.add_row(vec![
            task.id.to_string(),
            task.name,
            format!("{}{} ({}){}", color, task.category.code(), label, RESET),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
