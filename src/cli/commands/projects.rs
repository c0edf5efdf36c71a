use crate::errors::AppResult;
use crate::models::project::project_catalog;
use crate::utils::table::Table;

/// Handle the `projects` command: print the fixed project catalog.
pub fn handle() -> AppResult<()> {
    let mut table = Table::new(&["ID", "Project", "Address"]);

    for project in project_catalog() {
        table.add_row(vec![project.id.to_string(), project.name, project.address]);
    }

    print!("{}", table.render());
    Ok(())
}
