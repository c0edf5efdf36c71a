use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub address: String,
}

/// Fixed project catalog. Read-only configuration data.
pub fn project_catalog() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Ev Charging Station".to_string(),
            address: "11, Murugesan Street, Chetpet, Chennai".to_string(),
        },
        Project {
            id: 2,
            name: "Solar Panel Installation".to_string(),
            address: "45, Main Road, Velachery, Chennai".to_string(),
        },
        Project {
            id: 3,
            name: "Wind Turbine Maintenance".to_string(),
            address: "78, Beach Road, Besant Nagar, Chennai".to_string(),
        },
    ]
}

pub fn find_project(id: u32) -> Option<Project> {
    project_catalog().into_iter().find(|p| p.id == id)
}
