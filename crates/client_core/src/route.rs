use std::fmt;

use shared::domain::CompanyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Create,
    Edit(CompanyId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/register".to_string(),
            Route::Edit(id) => format!("/edit/{}", id.0),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::List),
            ["register"] => Some(Route::Create),
            ["edit", id] => id.parse::<i64>().ok().map(|id| Route::Edit(CompanyId(id))),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
