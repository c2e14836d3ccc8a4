use shared::domain::{Company, CompanyId};
use tracing::{debug, error, warn};

use super::Phase;
use crate::{
    effects::{ApiRequest, Completion, Effect},
    route::Route,
};

/// Company table with a two-step delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListScreen {
    pub phase: Phase,
    pub companies: Vec<Company>,
    /// Company awaiting delete confirmation, if the dialog is open.
    pub confirm_pending: Option<CompanyId>,
}

#[derive(Debug)]
pub enum ListAction {
    OpenCreate,
    Edit(CompanyId),
    RequestDelete(CompanyId),
    CancelDelete,
    ConfirmDelete,
    Completed(Completion),
}

impl ListScreen {
    pub fn mount() -> (Self, Vec<Effect>) {
        let screen = Self {
            phase: Phase::Loading,
            ..Self::default()
        };
        (screen, vec![Effect::Request(ApiRequest::ListCompanies)])
    }

    pub fn pending_company(&self) -> Option<&Company> {
        let id = self.confirm_pending?;
        self.companies.iter().find(|company| company.id == id)
    }

    pub fn reduce(mut self, action: ListAction) -> (Self, Vec<Effect>) {
        match action {
            ListAction::OpenCreate => (self, vec![Effect::Navigate(Route::Create)]),
            ListAction::Edit(id) => (self, vec![Effect::Navigate(Route::Edit(id))]),
            ListAction::RequestDelete(id) => {
                if self.companies.iter().any(|company| company.id == id) {
                    self.confirm_pending = Some(id);
                } else {
                    warn!(company = id.0, "delete requested for a company not in the list");
                }
                (self, Vec::new())
            }
            ListAction::CancelDelete => {
                self.confirm_pending = None;
                (self, Vec::new())
            }
            ListAction::ConfirmDelete => match self.confirm_pending.take() {
                Some(id) => (self, vec![Effect::Request(ApiRequest::DeleteCompany(id))]),
                None => {
                    warn!("delete confirmed with no pending company");
                    (self, Vec::new())
                }
            },
            ListAction::Completed(completion) => self.complete(completion),
        }
    }

    fn complete(mut self, completion: Completion) -> (Self, Vec<Effect>) {
        match completion {
            Completion::CompaniesLoaded(Ok(companies)) => {
                debug!(count = companies.len(), "companies loaded");
                self.companies = companies;
                self.phase = Phase::Ready;
            }
            Completion::CompaniesLoaded(Err(err)) => {
                error!("failed to load companies: {err}");
                self.phase = Phase::Ready;
            }
            Completion::CompanyDeleted { id, result: Ok(()) } => {
                self.companies.retain(|company| company.id != id);
            }
            Completion::CompanyDeleted {
                id,
                result: Err(err),
            } => {
                error!(company = id.0, "failed to delete company: {err}");
            }
            other => debug!(completion = other.name(), "list screen ignores completion"),
        }
        (self, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Contact;

    use super::*;
    use crate::error::ClientError;

    fn company(id: i64, title: &str) -> Company {
        Company {
            id: CompanyId(id),
            title: title.to_string(),
            contacts: vec![Contact::new("Ann", "Lee")],
        }
    }

    fn loaded(companies: Vec<Company>) -> ListScreen {
        let (screen, _) = ListScreen::mount();
        let (screen, effects) =
            screen.reduce(ListAction::Completed(Completion::CompaniesLoaded(Ok(companies))));
        assert!(effects.is_empty());
        screen
    }

    #[test]
    fn mount_fetches_all_companies() {
        let (screen, effects) = ListScreen::mount();
        assert_eq!(screen.phase, Phase::Loading);
        assert_eq!(effects, vec![Effect::Request(ApiRequest::ListCompanies)]);
    }

    #[test]
    fn load_failure_leaves_an_empty_ready_list() {
        let (screen, _) = ListScreen::mount();
        let (screen, effects) = screen.reduce(ListAction::Completed(
            Completion::CompaniesLoaded(Err(ClientError::Status {
                method: "GET",
                endpoint: "http://api/companies/".into(),
                status: 500,
                body: "boom".into(),
            })),
        ));
        assert!(effects.is_empty());
        assert_eq!(screen.phase, Phase::Ready);
        assert!(screen.companies.is_empty());
    }

    #[test]
    fn delete_requires_confirmation() {
        let screen = loaded(vec![company(1, "Acme"), company(3, "Globex")]);

        let (screen, effects) = screen.reduce(ListAction::RequestDelete(CompanyId(3)));
        assert!(effects.is_empty());
        assert_eq!(screen.confirm_pending, Some(CompanyId(3)));
        assert_eq!(screen.pending_company().map(|c| c.title.as_str()), Some("Globex"));

        let (screen, effects) = screen.reduce(ListAction::ConfirmDelete);
        assert_eq!(
            effects,
            vec![Effect::Request(ApiRequest::DeleteCompany(CompanyId(3)))]
        );
        assert_eq!(screen.confirm_pending, None);
        assert_eq!(screen.companies.len(), 2, "row stays until the server agrees");
    }

    #[test]
    fn cancelled_delete_issues_nothing() {
        let screen = loaded(vec![company(1, "Acme")]);
        let (screen, _) = screen.reduce(ListAction::RequestDelete(CompanyId(1)));
        let (screen, effects) = screen.reduce(ListAction::CancelDelete);
        assert!(effects.is_empty());
        assert_eq!(screen.confirm_pending, None);

        let (_, effects) = screen.reduce(ListAction::ConfirmDelete);
        assert!(effects.is_empty());
    }

    #[test]
    fn successful_delete_removes_only_that_row() {
        let screen = loaded(vec![company(1, "Acme"), company(3, "Globex")]);
        let (screen, _) = screen.reduce(ListAction::Completed(Completion::CompanyDeleted {
            id: CompanyId(3),
            result: Ok(()),
        }));
        let ids: Vec<_> = screen.companies.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CompanyId(1)]);
    }

    #[test]
    fn failed_delete_leaves_list_unchanged() {
        let before = loaded(vec![company(1, "Acme"), company(3, "Globex")]);
        let (after, effects) = before.clone().reduce(ListAction::Completed(
            Completion::CompanyDeleted {
                id: CompanyId(3),
                result: Err(ClientError::Status {
                    method: "DELETE",
                    endpoint: "http://api/companies/3".into(),
                    status: 404,
                    body: "not found".into(),
                }),
            },
        ));
        assert!(effects.is_empty());
        assert_eq!(after, before);
    }

    #[test]
    fn row_actions_navigate() {
        let screen = loaded(vec![company(9, "Initech")]);
        let (screen, effects) = screen.reduce(ListAction::Edit(CompanyId(9)));
        assert_eq!(effects, vec![Effect::Navigate(Route::Edit(CompanyId(9)))]);
        let (_, effects) = screen.reduce(ListAction::OpenCreate);
        assert_eq!(effects, vec![Effect::Navigate(Route::Create)]);
    }

    #[test]
    fn unknown_company_cannot_be_marked_for_delete() {
        let screen = loaded(vec![company(1, "Acme")]);
        let (screen, _) = screen.reduce(ListAction::RequestDelete(CompanyId(42)));
        assert_eq!(screen.confirm_pending, None);
    }
}
