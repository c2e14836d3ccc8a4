use shared::domain::CompanyId;
use tracing::{debug, error, warn};

use super::{form::FormEdit, CompanyForm, Phase};
use crate::{
    config::Timing,
    effects::{ApiRequest, Completion, Effect, Notice},
    route::Route,
    validation::{validate_company, FieldErrors},
};

pub const UPDATED_NOTICE: &str = "Company updated successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScreen {
    pub id: CompanyId,
    pub phase: Phase,
    pub form: CompanyForm,
    timing: Timing,
}

#[derive(Debug)]
pub enum EditAction {
    Edit(FormEdit),
    RemoveContact(usize),
    Submit,
    Completed(Completion),
}

impl EditScreen {
    pub fn mount(id: CompanyId, timing: Timing) -> (Self, Vec<Effect>) {
        let screen = Self {
            id,
            phase: Phase::Loading,
            form: CompanyForm::default(),
            timing,
        };
        (screen, vec![Effect::Request(ApiRequest::GetCompany(id))])
    }

    pub fn reduce(mut self, action: EditAction) -> (Self, Vec<Effect>) {
        match action {
            EditAction::Edit(edit) => {
                self.form = self.form.apply(edit);
                (self, Vec::new())
            }
            EditAction::RemoveContact(index) => self.remove_contact(index),
            EditAction::Submit => self.submit(),
            EditAction::Completed(completion) => self.complete(completion),
        }
    }

    fn remove_contact(mut self, index: usize) -> (Self, Vec<Effect>) {
        let Some(persisted_id) = self.form.contacts.get(index).map(|contact| contact.id) else {
            warn!(index, "remove requested for a missing contact row");
            return (self, Vec::new());
        };

        match persisted_id {
            // Persisted rows go away only once the backend confirms.
            Some(contact_id) => (
                self,
                vec![Effect::Request(ApiRequest::DeleteContact(contact_id))],
            ),
            None => {
                self.form = self.form.remove_contact_at(index);
                (self, Vec::new())
            }
        }
    }

    fn submit(mut self) -> (Self, Vec<Effect>) {
        if matches!(self.phase, Phase::Loading | Phase::Redirecting) {
            warn!(company = self.id.0, phase = self.phase.label(), "submit ignored");
            return (self, Vec::new());
        }

        let payload = self.form.payload().without_blank_contacts();
        if let Err(errors) = validate_company(&payload) {
            self.form.errors = errors;
            return (self, Vec::new());
        }

        self.form.errors = FieldErrors::default();
        self.phase = Phase::Submitting;
        let id = self.id;
        (
            self,
            vec![Effect::Request(ApiRequest::UpdateCompany { id, payload })],
        )
    }

    fn complete(mut self, completion: Completion) -> (Self, Vec<Effect>) {
        match completion {
            Completion::CompanyLoaded(Ok(company)) => {
                if company.id != self.id {
                    warn!(
                        expected = self.id.0,
                        received = company.id.0,
                        "backend returned a different company"
                    );
                }
                self.form = CompanyForm::from_company(company);
                self.phase = Phase::Ready;
            }
            Completion::CompanyLoaded(Err(err)) => {
                error!(company = self.id.0, "failed to load company: {err}");
                self.phase = Phase::Ready;
            }
            Completion::ContactDeleted { id, result: Ok(()) } => {
                self.form = self.form.remove_contact_by_id(id);
            }
            Completion::ContactDeleted {
                id,
                result: Err(err),
            } => {
                error!(contact = id.0, "failed to delete contact: {err}");
            }
            Completion::CompanySaved(Ok(_)) => {
                self.phase = Phase::Redirecting;
                let effects = vec![
                    Effect::Notify(Notice::success(
                        UPDATED_NOTICE,
                        self.timing.notice_duration,
                    )),
                    Effect::Redirect {
                        to: Route::List,
                        after: self.timing.redirect_delay,
                    },
                ];
                return (self, effects);
            }
            Completion::CompanySaved(Err(err)) => {
                error!(company = self.id.0, "failed to update company: {err}");
                self.phase = Phase::Ready;
            }
            other => debug!(completion = other.name(), "edit screen ignores completion"),
        }
        (self, Vec::new())
    }
}
