use tracing::{debug, error, info, warn};

use super::{form::FormEdit, CompanyForm, Phase};
use crate::{
    config::Timing,
    effects::{ApiRequest, Completion, Effect, Notice},
    route::Route,
    validation::{validate_company, FieldErrors},
};

pub const CREATED_NOTICE: &str = "Company registered successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateScreen {
    pub phase: Phase,
    pub form: CompanyForm,
    timing: Timing,
}

#[derive(Debug)]
pub enum CreateAction {
    Edit(FormEdit),
    RemoveContact(usize),
    Submit,
    Completed(Completion),
}

impl CreateScreen {
    pub fn mount(timing: Timing) -> (Self, Vec<Effect>) {
        let screen = Self {
            phase: Phase::Ready,
            form: CompanyForm::seeded(),
            timing,
        };
        (screen, Vec::new())
    }

    pub fn reduce(mut self, action: CreateAction) -> (Self, Vec<Effect>) {
        match action {
            CreateAction::Edit(edit) => {
                self.form = self.form.apply(edit);
                (self, Vec::new())
            }
            // Create rows are never persisted yet, so removal is always local.
            CreateAction::RemoveContact(index) => {
                self.form = self.form.remove_contact_at(index);
                (self, Vec::new())
            }
            CreateAction::Submit => self.submit(),
            CreateAction::Completed(completion) => self.complete(completion),
        }
    }

    fn submit(mut self) -> (Self, Vec<Effect>) {
        if self.phase == Phase::Redirecting {
            warn!("submit ignored while redirecting");
            return (self, Vec::new());
        }

        let payload = self.form.payload();
        if let Err(errors) = validate_company(&payload) {
            self.form.errors = errors;
            return (self, Vec::new());
        }

        self.form.errors = FieldErrors::default();
        self.phase = Phase::Submitting;
        (
            self,
            vec![Effect::Request(ApiRequest::CreateCompany(payload))],
        )
    }

    fn complete(mut self, completion: Completion) -> (Self, Vec<Effect>) {
        match completion {
            Completion::CompanySaved(Ok(created)) => {
                info!(id = created.map(|c| c.id.0), "company registered");
                self.form = CompanyForm::seeded();
                self.phase = Phase::Redirecting;
                let effects = vec![
                    Effect::Notify(Notice::success(
                        CREATED_NOTICE,
                        self.timing.notice_duration,
                    )),
                    Effect::Redirect {
                        to: Route::List,
                        after: self.timing.redirect_delay,
                    },
                ];
                (self, effects)
            }
            Completion::CompanySaved(Err(err)) => {
                error!("failed to create company: {err}");
                self.phase = Phase::Ready;
                (self, Vec::new())
            }
            other => {
                debug!(completion = other.name(), "create screen ignores completion");
                (self, Vec::new())
            }
        }
    }
}
