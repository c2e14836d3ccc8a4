//! Controller state: the active screen plus toasts and the status line. Turns
//! UI intents and backend events into backend commands.

use std::time::Instant;

use client_core::{
    navigator::Outbound, screens::ScreenAction, Effect, Navigator, Notice, Route, Timing,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub enum Intent {
    Open(Route),
    Screen(ScreenAction),
}

#[derive(Debug)]
pub struct ControllerState {
    navigator: Navigator,
    toasts: Vec<Toast>,
    status: String,
    backend_failed: bool,
}

impl ControllerState {
    pub fn new(timing: Timing) -> Self {
        Self {
            navigator: Navigator::new(timing),
            toasts: Vec::new(),
            status: "Starting backend worker...".to_string(),
            backend_failed: false,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn backend_failed(&self) -> bool {
        self.backend_failed
    }

    pub fn handle_intent(&mut self, intent: Intent, now: Instant) -> Vec<BackendCommand> {
        let outbound = match intent {
            Intent::Open(route) => self.navigator.open(route),
            Intent::Screen(action) => self.navigator.act(action),
        };
        self.apply(outbound, now)
    }

    pub fn handle_event(&mut self, event: UiEvent, now: Instant) -> Vec<BackendCommand> {
        match event {
            UiEvent::BackendReady { api_base_url } => {
                self.status = format!("Connected to {api_base_url}");
                Vec::new()
            }
            UiEvent::Info(message) => {
                self.status = message;
                Vec::new()
            }
            UiEvent::Error(err) => {
                self.report(err);
                Vec::new()
            }
            UiEvent::Completed { ticket, completion } => {
                let outbound = self.navigator.complete(ticket, completion);
                self.apply(outbound, now)
            }
        }
    }

    pub fn report(&mut self, err: UiError) {
        if err.is_fatal() {
            self.backend_failed = true;
        }
        self.status = err.to_string();
    }

    /// Drops toasts whose display time has run out.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    fn apply(&mut self, outbound: Vec<Outbound>, now: Instant) -> Vec<BackendCommand> {
        let mut commands = Vec::new();
        for Outbound { ticket, effect } in outbound {
            match effect {
                Effect::Request(request) => {
                    commands.push(BackendCommand::Execute { ticket, request })
                }
                Effect::Redirect { to, after } => commands.push(BackendCommand::ScheduleRedirect {
                    ticket,
                    route: to,
                    after,
                }),
                Effect::Notify(notice) => self.toasts.push(Toast {
                    expires_at: now + notice.duration,
                    notice,
                }),
                // The navigator follows immediate navigation itself.
                Effect::Navigate(route) => {
                    tracing::debug!(%route, "navigation already applied")
                }
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use client_core::{
        screens::{CreateAction, FormEdit, ListAction, ScreenState},
        ApiRequest, Completion, ScreenTicket,
    };
    use shared::domain::{Company, CompanyId};

    use super::*;
    use crate::controller::events::UiErrorContext;

    fn timing() -> Timing {
        Timing {
            redirect_delay: Duration::from_millis(1000),
            notice_duration: Duration::from_millis(1500),
        }
    }

    fn completed(ticket: ScreenTicket, completion: Completion) -> UiEvent {
        UiEvent::Completed { ticket, completion }
    }

    #[test]
    fn opening_list_queues_fetch() {
        let mut state = ControllerState::new(timing());
        let commands = state.handle_intent(Intent::Open(Route::List), Instant::now());
        assert_eq!(
            commands,
            vec![BackendCommand::Execute {
                ticket: ScreenTicket(1),
                request: ApiRequest::ListCompanies,
            }]
        );
    }

    #[test]
    fn create_success_shows_toast_and_schedules_redirect() {
        let now = Instant::now();
        let mut state = ControllerState::new(timing());
        state.handle_intent(Intent::Open(Route::Create), now);
        state.handle_intent(
            Intent::Screen(ScreenAction::Create(CreateAction::Edit(FormEdit::SetTitle(
                "Acme".into(),
            )))),
            now,
        );
        let commands = state.handle_intent(
            Intent::Screen(ScreenAction::Create(CreateAction::Submit)),
            now,
        );
        assert!(matches!(
            commands.as_slice(),
            [BackendCommand::Execute {
                request: ApiRequest::CreateCompany(_),
                ..
            }]
        ));

        let ticket = state.navigator().ticket();
        let commands = state.handle_event(completed(ticket, Completion::CompanySaved(Ok(None))), now);
        assert_eq!(
            commands,
            vec![BackendCommand::ScheduleRedirect {
                ticket,
                route: Route::List,
                after: Duration::from_millis(1000),
            }]
        );
        assert_eq!(state.toasts().len(), 1);
        assert_eq!(
            state.toasts()[0].notice.message,
            "Company registered successfully!"
        );

        state.expire_toasts(now + Duration::from_millis(1499));
        assert_eq!(state.toasts().len(), 1);
        state.expire_toasts(now + Duration::from_millis(1500));
        assert!(state.toasts().is_empty());

        let commands = state.handle_event(completed(ticket, Completion::RedirectDue(Route::List)), now);
        assert_eq!(state.navigator().route(), Route::List);
        assert_eq!(
            commands,
            vec![BackendCommand::Execute {
                ticket: state.navigator().ticket(),
                request: ApiRequest::ListCompanies,
            }]
        );
    }

    #[test]
    fn completion_for_abandoned_screen_is_ignored() {
        let now = Instant::now();
        let mut state = ControllerState::new(timing());
        state.handle_intent(Intent::Open(Route::Edit(CompanyId(7))), now);
        let edit_ticket = state.navigator().ticket();
        state.handle_intent(Intent::Open(Route::List), now);

        let commands = state.handle_event(
            completed(
                edit_ticket,
                Completion::CompanyLoaded(Ok(Company {
                    id: CompanyId(7),
                    title: "Acme".into(),
                    contacts: Vec::new(),
                })),
            ),
            now,
        );
        assert!(commands.is_empty());
        assert!(matches!(state.navigator().screen(), ScreenState::List(_)));
    }

    #[test]
    fn list_row_edit_navigates_and_fetches_company() {
        let now = Instant::now();
        let mut state = ControllerState::new(timing());
        state.handle_intent(Intent::Open(Route::List), now);
        let commands = state.handle_intent(
            Intent::Screen(ScreenAction::List(ListAction::Edit(CompanyId(3)))),
            now,
        );
        assert_eq!(state.navigator().route(), Route::Edit(CompanyId(3)));
        assert_eq!(
            commands,
            vec![BackendCommand::Execute {
                ticket: ScreenTicket(2),
                request: ApiRequest::GetCompany(CompanyId(3)),
            }]
        );
    }

    #[test]
    fn startup_failure_marks_backend_failed() {
        let mut state = ControllerState::new(timing());
        state.handle_event(
            UiEvent::Error(UiError::new(
                UiErrorContext::BackendStartup,
                "unsupported scheme 'ftp'",
            )),
            Instant::now(),
        );
        assert!(state.backend_failed());
        assert!(state.status().contains("unsupported scheme"));
    }

    #[test]
    fn worker_lifecycle_updates_status_line() {
        let mut state = ControllerState::new(timing());
        state.handle_event(UiEvent::Info("Backend worker starting...".into()), Instant::now());
        assert_eq!(state.status(), "Backend worker starting...");
        state.handle_event(
            UiEvent::BackendReady {
                api_base_url: "http://localhost:3000".into(),
            },
            Instant::now(),
        );
        assert_eq!(state.status(), "Connected to http://localhost:3000");
        assert!(!state.backend_failed());
    }
}
