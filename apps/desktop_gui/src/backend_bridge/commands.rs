//! Backend commands queued from UI to backend worker.

use std::time::Duration;

use client_core::{ApiRequest, Route, ScreenTicket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Run one REST call on behalf of the screen holding `ticket`.
    Execute {
        ticket: ScreenTicket,
        request: ApiRequest,
    },
    /// Report `route` as due once `after` has elapsed.
    ScheduleRedirect {
        ticket: ScreenTicket,
        route: Route,
        after: Duration,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute { request, .. } => request.name(),
            BackendCommand::ScheduleRedirect { .. } => "schedule_redirect",
        }
    }
}
