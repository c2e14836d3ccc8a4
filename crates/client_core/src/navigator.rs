//! Active-screen ownership and staleness tracking.
//!
//! Opening a route discards the previous screen and issues a new
//! [`ScreenTicket`]. Every outbound effect carries the ticket of the screen that
//! produced it, and completions are only applied while that ticket is current.

use tracing::debug;

use crate::{
    config::Timing,
    effects::{Completion, Effect},
    route::Route,
    screens::{ScreenAction, ScreenState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ScreenTicket(pub u64);

/// An effect tagged with the ticket of the screen that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub ticket: ScreenTicket,
    pub effect: Effect,
}

#[derive(Debug, Default)]
pub struct Navigator {
    screen: ScreenState,
    ticket: ScreenTicket,
    timing: Timing,
}

impl Navigator {
    pub fn new(timing: Timing) -> Self {
        Self {
            screen: ScreenState::default(),
            ticket: ScreenTicket::default(),
            timing,
        }
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn ticket(&self) -> ScreenTicket {
        self.ticket
    }

    pub fn route(&self) -> Route {
        self.screen.route()
    }

    pub fn open(&mut self, route: Route) -> Vec<Outbound> {
        self.ticket = ScreenTicket(self.ticket.0 + 1);
        debug!(route = %route, ticket = self.ticket.0, "mounting screen");
        let (screen, effects) = ScreenState::mount(route, self.timing);
        self.screen = screen;
        self.settle(effects)
    }

    pub fn act(&mut self, action: ScreenAction) -> Vec<Outbound> {
        let screen = std::mem::take(&mut self.screen);
        let (screen, effects) = screen.reduce(action);
        self.screen = screen;
        self.settle(effects)
    }

    pub fn complete(&mut self, ticket: ScreenTicket, completion: Completion) -> Vec<Outbound> {
        if ticket != self.ticket {
            debug!(
                completion = completion.name(),
                ticket = ticket.0,
                current = self.ticket.0,
                "dropping completion for a screen that is gone"
            );
            return Vec::new();
        }

        if let Completion::RedirectDue(route) = completion {
            return self.open(route);
        }

        let screen = std::mem::take(&mut self.screen);
        let (screen, effects) = screen.complete(completion);
        self.screen = screen;
        self.settle(effects)
    }

    /// Tags effects with the current ticket and follows immediate navigation.
    fn settle(&mut self, effects: Vec<Effect>) -> Vec<Outbound> {
        let ticket = self.ticket;
        let mut out = Vec::with_capacity(effects.len());
        let mut navigate_to = None;
        for effect in effects {
            match effect {
                Effect::Navigate(route) => navigate_to = Some(route),
                effect => out.push(Outbound { ticket, effect }),
            }
        }
        if let Some(route) = navigate_to {
            out.extend(self.open(route));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use shared::domain::{Company, CompanyId};

    use super::*;
    use crate::{
        effects::ApiRequest,
        screens::{CreateAction, FormEdit, ListAction, Phase},
    };

    fn company(id: i64) -> Company {
        Company {
            id: CompanyId(id),
            title: format!("Company {id}"),
            contacts: Vec::new(),
        }
    }

    fn effects(outbound: Vec<Outbound>) -> Vec<Effect> {
        outbound.into_iter().map(|o| o.effect).collect()
    }

    #[test]
    fn open_mounts_screen_with_fresh_ticket() {
        let mut nav = Navigator::new(Timing::default());
        let out = nav.open(Route::List);
        assert_eq!(nav.ticket(), ScreenTicket(1));
        assert_eq!(
            out,
            vec![Outbound {
                ticket: ScreenTicket(1),
                effect: Effect::Request(ApiRequest::ListCompanies),
            }]
        );
        assert_eq!(nav.screen().phase(), Phase::Loading);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut nav = Navigator::new(Timing::default());
        nav.open(Route::List);
        let list_ticket = nav.ticket();
        nav.open(Route::Create);

        let out = nav.complete(
            list_ticket,
            Completion::CompaniesLoaded(Ok(vec![company(1)])),
        );
        assert!(out.is_empty());
        assert_eq!(nav.route(), Route::Create);
    }

    #[test]
    fn navigate_effect_opens_target_screen() {
        let mut nav = Navigator::new(Timing::default());
        nav.open(Route::List);
        let ticket = nav.ticket();
        nav.complete(ticket, Completion::CompaniesLoaded(Ok(vec![company(4)])));

        let out = nav.act(ScreenAction::List(ListAction::Edit(CompanyId(4))));
        assert_eq!(nav.route(), Route::Edit(CompanyId(4)));
        assert_eq!(
            out,
            vec![Outbound {
                ticket: nav.ticket(),
                effect: Effect::Request(ApiRequest::GetCompany(CompanyId(4))),
            }]
        );
    }

    #[test]
    fn redirect_applies_only_for_current_ticket() {
        let timing = Timing {
            redirect_delay: Duration::from_millis(5),
            notice_duration: Duration::from_millis(5),
        };
        let mut nav = Navigator::new(timing);
        nav.open(Route::Create);
        nav.act(ScreenAction::Create(CreateAction::Edit(FormEdit::SetTitle(
            "Acme".into(),
        ))));
        nav.act(ScreenAction::Create(CreateAction::Submit));
        let ticket = nav.ticket();
        let out = nav.complete(ticket, Completion::CompanySaved(Ok(None)));
        assert!(effects(out).contains(&Effect::Redirect {
            to: Route::List,
            after: Duration::from_millis(5),
        }));

        // User navigates away manually before the redirect fires.
        nav.open(Route::Edit(CompanyId(2)));
        let out = nav.complete(ticket, Completion::RedirectDue(Route::List));
        assert!(out.is_empty());
        assert_eq!(nav.route(), Route::Edit(CompanyId(2)));
    }

    #[test]
    fn due_redirect_mounts_list() {
        let mut nav = Navigator::new(Timing::default());
        nav.open(Route::Create);
        let ticket = nav.ticket();
        let out = nav.complete(ticket, Completion::RedirectDue(Route::List));
        assert_eq!(nav.route(), Route::List);
        assert_eq!(effects(out), vec![Effect::Request(ApiRequest::ListCompanies)]);
    }

    #[test]
    fn mismatched_action_keeps_screen() {
        let mut nav = Navigator::new(Timing::default());
        nav.open(Route::Create);
        let out = nav.act(ScreenAction::List(ListAction::ConfirmDelete));
        assert!(out.is_empty());
        assert_eq!(nav.route(), Route::Create);
    }
}
