//! Per-screen state machines.
//!
//! Every screen is a plain value with a `reduce(self, action) -> (Self,
//! Vec<Effect>)` transition. Hosts execute the effects and hand request
//! outcomes back as `Completed` actions.

pub mod create;
pub mod edit;
pub mod form;
pub mod list;

pub use create::{CreateAction, CreateScreen};
pub use edit::{EditAction, EditScreen};
pub use form::{CompanyForm, FormEdit};
pub use list::{ListAction, ListScreen};

use crate::{config::Timing, effects::Completion, route::Route, Effect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Submitting,
    Redirecting,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Submitting => "submitting",
            Phase::Redirecting => "redirecting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    List(ListScreen),
    Create(CreateScreen),
    Edit(EditScreen),
}

impl Default for ScreenState {
    fn default() -> Self {
        ScreenState::List(ListScreen::default())
    }
}

#[derive(Debug)]
pub enum ScreenAction {
    List(ListAction),
    Create(CreateAction),
    Edit(EditAction),
}

impl ScreenState {
    pub fn mount(route: Route, timing: Timing) -> (Self, Vec<Effect>) {
        match route {
            Route::List => {
                let (screen, effects) = ListScreen::mount();
                (ScreenState::List(screen), effects)
            }
            Route::Create => {
                let (screen, effects) = CreateScreen::mount(timing);
                (ScreenState::Create(screen), effects)
            }
            Route::Edit(id) => {
                let (screen, effects) = EditScreen::mount(id, timing);
                (ScreenState::Edit(screen), effects)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ScreenState::List(_) => Route::List,
            ScreenState::Create(_) => Route::Create,
            ScreenState::Edit(screen) => Route::Edit(screen.id),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            ScreenState::List(screen) => screen.phase,
            ScreenState::Create(screen) => screen.phase,
            ScreenState::Edit(screen) => screen.phase,
        }
    }

    /// Routes an action to the active screen. Actions aimed at another screen
    /// are dropped; the caller gets the state back unchanged.
    pub fn reduce(self, action: ScreenAction) -> (Self, Vec<Effect>) {
        match (self, action) {
            (ScreenState::List(screen), ScreenAction::List(action)) => {
                let (screen, effects) = screen.reduce(action);
                (ScreenState::List(screen), effects)
            }
            (ScreenState::Create(screen), ScreenAction::Create(action)) => {
                let (screen, effects) = screen.reduce(action);
                (ScreenState::Create(screen), effects)
            }
            (ScreenState::Edit(screen), ScreenAction::Edit(action)) => {
                let (screen, effects) = screen.reduce(action);
                (ScreenState::Edit(screen), effects)
            }
            (state, action) => {
                tracing::warn!(
                    route = %state.route(),
                    ?action,
                    "action does not match active screen"
                );
                (state, Vec::new())
            }
        }
    }

    pub fn complete(self, completion: Completion) -> (Self, Vec<Effect>) {
        let action = match &self {
            ScreenState::List(_) => ScreenAction::List(ListAction::Completed(completion)),
            ScreenState::Create(_) => ScreenAction::Create(CreateAction::Completed(completion)),
            ScreenState::Edit(_) => ScreenAction::Edit(EditAction::Completed(completion)),
        };
        self.reduce(action)
    }
}
