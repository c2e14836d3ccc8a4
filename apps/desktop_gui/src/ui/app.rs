use std::time::{Duration, Instant};

use client_core::{
    screens::{
        CompanyForm, CreateAction, CreateScreen, EditAction, EditScreen, FormEdit, ListAction,
        ListScreen, Phase, ScreenAction, ScreenState,
    },
    validation::ContactField,
    Route, Timing,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{ControllerState, Intent},
};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 90, 90);
const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(46, 125, 70);

pub struct CompaniesApp {
    state: ControllerState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

/// What a form widget asked for during one frame.
enum FormIntent {
    Edit(FormEdit),
    Remove(usize),
    Submit,
    Back,
}

impl CompaniesApp {
    pub fn new(
        timing: Timing,
        start: Route,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let mut app = Self {
            state: ControllerState::new(timing),
            cmd_tx,
            ui_rx,
        };
        app.submit(Intent::Open(start));
        app
    }

    fn submit(&mut self, intent: Intent) {
        let commands = self.state.handle_intent(intent, Instant::now());
        self.queue(commands);
    }

    fn queue(&mut self, commands: Vec<BackendCommand>) {
        for cmd in commands {
            if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.state.report(err);
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let commands = self.state.handle_event(event, Instant::now());
            self.queue(commands);
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Companies");
                ui.separator();
                let route = self.state.navigator().route();
                if ui
                    .selectable_label(route == Route::List, "List")
                    .clicked()
                {
                    intents.push(Intent::Open(Route::List));
                }
                if ui
                    .selectable_label(route == Route::Create, "Register")
                    .clicked()
                {
                    intents.push(Intent::Open(Route::Create));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(route.path());
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let phase = self.state.navigator().screen().phase();
                ui.weak(format!("Screen: {}", phase.label()));
                ui.separator();
                if self.state.backend_failed() {
                    ui.colored_label(ERROR_COLOR, self.state.status());
                } else {
                    ui.label(self.state.status());
                }
            });
        });
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.state.toasts().is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 48.0])
            .show(ctx, |ui| {
                for toast in self.state.toasts() {
                    egui::Frame::popup(ui.style())
                        .fill(SUCCESS_FILL)
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.notice.message)
                                    .color(egui::Color32::WHITE),
                            );
                        });
                }
            });
    }
}

fn show_list(ui: &mut egui::Ui, screen: &ListScreen, intents: &mut Vec<Intent>) {
    let mut act = |action| intents.push(Intent::Screen(ScreenAction::List(action)));

    ui.horizontal(|ui| {
        ui.heading("Registered companies");
        if ui.button("Register company").clicked() {
            act(ListAction::OpenCreate);
        }
    });
    ui.separator();

    if matches!(screen.phase, Phase::Loading) {
        ui.weak("Loading companies...");
        return;
    }
    if screen.companies.is_empty() {
        ui.weak("No companies registered yet.");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("companies_grid")
            .num_columns(4)
            .striped(true)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.strong("#");
                ui.strong("Title");
                ui.strong("Contacts");
                ui.strong("Actions");
                ui.end_row();

                for (company, [id, title, contacts]) in
                    screen.companies.iter().zip(list_rows(screen))
                {
                    ui.label(id);
                    ui.label(title);
                    if contacts.is_empty() {
                        ui.weak("none");
                    } else {
                        ui.label(contacts);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Edit").clicked() {
                            act(ListAction::Edit(company.id));
                        }
                        if ui.button("Delete").clicked() {
                            act(ListAction::RequestDelete(company.id));
                        }
                    });
                    ui.end_row();
                }
            });
    });
}

/// Id, title and comma-joined contact names for each company, in list order.
fn list_rows(screen: &ListScreen) -> Vec<[String; 3]> {
    screen
        .companies
        .iter()
        .map(|company| {
            let names: Vec<String> = company.contacts.iter().map(|c| c.full_name()).collect();
            [company.id.to_string(), company.title.clone(), names.join(", ")]
        })
        .collect()
}

fn show_delete_confirmation(ctx: &egui::Context, screen: &ListScreen, intents: &mut Vec<Intent>) {
    let Some(company) = screen.pending_company() else {
        return;
    };
    egui::Window::new("Delete company?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "\"{}\" and its contacts will be removed permanently.",
                company.title
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    intents.push(Intent::Screen(ScreenAction::List(ListAction::CancelDelete)));
                }
                if ui
                    .button(egui::RichText::new("Delete").color(ERROR_COLOR))
                    .clicked()
                {
                    intents.push(Intent::Screen(ScreenAction::List(ListAction::ConfirmDelete)));
                }
            });
        });
}

/// Renders the title and contact rows. Buffers are cloned so the form state
/// only changes through reducer actions.
fn show_company_form(
    ui: &mut egui::Ui,
    form: &CompanyForm,
    busy: bool,
    submit_label: &str,
) -> Vec<FormIntent> {
    let mut out = Vec::new();

    ui.label("Company title");
    let mut title = form.title.clone();
    let response = ui.add_enabled(
        !busy,
        egui::TextEdit::singleline(&mut title).hint_text("Acme Inc."),
    );
    if response.changed() {
        out.push(FormIntent::Edit(FormEdit::SetTitle(title)));
    }
    if let Some(message) = form.title_error() {
        ui.colored_label(ERROR_COLOR, message);
    }

    ui.add_space(12.0);
    ui.strong("Contacts");
    egui::Grid::new("contacts_grid")
        .num_columns(3)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (index, contact) in form.contacts.iter().enumerate() {
                for (field, value, hint) in [
                    (ContactField::Name, &contact.name, "Name"),
                    (ContactField::LastName, &contact.last_name, "Last name"),
                ] {
                    let mut buffer = value.clone();
                    let response = ui.add_enabled(
                        !busy,
                        egui::TextEdit::singleline(&mut buffer).hint_text(hint),
                    );
                    if response.changed() {
                        out.push(FormIntent::Edit(FormEdit::SetContactField {
                            index,
                            field,
                            value: buffer,
                        }));
                    }
                }
                if ui.add_enabled(!busy, egui::Button::new("Remove")).clicked() {
                    out.push(FormIntent::Remove(index));
                }
                ui.end_row();
            }
        });
    if ui
        .add_enabled(!busy, egui::Button::new("Add contact"))
        .clicked()
    {
        out.push(FormIntent::Edit(FormEdit::AddContact));
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.button("Back").clicked() {
            out.push(FormIntent::Back);
        }
        if ui
            .add_enabled(!busy, egui::Button::new(submit_label))
            .clicked()
        {
            out.push(FormIntent::Submit);
        }
    });
    out
}

fn show_create(ui: &mut egui::Ui, screen: &CreateScreen, intents: &mut Vec<Intent>) {
    ui.heading("Register company");
    ui.separator();
    let busy = matches!(screen.phase, Phase::Redirecting);
    for intent in show_company_form(ui, &screen.form, busy, "Register") {
        intents.push(match intent {
            FormIntent::Edit(edit) => Intent::Screen(ScreenAction::Create(CreateAction::Edit(edit))),
            FormIntent::Remove(index) => {
                Intent::Screen(ScreenAction::Create(CreateAction::RemoveContact(index)))
            }
            FormIntent::Submit => Intent::Screen(ScreenAction::Create(CreateAction::Submit)),
            FormIntent::Back => Intent::Open(Route::List),
        });
    }
}

fn show_edit(ui: &mut egui::Ui, screen: &EditScreen, intents: &mut Vec<Intent>) {
    ui.heading(format!("Edit company #{}", screen.id));
    ui.separator();
    if matches!(screen.phase, Phase::Loading) {
        ui.weak("Loading company...");
        return;
    }
    let busy = matches!(screen.phase, Phase::Redirecting);
    for intent in show_company_form(ui, &screen.form, busy, "Save") {
        intents.push(match intent {
            FormIntent::Edit(edit) => Intent::Screen(ScreenAction::Edit(EditAction::Edit(edit))),
            FormIntent::Remove(index) => {
                Intent::Screen(ScreenAction::Edit(EditAction::RemoveContact(index)))
            }
            FormIntent::Submit => Intent::Screen(ScreenAction::Edit(EditAction::Submit)),
            FormIntent::Back => Intent::Open(Route::List),
        });
    }
}

impl eframe::App for CompaniesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.state.expire_toasts(Instant::now());

        let mut intents = Vec::new();
        self.show_top_bar(ctx, &mut intents);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.state.navigator().screen() {
            ScreenState::List(screen) => {
                show_list(ui, screen, &mut intents);
                show_delete_confirmation(ctx, screen, &mut intents);
            }
            ScreenState::Create(screen) => show_create(ui, screen, &mut intents),
            ScreenState::Edit(screen) => show_edit(ui, screen, &mut intents),
        });
        self.show_toasts(ctx);

        for intent in intents {
            self.submit(intent);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
