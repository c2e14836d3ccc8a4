//! Backend worker: owns the tokio runtime and the HTTP client, and turns queued
//! commands into completions for the UI thread.

use std::{sync::Arc, thread};

use client_core::{Completion, CompanyApi, HttpCompanyClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    api_base_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let api: Arc<dyn CompanyApi> = match HttpCompanyClient::new(&api_base_url) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                tracing::error!("failed to build api client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    err.to_string(),
                )));
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::BackendReady { api_base_url });
        serve(api, cmd_rx, ui_tx);
    })
}

/// Processes commands until every sender is dropped. Each command runs as its
/// own task, so responses reach the UI in completion order.
pub fn serve(api: Arc<dyn CompanyApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build backend runtime: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                UiErrorContext::BackendStartup,
                format!("failed to build runtime: {err}"),
            )));
            return;
        }
    };

    runtime.block_on(async move {
        let mut tasks: Vec<tokio::task::JoinHandle<()>> = Vec::new();
        while let Ok(cmd) = cmd_rx.recv() {
            let ui_tx = ui_tx.clone();
            let task = match cmd {
                BackendCommand::Execute { ticket, request } => {
                    let api = Arc::clone(&api);
                    tokio::spawn(async move {
                        let name = request.name();
                        let completion = request.dispatch(api.as_ref()).await;
                        if ui_tx
                            .try_send(UiEvent::Completed { ticket, completion })
                            .is_err()
                        {
                            tracing::warn!(request = name, "ui event queue unavailable");
                        }
                    })
                }
                BackendCommand::ScheduleRedirect {
                    ticket,
                    route,
                    after,
                } => tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let completion = Completion::RedirectDue(route);
                    if ui_tx
                        .try_send(UiEvent::Completed { ticket, completion })
                        .is_err()
                    {
                        tracing::warn!(%route, "ui event queue unavailable");
                    }
                }),
            };
            tasks.retain(|task| !task.is_finished());
            tasks.push(task);
        }

        // Queue closed: let in-flight work report before the runtime drops.
        for task in tasks {
            let _ = task.await;
        }
        tracing::info!("backend worker stopped");
    });
}
