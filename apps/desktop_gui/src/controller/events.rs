//! Backend-to-UI events and error modeling for the desktop controller.

use std::fmt;

use client_core::{Completion, ScreenTicket};

#[derive(Debug)]
pub enum UiEvent {
    BackendReady { api_base_url: String },
    Info(String),
    Error(UiError),
    Completed {
        ticket: ScreenTicket,
        completion: Completion,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

impl UiErrorContext {
    fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend startup",
            UiErrorContext::CommandQueue => "Command queue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// The worker is gone; further commands cannot be served.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.context.label(), self.message)
    }
}
