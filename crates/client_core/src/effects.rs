//! Side effects requested by screen reducers and the outcomes fed back to them.

use std::time::Duration;

use shared::{
    domain::{Company, CompanyId, ContactId},
    protocol::CompanyPayload,
};

use crate::{error::ClientError, route::Route, CompanyApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ListCompanies,
    GetCompany(CompanyId),
    CreateCompany(CompanyPayload),
    UpdateCompany {
        id: CompanyId,
        payload: CompanyPayload,
    },
    DeleteCompany(CompanyId),
    DeleteContact(ContactId),
}

impl ApiRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::ListCompanies => "list_companies",
            ApiRequest::GetCompany(_) => "get_company",
            ApiRequest::CreateCompany(_) => "create_company",
            ApiRequest::UpdateCompany { .. } => "update_company",
            ApiRequest::DeleteCompany(_) => "delete_company",
            ApiRequest::DeleteContact(_) => "delete_contact",
        }
    }

    /// Runs the request and packages the result for the screen that asked.
    pub async fn dispatch(self, api: &dyn CompanyApi) -> Completion {
        match self {
            ApiRequest::ListCompanies => Completion::CompaniesLoaded(api.list_companies().await),
            ApiRequest::GetCompany(id) => Completion::CompanyLoaded(api.get_company(id).await),
            ApiRequest::CreateCompany(payload) => {
                Completion::CompanySaved(api.create_company(&payload).await)
            }
            ApiRequest::UpdateCompany { id, payload } => {
                Completion::CompanySaved(api.update_company(id, &payload).await)
            }
            ApiRequest::DeleteCompany(id) => Completion::CompanyDeleted {
                id,
                result: api.delete_company(id).await,
            },
            ApiRequest::DeleteContact(id) => Completion::ContactDeleted {
                id,
                result: api.delete_contact(id).await,
            },
        }
    }
}

#[derive(Debug)]
pub enum Completion {
    CompaniesLoaded(Result<Vec<Company>, ClientError>),
    CompanyLoaded(Result<Company, ClientError>),
    CompanySaved(Result<Option<Company>, ClientError>),
    CompanyDeleted {
        id: CompanyId,
        result: Result<(), ClientError>,
    },
    ContactDeleted {
        id: ContactId,
        result: Result<(), ClientError>,
    },
    RedirectDue(Route),
}

impl Completion {
    pub fn name(&self) -> &'static str {
        match self {
            Completion::CompaniesLoaded(_) => "companies_loaded",
            Completion::CompanyLoaded(_) => "company_loaded",
            Completion::CompanySaved(_) => "company_saved",
            Completion::CompanyDeleted { .. } => "company_deleted",
            Completion::ContactDeleted { .. } => "contact_deleted",
            Completion::RedirectDue(_) => "redirect_due",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
}

/// Transient toast shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Request(ApiRequest),
    Notify(Notice),
    Navigate(Route),
    /// Navigate once `after` has elapsed, unless the screen was left already.
    Redirect {
        to: Route,
        after: Duration,
    },
}
