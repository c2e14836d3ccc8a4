use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use client_core::{validation::validate_company, CompanyApi};
use shared::{
    domain::{Company, CompanyId, Contact, ContactId},
    protocol::CompanyPayload,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every company with its contacts.
    List,
    /// Print one company as JSON.
    Show { id: i64 },
    /// Register a new company.
    Create {
        #[arg(long)]
        title: String,
        /// Contact as NAME:LAST; repeatable.
        #[arg(long = "contact", value_parser = parse_contact)]
        contacts: Vec<Contact>,
    },
    /// Update a company. Blank contacts are dropped before saving.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        /// Existing contact as ID=NAME:LAST; repeatable.
        #[arg(long = "contact", value_parser = parse_contact_update)]
        updates: Vec<Contact>,
        /// New contact as NAME:LAST; repeatable.
        #[arg(long = "add-contact", value_parser = parse_contact)]
        additions: Vec<Contact>,
        /// Contact id to delete before saving; repeatable.
        #[arg(long = "remove-contact")]
        removals: Vec<i64>,
    },
    /// Delete a company after confirmation.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Delete a single contact.
    DeleteContact { id: i64 },
}

pub fn parse_contact(raw: &str) -> std::result::Result<Contact, String> {
    let (name, last_name) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:LAST, got '{raw}'"))?;
    Ok(Contact::new(name, last_name))
}

pub fn parse_contact_update(raw: &str) -> std::result::Result<Contact, String> {
    let (id, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=NAME:LAST, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid contact id '{id}': {err}"))?;
    Ok(parse_contact(rest)?.with_id(ContactId(id)))
}

pub async fn run(
    api: &dyn CompanyApi,
    command: Command,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    match command {
        Command::List => {
            let companies = api.list_companies().await?;
            if companies.is_empty() {
                writeln!(out, "no companies registered")?;
            }
            for company in &companies {
                write_company_line(out, company)?;
            }
        }
        Command::Show { id } => {
            let company = api.get_company(CompanyId(id)).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&company)?)?;
        }
        Command::Create { title, contacts } => {
            let payload = CompanyPayload::new(title, &contacts);
            check(&payload)?;
            let created = api.create_company(&payload).await?;
            match created {
                Some(company) => writeln!(out, "registered company {}", company.id)?,
                None => writeln!(out, "registered company '{}'", payload.title)?,
            }
        }
        Command::Edit {
            id,
            title,
            updates,
            additions,
            removals,
        } => {
            let id = CompanyId(id);
            let mut company = api.get_company(id).await?;
            let removals: Vec<ContactId> = removals.into_iter().map(ContactId).collect();
            company
                .contacts
                .retain(|c| !c.id.is_some_and(|cid| removals.contains(&cid)));
            let company = apply_edits(company, title, updates, additions)?;
            let payload = CompanyPayload::new(company.title.as_str(), &company.contacts)
                .without_blank_contacts();
            // Nothing is sent until the whole edit is known to be valid.
            check(&payload)?;
            for contact_id in removals {
                api.delete_contact(contact_id)
                    .await
                    .with_context(|| format!("removing contact {contact_id}"))?;
            }
            api.update_company(id, &payload).await?;
            writeln!(
                out,
                "updated company {id} ({} contacts)",
                payload.contacts.len()
            )?;
        }
        Command::Delete { id, yes } => {
            let id = CompanyId(id);
            if !yes && !confirm_delete(api, id, out, input).await? {
                writeln!(out, "cancelled")?;
                return Ok(());
            }
            api.delete_company(id).await?;
            writeln!(out, "deleted company {id}")?;
        }
        Command::DeleteContact { id } => {
            api.delete_contact(ContactId(id)).await?;
            writeln!(out, "deleted contact {id}")?;
        }
    }
    Ok(())
}

fn write_company_line(out: &mut impl Write, company: &Company) -> std::io::Result<()> {
    let names: Vec<String> = company
        .contacts
        .iter()
        .filter(|c| !c.is_blank())
        .map(Contact::full_name)
        .collect();
    writeln!(
        out,
        "{:>5}  {}  [{}]",
        company.id.0,
        company.title,
        names.join(", ")
    )
}

fn apply_edits(
    mut company: Company,
    title: Option<String>,
    updates: Vec<Contact>,
    additions: Vec<Contact>,
) -> Result<Company> {
    if let Some(title) = title {
        company.title = title;
    }
    for update in updates {
        let Some(slot) = company.contacts.iter_mut().find(|c| c.id == update.id) else {
            bail!(
                "company {} has no contact {}",
                company.id,
                update.id.map(|id| id.0).unwrap_or_default()
            );
        };
        *slot = update;
    }
    company.contacts.extend(additions);
    Ok(company)
}

fn check(payload: &CompanyPayload) -> Result<()> {
    if let Err(errors) = validate_company(payload) {
        let details: Vec<String> = errors
            .iter()
            .map(|(path, message)| format!("{path}: {message}"))
            .collect();
        bail!("validation failed: {}", details.join("; "));
    }
    Ok(())
}

async fn confirm_delete(
    api: &dyn CompanyApi,
    id: CompanyId,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<bool> {
    let company = api.get_company(id).await?;
    write!(
        out,
        "Delete '{}' and its {} contacts? [y/N] ",
        company.title,
        company.contacts.len()
    )?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use client_core::{ClientError, ClientResult};

    use super::*;

    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<String>>,
        updated: Mutex<Option<CompanyPayload>>,
    }

    impl RecordingApi {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls").clone()
        }
    }

    fn acme() -> Company {
        Company {
            id: CompanyId(7),
            title: "Acme".into(),
            contacts: vec![
                Contact::new("A", "B").with_id(ContactId(1)),
                Contact::new("", "").with_id(ContactId(2)),
            ],
        }
    }

    #[async_trait]
    impl CompanyApi for RecordingApi {
        async fn list_companies(&self) -> ClientResult<Vec<Company>> {
            self.calls.lock().expect("calls").push("list".into());
            Ok(vec![acme()])
        }

        async fn get_company(&self, id: CompanyId) -> ClientResult<Company> {
            self.calls.lock().expect("calls").push(format!("get {id}"));
            Ok(acme())
        }

        async fn create_company(&self, payload: &CompanyPayload) -> ClientResult<Option<Company>> {
            self.calls
                .lock()
                .expect("calls")
                .push(format!("create {}", payload.title));
            Ok(None)
        }

        async fn update_company(
            &self,
            id: CompanyId,
            payload: &CompanyPayload,
        ) -> ClientResult<Option<Company>> {
            self.calls.lock().expect("calls").push(format!("update {id}"));
            *self.updated.lock().expect("updated") = Some(payload.clone());
            Ok(None)
        }

        async fn delete_company(&self, id: CompanyId) -> ClientResult<()> {
            self.calls.lock().expect("calls").push(format!("delete {id}"));
            if id == CompanyId(3) {
                return Err(ClientError::Status {
                    method: "DELETE",
                    endpoint: "/companies/3".into(),
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(())
        }

        async fn delete_contact(&self, id: ContactId) -> ClientResult<()> {
            self.calls
                .lock()
                .expect("calls")
                .push(format!("delete contact {id}"));
            Ok(())
        }
    }

    async fn run_with(api: &RecordingApi, command: Command, input: &str) -> Result<String> {
        let mut out = Vec::new();
        let mut input = input.as_bytes();
        run(api, command, &mut out, &mut input).await?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn parses_contact_arguments() {
        assert_eq!(parse_contact("Ann:Lee"), Ok(Contact::new("Ann", "Lee")));
        assert_eq!(parse_contact(":Lee"), Ok(Contact::new("", "Lee")));
        assert!(parse_contact("Ann").is_err());
        assert_eq!(
            parse_contact_update("4=Ann:Lee"),
            Ok(Contact::new("Ann", "Lee").with_id(ContactId(4)))
        );
        assert!(parse_contact_update("x=Ann:Lee").is_err());
    }

    #[tokio::test]
    async fn create_rejects_blank_title_without_calling_api() {
        let api = RecordingApi::default();
        let err = run_with(
            &api,
            Command::Create {
                title: "   ".into(),
                contacts: Vec::new(),
            },
            "",
        )
        .await
        .expect_err("blank title");
        assert!(err.to_string().contains("title: Company title is required."));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn edit_drops_blank_contacts_and_applies_changes() {
        let api = RecordingApi::default();
        let output = run_with(
            &api,
            Command::Edit {
                id: 7,
                title: Some("Acme 2".into()),
                updates: vec![Contact::new("Ann", "Lee").with_id(ContactId(1))],
                additions: vec![Contact::new("Bob", "Ray")],
                removals: Vec::new(),
            },
            "",
        )
        .await
        .expect("edit");

        assert_eq!(output, "updated company 7 (2 contacts)\n");
        let payload = api.updated.lock().expect("updated").clone().expect("payload");
        assert_eq!(
            payload,
            CompanyPayload::new(
                "Acme 2",
                &[
                    Contact::new("Ann", "Lee").with_id(ContactId(1)),
                    Contact::new("Bob", "Ray"),
                ]
            )
        );
    }

    #[tokio::test]
    async fn edit_removes_contacts_through_contact_endpoint() {
        let api = RecordingApi::default();
        run_with(
            &api,
            Command::Edit {
                id: 7,
                title: None,
                updates: Vec::new(),
                additions: Vec::new(),
                removals: vec![1],
            },
            "",
        )
        .await
        .expect("edit");
        assert_eq!(
            api.calls(),
            vec!["get 7", "delete contact 1", "update 7"]
        );
        let payload = api.updated.lock().expect("updated").clone().expect("payload");
        assert!(payload.contacts.is_empty());
    }

    #[tokio::test]
    async fn rejected_edit_keeps_contacts_on_server() {
        let api = RecordingApi::default();
        let err = run_with(
            &api,
            Command::Edit {
                id: 7,
                title: Some("   ".into()),
                updates: Vec::new(),
                additions: Vec::new(),
                removals: vec![1],
            },
            "",
        )
        .await
        .expect_err("blank title");
        assert!(err.to_string().contains("Company title is required."));
        assert_eq!(api.calls(), vec!["get 7"]);
    }

    #[tokio::test]
    async fn edit_of_unknown_contact_fails_before_saving() {
        let api = RecordingApi::default();
        let err = run_with(
            &api,
            Command::Edit {
                id: 7,
                title: None,
                updates: vec![Contact::new("X", "Y").with_id(ContactId(99))],
                additions: Vec::new(),
                removals: vec![1],
            },
            "",
        )
        .await
        .expect_err("unknown contact");
        assert!(err.to_string().contains("no contact 99"));
        assert_eq!(api.calls(), vec!["get 7"]);
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let api = RecordingApi::default();
        let output = run_with(&api, Command::Delete { id: 7, yes: false }, "n\n")
            .await
            .expect("declined");
        assert!(output.ends_with("cancelled\n"));
        assert_eq!(api.calls(), vec!["get 7"]);

        let output = run_with(&api, Command::Delete { id: 7, yes: false }, "y\n")
            .await
            .expect("confirmed");
        assert!(output.contains("Delete 'Acme' and its 2 contacts?"));
        assert!(output.ends_with("deleted company 7\n"));
    }

    #[tokio::test]
    async fn failed_delete_is_reported() {
        let api = RecordingApi::default();
        let err = run_with(&api, Command::Delete { id: 3, yes: true }, "")
            .await
            .expect_err("server error");
        assert!(err.to_string().contains("returned 500: boom"));
    }

    #[tokio::test]
    async fn list_prints_one_line_per_company() {
        let api = RecordingApi::default();
        let output = run_with(&api, Command::List, "").await.expect("list");
        assert_eq!(output, "    7  Acme  [A B]\n");
    }
}
