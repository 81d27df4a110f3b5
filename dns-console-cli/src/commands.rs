//! Subcommand handlers.
//!
//! Each handler drives the core services the same way a page would: record
//! commands activate a [`RecordWorkflow`] for the domain, act through its
//! intents, then tear it down.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use dns_console_api::HttpApiClient;
use dns_console_core::ServiceContext;
use dns_console_core::services::{DomainService, DomainSession, RecordWorkflow};
use dns_console_core::types::{Domain, Record, RecordDraft, User};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::{Command, DomainsCommand, RecordFields, RecordsCommand};
use crate::config::CliConfig;
use crate::console::{ConsoleNotifier, ConsoleSessionListener};

/// Wired services for one CLI invocation.
pub struct App {
    ctx: Arc<ServiceContext>,
    notifier: Arc<ConsoleNotifier>,
}

impl App {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let client = Arc::new(
            HttpApiClient::new(config.api.clone()).context("failed to set up API client")?,
        );
        let notifier = Arc::new(ConsoleNotifier::default());
        let listener = Arc::new(ConsoleSessionListener::new(client.base_url()));

        let ctx = Arc::new(ServiceContext::new(
            client.clone(),
            client.clone(),
            client,
            notifier.clone(),
            listener,
        ));
        Ok(Self { ctx, notifier })
    }

    pub fn notifier(&self) -> &ConsoleNotifier {
        &self.notifier
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Whoami => self.whoami().await,
            Command::Domains(DomainsCommand::List) => self.list_domains().await,
            Command::Domains(DomainsCommand::Create { name }) => self.create_domain(&name).await,
            Command::Records(cmd) => self.records(cmd).await,
        }
    }

    async fn whoami(&self) -> Result<()> {
        let user = DomainSession::new(Arc::clone(&self.ctx))
            .resolve_user(None)
            .await?;
        println!("{}", format_user(&user));
        Ok(())
    }

    async fn list_domains(&self) -> Result<()> {
        let domains = DomainService::new(Arc::clone(&self.ctx))
            .list_domains()
            .await?;
        if domains.is_empty() {
            println!("No domains yet. Add one with `dns-console domains create <name>`.");
        }
        for domain in &domains {
            println!("{}", format_domain(domain));
        }
        Ok(())
    }

    async fn create_domain(&self, name: &str) -> Result<()> {
        let domain = DomainService::new(Arc::clone(&self.ctx))
            .create_domain(name)
            .await?;
        println!("{}", format_domain(&domain));
        Ok(())
    }

    async fn records(&self, command: RecordsCommand) -> Result<()> {
        let domain_id = match &command {
            RecordsCommand::List { domain, .. }
            | RecordsCommand::Add { domain, .. }
            | RecordsCommand::Edit { domain, .. }
            | RecordsCommand::Delete { domain, .. } => domain.clone(),
        };
        let workflow = RecordWorkflow::new(Arc::clone(&self.ctx), domain_id);
        workflow.activate(None).await?;

        let result = match command {
            RecordsCommand::List { query, .. } => list_records(&workflow, query.as_deref()).await,
            RecordsCommand::Add { fields, .. } => add_record(&workflow, fields).await,
            RecordsCommand::Edit { record, fields, .. } => {
                edit_record(&workflow, &record, fields).await
            }
            RecordsCommand::Delete { record, yes, .. } => {
                delete_record(&workflow, &record, yes).await
            }
        };
        workflow.deactivate();
        result
    }
}

async fn list_records(workflow: &RecordWorkflow, query: Option<&str>) -> Result<()> {
    if let Some(query) = query {
        workflow.set_query(query).await;
    }
    let shown = workflow.filtered_view().await;
    let total = workflow.records().await.len();

    if let Some(page) = workflow.page().await {
        if shown.len() == total {
            println!("{}: {total} records", page.domain.name);
        } else {
            println!("{}: {} of {total} records", page.domain.name, shown.len());
        }
    }
    for record in &shown {
        println!("{}", format_record(record));
    }
    Ok(())
}

async fn add_record(workflow: &RecordWorkflow, fields: RecordFields) -> Result<()> {
    workflow.open_add().await?;
    workflow.update_draft(|draft| apply_fields(draft, fields)).await?;
    let record = workflow.submit().await?;
    println!("{}", format_record(&record));
    Ok(())
}

async fn edit_record(workflow: &RecordWorkflow, record_id: &str, fields: RecordFields) -> Result<()> {
    if fields.is_empty() {
        bail!("nothing to change; pass at least one of --type, --name, --value, --ttl, --priority");
    }
    let existing = find_record(workflow, record_id).await?;
    workflow.open_edit(&existing).await?;
    workflow.update_draft(|draft| apply_fields(draft, fields)).await?;
    let record = workflow.submit().await?;
    println!("{}", format_record(&record));
    Ok(())
}

async fn delete_record(workflow: &RecordWorkflow, record_id: &str, yes: bool) -> Result<()> {
    let record = find_record(workflow, record_id).await?;
    workflow.request_delete(&record).await?;

    if !yes && !confirm(&format!("Delete {}?", format_record(&record))).await? {
        workflow.cancel_delete().await;
        println!("Cancelled.");
        return Ok(());
    }
    workflow.confirm_delete().await?;
    Ok(())
}

async fn find_record(workflow: &RecordWorkflow, record_id: &str) -> Result<Record> {
    workflow
        .records()
        .await
        .into_iter()
        .find(|r| r.id == record_id)
        .with_context(|| {
            format!(
                "record {record_id} not found in domain {}",
                workflow.domain_id()
            )
        })
}

async fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("failed to read confirmation")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl RecordFields {
    fn is_empty(&self) -> bool {
        self.record_type.is_none()
            && self.name.is_none()
            && self.value.is_none()
            && self.ttl.is_none()
            && self.priority.is_none()
    }
}

/// Overwrites the draft fields that were given on the command line.
fn apply_fields(draft: &mut RecordDraft, fields: RecordFields) {
    let RecordFields {
        record_type,
        name,
        value,
        ttl,
        priority,
    } = fields;
    if let Some(record_type) = record_type {
        draft.record_type = record_type;
    }
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(value) = value {
        draft.value = value;
    }
    if let Some(ttl) = ttl {
        draft.ttl = ttl;
    }
    if let Some(priority) = priority {
        draft.priority = priority;
    }
}

fn format_user(user: &User) -> String {
    if user.email.is_empty() {
        format!("{} ({})", user.name, user.id)
    } else {
        format!("{} <{}> ({})", user.name, user.email, user.id)
    }
}

fn format_domain(domain: &Domain) -> String {
    let status = if domain.verified { "verified" } else { "unverified" };
    format!(
        "{}\t{}\t{status}\t{} records",
        domain.id, domain.name, domain.record_count
    )
}

fn format_record(record: &Record) -> String {
    let name = if record.name.is_empty() { "@" } else { &record.name };
    let priority = record
        .priority
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    format!(
        "{}\t{}\t{name}\t{}\t{priority}\t{}",
        record.id, record.record_type, record.ttl, record.value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns_console_core::types::RecordType;

    fn record(priority: Option<u16>, name: &str) -> Record {
        Record {
            id: "r1".to_string(),
            domain_id: "dom-1".to_string(),
            record_type: RecordType::Mx,
            name: name.to_string(),
            value: "mail.example.com".to_string(),
            ttl: 300,
            priority,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn apply_fields_keeps_omitted_values() {
        let mut draft = RecordDraft::default();
        apply_fields(
            &mut draft,
            RecordFields {
                name: Some("www".to_string()),
                value: Some("1.2.3.4".to_string()),
                ..RecordFields::default()
            },
        );

        assert_eq!(draft.record_type, "A");
        assert_eq!(draft.ttl, "3600");
        assert_eq!(draft.name, "www");
        assert_eq!(draft.value, "1.2.3.4");
        assert!(draft.priority.is_empty());
    }

    #[test]
    fn apply_fields_overwrites_edit_draft() {
        let mut draft = RecordDraft::from_record(&record(Some(10), "@"));
        apply_fields(
            &mut draft,
            RecordFields {
                priority: Some("20".to_string()),
                ttl: Some("60".to_string()),
                ..RecordFields::default()
            },
        );

        assert_eq!(draft.record_type, "MX");
        assert_eq!(draft.priority, "20");
        assert_eq!(draft.ttl, "60");
        assert_eq!(draft.value, "mail.example.com");
    }

    #[test]
    fn empty_fields_detected() {
        assert!(RecordFields::default().is_empty());
        assert!(
            !RecordFields {
                ttl: Some("1".to_string()),
                ..RecordFields::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn confirmation_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn record_line_shows_apex_and_priority() {
        assert_eq!(
            format_record(&record(Some(10), "")),
            "r1\tMX\t@\t300\t10\tmail.example.com"
        );
        assert_eq!(
            format_record(&record(None, "www")),
            "r1\tMX\twww\t300\t-\tmail.example.com"
        );
    }

    #[test]
    fn domain_and_user_lines() {
        let domain = Domain {
            id: "dom-1".to_string(),
            name: "example.com".to_string(),
            verified: false,
            record_count: 3,
            updated_at: None,
        };
        assert_eq!(
            format_domain(&domain),
            "dom-1\texample.com\tunverified\t3 records"
        );

        let user = User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: String::new(),
        };
        assert_eq!(format_user(&user), "Ada (u1)");
    }
}
