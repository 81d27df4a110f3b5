//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "dns-console",
    version,
    about = "Manage DNS domains and records from the terminal",
    long_about = "Manage DNS domains and records through the console API.\n\n\
                  Connection settings come from a TOML config file and can be\n\
                  overridden with DNS_CONSOLE_API_URL, DNS_CONSOLE_SESSION and\n\
                  DNS_CONSOLE_LOG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: <config dir>/dns-console/config.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the signed-in user.
    Whoami,

    /// List or register domains.
    #[command(subcommand)]
    Domains(DomainsCommand),

    /// List, add, edit or delete records of one domain.
    #[command(subcommand)]
    Records(RecordsCommand),
}

#[derive(Subcommand, Debug)]
pub enum DomainsCommand {
    /// List your domains.
    List,

    /// Register a new domain.
    Create {
        /// Domain name, e.g. example.com.
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List the records of a domain.
    List {
        /// Domain id.
        domain: String,

        /// Only show records whose name, type or value contains this text.
        #[arg(long, short)]
        query: Option<String>,
    },

    /// Add a record.
    Add {
        /// Domain id.
        domain: String,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// Replace fields of an existing record.
    Edit {
        /// Domain id.
        domain: String,

        /// Record id.
        record: String,

        #[command(flatten)]
        fields: RecordFields,
    },

    /// Delete a record after confirmation.
    Delete {
        /// Domain id.
        domain: String,

        /// Record id.
        record: String,

        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Record form fields. Omitted fields keep the editor's current value.
#[derive(Args, Debug, Default, Clone)]
pub struct RecordFields {
    /// Record type (A, AAAA, CNAME, MX, TXT, NS, PTR, SRV, CAA).
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub record_type: Option<String>,

    /// Record name; use @ for the zone apex.
    #[arg(long, short)]
    pub name: Option<String>,

    /// Record value.
    #[arg(long, short)]
    pub value: Option<String>,

    /// Time to live in seconds.
    #[arg(long)]
    pub ttl: Option<String>,

    /// Priority (MX and SRV only).
    #[arg(long, short)]
    pub priority: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_record_add() {
        let cli = Cli::try_parse_from([
            "dns-console",
            "records",
            "add",
            "dom-1",
            "--type",
            "MX",
            "--name",
            "@",
            "--value",
            "mail.example.com",
            "--priority",
            "10",
        ])
        .unwrap();

        let Command::Records(RecordsCommand::Add { domain, fields }) = cli.command else {
            panic!("expected records add");
        };
        assert_eq!(domain, "dom-1");
        assert_eq!(fields.record_type.as_deref(), Some("MX"));
        assert_eq!(fields.priority.as_deref(), Some("10"));
        assert!(fields.ttl.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["dns-console", "whoami", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Command::Whoami));
    }

    #[test]
    fn delete_defaults_to_prompt() {
        let cli = Cli::try_parse_from(["dns-console", "records", "delete", "dom-1", "r1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Records(RecordsCommand::Delete { yes: false, .. })
        ));
    }

    #[test]
    fn edit_requires_record_id() {
        assert!(Cli::try_parse_from(["dns-console", "records", "edit", "dom-1"]).is_err());
    }
}
