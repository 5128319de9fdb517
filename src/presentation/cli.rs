//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::domain::entities::{EntityRecord, UserRole};
use crate::infrastructure::api::Resource;
use crate::infrastructure::config::GlobalArgs;

/// Command-line client for a FilaDB server.
#[derive(Debug, Parser)]
#[command(name = "filadb", version, about, long_about = None)]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the token.
    Login {
        /// Account email.
        #[arg(short, long)]
        email: String,
        /// Account password.
        #[arg(short, long, env = "FILADB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Check that the server is reachable.
    Health,
    /// List accounts (admin).
    Users,
    /// Create an account (admin).
    Register {
        /// Email of the new account.
        #[arg(short, long)]
        email: String,
        /// Password of the new account.
        #[arg(short, long, env = "FILADB_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        /// Role of the new account.
        #[arg(short, long, default_value = "viewer")]
        role: UserRole,
    },
    /// Import the SpoolmanDB catalog (admin).
    SyncSpoolmandb,
    /// Uploaded files.
    Files {
        /// Operation on the collection.
        #[command(subcommand)]
        action: FilesAction,
    },
    /// Filament catalog.
    Filaments {
        /// Operation on the collection.
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Spool inventory.
    Spools {
        /// Operation on the collection.
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Filament manufacturers.
    Manufacturers {
        /// Operation on the collection.
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Material types.
    Materials {
        /// Operation on the collection.
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Printers.
    Printers {
        /// Operation on the collection.
        #[command(subcommand)]
        action: PrintersAction,
    },
    /// Bambu Lab part mappings (admin).
    BambuParts {
        /// Operation on the collection.
        #[command(subcommand)]
        action: RecordAction,
    },
}

/// CRUD operations shared by every collection.
#[derive(Debug, Clone, Subcommand)]
pub enum RecordAction {
    /// List records, optionally filtered.
    List {
        /// Query parameter, repeatable.
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
    /// Show one record.
    Get {
        /// Record id.
        id: String,
    },
    /// Create a record from a JSON object.
    Create {
        /// Record fields as a JSON object.
        #[arg(short, long, value_parser = parse_record)]
        data: EntityRecord,
    },
    /// Change fields of a record.
    Update {
        /// Record id.
        id: String,
        /// Fields to change as a JSON object.
        #[arg(short, long, value_parser = parse_record)]
        data: EntityRecord,
    },
    /// Delete a record.
    Delete {
        /// Record id.
        id: String,
    },
}

/// Operations on uploaded files.
#[derive(Debug, Clone, Subcommand)]
pub enum FilesAction {
    /// Shared record operations.
    #[command(flatten)]
    Record(RecordAction),
    /// Upload a file from disk.
    Upload {
        /// File to send.
        path: PathBuf,
        /// Extra form field, repeatable.
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
    },
}

/// Operations on printers.
#[derive(Debug, Clone, Subcommand)]
pub enum PrintersAction {
    /// Shared record operations.
    #[command(flatten)]
    Record(RecordAction),
    /// Set a printer's status.
    Status {
        /// Printer id.
        id: String,
        /// New status, e.g. `idle` or `printing`.
        status: String,
    },
}

/// Access level a command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session involved.
    Open,
    /// Only without a session.
    SignedOut,
    /// Any signed-in user.
    SignedIn,
    /// Signed-in admin.
    Admin,
}

impl Command {
    /// Access level needed to run the command.
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Logout | Self::Health => Access::Open,
            Self::Login { .. } => Access::SignedOut,
            Self::Users | Self::Register { .. } | Self::SyncSpoolmandb | Self::BambuParts { .. } => {
                Access::Admin
            }
            Self::Whoami
            | Self::Files { .. }
            | Self::Filaments { .. }
            | Self::Spools { .. }
            | Self::Manufacturers { .. }
            | Self::Materials { .. }
            | Self::Printers { .. } => Access::SignedIn,
        }
    }
}

/// Collection targeted by a resource command.
#[must_use]
pub const fn resource_of(command: &Command) -> Option<Resource> {
    match command {
        Command::Files { .. } => Some(Resource::Files),
        Command::Filaments { .. } => Some(Resource::Filaments),
        Command::Spools { .. } => Some(Resource::Spools),
        Command::Manufacturers { .. } => Some(Resource::Manufacturers),
        Command::Materials { .. } => Some(Resource::Materials),
        Command::Printers { .. } => Some(Resource::Printers),
        Command::BambuParts { .. } => Some(Resource::BambuParts),
        _ => None,
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_record(raw: &str) -> Result<EntityRecord, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))?;
    EntityRecord::try_from(value).map_err(|_| "expected a JSON object".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("filadb").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_queries() {
        let cli = parse(&["filaments", "list", "-q", "material=PLA", "-q", "color=red"]);
        match cli.command {
            Command::Filaments {
                action: RecordAction::List { query },
            } => {
                let params: crate::domain::entities::QueryParams = query.into_iter().collect();
                assert_eq!(params.to_query_string(), "material=PLA&color=red");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_with_json() {
        let cli = parse(&["spools", "create", "--data", r#"{"filament_id": 3}"#]);
        match cli.command {
            Command::Spools {
                action: RecordAction::Create { data },
            } => assert_eq!(data.get("filament_id"), Some(&Value::from(3))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_object_data() {
        let result = Cli::try_parse_from(["filadb", "spools", "create", "--data", "[1, 2]"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flattened_record_actions() {
        let cli = parse(&["printers", "status", "4", "printing"]);
        assert!(matches!(
            cli.command,
            Command::Printers {
                action: PrintersAction::Status { .. }
            }
        ));

        let cli = parse(&["files", "delete", "9"]);
        assert!(matches!(
            cli.command,
            Command::Files {
                action: FilesAction::Record(RecordAction::Delete { .. })
            }
        ));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = parse(&["whoami", "--server", "http://nas:8000", "--timeout", "0"]);
        assert_eq!(cli.global.server.as_deref(), Some("http://nas:8000"));
        assert_eq!(cli.global.timeout, Some(0));
    }

    #[test_case(&["health"], Access::Open ; "health")]
    #[test_case(&["logout"], Access::Open ; "logout")]
    #[test_case(&["login", "-e", "a@b.com", "-p", "x"], Access::SignedOut ; "login")]
    #[test_case(&["whoami"], Access::SignedIn ; "whoami")]
    #[test_case(&["materials", "list"], Access::SignedIn ; "materials")]
    #[test_case(&["users"], Access::Admin ; "users")]
    #[test_case(&["bambu-parts", "get", "1"], Access::Admin ; "bambu_parts")]
    fn test_access(args: &[&str], expected: Access) {
        assert_eq!(parse(args).command.access(), expected);
    }

    #[test_case("a=b", Ok(("a".into(), "b".into())) ; "simple")]
    #[test_case("a=b=c", Ok(("a".into(), "b=c".into())) ; "value_with_equals")]
    #[test_case("a=", Ok(("a".into(), String::new())) ; "empty_value")]
    #[test_case("=b", Err("empty key in `=b`".into()) ; "empty_key")]
    #[test_case("ab", Err("expected KEY=VALUE, got `ab`".into()) ; "missing_equals")]
    fn test_parse_key_value(raw: &str, expected: Result<(String, String), String>) {
        assert_eq!(parse_key_value(raw), expected);
    }
}
