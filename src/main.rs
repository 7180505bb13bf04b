use clap::{Parser, Subcommand};
use colored::Colorize;
use royalbit_contacts::api::{run_api_server, ApiConfig, SERVER_LOG_FILTER};
use royalbit_contacts::cli;
use royalbit_contacts::codec::Locale;
use royalbit_contacts::config::{init_tracing, ContactsConfig};
use royalbit_contacts::error::ContactsResult;
use royalbit_contacts::service::ContactService;
use royalbit_contacts::types::{ContactMethod, Tab};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Personal address book with favorites and Excel import/export.")]
#[command(long_about = "Contacts - Local-first personal address book
Phones, emails, chat handles, addresses | Favorites | Excel round-trip

COMMANDS:
  list      - List contacts (all or favorites)
  show      - Show one contact
  add       - Add a contact
  edit      - Change a contact's name or methods
  delete    - Delete a contact (asks first)
  favorite  - Toggle a contact's favorite flag
  export    - Address book to Excel (.xlsx)
  import    - Excel to address book (appends)
  serve     - Run the HTTP API

EXAMPLES:
  contacts add \"Alice Chen\" -m phone:555-0100 -m email:alice@example.com
  contacts list --tab favorite
  contacts export book.xlsx
  contacts import book.xlsx

Data lives in CONTACTS_STORE (default: the platform data directory).")]
#[command(version)]
struct Cli {
    /// Directory holding contacts.yaml
    #[arg(long, global = true, env = "CONTACTS_STORE")]
    store: Option<PathBuf>,

    /// Spreadsheet column language
    #[arg(long, global = true, value_enum, default_value_t = Locale::En, env = "CONTACTS_LOCALE")]
    locale: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts
    List {
        /// Which contacts to show: all or favorite
        #[arg(short, long, default_value = "all")]
        tab: Tab,
    },

    /// Show one contact
    Show {
        /// Contact id
        id: String,
    },

    #[command(long_about = "Add a contact.

Each method is KIND:VALUE. Kinds: phone, email, chat, address.
Any other kind is kept as a custom label.

EXAMPLE:
  contacts add \"Alice Chen\" -m phone:555-0100 -m phone:555-0199 -m chat:alice_c")]
    /// Add a contact
    Add {
        /// Contact name
        name: String,

        /// Contact method as KIND:VALUE (repeatable)
        #[arg(short, long = "method", required = true)]
        methods: Vec<ContactMethod>,
    },

    /// Change a contact's name and/or replace its methods
    Edit {
        /// Contact id
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// Replacement methods as KIND:VALUE (repeatable)
        #[arg(short, long = "method")]
        methods: Vec<ContactMethod>,
    },

    /// Delete a contact
    Delete {
        /// Contact id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle a contact's favorite flag
    Favorite {
        /// Contact id
        id: String,
    },

    #[command(long_about = "Export the address book to Excel .xlsx format.

One row per contact, name first. Repeated method kinds get numbered
columns: Phone, Phone2, Phone3, ...

EXAMPLE:
  contacts export book.xlsx")]
    /// Export the address book to Excel .xlsx
    Export {
        /// Output Excel file path (.xlsx)
        output: Option<PathBuf>,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import contacts from a spreadsheet.

Reads the first sheet. The header row names the columns; each column is
classified by the first of Phone, Email, Chat, Address it contains, so
'Phone (home)' and 'Phone2' are phones. Other columns keep their header
as a custom label. Rows without any contact details are skipped.

Imported contacts are appended; nothing is merged.

EXAMPLE:
  contacts import book.xlsx")]
    /// Import contacts from a spreadsheet
    Import {
        /// Path to spreadsheet (.xlsx, .xls, .ods)
        input: PathBuf,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "CONTACTS_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "CONTACTS_PORT")]
        port: u16,
    },
}

/// Default log filter: quiet for one-shot commands, informative while serving
fn log_filter(command: &Commands) -> &'static str {
    match command {
        Commands::Serve { .. } => SERVER_LOG_FILTER,
        _ => "warn",
    }
}

fn run(command: Commands, mut service: ContactService) -> ContactsResult<()> {
    match command {
        Commands::List { tab } => cli::list(&service, tab),

        Commands::Show { id } => cli::show(&service, &id),

        Commands::Add { name, methods } => cli::add(&mut service, name, methods),

        Commands::Edit { id, name, methods } => cli::edit(&mut service, &id, name, methods),

        Commands::Delete { id, yes } => cli::delete(&mut service, &id, yes),

        Commands::Favorite { id } => cli::favorite(&mut service, &id),

        Commands::Export { output, verbose } => cli::export(&service, output, verbose),

        Commands::Import { input, verbose } => cli::import(&mut service, input, verbose),

        Commands::Serve { host, port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime
                .block_on(run_api_server(ApiConfig { host, port }, service))
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(log_filter(&cli.command));
    let config = ContactsConfig::new(cli.store, cli.locale);

    let result = config
        .open_service()
        .and_then(|service| run(cli.command, service));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
