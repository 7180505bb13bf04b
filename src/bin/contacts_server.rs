//! Contacts API Server binary
//!
//! HTTP REST API over a local address book.

use clap::Parser;
use royalbit_contacts::api::{run_api_server, ApiConfig};
use royalbit_contacts::codec::Locale;
use royalbit_contacts::config::ContactsConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contacts-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Contacts API Server - HTTP REST API for a personal address book")]
#[command(long_about = r#"
Contacts API Server - HTTP REST API

Endpoints:
  - GET    /api/v1/contacts?tab=favorite   - List contacts
  - POST   /api/v1/contacts                - Create a contact
  - GET    /api/v1/contacts/:id            - Get a contact
  - PUT    /api/v1/contacts/:id            - Edit a contact
  - DELETE /api/v1/contacts/:id?confirm=true - Delete a contact
  - POST   /api/v1/contacts/:id/favorite   - Toggle favorite
  - GET    /api/v1/export                  - Download .xlsx
  - POST   /api/v1/import                  - Upload a spreadsheet body

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  contacts-server                           # Start on localhost:8080
  contacts-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/contacts \
    -H "Content-Type: application/json" \
    -d '{"name": "Alice", "methods": [{"type": "phone", "value": "555-0100"}]}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "CONTACTS_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "CONTACTS_PORT")]
    port: u16,

    /// Directory holding contacts.yaml
    #[arg(long, env = "CONTACTS_STORE")]
    store: Option<PathBuf>,

    /// Spreadsheet column language
    #[arg(long, value_enum, default_value_t = Locale::En, env = "CONTACTS_LOCALE")]
    locale: Locale,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let service = ContactsConfig::new(args.store, args.locale).open_service()?;
    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config, service).await
}
