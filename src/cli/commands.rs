use crate::error::{ContactsError, ContactsResult};
use crate::service::{Confirmation, ContactEdit, ContactService};
use crate::types::{Contact, ContactMethod, Tab};
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Print one contact card
fn print_contact(service: &ContactService, contact: &Contact) {
    let star = if contact.is_favorite { "★" } else { "☆" };
    println!(
        "   {} {}  {}",
        star.yellow(),
        contact.name.bright_blue().bold(),
        contact.id.dimmed()
    );
    for method in &contact.methods {
        let label = service.labels().label_of(&method.kind);
        println!("      {}: {}", label.cyan(), method.value);
    }
}

/// Execute the list command
pub fn list(service: &ContactService, tab: Tab) -> ContactsResult<()> {
    println!("{}", "📇 Contacts".bold().green());
    println!("   View: {}\n", tab.to_string().bright_yellow());

    let contacts = service.filter(tab);
    if contacts.is_empty() {
        println!("{}", "   No contacts yet".yellow());
        return Ok(());
    }

    for contact in &contacts {
        print_contact(service, contact);
    }
    println!("\n   {} contact(s)", contacts.len());
    Ok(())
}

/// Execute the show command
pub fn show(service: &ContactService, id: &str) -> ContactsResult<()> {
    let contact = service
        .get(id)
        .ok_or_else(|| ContactsError::NotFound(id.to_string()))?;
    print_contact(service, contact);
    Ok(())
}

/// Execute the add command
pub fn add(
    service: &mut ContactService,
    name: String,
    methods: Vec<ContactMethod>,
) -> ContactsResult<()> {
    let contact = service.create(&name, methods)?;
    println!("{}", "✅ Contact added".bold().green());
    print_contact(service, &contact);
    Ok(())
}

/// Execute the edit command
pub fn edit(
    service: &mut ContactService,
    id: &str,
    name: Option<String>,
    methods: Vec<ContactMethod>,
) -> ContactsResult<()> {
    let edit = ContactEdit {
        name,
        methods: if methods.is_empty() {
            None
        } else {
            Some(methods)
        },
    };
    let contact = service.edit(id, edit)?;
    println!("{}", "✅ Contact updated".bold().green());
    print_contact(service, &contact);
    Ok(())
}

/// Execute the delete command. Asks on stdin unless `yes` is set.
pub fn delete(service: &mut ContactService, id: &str, yes: bool) -> ContactsResult<()> {
    let Some(contact) = service.get(id) else {
        println!("{}", format!("⚠️  No contact with id {}", id).yellow());
        return Ok(());
    };

    if !yes {
        let prompt = format!("Delete contact '{}'? [y/N] ", contact.name);
        let stdin = io::stdin();
        if !ask_confirmation(stdin.lock(), &prompt)? {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    service.delete(id, Confirmation::confirmed())?;
    println!("{}", "🗑️  Contact deleted".bold().green());
    Ok(())
}

/// Print `prompt` and read a yes/no answer; anything but `y`/`yes` is no
fn ask_confirmation<R: BufRead>(mut input: R, prompt: &str) -> ContactsResult<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Execute the favorite command
pub fn favorite(service: &mut ContactService, id: &str) -> ContactsResult<()> {
    match service.toggle_favorite(id)? {
        Some(true) => println!("{}", "★ Added to favorites".bold().green()),
        Some(false) => println!("{}", "☆ Removed from favorites".bold().green()),
        None => println!("{}", format!("⚠️  No contact with id {}", id).yellow()),
    }
    Ok(())
}

/// Execute the export command
pub fn export(
    service: &ContactService,
    output: Option<PathBuf>,
    verbose: bool,
) -> ContactsResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(service.labels().export_file_name));

    println!("{}", "📇 Contacts - Excel Export".bold().green());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📊 Exporting to Excel...".cyan());
        println!("   {} contact(s)\n", service.len());
    }

    service.export_to_file(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Execute the import command
pub fn import(service: &mut ContactService, input: PathBuf, verbose: bool) -> ContactsResult<()> {
    println!("{}", "📇 Contacts - Excel Import".bold().green());
    println!("   Input: {}\n", input.display());

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }

    let bytes = fs::read(&input)?;
    let before = service.len();
    let imported = service.import_workbook(bytes)?;

    if imported == 0 {
        println!("{}", "⚠️  No rows with contact details found".yellow());
    } else {
        println!(
            "{}",
            format!("✅ Imported {} contact(s)", imported).bold().green()
        );
    }
    if verbose {
        println!("   Address book: {} → {} contacts", before, service.len());
    }
    println!();
    Ok(())
}
