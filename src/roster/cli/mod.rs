//! # CLI Layer
//!
//! One possible UI client for roster. This is the only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Handles argument parsing
//! - Reads attachment metadata from the filesystem
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: logging setup, context init and dispatch (called by `main.rs`)
//! - `handle_*()`: per-command handlers that call the API and print
//! - `render`: `CmdResult` pieces to terminal text
//! - `prompt`: stdin implementation of the delete confirmation

mod prompt;
mod render;
mod setup;
mod styles;

use clap::Parser;
use log::debug;
use prompt::StdinConfirm;
use render::{print_messages, print_records, print_table, print_validation};
use roster::api::{self, CmdResult, ConfigAction, RecordUpdate, RosterPaths};
use roster::draft::{Draft, FieldEdit};
use roster::error::{Result, RosterError};
use roster::init::{initialize_at, resolve_data_dir, RosterContext};
use roster::model::Attachment;
use roster::table::{AlwaysConfirm, Confirm};
use roster::view::{SortDirective, SortKey, ViewQuery, PAGE_SIZE_OPTIONS};
use setup::{Cli, Commands, FieldArgs, ListArgs};
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = RosterPaths {
        data_dir: resolve_data_dir()?,
    };

    // config and init must not open the store: opening seeds an empty one.
    let command = match cli.command {
        Some(Commands::Config { key, value }) => return handle_config(&paths, key, value),
        Some(Commands::Init) => return handle_init(&paths),
        Some(command) => command,
        None => Commands::List(ListArgs::default_page()),
    };

    let mut ctx = initialize_at(paths.data_dir)?;
    print_messages(&ctx.notices);

    match command {
        Commands::Add(fields) => handle_add(&mut ctx, fields),
        Commands::List(args) => handle_list(&ctx, args),
        Commands::Show { ids } => handle_show(&ctx, ids),
        Commands::Update {
            id,
            fields,
            remove_skills,
            decline_terms,
            clear_attachment,
        } => {
            let mut edits = field_edits(fields)?;
            edits.extend(remove_skills.into_iter().map(FieldEdit::RemoveSkill));
            if decline_terms {
                edits.push(FieldEdit::Terms(false));
            }
            if clear_attachment {
                edits.push(FieldEdit::Attachment(None));
            }
            handle_update(&mut ctx, RecordUpdate::new(id, edits))
        }
        Commands::Copy { id } => handle_copy(&mut ctx, id),
        Commands::Delete { ids, yes } => handle_delete(&mut ctx, ids, yes),
        Commands::Config { .. } | Commands::Init => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn handle_add(ctx: &mut RosterContext, fields: FieldArgs) -> Result<()> {
    let draft = draft_from_fields(fields)?;
    let result = ctx.api.add_record(draft)?;
    report_edit(&result)?;
    for record in &result.affected_records {
        println!("{}", record.id);
    }
    Ok(())
}

fn handle_list(ctx: &RosterContext, args: ListArgs) -> Result<()> {
    let page_size = args.per_page.unwrap_or(ctx.config.page_size);
    if !PAGE_SIZE_OPTIONS.contains(&page_size) {
        return Err(RosterError::Api(format!(
            "--per-page must be one of {:?}",
            PAGE_SIZE_OPTIONS
        )));
    }

    let sort = match args.sort {
        Some(raw) => {
            let key = raw.parse::<SortKey>().map_err(RosterError::Api)?;
            Some(if args.desc {
                SortDirective::descending(key)
            } else {
                SortDirective::ascending(key)
            })
        }
        None => None,
    };

    let query = ViewQuery {
        sort,
        search: args.search.unwrap_or_default(),
        page_index: (args.page - 1) as usize,
        page_size,
    };
    debug!("list query: {:?}", query);

    let result = ctx.api.list_records(query)?;
    if let Some(page) = &result.page {
        print_table(page, sort);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &RosterContext, ids: Vec<String>) -> Result<()> {
    let result = ctx.api.show_records(&ids)?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut RosterContext, update: RecordUpdate) -> Result<()> {
    let result = ctx.api.update_record(update)?;
    report_edit(&result)
}

fn handle_copy(ctx: &mut RosterContext, id: String) -> Result<()> {
    let result = ctx.api.copy_record(&id)?;
    print_messages(&result.messages);
    for record in &result.affected_records {
        println!("{}", record.id);
    }
    Ok(())
}

fn handle_delete(ctx: &mut RosterContext, ids: Vec<String>, yes: bool) -> Result<()> {
    let mut confirm: Box<dyn Confirm> = if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };
    let result = ctx.api.delete_records(&ids, confirm.as_mut())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(paths: &RosterPaths, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = api::config(paths, action)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(paths: &RosterPaths) -> Result<()> {
    let result = api::init(paths)?;
    print_messages(&result.messages);
    Ok(())
}

/// Prints the outcome of a form submission or row edit. Rejections become an
/// error so the process exits non-zero.
fn report_edit(result: &CmdResult) -> Result<()> {
    print_messages(&result.messages);
    match &result.validation {
        Some(errors) if !errors.is_empty() => {
            print_validation(errors);
            Err(RosterError::Api("record was not saved".to_string()))
        }
        _ => Ok(()),
    }
}

fn draft_from_fields(fields: FieldArgs) -> Result<Draft> {
    let attachment = fields
        .attachment
        .as_deref()
        .map(read_attachment)
        .transpose()?;
    Ok(Draft {
        name: fields.name,
        age: fields.age,
        gender: fields.gender,
        status: fields.status,
        date_of_birth: fields.dob,
        attachment,
        terms_accepted: Some(fields.accept_terms),
        skills: fields.skills,
    })
}

fn field_edits(fields: FieldArgs) -> Result<Vec<FieldEdit>> {
    let mut edits = Vec::new();
    if let Some(name) = fields.name {
        edits.push(FieldEdit::Name(name));
    }
    if let Some(age) = fields.age {
        edits.push(FieldEdit::Age(age));
    }
    if let Some(gender) = fields.gender {
        edits.push(FieldEdit::Gender(gender));
    }
    if let Some(status) = fields.status {
        edits.push(FieldEdit::Status(status));
    }
    if let Some(dob) = fields.dob {
        edits.push(FieldEdit::DateOfBirth(dob));
    }
    if let Some(path) = fields.attachment.as_deref() {
        edits.push(FieldEdit::Attachment(Some(read_attachment(path)?)));
    }
    if fields.accept_terms {
        edits.push(FieldEdit::Terms(true));
    }
    edits.extend(fields.skills.into_iter().map(FieldEdit::AddSkill));
    Ok(edits)
}

/// Only file metadata is read; contents stay on disk.
fn read_attachment(path: &Path) -> Result<Attachment> {
    let metadata = fs::metadata(path).map_err(|e| {
        RosterError::Api(format!("Cannot read attachment {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(RosterError::Api(format!(
            "Attachment {} is not a file",
            path.display()
        )));
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let location = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    Ok(Attachment::new(
        file_name,
        metadata.len(),
        location.display().to_string(),
    ))
}
