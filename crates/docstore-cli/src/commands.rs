use std::sync::Arc;

use colored::Colorize;

use docstore_server::{ServerConfig, StorageConfig, StoreServer};
use docstore_store::{password, Client, DiskBackend, StoreError};
use docstore_types::User;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::AddUser(args) => cmd_add_user(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = args.data {
        config.storage = StorageConfig::Disk { path };
    }

    println!(
        "{} docstore serving on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(StoreServer::new(config).serve())?;
    Ok(())
}

fn cmd_add_user(args: AddUserArgs) -> anyhow::Result<()> {
    let backend = Arc::new(DiskBackend::open(&args.data)?);
    let client = Client::new(backend);

    // Updating an existing user keeps its UID and groups.
    let mut user = match client.get_user_by_username(&args.username) {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => User::new(&args.username),
        Err(e) => return Err(e.into()),
    };
    user.password_hash = password::hash(&args.password)?;
    for group in args.group {
        if !user.in_group(&group) {
            user.groups.push(group);
        }
    }
    client.set_user(&mut user)?;

    println!(
        "{} user {} ({})",
        "✓".green().bold(),
        user.username.bold(),
        user.uid.dimmed()
    );
    Ok(())
}
