use std::process::ExitCode;

use clap::Parser;
use filehub_client::{
    cli::{Cli, Command},
    services::{create_api_client, create_identity_provider},
    ApplicationError, Category, ClientConfig, LocalFile, Notification, NotificationLevel, Tab,
    ViewController,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), ApplicationError> {
    let config = ClientConfig::from_env()?;
    tracing::info!("Using file service at {}", config.endpoints.get_files);

    let identity = create_identity_provider(&config);
    let api = create_api_client(&config, identity.clone())?;
    let view = ViewController::new(api, identity);

    let result = execute(&view, command).await;
    print_notifications(view.take_notifications());
    result
}

async fn execute(view: &ViewController, command: Command) -> Result<(), ApplicationError> {
    match command {
        Command::List { category } => {
            load_catalog(view, category).await?;
            print_files(view);
        }
        Command::Search { query, category } => {
            load_catalog(view, category).await?;
            view.set_search_query(query);
            print_files(view);
        }
        Command::Upload { path, category } => {
            let ack = view
                .upload_with_category(LocalFile::from_path(path), category)
                .await?;
            println!(
                "uploaded {} (id {})",
                ack.name.as_deref().unwrap_or("file"),
                ack.id.as_deref().unwrap_or("unknown")
            );
        }
        Command::Download { file_id } => {
            view.mount().await?;
            view.download(&file_id).await?;
        }
        Command::History => {
            view.select_tab(Tab::Profile).await?;
            for entry in view.snapshot().history {
                println!("{}\t{}\t{}", entry.id, entry.file_name, entry.date);
            }
        }
        Command::Profile => {
            view.select_tab(Tab::Profile).await?;
            let stats = view.profile_stats();
            println!("uploaded files:  {}", stats.uploaded_files);
            println!("downloads:       {}", stats.total_downloads);
            println!("history entries: {}", stats.history_entries);
        }
    }
    Ok(())
}

async fn load_catalog(view: &ViewController, category: Category) -> Result<(), ApplicationError> {
    if view.snapshot().category == category {
        view.mount().await
    } else {
        view.select_category(category).await
    }
}

fn print_files(view: &ViewController) {
    for file in view.visible_files() {
        println!(
            "{}\t[{}]\t{}\t{}\t{}\t{} downloads\t{}, {}",
            file.id,
            file.kind().icon_name(),
            file.name,
            file.size,
            file.category,
            file.downloads,
            file.uploaded_by,
            file.uploaded_date
        );
    }
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let marker = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        eprintln!(
            "[{}] {}: {}",
            marker, notification.title, notification.description
        );
    }
}
