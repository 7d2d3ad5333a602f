use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use xcal_gerrit::config::{AppConfig, ConfigLoader};
use xcal_gerrit::errors::AppError;
use xcal_gerrit::handlers::{
    list_credentials, list_servers, load_analysis, preview_messages, test_connection,
    BuildContext, PublishOutcome, Publisher, Validation,
};
use xcal_gerrit::logging::{init_logging, LoggingConfig};
use xcal_gerrit::resolver::ConfigCredentialStore;
use xcal_gerrit::review::MessageCatalog;
use xcal_gerrit::types::cli::{XcalGerritArgs, XcalGerritSubCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = XcalGerritArgs::parse();

    init_logging(LoggingConfig::new(args.log_format, args.verbose))
        .map_err(|e| AppError::Generic(format!("failed to initialize logging: {}", e)))?;

    match args.command {
        XcalGerritSubCommand::Init => init(args.config),
        command => run(command, args.config).await,
    }
}

fn init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let loader = ConfigLoader::new(config_path);
    if loader.initialize_config()? {
        println!("Created {}", loader.config_path().display());
    } else {
        println!("Config already exists at {}", loader.config_path().display());
    }
    Ok(())
}

async fn run(command: XcalGerritSubCommand, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path.clone()).context("failed to load configuration")?;
    let catalog = MessageCatalog::load(config.review.messages_dir.as_deref())
        .context("failed to load message templates")?;
    let store = ConfigCredentialStore::new(config.credentials.clone());

    match command {
        XcalGerritSubCommand::Publish(publish) => {
            let analysis = publish.analysis.as_deref().map(load_analysis).transpose()?;
            let publisher = Publisher::new(&config, &store, &catalog);
            let outcome = publisher
                .publish(
                    &BuildContext::from_process(),
                    analysis.as_ref(),
                    publish.credential.as_deref(),
                )
                .await
                .map_err(AppError::from)?;

            match outcome {
                PublishOutcome::Skipped { reason } => {
                    println!("Nothing published: {}", reason);
                }
                PublishOutcome::Published {
                    change,
                    patchset,
                    locales,
                } => {
                    let codes: Vec<&str> = locales.iter().map(|l| l.code()).collect();
                    println!(
                        "Published review to change {} patchset {} ({})",
                        change,
                        patchset,
                        codes.join(", ")
                    );
                }
            }
        }
        XcalGerritSubCommand::TestConnection(test) => {
            let validation = test_connection(
                &config,
                &store,
                &catalog,
                &test.server,
                test.credential.as_deref(),
                test.locale,
            )
            .await;
            match validation {
                Validation::Ok(msg) => println!("{}", msg),
                Validation::Error(msg) => bail!(msg),
            }
        }
        XcalGerritSubCommand::Servers => {
            for entry in list_servers(&config) {
                println!("{}\t{}", entry.name, entry.display_name);
            }
        }
        XcalGerritSubCommand::Credentials => {
            for id in list_credentials(&store) {
                println!("{}", id);
            }
        }
        XcalGerritSubCommand::Preview(preview) => {
            let analysis = load_analysis(&preview.analysis)?;
            let locales = match preview.locale {
                Some(locale) => vec![locale],
                None => config.review.locales.clone(),
            };
            let messages =
                preview_messages(&analysis, &locales, &catalog).map_err(AppError::from)?;
            for (idx, (locale, message)) in messages.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                println!("[{}]", locale);
                println!("{}", message);
            }
        }
        XcalGerritSubCommand::Init => init(config_path)?,
    }

    Ok(())
}
