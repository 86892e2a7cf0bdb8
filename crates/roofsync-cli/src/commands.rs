//! Command handlers.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use roofsync::{Portfolio, SyncOrchestrator, SyncOutcome, report_file_name, write_report};
use roofsync_client::ContentsClient;
use roofsync_core::{Credential, Property, PropertyId};
use roofsync_store::{FileStore, LocalStore};

use crate::cli::{Cli, Command, ConfigAction, TokenAction};
use crate::config::{PROJECT_NAME, RoofsyncConfig};
use crate::error::{Error, Result};

/// Run a parsed command line.
///
/// Returns `Ok(false)` when the command ran but did not succeed (a failed
/// sync), so the caller can exit non-zero.
pub async fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config.as_deref();
    if let Command::Config { action } = cli.command {
        config_command(config_path, action)?;
        return Ok(true);
    }

    let config = RoofsyncConfig::load(config_path)?;
    let data_dir = config.data_dir(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "using local data");
    let session = Session::new(cli.config.clone(), config, data_dir);
    session.dispatch(cli.command).await
}

/// Everything one invocation works with.
struct Session {
    config_path: Option<String>,
    config: RoofsyncConfig,
    data_dir: PathBuf,
    local: Arc<LocalStore<FileStore>>,
}

impl Session {
    fn new(config_path: Option<String>, config: RoofsyncConfig, data_dir: PathBuf) -> Self {
        let local = Arc::new(LocalStore::new(FileStore::new(&data_dir)));
        Self {
            config_path,
            config,
            data_dir,
            local,
        }
    }

    fn portfolio(&self) -> Portfolio<FileStore> {
        Portfolio::new(Arc::clone(&self.local))
    }

    fn orchestrator(&self) -> Result<SyncOrchestrator<ContentsClient, FileStore>> {
        let client = ContentsClient::new(self.config.remote.clone())?;
        Ok(SyncOrchestrator::new(client, Arc::clone(&self.local))
            .with_timeout(self.config.remote.timeout()))
    }

    async fn dispatch(&self, command: Command) -> Result<bool> {
        match command {
            Command::Add(args) => {
                let property = self.portfolio().add(args.into())?;
                println!("Added {}", property.id());
                print_property(&property);
            }
            Command::List { json } => self.list(json)?,
            Command::Show { id } => print_property(&self.find(&id)?),
            Command::Delete { id } => match self.portfolio().remove(&PropertyId::new(id.clone()))? {
                Some(removed) => println!("Deleted {} ({})", removed.id(), removed.address()),
                None => return Err(Error::PropertyNotFound(id)),
            },
            Command::Summary => {
                let summary = self.portfolio().summary();
                println!("Properties:      {}", summary.properties);
                println!(
                    "Total capacity:  {:.2} kW ({:.4} MW)",
                    summary.total_capacity_watts / 1_000.0,
                    summary.total_capacity_mw
                );
            }
            Command::Export { id, out } => self.export(&id, out)?,
            Command::Pull => {
                let outcome = self.orchestrator()?.pull().await;
                return Ok(report_outcome(&outcome));
            }
            Command::Push => {
                let outcome = self.orchestrator()?.push().await;
                return Ok(report_outcome(&outcome));
            }
            Command::Status => self.status(),
            Command::Token { action } => self.token(action)?,
            Command::Config { action } => config_command(self.config_path.as_deref(), action)?,
        }
        Ok(true)
    }

    fn find(&self, id: &str) -> Result<Property> {
        self.portfolio()
            .get(&PropertyId::new(id))
            .ok_or_else(|| Error::PropertyNotFound(id.to_string()))
    }

    fn list(&self, json: bool) -> Result<()> {
        let properties = self.portfolio().list();
        if json {
            println!("{}", properties.to_json_pretty()?);
            return Ok(());
        }
        if properties.is_empty() {
            println!("No properties recorded.");
            return Ok(());
        }
        println!(
            "{:<38} {:<32} {:<8} {:>12} {:>10}",
            "ID", "ADDRESS", "ZIP", "ROOF SQ FT", "KW"
        );
        for p in &properties {
            println!(
                "{:<38} {:<32} {:<8} {:>12} {:>10.2}",
                p.id().as_str(),
                truncate(p.address(), 32),
                p.zip(),
                p.roof_area(),
                p.capacity_kw()
            );
        }
        Ok(())
    }

    fn export(&self, id: &str, out: Option<PathBuf>) -> Result<()> {
        let property = self.find(id)?;
        let path = out.unwrap_or_else(|| PathBuf::from(report_file_name(&property)));
        let file = File::create(&path).map_err(|e| Error::io_with_path(e, &path))?;
        write_report(&property, BufWriter::new(file))?;
        println!("Wrote {}", path.display());
        Ok(())
    }

    fn status(&self) {
        let remote = &self.config.remote;
        match remote.validate() {
            Ok(()) => println!("Remote:      {}", remote.contents_url()),
            Err(e) => println!("Remote:      not configured ({e})"),
        }
        println!("Policy:      {:?}", remote.write_policy);
        match self.local.credential() {
            Some(credential) => println!("Token:       {}", credential.masked()),
            None => println!("Token:       not set"),
        }
        println!("Data dir:    {}", self.data_dir.display());
        println!("Properties:  {}", self.local.load().len());
    }

    fn token(&self, action: TokenAction) -> Result<()> {
        match action {
            TokenAction::Set { token } => {
                let credential = Credential::new(&token).ok_or_else(|| {
                    roofsync_core::Error::validation_field("token", "Token must not be blank")
                })?;
                self.local.set_credential(Some(&credential))?;
                println!("Token saved ({})", credential.masked());
            }
            TokenAction::Clear => {
                self.local.set_credential(None)?;
                println!("Token cleared");
            }
            TokenAction::Show => match self.local.credential() {
                Some(credential) => println!("{}", credential.masked()),
                None => println!("No token configured"),
            },
        }
        Ok(())
    }
}

/// `config` subcommands. These run before the configuration is loaded.
fn config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = resolved_config_path(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(not created yet; `{PROJECT_NAME} config init` writes the defaults)");
            }
        }
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(file) => file,
                None => resolved_config_path(config_path)?,
            };
            RoofsyncConfig::write_default(&path, force)?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Show => {
            print!("{}", RoofsyncConfig::load(config_path)?.to_toml_string()?);
        }
    }
    Ok(())
}

fn resolved_config_path(config_path: Option<&str>) -> Result<PathBuf> {
    RoofsyncConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("no config directory on this platform; pass --config"))
}

fn print_property(p: &Property) {
    println!("ID:             {}", p.id());
    println!("Address:        {}", p.address());
    println!("Zip:            {}", p.zip());
    println!("Roof area:      {} sq ft", p.roof_area());
    println!("Usable area:    {} sq ft", p.usable_area());
    println!(
        "Capacity:       {} W / {:.2} kW / {:.4} MW",
        p.capacity_watts(),
        p.capacity_kw(),
        p.capacity_mw()
    );
    println!("Email:          {}", p.email());
    println!("Phone:          {}", p.phone());
    println!("Recorded:       {}", p.timestamp().to_rfc3339());
}

/// Print a sync outcome; returns whether it was a success.
/// Print a sync outcome and tell the caller whether to exit successfully.
/// A missing credential is a prompt, not a failure.
fn report_outcome(outcome: &SyncOutcome) -> bool {
    if outcome.is_success() {
        println!("{outcome}");
        return true;
    }
    if *outcome == SyncOutcome::NeedsCredential {
        println!("{outcome}");
        println!("Run `{PROJECT_NAME} token set <token>` to sign in, then try again.");
        return true;
    }
    eprintln!("{outcome}");
    false
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
