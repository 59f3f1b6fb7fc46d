use std::{io::Write, path::PathBuf};

use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::NavlistCliError;
use navlist::{
  config::SiteConfig,
  host::{FunctionRegistry, Host},
  store::DirectoryStore,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod errors;

static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

#[derive(Parser)]
#[command(author, version, about = "Run the navlist and urlformat wiki functions from the command line")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Configuration file (default: the user config directory)
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Directory holding the wiki pages
  #[arg(long, global = true)]
  pages: Option<PathBuf>,

  /// Title of the page the functions are called from
  #[arg(long, global = true)]
  page: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Look up an entry of a template's list
  Lookup {
    /// Template holding the list (Template: prefix not necessary)
    template: String,
    /// next, prev, first, last, size, #, or a numeric offset
    #[arg(default_value = "", allow_hyphen_values = true)]
    action:   String,
    /// Entry name, or an index when the action is #
    #[arg(default_value = "", allow_hyphen_values = true)]
    lookup:   String,
    /// #, target, or pipe
    #[arg(default_value = "")]
    flag:     String,
  },
  /// Format text as a URL slug
  Urlformat {
    /// Text to format (default: the current page title)
    #[arg(default_value = "")]
    text: String,
  },
  /// Show the entries extracted from a template
  List {
    /// Template holding the list (Template: prefix not necessary)
    template: String,
    /// Print the entries as JSON
    #[arg(long)]
    json:     bool,
  },
  /// Call a parser function by magic word
  Call {
    /// Magic word, e.g. navlist or urlformat
    name: String,
    /// Function arguments, in order
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Reads the configuration and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<SiteConfig, NavlistCliError> {
  let mut config = match &cli.config {
    Some(path) => SiteConfig::load(path)?,
    None => SiteConfig::load_or_default()?,
  };
  if let Some(pages) = &cli.pages {
    config.pages_dir = pages.clone();
  }
  if let Some(page) = &cli.page {
    config.current_page = Some(page.clone());
  }
  debug!("Using configuration: {config:?}");
  Ok(config)
}

fn main() -> Result<(), NavlistCliError> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = load_config(&cli)?;
  trace!("Reading pages from: {}", config.pages_dir.display());
  let host = Host::from_config(&config);

  match cli.command {
    Commands::Lookup { template, action, lookup, flag } => {
      println!("{}", host.navlist(&template, &action, &lookup, &flag));
      Ok(())
    },

    Commands::Urlformat { text } => {
      println!("{}", host.urlformat(&text));
      Ok(())
    },

    Commands::List { template, json } => list(&host, &template, json),

    Commands::Call { name, args } => {
      let registry = FunctionRegistry::with_builtins(&host);
      let args: Vec<&str> = args.iter().map(String::as_str).collect();
      match registry.call(&name, &args) {
        Some(result) => {
          println!("{result}");
          Ok(())
        },
        None => {
          eprintln!(
            "{} Known functions: {}",
            style(WARNING).yellow(),
            style(registry.names().join(", ")).cyan()
          );
          Err(NavlistCliError::UnknownFunction(name))
        },
      }
    },
  }
}

/// Prints the entries of `template`, one per line with their 1-based index.
fn list(host: &Host<DirectoryStore>, template: &str, json: bool) -> Result<(), NavlistCliError> {
  let list = match host.list(template) {
    Ok(list) => list,
    Err(e) => {
      if let Some(sentinel) = e.lookup() {
        eprintln!("{} {}", style(WARNING).yellow(), style(sentinel.sentinel()).red().bold());
      }
      return Err(e.into());
    },
  };

  let mut stdout = std::io::stdout().lock();
  if json {
    serde_json::to_writer_pretty(&mut stdout, list.entries())?;
    writeln!(stdout)?;
    return Ok(());
  }

  writeln!(
    stdout,
    "{} {} has {} entries:",
    style(BOOKS).cyan(),
    style(template).yellow(),
    style(list.size()).yellow()
  )?;
  for (i, entry) in list.entries().iter().enumerate() {
    if entry.display.is_empty() {
      writeln!(stdout, "{:>4}. {}", style(i + 1).yellow(), style(&entry.name).white())?;
    } else {
      writeln!(
        stdout,
        "{:>4}. {} {} {}",
        style(i + 1).yellow(),
        style(&entry.name).white(),
        style("|").dim(),
        style(&entry.display).green()
      )?;
    }
  }
  Ok(())
}
