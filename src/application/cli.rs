use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::repl;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub enum AppMode {
    Serve,
    Chat,
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("KOKORO_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

fn arg_access_password() -> Arg {
    return Arg::new(ConfigKey::AccessPassword.to_string())
        .long(ConfigKey::AccessPassword.to_string())
        .env("KOKORO_ACCESS_PASSWORD")
        .num_args(1)
        .help("Shared access password controlling entry to the counseling room.")
        .global(true);
}

fn arg_backend_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendTimeout.to_string())
        .long(ConfigKey::BackendTimeout.to_string())
        .env("KOKORO_BACKEND_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out requests made to the Gemini API. [default: {}]",
            Config::default(ConfigKey::BackendTimeout)
        ))
        .global(true);
}

fn arg_gemini_token() -> Arg {
    return Arg::new(ConfigKey::GeminiToken.to_string())
        .long(ConfigKey::GeminiToken.to_string())
        .env("GEMINI_API_KEY")
        .num_args(1)
        .help("Gemini API key used by the chat endpoint.")
        .global(true);
}

fn arg_host() -> Arg {
    return Arg::new(ConfigKey::Host.to_string())
        .long(ConfigKey::Host.to_string())
        .env("KOKORO_HOST")
        .num_args(1)
        .help(format!(
            "Address for the API server to bind. [default: {}]",
            Config::default(ConfigKey::Host)
        ))
        .global(true);
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("KOKORO_MODEL")
        .num_args(1)
        .help(format!(
            "The Gemini model used to generate counselor replies. [default: {}]",
            Config::default(ConfigKey::Model)
        ))
        .global(true);
}

fn arg_port() -> Arg {
    return Arg::new(ConfigKey::Port.to_string())
        .short('p')
        .long(ConfigKey::Port.to_string())
        .env("KOKORO_PORT")
        .num_args(1)
        .help(format!(
            "Port for the API server to listen on. [default: {}]",
            Config::default(ConfigKey::Port)
        ))
        .global(true);
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .long(ConfigKey::ServerURL.to_string())
        .env("KOKORO_SERVER_URL")
        .num_args(1)
        .help(format!(
            "Base URL of a running kokoro server, used by the terminal client. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ))
        .global(true);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .required(true)
                .value_parser(value_parser!(Shell)),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(Command::new("create").about(
            "Saves the default config file to the configuration file path. This command will fail if the file exists already.",
        ))
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout."),
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file."),
        );
}

fn subcommand_serve() -> Command {
    return Command::new("serve").about("Starts the counseling room API server.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Starts a counseling session in the terminal.");
}

pub fn build() -> Command {
    let commands_text = repl::help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return format!("CHAT {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    return Command::new("kokoro")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(true)
        .subcommand(subcommand_serve())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(arg_config_file())
        .arg(arg_access_password())
        .arg(arg_backend_timeout())
        .arg(arg_gemini_token())
        .arg(arg_host())
        .arg(arg_model())
        .arg(arg_port())
        .arg(arg_server_url());
}

pub async fn parse() -> Result<Option<AppMode>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("serve", subcommand_matches)) => {
            Config::load(build(), vec![&matches, subcommand_matches]).await?;
            return Ok(Some(AppMode::Serve));
        }
        Some(("chat", subcommand_matches)) => {
            Config::load(build(), vec![&matches, subcommand_matches]).await?;
            return Ok(Some(AppMode::Chat));
        }
        Some(("completions", subcommand_matches)) => {
            if let Some(completions) = subcommand_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcommand_matches)) => {
            match subcommand_matches.subcommand() {
                Some(("create", _)) => {
                    create_config_file().await?;
                }
                Some(("default", _)) => {
                    println!("{}", Config::serialize_default(build()));
                }
                Some(("path", _)) => {
                    println!("{}", Config::default(ConfigKey::ConfigFile));
                }
                _ => {
                    subcommand_config().print_long_help()?;
                }
            }
            return Ok(None);
        }
        _ => {
            return Ok(None);
        }
    }
}
