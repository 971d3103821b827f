use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hillcipher::cli::{decrypt_text, encrypt_text, show_info, CipherOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("HILL_VERSION");
const BUILD: &str = env!("HILL_BUILD");
const PROFILE: &str = env!("HILL_PROFILE");
const GIT_HASH: &str = env!("HILL_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "hill")]
#[command(about = "Hill cipher: block encryption by key matrix multiplication", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CipherArgs {
    /// JSON configuration file with scheme, block_size and key
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alphabet, in residue order (default A-Z)
    #[arg(long)]
    scheme: Option<String>,

    /// Symbols per block (default 3)
    #[arg(long)]
    block_size: Option<usize>,

    /// Key of block_size^2 symbols
    #[arg(long)]
    key: Option<String>,
}

impl From<CipherArgs> for CipherOptions {
    fn from(args: CipherArgs) -> Self {
        CipherOptions {
            config: args.config,
            scheme: args.scheme,
            block_size: args.block_size,
            key: args.key,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text
    #[command(alias = "e")]
    Encrypt {
        #[command(flatten)]
        cipher: CipherArgs,

        /// Plaintext over the scheme's symbols
        text: String,
    },

    /// Decrypt text
    #[command(alias = "d")]
    Decrypt {
        #[command(flatten)]
        cipher: CipherArgs,

        /// Ciphertext over the scheme's symbols
        text: String,
    },

    /// Show the scheme, key matrix and its inverse
    #[command(alias = "i")]
    Info {
        #[command(flatten)]
        cipher: CipherArgs,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Encrypt { cipher, text } => {
            let options = CipherOptions::from(cipher);
            let ciphertext = encrypt_text(&text, &options).context("encryption failed")?;
            Ok(format!("{}\n", ciphertext))
        }
        Commands::Decrypt { cipher, text } => {
            let options = CipherOptions::from(cipher);
            let plaintext = decrypt_text(&text, &options).context("decryption failed")?;
            Ok(format!("{}\n", plaintext))
        }
        Commands::Info { cipher } => {
            let options = CipherOptions::from(cipher);
            Ok(show_info(&options)?)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("hill {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(&cli.log_level);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    match run(command) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
