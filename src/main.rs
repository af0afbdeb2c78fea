//! sealed-text - password-based text encryption.
//!
//! Encrypts text into a portable base64 artifact and back.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sealed_text::config::argon2_params;
use sealed_text::{
    Artifact, CipherSession, Error, FileInputStore, InputStore, KdfParams, Sealer, ToolConfig,
};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "sealed-text")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Password-based authenticated text encryption",
    long_about = "Encrypts text with AES-256-GCM under a passphrase-derived key and emits base64(salt || nonce || ciphertext || tag)."
)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Key derivation function (default: pbkdf2)
    #[arg(long, global = true, value_enum)]
    kdf: Option<KdfChoice>,

    /// KDF iteration count (PBKDF2 rounds or Argon2id time cost)
    #[arg(long, global = true)]
    iterations: Option<u32>,

    /// Read the passphrase from this environment variable instead of prompting
    #[arg(long, global = true, value_name = "VAR")]
    passphrase_env: Option<String>,

    /// Remember the input text (never the passphrase) for `last`
    #[arg(long, global = true)]
    remember: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KdfChoice {
    Pbkdf2,
    Argon2id,
}

#[derive(Args)]
struct InputArgs {
    /// Text given directly on the command line
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text into an artifact
    Encrypt {
        #[command(flatten)]
        source: InputArgs,
    },

    /// Decrypt an artifact back into text
    Decrypt {
        #[command(flatten)]
        source: InputArgs,
    },

    /// Show an artifact's salt, nonce and sizes without decrypting
    Inspect {
        #[command(flatten)]
        source: InputArgs,
    },

    /// Print the remembered input
    Last,

    /// Forget the remembered input
    Forget,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_logging(&config.log_level)?;
    debug!(kdf = config.kdf.name(), "configuration loaded");

    match cli.command {
        Commands::Encrypt { ref source } => cmd_encrypt(&cli, &config, source),
        Commands::Decrypt { ref source } => cmd_decrypt(&cli, &config, source),
        Commands::Inspect { ref source } => cmd_inspect(source),
        Commands::Last => cmd_last(&config),
        Commands::Forget => cmd_forget(&config),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ToolConfig> {
    let mut config = match &cli.config {
        Some(path) => ToolConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ToolConfig::default(),
    };

    config.kdf = resolve_kdf(config.kdf, cli.kdf, cli.iterations);
    config.remember_last_input |= cli.remember;
    config.validate()?;
    Ok(config)
}

fn resolve_kdf(base: KdfParams, choice: Option<KdfChoice>, iterations: Option<u32>) -> KdfParams {
    let kdf = match (choice, base) {
        (None, base) => base,
        (Some(KdfChoice::Pbkdf2), base @ KdfParams::Pbkdf2Sha256 { .. }) => base,
        (Some(KdfChoice::Pbkdf2), _) => KdfParams::default(),
        (Some(KdfChoice::Argon2id), base @ KdfParams::Argon2id { .. }) => base,
        (Some(KdfChoice::Argon2id), _) => KdfParams::argon2id(),
    };

    match (kdf, iterations) {
        (KdfParams::Pbkdf2Sha256 { .. }, Some(n)) => KdfParams::pbkdf2(n),
        (
            KdfParams::Argon2id {
                memory_kib,
                parallelism,
                ..
            },
            Some(n),
        ) => KdfParams::Argon2id {
            memory_kib,
            iterations: n,
            parallelism,
        },
        (kdf, None) => kdf,
    }
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

fn session(config: &ToolConfig) -> anyhow::Result<CipherSession<FileInputStore>> {
    let sealer = Sealer::new(config.kdf)?;
    if !config.remember_last_input {
        return Ok(CipherSession::new(sealer));
    }
    match config.resolved_store_path() {
        Some(path) => Ok(CipherSession::with_store(sealer, FileInputStore::new(path))),
        None => {
            warn!("no state directory available, input will not be remembered");
            Ok(CipherSession::new(sealer))
        }
    }
}

fn store(config: &ToolConfig) -> anyhow::Result<FileInputStore> {
    match config.resolved_store_path() {
        Some(path) => Ok(FileInputStore::new(path)),
        None => bail!("no state directory: set HOME, XDG_STATE_HOME or store_path"),
    }
}

fn read_source(source: &InputArgs) -> anyhow::Result<String> {
    match (&source.text, &source.input) {
        (Some(text), None) => Ok(text.clone()),
        (None, Some(path)) => read_file(path),
        (None, None) => {
            if io::stdin().is_terminal() {
                return Err(Error::InvalidInput(
                    "no input given: use --text, --input or pipe to stdin".to_string(),
                )
                .into());
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.ends_with('\n') {
                buffer.pop();
                if buffer.ends_with('\r') {
                    buffer.pop();
                }
            }
            Ok(buffer)
        }
        (Some(_), Some(_)) => unreachable!(),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_passphrase(cli: &Cli, confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Some(var) = &cli.passphrase_env {
        let value = std::env::var(var)
            .with_context(|| format!("environment variable {} is not set", var))?;
        return Ok(Zeroizing::new(value));
    }

    let passphrase = Zeroizing::new(rpassword::prompt_password("Passphrase: ")?);
    if confirm {
        let again = Zeroizing::new(rpassword::prompt_password("Confirm passphrase: ")?);
        if *passphrase != *again {
            bail!("passphrases do not match");
        }
    }
    Ok(passphrase)
}

fn cmd_encrypt(cli: &Cli, config: &ToolConfig, source: &InputArgs) -> anyhow::Result<()> {
    let plaintext = Zeroizing::new(read_source(source)?);
    let passphrase = read_passphrase(cli, true)?;

    let artifact = session(config)?.encrypt(&plaintext, &passphrase)?;
    println!("{}", artifact);

    Ok(())
}

fn cmd_decrypt(cli: &Cli, config: &ToolConfig, source: &InputArgs) -> anyhow::Result<()> {
    let text = read_source(source)?;
    let passphrase = read_passphrase(cli, false)?;

    let plaintext = Zeroizing::new(session(config)?.decrypt(&text, &passphrase)?);
    println!("{}", plaintext.as_str());

    Ok(())
}

fn cmd_inspect(source: &InputArgs) -> anyhow::Result<()> {
    let artifact = Artifact::decode(&read_source(source)?)?;

    println!("Artifact");
    println!("========");
    println!("Size:             {} bytes", artifact.size());
    println!("Salt:             {}", hex::encode(artifact.salt()));
    println!("Nonce:            {}", hex::encode(artifact.nonce()));
    println!("Ciphertext + tag: {} bytes", artifact.ciphertext().len());
    match artifact.plaintext_len() {
        Some(len) => println!("Plaintext:        {} bytes", len),
        None => println!("Plaintext:        (truncated, tag missing)"),
    }
    println!(
        "Default KDF:      pbkdf2-sha256 ({} iterations) or argon2id (m={} KiB, t={}, p={})",
        sealed_text::config::DEFAULT_PBKDF2_ITERATIONS,
        argon2_params::MEMORY_COST,
        argon2_params::TIME_COST,
        argon2_params::PARALLELISM
    );

    Ok(())
}

fn cmd_last(config: &ToolConfig) -> anyhow::Result<()> {
    match store(config)?.load_last_input()? {
        Some(input) => println!("{}", input),
        None => println!("(no remembered input)"),
    }
    Ok(())
}

fn cmd_forget(config: &ToolConfig) -> anyhow::Result<()> {
    let mut store = store(config)?;
    store.clear()?;
    println!("Forgot {}", store.path().display());
    Ok(())
}
