use std::io::{self, Read as _, Write as _};

use base64::Engine;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use jws_cipher::keys::SigningKey;
use jws_cipher::serialize::deserialize_token;
use jws_cipher::SigningCipher;

#[derive(Parser)]
#[command(name = "jws-cipher", about = "HS512 signed tokens in JWS compact form")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect a token: decode its segments and display them as JSON.
    /// Does not check the signature.
    Inspect {
        /// Compact token. If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Sign a payload and print the compact token.
    Sign {
        #[command(flatten)]
        key: KeyArgs,

        /// Payload text. If omitted, reads raw bytes from stdin.
        #[arg(short, long)]
        payload: Option<String>,
    },

    /// Verify a token and print the signed payload.
    Verify {
        #[command(flatten)]
        key: KeyArgs,

        /// Compact token. If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,

        /// Output format for the recovered payload.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
        output: OutputFormat,
    },

    /// Generate a random 64-byte signing key. Outputs the key as hex and
    /// its fingerprint.
    GenerateKey,
}

#[derive(Args)]
struct KeyArgs {
    /// Key file path. Raw key bytes (or hex with --hex-key). Takes precedence
    /// over --secret.
    #[arg(short, long)]
    key: Option<String>,

    /// Interpret the key file as hex-encoded.
    #[arg(long, default_value_t = false, requires = "key")]
    hex_key: bool,

    /// Signing secret. Its UTF-8 bytes are the key.
    #[arg(long, env = "JWS_CIPHER_SECRET", hide_env_values = true)]
    secret: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Payload bytes as-is.
    Raw,
    /// JSON object with the payload as base64 and, when valid, UTF-8 text.
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect { token } => cmd_inspect(token),
        Command::Sign { key, payload } => cmd_sign(&key, payload),
        Command::Verify { key, token, output } => cmd_verify(&key, token, output),
        Command::GenerateKey => cmd_generate_key(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn cmd_inspect(token_arg: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let token = read_token(token_arg)?;
    let decoded = deserialize_token(token.as_bytes())?;

    let output = serde_json::json!({
        "header": decoded.header,
        "payload_base64": decoded.payload,
        "signature_hex": hex::encode(&decoded.signature),
        "total_bytes": token.len(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_sign(key_args: &KeyArgs, payload_arg: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cipher = SigningCipher::with_key(load_key(key_args)?);

    let payload = match payload_arg {
        Some(s) => s.into_bytes(),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let token = cipher.sign(&payload)?;
    println!("{}", String::from_utf8(token)?);
    Ok(())
}

fn cmd_verify(
    key_args: &KeyArgs,
    token_arg: Option<String>,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let cipher = SigningCipher::with_key(load_key(key_args)?);
    let token = read_token(token_arg)?;

    let payload = cipher
        .verify(token.as_bytes())?
        .ok_or("signature mismatch")?;

    match output {
        OutputFormat::Raw => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&payload)?;
            stdout.flush()?;
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "payload_base64": base64::engine::general_purpose::STANDARD.encode(&payload),
                "payload_utf8": std::str::from_utf8(&payload).ok(),
                "payload_len": payload.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn cmd_generate_key() -> Result<(), Box<dyn std::error::Error>> {
    let key = SigningKey::generate();

    let output = serde_json::json!({
        "key_hex": hex::encode(key.as_bytes()),
        "fingerprint_hex": hex::encode(key.fingerprint()),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Read a token from a CLI argument or stdin, trimming surrounding whitespace.
fn read_token(token_arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    let input = match token_arg {
        Some(s) => s,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(input.trim().to_string())
}

/// Resolve the signing key from --key or --secret / JWS_CIPHER_SECRET.
fn load_key(args: &KeyArgs) -> Result<SigningKey, Box<dyn std::error::Error>> {
    match (&args.key, &args.secret) {
        (Some(path), _) => {
            let raw = std::fs::read(path)?;
            if args.hex_key {
                let hex_str =
                    String::from_utf8(raw).map_err(|_| "hex key file is not valid UTF-8")?;
                Ok(SigningKey::from_bytes(&hex::decode(hex_str.trim())?))
            } else {
                Ok(SigningKey::from_bytes(&raw))
            }
        }
        (None, Some(secret)) => Ok(SigningKey::from_secret(secret)),
        (None, None) => {
            Err("no signing key: pass --key <file> or --secret (or set JWS_CIPHER_SECRET)".into())
        }
    }
}
