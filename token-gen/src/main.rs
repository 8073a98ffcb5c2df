use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use sha2::{Digest, Sha256};

/// Mint an Approov-style token (HS256 JWS) for exercising the API locally.
///
/// - Signs with the same base64 secret the server reads from APPROOV_BASE64_SECRET
/// - Always sets `exp`
/// - With `--bind`, adds `pay` = base64(SHA-256(<bind value>)), which the server
///   compares against the binding header (Authorization by default)
#[derive(Parser, Debug)]
#[command(name = "approov-token-gen", version, about)]
struct Args {
    /// Base64 encoded shared secret
    #[arg(long, env = "APPROOV_BASE64_SECRET", hide_env_values = true)]
    secret: String,

    /// Token lifetime in seconds (ignored when --exp is given)
    #[arg(long, default_value_t = 3600)]
    ttl: i64,

    /// Override exp (unix seconds). Use a past value to get an expired token.
    #[arg(long)]
    exp: Option<i64>,

    /// Binding header value, e.g. "Bearer xyz". Adds the `pay` claim.
    #[arg(long)]
    bind: Option<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn binding_hash(value: &str) -> String {
    STANDARD.encode(Sha256::digest(value.as_bytes()))
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let secret = STANDARD.decode(args.secret.trim())?;
    if secret.is_empty() {
        return Err("secret decodes to zero bytes".into());
    }

    let exp = args.exp.unwrap_or_else(|| now_unix() + args.ttl);
    let pay = args.bind.as_deref().map(binding_hash);

    let mut claims = serde_json::Map::new();
    claims.insert("exp".to_string(), serde_json::Value::Number(exp.into()));
    if let Some(pay) = pay.clone() {
        claims.insert("pay".to_string(), serde_json::Value::String(pay));
    }

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    let token = jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(&secret))?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("approov-token: {}", token);
    println!("exp: {}", exp);
    match pay {
        Some(pay) => println!("pay: {}", pay),
        None => println!("pay: (none)"),
    }

    Ok(())
}
