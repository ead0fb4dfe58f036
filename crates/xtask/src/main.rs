mod cmd;

#[derive(Debug, thiserror::Error)]
enum XtaskError {
    #[error("usage: xtask <command> ...")]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid --filter pattern: {0}")]
    Filter(#[from] regex::Error),
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] fla_codec::Error),
    #[error("verification failed:\n{0}")]
    VerifyFailed(String),
    #[error("golden update failed:\n{0}")]
    GoldenUpdateFailed(String),
}

fn print_help(topic: Option<&str>) {
    if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
        println!("usage: xtask {topic} ...");
        println!();
        println!("See: `crates/xtask/src/main.rs` for the full argument grammar.");
        return;
    }

    println!("usage: xtask <command> ...");
    println!();
    println!("Commands:");
    println!("  update-goldens [--filter <regex>]");
    println!("  verify-goldens [--filter <regex>]");
    println!(
        "  encode-edges <edges> [--profile <version|file.json>] [--styles <s,f0,f1>] [--replay]"
    );
    println!("  print-profile [<version>]");
    println!();
    println!("Tips:");
    println!("  - `cargo run -p xtask -- encode-edges '!0 0|10 0|10 10' --profile mx --replay`");
    println!("  - set `RUST_LOG=debug` to trace stream writes");
    println!();
    println!("Topics:");
    println!("  xtask help <command>");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<(), XtaskError> {
    let mut args = std::env::args().skip(1);
    let Some(cmd_name) = args.next() else {
        return Err(XtaskError::Usage);
    };

    if matches!(cmd_name.as_str(), "--help" | "-h") {
        print_help(None);
        return Ok(());
    }
    if cmd_name == "help" {
        print_help(args.next().as_deref());
        return Ok(());
    }

    init_tracing();
    match cmd_name.as_str() {
        "update-goldens" => cmd::update_goldens(args.collect()),
        "verify-goldens" => cmd::verify_goldens(args.collect()),
        "encode-edges" => cmd::encode_edges(args.collect()),
        "print-profile" => cmd::print_profile(args.collect()),
        other => Err(XtaskError::UnknownCommand(other.to_string())),
    }
}
