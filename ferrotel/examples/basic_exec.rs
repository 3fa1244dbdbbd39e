//! Basic example: log into a Telnet host and run a few commands
//!
//! # Prerequisites
//!
//! - Telnet server reachable from this machine (port 23)
//! - Valid credentials
//! - A shell prompt shaped like `user@host:path$` (or pass `--prompt`)
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_exec -- --host 192.168.1.1 --user admin --password secret
//! ```

use std::env;
use std::time::Duration;

use ferrotel::SessionBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Connecting to {}:{}...", args.host, args.port);

    let mut builder = SessionBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .password(&args.password)
        .timeout(Duration::from_secs(args.timeout));

    if let Some(prompt) = &args.prompt {
        builder = builder.banner_pattern(prompt);
    }

    let mut session = builder.build()?;

    session.open().await?;
    println!("Logged in!");

    println!("\nExecuting: ls -la");
    println!("{}", "-".repeat(50));
    let output = session.execute("ls", &["-la"]).await?;
    println!("{}", String::from_utf8_lossy(&output));
    println!("{}", "-".repeat(50));

    let response = session.send_command("uname -a").await?;
    println!("System: {}", response.result.trim());
    println!("Command completed in {:?}", response.elapsed);

    println!("\nClosing connection...");
    session.close().await?;
    println!("Done!");

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: String,
    prompt: Option<String>,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "localhost".to_string();
        let mut port = 23u16;
        let mut user = env::var("USER").unwrap_or_else(|_| "root".to_string());
        let mut password = String::new();
        let mut prompt = None;
        let mut timeout = 10u64;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().unwrap_or(23);
                    }
                }
                "--user" | "-u" => {
                    i += 1;
                    if i < args.len() {
                        user = args[i].clone();
                    }
                }
                "--password" | "-P" => {
                    i += 1;
                    if i < args.len() {
                        password = args[i].clone();
                    }
                }
                "--prompt" => {
                    i += 1;
                    if i < args.len() {
                        prompt = Some(args[i].clone());
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(10);
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            host,
            port,
            user,
            password,
            prompt,
            timeout,
        }
    }

    fn print_help() {
        println!(
            r#"ferrotel basic_exec example

USAGE:
    cargo run --example basic_exec -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Target host [default: localhost]
    -p, --port <PORT>        Telnet port [default: 23]
    -u, --user <USER>        Login [default: $USER]
    -P, --password <PASS>    Password
    --prompt <REGEX>         Shell prompt regex [default: user@host:path$ or #]
    -t, --timeout <SECS>     Read timeout [default: 10]
    --help                   Print this help message

EXAMPLES:
    # Log into a home router
    cargo run --example basic_exec -- --host 192.168.1.1 --user admin --password secret

    # A switch with a plain "switch#" prompt
    cargo run --example basic_exec -- --host switch --user admin --password secret --prompt 'switch[>#]'
"#
        );
    }
}
