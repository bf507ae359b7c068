//! Interactive demo: run as the server or as a client.
//!
//! Configuration comes from the TOML file named by `PACKET_WIRE_CONFIG`, or
//! from `PACKET_WIRE_*` environment variables when that is unset.

use std::net::{IpAddr, SocketAddr};

use packet_wire::config::NetworkConfig;
use packet_wire::error::Result;
use packet_wire::service::demo::{connect_client, demo_characters, run_client_on, run_server};
use packet_wire::transport::tcp::resolve;
use packet_wire::utils::logging::init_logging;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Demo failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = match std::env::var("PACKET_WIRE_CONFIG") {
        Ok(path) => NetworkConfig::from_file(path)?,
        Err(_) => NetworkConfig::from_env()?,
    };
    config.validate_strict()?;
    init_logging(&config.logging)?;

    let mut lines = BufReader::new(io::stdin()).lines();

    let answer = prompt(
        &mut lines,
        "Do you want to be the server ('s') or a client ('c') ? ",
    )
    .await?;

    if answer.starts_with('s') {
        run_server(&config).await?;
        let (first, second) = demo_characters();
        println!("Character sent to the client (regular packet) :\n{first}");
        println!("Character sent to the client (transformed packet) :\n{second}");
    } else {
        let address = ask_server_address(&mut lines, &config).await?;
        let server = connect_client(&config, &address).await?;
        println!("Connected to server {}", server.peer_addr());
        let report = run_client_on(server).await?;
        if let Some(character) = report.regular {
            println!("Character received from the server (regular packet) :\n{character}");
        }
        if let Some(character) = report.transformed {
            println!("Character received from the server (transformed packet) :\n{character}");
        }
    }

    Ok(())
}

/// Ask until the answer resolves. An empty answer picks the configured address.
async fn ask_server_address(
    lines: &mut Lines<BufReader<Stdin>>,
    config: &NetworkConfig,
) -> Result<String> {
    loop {
        let answer = prompt(
            lines,
            &format!(
                "Type address or name of the server to connect to [{}] : ",
                config.client.address
            ),
        )
        .await?;

        let address = if answer.is_empty() {
            config.client.address.clone()
        } else {
            let port = config
                .client
                .address
                .rsplit_once(':')
                .map(|(_, port)| port)
                .unwrap_or_default();
            with_default_port(&answer, port)
        };

        if resolve(&address).await.is_ok() {
            return Ok(address);
        }
        println!("Cannot resolve '{address}'");
    }
}

/// Append `port` unless `answer` already names one. Bare IPv6 literals get brackets.
fn with_default_port(answer: &str, port: &str) -> String {
    if let Ok(ip) = answer.parse::<IpAddr>() {
        return match port.parse::<u16>() {
            Ok(port) => SocketAddr::new(ip, port).to_string(),
            Err(_) => answer.to_string(),
        };
    }
    if answer.contains(':') {
        answer.to_string()
    } else {
        format!("{answer}:{port}")
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, question: &str) -> Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    match lines.next_line().await? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()),
    }
}
