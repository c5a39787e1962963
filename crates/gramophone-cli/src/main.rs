// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gramophone_config::{load as load_config, AppConfig};
use gramophone_musicbrainz::{ClientIdentity, MusicBrainzClient, RetryPolicy};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Query the MusicBrainz web service and print the result as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Contact URL or email sent to MusicBrainz (overrides the configuration file)
    #[arg(long, env = "GRAMOPHONE_CONTACT", global = true)]
    contact: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Look up a recording by MBID
    Recording { mbid: String },
    /// Look up a work by MBID
    Work { mbid: String },
    /// List recordings sharing an ISRC
    Isrc { code: String },
    /// List works sharing an ISWC
    Iswc { code: String },
    /// Look up an artist by MBID
    Artist { mbid: String },
    /// Search artists by name
    SearchArtist {
        name: String,
        /// ISO 3166-1 country code to filter on
        #[arg(long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let client = build_client(&config, cli.contact.as_deref())?;
    let output = run(&client, &cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &AppConfig, contact: Option<&str>) -> Result<MusicBrainzClient> {
    let mb = &config.musicbrainz;
    let contact = contact
        .or(mb.contact.as_deref())
        .unwrap_or_default();

    let mut builder = MusicBrainzClient::builder()
        .base_url(mb.base_url.clone())
        .identity(ClientIdentity::new(&mb.app_name, &mb.app_version, contact))
        .connect_timeout(config.http.connect_timeout())
        .timeout(config.http.request_timeout());

    if config.retry.is_enabled() {
        debug!(target: "cli", attempts = config.retry.attempts, "retry enabled");
        builder = builder.retry(RetryPolicy::new(config.retry.attempts, config.retry.delay()));
    }

    builder.build().context("failed to build MusicBrainz client")
}

async fn run(client: &MusicBrainzClient, command: &Command) -> Result<String> {
    info!(target: "cli", "running {:?}", command);

    match command {
        Command::Recording { mbid } => render(&client.get_recording(mbid).await?),
        Command::Work { mbid } => render(&client.get_work(mbid).await?),
        Command::Isrc { code } => render(&client.get_recordings_by_isrc(code).await?),
        Command::Iswc { code } => render(&client.get_works_by_iswc(code).await?),
        Command::Artist { mbid } => render(&client.get_artist(mbid).await?),
        Command::SearchArtist { name, country } => {
            render(&client.search_artist(name, country.as_deref()).await?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use gramophone_musicbrainz::{Artist, MusicBrainzError};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_artist_with_country() {
        let cli = Cli::try_parse_from([
            "gramophone",
            "search-artist",
            "Nirvana",
            "--country",
            "US",
            "--contact",
            "me@example.com",
        ])
        .unwrap();

        assert_eq!(cli.contact.as_deref(), Some("me@example.com"));
        assert_eq!(
            cli.command,
            Command::SearchArtist {
                name: "Nirvana".to_string(),
                country: Some("US".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_lookup_requires_identifier() {
        assert!(Cli::try_parse_from(["gramophone", "recording"]).is_err());
    }

    #[test]
    fn test_build_client_uses_config_identity() {
        let mut config = AppConfig::default();
        config.musicbrainz.contact = Some("file@example.com".to_string());

        let client = build_client(&config, None).unwrap();
        let expected = format!(
            "gramophone/{} (file@example.com)",
            config.musicbrainz.app_version
        );
        assert_eq!(client.user_agent(), Some(expected.as_str()));
    }

    #[test]
    fn test_build_client_contact_flag_wins() {
        let mut config = AppConfig::default();
        config.musicbrainz.contact = Some("file@example.com".to_string());

        let client = build_client(&config, Some("flag@example.com")).unwrap();
        assert!(client.user_agent().unwrap().ends_with("(flag@example.com)"));
    }

    #[tokio::test]
    async fn test_missing_contact_is_reported_before_network() {
        let mut config = AppConfig::default();
        config.musicbrainz.base_url = "http://127.0.0.1:9".to_string();

        let client = build_client(&config, None).unwrap();
        assert!(client.user_agent().is_none());

        let err = run(&client, &Command::Artist { mbid: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MusicBrainzError>(),
            Some(MusicBrainzError::NotConfigured)
        ));
    }

    #[test]
    fn test_render_pretty_json() {
        let artist = Artist {
            id: "a".into(),
            name: "Nirvana".into(),
            ..Artist::default()
        };
        let json = render(&artist).unwrap();
        assert!(json.contains("\"name\": \"Nirvana\""));
        assert!(json.contains("\"sort-name\": \"\""));
    }
}
