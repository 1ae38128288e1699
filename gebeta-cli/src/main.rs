//! Gebeta CLI Tool
//!
//! Command line interface for the Gebeta Maps routing API

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gebeta_core::config::loader::{load_config, load_config_from_path, DEFAULT_CONFIG_PATH};
use gebeta_core::{ClientConfig, GeoPoint, MapError};
use gebeta_routing::MapSdk;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const API_KEY_ENV: &str = "GEBETA_API_KEY";

#[derive(Parser)]
#[command(name = "gebeta")]
#[command(about = "A CLI tool for the Gebeta Maps routing API")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ClientArgs {
    /// Path to configuration file (defaults to ./gebeta.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,
    /// API key (overrides the config file and GEBETA_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Enable verbose logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration file
    ValidateConfig,
    /// Fetch directions between two points
    Directions {
        /// Origin as "lat,lon"
        #[arg(long, value_parser = parse_point)]
        origin: GeoPoint,
        /// Destination as "lat,lon"
        #[arg(long, value_parser = parse_point)]
        destination: GeoPoint,
        /// Waypoint as "lat,lon", may be repeated
        #[arg(long = "waypoint", value_parser = parse_point)]
        waypoints: Vec<GeoPoint>,
        /// Include turn-by-turn instructions
        #[arg(long)]
        instruction: bool,
    },
    /// Fetch a distance matrix for a set of points
    Matrix {
        /// Location as "lat,lon", may be repeated
        #[arg(long = "location", value_parser = parse_point, required = true)]
        locations: Vec<GeoPoint>,
    },
    /// Fetch one-to-many routes from an origin
    Onm {
        /// Origin as "lat,lon"
        #[arg(long, value_parser = parse_point)]
        origin: GeoPoint,
        /// Location as "lat,lon", may be repeated
        #[arg(long = "location", value_parser = parse_point, required = true)]
        locations: Vec<GeoPoint>,
    },
    /// Fetch an optimized visiting order for a set of points
    Optimize {
        /// Location as "lat,lon", may be repeated
        #[arg(long = "location", value_parser = parse_point, required = true)]
        locations: Vec<GeoPoint>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.client.debug);

    let config = resolve_config(&cli.client)?;

    if let Commands::ValidateConfig = cli.command {
        match MapSdk::new(config.clone()) {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!("  - base url: {}", config.base_url());
                println!("  - timeout: {} ms", config.timeout_ms());
                println!("  - {} custom headers", config.headers.len());
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let sdk = match MapSdk::new(config) {
        Ok(sdk) => sdk,
        Err(e) => exit_with(e),
    };
    let service = sdk.service();

    let result = match cli.command {
        Commands::ValidateConfig => return Ok(()),
        Commands::Directions {
            origin,
            destination,
            waypoints,
            instruction,
        } => {
            service
                .get_directions(&origin, &destination, &waypoints, instruction)
                .await
        }
        Commands::Matrix { locations } => service.get_route_matrix(&locations).await,
        Commands::Onm { origin, locations } => service.get_route_onm(&origin, &locations).await,
        Commands::Optimize { locations } => service.get_route_optimization(&locations).await,
    };

    match result {
        Ok(body) => print_json(&body)?,
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "gebeta=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// 配置优先级：命令行参数 > 环境变量 > 配置文件
fn resolve_config(args: &ClientArgs) -> Result<ClientConfig> {
    resolve_config_with_env(args, std::env::var(API_KEY_ENV).ok())
}

fn resolve_config_with_env(args: &ClientArgs, env_key: Option<String>) -> Result<ClientConfig> {
    let mut config = load_file_config(args.config.as_deref())?;

    if let Some(api_key) = args
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
        .or_else(|| env_key.filter(|key| !key.is_empty()))
    {
        config.api_key = api_key;
    }
    if let Some(timeout) = args.timeout {
        config.timeout = Some(timeout);
    }
    if args.debug {
        config.debug = true;
    }

    Ok(config)
}

fn load_file_config(path: Option<&str>) -> Result<ClientConfig> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path);
            load_config_from_path(path)
        }
        None => {
            let config = load_config()?;
            if config.is_some() {
                debug!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            }
            Ok(config.unwrap_or_default())
        }
    }
}

fn parse_point(raw: &str) -> std::result::Result<GeoPoint, String> {
    let (latitude, longitude) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected \"lat,lon\", got \"{}\"", raw))?;
    let latitude: f64 = latitude
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude \"{}\": {}", latitude.trim(), e))?;
    let longitude: f64 = longitude
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude \"{}\": {}", longitude.trim(), e))?;
    Ok(GeoPoint::new(latitude, longitude))
}

fn print_json(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

fn exit_with(error: MapError) -> ! {
    let rendered =
        serde_json::to_string_pretty(&error.to_json()).unwrap_or_else(|_| error.to_string());
    eprintln!("❌ {}", rendered);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("9.03,38.74").unwrap(), GeoPoint::new(9.03, 38.74));
        assert_eq!(parse_point(" -1 , 2.5 ").unwrap(), GeoPoint::new(-1.0, 2.5));
        assert!(parse_point("9.03").is_err());
        assert!(parse_point("north,38.74").is_err());
    }

    #[test]
    fn test_parse_matrix_command() {
        let cli = Cli::try_parse_from([
            "gebeta",
            "--api-key",
            "foo-key",
            "matrix",
            "--location",
            "1,1",
            "--location",
            "2,2",
        ])
        .unwrap();

        assert_eq!(cli.client.api_key.as_deref(), Some("foo-key"));
        match cli.command {
            Commands::Matrix { locations } => {
                assert_eq!(locations, vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)]);
            }
            _ => panic!("expected matrix command"),
        }
    }

    #[test]
    fn test_resolve_config_flag_overrides() {
        let args = ClientArgs {
            config: None,
            api_key: Some("flag-key".to_string()),
            timeout: Some(1500),
            debug: true,
        };
        let config = resolve_config_with_env(&args, Some("env-key".to_string())).unwrap();
        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.timeout_ms(), 1500);
        assert!(config.debug);
    }

    fn write_config(name: &str, contents: &str) -> String {
        let file_name = format!("gebeta-cli-{}-{}.toml", name, std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn file_args(path: &str) -> ClientArgs {
        ClientArgs {
            config: Some(path.to_string()),
            api_key: None,
            timeout: None,
            debug: false,
        }
    }

    #[test]
    fn test_env_key_fills_keyless_config_file() {
        let path = write_config("keyless", "timeout = 1000\n");
        let env_key = Some("env-key".to_string());
        let config = resolve_config_with_env(&file_args(&path), env_key).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.timeout_ms(), 1000);
        assert!(MapSdk::new(config).is_ok());
    }

    #[test]
    fn test_flag_key_fills_keyless_config_file() {
        let path = write_config("keyless-flag", "timeout = 1000\n");
        let mut args = file_args(&path);
        args.api_key = Some("flag-key".to_string());
        let config = resolve_config_with_env(&args, None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api_key, "flag-key");
    }

    #[test]
    fn test_env_key_overrides_file_key() {
        let path = write_config("keyed", "api_key = \"file-key\"\n");
        let env_key = Some("env-key".to_string());
        let with_env = resolve_config_with_env(&file_args(&path), env_key).unwrap();
        let without_env = resolve_config_with_env(&file_args(&path), None).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(with_env.api_key, "env-key");
        assert_eq!(without_env.api_key, "file-key");
    }

    #[test]
    fn test_keyless_config_still_fails_validation() {
        let path = write_config("no-key-anywhere", "timeout = 1000\n");
        let config = resolve_config_with_env(&file_args(&path), None).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = MapSdk::new(config).err().unwrap();
        assert_eq!(err.message(), "API key is required");
    }

    #[test]
    fn test_default_config_file_absent() {
        // crate 目录下没有 gebeta.toml
        let config = load_file_config(None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
