//! Server configuration
//!
//! Every option can come from a flag or an environment variable (and so from
//! `.env`, which is loaded before parsing).

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_JWT_SECRET: &str = "default_secret";
pub const MAX_TOKEN_TTL_HOURS: i64 = 876_000;

#[derive(Parser, Debug, Clone)]
#[command(name = "carebridge")]
#[command(about = "Health tracking API: accounts, dashboard, doctors, symptom checker")]
pub struct Config {
    /// Address to listen on
    #[arg(long = "bind", env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// HMAC secret for signing bearer tokens
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Token lifetime in hours (at most 100 years); tokens never expire when unset
    #[arg(long, env = "TOKEN_TTL_HOURS",
          value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_HOURS))]
    pub token_ttl_hours: Option<i64>,

    /// bcrypt work factor for password hashes
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST,
          value_parser = clap::value_parser!(u32).range(4..=31))]
    pub bcrypt_cost: u32,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Config {
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["carebridge"]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_flags_override() {
        let config = Config::try_parse_from([
            "carebridge",
            "--bind",
            "127.0.0.1:9000",
            "--jwt-secret",
            "s3cret",
            "--token-ttl-hours",
            "24",
            "--bcrypt-cost",
            "6",
            "--static-dir",
            "/srv/www",
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!config.uses_default_secret());
        assert_eq!(config.token_ttl_hours, Some(24));
        assert_eq!(config.bcrypt_cost, 6);
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Config::try_parse_from(["carebridge", "--bcrypt-cost", "2"]).is_err());
        assert!(Config::try_parse_from(["carebridge", "--token-ttl-hours", "0"]).is_err());
        assert!(Config::try_parse_from(["carebridge", "--token-ttl-hours", "876001"]).is_err());
        assert!(
            Config::try_parse_from(["carebridge", "--token-ttl-hours", "9223372036854775807"])
                .is_err()
        );

        let longest = Config::try_parse_from(["carebridge", "--token-ttl-hours", "876000"]).unwrap();
        assert_eq!(longest.token_ttl_hours, Some(MAX_TOKEN_TTL_HOURS));
        assert!(Config::try_parse_from(["carebridge", "--bind", "nowhere"]).is_err());
    }
}
