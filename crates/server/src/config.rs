//! Process configuration.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// keygate: create users and issue API keys over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "keygate", version, about)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "KEYGATE_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Config {
    /// Socket address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
