//! Regional API servers

use serde::{Deserialize, Serialize};

/// One of the three independent regional BMW servers.
///
/// Sessions and vehicle-status/command calls are hub-scoped; the vehicle list
/// is not. The wire codes match the `hub` field of the server vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hub {
    #[serde(rename = "HUB_CN")]
    China,

    /// Europe and the rest of the world. Default hub.
    #[serde(rename = "HUB_ECE")]
    Europe,

    #[serde(rename = "HUB_US")]
    Usa,
}

impl Hub {
    /// Fixed base URL of the regional server.
    pub fn base_url(&self) -> &'static str {
        match self {
            Hub::China => "https://b2vapi.bmwgroup.cn:8592",
            Hub::Europe => "https://b2vapi.bmwgroup.com",
            Hub::Usa => "https://b2vapi.bmwgroup.us",
        }
    }

    /// Wire code as reported in vehicle metadata.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Hub::China => "HUB_CN",
            Hub::Europe => "HUB_ECE",
            Hub::Usa => "HUB_US",
        }
    }
}

impl std::str::FromStr for Hub {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HUB_CN" => Ok(Hub::China),
            "HUB_ECE" => Ok(Hub::Europe),
            "HUB_US" => Ok(Hub::Usa),
            _ => Err(format!("Unknown hub: {}", s)),
        }
    }
}

impl std::fmt::Display for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_code())
    }
}
