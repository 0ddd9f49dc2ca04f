use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Configuration {
    pub authentication: Authentication,
    pub api: Api,
    pub deny: Deny,
    pub branding: Branding,
}
impl Configuration {
    const FILENAME: &str = "config.toml";

    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is the common case outside development
        dotenvy::dotenv().ok();

        let mut config = if let Ok(file) = std::fs::read_to_string(Self::FILENAME) {
            Self::parse(&file)?
        } else {
            Self::default()
        };
        config.save()?;

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn parse(file: &str) -> anyhow::Result<Self> {
        toml::from_str(file).context("failed to load config")
    }

    fn save(&self) -> anyhow::Result<()> {
        Ok(std::fs::write(
            Self::FILENAME,
            toml::to_string_pretty(self)?,
        )?)
    }

    /// Applies environment overrides on top of the file. Overrides are never written back.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("DISCORD_TOKEN").filter(|t| !t.is_empty()) {
            self.authentication.discord_token = Some(token);
        }
        if let Some(url) = lookup("API_URL").filter(|u| !u.is_empty()) {
            self.api.url = url;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Authentication {
    pub discord_token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Api {
    /// Base URL of the application backend, without the `/v1` prefix
    pub url: String,
}
impl Api {
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
impl Default for Api {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Deny {
    /// How long a moderator has to submit the reason modal
    pub modal_timeout_secs: u64,
}
impl Default for Deny {
    fn default() -> Self {
        Self {
            modal_timeout_secs: 60,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub icon_url: String,
    pub denial_image_url: String,
}
impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Botler".to_string(),
            icon_url: "https://cdn.discordapp.com/avatars/1063626648399921170/60021a9282221d831512631d8e82b33d.png?size=100".to_string(),
            denial_image_url: "https://media.tenor.com/xsOPyZLcxD8AAAAi/rabbit-animal.gif"
                .to_string(),
        }
    }
}
