use serde::{Deserialize, Serialize};

/// A single game record as stored in `games.json`.
///
/// Records are read-only after the catalog is loaded. Only `id`, `name`
/// and `category` take part in filtering; the rest is display or launch
/// metadata passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "use", default)]
    pub launch_mode: LaunchMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emulator_config: Option<EmulatorConfig>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
}

impl Game {
    /// Category label, treating an empty string the same as a missing one.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// How a game wants to be opened (`use` in the JSON record).
///
/// Values this build does not know are kept verbatim in
/// [`LaunchMode::Unknown`] so records serialize back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LaunchMode {
    #[default]
    Iframe,
    Redirect,
    Emulator,
    /// Treated like `iframe`.
    Unknown(String),
}

impl LaunchMode {
    pub fn as_str(&self) -> &str {
        match self {
            LaunchMode::Iframe => "iframe",
            LaunchMode::Redirect => "redirect",
            LaunchMode::Emulator => "emulator",
            LaunchMode::Unknown(raw) => raw,
        }
    }
}

impl From<String> for LaunchMode {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "iframe" => LaunchMode::Iframe,
            "redirect" => LaunchMode::Redirect,
            "emulator" => LaunchMode::Emulator,
            _ => LaunchMode::Unknown(raw),
        }
    }
}

impl From<LaunchMode> for String {
    fn from(mode: LaunchMode) -> Self {
        match mode {
            LaunchMode::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Emulator core settings for `use: "emulator"` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub core: String,
}
