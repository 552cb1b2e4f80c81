use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// A Redmine activity the entry form can pick from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: u32,
    pub name: String,
}

/// An issue always offered in the entry form, even if the project query
/// does not return it (internal meetings, overhead buckets, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredefinedIssue {
    pub id: u32,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub redmine_base_url: Option<String>,
    #[serde(default)]
    pub redmine_project_id: Option<String>,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default = "default_activity")]
    pub default_activity: u32,
    #[serde(default = "default_activities")]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub predefined_issues: Vec<PredefinedIssue>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_high_workload")]
    pub high_workload_hours: f64,
    #[serde(default = "default_expected_daily")]
    pub expected_daily_hours: f64,
    #[serde(default = "default_entries_ttl")]
    pub time_entries_ttl_secs: u64,
    #[serde(default = "default_issues_ttl")]
    pub issues_ttl_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_activity() -> u32 {
    9
}
fn default_activities() -> Vec<Activity> {
    vec![
        Activity {
            id: 9,
            name: "Development".to_string(),
        },
        Activity {
            id: 19,
            name: "Operations - irregular".to_string(),
        },
        Activity {
            id: 20,
            name: "Operations - regular".to_string(),
        },
    ]
}
fn default_page_size() -> u32 {
    100
}
fn default_max_pages() -> u32 {
    10
}
fn default_high_workload() -> f64 {
    6.0
}
fn default_expected_daily() -> f64 {
    8.0
}
fn default_entries_ttl() -> u64 {
    300
}
fn default_issues_ttl() -> u64 {
    600
}
fn default_request_timeout() -> u64 {
    30
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            redmine_base_url: None,
            redmine_project_id: None,
            current_user: None,
            default_activity: default_activity(),
            activities: default_activities(),
            predefined_issues: Vec::new(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            high_workload_hours: default_high_workload(),
            expected_daily_hours: default_expected_daily(),
            time_entries_ttl_secs: default_entries_ttl(),
            issues_ttl_secs: default_issues_ttl(),
            request_timeout_secs: default_request_timeout(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rtcal")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtcal")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtcal.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtcal.sqlite")
    }

    /// Load configuration from file (or defaults if not found), then apply
    /// the environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        let mut cfg = if path.exists() {
            Self::load_from(&path)?
        } else {
            Config::default()
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// `REDMINE_BASE_URL`, `REDMINE_PROJECT_ID` and `PREDEFINED_ISSUES`
    /// take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("REDMINE_BASE_URL")
            && !url.trim().is_empty()
        {
            self.redmine_base_url = Some(url.trim().to_string());
        }
        if let Ok(project) = env::var("REDMINE_PROJECT_ID")
            && !project.trim().is_empty()
        {
            self.redmine_project_id = Some(project.trim().to_string());
        }
        if let Ok(raw) = env::var("PREDEFINED_ISSUES")
            && let Some(issues) = parse_predefined_issues(&raw)
        {
            self.predefined_issues = issues;
        }
    }

    /// Base URL without trailing slash, or a configuration error telling the
    /// user what to set.
    pub fn base_url(&self) -> AppResult<String> {
        match self.redmine_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url.trim_end_matches('/').to_string()),
            _ => Err(AppError::Config(
                "Redmine base URL is not configured. Set `redmine_base_url` in the config file or REDMINE_BASE_URL.".into(),
            )),
        }
    }

    pub fn activity_name(&self, id: u32) -> Option<&str> {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
    }

    /// Persist the configuration to the standard config file.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_path(&name);
            if p.is_absolute() {
                p
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rtcal.sqlite")
        };

        let mut config = if Self::config_file().exists() {
            Self::load_from(&Self::config_file())?
        } else {
            Config::default()
        };
        config.database = db_path.to_string_lossy().to_string();

        // Write config file
        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Parse the `PREDEFINED_ISSUES` JSON array
/// (`[{"id":129076,"subject":"Internal activities"}]`).
/// Invalid content is reported and ignored.
pub fn parse_predefined_issues(raw: &str) -> Option<Vec<PredefinedIssue>> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Vec<PredefinedIssue>>(raw) {
        Ok(issues) => Some(issues),
        Err(e) => {
            log::warn!(
                "PREDEFINED_ISSUES is not a valid JSON array of {{\"id\":number,\"subject\":\"string\"}}: {}",
                e
            );
            None
        }
    }
}
