use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::{CommandSpec, SpecError};
use crate::session::{Tuning, STAGE_COUNT};

/// Everything the animated session displays, supplied as static
/// configuration. The engine never computes content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub location: String,
    pub bio: String,
    pub tech: Vec<String>,
    pub projects: Vec<Project>,
    pub experience: Experience,
    pub links: Vec<Link>,
    pub email: String,
    /// Overrides for the four command scripts. Absent means the stock
    /// whoami / ls / cat session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<CommandEntry>>,
    #[serde(default)]
    pub tuning: TuningOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    pub tag: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// One scripted command in profile JSON form. Validated into a
/// [`CommandSpec`] before the session mounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandEntry {
    pub correct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typo: Option<String>,
    #[serde(default)]
    pub divergence: usize,
    pub speed_ms: u64,
}

impl CommandEntry {
    pub fn to_spec(&self) -> Result<CommandSpec, SpecError> {
        match &self.typo {
            Some(typo) => CommandSpec::with_typo(&self.correct, typo, self.divergence, self.speed_ms),
            None => CommandSpec::plain(&self.correct, self.speed_ms),
        }
    }
}

/// Optional animation knobs; anything absent keeps its built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TuningOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typo_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_gap_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_buffer_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scramble_tick_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scramble_iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_timezone: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse profile: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profile defines {found} commands, the session plays exactly 4")]
    CommandCount { found: usize },
    #[error("bad command script: {0}")]
    Command(#[from] SpecError),
    #[error("unknown timezone {0:?}")]
    Timezone(String),
}

impl Profile {
    /// The four validated command scripts this profile plays.
    pub fn resolved_commands(&self) -> Result<Vec<CommandSpec>, ProfileError> {
        match &self.commands {
            Some(entries) => {
                if entries.len() != STAGE_COUNT {
                    return Err(ProfileError::CommandCount {
                        found: entries.len(),
                    });
                }
                entries
                    .iter()
                    .map(|entry| entry.to_spec().map_err(ProfileError::from))
                    .collect()
            }
            None => Ok(stock_commands()),
        }
    }

    /// Animation tuning with every override applied.
    pub fn resolved_tuning(&self) -> Result<Tuning, ProfileError> {
        let mut tuning = Tuning::default();
        let overrides = &self.tuning;
        if let Some(p) = overrides.typo_probability {
            tuning.typo_probability = p.clamp(0.0, 1.0);
        }
        if let Some(ms) = overrides.base_delay_ms {
            tuning.base_delay_ms = ms;
        }
        if let Some(ms) = overrides.stage_gap_ms {
            tuning.stage_gap_ms = ms;
        }
        if let Some(ms) = overrides.cursor_buffer_ms {
            tuning.cursor_buffer_ms = ms;
        }
        if let Some(ms) = overrides.scramble_tick_ms {
            tuning.scramble_tick_ms = ms;
        }
        if let Some(n) = overrides.scramble_iterations {
            tuning.scramble_iterations = n;
        }
        if let Some(name) = &overrides.clock_timezone {
            tuning.clock_tz = name
                .parse::<Tz>()
                .map_err(|_| ProfileError::Timezone(name.clone()))?;
        }
        Ok(tuning)
    }

    /// Every openable URL, in on-screen order: projects first, then links.
    pub fn urls(&self) -> Vec<&str> {
        self.projects
            .iter()
            .map(|p| p.url.as_str())
            .chain(self.links.iter().map(|l| l.url.as_str()))
            .collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Alex Winters".into(),
            role: "Platform Engineer · Freelance".into(),
            location: "Tel Aviv, Israel".into(),
            bio: "Infrastructure generalist at the intersection of platforms and \
                  developer experience. Building the rails other engineers ship on."
                .into(),
            tech: ["Kubernetes", "Rust", "Go", "Terraform", "AWS", "ArgoCD"]
                .into_iter()
                .map(String::from)
                .collect(),
            projects: vec![
                Project {
                    name: "shardwell".into(),
                    tag: "K8s Operator".into(),
                    description: "List-driven parallel execution of Jobs and CronJobs. \
                                  Hides the sharding plumbing behind one manifest."
                        .into(),
                    url: "https://github.com/alexwinters/shardwell".into(),
                },
                Project {
                    name: "guardrail".into(),
                    tag: "CLI Plugin".into(),
                    description: "Production safety rails for coding agents. Blocks \
                                  mutating operations on cloud and deployment CLIs."
                        .into(),
                    url: "https://github.com/alexwinters/guardrail".into(),
                },
            ],
            experience: Experience {
                company: "Northlight Systems".into(),
                title: "Head of Platform".into(),
                summary: "Leading platform engineering and cloud strategy. EKS, \
                          FinOps, and the paved road from commit to production."
                    .into(),
                url: "https://www.linkedin.com/in/alexwinters/".into(),
                current: true,
            },
            links: vec![
                Link {
                    label: "github".into(),
                    url: "https://github.com/alexwinters".into(),
                },
                Link {
                    label: "linkedin".into(),
                    url: "https://www.linkedin.com/in/alexwinters/".into(),
                },
                Link {
                    label: "x.com".into(),
                    url: "https://x.com/alexwinters".into(),
                },
            ],
            email: "alex@winters.dev".into(),
            commands: None,
            tuning: TuningOverrides::default(),
        }
    }
}

/// The stock session: four commands with their misspellings, divergence
/// points, and per-character speeds.
pub fn stock_commands() -> Vec<CommandSpec> {
    [
        ("whoami", "whomai", 3, 90),
        ("ls ~/projects/", "ls ~/projcets/", 9, 65),
        ("cat experience.md", "cat experience.dm", 15, 65),
        ("cat links.txt", "cat links.tct", 11, 65),
    ]
    .into_iter()
    .map(|(correct, typo, divergence, speed)| {
        // Stock scripts are compile-time constants; a panic here is a bug in
        // this table, not a runtime condition.
        CommandSpec::with_typo(correct, typo, divergence, speed)
            .unwrap_or_else(|e| unreachable!("stock command invalid: {e}"))
    })
    .collect()
}

pub trait ProfileStore {
    fn load(&self) -> Result<Profile, ProfileError>;
}

/// Loads the profile from a JSON file, falling back to the built-in profile
/// when the file does not exist. A file that exists but does not parse or
/// validate is a configuration error and fails loudly.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "termfolio") {
            pd.config_dir().join("profile.json")
        } else {
            PathBuf::from("termfolio_profile.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Profile, ProfileError> {
        if !self.path.exists() {
            return Ok(Profile::default());
        }
        let bytes = fs::read(&self.path)?;
        let profile: Profile = serde_json::from_slice(&bytes)?;
        // Surface command/timezone mistakes at load time, not mid-animation.
        profile.resolved_commands()?;
        profile.resolved_tuning()?;
        Ok(profile)
    }
}
