use std::any::Any;

use log::warn;
use roster_states::{State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

/// Store used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8085";

/// Where the employee store lives.
///
/// Commands read it from their snapshot, so tests point a whole context at a
/// mock server by registering a different config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    api_base_url: Ustr,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    employee_api_base_url: Option<String>,
}

impl BusinessConfig {
    /// Trailing slashes are dropped so paths can be appended verbatim.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            api_base_url: Ustr::from(base_url.as_ref().trim().trim_end_matches('/')),
        }
    }

    pub fn api_base_url(&self) -> Ustr {
        self.api_base_url
    }

    pub fn employees_url(&self) -> String {
        format!("{}/employees", self.api_base_url)
    }

    pub fn employee_url(&self, employee_id: i64) -> String {
        format!("{}/employees/{employee_id}", self.api_base_url)
    }

    /// Reads `EMPLOYEE_API_BASE_URL` from the process environment.
    ///
    /// A missing or blank variable falls back to the value baked in at compile
    /// time, then to [`DEFAULT_API_BASE_URL`].
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, S>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        Ok(Self::from_raw(raw))
    }

    /// [`Self::from_env`], logging and falling back to the default on error.
    pub fn load() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            warn!("Invalid employee store configuration, using default: {err}");
            Self::default()
        })
    }

    fn from_raw(raw: RawConfig) -> Self {
        let base = raw
            .employee_api_base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                option_env!("EMPLOYEE_API_BASE_URL")
                    .unwrap_or(DEFAULT_API_BASE_URL)
                    .to_owned()
            });
        Self::new(base)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
