use std::{env, str::FromStr};

use crate::error::SettingsError;

pub const DISPATCH_VAR: &str = "KOI_DISPATCH";
pub const THREADS_VAR: &str = "KOI_THREADS";

/// How the invocations of one draw are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Serial,
    Parallel,
}

impl Default for Dispatch {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Self::Parallel
        } else {
            Self::Serial
        }
    }
}

impl FromStr for Dispatch {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "parallel" => Ok(Self::Parallel),
            _ => Err(SettingsError::InvalidDispatch(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub dispatch: Dispatch,
    /// Dedicated worker count. `None` shares the global rayon pool.
    pub threads: Option<usize>,
    /// Minimum invocations handed to one worker.
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dispatch: Dispatch::default(),
            threads: None,
            chunk_size: 256,
        }
    }
}

impl Settings {
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Defaults overridden by `KOI_DISPATCH` and `KOI_THREADS`.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_vars(
            env::var(DISPATCH_VAR).ok().as_deref(),
            env::var(THREADS_VAR).ok().as_deref(),
        )
    }

    pub fn from_vars(dispatch: Option<&str>, threads: Option<&str>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(dispatch) = dispatch {
            settings = settings.dispatch(dispatch.parse()?);
        }

        if let Some(threads) = threads {
            let count = threads
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| SettingsError::InvalidThreads(threads.to_owned()))?;
            settings = settings.threads(Some(count));
        }

        Ok(settings)
    }
}
