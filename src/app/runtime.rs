use std::collections::HashMap;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

use crate::constants::API_TOKEN_ENV_VAR;
use crate::http::{DefaultHttpClient, HttpClient};
use crate::theme::ThemeProvider;

pub trait TimeProvider: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Blocks until the operator asks a long-running command to finish.
pub trait StopSignal: Send + Sync {
    fn wait(&self);
}

pub struct ReportRuntime {
    pub env: HashMap<String, String>,
    pub cwd: PathBuf,
    pub http: Box<dyn HttpClient>,
    pub theme: Option<Arc<dyn ThemeProvider>>,
    pub time: Arc<dyn TimeProvider>,
    pub stop: Box<dyn StopSignal>,
}

impl ReportRuntime {
    pub fn from_env() -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let api_token = env
            .get(API_TOKEN_ENV_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let http = Box::new(DefaultHttpClient::new(api_token)?) as Box<dyn HttpClient>;

        Ok(Self {
            env,
            cwd,
            http,
            theme: None,
            time: Arc::new(LocalTimeProvider),
            stop: Box::new(StdinStopSignal),
        })
    }

    pub fn with_http(mut self, http: Box<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    pub fn with_theme(mut self, theme: Arc<dyn ThemeProvider>) -> Self {
        self.theme = Some(theme);
        self
    }
}

#[derive(Default)]
struct LocalTimeProvider;

impl TimeProvider for LocalTimeProvider {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Default)]
struct StdinStopSignal;

impl StopSignal for StdinStopSignal {
    fn wait(&self) {
        println!("Press Enter to stop.");
        let mut line = String::new();
        if let Err(error) = std::io::stdin().lock().read_line(&mut line) {
            eprintln!("Failed to read from stdin: {error}");
        }
    }
}
