use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::Intent;
use crate::hooks::HookName;

#[derive(Debug, Serialize)]
pub struct QueryRecord<'a> {
    pub timestamp: String,
    pub command: &'a str,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<HookName>,
    pub result_type: &'a str,
}

/// Append-only JSON-lines log of handled commands.
#[derive(Debug, Clone)]
pub struct QueryJournal {
    path: PathBuf,
}

impl QueryJournal {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(
        &self,
        command: &str,
        intent: Intent,
        hook: Option<HookName>,
        result_type: &str,
    ) -> Result<()> {
        let now: DateTime<Local> = Local::now();
        let record = QueryRecord {
            timestamp: now.to_rfc3339(),
            command,
            intent,
            hook,
            result_type,
        };
        append_line(&self.path, &serde_json::to_string(&record)?)
    }
}

pub fn append_line(path: impl AsRef<Path>, line: &str) -> Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "{line}")?;
    Ok(())
}
