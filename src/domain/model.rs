use crate::utils::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// 步驟群組編號（遠端 API 只使用 1 與 2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepGroupId(pub u32);

impl fmt::Display for StepGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StepGroupId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A single entry of a group's `Steps` list, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step(pub Value);

impl Step {
    /// The step identifier rendered for URLs and file names.
    ///
    /// Numbers and non-empty strings are accepted; anything else has no id.
    /// Integral floats render without a fraction (`10.0` -> `10`).
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
                _ => Some(n.to_string()),
            },
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// A single entry of a step's `Doaa` list, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoaaItem(pub Value);

impl DoaaItem {
    pub fn audio_number(&self) -> Option<&str> {
        self.0
            .get("audioNumber")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Last path component of the audio reference, e.g. `a/b.mp3` -> `b.mp3`.
    pub fn audio_file_name(&self) -> Option<&str> {
        let audio = self.audio_number()?;
        Path::new(audio).file_name().and_then(|name| name.to_str())
    }
}

/// `TawafSteps/{groupId}` 回應
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepsResponse {
    #[serde(rename = "Steps", default)]
    pub steps: Option<Vec<Step>>,
}

/// `TawafDoaa/{stepId}` 回應
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoaaResponse {
    #[serde(rename = "Doaa", default)]
    pub doaa: Value,
}

impl DoaaResponse {
    /// Absent, `null`, `false`, `0`, `""` and `[]` all mean "nothing to export".
    /// Any other non-list value is rejected.
    pub fn into_items(self) -> Result<Option<Vec<DoaaItem>>> {
        match self.doaa {
            Value::Array(items) if items.is_empty() => Ok(None),
            Value::Array(items) => Ok(Some(items.into_iter().map(DoaaItem).collect())),
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
            other => Err(ExportError::Processing {
                message: format!("Doaa is not a list: {}", other),
            }),
        }
    }
}

/// 單一階段的執行結果
#[derive(Debug, Clone, Default)]
pub struct StageReport {
    pub stage: String,
    pub files_written: Vec<String>,
    pub skipped_steps: usize,
    pub downloads_attempted: usize,
    pub downloads_failed: usize,
}

impl StageReport {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            ..Default::default()
        }
    }
}
