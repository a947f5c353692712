pub mod download;
pub mod etl;
pub mod locations;
pub mod module_writer;
pub mod steps;
pub mod steps_index;

pub use crate::domain::model::{StageReport, Step, StepGroupId};
pub use crate::domain::ports::{ConfigProvider, Stage, Storage};
pub use crate::utils::error::Result;

pub const STEPS_DIR: &str = "steps";
pub const LOCATIONS_FILE: &str = "metadata/addressesData.js";
pub const STEPS_INDEX_FILE: &str = "metadata/stepsData.js";

pub fn step_file_path(step_id: &str) -> String {
    format!("{}/file_{}.js", STEPS_DIR, step_id)
}

pub fn audio_path(step_id: &str, file_name: &str) -> String {
    format!("{}/{}/{}", STEPS_DIR, step_id, file_name)
}
