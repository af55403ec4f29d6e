//! The JSON data file and the entry point for units of work.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::DataSet;
use crate::error::StoreResult;
use crate::uow::UnitOfWork;

/// Handle on the data file. Cheap to construct; nothing is read until a
/// unit of work begins.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begin a unit of work over the current data set. A missing data file
    /// reads as an empty data set (first run).
    pub fn begin(&self) -> StoreResult<UnitOfWork> {
        let data = match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str::<DataSet>(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DataSet::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(UnitOfWork::new(self.path.clone(), data))
    }
}
