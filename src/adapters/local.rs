use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Reads the catalog from a file on disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for LocalSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>> {
        let data = fs::read(&self.path)?;
        Ok(data)
    }
}

/// Serves catalog text held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    data: Vec<u8>,
}

impl InMemorySource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl CatalogSource for InMemorySource {
    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.data.len())
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}
