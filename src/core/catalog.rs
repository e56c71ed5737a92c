use crate::domain::model::ToolRecord;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use csv::{ReaderBuilder, Trim};

/// Immutable snapshot of every tool record, in source row order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ToolRecord>,
}

impl Catalog {
    pub fn new(records: Vec<ToolRecord>) -> Self {
        Self { records }
    }

    /// Loads the catalog, falling back to an empty one if the source cannot
    /// be read or parsed. The failure is logged, never returned.
    pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Self {
        match Self::try_load(source) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} tools from {}",
                    catalog.count(),
                    source.describe()
                );
                catalog
            }
            Err(e) => {
                tracing::error!(
                    "❌ Failed to load tools from {}: {} (serving an empty catalog)",
                    source.describe(),
                    e
                );
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                Self::default()
            }
        }
    }

    pub fn try_load<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        let data = source.read()?;
        Self::from_csv(&data)
    }

    /// Parses delimited text whose first row names the fields. Rows without
    /// a title are dropped.
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for row in reader.deserialize::<ToolRecord>() {
            let record = row?;
            if record.title.is_empty() {
                skipped += 1;
                continue;
            }
            records.push(record);
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} rows without a title", skipped);
        }

        Ok(Self { records })
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn all(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
