use crate::error::{Error, Result};
use serde_json::Value as JsonValue;

pub trait ResponseExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Result<JsonValue>;
}

/// First `{` to last `}`. Breaks on stray braces in the surrounding prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceScanExtractor;

impl ResponseExtractor for BraceScanExtractor {
    fn extract(&self, raw: &str) -> Result<JsonValue> {
        let start = raw
            .find('{')
            .ok_or_else(|| Error::Extraction("no '{' in model response".to_string()))?;
        let end = raw
            .rfind('}')
            .filter(|&end| end > start)
            .ok_or_else(|| Error::Extraction("no '}' after the first '{'".to_string()))?;

        let value = serde_json::from_str(&raw[start..=end])?;
        Ok(value)
    }
}
