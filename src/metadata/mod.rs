pub mod item;

use serde::{de::DeserializeOwned, Deserialize};

use crate::error::MetadataError;

/// A list record carrying at least a name. Extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRecord {
    pub name: String,
}

/// A crew list record: name plus job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewRecord {
    pub name: String,
    pub job: String,
}

/// Decode a list-of-records field into typed records.
///
/// The whole field must decode: a non-list payload or any record missing a
/// required key fails with [`MetadataError::Parse`].
pub fn parse_records<R>(field: &'static str, text: &str) -> Result<Vec<R>, MetadataError>
where
    R: DeserializeOwned,
{
    serde_json::from_str(text).map_err(|e| MetadataError::parse(field, e))
}

/// All names, in source order.
pub fn extract_names(field: &'static str, text: &str) -> Result<Vec<String>, MetadataError> {
    let records: Vec<NamedRecord> = parse_records(field, text)?;
    Ok(records.into_iter().map(|r| r.name).collect())
}

/// The first `k` names in source order.
///
/// This is positional truncation: the records are taken as listed, no
/// importance ranking is applied. The whole field is still validated.
pub fn extract_top_k_names(field: &'static str, text: &str, k: usize) -> Result<Vec<String>, MetadataError> {
    let mut names = extract_names(field, text)?;
    names.truncate(k);
    Ok(names)
}

/// Names of records whose `job` equals `role` exactly.
/// No match yields an empty list, which is not an error.
pub fn extract_by_role(field: &'static str, text: &str, role: &str) -> Result<Vec<String>, MetadataError> {
    let records: Vec<CrewRecord> = parse_records(field, text)?;
    Ok(records
        .into_iter()
        .filter(|r| r.job == role)
        .map(|r| r.name)
        .collect())
}

/// Collapse a multi-word name into one token by removing all whitespace,
/// so "Sam Worthington" and "Sam Raimi" never share a "sam" term.
pub fn normalize_token(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}
