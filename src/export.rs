//! `{nodes, edges}` JSON export.
//!
//! Projects every entity and relationship of a model into its ordered
//! record and wraps them as:
//!
//! ```text
//! {
//!   "nodes": [ { "Id": ..., "Name": ..., "EntityType": ..., ... }, ... ],
//!   "edges": [ { "Id": ..., "RelationshipType": ..., "Source": ..., "Target": ... }, ... ]
//! }
//! ```
//!
//! References are always flattened to id strings, so the document never
//! nests one node inside another. Consumers resolve cross-references by
//! scanning `nodes` for the matching `Id`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::graph::Model;
use crate::model::{Record, ToRecord};
use crate::Result;

/// The projected document, in model order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub nodes: Vec<Record>,
    pub edges: Vec<Record>,
}

impl GraphDocument {
    pub fn from_model(model: &Model) -> Self {
        Self {
            nodes: model.entities().iter().map(ToRecord::to_record).collect(),
            edges: model.relationships().iter().map(ToRecord::to_record).collect(),
        }
    }
}

/// Encode a model as indented JSON text.
pub fn build_json(model: &Model) -> Result<String> {
    Ok(serde_json::to_string_pretty(&GraphDocument::from_model(model))?)
}

/// Encode a model as indented JSON into any writer.
pub fn write_json(model: &Model, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &GraphDocument::from_model(model))?;
    writer.flush()?;
    Ok(())
}

/// Write a model to `path`, replacing any existing file.
pub fn save(model: &Model, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(model, &mut writer)
}
