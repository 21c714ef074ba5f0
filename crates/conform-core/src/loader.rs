//! Graph document loading (DTO layer).
//!
//! The external loader that inspects compiled artifacts is a collaborator
//! outside this crate; its output contract is the JSON schema deserialized
//! here. DTO types exist solely for serde and are converted into the
//! validated [`GraphModel`].
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! GraphDto
//!   ↓ validate + convert
//! GraphModel (immutable domain model)
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::FatalLoadError;
use crate::graph::{DependencyEdge, EdgeKind, GraphModel};
use crate::symbol::{Symbol, SymbolKind, Tags, TypeRef, Visibility};

/// Raw JSON representation of a graph document.
#[derive(Debug, Default, Deserialize)]
pub struct GraphDto {
    /// Symbol records.
    #[serde(default)]
    pub symbols: Vec<SymbolDto>,
    /// Edge records.
    #[serde(default)]
    pub edges: Vec<EdgeDto>,
}

/// JSON representation of one symbol.
#[derive(Debug, Deserialize)]
pub struct SymbolDto {
    /// Dotted full name.
    pub name: String,
    /// Symbol kind.
    pub kind: KindDto,
    /// Visibility (default: public).
    #[serde(default)]
    pub visibility: VisibilityDto,
    /// Return type text for methods/properties; absent or `null` means none.
    #[serde(default)]
    pub returns: Option<String>,
    /// Abstract tag.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Record-like tag.
    #[serde(default, rename = "record")]
    pub is_record_like: bool,
    /// Constructor tag.
    #[serde(default, rename = "constructor")]
    pub is_constructor: bool,
    /// Static tag.
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

/// JSON representation of one edge.
#[derive(Debug, Deserialize)]
pub struct EdgeDto {
    /// Source symbol full name.
    pub from: String,
    /// Target symbol full name.
    pub to: String,
    /// Edge kind.
    pub kind: EdgeKindDto,
}

/// JSON symbol kinds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDto {
    /// A class.
    Class,
    /// An interface.
    Interface,
    /// A method member.
    Method,
    /// A property member.
    Property,
}

/// JSON visibilities.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityDto {
    /// Public (the default when omitted).
    #[default]
    Public,
    /// Internal.
    Internal,
    /// Protected.
    Protected,
    /// Private.
    Private,
}

/// JSON edge kinds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKindDto {
    /// Uses relationship.
    Uses,
    /// Implements relationship.
    Implements,
    /// Inherits relationship.
    Inherits,
    /// Declares relationship.
    Declares,
}

impl From<KindDto> for SymbolKind {
    fn from(dto: KindDto) -> Self {
        match dto {
            KindDto::Class => Self::Class,
            KindDto::Interface => Self::Interface,
            KindDto::Method => Self::Method,
            KindDto::Property => Self::Property,
        }
    }
}

impl From<VisibilityDto> for Visibility {
    fn from(dto: VisibilityDto) -> Self {
        match dto {
            VisibilityDto::Public => Self::Public,
            VisibilityDto::Internal => Self::Internal,
            VisibilityDto::Protected => Self::Protected,
            VisibilityDto::Private => Self::Private,
        }
    }
}

impl From<EdgeKindDto> for EdgeKind {
    fn from(dto: EdgeKindDto) -> Self {
        match dto {
            EdgeKindDto::Uses => Self::Uses,
            EdgeKindDto::Implements => Self::Implements,
            EdgeKindDto::Inherits => Self::Inherits,
            EdgeKindDto::Declares => Self::Declares,
        }
    }
}

/// Loads a graph model from a JSON document string.
///
/// # Errors
///
/// Returns [`FatalLoadError`] for schema violations, malformed return types,
/// duplicate symbols, or dangling edges. Nothing downstream runs after one.
pub fn from_json_str(content: &str) -> Result<GraphModel, FatalLoadError> {
    let dto: GraphDto = serde_json::from_str(content)?;
    convert(dto)
}

/// Loads a graph model from a JSON file.
///
/// # Errors
///
/// As [`from_json_str`], plus [`FatalLoadError::Io`] when the file is
/// unreadable.
pub fn from_file(path: &Path) -> Result<GraphModel, FatalLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| FatalLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&content)
}

/// Converts a deserialized document into a validated [`GraphModel`].
///
/// # Errors
///
/// Returns [`FatalLoadError`] on any inconsistency.
pub fn convert(dto: GraphDto) -> Result<GraphModel, FatalLoadError> {
    let mut symbols = Vec::with_capacity(dto.symbols.len());
    for s in dto.symbols {
        let return_type = match &s.returns {
            None => None,
            Some(text) => Some(TypeRef::parse(text).map_err(|e| {
                FatalLoadError::InvalidReturnType {
                    symbol: s.name.clone(),
                    reason: e.to_string(),
                }
            })?),
        };
        let mut symbol = Symbol::new(s.name, s.kind.into())
            .with_visibility(s.visibility.into())
            .with_tags(Tags {
                is_abstract: s.is_abstract,
                is_record_like: s.is_record_like,
                is_constructor: s.is_constructor,
                is_static: s.is_static,
            });
        if let Some(ty) = return_type {
            symbol = symbol.with_return_type(ty);
        }
        symbols.push(symbol);
    }

    let edges = dto
        .edges
        .into_iter()
        .map(|e| DependencyEdge::new(e.from, e.to, e.kind.into()))
        .collect();

    let graph = GraphModel::new(symbols, edges)?;
    info!(
        symbols = graph.len(),
        edges = graph.edges().len(),
        "graph loaded"
    );
    Ok(graph)
}
