//! Symbols: the named program elements of the analyzed graph.

use std::fmt;

use crate::error::ConfigError;

/// The kind of a program element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// A concrete or abstract class.
    Class,
    /// An interface.
    Interface,
    /// A method member.
    Method,
    /// A property member.
    Property,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Method => write!(f, "method"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// Declared visibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible within the declaring assembly/module.
    Internal,
    /// Visible to subtypes.
    Protected,
    /// Visible to the declaring type only.
    Private,
}

/// Structural tags attached to a symbol by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags {
    /// The symbol is abstract.
    pub is_abstract: bool,
    /// The symbol is a record-like value type (structural equality, immutable).
    pub is_record_like: bool,
    /// The symbol is a constructor method.
    pub is_constructor: bool,
    /// The symbol is static.
    pub is_static: bool,
}

/// A structural type reference, e.g. `Task<IActionResult>`.
///
/// Equality is structural: a generic wrapper matches only when both the
/// wrapper name and every argument match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-generic type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parses a type reference from text like `Task<IEnumerable<Product>>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedTypeRef`] on empty input, unbalanced
    /// angle brackets, or trailing garbage.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut parser = TypeParser {
            input,
            chars: input.char_indices().peekable(),
        };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if let Some((i, _)) = parser.chars.peek() {
            return Err(malformed(input, format!("unexpected text at offset {i}")));
        }
        Ok(ty)
    }

    /// Returns the outermost type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the generic arguments, empty for non-generic types.
    #[must_use]
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

fn malformed(input: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::MalformedTypeRef {
        input: input.to_string(),
        reason: reason.into(),
    }
}

struct TypeParser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl TypeParser<'_> {
    fn skip_ws(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn parse_type(&mut self) -> Result<TypeRef, ConfigError> {
        self.skip_ws();
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| !matches!(c, '<' | '>' | ',') && !c.is_whitespace())
        {
            name.push(c);
        }
        if name.is_empty() {
            return Err(malformed(self.input, "expected a type name"));
        }

        self.skip_ws();
        let mut args = Vec::new();
        if self.chars.next_if(|&(_, c)| c == '<').is_some() {
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                match self.chars.next() {
                    Some((_, ',')) => {}
                    Some((_, '>')) => break,
                    _ => return Err(malformed(self.input, "unbalanced `<`")),
                }
            }
        }

        Ok(TypeRef { name, args })
    }
}

/// A named program element: a type, interface, method, or property.
///
/// The full name is a dotted namespace + name path, globally unique within
/// one loaded graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Unique dotted path, e.g. `Catalog.Domain.Entities.Product`.
    pub full_name: String,
    /// What kind of element this is.
    pub kind: SymbolKind,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Return type for methods and properties, `None` otherwise (or for `void`).
    pub return_type: Option<TypeRef>,
    /// Structural tags supplied by the loader.
    pub tags: Tags,
}

impl Symbol {
    /// Creates a public symbol with no return type and default tags.
    #[must_use]
    pub fn new(full_name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            full_name: full_name.into(),
            kind,
            visibility: Visibility::Public,
            return_type: None,
            tags: Tags::default(),
        }
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Sets the structural tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// The namespace: everything before the last `.` of the full name.
    ///
    /// A name without a `.` lives in the empty root namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or("", |(ns, _)| ns)
    }

    /// The simple name: everything after the last `.` of the full name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    /// True if the symbol is publicly visible.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
