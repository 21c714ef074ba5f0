//! DTO → rule set conversion with validation.
//!
//! Every malformed pattern or dangling selection reference fails here, at
//! construction time, before any evaluation.

use std::collections::BTreeMap;

use conform_core::{
    ConfigError, InterfaceTarget, NamePattern, NamespacePattern, Predicate, Selection, SymbolKind,
    TypeRef,
};

use crate::condition::Condition;
use crate::rule::{Rule, RuleSet};

use super::config_dto::{RuleConfigDto, RuleDto, SelectionDto};

/// Converts a deserialized config into a validated [`RuleSet`].
///
/// # Errors
///
/// Returns the first [`ConfigError`] encountered during conversion.
pub fn load(dto: RuleConfigDto) -> Result<RuleSet, ConfigError> {
    let mut selections = BTreeMap::new();
    for s in &dto.selections {
        let selection = convert_selection(s)?;
        selections.insert(s.name.clone(), selection);
    }

    dto.rules
        .into_iter()
        .map(|r| convert_rule(r, &selections))
        .collect()
}

fn convert_selection(dto: &SelectionDto) -> Result<Selection, ConfigError> {
    let mut predicate = Predicate::True;

    if let Some(kind) = &dto.kind {
        predicate = predicate.and(parse_kind(kind, &dto.name)?);
    }
    if let Some(namespace) = &dto.namespace {
        predicate = predicate.and(Predicate::ResidesIn(NamespacePattern::parse(namespace)?));
    }
    if let Some(regex) = &dto.name_regex {
        predicate = predicate.and(Predicate::NameMatches(NamePattern::regex(regex)?));
    }
    if let Some(implements) = &dto.implements {
        predicate = predicate.and(Predicate::Implements {
            target: interface_target(implements)?,
            transitive: true,
        });
    }
    if dto.public == Some(true) {
        predicate = predicate.and(Predicate::Public);
    }
    match dto.record_like {
        Some(true) => predicate = predicate.and(Predicate::RecordLike),
        Some(false) => {
            predicate = predicate.and(Predicate::Not(Box::new(Predicate::RecordLike)));
        }
        None => {}
    }

    Ok(Selection::new(&dto.name, predicate))
}

fn parse_kind(value: &str, selection: &str) -> Result<Predicate, ConfigError> {
    let predicate = match value {
        "class" => Predicate::Kind(SymbolKind::Class),
        "interface" => Predicate::Kind(SymbolKind::Interface),
        "method" => Predicate::Kind(SymbolKind::Method),
        "property" => Predicate::Kind(SymbolKind::Property),
        "type" => Predicate::Or(vec![
            Predicate::Kind(SymbolKind::Class),
            Predicate::Kind(SymbolKind::Interface),
        ]),
        other => {
            return Err(ConfigError::UnknownKind {
                selection: selection.to_string(),
                value: other.to_string(),
            })
        }
    };
    Ok(predicate)
}

/// `.*` suffix selects namespace mode, anything else is an exact type name.
fn interface_target(text: &str) -> Result<InterfaceTarget, ConfigError> {
    if text.ends_with(".*") {
        Ok(InterfaceTarget::InNamespace(NamespacePattern::parse(text)?))
    } else {
        Ok(InterfaceTarget::Exact(text.to_string()))
    }
}

fn convert_rule(
    dto: RuleDto,
    selections: &BTreeMap<String, Selection>,
) -> Result<Rule, ConfigError> {
    let subject = resolve_subject(&dto, selections)?;
    let mut conditions = Vec::new();

    if let Some(names) = &dto.only_depend_on {
        conditions.push(Condition::OnlyDependOn(resolve_union(
            names, selections, &dto.name,
        )?));
    }
    if let Some(names) = &dto.not_depend_on_any {
        conditions.push(Condition::NotDependOnAny(resolve_union(
            names, selections, &dto.name,
        )?));
    }
    if let Some(suffixes) = &dto.name_ends_with {
        let mut alternatives = Vec::new();
        for suffix in suffixes {
            if suffix.is_empty() {
                return Err(ConfigError::EmptySuffix);
            }
            alternatives.push(Condition::HaveNameEndingWith(suffix.clone()));
        }
        conditions.push(match alternatives.len() {
            0 => return Err(ConfigError::EmptySuffix),
            1 => alternatives.remove(0),
            _ => Condition::AnyOf(alternatives),
        });
    }
    if let Some(regex) = &dto.name_matches {
        conditions.push(Condition::HaveName(NamePattern::regex(regex)?));
    }
    if let Some(ty) = &dto.return_type {
        conditions.push(Condition::HaveReturnType(TypeRef::parse(ty)?));
    }
    if let Some(ty) = &dto.not_return_type {
        conditions.push(Condition::NotHaveReturnType(TypeRef::parse(ty)?));
    }
    match dto.record_like {
        Some(true) => conditions.push(Condition::BeRecordLike),
        Some(false) => conditions.push(Condition::Not(Box::new(Condition::BeRecordLike))),
        None => {}
    }
    if let Some(implements) = &dto.implements {
        conditions.push(Condition::ImplementInterface {
            target: interface_target(implements)?,
            transitive: true,
        });
    }

    let condition = match conditions.len() {
        0 => {
            return Err(ConfigError::EmptyRule {
                rule: dto.name.clone(),
            })
        }
        1 => conditions.remove(0),
        _ => Condition::All(conditions),
    };

    Ok(Rule::new(dto.name, subject, condition.normalize()))
}

fn resolve_subject(
    dto: &RuleDto,
    selections: &BTreeMap<String, Selection>,
) -> Result<Selection, ConfigError> {
    match (&dto.subject, &dto.subject_namespace) {
        (Some(name), None) => {
            selections
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownSelection {
                    rule: dto.name.clone(),
                    selection: name.clone(),
                })
        }
        (None, Some(namespace)) => Ok(Selection::new(
            namespace,
            Predicate::ResidesIn(NamespacePattern::parse(namespace)?),
        )),
        _ => Err(ConfigError::AmbiguousSubject {
            rule: dto.name.clone(),
        }),
    }
}

fn resolve_union(
    names: &[String],
    selections: &BTreeMap<String, Selection>,
    rule: &str,
) -> Result<Selection, ConfigError> {
    let mut resolved = Vec::new();
    for name in names {
        let selection =
            selections
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownSelection {
                    rule: rule.to_string(),
                    selection: name.clone(),
                })?;
        resolved.push(selection);
    }
    let mut iter = resolved.into_iter();
    match iter.next() {
        // An explicitly empty list is a legal empty object set; the
        // vacuous-truth policy of the conditions applies.
        None => Ok(Selection::new("nothing", Predicate::Not(Box::new(Predicate::True)))),
        Some(first) => Ok(iter.fold(first, Selection::or)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection_dto(name: &str, namespace: &str) -> SelectionDto {
        SelectionDto {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
            kind: None,
            name_regex: None,
            implements: None,
            public: None,
            record_like: None,
        }
    }

    #[test]
    fn unknown_selection_reference_fails() {
        let dto = RuleConfigDto {
            selections: vec![],
            rules: vec![RuleDto {
                name: "iso".to_string(),
                subject: Some("domain".to_string()),
                subject_namespace: None,
                only_depend_on: None,
                not_depend_on_any: None,
                name_ends_with: None,
                name_matches: None,
                return_type: None,
                not_return_type: None,
                record_like: None,
                implements: None,
            }],
        };
        assert!(matches!(
            load(dto),
            Err(ConfigError::UnknownSelection { .. })
        ));
    }

    #[test]
    fn subject_and_inline_namespace_conflict() {
        let dto = RuleConfigDto {
            selections: vec![selection_dto("domain", "Domain.*")],
            rules: vec![RuleDto {
                name: "iso".to_string(),
                subject: Some("domain".to_string()),
                subject_namespace: Some("Domain.*".to_string()),
                only_depend_on: Some(vec!["domain".to_string()]),
                not_depend_on_any: None,
                name_ends_with: None,
                name_matches: None,
                return_type: None,
                not_return_type: None,
                record_like: None,
                implements: None,
            }],
        };
        assert!(matches!(load(dto), Err(ConfigError::AmbiguousSubject { .. })));
    }

    #[test]
    fn rule_without_conditions_fails() {
        let dto = RuleConfigDto {
            selections: vec![selection_dto("domain", "Domain.*")],
            rules: vec![RuleDto {
                name: "iso".to_string(),
                subject: Some("domain".to_string()),
                subject_namespace: None,
                only_depend_on: None,
                not_depend_on_any: None,
                name_ends_with: None,
                name_matches: None,
                return_type: None,
                not_return_type: None,
                record_like: None,
                implements: None,
            }],
        };
        assert!(matches!(load(dto), Err(ConfigError::EmptyRule { .. })));
    }

    #[test]
    fn unknown_kind_fails() {
        let mut sel = selection_dto("domain", "Domain.*");
        sel.kind = Some("enum".to_string());
        let dto = RuleConfigDto {
            selections: vec![sel],
            rules: vec![],
        };
        assert!(matches!(load(dto), Err(ConfigError::UnknownKind { .. })));
    }

    #[test]
    fn interface_target_mode_is_explicit() {
        assert!(matches!(
            interface_target("Domain.Interfaces.*").unwrap(),
            InterfaceTarget::InNamespace(_)
        ));
        assert!(matches!(
            interface_target("Domain.Interfaces.IRepo").unwrap(),
            InterfaceTarget::Exact(_)
        ));
    }
}
