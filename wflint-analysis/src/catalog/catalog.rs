//! The rule catalog: load, save, filter, and parameterize rules.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use wflint_core::{FxHashMap, LoadError, SaveError, ValidationError};

use super::types::{CatalogDocument, Parameter, ParameterValue, Rule, RuleSet};
use crate::engine::versions;

/// An in-memory rule catalog with an id index over its rules.
///
/// Owned by the caller and passed by reference into the engine and the
/// project analyzer; there is no process-wide catalog singleton.
#[derive(Debug, Clone)]
pub struct Catalog {
    doc: CatalogDocument,
    index: FxHashMap<String, usize>,
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.doc == other.doc
    }
}

impl Catalog {
    /// Build a catalog from a parsed document, validating rule ids,
    /// penalties, and parameter bounds.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, LoadError> {
        let mut index = FxHashMap::default();
        for (i, rule) in doc.rules.iter().enumerate() {
            if index.insert(rule.id.clone(), i).is_some() {
                return Err(LoadError::DuplicateRuleId {
                    id: rule.id.clone(),
                });
            }
            if rule.penalty < 0.0 {
                return Err(LoadError::NegativePenalty {
                    id: rule.id.clone(),
                    penalty: rule.penalty,
                });
            }
            for (name, param) in &rule.parameters {
                if let ParameterValue::Number { min, max, .. } = param.value {
                    if min > max {
                        return Err(LoadError::Malformed {
                            message: format!(
                                "rule {} parameter {name} declares min {min} > max {max}",
                                rule.id
                            ),
                        });
                    }
                }
            }
        }
        Ok(Self { doc, index })
    }

    /// Load a catalog from a JSON document on disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&raw)
    }

    /// Parse a catalog from JSON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Result<Self, LoadError> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).map_err(|e| LoadError::Malformed {
                message: e.to_string(),
            })?;
        Self::from_document(doc)
    }

    /// Serialize the catalog back to its JSON source form. Round-trips
    /// losslessly: loading the result reproduces the same active-rule
    /// answers for every selection.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let raw = serde_json::to_string_pretty(&self.doc).map_err(|e| SaveError::Serialize {
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All enabled rules; with a selection, further restricted to rules
    /// whose set membership intersects the selected set names. A pure
    /// filter with no side effects.
    pub fn active_rules(&self, selected_sets: Option<&BTreeSet<String>>) -> Vec<Rule> {
        self.doc
            .rules
            .iter()
            .filter(|r| r.enabled)
            .filter(|r| match selected_sets {
                Some(sel) => r.sets.iter().any(|s| sel.contains(s)),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Look up a rule by stable id.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.index.get(id).map(|&i| &self.doc.rules[i])
    }

    /// Look up a parameter value on a rule.
    pub fn parameter(&self, rule_id: &str, name: &str) -> Option<&ParameterValue> {
        self.rule(rule_id)
            .and_then(|r| r.parameters.get(name))
            .map(|p| &p.value)
    }

    /// Update a parameter value. The new value must match the declared
    /// variant; numeric values must fall inside the declared bounds.
    /// Out-of-range values are rejected, not clamped, and the catalog
    /// state stays unchanged on any error.
    pub fn set_parameter(
        &mut self,
        rule_id: &str,
        name: &str,
        value: ParameterValue,
    ) -> Result<(), ValidationError> {
        let rule_idx = *self
            .index
            .get(rule_id)
            .ok_or_else(|| ValidationError::UnknownRule {
                id: rule_id.to_string(),
            })?;
        let param = self.doc.rules[rule_idx]
            .parameters
            .get_mut(name)
            .ok_or_else(|| ValidationError::UnknownParameter {
                rule_id: rule_id.to_string(),
                name: name.to_string(),
            })?;

        match (&mut param.value, value) {
            (
                ParameterValue::Number { value, min, max },
                ParameterValue::Number { value: new, .. },
            ) => {
                if new < *min || new > *max {
                    return Err(ValidationError::OutOfRange {
                        name: name.to_string(),
                        value: new,
                        min: *min,
                        max: *max,
                    });
                }
                // Declared bounds are kept; only the value moves.
                *value = new;
                Ok(())
            }
            (ParameterValue::Bool { value }, ParameterValue::Bool { value: new }) => {
                *value = new;
                Ok(())
            }
            (ParameterValue::StringList { value }, ParameterValue::StringList { value: new }) => {
                *value = new;
                Ok(())
            }
            (current, _) => Err(ValidationError::TypeMismatch {
                name: name.to_string(),
                expected: current.type_name(),
            }),
        }
    }

    /// Dependency requirements of one rule set.
    pub fn set_dependencies(&self, set_name: &str) -> Option<&BTreeMap<String, String>> {
        self.doc.sets.get(set_name).map(|s| &s.dependencies)
    }

    /// Mutable dependency requirements of one rule set.
    pub fn set_dependencies_mut(&mut self, set_name: &str) -> Option<&mut BTreeMap<String, String>> {
        self.doc.sets.get_mut(set_name).map(|s| &mut s.dependencies)
    }

    /// Merge the dependency requirements of all enabled (and, with a
    /// selection, selected) rule sets. On conflict the higher required
    /// version wins.
    pub fn merged_dependencies(
        &self,
        selected_sets: Option<&BTreeSet<String>>,
    ) -> BTreeMap<String, String> {
        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        for (name, set) in &self.doc.sets {
            if !set.enabled {
                continue;
            }
            if let Some(sel) = selected_sets {
                if !sel.contains(name) {
                    continue;
                }
            }
            for (pkg, version) in &set.dependencies {
                match merged.get(pkg) {
                    Some(existing)
                        if versions::compare(existing, version)
                            != std::cmp::Ordering::Less => {}
                    _ => {
                        merged.insert(pkg.clone(), version.clone());
                    }
                }
            }
        }
        merged
    }

    pub fn rules(&self) -> &[Rule] {
        &self.doc.rules
    }

    pub fn sets(&self) -> &BTreeMap<String, RuleSet> {
        &self.doc.sets
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.doc
    }

    /// All parameters of one rule, for configuration surfaces.
    pub fn parameters(&self, rule_id: &str) -> Option<&BTreeMap<String, Parameter>> {
        self.rule(rule_id).map(|r| &r.parameters)
    }
}
