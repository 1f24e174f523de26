/*
[INPUT]:  Resource clients and {method, alias} pairs
[OUTPUT]: Validated alias -> (resource, operation) table
[POS]:    Facade layer - alias binding
[UPDATE]: When binding validation rules change
*/

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::http::{FloatError, Result};
use crate::resources::{Args, Resource};

/// One `{ method, alias }` pair; the alias defaults to the method name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    pub method: String,
    pub alias: Option<String>,
}

impl MethodBinding {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            alias: None,
        }
    }

    pub fn aliased(method: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn alias_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.method)
    }
}

impl From<&str> for MethodBinding {
    fn from(method: &str) -> Self {
        Self::new(method)
    }
}

impl From<(&str, &str)> for MethodBinding {
    fn from((method, alias): (&str, &str)) -> Self {
        Self::aliased(method, alias)
    }
}

/// A resource operation reachable under an alias
#[derive(Debug, Clone)]
pub struct BoundOperation {
    target: Arc<dyn Resource>,
    method: &'static str,
}

impl BoundOperation {
    pub fn namespace(&self) -> &'static str {
        self.target.namespace()
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub async fn call(&self, args: Args) -> Result<Value> {
        self.target.invoke(self.method, args).await
    }
}

/// Alias table of the facade
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: BTreeMap<String, BoundOperation>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `methods` of `target`, nested under `namespace` when given
    ///
    /// Every pair is validated before anything is installed: an empty
    /// method/alias, an operation `target` does not have, or a name that is
    /// already bound fails the whole call.
    pub fn bind(
        &mut self,
        target: &Arc<dyn Resource>,
        methods: &[MethodBinding],
        namespace: Option<&str>,
    ) -> Result<()> {
        let mut staged = Vec::with_capacity(methods.len());

        for binding in methods {
            let alias = binding.alias_name();
            if binding.method.is_empty() || alias.is_empty() {
                return Err(FloatError::Binding(format!(
                    "Not a valid method/alias setting: {binding:?}"
                )));
            }

            let method = target
                .operations()
                .iter()
                .copied()
                .find(|op| *op == binding.method)
                .ok_or_else(|| {
                    FloatError::Binding(format!(
                        "Invalid method on target ({}): {}",
                        target.namespace(),
                        binding.method
                    ))
                })?;

            let name = match namespace {
                Some(ns) if !ns.is_empty() => format!("{ns}.{alias}"),
                _ => alias.to_string(),
            };
            if self.entries.contains_key(&name) || staged.iter().any(|(n, _)| *n == name) {
                return Err(FloatError::Binding(format!("alias already bound: {name}")));
            }

            staged.push((
                name,
                BoundOperation {
                    target: Arc::clone(target),
                    method,
                },
            ));
        }

        self.entries.extend(staged);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BoundOperation> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Bound names in lexical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;
    use crate::resources::{Cards, Scoring};

    fn scoring() -> Arc<dyn Resource> {
        Arc::new(Scoring::new(Arc::new(MockTransport::new())))
    }

    #[test]
    fn test_bind_alias_and_plain_name() {
        let mut table = BindingTable::new();
        table
            .bind(
                &scoring(),
                &[("addBank", "addBankAccount").into(), "getScore".into()],
                None,
            )
            .unwrap();

        assert_eq!(table.get("addBankAccount").unwrap().method(), "addBank");
        assert_eq!(table.get("getScore").unwrap().namespace(), "scoring");
        assert!(!table.contains("addBank"));
    }

    #[test]
    fn test_bind_nested_under_namespace() {
        let mut table = BindingTable::new();
        let cards: Arc<dyn Resource> = Arc::new(Cards::new(Arc::new(MockTransport::new())));
        table.bind(&cards, &["getCard".into()], Some("cards")).unwrap();
        assert!(table.contains("cards.getCard"));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["cards.getCard"]);
    }

    #[test]
    fn test_bind_missing_method_installs_nothing() {
        let mut table = BindingTable::new();
        let err = table
            .bind(&scoring(), &["getScore".into(), "launchRocket".into()], None)
            .unwrap_err();
        match err {
            FloatError::Binding(message) => assert!(message.contains("launchRocket")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_bind_rejects_duplicates_and_empty_names() {
        let mut table = BindingTable::new();
        table.bind(&scoring(), &["getBankAccount".into()], None).unwrap();

        let dup = table.bind(&scoring(), &["getBankAccount".into()], None);
        assert!(matches!(dup, Err(FloatError::Binding(_))));

        let empty = table.bind(&scoring(), &[MethodBinding::aliased("getScore", "")], None);
        assert!(matches!(empty, Err(FloatError::Binding(_))));
        assert_eq!(table.len(), 1);
    }
}
