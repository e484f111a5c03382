// SPDX-License-Identifier: MIT OR Apache-2.0

use petgraph::graphmap::DiGraphMap;

use crate::graph::{aggregation_graph, closure, has_cycle, leaves};
use crate::names;
use crate::test_utils::MemoryError;
use crate::traits::NativePrivilege;

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryPrivilege {
    pub name: String,
    pub is_abstract: bool,
    pub declared_aggregate_privileges: Vec<MemoryPrivilege>,
    pub aggregate_privileges: Vec<MemoryPrivilege>,
}

impl MemoryPrivilege {
    /// Return `true` if holding this privilege implies holding `name`.
    pub fn covers(&self, name: &str) -> bool {
        self.name == name || self.aggregate_privileges.iter().any(|p| p.name == name)
    }
}

impl NativePrivilege for MemoryPrivilege {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn declared_aggregate_privileges(&self) -> &[Self] {
        &self.declared_aggregate_privileges
    }

    fn aggregate_privileges(&self) -> &[Self] {
        &self.aggregate_privileges
    }
}

#[derive(Clone, Debug)]
struct Declaration {
    name: String,
    is_abstract: bool,
    children: Vec<String>,
}

/// Privilege registry, in registration order.
#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    declarations: Vec<Declaration>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a privilege or redeclare an existing one.
    ///
    /// Children must be registered first and the aggregation hierarchy must stay acyclic.
    pub fn register(
        &mut self,
        name: &str,
        is_abstract: bool,
        children: &[&str],
    ) -> Result<(), MemoryError> {
        if let Some(child) = children.iter().find(|child| !self.contains(child)) {
            return Err(MemoryError::UnknownPrivilege(child.to_string()));
        }

        let declaration = Declaration {
            name: name.to_owned(),
            is_abstract,
            children: children.iter().map(|child| child.to_string()).collect(),
        };
        let previous = match self.declarations.iter().position(|d| d.name == name) {
            Some(index) => Some((index, std::mem::replace(&mut self.declarations[index], declaration))),
            None => {
                self.declarations.push(declaration);
                None
            }
        };

        if has_cycle(&self.graph()) {
            match previous {
                Some((index, declaration)) => self.declarations[index] = declaration,
                None => {
                    self.declarations.pop();
                }
            }
            return Err(MemoryError::CyclicAggregation(name.to_owned()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }

    /// Descriptor of `name` with both child lists filled in.
    pub fn descriptor(&self, name: &str) -> Result<MemoryPrivilege, MemoryError> {
        let graph = self.graph();
        self.describe(&graph, name)
    }

    /// Non-aggregate privileges implied by `name`.
    pub fn leaves(&self, name: &str) -> Result<Vec<String>, MemoryError> {
        if !self.contains(name) {
            return Err(MemoryError::UnknownPrivilege(name.to_owned()));
        }
        Ok(leaves(&self.graph(), name)
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    fn graph(&self) -> DiGraphMap<&str, ()> {
        aggregation_graph(self.declarations.iter().map(|d| {
            (
                d.name.as_str(),
                d.children.iter().map(String::as_str),
            )
        }))
    }

    fn describe(&self, graph: &DiGraphMap<&str, ()>, name: &str) -> Result<MemoryPrivilege, MemoryError> {
        let declaration = self
            .declarations
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| MemoryError::UnknownPrivilege(name.to_owned()))?;

        let declared_aggregate_privileges = declaration
            .children
            .iter()
            .map(|child| self.describe(graph, child))
            .collect::<Result<_, _>>()?;
        let aggregate_privileges = closure(graph, name)
            .into_iter()
            .map(|child| self.describe(graph, child))
            .collect::<Result<_, _>>()?;

        Ok(MemoryPrivilege {
            name: declaration.name.clone(),
            is_abstract: declaration.is_abstract,
            declared_aggregate_privileges,
            aggregate_privileges,
        })
    }
}

/// Registry holding the standard privileges with `jcr:write` and `jcr:all` as aggregates.
pub fn standard_registry() -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    for name in names::WRITE_AGGREGATES {
        registry.register(name, false, &[]).expect("leaf privilege");
    }
    for name in names::ALL_AGGREGATES.iter().filter(|name| **name != names::WRITE) {
        registry.register(name, false, &[]).expect("leaf privilege");
    }
    registry
        .register(names::WRITE, false, &names::WRITE_AGGREGATES)
        .expect("write aggregate");
    registry
        .register(names::ALL, false, &names::ALL_AGGREGATES)
        .expect("all aggregate");
    registry
}
