//! Account tree construction.
//!
//! The chart of accounts is loaded into an arena indexed by position in the
//! account list. Construction is a fixed pipeline of phases, each consuming
//! the previous state:
//!
//! 1. [`AccountArena::mark_all_pruned`]
//! 2. [`AccountArena::attach_value_maps`] (rolls balances up to every ancestor)
//! 3. [`AccountArena::link_children`]
//! 4. [`AccountArena::detach_non_roots`]
//! 5. [`RootedArena::prune`]
//!
//! The result is an owned forest containing only accounts with activity in
//! themselves or a descendant.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::ledger::{Account, RootType};

use super::error::ReportError;
use super::grouping::{AccountValueMaps, ValueMap};

/// Index of a node in the arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct ArenaNode {
    account: Account,
    parent: Option<NodeId>,
    value_map: Option<ValueMap>,
    children: Vec<NodeId>,
    prune: bool,
}

/// Flat, index-linked chart of accounts under construction.
#[derive(Debug, Clone)]
pub struct AccountArena {
    nodes: Vec<ArenaNode>,
    index: HashMap<String, NodeId>,
}

impl AccountArena {
    /// Loads the account list, resolving parent references to node ids.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DataIntegrity` if an account name repeats, a
    /// parent is missing, or a parent chain loops.
    pub fn from_accounts(accounts: &[Account]) -> Result<Self, ReportError> {
        let mut index = HashMap::with_capacity(accounts.len());
        for (id, account) in accounts.iter().enumerate() {
            if index.insert(account.name.clone(), id).is_some() {
                return Err(ReportError::DataIntegrity(format!(
                    "account '{}' appears more than once",
                    account.name
                )));
            }
        }

        let mut nodes = Vec::with_capacity(accounts.len());
        for account in accounts {
            let parent = match account.parent_account.as_deref() {
                None => None,
                Some(parent) => Some(
                    *index
                        .get(parent)
                        .ok_or_else(|| ReportError::missing_parent(&account.name, parent))?,
                ),
            };
            nodes.push(ArenaNode {
                account: account.clone(),
                parent,
                value_map: None,
                children: Vec::new(),
                prune: false,
            });
        }

        let arena = Self { nodes, index };
        arena.check_acyclic()?;
        Ok(arena)
    }

    fn check_acyclic(&self) -> Result<(), ReportError> {
        for (id, node) in self.nodes.iter().enumerate() {
            let mut current = node.parent;
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if parent == id || steps > self.nodes.len() {
                    return Err(ReportError::parent_cycle(&node.account.name));
                }
                current = self.nodes[parent].parent;
            }
        }
        Ok(())
    }

    /// Phase 1: flags every node for removal.
    #[must_use]
    pub fn mark_all_pruned(mut self) -> Self {
        for node in &mut self.nodes {
            node.prune = true;
        }
        self
    }

    /// Phase 2: attaches each account's balances and adds them to every
    /// ancestor, clearing the prune flag along the way.
    ///
    /// An account's own balances are merged into whatever its descendants
    /// already contributed, so the order of `value_maps` does not matter.
    /// Balances for accounts outside the chart are skipped.
    #[must_use]
    pub fn attach_value_maps(mut self, value_maps: &AccountValueMaps) -> Self {
        for (name, value_map) in value_maps {
            if value_map.is_empty() {
                continue;
            }
            let Some(&id) = self.index.get(name) else {
                warn!(account = %name, "balances for account missing from chart skipped");
                continue;
            };

            let mut current = Some(id);
            while let Some(node_id) = current {
                let node = &mut self.nodes[node_id];
                node.prune = false;
                merge_into(node.value_map.get_or_insert_with(ValueMap::new), value_map);
                current = node.parent;
            }
        }
        self
    }

    /// Phase 3: records each node as a child of its parent, in account-list order.
    #[must_use]
    pub fn link_children(mut self) -> Self {
        for id in 0..self.nodes.len() {
            if let Some(parent) = self.nodes[id].parent {
                self.nodes[parent].children.push(id);
            }
        }
        self
    }

    /// Phase 4: keeps only root nodes addressable at the top level.
    #[must_use]
    pub fn detach_non_roots(self) -> RootedArena {
        let roots = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect();
        RootedArena { arena: self, roots }
    }

    /// Aggregated balances of an account, if it has any.
    #[must_use]
    pub fn value_map(&self, name: &str) -> Option<&ValueMap> {
        self.node(name)?.value_map.as_ref()
    }

    /// Whether an account is currently flagged for removal.
    #[must_use]
    pub fn is_pruned(&self, name: &str) -> Option<bool> {
        self.node(name).map(|node| node.prune)
    }

    fn node(&self, name: &str) -> Option<&ArenaNode> {
        self.index.get(name).map(|&id| &self.nodes[id])
    }
}

fn merge_into(target: &mut ValueMap, source: &ValueMap) {
    for (range, balance) in source {
        target.entry(*range).or_default().merge(balance);
    }
}

/// Arena whose top level holds only root accounts.
#[derive(Debug, Clone)]
pub struct RootedArena {
    arena: AccountArena,
    roots: Vec<NodeId>,
}

impl RootedArena {
    /// Names of the top-level accounts.
    #[must_use]
    pub fn root_names(&self) -> Vec<&str> {
        self.roots
            .iter()
            .map(|&id| self.arena.nodes[id].account.name.as_str())
            .collect()
    }

    /// Phase 5: drops flagged roots and, recursively, flagged children.
    #[must_use]
    pub fn prune(self) -> AccountForest {
        let roots = self
            .roots
            .iter()
            .filter_map(|&id| self.materialize(id))
            .collect();
        AccountForest { roots }
    }

    fn materialize(&self, id: NodeId) -> Option<AccountTreeNode> {
        let node = &self.arena.nodes[id];
        if node.prune {
            return None;
        }
        let children = node
            .children
            .iter()
            .filter_map(|&child| self.materialize(child))
            .collect();
        Some(AccountTreeNode {
            account: node.account.clone(),
            value_map: node.value_map.clone().unwrap_or_default(),
            children,
        })
    }
}

/// An account with its aggregated balances and surviving children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTreeNode {
    /// The chart-of-accounts entry.
    pub account: Account,
    /// Own balances plus those of every descendant.
    #[serde(skip)]
    pub value_map: ValueMap,
    /// Child accounts, in account-list order.
    pub children: Vec<AccountTreeNode>,
}

impl AccountTreeNode {
    /// Returns true if this node has no surviving children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Finds a node by name in this subtree.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.account.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Pruned account trees, one per surviving root account.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountForest {
    /// Root nodes in account-list order.
    pub roots: Vec<AccountTreeNode>,
}

impl AccountForest {
    /// Root nodes of the given root type.
    #[must_use]
    pub fn roots_of(&self, root_type: RootType) -> Vec<&AccountTreeNode> {
        self.roots
            .iter()
            .filter(|node| node.account.root_type == root_type)
            .collect()
    }

    /// Drops every root whose type is not listed.
    pub fn retain_root_types(&mut self, root_types: &[RootType]) {
        self.roots
            .retain(|node| root_types.contains(&node.account.root_type));
    }

    /// Finds a node by name anywhere in the forest.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&AccountTreeNode> {
        self.roots.iter().find_map(|root| root.find(name))
    }
}

/// Builds the pruned account forest from the chart and per-account balances.
///
/// # Errors
///
/// Returns `ReportError::DataIntegrity` if the chart of accounts is
/// inconsistent.
pub fn build_account_tree(
    accounts: &[Account],
    value_maps: &AccountValueMaps,
) -> Result<AccountForest, ReportError> {
    Ok(AccountArena::from_accounts(accounts)?
        .mark_all_pruned()
        .attach_value_maps(value_maps)
        .link_children()
        .detach_non_roots()
        .prune())
}
