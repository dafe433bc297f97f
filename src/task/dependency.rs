use std::collections::HashSet;

use super::Registry;
use crate::error::{RaskError, Result};

pub fn validate(registry: &Registry) -> Result<()> {
    for task in registry.tasks() {
        for prereq in &task.prerequisites {
            if !registry.contains(prereq) {
                return Err(RaskError::unknown_task_in(prereq, &task.id));
            }
        }
    }

    for target in registry.default_targets() {
        if !registry.contains(target) {
            return Err(RaskError::unknown_task_in(target, "default"));
        }
    }

    detect_cycles(registry)
}

/// The order in which tasks run for a given target: prerequisites
/// depth-first, left-to-right, each task at most once, the target last.
pub fn execution_order(registry: &Registry, target: &str) -> Result<Vec<String>> {
    if !registry.contains(target) {
        return Err(RaskError::unknown_task(target));
    }

    let mut order = Vec::new();
    let mut seen = HashSet::new();
    visit(registry, target, &mut seen, &mut order)?;
    Ok(order)
}

fn visit(
    registry: &Registry,
    name: &str,
    seen: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    if !seen.insert(name.to_string()) {
        return Ok(());
    }

    let task = registry
        .get(name)
        .ok_or_else(|| RaskError::unknown_task(name))?;

    for prereq in &task.prerequisites {
        visit(registry, prereq, seen, order)?;
    }

    order.push(name.to_string());
    Ok(())
}

fn detect_cycles(registry: &Registry) -> Result<()> {
    let mut visited = HashSet::new();

    for task in registry.tasks() {
        let mut path = Vec::new();

        if has_cycle(registry, &task.id, &mut visited, &mut path) {
            path.push(task.id.clone());
            return Err(RaskError::Cycle(path));
        }
    }

    Ok(())
}

fn has_cycle(
    registry: &Registry,
    name: &str,
    visited: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> bool {
    if path.iter().any(|id| id == name) {
        return true;
    }

    if visited.contains(name) {
        return false;
    }

    visited.insert(name.to_string());
    path.push(name.to_string());

    if let Some(task) = registry.get(name) {
        for prereq in &task.prerequisites {
            if has_cycle(registry, prereq, visited, path) {
                return true;
            }
        }
    }

    path.pop();

    false
}
