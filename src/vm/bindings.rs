// Binding table: maps program words to operations, resolved per word at execution time

use super::instruction::Operation;
use std::collections::HashMap;

/// The words a program may call. Built once and shared across tanks.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: HashMap<&'static str, Operation>,
}

impl Bindings {
    /// Arithmetic, stack, control-flow and memory words only
    pub fn core() -> Self {
        let mut bindings = Bindings {
            table: HashMap::new(),
        };
        bindings.extend(&Operation::CORE);
        bindings
    }

    /// Core words plus the tank body's words
    pub fn tank(teleport_enabled: bool) -> Self {
        let mut bindings = Self::core();
        bindings.extend(&Operation::TANK);
        if teleport_enabled {
            bindings.extend(&Operation::TELEPORT);
        }
        bindings
    }

    pub fn extend(&mut self, operations: &[Operation]) {
        for &op in operations {
            self.table.insert(op.name(), op);
        }
    }

    pub fn lookup(&self, word: &str) -> Option<Operation> {
        self.table.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
