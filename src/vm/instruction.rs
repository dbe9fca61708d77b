// Operation kinds a word can resolve to

/// Every operation the VM knows. Which of them a given program may call is
/// decided by the `Bindings` it runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Abs,
    // Comparison and logic
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
    Not,
    // Bitwise
    BitNot,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    // Stack ops
    Dup,
    Pop,
    Exch,
    // Control flow
    If,
    IfElse,
    // Memory
    MSet,
    MGet,
    // Tank host ops
    FireReady,
    Fire,
    TeleportReady,
    Teleport,
    SetSpeed,
    SetTurret,
    GetTurret,
    Sensor,
    SetLed,
    Random,
    Debug,
}

impl Operation {
    /// Operations every program gets, whatever it runs inside
    pub const CORE: [Operation; 27] = [
        Operation::BitNot,
        Operation::Not,
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
        Operation::Mod,
        Operation::And,
        Operation::Or,
        Operation::Xor,
        Operation::Shl,
        Operation::Shr,
        Operation::Gt,
        Operation::Ge,
        Operation::Lt,
        Operation::Le,
        Operation::Eq,
        Operation::Ne,
        Operation::Abs,
        Operation::Dup,
        Operation::Pop,
        Operation::Exch,
        Operation::If,
        Operation::IfElse,
        Operation::MSet,
        Operation::MGet,
        Operation::Debug,
    ];

    /// Operations a tank body supplies
    pub const TANK: [Operation; 8] = [
        Operation::FireReady,
        Operation::Fire,
        Operation::SetSpeed,
        Operation::SetTurret,
        Operation::GetTurret,
        Operation::Sensor,
        Operation::SetLed,
        Operation::Random,
    ];

    pub const TELEPORT: [Operation; 2] = [Operation::TeleportReady, Operation::Teleport];

    /// The word that names this operation in program source
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
            Operation::Mod => "%",
            Operation::Abs => "abs",
            Operation::Gt => ">",
            Operation::Ge => ">=",
            Operation::Lt => "<",
            Operation::Le => "<=",
            Operation::Eq => "=",
            Operation::Ne => "<>",
            Operation::Not => "!",
            Operation::BitNot => "~",
            Operation::And => "&",
            Operation::Or => "|",
            Operation::Xor => "^",
            Operation::Shl => "<<",
            Operation::Shr => ">>",
            Operation::Dup => "dup",
            Operation::Pop => "pop",
            Operation::Exch => "exch",
            Operation::If => "if",
            Operation::IfElse => "ifelse",
            Operation::MSet => "mset",
            Operation::MGet => "mget",
            Operation::FireReady => "fire-ready?",
            Operation::Fire => "fire!",
            Operation::TeleportReady => "teleport-ready?",
            Operation::Teleport => "teleport!",
            Operation::SetSpeed => "set-speed!",
            Operation::SetTurret => "set-turret!",
            Operation::GetTurret => "get-turret",
            Operation::Sensor => "sensor?",
            Operation::SetLed => "set-led!",
            Operation::Random => "random",
            Operation::Debug => "debug!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let all: Vec<Operation> = Operation::CORE
            .iter()
            .chain(Operation::TANK.iter())
            .chain(Operation::TELEPORT.iter())
            .copied()
            .collect();
        let names: HashSet<&str> = all.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), all.len());
    }
}
