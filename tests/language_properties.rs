use proptest::prelude::*;
use tankarena::vm::{InstructionExecutor, Program, VMFault, Value, parse_program};

fn value_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        (-100_000i64..100_000).prop_map(|n| Value::Number(n as f64)),
        prop::sample::select(vec!["dup", "exch", "+", "<>", "fire!", "sensor?", "ifelse", "frob"])
            .prop_map(|word| Value::Word(word.to_string())),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::Block)
    })
}

fn fault(source: &str) -> Option<VMFault> {
    InstructionExecutor::default()
        .evaluate(source)
        .err()
        .and_then(|err| err.fault().cloned())
}

proptest! {
    /// Printing a program and parsing it back gives the same program
    #[test]
    fn prop_parse_round_trip(values in prop::collection::vec(value_tree(), 0..8)) {
        let program = Program { values };
        let reparsed = parse_program(&program.to_string()).unwrap();
        prop_assert_eq!(reparsed, program);
    }

    /// Integer arithmetic matches direct evaluation, second-popped on the left
    #[test]
    fn prop_arithmetic_matches_postfix(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let executor = InstructionExecutor::default();
        let eval = |op: &str| executor.evaluate(&format!("{} {} {}", a, b, op)).unwrap();

        prop_assert_eq!(eval("+"), vec![Value::Number((a + b) as f64)]);
        prop_assert_eq!(eval("-"), vec![Value::Number((a - b) as f64)]);
        prop_assert_eq!(eval("*"), vec![Value::Number((a * b) as f64)]);
        prop_assert_eq!(eval(">"), vec![Value::from(a > b)]);
        prop_assert_eq!(eval("<="), vec![Value::from(a <= b)]);
        prop_assert_eq!(eval("<>"), vec![Value::from(a != b)]);
        if b != 0 {
            prop_assert_eq!(eval("%"), vec![Value::Number((a % b) as f64)]);
            prop_assert_eq!(eval("/"), vec![Value::Number(a as f64 / b as f64)]);
        }
    }

    /// Dividing by zero is a fault, never an infinity or NaN
    #[test]
    fn prop_division_by_zero_faults(a in -10_000i64..10_000) {
        prop_assert_eq!(fault(&format!("{} 0 /", a)), Some(VMFault::DivisionByZero));
        prop_assert_eq!(fault(&format!("{} 0 %", a)), Some(VMFault::DivisionByZero));
    }

    /// Only addresses 0 through 9 exist
    #[test]
    fn prop_memory_bounds(address in prop_oneof![-1_000i64..0, 10i64..1_000]) {
        prop_assert_eq!(
            fault(&format!("{} mget", address)),
            Some(VMFault::InvalidMemoryAddress(address as f64))
        );
        prop_assert_eq!(
            fault(&format!("1 {} mset", address)),
            Some(VMFault::InvalidMemoryAddress(address as f64))
        );
    }

    /// A stored value comes back untouched after unrelated work
    #[test]
    fn prop_memory_holds_value(address in 0i64..10, value in -10_000i64..10_000) {
        let source = format!(
            "{} {} mset 3 4 + dup * pop 1 {{ 5 6 exch pop pop }} if {} mget",
            value, address, address
        );
        let stack = InstructionExecutor::default().evaluate(&source).unwrap();
        prop_assert_eq!(stack, vec![Value::Number(value as f64)]);
    }

    /// Exactly one branch of ifelse runs, in source order
    #[test]
    fn prop_ifelse_takes_one_branch(condition in -3i64..3) {
        let source = format!("{} {{ 1 2 }} {{ 3 4 }} ifelse", condition);
        let stack = InstructionExecutor::default().evaluate(&source).unwrap();
        let expected = if condition != 0 { [1.0, 2.0] } else { [3.0, 4.0] };
        prop_assert_eq!(stack, expected.map(Value::Number).to_vec());
    }
}
