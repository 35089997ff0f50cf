use goat_cli::parser::suggest::levenshtein_distance;
use goat_cli::parser::{
    ComparisonOp, Compiler, ExpressionError, IndexType, Registry, TypeOf, Variable,
};
use proptest::prelude::*;
use proptest::sample::select;
use slog::{o, Logger};

fn logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

fn free_variables(registry: &Registry) -> Vec<&'static str> {
    registry
        .iter()
        .filter(|v| !v.is_enum())
        .map(|v| v.name)
        .collect()
}

type Operator = (&'static str, ComparisonOp);

const ORDERED: &[Operator] = &[
    ("=", ComparisonOp::Eq),
    ("==", ComparisonOp::Eq),
    ("!=", ComparisonOp::NotEq),
    ("<", ComparisonOp::Lt),
    ("<=", ComparisonOp::LtEq),
    (">", ComparisonOp::Gt),
    (">=", ComparisonOp::GtEq),
];

const FREE_KEYWORD: &[Operator] = &[
    ("=", ComparisonOp::Eq),
    ("==", ComparisonOp::Eq),
    ("!=", ComparisonOp::NotEq),
];

const ENUM_KEYWORD: &[Operator] = &[
    ("=", ComparisonOp::Eq),
    ("==", ComparisonOp::Eq),
    ("!=", ComparisonOp::NotEq),
    ("contains", ComparisonOp::Contains),
];

fn operators_for(variable: &Variable) -> &'static [Operator] {
    match variable.kind {
        TypeOf::Keyword if variable.is_enum() => ENUM_KEYWORD,
        TypeOf::Keyword => FREE_KEYWORD,
        _ => ORDERED,
    }
}

/// Literal text a variable accepts, written the way the backend query shows it
fn value_for(variable: &Variable) -> BoxedStrategy<String> {
    match variable.kind {
        TypeOf::Integer | TypeOf::Long | TypeOf::Short => {
            (-1000i64..1000).prop_map(|v| v.to_string()).boxed()
        }
        TypeOf::HalfFloat => (0u32..600_000)
            .prop_map(|n| (n as f64 / 100.0).to_string())
            .boxed(),
        TypeOf::OneDP => (0u32..10_000)
            .prop_map(|n| format!("{}.{}", n / 10, n % 10))
            .boxed(),
        TypeOf::TwoDP => (0u32..10_000)
            .prop_map(|n| format!("{}.{:02}", n / 100, n % 100))
            .boxed(),
        TypeOf::Date => (1990i32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
            .boxed(),
        TypeOf::Keyword if variable.is_enum() => select(variable.values)
            .prop_map(str::to_string)
            .boxed(),
        TypeOf::Keyword => "[a-z][a-z0-9]{0,8}"
            .prop_filter("operator word", |v| v != "contains")
            .boxed(),
    }
}

/// Backend filter text expected for one clause
fn expected_render(name: &str, op: ComparisonOp, value: &str) -> String {
    if name == "tax_rank" && matches!(op, ComparisonOp::Eq | ComparisonOp::Contains) {
        return format!("tax_rank({})", value);
    }
    let op = match op {
        ComparisonOp::Contains => ComparisonOp::Eq,
        op => op,
    };
    format!("{}{}{}", name, op, value)
}

fn expressions() -> impl Strategy<Value = (IndexType, Vec<(Variable, Operator, String)>)> {
    select(vec![IndexType::Taxon, IndexType::Assembly]).prop_flat_map(|index| {
        let variables: Vec<Variable> = Registry::new(index).iter().copied().collect();
        let clause = select(variables)
            .prop_flat_map(|v| (Just(v), select(operators_for(&v)), value_for(&v)));
        (Just(index), proptest::collection::vec(clause, 1..4))
    })
}

proptest! {
    #[test]
    fn valid_clauses_compile_to_their_inputs((index, clauses) in expressions()) {
        let registry = Registry::new(index);
        let compiler = Compiler::new(&registry).with_max_length(10_000);
        let text = clauses
            .iter()
            .map(|(variable, (op, _), value)| format!("{} {} {}", variable.name, op, value))
            .collect::<Vec<_>>()
            .join(" AND ");

        let first = compiler.compile(&logger(), &text).unwrap();
        let second = compiler.compile(&logger(), &text).unwrap();
        prop_assert_eq!(&first, &second);

        let compiled: Vec<_> = first.clauses().collect();
        prop_assert_eq!(compiled.len(), clauses.len());
        for (clause, (variable, (_, op), value)) in compiled.iter().zip(clauses.iter()) {
            prop_assert_eq!(clause.variable.as_str(), variable.name);
            prop_assert_eq!(clause.kind, variable.kind);
            prop_assert_eq!(clause.operator, *op);
            prop_assert_eq!(&clause.kind.render(&clause.value), value);
            prop_assert_eq!(clause.render(), expected_render(variable.name, *op, value));
        }

        let query = clauses
            .iter()
            .map(|(variable, (_, op), value)| expected_render(variable.name, *op, value))
            .collect::<Vec<_>>()
            .join(" AND ");
        prop_assert_eq!(first.to_query(), query);
    }

    #[test]
    fn unknown_names_suggest_the_nearest(name in "[a-z_]{1,20}") {
        let registry = Registry::new(IndexType::Taxon);
        prop_assume!(!registry.contains(&name));
        prop_assume!(!["contains", "tax_name", "tax_tree", "tax_lineage"].contains(&name.as_str()));

        let text = format!("{}=1", name);
        let err = Compiler::new(&registry).compile(&logger(), &text).unwrap_err();
        match err {
            ExpressionError::InputVariable { variable, suggestion, .. } => {
                prop_assert_eq!(&variable, &name);
                let suggestion = suggestion.unwrap();
                let best = registry
                    .names()
                    .map(|n| levenshtein_distance(&name, n))
                    .min()
                    .unwrap();
                prop_assert_eq!(levenshtein_distance(&name, &suggestion), best);
            }
            other => prop_assert!(false, "expected InputVariable, got {:?}", other),
        }
    }

    #[test]
    fn contains_on_free_variables_fails(
        name in select(free_variables(&Registry::new(IndexType::Taxon))),
        value in "[a-z0-9]{1,10}",
    ) {
        prop_assume!(value != "contains");
        let registry = Registry::new(IndexType::Taxon);
        let text = format!("{} contains {}", name, value);
        let err = Compiler::new(&registry).compile(&logger(), &text).unwrap_err();
        prop_assert!(
            matches!(err, ExpressionError::KeywordContains { .. }),
            "{}: {:?}",
            text,
            err
        );
    }
}
