use goat_cli::parser::{
    CLIexpression, ComparisonOp, Compiler, ExpressionError, Function, IndexType, Literal,
    Registry, TypeOf,
};
use slog::{o, Logger};

fn compile(index: IndexType, expr: &str) -> Result<CLIexpression, ExpressionError> {
    let registry = Registry::new(index);
    let logger = Logger::root(slog::Discard, o!());
    Compiler::new(&registry).compile(&logger, expr)
}

#[test]
fn test_genus_with_large_assemblies() {
    let expr = compile(
        IndexType::Taxon,
        "tax_rank(genus) AND assembly_span>1000000",
    )
    .unwrap();

    assert_eq!(expr.groups().len(), 2);
    let clauses: Vec<_> = expr.clauses().collect();

    assert_eq!(clauses[0].variable, "tax_rank");
    assert_eq!(clauses[0].operator, ComparisonOp::Contains);
    assert_eq!(clauses[0].function, Function::Keyword);

    assert_eq!(clauses[1].variable, "assembly_span");
    assert_eq!(clauses[1].operator, ComparisonOp::Gt);
    assert_eq!(clauses[1].value, Literal::Integer(1_000_000));

    let query = expr.to_query();
    assert!(query.contains("tax_rank(genus)"));
    assert!(query.contains("assembly_span>1000000"));
    assert!(query.contains(" AND "));
    assert_eq!(expr.to_string(), query);
}

#[test]
fn test_bogus_field() {
    let err = compile(IndexType::Taxon, "bogus_field=5").unwrap_err();
    match err {
        ExpressionError::InputVariable {
            ref variable,
            ref suggestion,
            ref help,
            ..
        } => {
            assert_eq!(variable, "bogus_field");
            let suggestion = suggestion.as_deref().expect("a suggestion");
            assert!(Registry::new(IndexType::Taxon).contains(suggestion));
            assert!(help.as_deref().unwrap().contains(suggestion));
        }
        other => panic!("expected InputVariable, got {:?}", other),
    }
    assert!(err.to_string().contains("bogus_field"));
}

#[test]
fn test_date_values() {
    let err = compile(IndexType::Taxon, "assembly_date=5").unwrap_err();
    match err {
        ExpressionError::FormatExpression {
            variable,
            expected,
            found,
            ..
        } => {
            assert_eq!(variable, "assembly_date");
            assert_eq!(expected, TypeOf::Date);
            assert_eq!(found, "5");
        }
        other => panic!("expected FormatExpression, got {:?}", other),
    }

    let expr = compile(IndexType::Taxon, "assembly_date=2020-01-01").unwrap();
    assert_eq!(expr.to_query(), "assembly_date=2020-01-01");
}

#[test]
fn test_contains_needs_an_enumerated_keyword() {
    for expr in [
        "genome_size contains 5",
        "c_value contains 1",
        "bioproject contains PRJNA1",
    ] {
        assert!(
            matches!(
                compile(IndexType::Taxon, expr).unwrap_err(),
                ExpressionError::KeywordContains { .. }
            ),
            "{}",
            expr
        );
    }
    assert!(compile(IndexType::Taxon, "long_list contains dtol").is_ok());
}

#[test]
fn test_indexes_have_their_own_variables() {
    assert!(compile(IndexType::Assembly, "contig_n50>=100000").is_ok());
    assert!(matches!(
        compile(IndexType::Assembly, "c_value<2").unwrap_err(),
        ExpressionError::InputVariable { .. }
    ));
    assert!(matches!(
        compile(IndexType::Taxon, "contig_count<2").unwrap_err(),
        ExpressionError::InputVariable { .. }
    ));
}

#[test]
fn test_first_error_wins() {
    // both clauses are wrong; the left one is reported
    let err = compile(IndexType::Taxon, "bogus=1 AND assembly_date=5").unwrap_err();
    assert!(matches!(err, ExpressionError::InputVariable { .. }));

    let err = compile(IndexType::Taxon, "assembly_date=5 AND bogus=1").unwrap_err();
    assert!(matches!(err, ExpressionError::FormatExpression { .. }));
}

#[test]
fn test_multiple_values() {
    let expr = compile(
        IndexType::Taxon,
        "sequencing_status=in_progress,published AND tax_rank(species)",
    )
    .unwrap();
    assert_eq!(
        expr.to_query(),
        "sequencing_status=in_progress,published AND tax_rank(species)"
    );

    let err = compile(IndexType::Taxon, "sequencing_status=in_progress,unpublished").unwrap_err();
    assert!(matches!(
        err,
        ExpressionError::KeywordEnum { ref value, .. } if value == "unpublished"
    ));
}

#[test]
fn test_diagnostic_codes() {
    use miette::Diagnostic;

    let err = compile(IndexType::Taxon, "genome_size>1 && c_value<2").unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "goat::keyword_and");

    let err = compile(IndexType::Taxon, "tax_tree(Aves)").unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "goat::keyword_tax");
}
