use goat_cli::parser::{Compiler, IndexType, Registry};
use goat_cli::tax_ranks::{display_ranks_from, parse_tax_ranks};
use goat_cli::url::{lookup_url, Api, UrlBuilder};
use goat_cli::variables::parse_variables;
use goat_cli::{GoatError, GOAT_URL};
use slog::{o, Logger};
use url::Url;

fn logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn test_expression_reaches_the_query() {
    let registry = Registry::new(IndexType::Taxon);
    let expr = Compiler::new(&registry)
        .compile(&logger(), "tax_rank(genus) AND assembly_span>1000000")
        .unwrap();

    let mut builder = UrlBuilder::new(GOAT_URL, Api::Search, IndexType::Taxon).unwrap();
    builder.descendants = true;
    builder.expression = Some(&expr);
    builder.variables = parse_variables(&registry, "assembly_span,assembly_level").unwrap();
    builder.ranks = display_ranks_from("genus").unwrap();

    let urls = builder
        .urls(&logger(), &["Lepidoptera".to_string()])
        .unwrap();
    let url = &urls[0];

    assert!(url.as_str().starts_with("https://goat.genomehubs.org/api/v2/search?query="));
    assert_eq!(
        param(url, "query").as_deref(),
        Some("tax_tree(Lepidoptera) AND tax_rank(genus) AND assembly_span>1000000")
    );
    assert_eq!(param(url, "fields").as_deref(), Some("assembly_span,assembly_level"));
    assert_eq!(
        param(url, "ranks").as_deref(),
        Some("genus,family,order,class,phylum,kingdom,superkingdom")
    );
    assert_eq!(param(url, "summaryValues").as_deref(), Some("count"));
    assert_eq!(param(url, "taxonomy").as_deref(), Some("ncbi"));
}

#[test]
fn test_flag_fields_follow_variables() {
    let registry = Registry::new(IndexType::Assembly);
    let mut builder = UrlBuilder::new(GOAT_URL, Api::Search, IndexType::Assembly).unwrap();
    builder.variables = parse_variables(&registry, "contig_n50").unwrap();
    builder.fields.contig = true;
    builder.fields.btk = true;

    assert_eq!(
        builder.selected_fields(),
        vec!["contig_n50", "btk_nohit", "btk_target", "contig_count", "contig_l50"]
    );
    assert_eq!(
        builder.col_header().to_string(),
        "contig_n50\tbtk_nohit\tbtk_target\tcontig_count\tcontig_l50"
    );
}

#[test]
fn test_tax_rank_filter() {
    let mut builder = UrlBuilder::new(GOAT_URL, Api::Count, IndexType::Taxon).unwrap();
    builder.tax_ranks = parse_tax_ranks("species,subspecies").unwrap();
    assert_eq!(
        builder.query("9606"),
        "tax_name(9606) AND tax_rank(species,subspecies)"
    );

    assert!(matches!(
        parse_tax_ranks("specis").unwrap_err(),
        GoatError::TaxRank { ref help, .. } if help.as_deref().unwrap().starts_with("Did you mean: species?")
    ));
}

#[test]
fn test_lookup() {
    let url = lookup_url(GOAT_URL, "Danio rerio", 5, IndexType::Assembly).unwrap();
    assert_eq!(
        url.as_str(),
        "https://goat.genomehubs.org/api/v2/lookup?searchTerm=Danio+rerio&size=5&result=assembly&taxonomy=ncbi"
    );
}
