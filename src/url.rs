//! Turn compiled expressions and field selections into backend request URLs

use std::fmt;

use itertools::Itertools;
use slog::{debug, o, Logger};
use url::Url;

use crate::error::{GoatError, Result};
use crate::parser::{CLIexpression, IndexType};
use crate::{TAXONOMY, UPPER_CLI_SIZE_LIMIT};

const NAMES: &str = "synonym,tol_id,common_name";
const DIRECT_SUFFIXES: [&str; 3] = ["direct", "ancestor", "descendant"];

/// Backend endpoints that take a filter query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    Search,
    Count,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Api::Search => write!(f, "search"),
            Api::Count => write!(f, "count"),
        }
    }
}

/// Field group flags. Each flag adds a fixed set of fields for the index it
/// belongs to; flags are additive and emitted in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::Args)]
pub struct FieldBuilder {
    /// Assembly level and span
    #[arg(long)]
    pub assembly: bool,
    /// Bioproject and biosample (taxon)
    #[arg(long)]
    pub bioproject: bool,
    /// BUSCO completeness, lineage and string
    #[arg(long)]
    pub busco: bool,
    /// Country list (taxon)
    #[arg(long)]
    pub country_list: bool,
    /// C-values (taxon)
    #[arg(short, long)]
    pub c_values: bool,
    /// Assembly and EBP metric dates (taxon)
    #[arg(long)]
    pub date: bool,
    /// GC percent
    #[arg(long)]
    pub gc_percent: bool,
    /// Gene counts
    #[arg(long)]
    pub gene_count: bool,
    /// Genome size estimates (taxon)
    #[arg(short = 'G', long)]
    pub genome_size: bool,
    /// Chromosome and haploid numbers (taxon) or chromosome count (assembly)
    #[arg(short, long)]
    pub karyotype: bool,
    /// UK and Irish legislation lists (taxon)
    #[arg(long)]
    pub legislation: bool,
    /// Mitochondrial assembly span and GC percent (taxon)
    #[arg(long)]
    pub mitochondrion: bool,
    /// Contig and scaffold N50 (taxon)
    #[arg(long)]
    pub n50: bool,
    /// Plastid assembly span and GC percent (taxon)
    #[arg(long)]
    pub plastid: bool,
    /// Ploidy (taxon)
    #[arg(long)]
    pub ploidy: bool,
    /// Sex determination (taxon)
    #[arg(long)]
    pub sex_determination: bool,
    /// Sequencing status and sample tracking (taxon)
    #[arg(long)]
    pub status: bool,
    /// Long list, other priority and family representative (taxon)
    #[arg(long)]
    pub target_lists: bool,
    /// BlobToolKit no-hit and target percentages (assembly)
    #[arg(long)]
    pub btk: bool,
    /// Contig count, L50 and N50 (assembly)
    #[arg(long)]
    pub contig: bool,
    /// Scaffold count, L50 and N50 (assembly)
    #[arg(long)]
    pub scaffold: bool,
    /// Synonyms, ToL ids and common names
    #[arg(long)]
    pub names: bool,
    /// One row per value instead of one row per taxon
    #[arg(long)]
    pub tidy: bool,
    /// Add direct, ancestor and descendant columns for every field
    #[arg(long)]
    pub toggle_direct: bool,
}

/// A flag name and the fields it selects
type Group = (&'static str, &'static [&'static str]);

const TAXON_GROUPS: &[Group] = &[
    ("assembly", &["assembly_level", "assembly_span"]),
    ("bioproject", &["bioproject", "biosample"]),
    (
        "busco",
        &["busco_completeness", "odb10_lineage", "busco_lineage", "busco_string"],
    ),
    ("country-list", &["country_list"]),
    ("c-values", &["c_value"]),
    ("date", &["assembly_date", "ebp_metric_date"]),
    ("gc-percent", &["gc_percent"]),
    ("gene-count", &["gene_count"]),
    (
        "genome-size",
        &["genome_size", "genome_size_kmer", "genome_size_draft"],
    ),
    ("karyotype", &["chromosome_number", "haploid_number"]),
    (
        "legislation",
        &[
            "isb_wildlife_act_1976",
            "habreg_2017",
            "marhabreg-2017",
            "waca_1981",
            "protection_of_badgers_act_1992",
            "echabs92",
        ],
    ),
    (
        "mitochondrion",
        &["mitochondrion_assembly_span", "mitochondrion_gc_percent"],
    ),
    ("n50", &["scaffold_n50", "contig_n50"]),
    ("plastid", &["plastid_assembly_span", "plastid_gc_percent"]),
    ("ploidy", &["ploidy"]),
    ("sex-determination", &["sex_determination"]),
    (
        "status",
        &[
            "sequencing_status",
            "sample_collected",
            "sample_acquired",
            "in_progress",
            "insdc_submitted",
            "insdc_open",
            "published",
            "sample_collected_by",
        ],
    ),
    (
        "target-lists",
        &["long_list", "other_priority", "family_representative"],
    ),
];

const ASSEMBLY_GROUPS: &[Group] = &[
    ("assembly", &["assembly_level", "assembly_span"]),
    ("btk", &["btk_nohit", "btk_target"]),
    ("busco", &["busco_completeness", "busco_lineage", "busco_string"]),
    ("contig", &["contig_count", "contig_l50", "contig_n50"]),
    ("gc-percent", &["gc_percent"]),
    ("gene-count", &["gene_count", "noncoding_gene_count"]),
    ("karyotype", &["chromosome_count"]),
    ("scaffold", &["scaffold_count", "scaffold_l50", "scaffold_n50"]),
];

impl FieldBuilder {
    fn groups(index: IndexType) -> &'static [Group] {
        match index {
            IndexType::Taxon => TAXON_GROUPS,
            IndexType::Assembly => ASSEMBLY_GROUPS,
        }
    }

    /// Field group flags by their command line name
    fn flags(&self) -> [(&'static str, bool); 21] {
        [
            ("assembly", self.assembly),
            ("bioproject", self.bioproject),
            ("busco", self.busco),
            ("country-list", self.country_list),
            ("c-values", self.c_values),
            ("date", self.date),
            ("gc-percent", self.gc_percent),
            ("gene-count", self.gene_count),
            ("genome-size", self.genome_size),
            ("karyotype", self.karyotype),
            ("legislation", self.legislation),
            ("mitochondrion", self.mitochondrion),
            ("n50", self.n50),
            ("plastid", self.plastid),
            ("ploidy", self.ploidy),
            ("sex-determination", self.sex_determination),
            ("status", self.status),
            ("target-lists", self.target_lists),
            ("btk", self.btk),
            ("contig", self.contig),
            ("scaffold", self.scaffold),
        ]
    }

    fn is_set(&self, flag: &str) -> bool {
        self.flags().iter().any(|(name, set)| *name == flag && *set)
    }

    /// Fields selected by the flags, in emission order, without duplicates
    pub fn fields(&self, index: IndexType) -> Vec<&'static str> {
        Self::groups(index)
            .iter()
            .filter(|(flag, _)| self.is_set(flag))
            .flat_map(|(_, fields)| fields.iter().copied())
            .unique()
            .collect()
    }

    /// Error if a set flag has no field group for `index`
    pub fn check_index(&self, index: IndexType) -> Result<()> {
        let known: Vec<&str> = Self::groups(index).iter().map(|(flag, _)| *flag).collect();
        let foreign: Vec<&str> = self
            .flags()
            .into_iter()
            .filter(|(flag, set)| *set && !known.contains(flag))
            .map(|(flag, _)| flag)
            .collect();
        if foreign.is_empty() {
            return Ok(());
        }
        Err(GoatError::Cli {
            message: format!(
                "--{} cannot be used with the {} index",
                foreign.join(", --"),
                index
            ),
            help: Some(format!(
                "Flags for the {} index: --{}",
                index,
                known.join(", --")
            )),
        })
    }
}

/// Output column names, one per requested field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColHeader(Vec<String>);

impl ColHeader {
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ColHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("\t"))
    }
}

/// Everything needed to build search or count URLs for a list of taxa
#[derive(Debug, Clone)]
pub struct UrlBuilder<'a> {
    base: Url,
    pub api: Api,
    pub index: IndexType,
    /// `tax_tree` (taxon and descendants) instead of `tax_name`
    pub descendants: bool,
    pub include_estimates: bool,
    pub include_raw_values: bool,
    /// Exclude ancestral and missing values for every field
    pub exclude: bool,
    pub size: u64,
    /// Lineage columns, from [`crate::tax_ranks::display_ranks_from`]
    pub ranks: &'static [&'static str],
    pub fields: FieldBuilder,
    /// Fields named explicitly with `-v`, emitted ahead of flag fields
    pub variables: Vec<&'static str>,
    /// Fields dropped after everything else is selected
    pub exclude_fields: Vec<String>,
    /// Appended as `tax_rank(a,b)`
    pub tax_ranks: Vec<&'static str>,
    pub expression: Option<&'a CLIexpression>,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(base: &str, api: Api, index: IndexType) -> Result<Self> {
        Ok(UrlBuilder {
            base: base_url(base)?,
            api,
            index,
            descendants: false,
            include_estimates: false,
            include_raw_values: false,
            exclude: false,
            size: 50,
            ranks: &[],
            fields: FieldBuilder::default(),
            variables: Vec::new(),
            exclude_fields: Vec::new(),
            tax_ranks: Vec::new(),
            expression: None,
        })
    }

    /// Selected fields: `-v` variables, then flag groups, minus exclusions
    pub fn selected_fields(&self) -> Vec<&'static str> {
        self.variables
            .iter()
            .copied()
            .chain(self.fields.fields(self.index))
            .unique()
            .filter(|f| !self.exclude_fields.iter().any(|x| x == f))
            .collect()
    }

    /// Fields as sent in the `fields` parameter
    fn field_columns(&self) -> Vec<String> {
        self.selected_fields()
            .into_iter()
            .flat_map(|field| {
                let extra = self
                    .fields
                    .toggle_direct
                    .then(|| DIRECT_SUFFIXES.iter().map(move |s| format!("{}:{}", field, s)))
                    .into_iter()
                    .flatten();
                std::iter::once(field.to_string()).chain(extra)
            })
            .collect()
    }

    pub fn col_header(&self) -> ColHeader {
        ColHeader(self.field_columns())
    }

    /// Filter text for one taxon
    pub fn query(&self, taxon: &str) -> String {
        let tree = if self.descendants { "tree" } else { "name" };
        let mut query = format!("tax_{}({})", tree, taxon);
        if !self.tax_ranks.is_empty() {
            query += &format!(" AND tax_rank({})", self.tax_ranks.join(","));
        }
        if let Some(expr) = self.expression.filter(|e| !e.is_empty()) {
            query += " AND ";
            query += &expr.to_query();
        }
        query
    }

    /// One URL per taxon, in input order
    pub fn urls(&self, logger: &Logger, taxa: &[String]) -> Result<Vec<Url>> {
        if self.size > UPPER_CLI_SIZE_LIMIT {
            return Err(GoatError::Cli {
                message: format!(
                    "searches with more than {} results are not supported",
                    UPPER_CLI_SIZE_LIMIT
                ),
                help: Some("Lower --size or narrow the query".to_string()),
            });
        }

        let logger = logger.new(o!("api" => self.api.to_string(), "index" => self.index.to_string()));
        let endpoint = self.base.join(&self.api.to_string())?;
        let selected = self.selected_fields();
        let columns = self.field_columns();
        debug!(logger, "selected fields"; "fields" => columns.join(","));

        let urls: Vec<Url> = taxa
            .iter()
            .enumerate()
            .map(|(i, taxon)| {
                let mut url = endpoint.clone();
                {
                    let mut pairs = url.query_pairs_mut();
                    pairs
                        .append_pair("query", &self.query(taxon))
                        .append_pair("includeEstimates", &self.include_estimates.to_string())
                        .append_pair("includeRawValues", &self.include_raw_values.to_string())
                        .append_pair("summaryValues", "count")
                        .append_pair("result", &self.index.to_string())
                        .append_pair("taxonomy", TAXONOMY)
                        .append_pair("size", &self.size.to_string());
                    if !self.ranks.is_empty() {
                        pairs.append_pair("ranks", &self.ranks.join(","));
                    }
                    if !columns.is_empty() {
                        pairs.append_pair("fields", &columns.join(","));
                    }
                    if self.fields.tidy {
                        pairs.append_pair("tidyData", "true");
                    }
                    if self.fields.names {
                        pairs.append_pair("names", NAMES);
                    }
                    pairs.append_pair("queryId", &format!("goat_cli_{}", i));
                    if self.exclude {
                        for (n, field) in selected.iter().enumerate() {
                            pairs
                                .append_pair(&format!("excludeAncestral[{}]", n), field)
                                .append_pair(&format!("excludeMissing[{}]", n), field);
                        }
                    }
                }
                debug!(logger, "built url"; "taxon" => taxon.as_str(), "url" => %url);
                url
            })
            .collect();

        Ok(urls)
    }
}

/// URL for the name lookup endpoint
pub fn lookup_url(base: &str, search_term: &str, size: u64, index: IndexType) -> Result<Url> {
    let mut url = base_url(base)?.join("lookup")?;
    url.query_pairs_mut()
        .append_pair("searchTerm", search_term)
        .append_pair("size", &size.to_string())
        .append_pair("result", &index.to_string())
        .append_pair("taxonomy", TAXONOMY);
    Ok(url)
}

/// Parse the API root, making sure relative joins append to it
fn base_url(base: &str) -> Result<Url> {
    if base.ends_with('/') {
        Ok(Url::parse(base)?)
    } else {
        Ok(Url::parse(&format!("{}/", base))?)
    }
}
