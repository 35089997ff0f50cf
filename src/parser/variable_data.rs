//! Embedded variable tables for the taxon and assembly indexes
//!
//! Variables with an empty value list are free-text keywords: they accept
//! equality filters on any value but not `contains`.

use super::registry::Variable;
use super::types::TypeOf;
use crate::tax_ranks::TAX_RANKS;

const ASSEMBLY_LEVELS: &[&str] = &["complete genome", "chromosome", "scaffold", "contig"];

const EBP_CRITERIA: &[&str] = &["6.c", "6.7", "5.c", "5.6"];

const SEQUENCING_STATUS: &[&str] = &[
    "published",
    "insdc_open",
    "open",
    "in_assembly",
    "data_generation",
    "in_progress",
    "sample_acquired",
    "sample_collected",
    "sample_available",
];

const PROJECTS: &[&str] = &[
    "africabp",
    "ag100pest",
    "agi",
    "arg",
    "asg",
    "atlasea",
    "bat1k",
    "b10k",
    "bpa",
    "canbp",
    "cbp",
    "ccgp",
    "cfgp",
    "cgp",
    "cngb",
    "dtol",
    "ebpn",
    "ein",
    "endemixit",
    "erga",
    "erga-bge",
    "erga-ch",
    "erga-pil",
    "eurofish",
    "gaga",
    "gap",
    "gbr",
    "giga",
    "i5k",
    "ilebp",
    "1kfg",
    "lmgp",
    "loewe-tbg",
    "metainvert",
    "og",
    "ogg",
    "omg",
    "other",
    "pgp",
    "phyloalps",
    "prgp",
    "psyche",
    "squalomix",
    "tsi",
    "vgp",
    "ygg",
    "zoonomia",
];

const C_VALUE_METHODS: &[&str] = &[
    "biochemical analysis",
    "bulk fluorometric assay",
    "complete genome sequencing",
    "feulgen densitometry",
    "feulgen densitometry & flow cytometry",
    "feulgen image analysis densitometry",
    "flow cytometry",
    "flow karyotyping",
    "fluorescence fading analysis",
    "gallocyanin chrom alum densitometry",
    "methyl green densitometry",
    "microdensitometry",
    "not specified",
    "pulse field gel electrophoresis",
    "reassociation kinetics",
    "static cell fluorometry",
    "ultraviolet microscopy",
    "unknown",
    "whole genome sequencing",
];

const C_VALUE_CELL_TYPES: &[&str] = &[
    "antennae",
    "antennal gland",
    "blood cells",
    "brain",
    "buccal epithelium",
    "coelomocytes",
    "corneal epithelium",
    "digestive gland",
    "dorsal fin clip",
    "egg",
    "embyro",
    "epidermis",
    "exopodite",
    "fibroblasts",
    "fin clips",
    "germarium",
    "gills",
    "haemocytes",
    "heart cells",
    "individual chromosomes",
    "intestine",
    "kidney cells",
    "legs",
    "leukocytes",
    "liver",
    "lung (culture)",
    "mantle",
    "midgut",
    "muscle cells",
    "ne",
    "not specified",
    "oocytes",
    "ovaries",
    "pancreas",
    "pharynx",
    "polypide cells in suspension",
    "red blood cells",
    "retinal cells",
    "salivary gland",
    "somatic cells",
    "sperm",
    "spleen",
    "tentacles",
    "testes",
    "thymus",
    "tissue culture",
    "various",
    "ventral hypodermal chord",
    "whole body",
    "whole body squash",
];

const COUNTRIES: &[&str] = &[
    "af", "al", "dz", "as", "ad", "ao", "ai", "aq", "ag", "ar", "am", "aw", "au", "at", "az", "bs",
    "bh", "bd", "bb", "by", "be", "bz", "bj", "bm", "bt", "bo", "bq", "ba", "bw", "bv", "br", "io",
    "bn", "bg", "bf", "bi", "cv", "kh", "cm", "ca", "ky", "cf", "td", "cl", "cn", "cx", "cc", "co",
    "km", "cd", "cg", "ck", "cr", "hr", "cu", "cw", "cy", "cz", "ci", "dk", "dj", "dm", "do", "ec",
    "eg", "sv", "gq", "er", "ee", "sz", "et", "fk", "fo", "fj", "fi", "fr", "gf", "pf", "tf", "ga",
    "gm", "ge", "de", "gh", "gi", "gr", "gl", "gd", "gp", "gu", "gt", "gg", "gn", "gw", "gy", "ht",
    "hm", "va", "hn", "hk", "hu", "is", "in", "id", "ir", "iq", "ie", "im", "il", "it", "jm", "jp",
    "je", "jo", "kz", "ke", "ki", "kp", "kr", "kw", "kg", "la", "lv", "lb", "ls", "lr", "ly", "li",
    "lt", "lu", "mo", "mg", "mw", "my", "mv", "ml", "mt", "mh", "mq", "mr", "mu", "yt", "mx", "fm",
    "md", "mc", "mn", "me", "ms", "ma", "mz", "mm", "na", "nr", "np", "nl", "nc", "nz", "ni", "ne",
    "ng", "nu", "nf", "mp", "no", "om", "pk", "pw", "ps", "pa", "pg", "py", "pe", "ph", "pn", "pl",
    "pt", "pr", "qa", "mk", "ro", "ru", "rw", "re", "bl", "sh", "kn", "lc", "mf", "pm", "vc", "ws",
    "sm", "st", "sa", "sn", "rs", "sc", "sl", "sg", "sx", "sk", "si", "sb", "so", "za", "gs", "ss",
    "es", "lk", "sd", "sr", "sj", "se", "ch", "sy", "tw", "tj", "tz", "th", "tl", "tg", "tk", "to",
    "tt", "tn", "tr", "tm", "tc", "tv", "ug", "ua", "ae", "gb", "um", "us", "uy", "uz", "vu", "ve",
    "vn", "vg", "vi", "wf", "eh", "ye", "zm", "zw", "ax",
];

const ODB10_LINEAGES: &[&str] = &[
    "actinopterygii_odb10",
    "arachnida_odb10",
    "arthropoda_odb10",
    "ascomycota_odb10",
    "aves_odb10",
    "basidiomycota_odb10",
    "brassicales_odb10",
    "carnivora_odb10",
    "cetartiodactyla_odb10",
    "chlorophyta_odb10",
    "diptera_odb10",
    "embryophyta_odb10",
    "endopterygota_odb10",
    "eudicots_odb10",
    "eukaryota_odb10",
    "fungi_odb10",
    "hemiptera_odb10",
    "hymenoptera_odb10",
    "insecta_odb10",
    "lepidoptera_odb10",
    "liliopsida_odb10",
    "mammalia_odb10",
    "metazoa_odb10",
    "mollusca_odb10",
    "nematoda_odb10",
    "poales_odb10",
    "primates_odb10",
    "sauropsida_odb10",
    "stramenopiles_odb10",
    "tetrapoda_odb10",
    "vertebrata_odb10",
    "viridiplantae_odb10",
];

const SAMPLE_COLLECTORS: &[&str] = &[
    "dalu", "ghc", "mba", "nhm", "nsu", "psu", "qmul", "rbge", "kew", "san", "ubc", "derb", "oxf",
    "vien",
];

pub(crate) const TAXON_VARIABLES: &[Variable] = &[
    Variable::keyword("tax_rank", "Taxonomic rank", TAX_RANKS),
    // genome size and assembly
    Variable::new("assembly_date", "Last updated", TypeOf::Date).with_summary(),
    Variable::keyword("assembly_level", "Assembly level", ASSEMBLY_LEVELS),
    Variable::new("assembly_span", "Assembly span", TypeOf::Long).with_summary(),
    Variable::new("c_value", "C value", TypeOf::HalfFloat).with_summary(),
    Variable::keyword("c_value_cell_type", "C value cell type", C_VALUE_CELL_TYPES),
    Variable::keyword("c_value_method", "C value method", C_VALUE_METHODS),
    Variable::new("contig_n50", "Contig N50", TypeOf::Long).with_summary(),
    Variable::new("gc_percent", "GC percent", TypeOf::OneDP),
    Variable::new("gene_count", "Gene count", TypeOf::Integer).with_summary(),
    Variable::new("genome_size", "Genome size", TypeOf::Long).with_summary(),
    Variable::new("genome_size_draft", "Genome size draft", TypeOf::Long).with_summary(),
    Variable::new("genome_size_kmer", "Genome size kmer", TypeOf::Long).with_summary(),
    Variable::new("scaffold_n50", "Scaffold N50", TypeOf::Long).with_summary(),
    // organelles
    Variable::new("mitochondrion_assembly_span", "Mitochondrion span", TypeOf::Long),
    Variable::new("mitochondrion_gc_percent", "Mitochondrion GC%", TypeOf::TwoDP),
    Variable::new("plastid_assembly_span", "Plastid span", TypeOf::Long),
    Variable::new("plastid_gc_percent", "Plastid GC%", TypeOf::TwoDP),
    // karyotype
    Variable::new("chromosome_number", "Chromosome number", TypeOf::Short).with_summary(),
    Variable::new("haploid_number", "Haploid number", TypeOf::Short).with_summary(),
    Variable::new("ploidy", "Ploidy", TypeOf::Short).with_summary(),
    Variable::new("ploidy_inferred", "Estimated ploidy", TypeOf::Short).with_summary(),
    Variable::keyword("ploidy_descriptive", "Ploidy descriptive", &[]),
    Variable::keyword("programmed_dna_elimination", "Programmed DNA elimination present", &[]),
    Variable::keyword("sex_determination", "Sex karyotype features", &[]),
    // quality
    Variable::new("btk_nohit", "BTK no hit", TypeOf::OneDP),
    Variable::new("btk_target", "BTK target", TypeOf::OneDP),
    Variable::new("busco_completeness", "BUSCO completeness", TypeOf::OneDP),
    Variable::keyword("busco_lineage", "BUSCO lineage", &[]),
    Variable::keyword("busco_string", "BUSCO string", &[]),
    Variable::keyword("odb10_lineage", "BUSCO odb10 lineage", ODB10_LINEAGES),
    Variable::new("ebp_metric_date", "EBP metric date", TypeOf::Date).with_summary(),
    Variable::keyword("ebp_standard_criteria", "EBP standard criteria", EBP_CRITERIA),
    Variable::new("ebp_standard_date", "EBP standard date", TypeOf::Date).with_summary(),
    // sequencing runs
    Variable::keyword("bioproject", "Bioproject", &[]),
    Variable::keyword("biosample", "Biosample", &[]),
    Variable::keyword("library_source", "Library source", &["transcriptomic", "single cell"]),
    Variable::keyword("platform", "Platform", &["illumina", "oxford_nanopore", "pacbio_smrt"]),
    Variable::new("reads", "Reads", TypeOf::Long),
    Variable::keyword("run_accession", "Run accession", &[]),
    Variable::keyword("sample_sex", "Sample sex", &[]),
    Variable::keyword("sra_accession", "SRA accession", &[]),
    Variable::new("total_reads", "Total reads", TypeOf::Long),
    Variable::new("total_runs", "Total runs", TypeOf::Integer),
    // distribution and legislation
    Variable::keyword("country_list", "Country list", COUNTRIES),
    Variable::keyword(
        "echabs92",
        "EC Habitats Directive 1992",
        &["echabs92_annex_iib", "echabs92_annex_ivb", "echabs92_annex_iva"],
    ),
    Variable::keyword(
        "habreg_2017",
        "Conservation of Habitats and Species Regulations 2017",
        &["habreg-sch2", "habreg-sch5"],
    ),
    Variable::keyword(
        "isb_wildlife_act_1976",
        "Irish Statute Book Wildlife Act, 1976",
        &["iwa-nsch3", "iwa-sch5"],
    ),
    Variable::keyword(
        "marhabreg-2017",
        "Conservation of Offshore Marine Habitats and Species Regulations 2017",
        &["marhabreg-sch1"],
    ),
    Variable::keyword(
        "protection_of_badgers_act_1992",
        "Protection of Badgers Act 1992",
        &["badgers92"],
    ),
    Variable::keyword("waca_1981", "Wildlife and Countryside Act 1981", &["waca-sch1", "waca-sch5"]),
    // project status
    Variable::keyword("contributing_project_lab", "Contributing project-lab", &[]),
    Variable::keyword("family_representative", "Family representative", PROJECTS),
    Variable::keyword("in_progress", "In progress", PROJECTS),
    Variable::keyword("insdc_open", "Open on INSDC", PROJECTS),
    Variable::keyword("insdc_submitted", "Submitted to INSDC", PROJECTS),
    Variable::keyword("long_list", "Long list", PROJECTS),
    Variable::new("number_acquired", "Number acquired", TypeOf::Long).with_summary(),
    Variable::keyword("open", "Open", PROJECTS),
    Variable::keyword("other_priority", "Other priority", PROJECTS),
    Variable::keyword("published", "Published", PROJECTS),
    Variable::keyword("resampling_required", "Resampling required", PROJECTS),
    Variable::keyword("sample_acquired", "Sample acquired", PROJECTS),
    Variable::keyword("sample_available", "Sample available", PROJECTS),
    Variable::keyword("sample_collected", "Sample collected", PROJECTS),
    Variable::keyword("sample_collected_by", "Sample collected by", SAMPLE_COLLECTORS),
    Variable::keyword("sequencing_status", "Sequencing status", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_asg", "Sequencing status ASG", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_b10k", "Sequencing status B10K", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_cbp", "Sequencing status CBP", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_dtol", "Sequencing status DToL", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_erga-bge", "Sequencing status ERGA-BGE", SEQUENCING_STATUS),
    Variable::keyword("sequencing_status_vgp", "Sequencing status VGP", SEQUENCING_STATUS),
];

pub(crate) const ASSEMBLY_VARIABLES: &[Variable] = &[
    Variable::keyword("tax_rank", "Taxonomic rank", TAX_RANKS),
    Variable::keyword("assembly_level", "Assembly level", ASSEMBLY_LEVELS),
    Variable::new("assembly_span", "Assembly span", TypeOf::Long),
    Variable::keyword("assembly_status", "Assembly status", &["primary", "alternate"]),
    Variable::keyword("assembly_type", "Assembly type", &[]),
    Variable::new("assigned_percent", "Assigned percent", TypeOf::TwoDP),
    Variable::keyword("bioproject", "Bioproject", &[]),
    Variable::keyword("biosample", "Biosample", &[]),
    Variable::new("btk_nohit", "BTK no hit", TypeOf::OneDP),
    Variable::new("btk_target", "BTK target", TypeOf::OneDP),
    Variable::new("busco_completeness", "BUSCO completeness", TypeOf::OneDP),
    Variable::keyword("busco_lineage", "BUSCO lineage", &[]),
    Variable::keyword("busco_string", "BUSCO string", &[]),
    Variable::new("chromosome_count", "Chromosome count", TypeOf::Long),
    Variable::new("contig_count", "Contig count", TypeOf::Long),
    Variable::new("contig_l50", "Contig L50", TypeOf::Long),
    Variable::new("contig_n50", "Contig N50", TypeOf::Long),
    Variable::new("ebp_metric_date", "EBP metric date", TypeOf::Date),
    Variable::keyword("ebp_standard_criteria", "EBP standard criteria", EBP_CRITERIA),
    Variable::new("ebp_standard_date", "EBP standard date", TypeOf::Date),
    Variable::new("gc_percent", "GC percent", TypeOf::TwoDP),
    Variable::new("gene_count", "Gene count", TypeOf::Integer),
    Variable::keyword("isolate", "Isolate", &[]),
    Variable::new("last_updated", "Last updated", TypeOf::Date),
    Variable::keyword("mitochondrion_accession", "Mitochondrion accession", &[]),
    Variable::new("mitochondrion_assembly_span", "Mitochondrion span", TypeOf::Long),
    Variable::new("mitochondrion_gc_percent", "Mitochondrion GC%", TypeOf::TwoDP),
    Variable::keyword("mitochondrion_scaffolds", "Mitochondrion scaffolds", &[]),
    Variable::new("n_percent", "N percent", TypeOf::TwoDP),
    Variable::new("noncoding_gene_count", "Non-coding gene count", TypeOf::Integer),
    Variable::keyword(
        "organelle",
        "Organelle",
        &["nucleus", "mitochondrion", "chloroplast", "plastid", "apicoplast"],
    ),
    Variable::keyword("plastid_accession", "Plastid accession", &[]),
    Variable::new("plastid_assembly_span", "Plastid span", TypeOf::Long),
    Variable::new("plastid_gc_percent", "Plastid GC%", TypeOf::TwoDP),
    Variable::keyword("plastid_scaffolds", "Plastid scaffolds", &[]),
    Variable::new("protein_count", "Protein count", TypeOf::Integer),
    Variable::new("pseudogene_count", "Pseudogene count", TypeOf::Integer),
    Variable::keyword("refseq_category", "RefSeq category", &[]),
    Variable::keyword("sample_sex", "Sample sex", &[]),
    Variable::new("scaffold_count", "Scaffold count", TypeOf::Long),
    Variable::new("scaffold_l50", "Scaffold L50", TypeOf::Long),
    Variable::new("scaffold_n50", "Scaffold N50", TypeOf::Long),
    Variable::new("sequence_count", "Sequence count", TypeOf::Long),
    Variable::keyword("source_accession", "Source accession", &[]),
    Variable::keyword("submitter", "Submitter", &[]),
    Variable::new("ungapped_span", "Ungapped span", TypeOf::Long),
];
