use std::process::{Command, Output, Stdio};

fn goat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_goat"))
        .args(args)
        .output()
        .expect("failed to run goat")
}

#[test]
fn test_search_prints_urls() {
    let output = goat(&[
        "search",
        "-t",
        "Aves,Mammalia",
        "-e",
        "tax_rank(species) AND c_value<3",
        "--c-values",
    ]);
    assert!(
        output.status.success(),
        "goat should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0.\tGoaT API URL: https://goat.genomehubs.org/api/v2/search?"));
    assert!(lines[1].contains("query=tax_name%28Mammalia%29+AND+tax_rank%28species%29+AND+c_value%3C3"));
    assert!(lines[1].contains("fields=c_value"));
}

#[test]
fn test_bad_expression_fails() {
    let output = goat(&["search", "-t", "Aves", "-e", "bogus_field=5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus_field"), "stderr: {}", stderr);
}

#[test]
fn test_foreign_index_flag_fails() {
    let output = goat(&["count", "-i", "assembly", "-t", "Aves", "--c-values"]);
    assert!(!output.status.success());
}

#[test]
fn test_lookup_and_variables() {
    let output = goat(&["lookup", "-t", "Homo sapiens"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("lookup?searchTerm=Homo+sapiens"));

    let output = goat(&["variables", "-i", "assembly"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("contig_count"));
}

/// Closing stdout early is a normal end of output, not a failure
#[test]
#[cfg(unix)]
fn test_sigpipe_handling_with_head() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_goat"))
        .args(["variables"])
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to start goat");

    let goat_stdout = child.stdout.take().expect("failed to get stdout");
    let head_output = Command::new("head")
        .args(["-1"])
        .stdin(goat_stdout)
        .output()
        .expect("failed to run head");

    let goat_exit = child.wait().expect("failed to wait for goat");
    assert!(
        goat_exit.success(),
        "goat should exit successfully when the pipe closes, got {:?}",
        goat_exit.code()
    );
    assert!(head_output.status.success());
    assert!(String::from_utf8_lossy(&head_output.stdout).contains("Variable"));
}
