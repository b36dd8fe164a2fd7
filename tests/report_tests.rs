// End-to-end tests for the console reports

use std::fs;

use tinyfront::config::{AnalyzerConfig, Mode};
use tinyfront::report::{analyze, run_file, write_report, Outcome};

fn lexical() -> AnalyzerConfig {
    AnalyzerConfig {
        mode: Mode::Lexical,
        ..AnalyzerConfig::default()
    }
}

fn render(name: &str, source: &str, config: &AnalyzerConfig) -> String {
    let analysis = analyze(source, config);
    let mut out = Vec::new();
    write_report(&mut out, name, &analysis, config).expect("Writing to a Vec failed");
    String::from_utf8(out).expect("Report is not UTF-8")
}

#[test]
fn test_syntax_report_exact() {
    let output = render("p.tf", "program p : print 1 end", &AnalyzerConfig::default());

    let expected = concat!(
        "Starting syntax analysis scan on 'p.tf'...\n",
        "Syntax scan completed successfully.\n",
        "\n",
        "Abstract Syntax Tree (Using In-Order Traversal):\n",
        "KIND         POS     CHILD0       CHILD1       CHILD2       \n",
        "1            1:19    NIL          NIL          NIL          \n",
        "INT_LITERAL  1:19    1            NIL          NIL          \n",
        "PRINT        1:13    INT_LITERAL  NIL          NIL          \n",
        "\n",
        "\n",
        "   TRUE\n",
        "\n",
        "\n",
    );
    assert_eq!(output, expected);
}

#[test]
fn test_lexical_report_stops_at_error() {
    let output = render("bad.tf", "program p : x ?= 5 end", &lexical());

    let expected = concat!(
        "Starting lexical analysis scan on 'bad.tf'...\n",
        "Position Kind     Value   \n",
        "1:1      program          \n",
        "1:9      ID       p       \n",
        "1:11     :                \n",
        "1:13     ID       x       \n",
        "Error: at 1:15, Symbol '?' not allowed\n",
        "Task ended due to error.\n",
        "\n",
    );
    assert_eq!(output, expected);
}

#[test]
fn test_lexical_report_has_no_verdict() {
    let output = render("ok.tf", "program p : print 1 end", &lexical());

    assert!(output.ends_with("end-of-text        \nLexical scan completed successfully.\n\n"));
    assert!(!output.contains("TRUE"));
    assert!(!output.contains("FALSE"));
}

#[test]
fn test_lexical_error_in_syntax_mode() {
    let output = render("bad.tf", "program p : x ?= 5 end", &AnalyzerConfig::default());

    assert!(output.contains("Error: at 1:15, Symbol '?' not allowed\n"));
    assert!(output.contains("   FALSE\n"));
    assert!(!output.contains("Abstract Syntax Tree"));
    assert!(!output.contains("Syntax scan completed successfully."));
}

#[test]
fn test_declaration_program_table() {
    let output = render(
        "decl.tf",
        "program p : int x ; x := 5 ; print x end",
        &AnalyzerConfig::default(),
    );

    let kinds: Vec<&str> = output
        .lines()
        .skip_while(|line| !line.starts_with("KIND"))
        .skip(1)
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    assert_eq!(
        kinds,
        vec![
            "x",
            "DECL",
            "int",
            "SEQ",
            "x",
            "VARIABLE",
            "ASSIGNMENT",
            "5",
            "INT_LITERAL",
            "SEQ",
            "x",
            "VARIABLE",
            "PRINT",
        ]
    );
    assert!(output.contains(
        "SEQ          1:19    DECL         SEQ          NIL          \n"
    ));
    assert!(output.contains(
        "SEQ          1:28    ASSIGNMENT   PRINT        NIL          \n"
    ));
    assert!(output.contains("   TRUE\n"));
}

#[test]
fn test_no_ast_hides_table() {
    let config = AnalyzerConfig {
        display_ast: false,
        ..AnalyzerConfig::default()
    };
    let output = render("p.tf", "program p : print 1 end", &config);

    assert!(output.contains("Syntax scan completed successfully."));
    assert!(!output.contains("KIND"));
    assert!(output.contains("   TRUE\n"));
}

#[test]
fn test_syntax_error_report() {
    let output = render("p.tf", "program p : print 1 ; end", &AnalyzerConfig::default());

    assert!(output.contains("Error: at 1:23, Expected {ID, if, while, print}, but found 'end'\n"));
    assert!(output.contains("   FALSE\n"));
}

#[test]
fn test_empty_file_is_rejected() {
    let output = render("empty.tf", "  \n\n", &AnalyzerConfig::default());
    assert!(output.contains("Error: at 3:1, Expected { program }, but found 'end-of-text'"));

    let output = render("empty.tf", "", &lexical());
    assert!(output.contains("1:1      end-of-text"));
    assert!(output.contains("Lexical scan completed successfully."));
    assert!(!output.contains("TRUE"));
}

#[test]
fn test_run_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("loop.tf");
    fs::write(
        &path,
        "program loop :\n  int i ;\n  i := 0 ;\n  // count to three\n  while i < 3 do\n    print i ;\n    i := i + 1\n  od\nend\n",
    )
    .expect("Failed to write source file");

    let mut out = Vec::new();
    let analysis = run_file(&mut out, &path, &AnalyzerConfig::default())
        .expect("Writing to a Vec failed")
        .expect("File should be readable");
    let output = String::from_utf8(out).expect("Report is not UTF-8");

    assert_eq!(analysis.outcome(), Outcome::Accepted);
    assert!(output.starts_with(&format!("Starting syntax analysis scan on '{}'...\n", path.display())));
    assert!(output.contains("WHILE        5:3     OP_LT        SEQ          NIL          \n"));
}

#[test]
fn test_run_file_missing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nope.tf");

    let mut out = Vec::new();
    let analysis = run_file(&mut out, &path, &AnalyzerConfig::default()).expect("Writing to a Vec failed");

    assert!(analysis.is_none());
    assert_eq!(String::from_utf8(out).unwrap(), "Error: File not found.\n");
}

#[test]
fn test_files_are_independent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let bad = dir.path().join("bad.tf");
    let good = dir.path().join("good.tf");
    fs::write(&bad, "program p : x ?= 5 end").unwrap();
    fs::write(&good, "program q : print true end").unwrap();

    let config = AnalyzerConfig::default();
    let mut out = Vec::new();
    let first = run_file(&mut out, &bad, &config).unwrap().unwrap();
    let second = run_file(&mut out, &good, &config).unwrap().unwrap();

    assert_eq!(first.outcome(), Outcome::Rejected);
    assert_eq!(second.outcome(), Outcome::Accepted);
}
