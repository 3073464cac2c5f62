use crate::common::{args, read_output, workspace};
use stubgen_driver::{load_session, run, StubArgs};
use test_case::test_case;

mod common;

const HEADER: &str = r#"
#ifndef API_H
#define API_H

int not_parsed(int a);

// API START

// Lifecycle
bool debuginator_is_open(TheDebuginator* debuginator);
void debuginator_set_open(TheDebuginator* debuginator, bool open);

// Items
DebuginatorItem* debuginator_create_array_item(DebuginatorItem* parent,
	const char* path, const char* description,
	void* user_data);
void debuginator_remove_item(TheDebuginator* debuginator, DebuginatorItem* item);

// API END

void also_not_parsed(int b);
#endif
"#;

fn stub(return_type: &str, name: &str, params: &str) -> String {
    format!("{:<20} {:<50}({}) {{}}", return_type, name, params)
}

#[test]
fn generates_stubs_for_header() {
    let ws = workspace(HEADER).unwrap();
    let count = run(&args(&ws, &[])).unwrap();

    assert_eq!(count, 4);
    assert_eq!(
        read_output(&ws),
        [
            stub("bool", "debuginator_is_open", "TheDebuginator*"),
            stub("void", "debuginator_set_open", "TheDebuginator*, bool"),
            stub(
                "DebuginatorItem*",
                "debuginator_create_array_item",
                "DebuginatorItem*, const, const, void*"
            ),
            stub(
                "void",
                "debuginator_remove_item",
                "TheDebuginator*, DebuginatorItem*"
            ),
        ]
    );
}

#[test_case(&["--names"], &["debuginator_is_open", "debuginator_set_open"] ; "names only")]
#[test_case(&["--return-width", "0", "--name-width", "0"], &["bool debuginator_is_open(TheDebuginator*) {}", "void debuginator_set_open(TheDebuginator*, bool) {}"] ; "no padding")]
#[test_case(&["--return-width", "0", "--name-width", "0", "--param-names"], &["bool debuginator_is_open(TheDebuginator* debuginator) {}", "void debuginator_set_open(TheDebuginator* debuginator, bool open) {}"] ; "with param names")]
fn output_options(extra: &[&str], expected: &[&str]) {
    let ws = workspace(HEADER).unwrap();
    run(&args(&ws, extra)).unwrap();

    let output = read_output(&ws);
    assert_eq!(&output[..2], expected);
}

#[test_case("// API START\n// API END\n", 0 ; "empty block")]
#[test_case("int a(int b);\n", 0 ; "no start marker")]
#[test_case("API START\nint a(int b);\nint c(int d,\n", 1 ; "no end marker")]
#[test_case("API START\nint a(int b,\n  int c);\nAPI END\n", 1 ; "continued declaration")]
fn declaration_counts(source: &str, expected: usize) {
    let ws = workspace(source).unwrap();
    assert_eq!(run(&args(&ws, &[])).unwrap(), expected);
    assert_eq!(read_output(&ws).len(), expected);
}

#[test]
fn custom_markers() {
    let source = "/* BEGIN STUBS */\n# skipped\nint a(int b);\n/* END STUBS */\nint c(int d);\n";
    let ws = workspace(source).unwrap();
    let extra = [
        "--start-marker",
        "BEGIN STUBS",
        "--end-marker",
        "END STUBS",
        "--comment-prefix",
        "#",
    ];
    assert_eq!(run(&args(&ws, &extra)).unwrap(), 1);
}

#[test]
fn strict_rejects_unfinished_declaration() {
    let ws = workspace("API START\nint a(int b,\nAPI END\n").unwrap();
    assert_eq!(run(&args(&ws, &[])).unwrap(), 0);

    let error = run(&args(&ws, &["--strict"])).unwrap_err();
    assert!(error.to_string().starts_with("failed to parse"));
}

#[test]
fn malformed_declaration_is_an_error() {
    let ws = workspace("API START\nint broken;\nAPI END\n").unwrap();
    let error = run(&args(&ws, &[])).unwrap_err();
    let cause = error
        .downcast_ref::<stubgen_parser::error::ParseError>()
        .unwrap();
    assert_eq!(cause.line(), 2);
}

#[test]
fn stops_reading_at_end_marker() {
    let ws = workspace("").unwrap();
    let mut bytes = b"API START\nint a(int b);\nAPI END\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    std::fs::write(&ws.header, bytes).unwrap();

    assert_eq!(run(&args(&ws, &[])).unwrap(), 1);
    assert_eq!(read_output(&ws).len(), 1);
}

#[test]
fn unreadable_line_inside_block_is_an_error() {
    let ws = workspace("").unwrap();
    let mut bytes = b"API START\nint a(int b);\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    std::fs::write(&ws.header, bytes).unwrap();

    let error = run(&args(&ws, &[])).unwrap_err();
    assert!(error.to_string().starts_with("failed to read"));
}

#[test]
fn missing_input_is_an_error() {
    let ws = workspace("").unwrap();
    let missing = ws.folder.path().join("missing.h");
    let args = <StubArgs as clap::Parser>::try_parse_from([
        "stubgen".to_string(),
        missing.display().to_string(),
    ])
    .unwrap();

    let error = run(&args).unwrap_err();
    assert!(error.to_string().contains("missing.h"));
}

#[test]
fn session_reflects_arguments() {
    let ws = workspace(HEADER).unwrap();
    let session = load_session(&args(&ws, &["--strict", "--names"])).unwrap();

    assert_eq!(session.file_path, ws.header);
    assert_eq!(
        session.options.unfinished,
        stubgen_session::UnfinishedPolicy::Error
    );
    assert_eq!(session.output, stubgen_session::OutputMode::Names);
    assert_eq!(session.output_file.as_ref(), Some(&ws.output));
}
