//! End-to-end tests driving the command layer against real files on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use ctxstrip::cli::commands::generate;
use ctxstrip::cli::{ExitCode, Input};

fn write_go(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_single_file_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_go(
        &dir,
        "client.go",
        "package api\n\nimport \"context\"\n\nfunc (c *Client) FetchWithContext(ctx context.Context, id string) (*Item, error) {\n\treturn c.fetch(ctx, id)\n}\n",
    );
    let out = dir.path().join("wrappers.go");

    let code = generate(&Input::File(input), Some(&out), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let generated = fs::read_to_string(&out).unwrap();
    assert_eq!(
        generated,
        "package api\n\
         \n\
         import \"context\"\n\
         \n\
         func (c *Client) Fetch(id string) (*Item, error) {\n\
         \treturn c.FetchWithContext(context.Background(), id)\n\
         }\n"
    );
}

#[test]
fn test_directory_mode_combines_files_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    write_go(
        &dir,
        "b.go",
        "package api\n\nfunc PutWithContext(ctx context.Context, key string) error { return nil }\n",
    );
    write_go(
        &dir,
        "a.go",
        "package api\n\nfunc GetWithContext(ctx context.Context, key string) (string, error) { return \"\", nil }\n",
    );
    let out = dir.path().join("wrappers.go");

    generate(&Input::Dir(dir.path().to_path_buf()), Some(&out), false).unwrap();

    let generated = fs::read_to_string(&out).unwrap();
    let get = generated.find("func Get(").unwrap();
    let put = generated.find("func Put(").unwrap();
    assert!(get < put, "a.go declarations must come first");
}

#[test]
fn test_directory_mode_skips_malformed_file() {
    let dir = TempDir::new().unwrap();
    write_go(
        &dir,
        "good.go",
        "package api\n\nfunc PingWithContext(ctx context.Context) error { return nil }\n",
    );
    write_go(&dir, "broken.go", "package api\n\nfunc (((\n");
    let out = dir.path().join("wrappers.go");

    let code = generate(&Input::Dir(dir.path().to_path_buf()), Some(&out), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(fs::read_to_string(&out).unwrap().contains("func Ping()"));
}

#[test]
fn test_single_file_parse_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_go(&dir, "broken.go", "package api\n\nfunc (((\n");

    let err = generate(&Input::File(input.clone()), None, false).unwrap_err();
    assert!(err.message.contains(&input.display().to_string()));
}

#[test]
fn test_directory_mode_never_consumes_its_own_output() {
    let dir = TempDir::new().unwrap();
    write_go(
        &dir,
        "client.go",
        "package api\n\nfunc PingWithContext(ctx context.Context) error { return nil }\n",
    );
    let out = write_go(
        &dir,
        "wrappers.go",
        "package api\n\nfunc StaleWithContext(ctx context.Context, n int) error { return nil }\n",
    );

    generate(&Input::Dir(dir.path().to_path_buf()), Some(&out), false).unwrap();

    let generated = fs::read_to_string(&out).unwrap();
    assert!(generated.contains("func Ping()"));
    assert!(!generated.contains("Stale"));
}

#[test]
fn test_no_eligible_declarations_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_go(
        &dir,
        "plain.go",
        "package api\n\nfunc Fetch(id string) error { return nil }\n",
    );
    let out = dir.path().join("wrappers.go");

    let code = generate(&Input::File(input), Some(&out), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(!out.exists());
}

#[test]
fn test_snippet_mode_omits_header_and_imports() {
    let dir = TempDir::new().unwrap();
    let input = write_go(
        &dir,
        "client.go",
        "package api\n\nfunc PingWithContext(ctx context.Context) error { return nil }\n",
    );
    let out = dir.path().join("snippet.txt");

    generate(&Input::File(input), Some(&out), true).unwrap();

    let generated = fs::read_to_string(&out).unwrap();
    assert!(!generated.contains("package"));
    assert!(!generated.contains("import"));
    assert!(generated.starts_with("func Ping() error {"));
}

#[test]
fn test_unsupported_type_on_eligible_declaration_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_go(
        &dir,
        "watch.go",
        "package api\n\nfunc WatchWithContext(ctx context.Context, events chan int) {}\n",
    );

    let err = generate(&Input::File(input), None, false).unwrap_err();
    assert!(err.message.contains("unsupported"));
    assert!(err.message.contains("WatchWithContext"));
}

#[test]
fn test_exotic_types_in_ineligible_declarations_do_not_fail_the_file() {
    let dir = TempDir::new().unwrap();
    let input = write_go(
        &dir,
        "mixed.go",
        "package api\n\nfunc watch(ch chan int, f func(int) error) {}\n\nfunc PingWithContext(ctx context.Context) error { return nil }\n",
    );
    let out = dir.path().join("wrappers.go");

    generate(&Input::File(input), Some(&out), false).unwrap();
    assert!(fs::read_to_string(&out).unwrap().contains("func Ping()"));
}
