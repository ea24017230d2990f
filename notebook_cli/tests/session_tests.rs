//! Console sessions that touch the filesystem

use notebook_cli::{bootstrap, parse_command, CliError, Response, Session};

fn run(session: &mut Session, line: &str) -> Result<String, CliError> {
    match session.execute(parse_command(line)?)? {
        Response::Text(text) => Ok(text),
        Response::Quit => Ok(String::new()),
    }
}

#[test]
fn test_save_and_load_notebook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    let path = path.to_str().unwrap();

    let mut session = bootstrap(None, "default", None).unwrap();
    for line in ["new Entity", "name Person", "note people we know", "new Stem"] {
        run(&mut session, line).unwrap();
    }
    let before = run(&mut session, "list").unwrap();
    run(&mut session, &format!("save {}", path)).unwrap();

    let mut fresh = bootstrap(None, "default", None).unwrap();
    run(&mut fresh, &format!("load {}", path)).unwrap();
    assert_eq!(fresh.editor().notebook(), session.editor().notebook());

    // cursor is clamped, not restored
    let after = run(&mut fresh, "list").unwrap();
    assert_eq!(after.lines().count(), before.lines().count());
    assert!(after.contains("[Entity] Person"));
    assert!(after.contains("text: people we know"));
}

#[test]
fn test_load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut session = bootstrap(None, "default", None).unwrap();
    let result = run(&mut session, &format!("load {}", path.display()));
    assert!(matches!(result, Err(CliError::Json(_))));
    assert!(session.editor().is_empty());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let mut session = bootstrap(None, "default", None).unwrap();
    let result = run(&mut session, &format!("load {}", path.display()));
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_stem_is_replaced_by_next_constructor() {
    let mut session = bootstrap(None, "default", None).unwrap();
    run(&mut session, "new Stem").unwrap();
    let commands = run(&mut session, "commands").unwrap();
    assert!(!commands.lines().any(|line| line == "Stem"));
    assert!(commands.contains("Entity (E)"));

    run(&mut session, "new Entity").unwrap();
    assert_eq!(session.editor().len(), 1);
}
