//! Registration rules for the command alias registry.

use command_bridge::bridge::registry::CommandRegistry;
use command_bridge::config::GlobalConfig;

#[test]
fn registers_and_resolves_alias() {
    let mut registry = CommandRegistry::new();
    registry.register("status", "git status").expect("registers");

    assert_eq!(registry.lookup("status"), Some("git status"));
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn lookup_miss_returns_none() {
    let registry = CommandRegistry::new();
    assert_eq!(registry.lookup("absent"), None);
    assert!(registry.is_empty());
}

#[test]
fn duplicate_alias_is_rejected() {
    let mut registry = CommandRegistry::new();
    registry.register("status", "git status").expect("registers");

    let err = registry
        .register("status", "git log")
        .expect_err("duplicate must fail");
    assert!(err.to_string().contains("already registered"), "got: {err}");

    // First registration stays intact.
    assert_eq!(registry.lookup("status"), Some("git status"));
}

#[test]
fn alias_with_whitespace_is_rejected() {
    let mut registry = CommandRegistry::new();
    let err = registry
        .register("two words", "echo hi")
        .expect_err("spaced alias must fail");
    assert!(err.to_string().contains("single word"), "got: {err}");
}

#[test]
fn empty_alias_is_rejected() {
    let mut registry = CommandRegistry::new();
    assert!(registry.register("", "echo hi").is_err());
}

#[test]
fn empty_program_line_is_rejected() {
    let mut registry = CommandRegistry::new();
    let err = registry
        .register("noop", "  ")
        .expect_err("blank program must fail");
    assert!(err.to_string().contains("empty program"), "got: {err}");
}

#[test]
fn builds_from_config_commands_table() {
    let toml = r#"
[commands]
status = "git status"
greet = "echo hello"
"#;
    let config = GlobalConfig::from_toml_str(toml).expect("config parses");
    let registry = CommandRegistry::from_config(&config).expect("registry builds");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.lookup("greet"), Some("echo hello"));

    let mut aliases: Vec<&str> = registry.aliases().collect();
    aliases.sort_unstable();
    assert_eq!(aliases, vec!["greet", "status"]);
}

#[test]
fn empty_config_builds_empty_registry() {
    let config = GlobalConfig::default();
    let registry = CommandRegistry::from_config(&config).expect("registry builds");
    assert!(registry.is_empty());
}
