use std::collections::HashSet;

use wena_bot::commands;

#[test]
fn test_all_commands_returns_correct_count() {
    let cmds = commands::all();
    assert_eq!(cmds.len(), 7, "Expected 7 commands, got {}", cmds.len());
}

#[test]
fn test_all_commands_contain_expected_names() {
    let cmds = commands::all();
    let names: HashSet<&str> = cmds.iter().map(|cmd| cmd.name.as_str()).collect();

    let expected = ["play", "pause", "resume", "skip", "stop", "queue", "roulette"];

    for name in &expected {
        assert!(
            names.contains(name),
            "Expected command '{}' not found in commands::all(). Present names: {:?}",
            name,
            names
        );
    }
}

#[test]
fn test_all_commands_are_slash_commands() {
    let cmds = commands::all();

    for cmd in &cmds {
        assert!(
            cmd.slash_action.is_some(),
            "Command '{}' does not have slash_action set (not a slash command)",
            cmd.name
        );
    }
}

#[test]
fn test_required_parameters() {
    let cmds = commands::all();
    let params = |name: &str| -> Vec<(String, bool)> {
        cmds.iter()
            .find(|c| c.name == name)
            .map(|c| c.parameters.iter().map(|p| (p.name.clone(), p.required)).collect())
            .unwrap_or_default()
    };

    assert_eq!(params("play"), vec![("query".to_string(), true)]);
    assert_eq!(params("roulette"), vec![("number".to_string(), true)]);
    assert!(params("queue").is_empty());
}
