use beatmarch::command::{
    Command, CommandAction, CommandCatalog, CommandMatcher, CommandString, MatchOutcome,
    default_commands,
};
use beatmarch::util::ConfigError;

fn default_matcher() -> CommandMatcher {
    CommandMatcher::new(CommandCatalog::new(default_commands(), 4).unwrap())
}

fn feed_all(matcher: &CommandMatcher, string: &mut CommandString, keys: &[u8]) -> Vec<MatchOutcome> {
    keys.iter().map(|&k| matcher.feed(string, k)).collect()
}

#[test]
fn test_every_default_command_completes() {
    let matcher = default_matcher();
    for command in default_commands() {
        let mut string = CommandString::new();
        let outcomes = feed_all(&matcher, &mut string, &command.keys);
        assert_eq!(outcomes.last(), Some(&MatchOutcome::Completed(command.clone())));
        assert!(outcomes[..outcomes.len() - 1]
            .iter()
            .all(|o| *o == MatchOutcome::Extended));
        assert!(string.is_empty());
    }
}

#[test]
fn test_string_stays_a_prefix() {
    let matcher = default_matcher();
    let mut string = CommandString::new();
    for key in [1, 1, 2, 2, 2, 1, 3, 4, 4, 3, 3] {
        matcher.feed(&mut string, key);
        let prefix = string.as_slice();
        assert!(
            prefix.is_empty()
                || matcher
                    .catalog()
                    .commands()
                    .iter()
                    .any(|c| c.starts_with(prefix)),
            "{:?} is not a command prefix",
            prefix
        );
    }
}

#[test]
fn test_rejected_button_clears() {
    let matcher = default_matcher();
    let mut string = CommandString::new();
    matcher.feed(&mut string, 2);
    matcher.feed(&mut string, 2);
    assert_eq!(matcher.feed(&mut string, 3), MatchOutcome::Rejected);
    assert!(string.is_empty());
    // The rejected key does not start a new string.
    assert_eq!(string.len(), 0);
}

#[test]
fn test_custom_action_kept_by_name() {
    let catalog = CommandCatalog::new(vec![Command::new("rally", "rally", &[4, 4])], 4).unwrap();
    let matcher = CommandMatcher::new(catalog);
    let mut string = CommandString::new();
    let outcomes = feed_all(&matcher, &mut string, &[4, 4]);
    match &outcomes[1] {
        MatchOutcome::Completed(c) => {
            assert_eq!(c.action, CommandAction::Custom("rally".to_string()));
            assert_eq!(c.action.name(), "rally");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_catalog_validation() {
    assert_eq!(
        CommandCatalog::new(vec![], 4).unwrap_err(),
        ConfigError::EmptyCatalog
    );
    assert!(matches!(
        CommandCatalog::new(vec![Command::new("x", "move", &[9])], 4),
        Err(ConfigError::ButtonOutOfRange { button: 9, .. })
    ));
}

#[test]
fn test_prefix_command_resolution() {
    // "hop" is a strict prefix of "leap"; the longer command can still be played.
    let catalog = CommandCatalog::new(
        vec![
            Command::new("hop", "hop", &[1, 2]),
            Command::new("leap", "leap", &[1, 2, 3, 4]),
        ],
        4,
    )
    .unwrap();
    let matcher = CommandMatcher::new(catalog);
    let mut string = CommandString::new();
    let outcomes = feed_all(&matcher, &mut string, &[1, 2, 3, 4]);
    assert_eq!(outcomes[1], MatchOutcome::Extended);
    match &outcomes[3] {
        MatchOutcome::Completed(c) => assert_eq!(c.name, "leap"),
        other => panic!("unexpected {:?}", other),
    }
}
