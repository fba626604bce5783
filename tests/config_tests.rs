use lumina_stage::{ConfigError, StageConfig};
use std::io::Write;

#[test]
fn test_stage_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
strict_unknown_commands = true

[elements]
character_root = "nova"
mouth_neutral = "nova-mouth-neutral"
mouth_mid = "nova-mouth-mid"
mouth_wide = "nova-mouth-wide"
blinks = "nova-blinks"
canvas = "nova-sky"

[expressions]
exclusive = ["happy", "sad", "neutral", "surprised"]

[camera]
default_pan_duration = 0.75
easing = "ease-out"

[initial]
expression = "surprised"
mouth = "blink"
"#
    )
    .unwrap();

    let config = StageConfig::from_file(file.path()).unwrap();
    assert!(config.strict_unknown_commands);
    assert_eq!(config.elements.character_root, "nova");
    assert_eq!(config.elements.canvas, "nova-sky");
    assert_eq!(config.expressions.exclusive.len(), 4);
    assert_eq!(config.camera.default_pan_duration, 0.75);
    assert_eq!(config.camera.easing, "ease-out");
    assert_eq!(config.initial.expression, "surprised");
    assert_eq!(config.initial.mouth, "blink");
}

#[test]
fn test_stage_config_empty_file_is_default() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = StageConfig::from_file(file.path()).unwrap();
    assert_eq!(config, StageConfig::default());
}

#[test]
fn test_stage_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = StageConfig::from_file(dir.path().join("stage.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_stage_config_rejects_invalid_values() {
    let cases = [
        "[elements]\ncanvas = \"lumina\"",
        "[expressions]\nexclusive = [\"two words\"]",
        "[initial]\nmouth = \"pout\"",
        "[initial]\nexpression = \"\"",
    ];

    for source in cases {
        let result = StageConfig::from_toml_str(source);
        assert!(matches!(result, Err(ConfigError::Invalid(_))), "{}", source);
    }
}

#[test]
fn test_stage_config_round_trips_through_toml() {
    let config = StageConfig::default();
    let source = toml::to_string(&config).unwrap();
    assert_eq!(StageConfig::from_toml_str(&source).unwrap(), config);
}
