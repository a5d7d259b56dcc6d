//! Tests for scenario loading and authoring validation.

use super::*;

#[test]
fn test_scenario_from_yaml() {
    let yaml = r#"
apiVersion: gridpulse/v1
kind: Scenario

metadata:
  name: ripple
  title: "Radial Ripple"

seed: 42

lattice:
  size: [8, 6, 4]
  spacing: [1.0, 2.0, 0.5]

animator:
  timeMultiplier: 0.5
  baseScale: 1.5
  radius:
    intensity: 0.8
    frequency: 2.0
    speed: -0.25
  random:
    intensity: 0.2
"#;

    let scenario = Scenario::from_yaml(yaml).unwrap();
    assert_eq!(scenario.metadata.name, "ripple");
    assert_eq!(scenario.metadata.title, Some("Radial Ripple".to_string()));
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.lattice.size, [8, 6, 4]);
    assert_eq!(scenario.lattice.spacing, [1.0, 2.0, 0.5]);

    let animator = &scenario.animator;
    assert!(animator.auto_update);
    assert_eq!(animator.time_multiplier, 0.5);
    assert_eq!(animator.base_scale, 1.5);
    assert_eq!(animator.oscillators.radius.intensity, 0.8);
    assert_eq!(animator.oscillators.radius.frequency, 2.0);
    assert_eq!(animator.oscillators.radius.speed, -0.25);
    assert_eq!(animator.oscillators.random.intensity, 0.2);
    assert_eq!(animator.oscillators.random.speed, 1.0);
    assert_eq!(animator.oscillators.x.intensity, 0.0);
}

#[test]
fn test_minimal_scenario_uses_defaults() {
    let yaml = r#"
metadata:
  name: bare
lattice:
  size: [2, 2, 2]
"#;
    let scenario = Scenario::from_yaml(yaml).unwrap();
    assert_eq!(scenario.api_version, "gridpulse/v1");
    assert_eq!(scenario.kind, "Scenario");
    assert_eq!(scenario.seed, 0);
    assert_eq!(scenario.lattice.spacing, [1.0, 1.0, 1.0]);
    assert_eq!(scenario.animator, AnimatorSettings::default());
}

#[test]
fn test_scenario_builder() {
    let scenario = Scenario::new("builder", LatticeSpec::cube(3))
        .with_title("Builder")
        .with_description("Built in code")
        .with_seed(9);

    assert_eq!(scenario.metadata.name, "builder");
    assert_eq!(scenario.metadata.description, Some("Built in code".to_string()));
    assert_eq!(scenario.seed, 9);
    assert!(scenario.validate_authoring().is_ok());
}

#[test]
fn test_yaml_round_trip_preserves_settings() {
    let mut settings = AnimatorSettings::default();
    settings.auto_update = false;
    settings.oscillators.z.intensity = 0.4;
    settings.oscillators.z.phase = 0.125;
    let scenario =
        Scenario::new("trip", LatticeSpec::new([3, 2, 1], [0.5; 3])).with_animator(settings);

    let yaml = scenario.to_yaml().unwrap();
    let parsed = Scenario::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, scenario);
}

#[test]
fn test_invalid_api_version() {
    let yaml = r#"
apiVersion: gridpulse/v2
metadata:
  name: test
lattice:
  size: [1, 1, 1]
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidApiVersion(v) if v == "gridpulse/v2"));
}

#[test]
fn test_invalid_kind() {
    let yaml = r#"
kind: Lattice
metadata:
  name: test
lattice:
  size: [1, 1, 1]
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidKind(_)));
}

#[test]
fn test_missing_name() {
    let yaml = r#"
lattice:
  size: [1, 1, 1]
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingField(f) if f == "metadata.name"));
}

#[test]
fn test_missing_lattice_is_parse_error() {
    let yaml = r#"
metadata:
  name: test
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, ScenarioError::YamlError(_)));
}

#[test]
fn test_intensity_out_of_range_is_rejected() {
    let yaml = r#"
metadata:
  name: loud
lattice:
  size: [2, 2, 2]
animator:
  y:
    intensity: 1.5
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    match err {
        ScenarioError::IntensityOutOfRange { channel, value } => {
            assert_eq!(channel, Channel::Y);
            assert_eq!(value, 1.5);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_intensity_is_rejected() {
    let mut scenario = Scenario::new("neg", LatticeSpec::cube(2));
    scenario.animator.oscillators.global.intensity = -0.1;
    assert!(matches!(
        scenario.validate_authoring(),
        Err(ScenarioError::IntensityOutOfRange {
            channel: Channel::Global,
            ..
        })
    ));
}

#[test]
fn test_non_positive_lattice_is_rejected() {
    let yaml = r#"
metadata:
  name: flat
lattice:
  size: [4, 0, 4]
"#;
    let err = Scenario::from_yaml(yaml).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::InvalidLattice(crate::error::Error::InvalidLatticeSpec { .. })
    ));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ripple.yaml");
    let scenario = Scenario::new("ripple", LatticeSpec::cube(4)).with_seed(3);
    std::fs::write(&path, scenario.to_yaml().unwrap()).unwrap();

    let loaded = Scenario::load(&path).unwrap();
    assert_eq!(loaded, scenario);

    let missing = Scenario::load(dir.path().join("nope.yaml"));
    assert!(matches!(missing, Err(ScenarioError::IoError(_))));
}
