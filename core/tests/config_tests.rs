// tests/config_tests.rs
use crawlwork::config::{ENV_MAX_STEPS, ENV_UNKNOWN_WORKTYPE};
use crawlwork::{ExecutorConfig, UnknownWorktypePolicy, WorkError};
use serial_test::serial;
use std::collections::HashMap;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  move |name| vars.get(name).cloned()
}

#[test]
fn test_defaults_when_nothing_is_set() {
  let config = ExecutorConfig::from_lookup(lookup_from(&[])).unwrap();
  assert_eq!(config, ExecutorConfig::default());
  assert_eq!(config.unknown_worktype, UnknownWorktypePolicy::Error);
  assert!(config.max_steps.is_none());
}

#[test]
fn test_reads_both_settings() {
  let config = ExecutorConfig::from_lookup(lookup_from(&[(ENV_UNKNOWN_WORKTYPE, " Fail "), (ENV_MAX_STEPS, "16")])).unwrap();
  assert_eq!(config.unknown_worktype, UnknownWorktypePolicy::Fail);
  assert_eq!(config.max_steps, Some(16));
}

#[test]
fn test_invalid_values_are_configuration_errors() {
  match ExecutorConfig::from_lookup(lookup_from(&[(ENV_UNKNOWN_WORKTYPE, "ignore")])) {
    Err(WorkError::Configuration(message)) => assert!(message.contains(ENV_UNKNOWN_WORKTYPE)),
    other => panic!("Expected WorkError::Configuration, got {:?}", other),
  }
  match ExecutorConfig::from_lookup(lookup_from(&[(ENV_MAX_STEPS, "-1")])) {
    Err(WorkError::Configuration(message)) => assert!(message.contains(ENV_MAX_STEPS)),
    other => panic!("Expected WorkError::Configuration, got {:?}", other),
  }
}

#[test]
fn test_builder_methods() {
  let config = ExecutorConfig::new()
    .with_unknown_worktype(UnknownWorktypePolicy::Fail)
    .with_max_steps(4);
  assert_eq!(config.unknown_worktype, UnknownWorktypePolicy::Fail);
  assert_eq!(config.max_steps, Some(4));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
  std::env::set_var(ENV_UNKNOWN_WORKTYPE, "fail");
  std::env::set_var(ENV_MAX_STEPS, "3");
  let config = ExecutorConfig::from_env();
  std::env::remove_var(ENV_UNKNOWN_WORKTYPE);
  std::env::remove_var(ENV_MAX_STEPS);

  let config = config.unwrap();
  assert_eq!(config.unknown_worktype, UnknownWorktypePolicy::Fail);
  assert_eq!(config.max_steps, Some(3));
}
