//! Tests for the configuration facade

use jsonconf_core::{Config, EntryKey, Error, ErrorKind};
use jsonconf_test_utils::TestProject;
use rstest::rstest;
use serde_json::{Value, json};

fn open(project: &TestProject) -> std::sync::Arc<Config> {
    Config::open(project.root()).expect("Should open configuration")
}

mod read_write_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_creates_file_on_demand() {
        let project = TestProject::new();
        let config = open(&project);

        config.set("settings", "/theme", json!("dark")).unwrap();

        project.assert_file_exists("settings.json");
        assert_eq!(project.read_config("settings"), json!({"theme": "dark"}));
        assert_eq!(config.get("settings", "/theme").unwrap(), json!("dark"));
        assert!(config.is_open("settings"));
    }

    #[test]
    fn test_saved_file_is_pretty_printed() {
        let project = TestProject::new();
        let config = open(&project);

        config.set("settings", "server/port", json!(8080)).unwrap();

        project.assert_file_contains("settings.json", "{\n  \"server\": {\n    \"port\": 8080\n  }\n}");
    }

    #[test]
    fn test_get_missing_file_is_config_not_found() {
        let project = TestProject::new();
        let config = open(&project);

        let err = config.get("absent", "/x").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        project.assert_file_not_exists("absent.json");
    }

    #[rstest]
    #[case("/missing")]
    #[case("/list[5]")]
    #[case("/list[0]/deeper")]
    fn test_get_unresolved_pointer_is_value_not_found(#[case] pointer: &str) {
        let project = TestProject::new();
        project.write_config("app", &json!({"list": [1]}));
        let config = open(&project);

        let err = config.get("app", pointer).unwrap_err();

        assert!(matches!(err, Error::ValueNotFound { .. }), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert!(err.to_string().contains("does not exist in 'app'"));
    }

    #[test]
    fn test_get_reads_existing_file() {
        let project = TestProject::new();
        project.write_config("app", &json!({"hosts": ["a", "b", "c"]}));
        let config = open(&project);

        assert_eq!(config.get("app", "/hosts[-1]").unwrap(), json!("c"));
        assert_eq!(config.get("app", "hosts[0]").unwrap(), json!("a"));
        assert_eq!(config.get("/app/", "/").unwrap(), json!({"hosts": ["a", "b", "c"]}));
    }

    #[test]
    fn test_invalid_json_is_wrapped_read_failure() {
        let project = TestProject::new();
        std::fs::write(project.config_path("broken"), "{ not json").unwrap();
        let config = open(&project);

        let err = config.get("broken", "/").unwrap_err();

        assert!(matches!(err, Error::Unreadable { .. }), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(config.get_raw("broken", "/").unwrap_err().kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_find_reports_absence_as_none() {
        let project = TestProject::new();
        project.write_config("app", &json!({"a": 1}));
        let config = open(&project);

        assert_eq!(config.find("app", "/a").unwrap(), Some(json!(1)));
        assert_eq!(config.find("app", "/b").unwrap(), None);
        assert_eq!(config.find("other", "/a").unwrap(), None);
    }

    #[test]
    fn test_get_or_default() {
        let project = TestProject::new();
        project.write_config("app", &json!({"port": 80}));
        let config = open(&project);

        assert_eq!(config.get_or_default("app", "/port", json!(1)).unwrap(), json!(80));
        assert_eq!(config.get_or_default("app", "/host", json!("localhost")).unwrap(), json!("localhost"));
        assert_eq!(config.get_or_default("nope", "/host", json!(null)).unwrap(), Value::Null);
    }

    #[test]
    fn test_delete() {
        let project = TestProject::new();
        project.write_config("app", &json!({"a": 1, "b": 2}));
        let config = open(&project);

        assert!(config.delete("app", "/a").unwrap());
        assert!(!config.delete("app", "/a").unwrap());
        assert_eq!(project.read_config("app"), json!({"b": 2}));

        assert_eq!(config.delete("absent", "/a").unwrap_err().kind(), ErrorKind::ConfigNotFound);
    }

    #[test]
    fn test_merge_combines_objects_and_arrays() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("app", "/a", json!({"x": 1, "l": [1]})).unwrap();

        config.merge("app", "/a", json!({"y": 2, "l": [2]})).unwrap();

        assert_eq!(config.get("app", "/a").unwrap(), json!({"x": 1, "y": 2, "l": [1, 2]}));
    }

    #[test]
    fn test_merge_array_into_object_conflicts() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("app", "/a", json!({"x": 1})).unwrap();

        let err = config.merge("app", "/a", json!([1])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(config.get("app", "/a").unwrap(), json!({"x": 1}));
    }

    #[test]
    fn test_nested_merge_conflict_is_not_persisted() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("app", "/a", json!({"tls": {"on": true}})).unwrap();

        assert!(config.merge("app", "/a", json!({"added": 1, "tls": [1]})).is_err());
        config.set("app", "/other", json!(2)).unwrap();

        assert_eq!(config.get("app", "/a").unwrap(), json!({"tls": {"on": true}}));
        assert_eq!(
            project.read_config("app"),
            json!({"a": {"tls": {"on": true}}, "other": 2})
        );
    }

    #[test]
    fn test_failed_set_is_not_persisted() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("app", "/keep", json!(1)).unwrap();

        let err = config.set("app", "/junk/list[5]", json!("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        config.set("app", "/other", json!(2)).unwrap();

        assert_eq!(project.read_config("app"), json!({"keep": 1, "other": 2}));
    }

    #[test]
    fn test_empty_name_is_invalid_path() {
        let project = TestProject::new();
        let config = open(&project);

        let err = config.set(" / ", "/a", json!(1)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }
}

mod array_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_prepends_and_shift_takes_first() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("queue", "/jobs", json!([1, 2])).unwrap();

        config.push("queue", "/jobs", json!(0)).unwrap();
        assert_eq!(config.get("queue", "/jobs").unwrap(), json!([0, 1, 2]));

        assert_eq!(config.shift("queue", "/jobs").unwrap(), json!(0));
        assert_eq!(project.read_config("queue"), json!({"jobs": [1, 2]}));
    }

    #[test]
    fn test_append_and_pop() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("queue", "/jobs", json!([1, 2])).unwrap();

        config.append("queue", "/jobs", json!(3)).unwrap();
        assert_eq!(config.get("queue", "/jobs").unwrap(), json!([1, 2, 3]));

        assert_eq!(config.pop("queue", "/jobs").unwrap(), json!(3));
        assert_eq!(config.get("queue", "/jobs").unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_scalar_becomes_array() {
        let project = TestProject::new();
        let config = open(&project);
        config.set("app", "/front", json!("a")).unwrap();
        config.set("app", "/back", json!("a")).unwrap();

        config.push("app", "/front", json!("b")).unwrap();
        config.append("app", "/back", json!("b")).unwrap();

        assert_eq!(config.get("app", "/front").unwrap(), json!(["b", "a"]));
        assert_eq!(config.get("app", "/back").unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_append_to_missing_value_fails() {
        let project = TestProject::new();
        project.write_config("app", &json!({}));
        let config = open(&project);

        let err = config.append("app", "/list", json!(1)).unwrap_err();

        assert!(matches!(err, Error::ValueNotFound { .. }));
    }

    #[test]
    fn test_shift_and_pop_on_empty_array_fail() {
        let project = TestProject::new();
        project.write_config("app", &json!({"list": []}));
        let config = open(&project);

        assert_eq!(config.shift("app", "/list").unwrap_err().kind(), ErrorKind::InvalidPath);
        assert_eq!(config.pop("app", "/list").unwrap_err().kind(), ErrorKind::InvalidPath);
        assert_eq!(project.read_config("app"), json!({"list": []}));
    }

    #[test]
    fn test_root_array() {
        let project = TestProject::new();
        project.write_config("list", &json!(["a", "b"]));
        let config = open(&project);

        config.append("list", "/", json!("c")).unwrap();
        assert_eq!(config.shift("list", "/").unwrap(), json!("a"));

        assert_eq!(project.read_config("list"), json!(["b", "c"]));
    }

    #[test]
    fn test_clear() {
        let project = TestProject::new();
        project.write_config("app", &json!({"list": [1, 2], "name": "x"}));
        let config = open(&project);

        config.clear("app", "/list").unwrap();
        assert_eq!(config.get("app", "/list").unwrap(), json!([]));

        let err = config.clear("app", "/name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(config.get("app", "/name").unwrap(), json!("x"));
    }

    #[test]
    fn test_push_keeps_templates_unevaluated() {
        let project = TestProject::new().with_manifest(&json!({"name": "demo"}));
        let config = open(&project);
        let template = json!("{{ config.packageJson(\"name\") }}");
        config.set("app", "/names", json!([template.clone()])).unwrap();

        config.push("app", "/names", json!("first")).unwrap();

        assert_eq!(project.read_config("app"), json!({"names": ["first", template]}));
        assert_eq!(config.get("app", "/names").unwrap(), json!(["first", "demo"]));
    }
}

mod for_each_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(config: &Config, name: &str, pointer: &str) -> Vec<(Value, EntryKey, String)> {
        let mut seen = Vec::new();
        config
            .for_each(name, pointer, |value, key, path| {
                seen.push((value.clone(), key.clone(), path.to_string()));
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_for_each_object_members() {
        let project = TestProject::new();
        project.write_config("app", &json!({"x": {"a": 1, "b": 2}}));
        let config = open(&project);

        assert_eq!(
            collect(&config, "app", "/x"),
            vec![
                (json!(1), EntryKey::Key("a".into()), "/x/a".to_string()),
                (json!(2), EntryKey::Key("b".into()), "/x/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_for_each_root_object() {
        let project = TestProject::new();
        project.write_config("app", &json!({"a": 1}));
        let config = open(&project);

        assert_eq!(
            collect(&config, "app", "/"),
            vec![(json!(1), EntryKey::Key("a".into()), "/a".to_string())]
        );
    }

    #[test]
    fn test_for_each_array_elements() {
        let project = TestProject::new();
        project.write_config("app", &json!({"list": ["p", "q"]}));
        let config = open(&project);

        assert_eq!(
            collect(&config, "app", "/list"),
            vec![
                (json!("p"), EntryKey::Index(0), "/list[0]".to_string()),
                (json!("q"), EntryKey::Index(1), "/list[1]".to_string()),
            ]
        );
    }

    #[test]
    fn test_for_each_scalar_visits_once() {
        let project = TestProject::new();
        project.write_config("app", &json!({"n": 5}));
        let config = open(&project);

        assert_eq!(
            collect(&config, "app", "/n"),
            vec![(json!(5), EntryKey::Index(0), "/n".to_string())]
        );
    }

    #[test]
    fn test_for_each_pointers_resolve() {
        let project = TestProject::new();
        project.write_config("app", &json!({"list": [{"k": 1}, {"k": 2}]}));
        let config = open(&project);

        let mut pointers = Vec::new();
        config
            .for_each("app", "/list", |_, _, pointer| pointers.push(pointer.to_string()))
            .unwrap();

        for (i, pointer) in pointers.iter().enumerate() {
            assert_eq!(config.get("app", &format!("{pointer}/k")).unwrap(), json!(i + 1));
        }
    }
}

mod directory_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_manifest_configuration_directory() {
        let project = TestProject::new()
            .with_dir("conf")
            .with_manifest(&json!({"configurationDirectory": "conf"}));
        let config = open(&project);

        config.set("app", "/a", json!(1)).unwrap();

        project.assert_file_exists("conf/app.json");
        project.assert_file_not_exists("app.json");
    }

    #[test]
    fn test_missing_manifest_directory_falls_back_to_root() {
        let project = TestProject::new().with_manifest(&json!({"configurationDirectory": "nope"}));
        let config = open(&project);

        assert_eq!(config.config_dir(), config.root());
    }

    #[test]
    fn test_explicit_directory_wins_over_manifest() {
        let project = TestProject::new()
            .with_dir("conf")
            .with_dir("other")
            .with_manifest(&json!({"configurationDirectory": "conf"}));
        let config = Config::builder(project.root())
            .config_dir("other")
            .build()
            .unwrap();

        config.set("app", "/a", json!(1)).unwrap();

        project.assert_file_exists("other/app.json");
    }

    #[test]
    fn test_set_configuration_directory_requires_existing_dir() {
        let project = TestProject::new();
        let config = open(&project);

        let err = config.set_configuration_directory("missing").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DirectoryNotFound);
        assert_eq!(config.config_dir(), config.root());
    }

    #[test]
    fn test_open_handles_stay_bound_after_directory_change() {
        let project = TestProject::new().with_dir("conf");
        let config = open(&project);
        config.set("app", "/a", json!(1)).unwrap();

        config.set_configuration_directory(["conf"]).unwrap();
        config.set("app", "/b", json!(2)).unwrap();
        config.set("fresh", "/c", json!(3)).unwrap();

        assert_eq!(project.read_config("app"), json!({"a": 1, "b": 2}));
        project.assert_file_exists("conf/fresh.json");
        assert!(
            config
                .resolve_file_path("app")
                .unwrap()
                .as_str()
                .ends_with("conf/app.json")
        );
    }
}

mod manifest_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_package_json_values() {
        let project = TestProject::new().with_manifest(&json!({"name": "demo", "version": "1.2.3"}));
        let config = open(&project);

        assert_eq!(config.package_json("name", Value::Null), json!("demo"));
        assert_eq!(config.package_json("/missing", json!("unknown")), json!("unknown"));
        project.assert_file_not_exists("settings.json");
    }

    #[test]
    fn test_package_json_without_manifest_returns_default() {
        let project = TestProject::new();
        let config = open(&project);

        assert_eq!(config.package_json("/name", json!("unknown")), json!("unknown"));
        project.assert_file_not_exists("package.json");
    }

    #[test]
    fn test_config_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
