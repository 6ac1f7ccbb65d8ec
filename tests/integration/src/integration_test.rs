//! Cross-crate scenarios for the jsonconf workspace
//!
//! Each test builds a temporary project, drives it through the public
//! `Config` facade and checks the files the lower layers leave on disk.

use std::sync::Arc;
use std::thread;

use jsonconf_core::{Config, EntryKey};
use jsonconf_fs::NormalizedPath;
use jsonconf_store::JsonDb;
use jsonconf_template::{Call, Result as TemplateResult};
use jsonconf_test_utils::TestProject;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[test]
fn test_project_with_configuration_directory() {
    let project = TestProject::new()
        .with_dir("config")
        .with_manifest(&json!({
            "name": "shop",
            "version": "2.0.0",
            "configurationDirectory": "config"
        }));
    let config = Config::open(project.root()).unwrap();

    config.set("database", "/host", json!("db.internal")).unwrap();
    config.set("database", "/port", json!(5432)).unwrap();
    config
        .set(
            "app",
            "/",
            json!({
                "name": "{{ config.packageJson(\"name\") }}",
                "dsn": "postgres://{{ config.get(\"database\", \"/host\") }}:{{ config.get(\"database\", \"/port\") }}",
                "release": {"$template": "config.packageJson(\"/version\", \"0.0.0\")"}
            }),
        )
        .unwrap();

    project.assert_file_exists("config/database.json");
    project.assert_file_exists("config/app.json");
    project.assert_file_not_exists("app.json");

    assert_eq!(
        config.get("app", "/").unwrap(),
        json!({
            "name": "shop",
            "dsn": "postgres://db.internal:5432",
            "release": "2.0.0"
        })
    );
}

#[test]
fn test_store_sees_facade_writes() {
    let project = TestProject::new();
    let config = Config::open(project.root()).unwrap();

    config.set("app", "/servers[]", json!("a")).unwrap();
    config.append("app", "/servers", json!("b")).unwrap();
    config.push("app", "/servers", json!("z")).unwrap();

    let path = NormalizedPath::new(project.config_path("app"));
    let mut db = JsonDb::open(path);
    assert_eq!(db.get_data("/servers").unwrap(), json!(["z", "a", "b"]));
    assert_eq!(db.get_data("/servers[-1]").unwrap(), json!("b"));
}

#[test]
fn test_work_queue_drained_through_templates() {
    let project = TestProject::new();
    project.write_config("queue", &json!({"jobs": ["build", "test", "deploy"]}));
    project.write_config("worker", &json!({"next": "{{ config.shift(\"queue\", \"/jobs\") }}"}));
    let config = Config::open(project.root()).unwrap();

    let mut drained = Vec::new();
    while let Some(job) = config.find("queue", "/jobs[0]").unwrap() {
        assert_eq!(config.get("worker", "/next").unwrap(), job);
        drained.push(job);
    }

    assert_eq!(drained, vec![json!("build"), json!("test"), json!("deploy")]);
    assert_eq!(project.read_config("queue"), json!({"jobs": []}));
}

#[test]
fn test_for_each_visits_evaluated_members() {
    let project = TestProject::new().with_manifest(&json!({"name": "demo"}));
    project.write_config(
        "app",
        &json!({"labels": {"title": "{{ config.packageJson(\"name\") }}", "count": 2}}),
    );
    let config = Config::open(project.root()).unwrap();

    let mut seen = Vec::new();
    config
        .for_each("app", "/labels", |value, key, pointer| {
            seen.push((key.clone(), pointer.to_string(), value.clone()));
        })
        .unwrap();

    assert_eq!(
        seen,
        vec![
            (EntryKey::Key("title".into()), "/labels/title".to_string(), json!("demo")),
            (EntryKey::Key("count".into()), "/labels/count".to_string(), json!(2)),
        ]
    );
}

#[test]
fn test_concurrent_writers_share_one_handle() {
    let project = TestProject::new();
    let config = Config::open(project.root()).unwrap();
    config.set("counters", "/hits", json!([])).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for j in 0..5 {
                    config.set("counters", "/hits[]", json!(i * 10 + j)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let hits = project.read_config("counters")["hits"].as_array().unwrap().len();
    assert_eq!(hits, 40);
}

#[test]
fn test_concurrent_readers_do_not_share_template_depth() {
    let project = TestProject::new();
    project.write_config("app", &json!({"v": "{{ slow.value() }}"}));
    let config = Config::builder(project.root())
        .resolver("slow", |_: &Call| -> TemplateResult<Value> {
            thread::sleep(std::time::Duration::from_millis(150));
            Ok(json!(1))
        })
        .max_depth(2)
        .build()
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || config.get("app", "/v").map_err(|e| e.to_string()))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results, vec![Ok(json!(1)); 4]);
}

#[test]
fn test_custom_resolver_alongside_config() {
    let project = TestProject::new();
    project.write_config("secrets", &json!({"token": "abc"}));
    project.write_config(
        "app",
        &json!({
            "auth": "Bearer {{ config.get(\"secrets\", \"/token\") }}",
            "shout": "{{ upper.of(\"quiet\") }}!"
        }),
    );
    let config = Config::builder(project.root())
        .resolver("upper", |call: &Call| -> TemplateResult<Value> {
            Ok(json!(call.str_arg(0)?.to_uppercase()))
        })
        .build()
        .unwrap();

    assert_eq!(
        config.get("app", "/").unwrap(),
        json!({"auth": "Bearer abc", "shout": "QUIET!"})
    );
    assert!(config.evaluator().registry().contains("config"));
    assert!(config.evaluator().registry().contains("upper"));
}

#[test]
fn test_recursion_limit_leaves_files_untouched() {
    let project = TestProject::new();
    let looping = json!({"a": "{{ config.get(\"loop\", \"/b\") }}", "b": "{{ config.get(\"loop\", \"/a\") }}"});
    project.write_config("loop", &looping);
    let config = Config::builder(project.root()).max_depth(8).build().unwrap();

    let err = config.get("loop", "/a").unwrap_err();

    assert!(err.is_recursion_limit());
    assert_eq!(project.read_config("loop"), looping);
    assert_eq!(config.evaluator().depth(), 0);
}

#[test]
fn test_moving_configuration_directory_at_runtime() {
    let project = TestProject::new().with_dir("staging").with_dir("production");
    project.write_json("staging/app.json", &json!({"env": "staging"}));
    project.write_json("production/app.json", &json!({"env": "production"}));
    let config = Config::open(project.root()).unwrap();

    config.set_configuration_directory("staging").unwrap();
    assert_eq!(config.get("app", "/env").unwrap(), json!("staging"));

    // The handle opened above stays bound to staging
    config.set_configuration_directory("production").unwrap();
    assert_eq!(config.get("app", "/env").unwrap(), json!("staging"));
    assert_eq!(
        config.resolve_file_path("app").unwrap(),
        NormalizedPath::new(project.root()).canonicalize_lossy().join("production/app.json")
    );
}
