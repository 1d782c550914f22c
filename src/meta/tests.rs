//! Registry behavior over realistic course sections.

use std::fs;
use std::thread;

use serde_json::json;
use tempfile::TempDir;

use super::*;

const WEB_FOUNDATIONS: &str = r#"{
    "*": {
        "theme": {
            "breadcrumb": false,
            "footer": false,
            "search": false,
            "typesetting": "article"
        }
    },
    "302": {"title": "Verison Control Primer", "type": "page"},
    "410": {"title": "HTML and CSS", "type": "page"},
    "326": {"title": "The Command Line", "type": "page"},
    "411": {"title": "JavaScript Review", "type": "page"},
    "412": {"title": "The DOM", "type": "page"},
    "413": {"title": "TypeScript and Advanced JavaScript", "type": "page"},
    "414": {"title": "Testing", "type": "page", "theme": {"footer": true}},
    "README": {"display": "hidden"}
}"#;

const WEB_FOUNDATIONS_TOML: &str = r#"
["*".theme]
breadcrumb = false
footer = false
search = false
typesetting = "article"

[302]
title = "Verison Control Primer"
type = "page"

[410]
title = "HTML and CSS"
type = "page"

[326]
title = "The Command Line"
type = "page"

[411]
title = "JavaScript Review"
type = "page"

[412]
title = "The DOM"
type = "page"

[413]
title = "TypeScript and Advanced JavaScript"
type = "page"

[414]
title = "Testing"
type = "page"
theme = { footer = true }

[README]
display = "hidden"
"#;

fn article_theme() -> ThemeOverride {
    ThemeOverride {
        breadcrumb: Some(false),
        footer: Some(false),
        search: Some(false),
        typesetting: Some(Typesetting::Article),
        ..Default::default()
    }
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .load("web", parse_json(WEB_FOUNDATIONS).unwrap())
        .unwrap();
    registry
}

#[test]
fn test_resolve_concrete_example() {
    let decl = parse_json(
        r#"{
        "*": {"theme": {"breadcrumb": false, "footer": false, "search": false, "typesetting": "article"}},
        "302": {"title": "Verison Control Primer", "type": "page"},
        "README": {"display": "hidden"}
    }"#,
    )
    .unwrap();
    let mut registry = Registry::new();
    registry.load("intro", decl).unwrap();

    let expected = PageEntry {
        title: Some("Verison Control Primer".into()),
        kind: Some(PageType::Page),
        theme: article_theme(),
        ..Default::default()
    };
    assert_eq!(registry.resolve("intro", "302").unwrap().into_inner(), expected);
}

#[test]
fn test_resolve_is_idempotent() {
    let registry = registry();
    let first = registry.resolve("web", "411").unwrap();
    let second = registry.resolve("web", "411").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inherits_wildcard_theme() {
    let registry = registry();
    for key in ["302", "410", "326", "411", "412", "413"] {
        assert_eq!(registry.resolve("web", key).unwrap().theme, article_theme());
    }
}

#[test]
fn test_own_theme_field_wins() {
    let theme = registry().resolve("web", "414").unwrap().theme.clone();
    assert_eq!(theme.footer, Some(true));
    assert_eq!(theme.breadcrumb, Some(false));
    assert_eq!(theme.search, Some(false));
    assert_eq!(theme.typesetting, Some(Typesetting::Article));
}

#[test]
fn test_list_keeps_declared_order() {
    let registry = registry();
    let keys: Vec<_> = registry
        .list("web")
        .unwrap()
        .map(|(key, _)| key.to_string())
        .collect();
    assert_eq!(keys, ["302", "410", "326", "411", "412", "413", "414"]);
}

#[test]
fn test_list_is_restartable() {
    let registry = registry();
    let first: Vec<_> = registry.list("web").unwrap().collect();
    let second: Vec<_> = registry.list("web").unwrap().collect();
    assert_eq!(first, second);
    assert!(first.iter().all(|(_, entry)| entry.theme.typesetting.is_some()));
}

#[test]
fn test_unknown_key_falls_back_to_wildcard() {
    let entry = registry().resolve("web", "999").unwrap();
    assert!(entry.title.is_none());
    assert!(entry.kind.is_none());
    assert!(entry.display.is_none());
    assert_eq!(entry.theme, article_theme());
}

#[test]
fn test_readme_resolves_but_is_not_listed() {
    let registry = registry();
    let readme = registry.resolve("web", "README").unwrap();
    assert!(readme.is_hidden());
    assert_eq!(readme.theme, article_theme());
    assert!(registry.list("web").unwrap().all(|(key, _)| !key.is_reserved()));
}

#[test]
fn test_unknown_section() {
    let registry = registry();
    assert!(matches!(
        registry.resolve("mobile", "302"),
        Err(RegistryError::UnknownSection(name)) if name == "mobile"
    ));
    assert!(registry.list("mobile").is_err());
}

#[test]
fn test_rejected_section_registers_nothing() {
    let mut registry = Registry::new();
    let decl = parse_json(r#"{"*": {"theme": {"search": "no"}}, "302": {"title": "Primer"}}"#)
        .unwrap();
    let err = registry.load("web", decl).unwrap_err();
    assert!(err.is_schema_violation());
    assert!(registry.is_empty());
    assert!(matches!(
        registry.resolve("web", "302"),
        Err(RegistryError::UnknownSection(_))
    ));

    let decl = parse_json(r#"{"*": {}, "302": {}, "*": {}}"#).unwrap();
    assert!(registry.load("web", decl).unwrap_err().is_schema_violation());
    assert!(registry.is_empty());
}

#[test]
fn test_duplicate_section_name() {
    let mut registry = registry();
    let err = registry.load("web", Declaration::new()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateSection(_)));
    // The registered section is untouched
    assert_eq!(registry.section("web").unwrap().len(), 8);
}

#[test]
fn test_toml_and_json_agree() {
    let mut from_toml = Registry::new();
    from_toml
        .load("web", parse_toml(WEB_FOUNDATIONS_TOML).unwrap())
        .unwrap();
    let json: Vec<_> = registry().list("web").unwrap().map(|(k, e)| (k.clone(), e)).collect();
    let toml: Vec<_> = from_toml.list("web").unwrap().map(|(k, e)| (k.clone(), e)).collect();
    assert_eq!(json, toml);
}

#[test]
fn test_extra_fields_survive_resolution() {
    let mut registry = Registry::new();
    let decl = Declaration::new()
        .with("*", json!({"theme": {"toc": false}}))
        .with("github", json!({"title": "Source", "href": "https://github.com", "newWindow": true}));
    registry.load("links", decl).unwrap();

    let entry = registry.resolve("links", "github").unwrap();
    assert_eq!(entry.extra.get("href"), Some(&json!("https://github.com")));
    assert_eq!(entry.theme.toc, Some(false));

    let output = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        output,
        json!({"title": "Source", "theme": {"toc": false}, "href": "https://github.com", "newWindow": true})
    );
}

#[test]
fn test_concurrent_readers() {
    let registry = registry();
    let expected = registry.resolve("web", "413").unwrap();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(registry.resolve("web", "413").unwrap(), expected);
                    assert_eq!(registry.list("web").unwrap().count(), 7);
                }
            });
        }
    });
}

#[test]
fn test_load_dir() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("web")).unwrap();
    fs::create_dir_all(root.join("data/sql")).unwrap();
    fs::write(root.join("web/_meta.json"), WEB_FOUNDATIONS).unwrap();
    fs::write(root.join("data/sql/_meta.toml"), WEB_FOUNDATIONS_TOML).unwrap();
    fs::write(root.join("_meta.json"), r#"{"web": {"title": "Web"}, "data": {"title": "Data"}}"#)
        .unwrap();

    let registry = Registry::load_dir(root, "_meta").unwrap();
    assert_eq!(registry.sections(), [".", "data/sql", "web"]);
    assert_eq!(registry.entry_count(), 2 + 8 + 8);

    let top: Vec<_> = registry.list(ROOT_SECTION).unwrap().map(|(k, _)| k.to_string()).collect();
    assert_eq!(top, ["web", "data"]);
    assert_eq!(
        registry.resolve("data/sql", "302").unwrap(),
        registry.resolve("web", "302").unwrap()
    );
}

#[test]
fn test_load_dir_reports_every_bad_section() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::create_dir_all(root.join("c")).unwrap();
    fs::write(root.join("a/_meta.json"), r#"{"1": {"type": 1}}"#).unwrap();
    fs::write(root.join("b/_meta.json"), r#"{"1": {"title": "ok"}}"#).unwrap();
    fs::write(root.join("c/_meta.json"), "{ not json").unwrap();

    let err = Registry::load_dir(root, "_meta").unwrap_err();
    let RegistryError::Multiple(errors) = err else {
        panic!("expected multiple errors, got {err:?}");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors[0].is_schema_violation());
    assert!(matches!(errors[1], RegistryError::Parse { .. }));
}

#[test]
fn test_repeated_declarations_register_nothing() {
    let mut registry = Registry::new();
    let decl = parse_toml("[\"*\"]\ntitle = \"a\"\n[\"*\"]\ntitle = \"b\"\n").unwrap();
    let err = registry.load("web", decl).unwrap_err();
    assert!(err.is_schema_violation());
    assert!(err.diagnostics().unwrap().mentions("*"));

    let decl = parse_json(r#"{"302": {"title": "A", "title": "B"}}"#).unwrap();
    let err = registry.load("web", decl).unwrap_err();
    assert!(err.diagnostics().unwrap().mentions("302.title"));
    assert!(registry.is_empty());
}
