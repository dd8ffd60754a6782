//! Detection against real directory trees, then resolution of what was found

use infera::detect::{scan_repository, ScanConfig};
use infera::{resolve, ResourceId, SignalId, TemplateId};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn present(root: &Path) -> Vec<SignalId> {
    scan_repository(root, &ScanConfig::default())
        .unwrap()
        .present_ids()
        .collect()
}

#[test]
fn test_empty_repository_has_no_signals() {
    let temp = TempDir::new().unwrap();
    assert!(present(temp.path()).is_empty());
}

#[test]
fn test_fastapi_with_postgres() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "requirements.txt",
        "fastapi==0.110.0\nuvicorn[standard]\npsycopg2-binary>=2.9\n",
    );
    write(temp.path(), "app/main.py", "from fastapi import FastAPI\n");

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    assert_eq!(
        signals.present_ids().collect::<Vec<_>>(),
        vec![SignalId::FastApi, SignalId::PostgresClient]
    );
    let fastapi = signals.get(SignalId::FastApi).unwrap();
    assert_eq!(fastapi.source, Path::new("requirements.txt"));
    assert_eq!(fastapi.evidence, "fastapi==0.110.0");

    let resolution = resolve(&signals, "gcp").unwrap();
    let plan = resolution.plan().unwrap();
    assert_eq!(plan.primary_template(), TemplateId::ApiService);
    assert!(plan
        .additional_resources()
        .contains(&ResourceId::ManagedRelationalDatabase));
}

#[test]
fn test_pep621_inline_dependencies() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "pyproject.toml",
        "[project]\nname = \"orders\"\nrequires-python = \">=3.11\"\ndependencies = [\"fastapi>=0.110\", \"sqlalchemy>=2\"]\n",
    );

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    assert!(signals.is_present(SignalId::FastApi));
    assert!(signals.is_present(SignalId::SqlAlchemyClient));

    let resolution = resolve(&signals, "gcp").unwrap();
    let plan = resolution.plan().unwrap();
    assert_eq!(plan.primary_template(), TemplateId::ApiService);
    assert!(plan
        .additional_resources()
        .contains(&ResourceId::ManagedRelationalDatabase));
}

#[test]
fn test_react_spa_on_cloudflare() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "package.json",
        r#"{
  "name": "web",
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0"
  },
  "devDependencies": {
    "vite": "^5.0.0"
  }
}"#,
    );
    write(temp.path(), "vite.config.ts", "export default {}\n");

    let ids = present(temp.path());
    assert_eq!(ids, vec![SignalId::ReactDependency, SignalId::StaticExport]);

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    let resolution = resolve(&signals, "cloudflare").unwrap();
    assert_eq!(
        resolution.plan().unwrap().primary_template(),
        TemplateId::CloudflarePages
    );
}

#[test]
fn test_dockerfile_triggers_cloudflare_suggestion() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "Dockerfile",
        "FROM python:3.12-slim\nCOPY . /app\nEXPOSE 8000\nCMD [\"python\", \"app.py\"]\n",
    );

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    assert!(signals.is_present(SignalId::Dockerfile));
    assert_eq!(
        signals.get(SignalId::DockerfileExposePort).unwrap().evidence,
        "EXPOSE 8000"
    );

    let resolution = resolve(&signals, "cloudflare").unwrap();
    let suggestion = resolution.suggestion().unwrap();
    assert_eq!(suggestion.triggering_signal, SignalId::DockerfileExposePort);
}

#[test]
fn test_worker_with_bindings() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "wrangler.toml",
        "name = \"edge\"\nmain = \"src/index.ts\"\n\n[[kv_namespaces]]\nbinding = \"CACHE\"\nid = \"abc\"\n\n[[d1_databases]]\nbinding = \"DB\"\ndatabase_name = \"edge\"\n",
    );
    write(
        temp.path(),
        "src/index.ts",
        "export default {\n  async fetch(request: Request) {\n    return new Response(\"ok\");\n  },\n};\n",
    );

    let ids = present(temp.path());
    assert!(ids.contains(&SignalId::WranglerConfig));
    assert!(ids.contains(&SignalId::KvNamespaces));
    assert!(ids.contains(&SignalId::D1Databases));

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    let resolution = resolve(&signals, "cloudflare").unwrap();
    let plan = resolution.plan().unwrap();
    assert_eq!(plan.primary_template(), TemplateId::CloudflareWorker);
    assert_eq!(
        plan.additional_resources().iter().copied().collect::<Vec<_>>(),
        vec![ResourceId::KvNamespace, ResourceId::D1Database]
    );
}

#[test]
fn test_excluded_directories_are_not_scanned() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "node_modules/some-lib/package.json",
        r#"{"dependencies": {"express": "^4.0.0"}}"#,
    );
    write(temp.path(), "target/Dockerfile", "FROM scratch\n");

    assert!(present(temp.path()).is_empty());
}

#[test]
fn test_gitignored_files_are_skipped() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    write(temp.path(), ".gitignore", "generated/\n");
    write(temp.path(), "generated/docker-compose.yml", "services: {}\n");
    write(temp.path(), "compose.yaml", "services: {}\n");

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    let compose = signals.get(SignalId::DockerCompose).unwrap();
    assert_eq!(compose.source, Path::new("compose.yaml"));
}

#[test]
fn test_django_templates_resolve_to_fullstack() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "requirements.txt", "Django>=5.0\nredis\n");
    write(
        temp.path(),
        "shop/templates/index.html",
        "<h1>{{ title }}</h1>\n",
    );

    let signals = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    assert!(signals.is_present(SignalId::Django));
    assert!(signals.is_present(SignalId::ServerTemplates));
    assert!(signals.is_present(SignalId::RedisClient));

    let resolution = resolve(&signals, "gcp").unwrap();
    let plan = resolution.plan().unwrap();
    assert_eq!(plan.primary_template(), TemplateId::FullstackApp);
    assert!(plan.additional_resources().contains(&ResourceId::ManagedCache));
}

#[test]
fn test_scan_is_repeatable() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "b/package.json", r#"{"dependencies": {"vue": "^3"}}"#);
    write(temp.path(), "a/package.json", r#"{"dependencies": {"vue": "^2"}}"#);

    let first = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    let second = scan_repository(temp.path(), &ScanConfig::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.get(SignalId::VueDependency).unwrap().source,
        Path::new("a/package.json")
    );
}
