//! Static detection table
//!
//! Maps each catalog signal to the files it is looked for in and an optional
//! content pattern. Extending detection means adding rows here; the detector
//! and the rule evaluators never change for a new row.

use super::catalog::SignalId;

/// Which files a detection row applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePattern {
    /// Exact file name, anywhere in the tree
    Name(&'static str),
    /// File extension without the dot
    Extension(&'static str),
    /// Any file below a directory with this name
    InDir(&'static str),
}

impl FilePattern {
    pub fn matches(&self, file_name: &str, extension: Option<&str>, dirs: &[&str]) -> bool {
        match self {
            FilePattern::Name(name) => file_name == *name,
            FilePattern::Extension(ext) => extension == Some(*ext),
            FilePattern::InDir(dir) => dirs.contains(dir),
        }
    }
}

/// One row: signal id, file patterns (any may match), optional content regex
#[derive(Debug, Clone, Copy)]
pub struct MatchSpec {
    pub signal: SignalId,
    pub files: &'static [FilePattern],
    /// When `None`, the presence of a matching file is the evidence
    pub content: Option<&'static str>,
}

use FilePattern::{Extension as Ext, InDir, Name};

const PACKAGE_JSON: &[FilePattern] = &[Name("package.json")];
const PYTHON_MANIFESTS: &[FilePattern] = &[
    Name("requirements.txt"),
    Name("requirements-dev.txt"),
    Name("pyproject.toml"),
    Name("Pipfile"),
    Name("setup.py"),
];
const JS_SOURCES: &[FilePattern] = &[Ext("js"), Ext("mjs"), Ext("ts"), Ext("jsx"), Ext("tsx")];
const NEXT_CONFIGS: &[FilePattern] = &[
    Name("next.config.js"),
    Name("next.config.mjs"),
    Name("next.config.ts"),
];
const WRANGLER_CONFIGS: &[FilePattern] = &[
    Name("wrangler.toml"),
    Name("wrangler.json"),
    Name("wrangler.jsonc"),
];
const DOCKERFILES: &[FilePattern] = &[Name("Dockerfile")];

/// Rows in catalog order; several rows may target the same signal
pub const DETECTION_TABLE: &[MatchSpec] = &[
    // frontend
    MatchSpec {
        signal: SignalId::ReactDependency,
        files: PACKAGE_JSON,
        content: Some(r#""react"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::VueDependency,
        files: PACKAGE_JSON,
        content: Some(r#""vue"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::AngularDependency,
        files: PACKAGE_JSON,
        content: Some(r#""@angular/core"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::AngularDependency,
        files: &[Name("angular.json")],
        content: None,
    },
    MatchSpec {
        signal: SignalId::SvelteDependency,
        files: PACKAGE_JSON,
        content: Some(r#""(svelte|@sveltejs/kit)"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::NextDependency,
        files: PACKAGE_JSON,
        content: Some(r#""next"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::SsrConfig,
        files: JS_SOURCES,
        content: Some(r"export\s+(async\s+)?function\s+getServerSideProps"),
    },
    MatchSpec {
        signal: SignalId::SsrConfig,
        files: &[Name("nuxt.config.ts"), Name("nuxt.config.js")],
        content: Some(r"ssr\s*:\s*true"),
    },
    MatchSpec {
        signal: SignalId::SsrConfig,
        files: &[Name("svelte.config.js")],
        content: Some(r"@sveltejs/adapter-node"),
    },
    MatchSpec {
        signal: SignalId::SsrConfig,
        files: &[Name("astro.config.mjs")],
        content: Some(r#"output\s*:\s*['"]server['"]"#),
    },
    MatchSpec {
        signal: SignalId::StaticExport,
        files: NEXT_CONFIGS,
        content: Some(r#"output\s*:\s*['"]export['"]"#),
    },
    MatchSpec {
        signal: SignalId::StaticExport,
        files: &[Name("vite.config.js"), Name("vite.config.ts")],
        content: None,
    },
    // backend
    MatchSpec {
        signal: SignalId::FastApi,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])fastapi\b"#),
    },
    MatchSpec {
        signal: SignalId::Flask,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])flask\b"#),
    },
    MatchSpec {
        signal: SignalId::Django,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])django\b"#),
    },
    MatchSpec {
        signal: SignalId::Django,
        files: &[Name("manage.py")],
        content: Some(r"DJANGO_SETTINGS_MODULE"),
    },
    MatchSpec {
        signal: SignalId::Express,
        files: PACKAGE_JSON,
        content: Some(r#""express"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::NestJs,
        files: PACKAGE_JSON,
        content: Some(r#""@nestjs/core"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::ServerTemplates,
        files: &[InDir("templates"), InDir("views")],
        content: Some(r"\{%|\{\{|<%"),
    },
    MatchSpec {
        signal: SignalId::BackgroundWorker,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])(celery|rq|dramatiq|huey)\b"#),
    },
    MatchSpec {
        signal: SignalId::BackgroundWorker,
        files: PACKAGE_JSON,
        content: Some(r#""(bull|bullmq|agenda|bee-queue)"\s*:"#),
    },
    // containerization
    MatchSpec {
        signal: SignalId::Dockerfile,
        files: DOCKERFILES,
        content: None,
    },
    MatchSpec {
        signal: SignalId::DockerfileExposePort,
        files: DOCKERFILES,
        content: Some(r"(?m)^\s*EXPOSE\s+\d+"),
    },
    MatchSpec {
        signal: SignalId::DockerCompose,
        files: &[
            Name("docker-compose.yml"),
            Name("docker-compose.yaml"),
            Name("compose.yml"),
            Name("compose.yaml"),
        ],
        content: None,
    },
    MatchSpec {
        signal: SignalId::KubernetesManifest,
        files: &[Ext("yaml"), Ext("yml")],
        content: Some(r"(?m)^kind:\s*(Deployment|StatefulSet|DaemonSet|Pod)\b"),
    },
    // database
    MatchSpec {
        signal: SignalId::PostgresClient,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])(psycopg2?(-binary)?|psycopg|asyncpg)\b"#),
    },
    MatchSpec {
        signal: SignalId::PostgresClient,
        files: PACKAGE_JSON,
        content: Some(r#""(pg|postgres)"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::SqlAlchemyClient,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])sqlalchemy\b"#),
    },
    MatchSpec {
        signal: SignalId::PrismaClient,
        files: PACKAGE_JSON,
        content: Some(r#""@prisma/client"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::MysqlClient,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])(mysqlclient|pymysql|mysql-connector-python)\b"#),
    },
    MatchSpec {
        signal: SignalId::MysqlClient,
        files: PACKAGE_JSON,
        content: Some(r#""mysql2?"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::MongoDbClient,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])(pymongo|motor|mongoengine)\b"#),
    },
    MatchSpec {
        signal: SignalId::MongoDbClient,
        files: PACKAGE_JSON,
        content: Some(r#""(mongodb|mongoose)"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::RedisClient,
        files: PYTHON_MANIFESTS,
        content: Some(r#"(?im)(^\s*|["'])redis\b"#),
    },
    MatchSpec {
        signal: SignalId::RedisClient,
        files: PACKAGE_JSON,
        content: Some(r#""(redis|ioredis)"\s*:"#),
    },
    // provider-specific
    MatchSpec {
        signal: SignalId::WranglerConfig,
        files: WRANGLER_CONFIGS,
        content: None,
    },
    MatchSpec {
        signal: SignalId::WorkerEntrypoint,
        files: JS_SOURCES,
        content: Some(
            r#"export\s+default\s*\{\s*(async\s+)?fetch\b|addEventListener\(\s*['"]fetch['"]"#,
        ),
    },
    MatchSpec {
        signal: SignalId::PagesFunctions,
        files: &[InDir("functions")],
        content: Some(r"export\s+(async\s+)?(function|const)\s+onRequest"),
    },
    MatchSpec {
        signal: SignalId::KvNamespaces,
        files: WRANGLER_CONFIGS,
        content: Some(r#"(?m)^\s*\[\[kv_namespaces\]\]|"kv_namespaces"\s*:"#),
    },
    MatchSpec {
        signal: SignalId::D1Databases,
        files: WRANGLER_CONFIGS,
        content: Some(r#"(?m)^\s*\[\[d1_databases\]\]|"d1_databases"\s*:"#),
    },
];

/// Rows targeting one signal, in table order
pub fn rows_for(signal: SignalId) -> impl Iterator<Item = &'static MatchSpec> {
    DETECTION_TABLE.iter().filter(move |row| row.signal == signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_every_catalog_signal_has_a_row() {
        for id in SignalId::all_variants() {
            assert!(
                rows_for(*id).next().is_some(),
                "signal {} has no detection row",
                id
            );
        }
    }

    #[test]
    fn test_all_content_patterns_compile() {
        for row in DETECTION_TABLE {
            if let Some(pattern) = row.content {
                assert!(
                    Regex::new(pattern).is_ok(),
                    "pattern for {} does not compile: {}",
                    row.signal,
                    pattern
                );
            }
        }
    }

    #[test]
    fn test_expose_pattern() {
        let row = rows_for(SignalId::DockerfileExposePort).next().unwrap();
        let re = Regex::new(row.content.unwrap()).unwrap();
        assert!(re.is_match("FROM python:3.12\nEXPOSE 8080\n"));
        assert!(!re.is_match("FROM python:3.12\n# EXPOSE later\n"));
    }

    #[test]
    fn test_python_manifest_patterns() {
        let row = rows_for(SignalId::Flask).next().unwrap();
        let re = Regex::new(row.content.unwrap()).unwrap();
        assert!(re.is_match("Flask==3.0.0\n"));
        assert!(re.is_match("dependencies = [\n  \"flask>=3\",\n]"));
        assert!(re.is_match("dependencies = [\"gunicorn\", \"flask>=3\"]"));
        assert!(re.is_match("install_requires=['Flask']"));
        assert!(!re.is_match("flask_cors_helper_lib\n"));
        assert!(!re.is_match("# uses quart, not flask\n"));
    }

    #[test]
    fn test_wrangler_block_patterns() {
        let kv = Regex::new(rows_for(SignalId::KvNamespaces).next().unwrap().content.unwrap())
            .unwrap();
        assert!(kv.is_match("name = \"app\"\n\n[[kv_namespaces]]\nbinding = \"CACHE\"\n"));
        assert!(kv.is_match("{ \"kv_namespaces\": [] }"));
        assert!(!kv.is_match("[[d1_databases]]"));
    }

    #[test]
    fn test_file_pattern_matching() {
        assert!(Name("package.json").matches("package.json", Some("json"), &[]));
        assert!(Ext("tsx").matches("page.tsx", Some("tsx"), &["pages"]));
        assert!(InDir("functions").matches("hello.ts", Some("ts"), &["functions", "api"]));
        assert!(!InDir("functions").matches("hello.ts", Some("ts"), &["src"]));
    }
}
