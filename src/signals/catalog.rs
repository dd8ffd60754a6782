//! Shared, versioned signal catalog
//!
//! Every signal id the detector may emit is listed here. Declaration order is
//! the canonical ordering of a `SignalSet`.

use crate::error::ResolveError;
use crate::util::suggest::closest_match;
use serde::Serialize;

/// Catalog version; bump when ids are added, renamed or removed
pub const SIGNAL_CATALOG_VERSION: &str = "1";

/// Broad grouping of signals, matching the detection table sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalCategory {
    Frontend,
    Backend,
    Containerization,
    Database,
    ProviderSpecific,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Frontend => "frontend",
            SignalCategory::Backend => "backend",
            SignalCategory::Containerization => "containerization",
            SignalCategory::Database => "database",
            SignalCategory::ProviderSpecific => "provider-specific",
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

crate::define_id_enum! {
    /// Identifier of a signal in the shared catalog
    SignalId ("signal id") {
        ReactDependency => "react-dependency" : "React",
        VueDependency => "vue-dependency" : "Vue",
        AngularDependency => "angular-dependency" : "Angular",
        SvelteDependency => "svelte-dependency" : "Svelte",
        NextDependency => "next-dependency" : "Next.js",
        /// Frontend framework configured for server-side rendering
        SsrConfig => "ssr-config" : "Server-side rendering",
        /// Frontend configured for a static export build
        StaticExport => "static-export" : "Static export",

        FastApi => "fastapi" : "FastAPI",
        Flask => "flask" : "Flask",
        Django => "django" : "Django",
        Express => "express" : "Express",
        NestJs => "nestjs" : "NestJS",
        /// Server-side HTML templates directory
        ServerTemplates => "server-templates" : "Server templates",
        /// Task queue / background job library
        BackgroundWorker => "background-worker" : "Background worker",

        Dockerfile => "dockerfile" : "Dockerfile",
        DockerfileExposePort => "dockerfile-expose-port" : "Dockerfile EXPOSE",
        DockerCompose => "docker-compose" : "Docker Compose",
        KubernetesManifest => "kubernetes-manifest" : "Kubernetes manifest",

        PostgresClient => "postgres-client" : "PostgreSQL client",
        SqlAlchemyClient => "sqlalchemy-client" : "SQLAlchemy",
        PrismaClient => "prisma-client" : "Prisma",
        MysqlClient => "mysql-client" : "MySQL client",
        MongoDbClient => "mongodb-client" : "MongoDB client",
        RedisClient => "redis-client" : "Redis client",

        WranglerConfig => "wrangler-config" : "Wrangler config",
        WorkerEntrypoint => "worker-entrypoint" : "Worker entry point",
        PagesFunctions => "pages-functions" : "Pages Functions",
        KvNamespaces => "kv-namespaces" : "KV namespaces block",
        D1Databases => "d1-databases" : "D1 databases block",
    }
}

impl SignalId {
    pub fn category(&self) -> SignalCategory {
        use SignalId::*;
        match self {
            ReactDependency | VueDependency | AngularDependency | SvelteDependency
            | NextDependency | SsrConfig | StaticExport => SignalCategory::Frontend,
            FastApi | Flask | Django | Express | NestJs | ServerTemplates | BackgroundWorker => {
                SignalCategory::Backend
            }
            Dockerfile | DockerfileExposePort | DockerCompose | KubernetesManifest => {
                SignalCategory::Containerization
            }
            PostgresClient | SqlAlchemyClient | PrismaClient | MysqlClient | MongoDbClient
            | RedisClient => SignalCategory::Database,
            WranglerConfig | WorkerEntrypoint | PagesFunctions | KvNamespaces | D1Databases => {
                SignalCategory::ProviderSpecific
            }
        }
    }

    /// Parses a catalog id, reporting unknown ids as `InvalidSignal`
    pub fn parse(id: &str) -> Result<Self, ResolveError> {
        Self::from_id(id).ok_or_else(|| ResolveError::InvalidSignal {
            id: id.to_string(),
            suggestion: closest_match(id, Self::all_variants().iter().map(|s| s.as_str()))
                .map(str::to_string),
        })
    }

    pub fn in_category(category: SignalCategory) -> impl Iterator<Item = SignalId> {
        Self::all_variants()
            .iter()
            .copied()
            .filter(move |id| id.category() == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_id_serialization() {
        assert_eq!(
            serde_json::to_string(&SignalId::DockerfileExposePort).unwrap(),
            "\"dockerfile-expose-port\""
        );
        let parsed: SignalId = serde_json::from_str("\"sqlalchemy-client\"").unwrap();
        assert_eq!(parsed, SignalId::SqlAlchemyClient);
    }

    #[test]
    fn test_unknown_signal_fails_to_deserialize() {
        let result = serde_json::from_str::<SignalId>("\"cobol-dependency\"");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown signal id"));
    }

    #[test]
    fn test_parse_reports_invalid_signal_with_suggestion() {
        match SignalId::parse("react-dependancy") {
            Err(ResolveError::InvalidSignal { id, suggestion }) => {
                assert_eq!(id, "react-dependancy");
                assert_eq!(suggestion.as_deref(), Some("react-dependency"));
            }
            other => panic!("Expected InvalidSignal, got {:?}", other),
        }
    }

    #[test]
    fn test_every_id_is_unique_and_round_trips() {
        let mut seen = std::collections::HashSet::new();
        for id in SignalId::all_variants() {
            assert!(seen.insert(id.as_str()), "duplicate id {}", id);
            assert_eq!(SignalId::from_id(id.as_str()), Some(*id));
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(SignalId::NextDependency.category(), SignalCategory::Frontend);
        assert_eq!(SignalId::BackgroundWorker.category(), SignalCategory::Backend);
        assert_eq!(
            SignalId::KubernetesManifest.category(),
            SignalCategory::Containerization
        );
        assert_eq!(SignalId::RedisClient.category(), SignalCategory::Database);
        assert_eq!(
            SignalId::D1Databases.category(),
            SignalCategory::ProviderSpecific
        );
        assert_eq!(SignalId::in_category(SignalCategory::Containerization).count(), 4);
    }
}
