//! Signal groupings and predicates shared by the rule tables

use crate::signals::{SignalCategory, SignalId, SignalSet};

pub const CONTAINERIZATION: &[SignalId] = &[
    SignalId::DockerfileExposePort,
    SignalId::Dockerfile,
    SignalId::DockerCompose,
    SignalId::KubernetesManifest,
];

pub const FRONTEND_FRAMEWORKS: &[SignalId] = &[
    SignalId::ReactDependency,
    SignalId::VueDependency,
    SignalId::AngularDependency,
    SignalId::SvelteDependency,
    SignalId::NextDependency,
];

/// REST / GraphQL style backends
pub const API_BACKENDS: &[SignalId] = &[
    SignalId::FastApi,
    SignalId::Flask,
    SignalId::Express,
    SignalId::NestJs,
];

/// Batteries-included frameworks that render HTML server-side
pub const FULL_WEB_FRAMEWORKS: &[SignalId] = &[SignalId::Django];

pub const HTTP_BACKENDS: &[SignalId] = &[
    SignalId::FastApi,
    SignalId::Flask,
    SignalId::Express,
    SignalId::NestJs,
    SignalId::Django,
];

pub const BACKENDS: &[SignalId] = &[
    SignalId::FastApi,
    SignalId::Flask,
    SignalId::Express,
    SignalId::NestJs,
    SignalId::Django,
    SignalId::BackgroundWorker,
];

pub const TRADITIONAL_RELATIONAL_CLIENTS: &[SignalId] = &[
    SignalId::PostgresClient,
    SignalId::SqlAlchemyClient,
    SignalId::PrismaClient,
    SignalId::MysqlClient,
];

pub const WORKER_MARKERS: &[SignalId] = &[SignalId::WranglerConfig, SignalId::WorkerEntrypoint];

pub fn has_containerization(signals: &SignalSet) -> bool {
    signals.any_present(CONTAINERIZATION)
}

pub fn has_ssr_frontend(signals: &SignalSet) -> bool {
    signals.is_present(SignalId::SsrConfig)
}

pub fn has_frontend(signals: &SignalSet) -> bool {
    signals.has_category(SignalCategory::Frontend)
}

pub fn has_backend(signals: &SignalSet) -> bool {
    signals.any_present(BACKENDS)
}

pub fn has_api_backend(signals: &SignalSet) -> bool {
    signals.any_present(API_BACKENDS)
}

pub fn has_http_backend(signals: &SignalSet) -> bool {
    signals.any_present(HTTP_BACKENDS)
}

pub fn has_server_templates(signals: &SignalSet) -> bool {
    signals.is_present(SignalId::ServerTemplates)
}

pub fn is_static_frontend(signals: &SignalSet) -> bool {
    has_frontend(signals) && !has_backend(signals)
}

pub fn is_api_backend(signals: &SignalSet) -> bool {
    signals.any_present(API_BACKENDS) && !has_server_templates(signals)
}

pub fn is_templated_web_app(signals: &SignalSet) -> bool {
    signals.any_present(FULL_WEB_FRAMEWORKS)
        || (has_server_templates(signals) && has_http_backend(signals))
}

pub fn is_background_only(signals: &SignalSet) -> bool {
    signals.is_present(SignalId::BackgroundWorker) && !has_http_backend(signals)
}

pub fn has_worker_marker(signals: &SignalSet) -> bool {
    signals.any_present(WORKER_MARKERS)
}

pub fn is_pages_site(signals: &SignalSet) -> bool {
    has_frontend(signals) || signals.is_present(SignalId::PagesFunctions)
}

pub fn always(_signals: &SignalSet) -> bool {
    true
}

/// Frontend framework names present, for tie-break annotations
pub fn frontend_frameworks(signals: &SignalSet) -> Vec<&'static str> {
    signals
        .present_in(FRONTEND_FRAMEWORKS)
        .iter()
        .map(|id| id.name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[SignalId]) -> SignalSet {
        SignalSet::with_present(ids).unwrap()
    }

    #[test]
    fn test_static_frontend_requires_no_backend() {
        assert!(is_static_frontend(&set(&[SignalId::VueDependency])));
        assert!(!is_static_frontend(&set(&[SignalId::VueDependency, SignalId::Express])));
        assert!(!is_static_frontend(&set(&[
            SignalId::VueDependency,
            SignalId::BackgroundWorker
        ])));
    }

    #[test]
    fn test_api_backend_excludes_templates() {
        assert!(is_api_backend(&set(&[SignalId::Flask])));
        assert!(!is_api_backend(&set(&[SignalId::Flask, SignalId::ServerTemplates])));
        assert!(is_templated_web_app(&set(&[SignalId::Flask, SignalId::ServerTemplates])));
    }

    #[test]
    fn test_templates_alone_are_not_a_web_app() {
        assert!(!is_templated_web_app(&set(&[SignalId::ServerTemplates])));
        assert!(is_templated_web_app(&set(&[SignalId::Django])));
    }

    #[test]
    fn test_background_only() {
        assert!(is_background_only(&set(&[SignalId::BackgroundWorker])));
        assert!(!is_background_only(&set(&[
            SignalId::BackgroundWorker,
            SignalId::FastApi
        ])));
    }

    #[test]
    fn test_frontend_frameworks_in_catalog_order() {
        let signals = set(&[SignalId::VueDependency, SignalId::ReactDependency]);
        assert_eq!(frontend_frameworks(&signals), vec!["React", "Vue"]);
    }
}
