crate::define_id_enum! {
    /// Architecture template identifier, resolved by an external template loader
    TemplateId ("template id") {
        StaticSite => "static_site" : "Static site",
        ApiService => "api_service" : "API service",
        FullstackApp => "fullstack_app" : "Full-stack application",
        Containerized => "containerized" : "Containerized service",
        CloudflareWorker => "cloudflare_worker" : "Cloudflare Worker",
        CloudflarePages => "cloudflare_pages" : "Cloudflare Pages",
    }
}

crate::define_id_enum! {
    /// Supplementary managed resource appended alongside the primary template
    ResourceId ("resource id") {
        ManagedRelationalDatabase => "managed-relational-database" : "Managed relational database",
        ManagedDocumentDatabase => "managed-document-database" : "Managed document database",
        ManagedCache => "managed-cache" : "Managed cache",
        KvNamespace => "kv-namespace" : "Key-value namespace",
        D1Database => "d1-database" : "Edge relational database",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_wire_format() {
        assert_eq!(
            serde_json::to_string(&TemplateId::FullstackApp).unwrap(),
            "\"fullstack_app\""
        );
        assert_eq!(TemplateId::from_id("cloudflare_pages"), Some(TemplateId::CloudflarePages));
        assert_eq!(TemplateId::from_id("fullstack"), None);
    }

    #[test]
    fn test_resource_id_wire_format() {
        let parsed: ResourceId = serde_json::from_str("\"managed-cache\"").unwrap();
        assert_eq!(parsed, ResourceId::ManagedCache);
        assert_eq!(ResourceId::D1Database.name(), "Edge relational database");
    }
}
