//! Service base URLs derived from a project URL.
//!
//! Build APIs live on the collection URL. Release APIs live on the separate
//! Release Management host for cloud organizations, and on the collection URL
//! for on-premises servers.

use pipeline::ProjectUrl;

/// Base URLs for the two API areas the trigger uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    collection: String,
    release: String,
}

impl ServiceEndpoints {
    /// Derives the endpoints for `project_url`'s organization.
    pub fn for_project(project_url: &ProjectUrl) -> Self {
        let collection = project_url.collection_url().to_string();
        let release = release_base(&collection);
        Self {
            collection,
            release,
        }
    }

    /// Collection base URL (build APIs).
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Release Management base URL (release APIs).
    pub fn release(&self) -> &str {
        &self.release
    }
}

fn release_base(collection: &str) -> String {
    let Some((scheme, rest)) = collection.split_once("://") else {
        return collection.to_string();
    };
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host_lower = host.to_ascii_lowercase();

    let release_host = if host_lower == "dev.azure.com" {
        format!("vsrm.{host}")
    } else if let Some(org) = host_lower.strip_suffix(".visualstudio.com") {
        if org.ends_with(".vsrm") {
            host.to_string()
        } else {
            format!("{}.vsrm.visualstudio.com", &host[..org.len()])
        }
    } else {
        return collection.to_string();
    };

    if path.is_empty() {
        format!("{scheme}://{release_host}")
    } else {
        format!("{scheme}://{release_host}/{path}")
    }
}
