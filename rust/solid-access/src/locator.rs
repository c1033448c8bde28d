use crate::{Fetch, FetchRequest, ResourceInfo, get_resource_info};
use solid_access_graph::{Graph, Iri, parse_turtle};
use tracing::debug;

/// Which rules of an ACL apply to the target resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AclScope {
    /// The ACL is the resource's own: `acl:accessTo` rules apply
    Resource,
    /// The ACL was inherited from an ancestor container: only
    /// `acl:default` rules declared for that container apply
    Fallback {
        /// The container the fallback ACL was found on
        container: Iri,
    },
}

/// A retrieved WAC authorization resource, together with where it came from
#[derive(Clone, Debug, PartialEq)]
pub struct AclSource {
    /// The URL the ACL lives at
    pub url: Iri,
    /// The parsed authorization graph
    pub graph: Graph,
    /// Whether this is the resource's own ACL or an ancestor's
    pub scope: AclScope,
}

/// A retrieved ACP Access Control Resource
#[derive(Clone, Debug, PartialEq)]
pub struct AcrSource {
    /// The URL the ACR lives at
    pub url: Iri,
    /// The parsed policy graph
    pub graph: Graph,
}

/// Retrieve the WAC authorization resource that governs a resource.
///
/// The resource's own advertised ACL is tried first. When it is absent,
/// unreachable or unparseable, the walk moves to the parent container and
/// repeats — fetching each ancestor's metadata to discover *its* ACL link —
/// until an ancestor ACL is retrieved or the root is passed. Every failure
/// along the way is terminal for that step, never retried, and the overall
/// result degrades to `None`.
pub async fn fetch_wac_source(info: &ResourceInfo, fetch: &impl Fetch) -> Option<AclSource> {
    let metadata = info.metadata();

    if let Some(own_acl) = &metadata.acl {
        if let Some(graph) = fetch_authorization_graph(own_acl, fetch).await {
            return Some(AclSource {
                url: own_acl.clone(),
                graph,
                scope: AclScope::Resource,
            });
        }
        debug!(acl = %own_acl, "own ACL unavailable, walking to ancestors");
    } else {
        debug!(resource = %metadata.url, "resource advertises no ACL link, walking to ancestors");
    }

    let mut ancestor = metadata.url.parent_container();
    while let Some(container) = ancestor {
        if let Some(source) = container_acl(&container, fetch).await {
            return Some(source);
        }
        ancestor = container.parent_container();
    }

    debug!(resource = %metadata.url, "no fallback ACL found on any ancestor");
    None
}

async fn container_acl(container: &Iri, fetch: &impl Fetch) -> Option<AclSource> {
    let info = get_resource_info(container, fetch).await.ok()?;
    let acl = info.metadata().acl.clone()?;
    let graph = fetch_authorization_graph(&acl, fetch).await?;
    debug!(container = %container, acl = %acl, "using fallback ACL");
    Some(AclSource {
        url: acl,
        graph,
        scope: AclScope::Fallback {
            container: container.clone(),
        },
    })
}

/// Retrieve the ACP Access Control Resource attached to a resource.
///
/// ACP servers resolve inheritance themselves and attach one effective ACR
/// per protected resource, so there is no ancestor walk here: either the
/// advertised ACR is retrievable or the result is `None`.
pub async fn fetch_acr_source(info: &ResourceInfo, fetch: &impl Fetch) -> Option<AcrSource> {
    let metadata = info.metadata();

    let Some(acr) = &metadata.acr else {
        debug!(resource = %metadata.url, "resource advertises no access control resource");
        return None;
    };

    let graph = fetch_authorization_graph(acr, fetch).await?;
    Some(AcrSource {
        url: acr.clone(),
        graph,
    })
}

/// GET an authorization resource and parse it. Any failure — transport,
/// non-success status, or a body that is not an authorization graph —
/// resolves to `None`.
async fn fetch_authorization_graph(url: &Iri, fetch: &impl Fetch) -> Option<Graph> {
    let response = match fetch.fetch(FetchRequest::get(url)).await {
        Ok(response) => response,
        Err(error) => {
            debug!(url = %url, %error, "authorization resource fetch failed");
            return None;
        }
    };
    if !response.is_success() {
        debug!(url = %url, status = response.status, "authorization resource not available");
        return None;
    }
    match parse_turtle(&response.body, url) {
        Ok(graph) => Some(graph),
        Err(error) => {
            debug!(url = %url, %error, "authorization resource did not parse");
            None
        }
    }
}
