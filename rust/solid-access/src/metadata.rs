use crate::{
    AccessModes, Fetch, FetchRequest, FetchResponse, SolidAccessError, WacAllow, parse_wac_allow,
};
use solid_access_graph::{Iri, vocab};

/// The `rel` value that links a resource to its WAC ACL
pub const REL_ACL: &str = "acl";
/// The `rel` value that links a resource to its ACP Access Control Resource
pub const REL_ACP_ACCESS_CONTROL: &str = "http://www.w3.org/ns/solid/acp#accessControl";
/// The `rel` value of ACP allow-mode hints
pub const REL_ACP_ALLOW: &str = "http://www.w3.org/ns/solid/acp#allow";

const RDF_CONTENT_TYPES: &[&str] = &[
    "text/turtle",
    "application/ld+json",
    "application/n-triples",
    "application/rdf+xml",
];

/// One entry of a `Link` response header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkEntry {
    /// The link target, as written (possibly relative)
    pub target: String,
    /// The link parameters, in order
    pub params: Vec<(String, String)>,
}

impl LinkEntry {
    /// Whether this link carries the given `rel` token. A single `rel`
    /// parameter may hold several whitespace-separated tokens.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.params
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("rel"))
            .any(|(_, value)| {
                value
                    .split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(rel))
            })
    }
}

/// Parse a `Link` header value into its entries.
///
/// Handles multiple comma-separated links, quoted parameter values (commas
/// and semicolons inside quotes do not split), and multiple parameters per
/// link.
pub fn parse_link_header(value: &str) -> Vec<LinkEntry> {
    let mut entries = Vec::new();

    for part in split_unquoted(value, ',') {
        let mut sections = split_unquoted(part.trim(), ';').into_iter();
        let Some(target_section) = sections.next() else {
            continue;
        };
        let target_section = target_section.trim();
        let Some(target) = target_section
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        else {
            continue;
        };

        let mut params = Vec::new();
        for section in sections {
            let Some((name, value)) = section.split_once('=') else {
                continue;
            };
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(value);
            params.push((name.trim().to_owned(), value.to_owned()));
        }

        entries.push(LinkEntry {
            target: target.to_owned(),
            params,
        });
    }

    entries
}

/// Split on `separator` outside of double quotes and angle brackets
fn split_unquoted(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_target = false;

    for (index, character) in value.char_indices() {
        match character {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_target = true,
            '>' if !in_quotes => in_target = false,
            c if c == separator && !in_quotes && !in_target => {
                parts.push(&value[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts.retain(|part| !part.trim().is_empty());
    parts
}

/// Everything this crate learns about a resource from its response headers
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceMetadata {
    /// The resource's own URL
    pub url: Iri,
    /// The advertised WAC ACL location, when the server exposed one
    pub acl: Option<Iri>,
    /// The server-attached ACP Access Control Resource, when exposed
    pub acr: Option<Iri>,
    /// The pod owner, when advertised
    pub pod_owner: Option<Iri>,
    /// The parsed `WAC-Allow` permission summary, when present
    pub wac_allow: Option<WacAllow>,
    /// ACP allow-mode Link hints for the requesting user, when present
    pub acp_allow: Option<AccessModes>,
    /// Whether the server describes the resource as an LDP container
    pub is_container: bool,
    /// The advertised content type, when present
    pub content_type: Option<String>,
}

impl ResourceMetadata {
    /// Derive metadata from a response's headers
    pub fn from_response(url: &Iri, response: &FetchResponse) -> Self {
        let mut links = Vec::new();
        for value in response.headers_named("link") {
            links.extend(parse_link_header(value));
        }

        let resolve = |target: &str| url.join(target).ok();
        let first_link = |rel: &str| {
            links
                .iter()
                .find(|link| link.has_rel(rel))
                .and_then(|link| resolve(&link.target))
        };

        let acl = first_link(REL_ACL);
        let acr = first_link(REL_ACP_ACCESS_CONTROL);
        let pod_owner = first_link(vocab::solid::POD_OWNER_REL);

        let mut acp_allow: Option<AccessModes> = None;
        for link in links.iter().filter(|link| link.has_rel(REL_ACP_ALLOW)) {
            let modes = acp_allow.get_or_insert(AccessModes::NONE);
            match link.target.as_str() {
                target if target == vocab::acp::read().as_str() => modes.read = true,
                target if target == vocab::acp::append().as_str() => modes.append = true,
                target if target == vocab::acp::write().as_str() => modes.write = true,
                target if target == vocab::acp::control().as_str() => modes.control = true,
                _ => {}
            }
        }
        let acp_allow = acp_allow.map(AccessModes::normalized);

        let is_container = url.is_container()
            || links.iter().any(|link| {
                link.has_rel("type")
                    && (link.target == vocab::ldp::container().as_str()
                        || link.target == vocab::ldp::basic_container().as_str())
            });

        let wac_allow = response.header("wac-allow").map(parse_wac_allow);
        let content_type = response
            .header("content-type")
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_owned());

        ResourceMetadata {
            url: url.clone(),
            acl,
            acr,
            pod_owner,
            wac_allow,
            acp_allow,
            is_container,
            content_type,
        }
    }
}

/// An RDF resource, as learned from its metadata
#[derive(Clone, Debug, PartialEq)]
pub struct GraphResource {
    /// The headers-derived description of the resource
    pub metadata: ResourceMetadata,
}

/// A non-RDF (file) resource, as learned from its metadata
#[derive(Clone, Debug, PartialEq)]
pub struct FileResource {
    /// The headers-derived description of the resource
    pub metadata: ResourceMetadata,
}

/// A fetched resource, tagged by what kind of thing the server says it is.
///
/// The tag is decided once, from the advertised content type, so downstream
/// code never has to guess a value's nature from its shape.
#[derive(Debug, PartialEq)]
pub enum ResourceInfo {
    /// A resource served in an RDF serialization
    Rdf(GraphResource),
    /// A resource served as an opaque file
    NonRdf(FileResource),
    /// Only metadata is available (for example, a 401/403 the caller chose
    /// to tolerate)
    MetadataOnly(ResourceMetadata),
}

impl ResourceInfo {
    /// The headers-derived description, whichever variant this is
    pub fn metadata(&self) -> &ResourceMetadata {
        match self {
            ResourceInfo::Rdf(resource) => &resource.metadata,
            ResourceInfo::NonRdf(resource) => &resource.metadata,
            ResourceInfo::MetadataOnly(metadata) => metadata,
        }
    }
}

impl Clone for ResourceInfo {
    // Cloning is dispatched on the tag so each variant states what a copy
    // of it means
    fn clone(&self) -> Self {
        match self {
            ResourceInfo::Rdf(resource) => ResourceInfo::Rdf(resource.clone()),
            ResourceInfo::NonRdf(resource) => ResourceInfo::NonRdf(resource.clone()),
            ResourceInfo::MetadataOnly(metadata) => ResourceInfo::MetadataOnly(metadata.clone()),
        }
    }
}

/// Options for [`get_resource_info_with`]
#[derive(Clone, Copy, Debug, Default)]
pub struct MetadataOptions {
    /// Treat 401 and 403 responses as metadata-only results instead of
    /// errors. This opt-out exists for metadata lookups only; mutation
    /// entry points never use it.
    pub ignore_authentication_errors: bool,
}

/// Fetch a resource's metadata with default options
pub async fn get_resource_info(
    url: &Iri,
    fetch: &impl Fetch,
) -> Result<ResourceInfo, SolidAccessError> {
    get_resource_info_with(url, fetch, MetadataOptions::default()).await
}

/// Fetch a resource's metadata via a single HEAD request.
///
/// A non-success response is an error (without metadata no authorization
/// decision is possible at all), except that
/// [`MetadataOptions::ignore_authentication_errors`] downgrades 401/403 to a
/// [`ResourceInfo::MetadataOnly`] result.
pub async fn get_resource_info_with(
    url: &Iri,
    fetch: &impl Fetch,
    options: MetadataOptions,
) -> Result<ResourceInfo, SolidAccessError> {
    let response = fetch.fetch(FetchRequest::head(url)).await?;
    let metadata = ResourceMetadata::from_response(url, &response);

    if !response.is_success() {
        if options.ignore_authentication_errors && matches!(response.status, 401 | 403) {
            return Ok(ResourceInfo::MetadataOnly(metadata));
        }
        return Err(SolidAccessError::Http {
            status: response.status,
            status_text: response.status_text,
            url: url.as_str().to_owned(),
        });
    }

    let is_rdf = metadata
        .content_type
        .as_deref()
        .is_some_and(|content_type| RDF_CONTENT_TYPES.contains(&content_type));

    Ok(if is_rdf {
        ResourceInfo::Rdf(GraphResource { metadata })
    } else {
        ResourceInfo::NonRdf(FileResource { metadata })
    })
}
