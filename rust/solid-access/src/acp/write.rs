use super::acr_root;
use crate::{
    AccessChange, AccessModes, AcrSource, Actor, Fetch, FetchRequest, ModeChange, ResourceInfo,
    SolidAccessError, fetch_acr_source, get_resource_info,
};
use solid_access_graph::{Graph, Iri, Subject, Triple, vocab};
use tracing::warn;

/// The result of a successful ACP access update: the resource's metadata
/// and its freshly saved Access Control Resource
#[derive(Clone, Debug)]
pub struct UpdatedAcr {
    /// The target resource, as fetched during the update
    pub resource: ResourceInfo,
    /// The Access Control Resource that was written back
    pub acr: AcrSource,
}

/// What the maintained matcher should match on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatcherTarget {
    /// A plain actor
    Actor(Actor),
    /// Holders of a verifiable credential
    Vc {
        /// The accepted credential type
        vc_type: Iri,
        /// The accepted issuer, when constrained
        issuer: Option<Iri>,
    },
}

impl MatcherTarget {
    /// The stable local-name key of the policy/matcher pair maintained for
    /// this target. Agent and group keys embed the percent-encoded IRI so
    /// that distinct actors never share a pair.
    fn key(&self) -> String {
        match self {
            MatcherTarget::Actor(Actor::Agent(iri)) => format!("agent-{}", encode(iri.as_str())),
            MatcherTarget::Actor(Actor::Group(iri)) => format!("group-{}", encode(iri.as_str())),
            MatcherTarget::Actor(Actor::Public) => "public".to_owned(),
            MatcherTarget::Actor(Actor::Authenticated) => "authenticated".to_owned(),
            MatcherTarget::Vc { .. } => "vc".to_owned(),
        }
    }

    fn reference_triples(&self, matcher: &Subject) -> Vec<Triple> {
        match self {
            MatcherTarget::Actor(Actor::Agent(iri)) => vec![Triple::new(
                matcher.clone(),
                vocab::acp::agent(),
                iri.clone(),
            )],
            MatcherTarget::Actor(Actor::Group(iri)) => vec![Triple::new(
                matcher.clone(),
                vocab::acp::group(),
                iri.clone(),
            )],
            MatcherTarget::Actor(Actor::Public) => vec![Triple::new(
                matcher.clone(),
                vocab::acp::agent(),
                vocab::acp::public_agent(),
            )],
            MatcherTarget::Actor(Actor::Authenticated) => vec![Triple::new(
                matcher.clone(),
                vocab::acp::agent(),
                vocab::acp::authenticated_agent(),
            )],
            MatcherTarget::Vc { vc_type, issuer } => {
                let mut triples = vec![Triple::new(
                    matcher.clone(),
                    vocab::acp::vc(),
                    vc_type.clone(),
                )];
                if let Some(issuer) = issuer {
                    triples.push(Triple::new(
                        matcher.clone(),
                        vocab::acp::issuer(),
                        issuer.clone(),
                    ));
                }
                triples
            }
        }
    }
}

/// Percent-encode everything outside the URL-unreserved set, so the result
/// is injective and survives as an IRI fragment
fn encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Compute the Access Control Resource graph that results from applying
/// `change` for `target`, without any network access.
///
/// Each target owns a well-known policy/matcher pair within the ACR
/// (`#<key>-policy` / `#<key>-matcher`). The matcher is rewritten to its
/// canonical shape; the policy's existing allow and deny sets are read
/// back, the partial change is merged in (granting a mode clears its
/// denial and vice versa, unspecified modes stay put), and the policy is
/// linked into the resource's default Access Control — and into the member
/// Access Control when `inherit` is requested, or unlinked from it when
/// not.
pub fn rewrite_for_change(
    acr: &AcrSource,
    target: &MatcherTarget,
    change: &AccessChange,
    inherit: bool,
) -> Result<Graph, SolidAccessError> {
    let mut change = change.validated()?;
    // write implies append: granting write grants append alongside it
    if change.write == ModeChange::Grant {
        change.append = ModeChange::Grant;
    }

    let mut graph = acr.graph.clone();
    let root = acr_root(&graph, &acr.url);
    graph.insert(Triple::new(
        root.clone(),
        vocab::rdf::type_(),
        vocab::acp::access_control_resource(),
    ));

    let key = target.key();
    let matcher_iri = acr.url.with_fragment(&format!("{key}-matcher"));
    let policy_iri = acr.url.with_fragment(&format!("{key}-policy"));
    let matcher = Subject::Iri(matcher_iri.clone());
    let policy = Subject::Iri(policy_iri.clone());

    // the matcher always has exactly its canonical shape
    graph.remove_about(&matcher);
    graph.insert(Triple::new(
        matcher.clone(),
        vocab::rdf::type_(),
        vocab::acp::matcher(),
    ));
    graph.extend(target.reference_triples(&matcher));

    // merge the partial change into the policy's existing mode sets
    let mut allow = super::model::parse_modes(&graph, &policy, &vocab::acp::allow());
    let mut deny = super::model::parse_modes(&graph, &policy, &vocab::acp::deny());
    let merge = |mode_change: ModeChange, allowed: &mut bool, denied: &mut bool| {
        match mode_change {
            ModeChange::Grant => {
                *allowed = true;
                *denied = false;
            }
            ModeChange::Revoke => {
                *allowed = false;
                *denied = true;
            }
            ModeChange::Unchanged => {}
        }
    };
    merge(change.read, &mut allow.read, &mut deny.read);
    merge(change.append, &mut allow.append, &mut deny.append);
    merge(change.write, &mut allow.write, &mut deny.write);
    merge(change.control_read, &mut allow.control, &mut deny.control);

    graph.remove_about(&policy);
    graph.insert(Triple::new(
        policy.clone(),
        vocab::rdf::type_(),
        vocab::acp::policy(),
    ));
    graph.insert(Triple::new(
        policy.clone(),
        vocab::acp::all_of(),
        matcher_iri,
    ));
    graph.extend(mode_triples(&policy, &vocab::acp::allow(), allow));
    graph.extend(mode_triples(&policy, &vocab::acp::deny(), deny));

    // link the policy from the default access control
    let control_iri = acr.url.with_fragment("default-access-control");
    let control = Subject::Iri(control_iri.clone());
    graph.insert(Triple::new(
        control.clone(),
        vocab::rdf::type_(),
        vocab::acp::access_control_class(),
    ));
    graph.insert(Triple::new(
        root.clone(),
        vocab::acp::access_control(),
        control_iri,
    ));
    graph.insert(Triple::new(
        control,
        vocab::acp::apply(),
        policy_iri.clone(),
    ));

    // and from the member access control, when inheriting
    let member = Subject::Iri(acr.url.with_fragment("default-member-access-control"));
    let member_iri = acr.url.with_fragment("default-member-access-control");
    if inherit {
        graph.insert(Triple::new(
            member.clone(),
            vocab::rdf::type_(),
            vocab::acp::access_control_class(),
        ));
        graph.insert(Triple::new(
            root,
            vocab::acp::member_access_control(),
            member_iri,
        ));
        graph.insert(Triple::new(member, vocab::acp::apply(), policy_iri));
    } else {
        graph.remove(&Triple::new(member, vocab::acp::apply(), policy_iri));
    }

    Ok(graph)
}

fn mode_triples(subject: &Subject, predicate: &Iri, modes: AccessModes) -> Vec<Triple> {
    let mut triples = Vec::new();
    let mut push = |mode: Iri| {
        triples.push(Triple::new(subject.clone(), predicate.clone(), mode));
    };
    if modes.read {
        push(vocab::acl::read());
    }
    if modes.append {
        push(vocab::acl::append());
    }
    if modes.write {
        push(vocab::acl::write());
    }
    if modes.control {
        push(vocab::acl::control());
    }
    triples
}

/// Apply a partial access change for a specific agent. See
/// [`set_target_access`].
pub async fn set_agent_access(
    resource: &Iri,
    agent: &Iri,
    change: &AccessChange,
    inherit: bool,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcr>, SolidAccessError> {
    set_target_access(
        resource,
        &MatcherTarget::Actor(Actor::Agent(agent.clone())),
        change,
        inherit,
        fetch,
    )
    .await
}

/// Apply a partial access change for everyone. See [`set_target_access`].
pub async fn set_public_access(
    resource: &Iri,
    change: &AccessChange,
    inherit: bool,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcr>, SolidAccessError> {
    set_target_access(
        resource,
        &MatcherTarget::Actor(Actor::Public),
        change,
        inherit,
        fetch,
    )
    .await
}

/// Apply a partial access change for all logged-in agents. See
/// [`set_target_access`].
pub async fn set_authenticated_access(
    resource: &Iri,
    change: &AccessChange,
    inherit: bool,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcr>, SolidAccessError> {
    set_target_access(
        resource,
        &MatcherTarget::Actor(Actor::Authenticated),
        change,
        inherit,
        fetch,
    )
    .await
}

/// Apply a partial access change for holders of a verifiable credential.
///
/// Credential policies can only carry read, append and write: asking for
/// control is not expressible and fails before any network access.
pub async fn set_vc_access(
    resource: &Iri,
    vc_type: &Iri,
    issuer: Option<&Iri>,
    change: &AccessChange,
    inherit: bool,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcr>, SolidAccessError> {
    if change.control_read != ModeChange::Unchanged
        || change.control_write != ModeChange::Unchanged
    {
        return Err(SolidAccessError::Inexpressible(
            "verifiable-credential policies cannot govern the control mode".to_owned(),
        ));
    }
    set_target_access(
        resource,
        &MatcherTarget::Vc {
            vc_type: vc_type.clone(),
            issuer: issuer.cloned(),
        },
        change,
        inherit,
        fetch,
    )
    .await
}

/// Apply a partial access change for a matcher target and persist the
/// resulting Access Control Resource.
///
/// A resource without a server-attached ACR, an unreachable ACR, and a
/// save the server rejects all resolve to `Ok(None)`; only caller-input
/// validation failures are errors.
pub async fn set_target_access(
    resource: &Iri,
    target: &MatcherTarget,
    change: &AccessChange,
    inherit: bool,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcr>, SolidAccessError> {
    let change = change.validated()?;

    let info = get_resource_info(resource, fetch).await?;
    let Some(acr) = fetch_acr_source(&info, fetch).await else {
        return Ok(None);
    };

    let graph = rewrite_for_change(&acr, target, &change, inherit)?;
    let body = solid_access_graph::serialize_turtle(&graph);

    match fetch
        .fetch(FetchRequest::put(&acr.url, "text/turtle", body))
        .await
    {
        Ok(response) if response.is_success() => {}
        Ok(response) => {
            warn!(
                acr = %acr.url,
                status = response.status,
                "server rejected the updated access control resource"
            );
            return Ok(None);
        }
        Err(error) => {
            warn!(acr = %acr.url, %error, "saving the access control resource failed");
            return Ok(None);
        }
    }

    Ok(Some(UpdatedAcr {
        resource: info,
        acr: AcrSource {
            url: acr.url,
            graph,
        },
    }))
}
