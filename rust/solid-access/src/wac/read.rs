use super::{matching_rules, rule_modes, rule_targets, rules};
use crate::{
    AccessModes, AclSource, Actor, Fetch, SolidAccessError, WacAccess, fetch_wac_source,
    get_resource_info,
};
use solid_access_graph::{Iri, vocab};
use std::collections::BTreeMap;

/// The merged access a single actor holds over a resource according to a
/// retrieved ACL: the OR of every matching rule, with write implying append
pub fn evaluate(source: &AclSource, resource: &Iri, actor: &Actor) -> AccessModes {
    matching_rules(&source.graph, resource, &source.scope, actor)
        .into_iter()
        .map(|rule| rule_modes(&source.graph, &rule))
        .fold(AccessModes::NONE, AccessModes::union)
}

/// The merged access of every actor of an IRI-identified kind (agents via
/// `acl:agent`, groups via `acl:agentGroup`). Actors with no matching rule
/// are absent from the result rather than present with all-false access.
pub fn evaluate_all(
    source: &AclSource,
    resource: &Iri,
    reference_predicate: &Iri,
) -> BTreeMap<Iri, AccessModes> {
    let mut merged: BTreeMap<Iri, AccessModes> = BTreeMap::new();
    for rule in rules(&source.graph) {
        if !rule_targets(&source.graph, &rule, resource, &source.scope) {
            continue;
        }
        let modes = rule_modes(&source.graph, &rule);
        for actor in source.graph.iri_objects(&rule, reference_predicate) {
            let entry = merged.entry(actor.clone()).or_insert(AccessModes::NONE);
            *entry = entry.union(modes);
        }
    }
    merged
}

/// The access a specific agent holds over a resource, or `None` when no
/// authorization resource is reachable for it
pub async fn agent_access(
    resource: &Iri,
    agent: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<WacAccess>, SolidAccessError> {
    actor_access(resource, &Actor::Agent(agent.clone()), fetch).await
}

/// The access a specific group holds over a resource
pub async fn group_access(
    resource: &Iri,
    group: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<WacAccess>, SolidAccessError> {
    actor_access(resource, &Actor::Group(group.clone()), fetch).await
}

/// The access everyone holds over a resource
pub async fn public_access(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<WacAccess>, SolidAccessError> {
    actor_access(resource, &Actor::Public, fetch).await
}

/// The access any logged-in agent holds over a resource
pub async fn authenticated_access(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<WacAccess>, SolidAccessError> {
    actor_access(resource, &Actor::Authenticated, fetch).await
}

/// The access an arbitrary [`Actor`] holds over a resource
pub async fn actor_access(
    resource: &Iri,
    actor: &Actor,
    fetch: &impl Fetch,
) -> Result<Option<WacAccess>, SolidAccessError> {
    let info = get_resource_info(resource, fetch).await?;
    let Some(source) = fetch_wac_source(&info, fetch).await else {
        return Ok(None);
    };
    Ok(Some(evaluate(&source, resource, actor).into()))
}

/// The access of every agent named by the governing ACL, keyed by WebID
pub async fn agent_access_all(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<BTreeMap<Iri, WacAccess>>, SolidAccessError> {
    all_by_predicate(resource, &vocab::acl::agent(), fetch).await
}

/// The access of every group named by the governing ACL, keyed by group IRI
pub async fn group_access_all(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<BTreeMap<Iri, WacAccess>>, SolidAccessError> {
    all_by_predicate(resource, &vocab::acl::agent_group(), fetch).await
}

async fn all_by_predicate(
    resource: &Iri,
    reference_predicate: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<BTreeMap<Iri, WacAccess>>, SolidAccessError> {
    let info = get_resource_info(resource, fetch).await?;
    let Some(source) = fetch_wac_source(&info, fetch).await else {
        return Ok(None);
    };
    Ok(Some(
        evaluate_all(&source, resource, reference_predicate)
            .into_iter()
            .map(|(actor, modes)| (actor, modes.into()))
            .collect(),
    ))
}
