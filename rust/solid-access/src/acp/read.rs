use super::{AccessContext, evaluate, resource_policies};
use crate::{
    AccessModes, Actor, Fetch, SolidAccessError, fetch_acr_source, get_resource_info,
};
use solid_access_graph::Iri;
use std::collections::BTreeMap;

/// The access a specific agent holds over an ACP-governed resource, or
/// `None` when its Access Control Resource is unreachable
pub async fn agent_access(
    resource: &Iri,
    agent: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<AccessModes>, SolidAccessError> {
    context_access(
        resource,
        &AccessContext::actor(Actor::Agent(agent.clone())),
        fetch,
    )
    .await
}

/// The access everyone holds over an ACP-governed resource
pub async fn public_access(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<AccessModes>, SolidAccessError> {
    context_access(resource, &AccessContext::actor(Actor::Public), fetch).await
}

/// The access any logged-in agent holds over an ACP-governed resource
pub async fn authenticated_access(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<AccessModes>, SolidAccessError> {
    context_access(resource, &AccessContext::actor(Actor::Authenticated), fetch).await
}

/// The access an arbitrary [`AccessContext`] — actor plus optional
/// verifiable credential — holds over an ACP-governed resource
pub async fn context_access(
    resource: &Iri,
    context: &AccessContext,
    fetch: &impl Fetch,
) -> Result<Option<AccessModes>, SolidAccessError> {
    let info = get_resource_info(resource, fetch).await?;
    let Some(acr) = fetch_acr_source(&info, fetch).await else {
        return Ok(None);
    };
    let policies = resource_policies(&acr);
    Ok(Some(evaluate(&policies, context)))
}

/// The access of every agent named by any matcher of the resource's
/// policies, keyed by WebID. Agents that no applying policy names are
/// absent rather than present with all-false access.
pub async fn agent_access_all(
    resource: &Iri,
    fetch: &impl Fetch,
) -> Result<Option<BTreeMap<Iri, AccessModes>>, SolidAccessError> {
    let info = get_resource_info(resource, fetch).await?;
    let Some(acr) = fetch_acr_source(&info, fetch).await else {
        return Ok(None);
    };
    let policies = resource_policies(&acr);

    let mut agents: Vec<Iri> = Vec::new();
    for policy in &policies {
        for matcher in policy
            .all_of
            .iter()
            .chain(&policy.any_of)
            .chain(&policy.none_of)
        {
            for agent in &matcher.agents {
                if !agents.contains(agent) {
                    agents.push(agent.clone());
                }
            }
        }
    }

    Ok(Some(
        agents
            .into_iter()
            .map(|agent| {
                let context = AccessContext::actor(Actor::Agent(agent.clone()));
                (agent, evaluate(&policies, &context))
            })
            .collect(),
    ))
}
