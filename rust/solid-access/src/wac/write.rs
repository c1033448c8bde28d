use super::{
    actor_reference, fresh_rule_subject, matching_rules, mode_triples, rule_modes, rules,
};
use crate::{
    AccessChange, AccessModes, AclScope, AclSource, Actor, Fetch, FetchRequest, ResourceInfo,
    SolidAccessError, get_resource_info,
};
use solid_access_graph::{Graph, Iri, Subject, Term, Triple, TripleSelector, serialize_turtle, vocab};
use tracing::warn;

/// The result of a successful access update: the resource's metadata and
/// its freshly saved authorization resource
#[derive(Clone, Debug)]
pub struct UpdatedAcl {
    /// The target resource, as fetched during the update
    pub resource: ResourceInfo,
    /// The resource-scoped ACL that was written back
    pub acl: AclSource,
}

/// Compute the authorization graph that results from applying `change` for
/// `actor` on `resource`, without any network access.
///
/// When `source` is a fallback (ancestor) ACL it is first promoted into a
/// resource-scoped copy at `own_acl`; the fallback itself is never mutated.
/// Rules shared with other actors or other targets are split so that only
/// the (resource, actor) pair moves; an actor whose modes all end up false
/// has its rule entry pruned entirely.
pub fn rewrite_for_change(
    source: &AclSource,
    own_acl: &Iri,
    resource: &Iri,
    actor: &Actor,
    change: &AccessChange,
) -> Result<Graph, SolidAccessError> {
    let change = change.validated()?;

    let mut graph = match &source.scope {
        AclScope::Resource => source.graph.clone(),
        AclScope::Fallback { container } => {
            promote_fallback(&source.graph, container, own_acl, resource)
        }
    };
    let scope = AclScope::Resource;

    let current = matching_rules(&graph, resource, &scope, actor)
        .iter()
        .map(|rule| rule_modes(&graph, rule))
        .fold(AccessModes::NONE, AccessModes::union);
    let desired = change.apply(current);

    let (actor_predicate, actor_term) = actor_reference(actor);
    for rule in matching_rules(&graph, resource, &scope, actor) {
        let other_access_to: Vec<Iri> = graph
            .iri_objects(&rule, &vocab::acl::access_to())
            .into_iter()
            .filter(|target| *target != resource)
            .cloned()
            .collect();
        let defaults: Vec<Iri> = graph
            .iri_objects(&rule, &vocab::acl::default())
            .into_iter()
            .cloned()
            .collect();
        let modes = rule_modes(&graph, &rule);

        // detach this actor from the shared rule
        graph.remove(&Triple::new(
            rule.clone(),
            actor_predicate.clone(),
            actor_term.clone(),
        ));

        // the actor's grants for other targets move to a split-off rule
        if !other_access_to.is_empty() || !defaults.is_empty() {
            let split = fresh_rule_subject(&graph, own_acl);
            graph.insert(Triple::new(
                split.clone(),
                vocab::rdf::type_(),
                vocab::acl::authorization(),
            ));
            graph.insert(Triple::new(
                split.clone(),
                actor_predicate.clone(),
                actor_term.clone(),
            ));
            for target in other_access_to {
                graph.insert(Triple::new(split.clone(), vocab::acl::access_to(), target));
            }
            for target in defaults {
                graph.insert(Triple::new(split.clone(), vocab::acl::default(), target));
            }
            graph.extend(mode_triples(&split, modes));
        }

        if !has_actor_references(&graph, &rule) {
            graph.remove_about(&rule);
        }
    }

    if !desired.is_empty() {
        let rule = fresh_rule_subject(&graph, own_acl);
        graph.insert(Triple::new(
            rule.clone(),
            vocab::rdf::type_(),
            vocab::acl::authorization(),
        ));
        graph.insert(Triple::new(
            rule.clone(),
            vocab::acl::access_to(),
            resource.clone(),
        ));
        graph.insert(Triple::new(rule.clone(), actor_predicate, actor_term));
        graph.extend(mode_triples(&rule, desired));
    }

    Ok(graph)
}

/// Copy the `acl:default` rules of a fallback ACL into a resource-scoped
/// graph destined for `own_acl`. WAC requires an explicit per-resource ACL
/// to express resource-specific grants, so the first write against an
/// inherited ACL promotes it; rules scoped only to the ancestor itself do
/// not carry over.
fn promote_fallback(graph: &Graph, container: &Iri, own_acl: &Iri, resource: &Iri) -> Graph {
    let mut promoted = Graph::default();
    let mut minted = 0;

    for rule in rules(graph) {
        if !graph.has(
            &rule,
            &vocab::acl::default(),
            &Term::Iri(container.clone()),
        ) {
            continue;
        }

        let subject = match rule.as_iri().and_then(Iri::fragment) {
            Some(fragment) => Subject::Iri(own_acl.with_fragment(fragment)),
            None => {
                let subject = Subject::Iri(own_acl.with_fragment(&format!("inherited-{minted}")));
                minted += 1;
                subject
            }
        };

        for triple in graph.select(&TripleSelector::default().with_subject(rule.clone())) {
            if triple.predicate == vocab::acl::access_to()
                || triple.predicate == vocab::acl::default()
            {
                continue;
            }
            promoted.insert(Triple::new(
                subject.clone(),
                triple.predicate.clone(),
                triple.object.clone(),
            ));
        }

        promoted.insert(Triple::new(
            subject.clone(),
            vocab::acl::access_to(),
            resource.clone(),
        ));
        if resource.is_container() {
            promoted.insert(Triple::new(
                subject,
                vocab::acl::default(),
                resource.clone(),
            ));
        }
    }

    promoted
}

fn has_actor_references(graph: &Graph, rule: &Subject) -> bool {
    !graph.objects(rule, &vocab::acl::agent()).is_empty()
        || !graph.objects(rule, &vocab::acl::agent_group()).is_empty()
        || !graph.objects(rule, &vocab::acl::agent_class()).is_empty()
}

/// Apply a partial access change for a specific agent. See
/// [`set_actor_access`].
pub async fn set_agent_access(
    resource: &Iri,
    agent: &Iri,
    change: &AccessChange,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcl>, SolidAccessError> {
    set_actor_access(resource, &Actor::Agent(agent.clone()), change, fetch).await
}

/// Apply a partial access change for a specific group. See
/// [`set_actor_access`].
pub async fn set_group_access(
    resource: &Iri,
    group: &Iri,
    change: &AccessChange,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcl>, SolidAccessError> {
    set_actor_access(resource, &Actor::Group(group.clone()), change, fetch).await
}

/// Apply a partial access change for everyone. See [`set_actor_access`].
pub async fn set_public_access(
    resource: &Iri,
    change: &AccessChange,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcl>, SolidAccessError> {
    set_actor_access(resource, &Actor::Public, change, fetch).await
}

/// Apply a partial access change for all logged-in agents. See
/// [`set_actor_access`].
pub async fn set_authenticated_access(
    resource: &Iri,
    change: &AccessChange,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcl>, SolidAccessError> {
    set_actor_access(resource, &Actor::Authenticated, change, fetch).await
}

/// Apply a partial access change for an actor and persist the result.
///
/// Unequal control-read/control-write changes fail before any network
/// access. A resource that advertises no ACL, an unreachable governing
/// ACL, and a save the server rejects all resolve to `Ok(None)` — in the
/// last case the access was computed but could not be committed.
pub async fn set_actor_access(
    resource: &Iri,
    actor: &Actor,
    change: &AccessChange,
    fetch: &impl Fetch,
) -> Result<Option<UpdatedAcl>, SolidAccessError> {
    let change = change.validated()?;

    let info = get_resource_info(resource, fetch).await?;
    let Some(own_acl) = info.metadata().acl.clone() else {
        return Ok(None);
    };
    let Some(source) = crate::fetch_wac_source(&info, fetch).await else {
        return Ok(None);
    };

    let graph = rewrite_for_change(&source, &own_acl, resource, actor, &change)?;
    let body = serialize_turtle(&graph);

    match fetch
        .fetch(FetchRequest::put(&own_acl, "text/turtle", body))
        .await
    {
        Ok(response) if response.is_success() => {}
        Ok(response) => {
            warn!(
                acl = %own_acl,
                status = response.status,
                "server rejected the updated ACL"
            );
            return Ok(None);
        }
        Err(error) => {
            warn!(acl = %own_acl, %error, "saving the updated ACL failed");
            return Ok(None);
        }
    }

    Ok(Some(UpdatedAcl {
        resource: info,
        acl: AclSource {
            url: own_acl,
            graph,
            scope: AclScope::Resource,
        },
    }))
}
