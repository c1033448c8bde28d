//! The Web Access Control rule engine.
//!
//! WAC authorization graphs hold `acl:Authorization` rules, each tying one
//! or more actor references to a set of granted modes for one or more
//! target resources. Reading merges every matching rule with OR semantics;
//! writing applies a partial [`AccessChange`](crate::AccessChange) while
//! leaving every unrelated grant in place, splitting rules that are shared
//! between actors or targets rather than editing them in bulk.

mod read;
pub use read::*;

mod write;
pub use write::*;

use crate::{AccessModes, AclScope, Actor};
use solid_access_graph::{Graph, Iri, Subject, Term, Triple, TripleSelector, vocab};

/// The predicate and object that reference `actor` inside a WAC rule
pub(crate) fn actor_reference(actor: &Actor) -> (Iri, Term) {
    match actor {
        Actor::Agent(iri) => (vocab::acl::agent(), Term::Iri(iri.clone())),
        Actor::Group(iri) => (vocab::acl::agent_group(), Term::Iri(iri.clone())),
        Actor::Public => (vocab::acl::agent_class(), Term::Iri(vocab::foaf::agent())),
        Actor::Authenticated => (
            vocab::acl::agent_class(),
            Term::Iri(vocab::acl::authenticated_agent()),
        ),
    }
}

/// All subjects typed `acl:Authorization`
pub(crate) fn rules(graph: &Graph) -> Vec<Subject> {
    graph
        .select(
            &TripleSelector::default()
                .with_predicate(vocab::rdf::type_())
                .with_object(vocab::acl::authorization()),
        )
        .into_iter()
        .map(|triple| triple.subject.clone())
        .collect()
}

/// Whether a rule applies to the queried resource under the given scope:
/// `acl:accessTo` for the resource's own ACL, `acl:default` on the
/// fallback container for an inherited ACL
pub(crate) fn rule_targets(graph: &Graph, rule: &Subject, resource: &Iri, scope: &AclScope) -> bool {
    match scope {
        AclScope::Resource => graph.has(
            rule,
            &vocab::acl::access_to(),
            &Term::Iri(resource.clone()),
        ),
        AclScope::Fallback { container } => graph.has(
            rule,
            &vocab::acl::default(),
            &Term::Iri(container.clone()),
        ),
    }
}

/// The modes a single rule grants
pub(crate) fn rule_modes(graph: &Graph, rule: &Subject) -> AccessModes {
    let mut modes = AccessModes::NONE;
    for mode in graph.iri_objects(rule, &vocab::acl::mode()) {
        if *mode == vocab::acl::read() {
            modes.read = true;
        } else if *mode == vocab::acl::append() {
            modes.append = true;
        } else if *mode == vocab::acl::write() {
            modes.write = true;
        } else if *mode == vocab::acl::control() {
            modes.control = true;
        }
    }
    modes
}

/// The rules that both target the resource (under the source's scope) and
/// reference the actor under the actor's own kind
pub(crate) fn matching_rules(
    graph: &Graph,
    resource: &Iri,
    scope: &AclScope,
    actor: &Actor,
) -> Vec<Subject> {
    let (predicate, object) = actor_reference(actor);
    rules(graph)
        .into_iter()
        .filter(|rule| rule_targets(graph, rule, resource, scope))
        .filter(|rule| graph.has(rule, &predicate, &object))
        .collect()
}

pub(crate) fn mode_triples(rule: &Subject, modes: AccessModes) -> Vec<Triple> {
    let mut triples = Vec::new();
    let mut push = |iri: Iri| {
        triples.push(Triple::new(rule.clone(), vocab::acl::mode(), iri));
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

/// Mint a rule subject on the ACL document that is not yet in use
pub(crate) fn fresh_rule_subject(graph: &Graph, acl_url: &Iri) -> Subject {
    let mut index = 0;
    loop {
        let candidate = Subject::Iri(acl_url.with_fragment(&format!("rule-{index}")));
        let taken = graph
            .iter()
            .any(|triple| triple.subject == candidate);
        if !taken {
            return candidate;
        }
        index += 1;
    }
}
