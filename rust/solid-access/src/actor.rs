use solid_access_graph::Iri;

/// The party an authorization rule applies to.
///
/// The four kinds are disjoint categories for rule lookup: a query for an
/// agent's access never matches rules scoped to a group with the same IRI,
/// and vice versa.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Actor {
    /// A specific agent, identified by WebID
    Agent(Iri),
    /// A specific group of agents, identified by the group listing's IRI
    Group(Iri),
    /// Anyone, including unauthenticated visitors
    Public,
    /// Any logged-in agent
    Authenticated,
}

impl Actor {
    /// Whether this actor represents a logged-in agent
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Agent(_) | Actor::Authenticated)
    }
}
