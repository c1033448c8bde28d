use crate::{AccessModes, AcrSource, Actor};
use solid_access_graph::{Graph, Iri, Subject, Term, vocab};

/// A verifiable credential under evaluation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    /// The party that issued the credential
    pub issuer: Iri,
    /// The credential's declared types
    pub types: Vec<Iri>,
}

/// The full identity a policy is evaluated against: an actor plus,
/// optionally, a verifiable credential they present
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessContext {
    /// Who is asking
    pub actor: Actor,
    /// A credential presented alongside the request, if any
    pub credential: Option<Credential>,
}

impl AccessContext {
    /// A context for a plain actor with no credential
    pub fn actor(actor: Actor) -> Self {
        AccessContext {
            actor,
            credential: None,
        }
    }

    /// Attach a credential to this context
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }
}

/// A parsed `acp:Matcher`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matcher {
    /// The node the matcher was parsed from
    pub subject: Subject,
    /// WebIDs this matcher names directly
    pub agents: Vec<Iri>,
    /// Groups this matcher names
    pub groups: Vec<Iri>,
    /// Whether the matcher includes everyone (`acp:PublicAgent`)
    pub public: bool,
    /// Whether the matcher includes all logged-in agents
    /// (`acp:AuthenticatedAgent`)
    pub authenticated: bool,
    /// Verifiable-credential types this matcher accepts
    pub vc_types: Vec<Iri>,
    /// Verifiable-credential issuers this matcher accepts
    pub issuers: Vec<Iri>,
}

impl Matcher {
    /// Read a matcher out of the policy graph
    pub fn parse(graph: &Graph, subject: Subject) -> Self {
        let mut agents = Vec::new();
        let mut public = false;
        let mut authenticated = false;
        for agent in graph.iri_objects(&subject, &vocab::acp::agent()) {
            if *agent == vocab::acp::public_agent() {
                public = true;
            } else if *agent == vocab::acp::authenticated_agent() {
                authenticated = true;
            } else {
                agents.push(agent.clone());
            }
        }

        let groups = graph
            .iri_objects(&subject, &vocab::acp::group())
            .into_iter()
            .cloned()
            .collect();
        let vc_types = graph
            .iri_objects(&subject, &vocab::acp::vc())
            .into_iter()
            .cloned()
            .collect();
        let issuers = graph
            .iri_objects(&subject, &vocab::acp::issuer())
            .into_iter()
            .cloned()
            .collect();

        Matcher {
            subject,
            agents,
            groups,
            public,
            authenticated,
            vc_types,
            issuers,
        }
    }

    /// Whether this matcher is satisfied by the given context. The
    /// constraint categories combine with OR: naming the actor's WebID,
    /// naming their group, marking the public, marking authenticated (for a
    /// logged-in actor), or accepting a credential the context presents.
    pub fn satisfied_by(&self, context: &AccessContext) -> bool {
        if self.public {
            return true;
        }
        if self.authenticated && context.actor.is_authenticated() {
            return true;
        }
        match &context.actor {
            Actor::Agent(webid) if self.agents.contains(webid) => return true,
            Actor::Group(group) if self.groups.contains(group) => return true,
            _ => {}
        }
        if let Some(credential) = &context.credential {
            if self
                .vc_types
                .iter()
                .any(|vc_type| credential.types.contains(vc_type))
            {
                return true;
            }
            if self.issuers.contains(&credential.issuer) {
                return true;
            }
        }
        false
    }
}

/// A parsed `acp:Policy`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    /// The node the policy was parsed from
    pub subject: Subject,
    /// The modes this policy allows for whoever it applies to
    pub allow: AccessModes,
    /// The modes this policy denies for whoever it applies to
    pub deny: AccessModes,
    /// Matchers that must all be satisfied
    pub all_of: Vec<Matcher>,
    /// Matchers of which at least one must be satisfied
    pub any_of: Vec<Matcher>,
    /// Matchers of which none may be satisfied
    pub none_of: Vec<Matcher>,
}

impl Policy {
    /// Read a policy and its matchers out of the policy graph
    pub fn parse(graph: &Graph, subject: Subject) -> Self {
        let matchers = |predicate: &Iri| -> Vec<Matcher> {
            graph
                .objects(&subject, predicate)
                .into_iter()
                .filter_map(|term| match term {
                    Term::Iri(iri) => Some(Subject::Iri(iri.clone())),
                    Term::Blank(node) => Some(Subject::Blank(node.clone())),
                    Term::Literal(_) => None,
                })
                .map(|matcher| Matcher::parse(graph, matcher))
                .collect()
        };

        Policy {
            allow: parse_modes(graph, &subject, &vocab::acp::allow()),
            deny: parse_modes(graph, &subject, &vocab::acp::deny()),
            all_of: matchers(&vocab::acp::all_of()),
            any_of: matchers(&vocab::acp::any_of()),
            none_of: matchers(&vocab::acp::none_of()),
            subject,
        }
    }

    /// Whether this policy applies to the given context.
    ///
    /// A policy with neither `allOf` nor `anyOf` matchers applies to no
    /// one, even when it carries `noneOf` matchers — a pure prohibition
    /// with no positive matcher is inapplicable rather than
    /// applies-to-everyone-else.
    pub fn applies_to(&self, context: &AccessContext) -> bool {
        if self.all_of.is_empty() && self.any_of.is_empty() {
            return false;
        }
        self.all_of
            .iter()
            .all(|matcher| matcher.satisfied_by(context))
            && (self.any_of.is_empty()
                || self
                    .any_of
                    .iter()
                    .any(|matcher| matcher.satisfied_by(context)))
            && !self
                .none_of
                .iter()
                .any(|matcher| matcher.satisfied_by(context))
    }
}

/// Both the ACP spelling (`acp:Read`) and the shared ACL mode IRIs
/// (`acl:Read`) appear in the wild; accept either.
pub(crate) fn parse_modes(graph: &Graph, subject: &Subject, predicate: &Iri) -> AccessModes {
    let mut modes = AccessModes::NONE;
    for mode in graph.iri_objects(subject, predicate) {
        if *mode == vocab::acp::read() || *mode == vocab::acl::read() {
            modes.read = true;
        } else if *mode == vocab::acp::append() || *mode == vocab::acl::append() {
            modes.append = true;
        } else if *mode == vocab::acp::write() || *mode == vocab::acl::write() {
            modes.write = true;
        } else if *mode == vocab::acp::control() || *mode == vocab::acl::control() {
            modes.control = true;
        }
    }
    modes
}

/// The node the Access Control Resource hangs off: the subject typed
/// `acp:AccessControlResource` when one exists, otherwise the ACR's own URL
pub(crate) fn acr_root(graph: &Graph, url: &Iri) -> Subject {
    graph
        .subjects_with(
            &vocab::rdf::type_(),
            &Term::Iri(vocab::acp::access_control_resource()),
        )
        .first()
        .map(|subject| (*subject).clone())
        .unwrap_or_else(|| Subject::Iri(url.clone()))
}

fn policies_via(acr: &AcrSource, link_predicate: &Iri) -> Vec<Policy> {
    let root = acr_root(&acr.graph, &acr.url);
    let mut policies = Vec::new();
    for control in acr.graph.objects(&root, link_predicate) {
        let control = match control {
            Term::Iri(iri) => Subject::Iri(iri.clone()),
            Term::Blank(node) => Subject::Blank(node.clone()),
            Term::Literal(_) => continue,
        };
        for policy in acr.graph.objects(&control, &vocab::acp::apply()) {
            let policy = match policy {
                Term::Iri(iri) => Subject::Iri(iri.clone()),
                Term::Blank(node) => Subject::Blank(node.clone()),
                Term::Literal(_) => continue,
            };
            policies.push(Policy::parse(&acr.graph, policy));
        }
    }
    policies
}

/// The policies that govern the protected resource itself
pub fn resource_policies(acr: &AcrSource) -> Vec<Policy> {
    policies_via(acr, &vocab::acp::access_control())
}

/// The policies that contained resources inherit ("member" scope)
pub fn member_policies(acr: &AcrSource) -> Vec<Policy> {
    policies_via(acr, &vocab::acp::member_access_control())
}

/// The combined access the given context holds under a set of policies:
/// allow union minus deny union, deny winning per mode, write implying
/// append
pub fn evaluate(policies: &[Policy], context: &AccessContext) -> AccessModes {
    let mut allow = AccessModes::NONE;
    let mut deny = AccessModes::NONE;
    for policy in policies {
        if !policy.applies_to(context) {
            continue;
        }
        allow = allow.union(policy.allow);
        deny.read |= policy.deny.read;
        deny.append |= policy.deny.append;
        deny.write |= policy.deny.write;
        deny.control |= policy.deny.control;
    }
    // write is a strict superset of append, so a denied append also
    // suppresses write; otherwise normalization would re-grant it
    AccessModes {
        read: allow.read && !deny.read,
        append: allow.append && !deny.append,
        write: allow.write && !deny.write && !deny.append,
        control: allow.control && !deny.control,
    }
    .normalized()
}
