//! Constant IRIs for the vocabularies used by Solid authorization graphs

use crate::Iri;

/// The RDF core vocabulary
pub mod rdf {
    use super::Iri;

    /// `rdf:type`
    pub fn type_() -> Iri {
        Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    }
}

/// The Web Access Control vocabulary
pub mod acl {
    use super::Iri;

    /// The WAC namespace
    pub const NAMESPACE: &str = "http://www.w3.org/ns/auth/acl#";

    /// `acl:Authorization`
    pub fn authorization() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#Authorization")
    }

    /// `acl:accessTo`
    pub fn access_to() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#accessTo")
    }

    /// `acl:default`
    pub fn default() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#default")
    }

    /// `acl:agent`
    pub fn agent() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#agent")
    }

    /// `acl:agentGroup`
    pub fn agent_group() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#agentGroup")
    }

    /// `acl:agentClass`
    pub fn agent_class() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#agentClass")
    }

    /// `acl:AuthenticatedAgent`
    pub fn authenticated_agent() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#AuthenticatedAgent")
    }

    /// `acl:mode`
    pub fn mode() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#mode")
    }

    /// `acl:Read`
    pub fn read() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#Read")
    }

    /// `acl:Append`
    pub fn append() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#Append")
    }

    /// `acl:Write`
    pub fn write() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#Write")
    }

    /// `acl:Control`
    pub fn control() -> Iri {
        Iri::from_static("http://www.w3.org/ns/auth/acl#Control")
    }
}

/// The FOAF terms consumed by WAC
pub mod foaf {
    use super::Iri;

    /// `foaf:Agent`, the class of everyone (the WAC "public" marker)
    pub fn agent() -> Iri {
        Iri::from_static("http://xmlns.com/foaf/0.1/Agent")
    }
}

/// The Access Control Policy vocabulary
pub mod acp {
    use super::Iri;

    /// The ACP namespace
    pub const NAMESPACE: &str = "http://www.w3.org/ns/solid/acp#";

    /// `acp:AccessControlResource`
    pub fn access_control_resource() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#AccessControlResource")
    }

    /// `acp:AccessControl`
    pub fn access_control_class() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#AccessControl")
    }

    /// `acp:accessControl`
    pub fn access_control() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#accessControl")
    }

    /// `acp:memberAccessControl`
    pub fn member_access_control() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#memberAccessControl")
    }

    /// `acp:apply`
    pub fn apply() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#apply")
    }

    /// `acp:Policy`
    pub fn policy() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Policy")
    }

    /// `acp:Matcher`
    pub fn matcher() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Matcher")
    }

    /// `acp:allOf`
    pub fn all_of() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#allOf")
    }

    /// `acp:anyOf`
    pub fn any_of() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#anyOf")
    }

    /// `acp:noneOf`
    pub fn none_of() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#noneOf")
    }

    /// `acp:agent`
    pub fn agent() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#agent")
    }

    /// `acp:group`
    pub fn group() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#group")
    }

    /// `acp:PublicAgent`, the class of everyone
    pub fn public_agent() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#PublicAgent")
    }

    /// `acp:AuthenticatedAgent`, the class of logged-in agents
    pub fn authenticated_agent() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#AuthenticatedAgent")
    }

    /// `acp:vc`, a verifiable-credential type constraint
    pub fn vc() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#vc")
    }

    /// `acp:issuer`, a verifiable-credential issuer constraint
    pub fn issuer() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#issuer")
    }

    /// `acp:allow`
    pub fn allow() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#allow")
    }

    /// `acp:deny`
    pub fn deny() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#deny")
    }

    /// `acp:Read`
    pub fn read() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Read")
    }

    /// `acp:Append`
    pub fn append() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Append")
    }

    /// `acp:Write`
    pub fn write() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Write")
    }

    /// `acp:Control`
    pub fn control() -> Iri {
        Iri::from_static("http://www.w3.org/ns/solid/acp#Control")
    }
}

/// The Linked Data Platform terms consumed for container detection
pub mod ldp {
    use super::Iri;

    /// `ldp:Container`
    pub fn container() -> Iri {
        Iri::from_static("http://www.w3.org/ns/ldp#Container")
    }

    /// `ldp:BasicContainer`
    pub fn basic_container() -> Iri {
        Iri::from_static("http://www.w3.org/ns/ldp#BasicContainer")
    }
}

/// Solid platform terms
pub mod solid {
    /// The `rel` IRI that links a resource to its pod owner
    pub const POD_OWNER_REL: &str = "http://www.w3.org/ns/solid/terms#podOwner";
}
