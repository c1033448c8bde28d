use crate::{Graph, Iri, Literal, Subject, Term, vocab};
use indexmap::IndexMap;

/// The namespaces that are abbreviated on output, when used
const PREFIXES: &[(&str, &str)] = &[
    ("acl", vocab::acl::NAMESPACE),
    ("acp", vocab::acp::NAMESPACE),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("ldp", "http://www.w3.org/ns/ldp#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Write a [`Graph`] out as Turtle.
///
/// Subjects appear in first-insertion order, objects for a shared predicate
/// are folded into `,` lists and predicates for a shared subject into `;`
/// lists, so that editing a parsed document and serializing it again yields
/// a stable, reviewable result.
pub fn serialize_turtle(graph: &Graph) -> String {
    // subject -> predicate -> objects, all in first-seen order
    let mut by_subject: IndexMap<&Subject, IndexMap<&Iri, Vec<&Term>>> = IndexMap::new();
    for triple in graph.iter() {
        by_subject
            .entry(&triple.subject)
            .or_default()
            .entry(&triple.predicate)
            .or_default()
            .push(&triple.object);
    }

    let mut used_prefixes: Vec<(&str, &str)> = Vec::new();
    let mut body = String::new();

    for (subject, predicates) in &by_subject {
        let subject_text = match subject {
            Subject::Iri(iri) => compress(iri, &mut used_prefixes),
            Subject::Blank(node) => node.to_string(),
        };
        body.push_str(&subject_text);
        body.push('\n');

        let count = predicates.len();
        for (index, (predicate, objects)) in predicates.iter().enumerate() {
            let predicate_text = if **predicate == vocab::rdf::type_() {
                "a".to_owned()
            } else {
                compress(predicate, &mut used_prefixes)
            };

            let object_text = objects
                .iter()
                .map(|object| term(object, &mut used_prefixes))
                .collect::<Vec<_>>()
                .join(", ");

            let separator = if index + 1 == count { '.' } else { ';' };
            body.push_str(&format!("    {predicate_text} {object_text}{separator}\n"));
        }
        body.push('\n');
    }

    let mut output = String::new();
    for (prefix, namespace) in used_prefixes {
        output.push_str(&format!("@prefix {prefix}: <{namespace}>.\n"));
    }
    if !output.is_empty() && !body.is_empty() {
        output.push('\n');
    }
    output.push_str(body.trim_end());
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

fn term(term: &Term, used_prefixes: &mut Vec<(&'static str, &'static str)>) -> String {
    match term {
        Term::Iri(iri) => compress(iri, used_prefixes),
        Term::Blank(node) => node.to_string(),
        Term::Literal(literal) => literal_text(literal, used_prefixes),
    }
}

fn literal_text(
    literal: &Literal,
    used_prefixes: &mut Vec<(&'static str, &'static str)>,
) -> String {
    let escaped = literal
        .value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    let mut text = format!("\"{escaped}\"");
    if let Some(language) = &literal.language {
        text.push_str(&format!("@{language}"));
    } else if let Some(datatype) = &literal.datatype {
        text.push_str(&format!("^^{}", compress(datatype, used_prefixes)));
    }
    text
}

/// Abbreviate an IRI with a well-known prefix when its local part is simple
/// enough to survive a reparse; otherwise emit it in full.
fn compress(iri: &Iri, used_prefixes: &mut Vec<(&'static str, &'static str)>) -> String {
    for (prefix, namespace) in PREFIXES.iter().copied() {
        if let Some(local) = iri.as_str().strip_prefix(namespace) {
            let simple = !local.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if simple {
                if !used_prefixes.contains(&(prefix, namespace)) {
                    used_prefixes.push((prefix, namespace));
                }
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{iri}>")
}
