use crate::{BlankNode, Graph, Iri, Literal, SolidGraphError, Subject, Term, Triple};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::{map, opt, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
};
use std::collections::HashMap;

/// An IRI as spelled in the source document, before prefix and base
/// resolution
#[derive(Clone, Debug)]
enum RawIri {
    Full(String),
    Prefixed { prefix: String, local: String },
}

#[derive(Clone, Debug)]
enum RawTerm {
    Iri(RawIri),
    Blank(String),
    Literal {
        value: String,
        language: Option<String>,
        datatype: Option<RawIri>,
    },
}

#[derive(Clone, Debug)]
enum RawSubject {
    Iri(RawIri),
    Blank(String),
}

type RawStatement = (RawSubject, Vec<(Option<RawIri>, Vec<RawTerm>)>);

struct ParseEnv {
    base: Iri,
    prefixes: HashMap<String, String>,
}

/// Parse a Turtle document into a [`Graph`], resolving relative IRIs
/// against `base`
pub fn parse_turtle(source: &str, base: &Iri) -> Result<Graph, SolidGraphError> {
    let mut env = ParseEnv {
        base: base.clone(),
        prefixes: HashMap::new(),
    };
    let mut graph = Graph::default();

    let (mut rest, _) = sp(source).map_err(|error| at(source, error))?;
    while !rest.is_empty() {
        if let Ok((next, (prefix, namespace))) = prefix_directive(rest) {
            let namespace = env.base.join(&namespace)?;
            env.prefixes.insert(prefix, namespace.as_str().to_owned());
            rest = skip(next)?;
            continue;
        }
        if let Ok((next, new_base)) = base_directive(rest) {
            env.base = env.base.join(&new_base)?;
            rest = skip(next)?;
            continue;
        }

        let (next, statement) = triples_statement(rest).map_err(|error| at(rest, error))?;
        expand(&mut graph, statement, &env)?;
        rest = skip(next)?;
    }

    Ok(graph)
}

fn expand(graph: &mut Graph, statement: RawStatement, env: &ParseEnv) -> Result<(), SolidGraphError> {
    let (raw_subject, predicate_objects) = statement;
    let subject = match raw_subject {
        RawSubject::Iri(iri) => Subject::Iri(resolve(iri, env)?),
        RawSubject::Blank(label) => Subject::Blank(BlankNode::new(label)),
    };

    for (raw_predicate, objects) in predicate_objects {
        let predicate = match raw_predicate {
            Some(iri) => resolve(iri, env)?,
            // the `a` keyword
            None => crate::vocab::rdf::type_(),
        };
        for raw_object in objects {
            let object = match raw_object {
                RawTerm::Iri(iri) => Term::Iri(resolve(iri, env)?),
                RawTerm::Blank(label) => Term::Blank(BlankNode::new(label)),
                RawTerm::Literal {
                    value,
                    language,
                    datatype,
                } => Term::Literal(Literal {
                    value,
                    language,
                    datatype: datatype.map(|iri| resolve(iri, env)).transpose()?,
                }),
            };
            graph.insert(Triple::new(subject.clone(), predicate.clone(), object));
        }
    }
    Ok(())
}

fn resolve(raw: RawIri, env: &ParseEnv) -> Result<Iri, SolidGraphError> {
    match raw {
        RawIri::Full(reference) => env.base.join(&reference),
        RawIri::Prefixed { prefix, local } => {
            let namespace = env.prefixes.get(&prefix).ok_or_else(|| {
                SolidGraphError::Parse(format!("undeclared prefix: {prefix}:"))
            })?;
            Iri::new(format!("{namespace}{local}"))
        }
    }
}

fn skip(input: &str) -> Result<&str, SolidGraphError> {
    let (rest, _) = sp(input).map_err(|error| at(input, error))?;
    Ok(rest)
}

fn at(input: &str, _error: nom::Err<nom::error::Error<&str>>) -> SolidGraphError {
    let snippet = input.chars().take(48).collect::<String>();
    SolidGraphError::Parse(format!("unexpected input at: {snippet:?}"))
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char('#'), take_while(|c| c != '\n' && c != '\r')))(input)
}

/// Zero or more whitespace characters and comments
fn sp(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), line_comment))))(input)
}

fn prefix_directive(input: &str) -> IResult<&str, (String, String)> {
    delimited(
        pair(tag("@prefix"), sp),
        separated_pair(
            map(terminated(pn_prefix, char(':')), str::to_owned),
            sp,
            iriref,
        ),
        pair(sp, char('.')),
    )(input)
}

fn base_directive(input: &str) -> IResult<&str, String> {
    delimited(pair(tag("@base"), sp), iriref, pair(sp, char('.')))(input)
}

fn triples_statement(input: &str) -> IResult<&str, RawStatement> {
    terminated(
        separated_pair(subject, sp, predicate_object_list),
        preceded(sp, char('.')),
    )(input)
}

fn predicate_object_list(input: &str) -> IResult<&str, Vec<(Option<RawIri>, Vec<RawTerm>)>> {
    terminated(
        separated_list1(
            preceded(sp, char(';')),
            preceded(sp, separated_pair(verb, sp, object_list)),
        ),
        // tolerate a trailing semicolon before the closing dot
        opt(preceded(sp, char(';'))),
    )(input)
}

fn object_list(input: &str) -> IResult<&str, Vec<RawTerm>> {
    separated_list1(preceded(sp, char(',')), preceded(sp, object))(input)
}

fn verb(input: &str) -> IResult<&str, Option<RawIri>> {
    alt((
        // `a` must be followed by whitespace or it is a prefixed name
        map(terminated(char('a'), nom::combinator::peek(multispace1)), |_| None),
        map(raw_iri, Some),
    ))(input)
}

fn subject(input: &str) -> IResult<&str, RawSubject> {
    alt((
        map(blank_node, |label| RawSubject::Blank(label.to_owned())),
        map(raw_iri, RawSubject::Iri),
    ))(input)
}

fn object(input: &str) -> IResult<&str, RawTerm> {
    alt((
        map(blank_node, |label| RawTerm::Blank(label.to_owned())),
        literal,
        map(raw_iri, RawTerm::Iri),
    ))(input)
}

fn raw_iri(input: &str) -> IResult<&str, RawIri> {
    alt((
        map(iriref, RawIri::Full),
        map(prefixed_name, |(prefix, local)| RawIri::Prefixed {
            prefix: prefix.to_owned(),
            local: local.to_owned(),
        }),
    ))(input)
}

fn iriref(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('<'), take_while(|c| c != '>'), char('>')),
        str::to_owned,
    )(input)
}

fn prefixed_name(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(pn_prefix, char(':'), pn_local)(input)
}

fn pn_prefix(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '-')(input)
}

/// The local part of a prefixed name. Dots are permitted inside but a
/// trailing dot belongs to the enclosing statement, not the name.
fn pn_local(input: &str) -> IResult<&str, &str> {
    let mut end = 0;
    for (index, character) in input.char_indices() {
        if character.is_alphanumeric()
            || character == '_'
            || character == '-'
            || character == '%'
            || character == '.'
        {
            end = index + character.len_utf8();
        } else {
            break;
        }
    }
    while end > 0 && input.as_bytes()[end - 1] == b'.' {
        end -= 1;
    }
    Ok((&input[end..], &input[..end]))
}

fn blank_node(input: &str) -> IResult<&str, &str> {
    preceded(
        tag("_:"),
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-'),
    )(input)
}

fn literal(input: &str) -> IResult<&str, RawTerm> {
    let (rest, value) = quoted_string(input)?;
    let (rest, language) = opt(preceded(
        char('@'),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
    ))(rest)?;
    let (rest, datatype) = opt(preceded(tag("^^"), raw_iri))(rest)?;
    Ok((
        rest,
        RawTerm::Literal {
            value,
            language: language.map(str::to_owned),
            datatype,
        },
    ))
}

fn quoted_string(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = char('"')(input)?;
    let mut unescaped = String::new();
    let mut chars = rest.char_indices();
    loop {
        match chars.next() {
            Some((index, '"')) => {
                rest = &rest[index + 1..];
                return Ok((rest, unescaped));
            }
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => unescaped.push('\n'),
                Some((_, 't')) => unescaped.push('\t'),
                Some((_, 'r')) => unescaped.push('\r'),
                Some((_, '"')) => unescaped.push('"'),
                Some((_, '\\')) => unescaped.push('\\'),
                _ => {
                    return Err(nom::Err::Error(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Escaped,
                    )));
                }
            },
            Some((_, character)) => unescaped.push(character),
            None => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TripleSelector, vocab};

    fn base() -> Iri {
        Iri::new("https://some.pod/resource.acl").expect("test IRI")
    }

    #[test]
    fn parses_a_wac_acl_document() -> Result<(), SolidGraphError> {
        let source = r#"
            @prefix acl: <http://www.w3.org/ns/auth/acl#>.
            @prefix foaf: <http://xmlns.com/foaf/0.1/>.

            # The resource owner
            <#owner>
                a acl:Authorization;
                acl:accessTo <https://some.pod/resource>;
                acl:agent <https://some.pod/profile#me>;
                acl:mode acl:Read, acl:Write, acl:Control.

            <#public>
                a acl:Authorization;
                acl:accessTo <https://some.pod/resource>;
                acl:agentClass foaf:Agent;
                acl:mode acl:Read.
        "#;

        let graph = parse_turtle(source, &base())?;

        let owner = Subject::Iri(Iri::new("https://some.pod/resource.acl#owner")?);
        assert!(graph.has(
            &owner,
            &vocab::rdf::type_(),
            &Term::Iri(vocab::acl::authorization())
        ));
        assert_eq!(graph.iri_objects(&owner, &vocab::acl::mode()).len(), 3);

        let public = Subject::Iri(Iri::new("https://some.pod/resource.acl#public")?);
        assert!(graph.has(
            &public,
            &vocab::acl::agent_class(),
            &Term::Iri(vocab::foaf::agent())
        ));
        Ok(())
    }

    #[test]
    fn resolves_relative_iris_against_the_base() -> Result<(), SolidGraphError> {
        let graph = parse_turtle(
            "<#rule> <http://www.w3.org/ns/auth/acl#accessTo> <../other>.",
            &base(),
        )?;
        let rule = Subject::Iri(Iri::new("https://some.pod/resource.acl#rule")?);
        assert_eq!(
            graph.iri_objects(&rule, &vocab::acl::access_to()),
            vec![&Iri::new("https://some.pod/other")?]
        );
        Ok(())
    }

    #[test]
    fn parses_blank_nodes_and_literals() -> Result<(), SolidGraphError> {
        let source = r#"
            @prefix ex: <https://vocab.example/>.
            _:m1 ex:label "A \"quoted\" name"@en; ex:value "x"^^ex:Datum.
        "#;
        let graph = parse_turtle(source, &base())?;
        let subject = Subject::Blank(BlankNode::new("m1"));
        let labels = graph.objects(&subject, &Iri::new("https://vocab.example/label")?);
        assert_eq!(
            labels,
            vec![&Term::Literal(Literal {
                value: "A \"quoted\" name".into(),
                language: Some("en".into()),
                datatype: None,
            })]
        );
        Ok(())
    }

    #[test]
    fn undeclared_prefix_is_a_parse_error() {
        let result = parse_turtle("<#rule> acl:mode acl:Read.", &base());
        assert!(matches!(result, Err(SolidGraphError::Parse(_))));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let result = parse_turtle("<html><body>not turtle</body>", &base());
        assert!(matches!(result, Err(SolidGraphError::Parse(_))));
    }

    #[test]
    fn a_keyword_is_not_confused_with_prefixed_names() -> Result<(), SolidGraphError> {
        let source = r#"
            @prefix a: <https://vocab.example/>.
            <#thing> a a:Widget.
        "#;
        let graph = parse_turtle(source, &base())?;
        let selected = graph.select(
            &TripleSelector::default()
                .with_predicate(vocab::rdf::type_())
                .with_object(Iri::new("https://vocab.example/Widget")?),
        );
        assert_eq!(selected.len(), 1);
        Ok(())
    }
}
