use anyhow::Result;
use solid_access::{
    AccessChange, AccessModes, AcrSource, Actor, FetchResponse, Method, ModeChange,
    SolidAccessError,
    acp::{self, AccessContext, Credential, MatcherTarget},
    helpers::StaticFetch,
};
use solid_access_graph::{Iri, parse_turtle};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_dedicated_worker);

const RESOURCE: &str = "https://some.pod/file";
const ACR: &str = "https://some.pod/file.acr";
const AGENT: &str = "https://some.pod/profile#me";
const OTHER_AGENT: &str = "https://other.pod/profile#you";

const ACR_LINK: &str =
    "<file.acr>; rel=\"http://www.w3.org/ns/solid/acp#accessControl\"";

fn iri(value: &str) -> Iri {
    Iri::new(value).expect("test IRI")
}

fn read_only() -> AccessModes {
    AccessModes {
        read: true,
        ..AccessModes::NONE
    }
}

fn pod_with_acr(acr_body: &str) -> StaticFetch {
    StaticFetch::default()
        .respond_to(
            Method::Head,
            RESOURCE,
            FetchResponse::turtle("", &[ACR_LINK]),
        )
        .respond_to(Method::Get, ACR, FetchResponse::turtle(acr_body, &[]))
        .respond_to(Method::Put, ACR, FetchResponse::status(205))
}

fn acr_source(body: &str) -> Result<AcrSource> {
    Ok(AcrSource {
        url: iri(ACR),
        graph: parse_turtle(body, &iri(ACR))?,
    })
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn policies_grant_to_matched_agents_only() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:allOf <#matcher>.\n\
         <#matcher> a acp:Matcher;\n\
            acp:agent <https://some.pod/profile#me>.\n",
    );

    let access = acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?;
    assert_eq!(access, Some(read_only()));

    let other = acp::agent_access(&iri(RESOURCE), &iri(OTHER_AGENT), &fetch).await?;
    assert_eq!(other, Some(AccessModes::NONE));

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn a_public_matcher_covers_everyone() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:anyOf <#matcher>.\n\
         <#matcher> acp:agent acp:PublicAgent.\n",
    );

    assert_eq!(
        acp::public_access(&iri(RESOURCE), &fetch).await?,
        Some(read_only())
    );
    // a public grant reaches named agents too
    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        Some(read_only())
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn an_authenticated_matcher_excludes_the_anonymous_public() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Append;\n\
            acp:anyOf <#matcher>.\n\
         <#matcher> acp:agent acp:AuthenticatedAgent.\n",
    );

    assert_eq!(
        acp::authenticated_access(&iri(RESOURCE), &fetch).await?,
        Some(AccessModes {
            append: true,
            ..AccessModes::NONE
        })
    );
    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        Some(AccessModes {
            append: true,
            ..AccessModes::NONE
        })
    );
    assert_eq!(
        acp::public_access(&iri(RESOURCE), &fetch).await?,
        Some(AccessModes::NONE)
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn deny_wins_over_allow_per_mode() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#grant>, <#limit>.\n\
         <#grant> a acp:Policy;\n\
            acp:allow acp:Read, acp:Write;\n\
            acp:allOf <#matcher>.\n\
         <#limit> a acp:Policy;\n\
            acp:deny acp:Write;\n\
            acp:allOf <#matcher>.\n\
         <#matcher> acp:agent <https://some.pod/profile#me>.\n",
    );

    // write is denied, but the append it implied survives
    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        Some(AccessModes {
            read: true,
            append: true,
            ..AccessModes::NONE
        })
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn a_denied_append_also_suppresses_write() -> Result<()> {
    // write implies append, so letting write stand would re-grant the
    // denied append through normalization
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#grant>, <#limit>.\n\
         <#grant> a acp:Policy;\n\
            acp:allow acp:Read, acp:Write;\n\
            acp:allOf <#matcher>.\n\
         <#limit> a acp:Policy;\n\
            acp:deny acp:Append;\n\
            acp:allOf <#matcher>.\n\
         <#matcher> acp:agent <https://some.pod/profile#me>.\n",
    );

    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        Some(read_only())
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn a_policy_without_positive_matchers_applies_to_no_one() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:noneOf <#matcher>.\n\
         <#matcher> acp:agent <https://some.pod/profile#me>.\n",
    );

    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(OTHER_AGENT), &fetch).await?,
        Some(AccessModes::NONE)
    );
    assert_eq!(
        acp::public_access(&iri(RESOURCE), &fetch).await?,
        Some(AccessModes::NONE)
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn none_of_carves_an_exception_out_of_a_broad_grant() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:anyOf <#everyone>;\n\
            acp:noneOf <#banned>.\n\
         <#everyone> acp:agent acp:PublicAgent.\n\
         <#banned> acp:agent <https://some.pod/profile#me>.\n",
    );

    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        Some(AccessModes::NONE)
    );
    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(OTHER_AGENT), &fetch).await?,
        Some(read_only())
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn credential_matchers_require_a_presented_credential() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:allOf <#matcher>.\n\
         <#matcher> acp:vc <https://vocab.example/MembershipCredential>.\n",
    );

    let bare = AccessContext::actor(Actor::Agent(iri(AGENT)));
    assert_eq!(
        acp::context_access(&iri(RESOURCE), &bare, &fetch).await?,
        Some(AccessModes::NONE)
    );

    let with_credential = bare.with_credential(Credential {
        issuer: iri("https://issuer.example/"),
        types: vec![iri("https://vocab.example/MembershipCredential")],
    });
    assert_eq!(
        acp::context_access(&iri(RESOURCE), &with_credential, &fetch).await?,
        Some(read_only())
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn a_missing_acr_resolves_to_none() -> Result<()> {
    let fetch = StaticFetch::default().respond_to(
        Method::Head,
        RESOURCE,
        FetchResponse::turtle("", &[]),
    );

    assert_eq!(
        acp::agent_access(&iri(RESOURCE), &iri(AGENT), &fetch).await?,
        None
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn agent_access_all_reports_every_named_agent() -> Result<()> {
    let fetch = pod_with_acr(
        "@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n\
         <> a acp:AccessControlResource;\n\
            acp:accessControl <#ac>.\n\
         <#ac> acp:apply <#policy>, <#limit>.\n\
         <#policy> a acp:Policy;\n\
            acp:allow acp:Read;\n\
            acp:anyOf <#readers>.\n\
         <#limit> a acp:Policy;\n\
            acp:deny acp:Read;\n\
            acp:allOf <#banned>.\n\
         <#readers> acp:agent <https://some.pod/profile#me>, <https://other.pod/profile#you>.\n\
         <#banned> acp:agent <https://other.pod/profile#you>.\n",
    );

    let all = acp::agent_access_all(&iri(RESOURCE), &fetch)
        .await?
        .expect("the ACR should be reachable");
    assert_eq!(all.len(), 2);
    assert_eq!(all[&iri(AGENT)], read_only());
    assert_eq!(all[&iri(OTHER_AGENT)], AccessModes::NONE);

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn granting_builds_a_policy_and_matcher_pair() -> Result<()> {
    let fetch = pod_with_acr("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n");

    let updated = acp::set_agent_access(
        &iri(RESOURCE),
        &iri(AGENT),
        &AccessChange::default().read(true),
        false,
        &fetch,
    )
    .await?
    .expect("the save should succeed");

    let policies = acp::resource_policies(&updated.acr);
    let context = AccessContext::actor(Actor::Agent(iri(AGENT)));
    assert_eq!(acp::evaluate(&policies, &context), read_only());

    // no one else is covered by the minted policy
    let other = AccessContext::actor(Actor::Agent(iri(OTHER_AGENT)));
    assert_eq!(acp::evaluate(&policies, &other), AccessModes::NONE);

    // nothing was linked into the member scope
    assert!(acp::member_policies(&updated.acr).is_empty());

    let saved = fetch.saved_bodies();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, iri(ACR));

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn public_grants_are_written_under_their_own_pair() -> Result<()> {
    let fetch = pod_with_acr("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n");

    let updated = acp::set_public_access(
        &iri(RESOURCE),
        &AccessChange::default().read(true),
        false,
        &fetch,
    )
    .await?
    .expect("the save should succeed");

    let policies = acp::resource_policies(&updated.acr);
    assert_eq!(
        acp::evaluate(&policies, &AccessContext::actor(Actor::Public)),
        read_only()
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn authenticated_grants_do_not_reach_the_anonymous_public() -> Result<()> {
    let fetch = pod_with_acr("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n");

    let updated = acp::set_authenticated_access(
        &iri(RESOURCE),
        &AccessChange::default().append(true),
        false,
        &fetch,
    )
    .await?
    .expect("the save should succeed");

    let policies = acp::resource_policies(&updated.acr);
    assert_eq!(
        acp::evaluate(&policies, &AccessContext::actor(Actor::Authenticated)),
        AccessModes {
            append: true,
            ..AccessModes::NONE
        }
    );
    assert_eq!(
        acp::evaluate(&policies, &AccessContext::actor(Actor::Public)),
        AccessModes::NONE
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn revoking_merges_into_the_deny_set() -> Result<()> {
    let acr = acr_source("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n")?;
    let target = MatcherTarget::Actor(Actor::Agent(iri(AGENT)));

    let granted = acp::rewrite_for_change(
        &acr,
        &target,
        &AccessChange::default().read(true).write(true),
        false,
    )?;
    let revoked = acp::rewrite_for_change(
        &AcrSource {
            url: acr.url.clone(),
            graph: granted,
        },
        &target,
        &AccessChange::default().write(false),
        false,
    )?;

    let source = AcrSource {
        url: acr.url.clone(),
        graph: revoked,
    };
    let context = AccessContext::actor(Actor::Agent(iri(AGENT)));
    // write is gone, the append it implied stays, read was never touched
    assert_eq!(
        acp::evaluate(&acp::resource_policies(&source), &context),
        AccessModes {
            read: true,
            append: true,
            ..AccessModes::NONE
        }
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn the_inherit_flag_links_and_unlinks_the_member_scope() -> Result<()> {
    let acr = acr_source("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n")?;
    let target = MatcherTarget::Actor(Actor::Public);
    let change = AccessChange::default().read(true);

    let inherited = acp::rewrite_for_change(&acr, &target, &change, true)?;
    let source = AcrSource {
        url: acr.url.clone(),
        graph: inherited,
    };
    let context = AccessContext::actor(Actor::Public);
    assert_eq!(
        acp::evaluate(&acp::member_policies(&source), &context),
        read_only()
    );

    let uninherited = acp::rewrite_for_change(&source, &target, &change, false)?;
    let source = AcrSource {
        url: acr.url.clone(),
        graph: uninherited,
    };
    assert_eq!(
        acp::evaluate(&acp::member_policies(&source), &context),
        AccessModes::NONE
    );
    // the resource scope keeps the grant either way
    assert_eq!(
        acp::evaluate(&acp::resource_policies(&source), &context),
        read_only()
    );

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn credential_policies_cannot_govern_control() -> Result<()> {
    let fetch = StaticFetch::default();
    let mut change = AccessChange::default();
    change.control_read = ModeChange::Grant;
    change.control_write = ModeChange::Grant;

    let result = acp::set_vc_access(
        &iri(RESOURCE),
        &iri("https://vocab.example/MembershipCredential"),
        None,
        &change,
        false,
        &fetch,
    )
    .await;
    assert!(matches!(result, Err(SolidAccessError::Inexpressible(_))));
    assert!(fetch.requests().is_empty());

    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), tokio::test)]
async fn vc_grants_cover_credential_holders() -> Result<()> {
    let fetch = pod_with_acr("@prefix acp: <http://www.w3.org/ns/solid/acp#>.\n<> a acp:AccessControlResource.\n");

    let updated = acp::set_vc_access(
        &iri(RESOURCE),
        &iri("https://vocab.example/MembershipCredential"),
        Some(&iri("https://issuer.example/")),
        &AccessChange::default().read(true),
        false,
        &fetch,
    )
    .await?
    .expect("the save should succeed");

    let policies = acp::resource_policies(&updated.acr);
    let holder = AccessContext::actor(Actor::Agent(iri(AGENT))).with_credential(Credential {
        issuer: iri("https://issuer.example/"),
        types: vec![iri("https://vocab.example/MembershipCredential")],
    });
    assert_eq!(acp::evaluate(&policies, &holder), read_only());

    let bare = AccessContext::actor(Actor::Agent(iri(AGENT)));
    assert_eq!(acp::evaluate(&policies, &bare), AccessModes::NONE);

    Ok(())
}
