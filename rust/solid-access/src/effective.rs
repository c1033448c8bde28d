use crate::{AccessModes, ResourceInfo};

/// The parsed `WAC-Allow` permission summary of a response
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WacAllow {
    /// The modes granted to the requesting user
    pub user: AccessModes,
    /// The modes granted to the public
    pub public: AccessModes,
}

/// Parse a `WAC-Allow` header value, e.g. `user="read write",public="read"`.
///
/// Scopes that are missing or malformed contribute all-false; unknown
/// scopes and unknown mode tokens are ignored.
pub fn parse_wac_allow(value: &str) -> WacAllow {
    let mut summary = WacAllow::default();

    for entry in value.split(',') {
        let Some((scope, modes_text)) = entry.split_once('=') else {
            continue;
        };
        let modes_text = modes_text.trim();
        let modes_text = modes_text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(modes_text);

        let mut modes = AccessModes::NONE;
        for token in modes_text.split_ascii_whitespace() {
            match token.to_ascii_lowercase().as_str() {
                "read" => modes.read = true,
                "append" => modes.append = true,
                "write" => modes.write = true,
                "control" => modes.control = true,
                _ => {}
            }
        }
        let modes = modes.normalized();

        match scope.trim().to_ascii_lowercase().as_str() {
            "user" => summary.user = modes,
            "public" => summary.public = modes,
            _ => {}
        }
    }

    summary
}

/// A summarized access decision derived from response metadata alone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveAccess {
    /// The modes the requesting user holds
    pub user: AccessModes,
    /// The modes the public holds, when the server's signal covers the
    /// public at all (only `WAC-Allow` does)
    pub public: Option<AccessModes>,
}

/// Derive the effective access for the requesting user (and, where the
/// signal allows, the public) from metadata already fetched for a resource.
///
/// This is a pure function: it issues no network requests. WAC-governed
/// resources are summarized from `WAC-Allow`; ACP-governed resources from
/// the allow-mode Link hints, which carry no public summary. Absent both
/// signals, the user gets all-false and the public is omitted.
pub fn effective_access(info: &ResourceInfo) -> EffectiveAccess {
    let metadata = info.metadata();

    if let Some(wac_allow) = &metadata.wac_allow {
        return EffectiveAccess {
            user: wac_allow.user.normalized(),
            public: Some(wac_allow.public.normalized()),
        };
    }

    if let Some(allow) = metadata.acp_allow {
        return EffectiveAccess {
            user: allow.normalized(),
            public: None,
        };
    }

    EffectiveAccess {
        user: AccessModes::NONE,
        public: None,
    }
}
