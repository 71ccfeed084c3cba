//! CNS invocation paths and pub/sub topics

/// Root path of a context; also the pub/sub topic carrying its updates
pub fn context_path(context: &str) -> String {
    format!("node/contexts/{}", context)
}

/// Capabilities of a context
pub fn capabilities_path(context: &str) -> String {
    format!("{}/capabilities", context_path(context))
}

/// A profile definition
pub fn profile_path(profile: &str) -> String {
    format!("profiles/{}", profile)
}

/// Resolve a POST target relative to the context root
///
/// - `""` is the context root
/// - `~rest` appends `rest` to the context root verbatim
/// - `/path` is used as is
/// - anything else is joined to the context root with a slash
pub fn location(context: &str, path: &str) -> String {
    let home = context_path(context);

    if let Some(rest) = path.strip_prefix('~') {
        return format!("{}{}", home, rest);
    }
    if path.starts_with('/') {
        return path.to_string();
    }
    if path.is_empty() {
        return home;
    }
    format!("{}/{}", home, path)
}
